use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Upstream LLM Args ---
    /// API key for the upstream generative-language API. A request made
    /// while this is unset fails with 500.
    #[arg(long, env = "GEMINI_API_KEY")]
    pub gemini_api_key: Option<String>,

    /// Model name for chat completion.
    #[arg(long, env = "CHAT_MODEL", default_value = "gemini-2.5-flash")]
    pub chat_model: String,

    /// Base URL for the generative-language API.
    #[arg(
        long,
        env = "CHAT_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub chat_base_url: String,

    // --- Server Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0:8080")]
    pub server_addr: String,

    /// Overrides the port part of --server-addr when set.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory containing the static front-end assets.
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: String,

    /// Landing document served for requests to /.
    #[arg(long, env = "INDEX_PAGE", default_value = "index.html")]
    pub index_page: String,

    /// Path to a JSON file overriding the built-in prompts. Optional; the
    /// built-in prompts apply when the file does not exist.
    #[arg(long, env = "PROMPTS_PATH", default_value = "json/prompts.json")]
    pub prompts_path: String,
}

impl Args {
    pub fn listen_addr(&self) -> String {
        match self.port {
            Some(port) => {
                let host = self.server_addr
                    .rsplit_once(':')
                    .map(|(host, _)| host)
                    .unwrap_or("0.0.0.0");
                format!("{}:{}", host, port)
            }
            None => self.server_addr.clone(),
        }
    }
}
