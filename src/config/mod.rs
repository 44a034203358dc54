pub mod prompt;

use crate::cli::Args;

/// Immutable runtime configuration, resolved once at startup and handed
/// to the server. Handlers never read the process environment directly.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub static_dir: String,
    pub index_page: String,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            api_key: args.gemini_api_key.clone().filter(|k| !k.is_empty()),
            model: args.chat_model.clone(),
            base_url: args.chat_base_url.clone(),
            static_dir: args.static_dir.clone(),
            index_page: args.index_page.clone(),
        }
    }
}
