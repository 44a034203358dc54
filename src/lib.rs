pub mod cli;
pub mod config;
pub mod history;
pub mod llm;
pub mod models;
pub mod relay;
pub mod server;

use cli::Args;
use config::AppConfig;
use config::prompt::load_prompts;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.listen_addr());
    info!("Chat Model: {}", args.chat_model);
    info!("Chat Base URL: {}", args.chat_base_url);
    info!("Static Dir: {}", args.static_dir);
    info!("Index Page: {}", args.index_page);
    info!("Prompts Path: {}", args.prompts_path);
    info!(
        "API Key Present: {}",
        args.gemini_api_key.as_deref().map_or(false, |k| !k.is_empty())
    );
    info!("-------------------------");

    let config = AppConfig::from_args(&args);
    let prompts = load_prompts(&args.prompts_path)?;
    let addr = args.listen_addr();
    let server = Server::new(addr, config, prompts);
    server.run().await?;

    Ok(())
}
