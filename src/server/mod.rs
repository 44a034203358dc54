pub mod api;

use std::error::Error;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::config::prompt::PromptConfig;

pub struct Server {
    addr: String,
    config: AppConfig,
    prompts: Arc<PromptConfig>,
}

impl Server {
    pub fn new(addr: String, config: AppConfig, prompts: Arc<PromptConfig>) -> Self {
        Self {
            addr,
            config,
            prompts,
        }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(&self.addr, self.config.clone(), self.prompts.clone()).await
    }
}
