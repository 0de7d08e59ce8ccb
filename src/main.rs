mod api_client;
mod config;
mod error;
mod homework;
mod logging;
mod notifier;
mod poller;

use anyhow::Result;
use api_client::ApiClient;
use config::Config;
use notifier::TelegramNotifier;
use poller::Poller;
use teloxide::prelude::*;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Before logging: RUST_LOG and BOT_LOG_FILE may come from .env
    dotenvy::dotenv().ok();
    logging::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(fatal = true, "{}", e);
            return Err(e.into());
        }
    };
    info!("All required environment variables are set");

    info!("Starting homework status bot...");
    info!("Status endpoint: {}", config.endpoint);

    let bot = Bot::new(&config.telegram_token);
    let source = ApiClient::new(config.endpoint.clone(), config.practicum_token.clone());
    let notifier = TelegramNotifier::new(bot, config.chat.clone());

    let cursor = chrono::Utc::now().timestamp();
    Poller::new(source, notifier, cursor, config.retry_period)
        .run()
        .await;

    Ok(())
}
