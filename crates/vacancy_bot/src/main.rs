//! Telegram front-end for the vacancy catalog browser.
mod config;
mod render;
mod session;
mod telegram;

use std::sync::Arc;

use bot_logging::LogDestination;
use vacancy_engine::{ClientSettings, HttpCatalogClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bot_logging::initialize(LogDestination::Both);

    let config = config::Config::from_env()?;
    let client = HttpCatalogClient::new(config.api_url.clone(), ClientSettings::default())?;

    telegram::run(config, Arc::new(client)).await
}
