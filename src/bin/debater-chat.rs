//! Terminal debate client
//!
//! Keeps the transcript, sends each argument with its history to the proxy,
//! and shows the replies as they arrive.

use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use debater::config::ChatClientConfig;
use debater::session::{DebateClient, DebateSession, HttpDebateClient};
use debater::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ChatClientConfig::from_env()?;

    // The terminal belongs to the UI, so logs go to a file
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    let client: Arc<dyn DebateClient> = Arc::new(HttpDebateClient::new(config.proxy.url.clone()));
    let mut session = DebateSession::new();

    tracing::info!("Debating through {}", config.proxy.url);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = tui::run(&mut terminal, &mut session, client, &config.proxy.url).await;
    tui::restore()?;

    result
}
