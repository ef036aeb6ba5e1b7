use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use herald::api::NotificationApi;
use herald::app::console::Console;
use herald::config::ConsoleConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they do not interleave with the rendered console.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ConsoleConfig::from_env()?;
    let api = NotificationApi::new(
        &config.api_base_url,
        Duration::from_secs(config.http_timeout_seconds),
    )?;

    let mut console = Console::new(api);
    console.refresh().await;

    herald::ui::run(&mut console).await
}
