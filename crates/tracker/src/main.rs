use std::time::Duration;

use chrono::Utc;

use homework_common::config::AppConfig;
use homework_notifier::TelegramNotifier;
use homework_tracker::api::PracticumClient;
use homework_tracker::poller::{StatusPoller, poll_window_start};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homework_tracker=info,homework_notifier=info".into()),
        )
        .json()
        .init();

    run().await
}

async fn run() -> anyhow::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(severity = "critical", error = %e, "Refusing to start");
            return Ok(());
        }
    };

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let source = PracticumClient::new(
        config.practicum_endpoint.clone(),
        config.practicum_token.clone(),
        timeout,
    )?;
    let notifier = TelegramNotifier::new(&config.telegram_api_url, &config.telegram_token, timeout)?;

    let mut poller = StatusPoller::new(
        source,
        notifier,
        config.telegram_chat_id.clone(),
        poll_window_start(Utc::now(), config.lookback_days)?,
        Duration::from_secs(config.retry_interval_secs),
    );

    tracing::info!(endpoint = %config.practicum_endpoint, "Homework tracker starting");

    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping...");
        }
    }

    tracing::info!("Homework tracker stopped.");
    Ok(())
}
