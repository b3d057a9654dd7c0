mod cli;
mod config;

use std::sync::Arc;

use adapters::finnhub::FinnhubClient;
use adapters::fx::FrankfurterConverter;
use adapters::notify::{DesktopNotifier, LogNotifier};
use anyhow::Context;
use clap::Parser;
use common::logger::init_logger;
use corelib::NotificationSink;
use engine::{PollController, SystemClock};
use session::store::JsonFileStore;

use crate::cli::{Cli, NotifierCli};
use crate::config::AppConfig;

fn build_sink(cli: &Cli) -> Arc<dyn NotificationSink> {
    match cli.notifier {
        NotifierCli::Desktop => Arc::new(DesktopNotifier::new(cli.icon_dir.clone())),
        NotifierCli::Log => Arc::new(LogNotifier),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app = AppConfig::from_env()?;

    init_logger("findicate", cli.json_logs || app.is_production);

    let monitor = cli.monitor_config();

    let provider = FinnhubClient::new(
        app.finnhub_base_url.clone(),
        app.finnhub_api_key.clone(),
        monitor.fetch_timeout,
    )
    .context("failed to build finnhub client")?;

    let fx = FrankfurterConverter::new(
        app.fx_base_url.clone(),
        monitor.fetch_timeout,
        app.fx_cache_ttl,
    )?;

    let snapshot_dir = monitor.snapshot_dir.clone();
    let once = monitor.once;

    let mut controller = PollController::new(
        monitor,
        provider,
        build_sink(&cli),
        Arc::new(fx),
        Arc::new(SystemClock),
    );
    if let Some(dir) = snapshot_dir {
        controller = controller.with_snapshot_store(Arc::new(JsonFileStore::new(dir)));
    }

    tracing::info!(ticker = %controller.config().ticker, once, "starting findicate");

    if once {
        let value = controller.run_once().await?;
        match value {
            Some(v) => println!("{v:.2} {}", controller.config().display_currency),
            None => println!("no valuation available"),
        }
        return Ok(());
    }

    tokio::select! {
        res = controller.run() => {
            res.context("poll loop terminated")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
