use std::sync::Arc;

use anyhow::Context;
use tracing::warn;

use calmscan::{
    binance::{BinanceClient, catalog::SymbolCatalog},
    config::AppConfig,
    error::AppError,
    logger::init_tracing,
    market::monitor::{Monitor, run_monitor_loop},
};

/// Load the symbol catalog once. A failed fetch degrades display names
/// only; a loaded catalog that resolves none of the configured pairs is
/// fatal, since there would be nothing meaningful to monitor.
async fn load_catalog(client: &BinanceClient, cfg: &AppConfig) -> anyhow::Result<SymbolCatalog> {
    match SymbolCatalog::load(client).await {
        Ok(catalog) => {
            if !cfg.pairs.iter().any(|p| catalog.resolves(p)) {
                return Err(AppError::NoResolvablePairs.into());
            }
            Ok(catalog)
        }
        Err(e) => {
            warn!(error = %e, "symbol catalog unavailable; display names degraded");
            Ok(SymbolCatalog::empty())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";
    init_tracing(is_production);

    tracing::info!("Starting calmscan...");

    let cfg = AppConfig::from_env();
    anyhow::ensure!(!cfg.pairs.is_empty(), "no pairs configured");

    let client = BinanceClient::new(cfg.api_url.clone())
        .map_err(|e| AppError::ClientInit(e.to_string()))
        .context("build market-data client")?;

    let catalog = Arc::new(load_catalog(&client, &cfg).await?);

    let monitor = Arc::new(Monitor::new(Arc::new(client), catalog, &cfg));

    let pairs = cfg.pairs.clone();
    let every = cfg.refresh_interval();
    tokio::spawn(run_monitor_loop(monitor, pairs, every));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    Ok(())
}
