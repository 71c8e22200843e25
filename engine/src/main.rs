// Engine main entry point
use anyhow::Context;
use signal_engine::config::{CandleSourceKind, EngineSettings};
use signal_engine::data::{CandleSource, CsvCandleSource, GeckoTerminalClient};
use signal_engine::error::EngineError;
use signal_engine::services::{router, SignalService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn build_source(settings: &EngineSettings) -> Result<Arc<dyn CandleSource>, EngineError> {
    match settings.candle_source {
        CandleSourceKind::GeckoTerminal => Ok(Arc::new(GeckoTerminalClient::new(settings)?)),
        CandleSourceKind::Csv => {
            let dir = settings.csv_dir.clone().ok_or_else(|| {
                EngineError::ConfigError("csv candle source requires csv_dir".to_string())
            })?;
            Ok(Arc::new(CsvCandleSource::new(dir)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting signal engine...");

    let settings = EngineSettings::load().context("Failed to load engine settings")?;
    let addr = settings.socket_addr()?;
    info!(
        source = ?settings.candle_source,
        network = %settings.network,
        max_attempts = settings.max_attempts,
        "Engine will listen on {}",
        addr
    );

    let source = build_source(&settings)?;
    let service = Arc::new(SignalService::new(source, settings.inter_request_delay()));
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Signal engine stopped");
    Ok(())
}
