// engine/src/services/signal_service/mod.rs
// SignalService ties a candle source to the analysis service; the axum
// router and its handlers live in the sibling modules.

use crate::analysis::AnalysisService;
use crate::data::CandleSource;
use crate::error::EngineError;
use shared::models::{SignalResult, TimeFrame};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

pub mod check_ohlcv;
pub mod health;
pub mod routes;

pub use routes::router;

pub struct SignalService {
    source: Arc<dyn CandleSource>,
    analysis: AnalysisService,
    inter_request_delay: Duration,
}

impl SignalService {
    pub fn new(source: Arc<dyn CandleSource>, inter_request_delay: Duration) -> Self {
        SignalService {
            source,
            analysis: AnalysisService::new(),
            inter_request_delay,
        }
    }

    /// Fetches 1m, 5m and 15m candles in that order, then evaluates the flags.
    pub async fn check_pool(&self, pair_address: &str) -> Result<SignalResult, EngineError> {
        let pool_id = pair_address.trim();
        if pool_id.is_empty() {
            return Err(EngineError::ValidationError("pairAddress is required".to_string()));
        }

        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("check_pool", %request_id, pool = %pool_id);
        async move {
            tracing::info!("Received pool analysis request");

            let m1 = self.source.fetch_candles(pool_id, TimeFrame::Minute1).await?;
            self.pause().await;
            let m5 = self.source.fetch_candles(pool_id, TimeFrame::Minute5).await?;
            self.pause().await;
            let m15 = self.source.fetch_candles(pool_id, TimeFrame::Minute15).await?;

            tracing::debug!(
                candles_1m = m1.len(),
                candles_5m = m5.len(),
                candles_15m = m15.len(),
                "Fetched candles"
            );
            self.analysis.analyze(pool_id, &m1, &m5, &m15)
        }
        .instrument(span)
        .await
    }

    async fn pause(&self) {
        if !self.inter_request_delay.is_zero() {
            tokio::time::sleep(self.inter_request_delay).await;
        }
    }
}
