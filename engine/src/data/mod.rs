// Candle sources feeding the analysis service
pub mod csv_parser;
pub mod csv_source;
pub mod gecko_terminal;

pub use csv_source::CsvCandleSource;
pub use gecko_terminal::GeckoTerminalClient;

use crate::error::EngineError;
use async_trait::async_trait;
use shared::models::{CandleSeries, TimeFrame};

/// Anything that can hand back an ordered OHLCV series for a pool.
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch_candles(
        &self,
        pool_id: &str,
        timeframe: TimeFrame,
    ) -> Result<CandleSeries, EngineError>;
}
