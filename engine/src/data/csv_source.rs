// Offline replay: serves candle series from CSV files on disk.
use async_trait::async_trait;
use shared::models::{CandleSeries, TimeFrame};
use std::path::PathBuf;

use super::csv_parser::OhlcvCsvParser;
use super::CandleSource;
use crate::error::EngineError;

/// Reads `{dir}/{pool}_{1m|5m|15m|1h}.csv`.
#[derive(Debug, Clone)]
pub struct CsvCandleSource {
    dir: PathBuf,
}

impl CsvCandleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_for(&self, pool_id: &str, timeframe: TimeFrame) -> PathBuf {
        self.dir.join(format!("{}_{}.csv", pool_id, timeframe.label()))
    }
}

#[async_trait]
impl CandleSource for CsvCandleSource {
    async fn fetch_candles(
        &self,
        pool_id: &str,
        timeframe: TimeFrame,
    ) -> Result<CandleSeries, EngineError> {
        // pool ids become file names; keep them from walking out of the directory
        let safe = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
        if pool_id.is_empty() || !pool_id.chars().all(safe) {
            return Err(EngineError::NotFound("Pool address not found.".to_string()));
        }

        let path = self.file_for(pool_id, timeframe);
        if !path.is_file() {
            tracing::error!(
                pool = %pool_id,
                ?timeframe,
                path = %path.display(),
                "No CSV candle file for pool"
            );
            return Err(EngineError::NotFound("Pool address not found.".to_string()));
        }

        let load = move || OhlcvCsvParser::load_candles_from_csv(&path);
        let candles = tokio::task::spawn_blocking(load)
            .await
            .map_err(|e| EngineError::FetchError(format!("CSV loader task failed: {}", e)))??;

        let mut series = CandleSeries::from_candles(candles);
        let limit = timeframe.candle_limit();
        if series.len() > limit {
            // keep the most recent `limit` candles, like the live upstream
            let candles = series.into_inner();
            series = CandleSeries::from_candles(candles[candles.len() - limit..].to_vec());
        }
        tracing::debug!(
            pool = %pool_id,
            ?timeframe,
            count = series.len(),
            "Loaded candles from CSV"
        );
        Ok(series)
    }
}
