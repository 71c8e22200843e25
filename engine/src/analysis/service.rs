// Turns three pre-fetched candle series into one SignalResult.
use super::frame::IndicatorFrame;
use super::signals::evaluate_signals;
use crate::error::EngineError;
use shared::models::{CandleSeries, SignalResult};
use shared::utils::{count_raised, yes_no};

pub const MIN_CANDLES_1M: usize = 10;
pub const MIN_CANDLES_5M: usize = 3;

pub const INSUFFICIENT_DATA: &str = "Insufficient data for analysis";

/// Stateless: every call derives its frames from the given series and discards them.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisService;

impl AnalysisService {
    pub fn new() -> Self {
        AnalysisService
    }

    pub fn analyze(
        &self,
        pool_id: &str,
        m1: &CandleSeries,
        m5: &CandleSeries,
        m15: &CandleSeries,
    ) -> Result<SignalResult, EngineError> {
        if m1.len() < MIN_CANDLES_1M || m5.len() < MIN_CANDLES_5M {
            tracing::warn!(
                pool = %pool_id,
                candles_1m = m1.len(),
                candles_5m = m5.len(),
                "Rejecting analysis: not enough candle history"
            );
            return Err(EngineError::ValidationError(INSUFFICIENT_DATA.to_string()));
        }

        let frame_1m = IndicatorFrame::compute(m1);
        let frame_5m = IndicatorFrame::compute(m5);
        let frame_15m = IndicatorFrame::compute(m15);

        let result = evaluate_signals(&frame_1m, &frame_5m, &frame_15m);

        let described = result.described();
        for (label, raised) in described {
            tracing::info!(pool = %pool_id, "{}: {}", label, yes_no(raised));
        }
        tracing::debug!(
            pool = %pool_id,
            latest_1m = ?m1.latest().and_then(|c| c.datetime()),
            candles_15m = m15.len(),
            raised = count_raised(&described),
            "Analysis complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Candle;

    fn series(closes: impl IntoIterator<Item = f64>) -> CandleSeries {
        CandleSeries::from_candles(
            closes
                .into_iter()
                .enumerate()
                .map(|(i, close)| Candle {
                    timestamp: 1_700_000_000 + i as i64 * 60,
                    open: close * 0.999,
                    high: close * 1.001,
                    low: close * 0.998,
                    close,
                    volume: 1000.0,
                })
                .collect(),
        )
    }

    fn wave(n: usize, phase: f64) -> CandleSeries {
        series((0..n).map(|i| 1.0 + 0.05 * ((i as f64) * 0.37 + phase).sin() + 0.001 * i as f64))
    }

    #[test]
    fn test_rejects_short_1m_series() {
        let result =
            AnalysisService::new().analyze("pool", &wave(5, 0.0), &wave(100, 1.0), &wave(50, 2.0));
        match result {
            Err(EngineError::ValidationError(msg)) => assert_eq!(msg, INSUFFICIENT_DATA),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_short_5m_series() {
        let result =
            AnalysisService::new().analyze("pool", &wave(100, 0.0), &wave(2, 1.0), &wave(50, 2.0));
        assert!(matches!(result, Err(EngineError::ValidationError(_))));
    }

    #[test]
    fn test_accepts_minimum_lengths_and_empty_15m() {
        let empty = CandleSeries::default();
        let result = AnalysisService::new()
            .analyze("pool", &wave(10, 0.0), &wave(3, 1.0), &empty)
            .unwrap();
        assert!(!result.macd_cross_15m);
        // RSI needs 15 candles, so it cannot be raised on 10
        assert!(!result.rsi_1m_condition);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let (m1, m5, m15) = (wave(100, 0.0), wave(100, 1.3), wave(50, 2.1));
        let service = AnalysisService::new();
        let first = service.analyze("pool", &m1, &m5, &m15).unwrap();
        let second = service.analyze("pool", &m1, &m5, &m15).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rising_series_sets_only_ema_alignment() {
        let m1 = series((0..100).map(|i| 2.0 + i as f64 * 0.01));
        let m5 = series((0..100).map(|i| 2.0 + i as f64 * 0.05));
        let m15 = series((0..50).map(|i| 2.0 + i as f64 * 0.15));
        let result = AnalysisService::new().analyze("pool", &m1, &m5, &m15).unwrap();
        assert_eq!(
            result,
            SignalResult {
                ema_20_above_ema_50_1m: true,
                ema_20_above_ema_50_5m: true,
                ..SignalResult::default()
            }
        );
    }
}
