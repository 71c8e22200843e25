// Technical indicators computed over one candle series
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::Ema;
pub use macd::{Macd, MacdSeries};
pub use rsi::Rsi;

use serde_json::Value;
use shared::models::Candle;

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    // index-aligned with `data`, None during warm-up
    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>>;
}

/// `a > b`, false when either side is undefined.
pub fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

/// `a < b`, false when either side is undefined.
pub fn lt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}
