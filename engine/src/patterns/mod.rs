// Candlestick pattern recognition
pub mod bullish_engulfing;

pub use bullish_engulfing::{any_bullish_engulfing, is_bullish_engulfing};
