// Engine library root
// Indicators, pattern detection and signal evaluation, plus the candle
// sources and HTTP surface that feed them.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod patterns;
pub mod services;
