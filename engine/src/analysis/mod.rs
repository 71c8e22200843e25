// Multi-timeframe signal analysis: indicator frames, flag evaluation and the
// request-level service tying them together.
pub mod frame;
pub mod service;
pub mod signals;

pub use frame::IndicatorFrame;
pub use service::AnalysisService;
pub use signals::evaluate_signals;
