// HTTP surface of the engine
pub mod signal_service;

pub use signal_service::{router, SignalService};
