// Engine settings, loaded from an optional JSON file with environment overrides on top
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::EngineError;

pub const CONFIG_PATH_ENV: &str = "SIGNAL_ENGINE_CONFIG";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CandleSourceKind {
    GeckoTerminal,
    Csv,
}

impl FromStr for CandleSourceKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gecko_terminal" | "geckoterminal" => Ok(CandleSourceKind::GeckoTerminal),
            "csv" => Ok(CandleSourceKind::Csv),
            other => Err(EngineError::ConfigError(format!("Unknown candle source '{}'", other))),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Chain segment of the OHLCV upstream URL.
    pub network: String,
    pub api_base_url: String,
    /// Attempts per candle request while the upstream keeps rate limiting.
    pub max_attempts: u32,
    pub initial_retry_delay_ms: u64,
    /// Pause between the 1m, 5m and 15m requests of one analysis.
    pub inter_request_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub candle_source: CandleSourceKind,
    pub csv_dir: Option<PathBuf>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "0.0.0.0".to_string(),
            port: 8000,
            network: "solana".to_string(),
            api_base_url: "https://api.geckoterminal.com/api/v2".to_string(),
            max_attempts: 5,
            initial_retry_delay_ms: 10_000,
            inter_request_delay_ms: 1_000,
            request_timeout_secs: 30,
            candle_source: CandleSourceKind::GeckoTerminal,
            csv_dir: None,
        }
    }
}

fn parse_env<T: FromStr>(name: &str, raw: &str) -> Result<T, EngineError> {
    raw.trim()
        .parse()
        .map_err(|_| EngineError::ConfigError(format!("Invalid value '{}' for {}", raw, name)))
}

impl EngineSettings {
    /// Defaults, or the JSON file named by `SIGNAL_ENGINE_CONFIG`,
    /// then `SIGNAL_ENGINE_*` overrides.
    pub fn load() -> Result<Self, EngineError> {
        let mut settings = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        settings.apply_overrides(|name| std::env::var(name).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, EngineError> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            EngineError::ConfigError(format!("Invalid config file '{}': {}", path.display(), e))
        })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("SIGNAL_ENGINE_HOST") {
            self.host = v.trim().to_string();
        }
        if let Some(v) = var("SIGNAL_ENGINE_PORT") {
            self.port = parse_env("SIGNAL_ENGINE_PORT", &v)?;
        }
        if let Some(v) = var("SIGNAL_ENGINE_NETWORK") {
            self.network = v.trim().to_string();
        }
        if let Some(v) = var("SIGNAL_ENGINE_API_BASE_URL") {
            self.api_base_url = v.trim().to_string();
        }
        if let Some(v) = var("SIGNAL_ENGINE_MAX_ATTEMPTS") {
            self.max_attempts = parse_env("SIGNAL_ENGINE_MAX_ATTEMPTS", &v)?;
        }
        if let Some(v) = var("SIGNAL_ENGINE_RETRY_DELAY_MS") {
            self.initial_retry_delay_ms = parse_env("SIGNAL_ENGINE_RETRY_DELAY_MS", &v)?;
        }
        if let Some(v) = var("SIGNAL_ENGINE_INTER_REQUEST_DELAY_MS") {
            self.inter_request_delay_ms = parse_env("SIGNAL_ENGINE_INTER_REQUEST_DELAY_MS", &v)?;
        }
        if let Some(v) = var("SIGNAL_ENGINE_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_env("SIGNAL_ENGINE_REQUEST_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = var("SIGNAL_ENGINE_CANDLE_SOURCE") {
            self.candle_source = v.parse()?;
        }
        if let Some(v) = var("SIGNAL_ENGINE_CSV_DIR") {
            self.csv_dir = Some(PathBuf::from(v.trim()));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_attempts == 0 {
            return Err(EngineError::ConfigError("max_attempts must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(EngineError::ConfigError(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.network.trim().is_empty() {
            return Err(EngineError::ConfigError("network must not be empty".to_string()));
        }
        if self.candle_source == CandleSourceKind::Csv && self.csv_dir.is_none() {
            return Err(EngineError::ConfigError("csv candle source requires csv_dir".to_string()));
        }
        self.socket_addr().map(|_| ())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, EngineError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                EngineError::ConfigError(format!(
                    "Invalid listen address '{}:{}': {}",
                    self.host, self.port, e
                ))
            })
    }

    pub fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.inter_request_delay_ms)
    }
}
