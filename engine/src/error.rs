use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("HTTP transport error: {source}")]
    HttpError {
        #[from]
        source: reqwest::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Only rate limiting is worth another attempt; a missing pool never appears later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::RateLimited)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EngineError::ValidationError(_) => StatusCode::BAD_REQUEST,
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            EngineError::FetchError(_)
            | EngineError::HttpError { .. }
            | EngineError::ConfigError(_)
            | EngineError::CsvSystemError { .. }
            | EngineError::IoError { .. }
            | EngineError::CsvDataFormatError(_)
            | EngineError::AnyhowError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Mapping EngineError to HTTP {}", status);
        } else {
            tracing::warn!(error = %self, "Mapping EngineError to HTTP {}", status);
        }
        let body = serde_json::json!({ "detail": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
