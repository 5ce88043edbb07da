use reqwest::StatusCode;
use thiserror::Error;

/// Shown when the API rejects a request without saying why.
pub const GENERIC_REQUEST_ERROR: &str = "Erro na requisição";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("{0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// Non-2xx response; `message` is the API's own `message` field when present.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Invalid API response: {0}")]
    Decode(String),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(reqwest_middleware::Error::Reqwest(err))
    }
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(reqwest_middleware::Error::Reqwest(err)) => err.status(),
            _ => None,
        }
    }
}
