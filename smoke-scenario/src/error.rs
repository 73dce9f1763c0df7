use reqwest::StatusCode;
use thiserror::Error;

/// A failed task invocation. Recorded as a failed sample; never fatal to the
/// user's loop.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid host url: {0}")]
    InvalidHost(#[from] url::ParseError),
}
