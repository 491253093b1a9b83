// src/error.rs
use thiserror::Error;

/// Failures the capture flows can produce. Parse and validation failures are
/// meant to be shown inline as-is; the rest carry a reason for the log.
#[derive(Error, Debug)]
pub enum BlinkoError {
    #[error("could not parse the API snippet, please check the input")]
    ParseFailure,
    #[error("instance address or token is wrong, please check")]
    ValidationFailure,
    #[error("failed to save note: {0}")]
    SubmissionFailure(String),
    #[error("blinko is not configured yet")]
    NotConfigured,
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage contains invalid JSON: {0}; fix or delete the store file")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BlinkoError>;
