//! Error types
//!
//! None of these ever reach the host page: mount failures are logged and the
//! runner simply stays dark.

use thiserror::Error;

/// Failure to attach the runner to the host page
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    CanvasNotFound(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("2d drawing context unavailable")]
    ContextUnavailable,
    #[error("failed to attach listener: {0}")]
    Listener(String),
}

/// Rejected tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON did not parse: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}
