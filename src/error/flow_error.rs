//! Turn-level error types.

use super::StoreError;
use thiserror::Error;

/// Faults that abort the enclosing session turn.
///
/// Recoverable link failures (missing target, unknown flow, unknown group)
/// are reported as [`ChatLog`](crate::domain::session::ChatLog) entries and
/// never surface here.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Invalid flow '{flow_id}': {reason}")]
    InvalidFlow { flow_id: String, reason: String },
    #[error("Session queue is empty")]
    EmptyQueue,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FlowError {
    pub fn is_retryable(&self) -> bool {
        match self {
            FlowError::Store(e) => e.is_retryable(),
            _ => false,
        }
    }
}
