use thiserror::Error;

/// Errors raised by the flow repository or the result ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store not available: {0}")]
    NotAvailable(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl StoreError {
    /// Whether the caller's I/O retry policy may replay the failed turn.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::NotAvailable(_))
    }
}
