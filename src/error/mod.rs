//! Error types for the flow engine.
//!
//! - [`StoreError`]: Errors raised by the flow repository and result ledger.
//! - [`FlowError`]: Faults that abort a session turn.

pub mod flow_error;
pub mod store_error;

pub use flow_error::FlowError;
pub use store_error::StoreError;

/// Convenience alias for turn-level results.
pub type FlowResult<T> = Result<T, FlowError>;
/// Convenience alias for store-level results.
pub type StoreResult<T> = Result<T, StoreError>;
