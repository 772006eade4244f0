//! Infrastructure layer: pluggable store implementations.
//!
//! The engine reaches flow definitions and analytics results only through
//! the [`FlowRepository`] and [`ResultLedger`] ports. In-memory
//! implementations back the tests and the demo binary.

pub mod flow_repository;
pub mod result_ledger;

pub use flow_repository::{FlowRepository, MemoryFlowRepository};
pub use result_ledger::{MemoryResultLedger, ResultLedger, ResultRecord};
