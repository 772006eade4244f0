//! Logic block executors.
//!
//! The interpreter hands each logic block to the executor registered for its
//! type and follows the returned edge id. Only the flow-link block lives in
//! this crate; other block types plug in through [`LogicExecutor`].

pub mod executor;
pub mod flow_link;

pub use executor::{LogicExecutor, LogicExecutorRegistry, LogicResponse};
pub use flow_link::FlowLinkExecutor;
