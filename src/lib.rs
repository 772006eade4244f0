//! # XChatflow: flow linking for a conversational flow engine
//!
//! `xchatflow` implements the call stack of a chatbot flow interpreter. A
//! session holds a queue of flow instances; the first instance is the one
//! being executed. A flow-link block pushes another flow (or a copy of the
//! current one) on top of the queue and hands the interpreter a portal
//! edge into it. When the pushed flow runs out of edges it is popped and
//! the caller resumes at the block after the link.
//!
//! - **Link execution**: [`FlowLinkExecutor`] registered in a
//!   [`LogicExecutorRegistry`] under the `"Typebot link"` block type.
//! - **Return**: [`get_next_group`] follows an edge, popping finished
//!   instances and merging their variables and answers into the caller.
//! - **Stores**: flow definitions come from a [`FlowRepository`], results
//!   are recorded through a [`ResultLedger`]. In-memory implementations of
//!   both are provided.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xchatflow::{
//!     FlowInstance, LogicExecutorRegistry, MemoryFlowRepository, MemoryResultLedger,
//!     RuntimeContext, SessionState,
//! };
//!
//! # async fn run(root: xchatflow::FlowSnapshot, block: xchatflow::Block) -> Result<(), xchatflow::FlowError> {
//! let context = RuntimeContext::new(
//!     Arc::new(MemoryFlowRepository::new()),
//!     Arc::new(MemoryResultLedger::new()),
//! );
//! let registry = LogicExecutorRegistry::with_link_executor();
//! let state = SessionState::new(FlowInstance::root(root, Some("result-1".into())));
//! let response = registry.execute(&state, &block, &context).await?;
//! println!("{:?}", response.outgoing_edge_id);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod dsl;
pub mod engine;
pub mod error;
pub mod graph;
pub mod infrastructure;
pub mod nodes;

pub use crate::core::{EngineConfig, FakeIdGenerator, IdGenerator, RealIdGenerator, RuntimeContext};
pub use domain::model::{
    Block, Edge, EdgeSource, EdgeTarget, FlowSnapshot, Group, LinkBlockOptions, SchemaVersion,
    Variable,
};
pub use domain::session::{Answer, ChatLog, FlowInstance, LogStatus, SessionState};
pub use dsl::{parse_flow_row, parse_flow_rows, DslFormat, FlowRow};
pub use engine::{get_next_group, NextGroup};
pub use error::{FlowError, StoreError};
pub use infrastructure::{
    FlowRepository, MemoryFlowRepository, MemoryResultLedger, ResultLedger, ResultRecord,
};
pub use nodes::{FlowLinkExecutor, LogicExecutor, LogicExecutorRegistry, LogicResponse};
