use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::RuntimeContext;
use crate::domain::model::{Block, LINK_BLOCK_TYPE};
use crate::domain::session::{ChatLog, SessionState};
use crate::error::FlowResult;

/// Outcome of one logic step.
///
/// `new_session_state: None` means "state unchanged, just follow
/// `outgoing_edge_id`".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogicResponse {
    pub outgoing_edge_id: Option<String>,
    pub new_session_state: Option<SessionState>,
    pub logs: Vec<ChatLog>,
}

impl LogicResponse {
    /// Fall through to the block's own outgoing edge with one log entry.
    pub fn fall_through(block: &Block, log: ChatLog) -> Self {
        Self {
            outgoing_edge_id: block.outgoing_edge_id.clone(),
            new_session_state: None,
            logs: vec![log],
        }
    }
}

/// Trait for logic blocks. Each logic block type implements this.
#[async_trait]
pub trait LogicExecutor: Send + Sync {
    /// Execute `block` against the session, returning the continuation.
    async fn execute(
        &self,
        state: &SessionState,
        block: &Block,
        context: &RuntimeContext,
    ) -> FlowResult<LogicResponse>;
}

/// Registry of logic executors by block type string
pub struct LogicExecutorRegistry {
    executors: HashMap<String, Arc<dyn LogicExecutor>>,
}

impl LogicExecutorRegistry {
    pub fn new() -> Self {
        LogicExecutorRegistry {
            executors: HashMap::new(),
        }
    }

    /// Registry with the flow-link executor registered.
    pub fn with_link_executor() -> Self {
        let mut registry = Self::new();
        registry.register(LINK_BLOCK_TYPE, Arc::new(super::flow_link::FlowLinkExecutor));
        registry
    }

    pub fn register(&mut self, block_type: &str, executor: Arc<dyn LogicExecutor>) {
        self.executors.insert(block_type.to_string(), executor);
    }

    pub fn get(&self, block_type: &str) -> Option<Arc<dyn LogicExecutor>> {
        self.executors.get(block_type).cloned()
    }

    /// Dispatch `block` to the executor registered for its type. Blocks of
    /// unknown types fall through to their own outgoing edge.
    pub async fn execute(
        &self,
        state: &SessionState,
        block: &Block,
        context: &RuntimeContext,
    ) -> FlowResult<LogicResponse> {
        match self.get(&block.block_type) {
            Some(executor) => executor.execute(state, block, context).await,
            None => Ok(LogicResponse {
                outgoing_edge_id: block.outgoing_edge_id.clone(),
                ..Default::default()
            }),
        }
    }
}

impl Default for LogicExecutorRegistry {
    fn default() -> Self {
        Self::with_link_executor()
    }
}
