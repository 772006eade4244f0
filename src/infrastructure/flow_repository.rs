use async_trait::async_trait;
use std::collections::HashMap;

use crate::dsl::FlowRow;
use crate::error::StoreResult;

/// Lookup service for stored flow definitions.
///
/// `Ok(None)` means the flow does not exist; `Err` is an I/O fault.
#[async_trait]
pub trait FlowRepository: Send + Sync {
    /// Editable definition of the flow, used in preview sessions.
    async fn get_draft(&self, flow_id: &str) -> StoreResult<Option<FlowRow>>;
    /// Published snapshot of the flow, used in live sessions.
    async fn get_published(&self, flow_id: &str) -> StoreResult<Option<FlowRow>>;
}

#[derive(Default)]
pub struct MemoryFlowRepository {
    drafts: tokio::sync::RwLock<HashMap<String, FlowRow>>,
    published: tokio::sync::RwLock<HashMap<String, FlowRow>>,
}

impl MemoryFlowRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_draft(&self, row: FlowRow) {
        self.drafts.write().await.insert(row.id.clone(), row);
    }

    /// Store `row` as the published snapshot of `flow_id`. The row keeps
    /// its own (publication) id.
    pub async fn publish(&self, flow_id: &str, row: FlowRow) {
        self.published.write().await.insert(flow_id.to_string(), row);
    }
}

#[async_trait]
impl FlowRepository for MemoryFlowRepository {
    async fn get_draft(&self, flow_id: &str) -> StoreResult<Option<FlowRow>> {
        Ok(self.drafts.read().await.get(flow_id).cloned())
    }

    async fn get_published(&self, flow_id: &str) -> StoreResult<Option<FlowRow>> {
        Ok(self.published.read().await.get(flow_id).cloned())
    }
}
