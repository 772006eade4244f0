use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::model::{FlowSnapshot, Variable};
use crate::error::StoreResult;

/// Analytics results record of one session (or one forked sub-flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: String,
    pub flow_id: String,
    pub has_started: bool,
    pub is_completed: bool,
    pub variables: Vec<Variable>,
}

impl ResultRecord {
    pub fn new(result_id: &str, flow: &FlowSnapshot, has_started: bool, is_completed: bool) -> Self {
        Self {
            id: result_id.to_string(),
            flow_id: flow.id.clone(),
            has_started,
            is_completed,
            variables: flow
                .variables
                .iter()
                .filter(|v| v.has_value())
                .cloned()
                .collect(),
        }
    }
}

#[async_trait]
pub trait ResultLedger: Send + Sync {
    /// Create the record if it does not exist. Existing records are left
    /// untouched.
    async fn ensure_result(
        &self,
        result_id: &str,
        flow: &FlowSnapshot,
        has_started: bool,
        is_completed: bool,
    ) -> StoreResult<()>;

    /// Create the record, or overwrite its status and variables.
    async fn upsert_result(
        &self,
        result_id: &str,
        flow: &FlowSnapshot,
        has_started: bool,
        is_completed: bool,
    ) -> StoreResult<()>;
}

#[derive(Default)]
pub struct MemoryResultLedger {
    data: tokio::sync::RwLock<HashMap<String, ResultRecord>>,
}

impl MemoryResultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, result_id: &str) -> Option<ResultRecord> {
        self.data.read().await.get(result_id).cloned()
    }

    /// All records, ordered by result id.
    pub async fn records(&self) -> Vec<ResultRecord> {
        let mut records: Vec<_> = self.data.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[async_trait]
impl ResultLedger for MemoryResultLedger {
    async fn ensure_result(
        &self,
        result_id: &str,
        flow: &FlowSnapshot,
        has_started: bool,
        is_completed: bool,
    ) -> StoreResult<()> {
        self.data
            .write()
            .await
            .entry(result_id.to_string())
            .or_insert_with(|| ResultRecord::new(result_id, flow, has_started, is_completed));
        Ok(())
    }

    async fn upsert_result(
        &self,
        result_id: &str,
        flow: &FlowSnapshot,
        has_started: bool,
        is_completed: bool,
    ) -> StoreResult<()> {
        self.data.write().await.insert(
            result_id.to_string(),
            ResultRecord::new(result_id, flow, has_started, is_completed),
        );
        Ok(())
    }
}
