use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::model::FlowSnapshot;
use crate::error::FlowError;

/// Answer collected by an input block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_file_urls: Option<Vec<String>>,
}

impl Answer {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            attached_file_urls: None,
        }
    }
}

/// One entry of the session call stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowInstance {
    #[serde(rename = "typebot")]
    pub flow: FlowSnapshot,
    /// Results record this instance writes to. Absent in preview mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,
    /// Return address followed in the instance beneath once this one ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_id_to_trigger_when_done: Option<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub is_merging_with_parent: bool,
}

impl FlowInstance {
    /// Root instance of a fresh session.
    pub fn root(flow: FlowSnapshot, result_id: Option<String>) -> Self {
        Self {
            flow,
            result_id,
            edge_id_to_trigger_when_done: None,
            answers: Vec::new(),
            is_merging_with_parent: false,
        }
    }

    pub fn is_preview(&self) -> bool {
        self.result_id.is_none()
    }
}

/// Per-session execution state.
///
/// `queue[0]` is the active flow. Fields this core does not interpret are
/// kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(rename = "typebotsQueue")]
    pub queue: Vec<FlowInstance>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionState {
    pub fn new(root: FlowInstance) -> Self {
        Self {
            queue: vec![root],
            extra: Map::new(),
        }
    }

    pub fn top(&self) -> Result<&FlowInstance, FlowError> {
        self.queue.first().ok_or(FlowError::EmptyQueue)
    }

    pub fn depth(&self) -> usize {
        self.queue.len()
    }

    pub fn is_preview(&self) -> bool {
        self.queue.first().map_or(true, FlowInstance::is_preview)
    }
}
