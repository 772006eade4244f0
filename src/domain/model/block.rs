use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Block type tag of the implicit entry block in pre-v6 flows.
pub const START_BLOCK_TYPE: &str = "start";

/// Block type tag of the flow-link logic block.
pub const LINK_BLOCK_TYPE: &str = "Typebot link";

/// Link target meaning "the flow currently on top of the session queue".
pub const CURRENT_FLOW_ID: &str = "current";

/// A single instruction within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outgoing_edge_id: Option<String>,
    /// Type-specific options, parsed on demand by the executor for the
    /// block type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl Block {
    pub fn is_start(&self) -> bool {
        self.block_type == START_BLOCK_TYPE
    }

    /// Parse the options as link options. Absent options parse as the
    /// all-default value.
    pub fn link_options(&self) -> Result<LinkBlockOptions, serde_json::Error> {
        match &self.options {
            None | Some(Value::Null) => Ok(LinkBlockOptions::default()),
            Some(value) => serde_json::from_value(value.clone()),
        }
    }
}

/// Options of a flow-link block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkBlockOptions {
    /// Target flow id, or [`CURRENT_FLOW_ID`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typebot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_results: Option<bool>,
}

impl LinkBlockOptions {
    /// Target flow id, with an empty string treated as unset.
    pub fn target_flow_id(&self) -> Option<&str> {
        self.typebot_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn target_group_id(&self) -> Option<&str> {
        self.group_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn targets_current_flow(&self, top_flow_id: &str) -> bool {
        matches!(self.target_flow_id(), Some(id) if id == CURRENT_FLOW_ID || id == top_flow_id)
    }
}
