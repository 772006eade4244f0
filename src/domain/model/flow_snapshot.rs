use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::block::Block;
use super::version::SchemaVersion;

/// Immutable graph definition of one flow as loaded into a session.
///
/// Snapshots are values: every modification (`with_edge`, `with_variables`)
/// returns a new snapshot and leaves the original untouched, so instances
/// in a session queue never alias each other's edge lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    pub id: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub events: Vec<EntryEvent>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub settings: FlowSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_messages: Option<SystemMessages>,
}

impl FlowSnapshot {
    pub fn schema_version(&self) -> SchemaVersion {
        SchemaVersion::parse(self.version.as_deref())
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    /// The group whose block list contains `block_id`.
    pub fn group_containing(&self, block_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.position_of(block_id).is_some())
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn with_edge(&self, edge: Edge) -> Self {
        let mut next = self.clone();
        next.edges.push(edge);
        next
    }

    pub fn with_variables(&self, variables: Vec<Variable>) -> Self {
        Self {
            variables,
            ..self.clone()
        }
    }
}

/// A node of the flow graph: an ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Group {
    pub fn position_of(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    /// The block immediately after `block_id` in this group, if any.
    pub fn block_after(&self, block_id: &str) -> Option<&Block> {
        self.position_of(block_id)
            .and_then(|idx| self.blocks.get(idx + 1))
    }

    pub fn has_start_block(&self) -> bool {
        self.blocks.iter().any(Block::is_start)
    }

    /// Copy of this group keeping only the blocks from `block_id` onward.
    /// An unknown `block_id` keeps the whole group.
    pub fn sliced_from(&self, block_id: Option<&str>) -> Self {
        let start = block_id
            .and_then(|id| self.position_of(id))
            .unwrap_or(0);
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            blocks: self.blocks[start..].to_vec(),
        }
    }
}

/// Directed connection between a source (block, item or event) and a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    #[serde(default)]
    pub from: EdgeSource,
    pub to: EdgeTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl EdgeSource {
    /// Origin of edges synthesized at runtime. Nothing resolves these edges
    /// from their source side; they are only followed by id.
    pub fn unset() -> Self {
        Self {
            block_id: Some(String::new()),
            ..Default::default()
        }
    }

    pub fn is_unset(&self) -> bool {
        self.block_id.as_deref().map_or(true, str::is_empty)
            && self.item_id.is_none()
            && self.path_id.is_none()
            && self.event_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeTarget {
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

impl EdgeTarget {
    pub fn group(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            block_id: None,
        }
    }

    pub fn block(group_id: impl Into<String>, block_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            block_id: Some(block_id.into()),
        }
    }
}

/// Declared entry point of a v6+ flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEvent {
    pub id: String,
    #[serde(rename = "type", default = "default_event_type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outgoing_edge_id: Option<String>,
}

fn default_event_type() -> String {
    "start".to_string()
}

/// Flow variable. Names are unique within one flow's declaration list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Variable {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
        }
    }

    pub fn has_value(&self) -> bool {
        !matches!(self.value, None | Some(Value::Null))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralSettings>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_messages: Option<SystemMessages>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Operator-customized messages shown by the chat client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMessages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_closed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_error_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_error_message: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
