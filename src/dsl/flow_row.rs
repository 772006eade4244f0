//! Stored flow rows and their conversion into session snapshots.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::model::{FlowSettings, FlowSnapshot};
use crate::error::FlowError;

/// A flow definition as returned by the repository, before validation.
///
/// Graph fields are kept as raw JSON so that a malformed definition is
/// reported against the flow it belongs to instead of failing the lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRow {
    pub id: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub groups: Value,
    #[serde(default)]
    pub edges: Value,
    #[serde(default)]
    pub variables: Value,
    #[serde(default)]
    pub events: Value,
    #[serde(default)]
    pub settings: Value,
}

impl FlowRow {
    /// Validate the row into a [`FlowSnapshot`].
    ///
    /// `id_override` replaces the row id; published rows carry their own
    /// publication id, but sessions always refer to the flow id.
    pub fn into_snapshot(self, id_override: Option<&str>) -> Result<FlowSnapshot, FlowError> {
        let id = id_override.map(str::to_string).unwrap_or(self.id);
        let invalid = |field: &str, e: serde_json::Error| FlowError::InvalidFlow {
            flow_id: id.clone(),
            reason: format!("{}: {}", field, e),
        };

        let groups = from_field(self.groups).map_err(|e| invalid("groups", e))?;
        let edges = from_field(self.edges).map_err(|e| invalid("edges", e))?;
        let variables = from_field(self.variables).map_err(|e| invalid("variables", e))?;
        let events = from_field(self.events).map_err(|e| invalid("events", e))?;
        let settings: FlowSettings = match self.settings {
            Value::Null => FlowSettings::default(),
            value => serde_json::from_value(value).map_err(|e| invalid("settings", e))?,
        };
        let system_messages = settings
            .general
            .as_ref()
            .and_then(|g| g.system_messages.clone());

        Ok(FlowSnapshot {
            id,
            version: self.version,
            groups,
            edges,
            events,
            variables,
            settings,
            system_messages,
        })
    }
}

/// Null (a missing column) deserializes as an empty list.
fn from_field<T: serde::de::DeserializeOwned>(value: Value) -> Result<Vec<T>, serde_json::Error> {
    match value {
        Value::Null => Ok(Vec::new()),
        value => serde_json::from_value(value),
    }
}
