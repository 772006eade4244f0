//! Parser for flow definitions and engine configuration files.

use serde::de::DeserializeOwned;

use super::flow_row::FlowRow;
use crate::error::FlowError;

/// Supported input formats.
#[derive(Debug, Clone, Copy)]
pub enum DslFormat {
    /// YAML format (`.yaml` / `.yml`).
    Yaml,
    /// JSON format (`.json`).
    Json,
}

impl DslFormat {
    /// Guess the format from a file extension. Unknown extensions are JSON.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => DslFormat::Yaml,
            _ => DslFormat::Json,
        }
    }
}

pub(crate) fn parse_as<T: DeserializeOwned>(content: &str, format: DslFormat) -> Result<T, String> {
    match format {
        DslFormat::Yaml => serde_saphyr::from_str(content).map_err(|e| e.to_string()),
        DslFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Parse a stored flow definition.
pub fn parse_flow_row(content: &str, format: DslFormat) -> Result<FlowRow, FlowError> {
    parse_as(content, format).map_err(|reason| FlowError::InvalidFlow {
        flow_id: "<unparsed>".to_string(),
        reason,
    })
}

/// Parse a list of stored flow definitions.
pub fn parse_flow_rows(content: &str, format: DslFormat) -> Result<Vec<FlowRow>, FlowError> {
    parse_as(content, format).map_err(|reason| FlowError::InvalidFlow {
        flow_id: "<unparsed>".to_string(),
        reason,
    })
}
