use serde::{Deserialize, Serialize};

use crate::dsl::parser::{parse_as, DslFormat};
use crate::error::FlowError;

/// Engine-wide settings handed to every logic executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Result merging for v6+ link blocks that leave `mergeResults` unset.
    pub default_merge_results: bool,
    /// Maximum number of flow instances on a session queue. `0` disables
    /// the limit.
    pub max_link_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_merge_results: false,
            max_link_depth: 0,
        }
    }
}

impl EngineConfig {
    pub fn parse(content: &str, format: DslFormat) -> Result<Self, FlowError> {
        parse_as(content, format).map_err(FlowError::Config)
    }

    /// Whether a queue of `depth` instances may take one more.
    pub fn allows_push(&self, depth: usize) -> bool {
        self.max_link_depth == 0 || depth < self.max_link_depth
    }
}
