use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Error,
    Success,
    Info,
}

/// Log entry handed back to the chat client alongside a logic step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLog {
    pub status: LogStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ChatLog {
    pub fn error(description: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: LogStatus::Error,
            description: description.into(),
            details: Some(details.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == LogStatus::Error
    }
}
