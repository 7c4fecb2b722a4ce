use serde::Serialize;

use crate::core::error::VaultError;
use crate::core::note::{Note, NoteSummary, Receipt};
use crate::search::{TagIndex, VaultInfo};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

/// Result of one tool call. Serialized without a tag, so clients see the
/// bare payload, or `{"error": "..."}` on failure.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Notes(Vec<NoteSummary>),
    Note(Note),
    Saved(Receipt),
    Folders(Vec<String>),
    Tags(TagIndex),
    Info(VaultInfo),
    Error(ErrorPayload),
}

impl ToolOutput {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(payload) => Some(&payload.error),
            _ => None,
        }
    }

    /// Pretty JSON, non-ASCII kept as is.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            serde_json::json!({ "error": format!("JSON serialization failed: {}", e) }).to_string()
        })
    }
}

impl From<VaultError> for ToolOutput {
    fn from(err: VaultError) -> Self {
        Self::Error(ErrorPayload {
            error: err.to_string(),
        })
    }
}
