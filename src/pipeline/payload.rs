//! Tool-facing result payloads

use serde::Serialize;
use serde_json::json;

use crate::transcripts::TranscriptRecord;
use crate::{PrdError, Result};

/// Result of `fetch_latest_transcript`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FetchPayload {
    Success {
        id: String,
        date: String,
        text: String,
    },
    Error {
        message: String,
    },
}

impl FetchPayload {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl From<Result<&TranscriptRecord>> for FetchPayload {
    fn from(result: Result<&TranscriptRecord>) -> Self {
        match result {
            Ok(record) => Self::Success {
                id: record.id().to_string(),
                date: record.date().to_string(),
                text: record.text().to_string(),
            },
            Err(e) => Self::Error {
                message: format!("Failed to fetch transcript from Fireflies: {e}"),
            },
        }
    }
}

/// Result of `generate_prd`: the model's raw text, or an error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedDocument {
    Document(String),
    Failed { error: String },
}

impl GeneratedDocument {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Text handed back to the caller. Documents go out untouched; failures
    /// are rendered as `{"error": ...}`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Document(text) => text.clone(),
            Self::Failed { error } => json!({ "error": error }).to_string(),
        }
    }
}

impl From<Result<String>> for GeneratedDocument {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => Self::Document(text),
            Err(e @ PrdError::NoCachedInput(_)) => Self::Failed {
                error: e.to_string(),
            },
            Err(e) => Self::Failed {
                error: format!("Failed to generate PRD: {e}"),
            },
        }
    }
}
