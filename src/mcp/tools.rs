//! Tool schemas and invocation

use serde_json::{json, Value};

use crate::pipeline::{DocumentPipeline, FetchPayload, GeneratedDocument};

pub const FETCH_TOOL: &str = "fetch_latest_transcript";
pub const GENERATE_TOOL: &str = "generate_prd";

/// Text content of a tool result, and whether it describes a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

pub fn tools_schema() -> Value {
    json!({
        "tools": [
            {
                "name": FETCH_TOOL,
                "description": "Fetch the latest transcript from Fireflies. Replaces any transcript fetched earlier.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": GENERATE_TOOL,
                "description": "Generate a PRD from the latest fetched Fireflies transcript. Fetches one first if none has been fetched.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    })
}

/// Run a tool by name. Returns None for unknown tools.
///
/// Pipeline failures never escape; they come back as error payloads.
pub async fn call_tool(pipeline: &mut DocumentPipeline, name: &str) -> Option<ToolOutput> {
    match name {
        FETCH_TOOL => {
            let payload = FetchPayload::from(pipeline.fetch_and_cache().await);
            // Serializing a flat enum of strings cannot fail.
            let text = serde_json::to_string(&payload).unwrap_or_default();
            Some(ToolOutput {
                text,
                is_error: payload.is_error(),
            })
        }
        GENERATE_TOOL => {
            let document = GeneratedDocument::from(pipeline.generate().await);
            Some(ToolOutput {
                text: document.to_text(),
                is_error: document.is_error(),
            })
        }
        _ => None,
    }
}
