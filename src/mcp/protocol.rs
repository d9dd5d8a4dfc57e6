//! JSON-RPC 2.0 message handling

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::mcp::tools::{call_tool, tools_schema};
use crate::pipeline::DocumentPipeline;

const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

/// Server state: the reported name plus the pipeline that owns the cache.
pub struct McpServer {
    name: String,
    pipeline: DocumentPipeline,
}

impl McpServer {
    pub fn new(name: String, pipeline: DocumentPipeline) -> Self {
        Self { name, pipeline }
    }
}

struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Response for a line that is not a JSON-RPC message at all.
pub(crate) fn parse_error(reason: &dyn std::fmt::Display) -> Value {
    warn!("Parse error: {}", reason);
    json!({
        "jsonrpc": "2.0",
        "id": null,
        "error": {"code": PARSE_ERROR, "message": format!("Parse error: {reason}")}
    })
}

/// Parse an incoming JSON-RPC message and produce a response (if any).
/// Notifications (no `id`) return None.
pub async fn dispatch(server: &mut McpServer, line: &str) -> Option<Value> {
    let msg: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return Some(parse_error(&e)),
    };

    let method = msg["method"].as_str().unwrap_or("").to_string();

    // Notifications must not be answered
    let Some(id) = msg.get("id").cloned() else {
        debug!("Notification: {}", method);
        return None;
    };

    let params = msg
        .get("params")
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));

    Some(match route(server, &method, &params).await {
        Ok(value) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": value,
        }),
        Err(e) => {
            error!("Error in {}: {}", method, e.message);
            json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": e.code, "message": e.message},
            })
        }
    })
}

async fn route(
    server: &mut McpServer,
    method: &str,
    params: &Value,
) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": server.name,
                "version": crate::VERSION
            },
            "instructions": "Call fetch_latest_transcript to pull the most recent Fireflies \
                transcript, then generate_prd to turn it into a product requirements document. \
                generate_prd fetches on its own if nothing has been fetched yet."
        })),

        "tools/list" => Ok(tools_schema()),

        "tools/call" => {
            let name = params["name"].as_str().unwrap_or("");
            let output = call_tool(&mut server.pipeline, name)
                .await
                .ok_or_else(|| RpcError::new(INVALID_PARAMS, format!("Unknown tool: {name}")))?;
            Ok(json!({
                "content": [{"type": "text", "text": output.text}],
                "isError": output.is_error,
            }))
        }

        "ping" => Ok(json!({})),

        _ => Err(RpcError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {method}"),
        )),
    }
}
