//! MCP (Model Context Protocol) server over stdio JSON-RPC.
//!
//! Exposes `fetch_latest_transcript` and `generate_prd` as tools. Requests are
//! handled strictly one at a time; stdout carries only JSON-RPC messages and
//! all logs go to stderr.

mod protocol;
mod tools;

pub use protocol::{dispatch, McpServer};
pub use tools::{call_tool, tools_schema, ToolOutput, FETCH_TOOL, GENERATE_TOOL};

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::info;

use crate::config::Settings;
use crate::mcp::protocol::parse_error;
use crate::pipeline::DocumentPipeline;

/// Run the server on the process's stdin/stdout until stdin closes.
pub async fn run(settings: &Settings) -> Result<()> {
    let pipeline = DocumentPipeline::from_settings(settings)?;
    let mut server = McpServer::new(settings.server.name.clone(), pipeline);

    info!("Starting {} server on stdio", settings.server.name);
    serve(
        &mut server,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;
    info!("Stdin closed. Shutting down.");

    Ok(())
}

/// Read newline-delimited requests and write one response line per request.
///
/// Lines that are not valid UTF-8 get a parse error like any other malformed
/// message. Only I/O errors on the streams end the loop early.
pub async fn serve<R, W>(server: &mut McpServer, mut reader: R, writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut out = tokio::io::BufWriter::new(writer);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                dispatch(server, line).await
            }
            Err(e) => Some(parse_error(&e)),
        };

        if let Some(response) = response {
            let bytes = serde_json::to_vec(&response)?;
            out.write_all(&bytes).await?;
            out.write_all(b"\n").await?;
            out.flush().await?;
        }
    }

    Ok(())
}
