//! MCP Server — stdio transport, JSON-RPC 2.0, newline-delimited.
//!
//! Exposes the scorers and the best-match selector as MCP tools over
//! stdin/stdout. Reads JSON-RPC requests from stdin (one per line),
//! dispatches to the tool router, and writes responses to stdout.
//!
//! Protocol flow:
//! 1. Client sends `initialize` → server responds with capabilities
//! 2. Client sends `notifications/initialized`
//! 3. Client sends `tools/list` → server returns tool definitions
//! 4. Client sends `tools/call` → server scores and returns result
//! 5. Client closes stdin → server exits

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Maximum size of a single JSON-RPC line (10 MiB). Large candidate lists
/// fit comfortably; anything bigger is rejected before parsing.
const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

use crate::error::MatchResult;
use crate::process::MatchOptions;
use crate::score::{Score, Scorer};
use crate::tools::ToolRouter;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 types
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 request.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// MCP protocol types
// ---------------------------------------------------------------------------

/// MCP server info returned in initialize response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerInfo {
    name: String,
    version: String,
}

/// MCP server capabilities.
#[derive(Debug, Serialize)]
struct ServerCapabilities {
    tools: ToolsCapability,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolsCapability {
    list_changed: bool,
}

/// MCP initialize result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResult {
    protocol_version: String,
    capabilities: ServerCapabilities,
    server_info: ServerInfo,
}

/// MCP tool definition for tools/list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// MCP tools/list result.
#[derive(Debug, Serialize)]
struct ToolsListResult {
    tools: Vec<ToolDefinition>,
}

/// MCP tools/call params.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: serde_json::Value,
}

/// MCP content item in tools/call response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// MCP tools/call result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

// ---------------------------------------------------------------------------
// MCP Server configuration
// ---------------------------------------------------------------------------

/// Defaults applied to `extract` and `score` calls that omit a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerConfig {
    /// Scorer used when a request names none.
    pub default_scorer: Scorer,
    /// Cutoff used when a request names none.
    pub default_cutoff: Score,
    /// Result limit used when a request names none.
    pub default_limit: Option<usize>,
    /// Score candidates in parallel.
    pub parallel: bool,
}

impl ServerConfig {
    /// Match options carrying these defaults.
    pub const fn match_options(&self) -> MatchOptions {
        MatchOptions {
            cutoff: self.default_cutoff,
            limit: self.default_limit,
            parallel: self.parallel,
        }
    }

    /// Reject defaults that would make every `extract` call fail.
    pub fn validate(&self) -> MatchResult<()> {
        self.match_options().validate()
    }
}

// ---------------------------------------------------------------------------
// Server main loop
// ---------------------------------------------------------------------------

/// Run the MCP server on stdin/stdout.
///
/// Reads JSON-RPC 2.0 requests line-by-line from stdin, dispatches to
/// the tool router, and writes responses to stdout. Exits when stdin
/// is closed.
///
/// # Errors
///
/// Returns an error if stdin/stdout I/O fails fatally.
pub fn run_mcp_server(config: ServerConfig) -> Result<()> {
    config.validate().context("invalid server defaults")?;

    info!(
        scorer = %config.default_scorer,
        cutoff = config.default_cutoff,
        limit = ?config.default_limit,
        parallel = config.parallel,
        "oa-fuzzmatch MCP server starting"
    );

    let router = ToolRouter::new(config);
    let stdin = std::io::stdin();
    let mut reader = std::io::BufReader::new(stdin.lock());
    let mut stdout = std::io::stdout().lock();

    serve(&router, &mut reader, &mut stdout)?;

    info!("oa-fuzzmatch MCP server stopped");
    Ok(())
}

/// Serve newline-delimited JSON-RPC requests from `reader` until EOF,
/// writing one response line per request to `out`.
///
/// Oversized or non-UTF-8 lines get a parse-error response and the loop
/// keeps going.
///
/// # Errors
///
/// Returns an error on I/O failure.
pub fn serve(router: &ToolRouter, reader: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let mut line_buf = Vec::new();

    loop {
        line_buf.clear();
        let status = read_line_limited(reader, &mut line_buf, MAX_LINE_BYTES)
            .context("failed to read request line")?;

        match status {
            // EOF — client closed the stream, clean exit.
            LineStatus::Eof => {
                info!("input closed, shutting down");
                break;
            }
            LineStatus::TooLong => {
                warn!(max_bytes = MAX_LINE_BYTES, "request line too long");
                let message =
                    format!("parse error: line exceeds maximum size ({MAX_LINE_BYTES} bytes)");
                write_response(out, &error_response(None, -32700, &message))?;
                continue;
            }
            LineStatus::Complete => {}
        }

        // UTF-8 is checked on the whole line so characters split across
        // reader buffers decode intact.
        let line = match std::str::from_utf8(&line_buf) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "non-UTF-8 request line");
                let message = format!("parse error: non-UTF-8 request data: {e}");
                write_response(out, &error_response(None, -32700, &message))?;
                continue;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!(raw = trimmed, "received request");

        let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "invalid JSON-RPC request");
                let resp = error_response(None, -32700, &format!("parse error: {e}"));
                write_response(out, &resp)?;
                continue;
            }
        };

        // JSON-RPC 2.0 spec: "jsonrpc" MUST be exactly "2.0".
        if request.jsonrpc != "2.0" {
            warn!(
                version = request.jsonrpc,
                "invalid JSON-RPC version (expected \"2.0\")"
            );
            let resp = error_response(
                request.id.clone(),
                -32600,
                &format!(
                    "invalid request: jsonrpc version must be \"2.0\", got \"{}\"",
                    request.jsonrpc
                ),
            );
            write_response(out, &resp)?;
            continue;
        }

        // Notifications (no id) don't require a response.
        let is_notification = request.id.is_none();
        let response = dispatch(router, &request);

        if is_notification {
            // Per JSON-RPC 2.0 spec, notifications MUST NOT receive a response.
            debug!(method = request.method, "notification handled (no response)");
            continue;
        }

        if let Some(resp) = response {
            write_response(out, &resp)?;
        }
    }

    Ok(())
}

/// Dispatch a JSON-RPC request to the appropriate handler.
pub fn dispatch(router: &ToolRouter, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => Some(handle_initialize(req)),
        "notifications/initialized" => {
            info!("client initialized");
            None // notification, no response
        }
        "tools/list" => Some(handle_tools_list(router, req)),
        "tools/call" => Some(handle_tools_call(router, req)),
        "ping" => Some(handle_ping(req)),
        _ => {
            warn!(method = req.method, "unknown method");
            Some(error_response(
                req.id.clone(),
                -32601,
                &format!("method not found: {}", req.method),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn handle_initialize(req: &JsonRpcRequest) -> JsonRpcResponse {
    let result = InitializeResult {
        protocol_version: "2025-06-18".to_owned(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
        },
        server_info: ServerInfo {
            name: "oa-fuzzmatch".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        },
    };

    success_response(req.id.clone(), &result)
}

fn handle_tools_list(router: &ToolRouter, req: &JsonRpcRequest) -> JsonRpcResponse {
    let tools = router.list_tools();
    let result = ToolsListResult { tools };
    success_response(req.id.clone(), &result)
}

fn handle_tools_call(router: &ToolRouter, req: &JsonRpcRequest) -> JsonRpcResponse {
    let params: ToolCallParams = match serde_json::from_value(req.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return error_response(
                req.id.clone(),
                -32602,
                &format!("invalid tools/call params: {e}"),
            );
        }
    };

    match router.call_tool(&params.name, params.arguments) {
        Ok(result) => success_response(req.id.clone(), &result),
        Err(e) => {
            error!(tool = params.name, error = %e, "tool call failed");
            let result = crate::tools::text_result(format!("Error: {e:#}"), true);
            success_response(req.id.clone(), &result)
        }
    }
}

fn handle_ping(req: &JsonRpcRequest) -> JsonRpcResponse {
    success_response(req.id.clone(), &serde_json::json!({}))
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn success_response(id: Option<serde_json::Value>, result: &impl Serialize) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse {
            jsonrpc: "2.0".to_owned(),
            id,
            result: Some(v),
            error: None,
        },
        Err(e) => {
            error!(error = %e, "failed to serialize success response");
            JsonRpcResponse {
                jsonrpc: "2.0".to_owned(),
                id,
                result: None,
                error: Some(JsonRpcError {
                    code: -32603,
                    message: format!("internal error: failed to serialize result: {e}"),
                    data: None,
                }),
            }
        }
    }
}

fn error_response(id: Option<serde_json::Value>, code: i64, message: &str) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".to_owned(),
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_owned(),
            data: None,
        }),
    }
}

/// Write a JSON-RPC response as a single line.
fn write_response(out: &mut impl Write, resp: &JsonRpcResponse) -> Result<()> {
    let json = serde_json::to_string(resp).context("failed to serialize response")?;
    debug!(response = json, "sending response");
    out.write_all(json.as_bytes())
        .context("failed to write response")?;
    out.write_all(b"\n")
        .context("failed to write response newline")?;
    out.flush().context("failed to flush response")?;
    Ok(())
}

/// Outcome of reading one request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStatus {
    /// Nothing left to read.
    Eof,
    /// A full line (or a final unterminated one) is in the buffer.
    Complete,
    /// The line exceeded the size cap and was discarded.
    TooLong,
}

/// Read raw bytes of one line from `reader` into `buf`, stopping at newline
/// or `max_bytes`.
///
/// An oversized line is consumed through its newline and discarded.
fn read_line_limited(
    reader: &mut impl BufRead,
    buf: &mut Vec<u8>,
    max_bytes: usize,
) -> Result<LineStatus> {
    loop {
        let available = reader.fill_buf().context("fill_buf failed")?;
        if available.is_empty() {
            return Ok(if buf.is_empty() {
                LineStatus::Eof
            } else {
                LineStatus::Complete
            });
        }
        // Find newline position in available data.
        let (consumed, found_newline) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (available.len(), false),
        };
        if buf.len() + consumed > max_bytes {
            reader.consume(consumed);
            if !found_newline {
                skip_to_newline(reader)?;
            }
            buf.clear();
            return Ok(LineStatus::TooLong);
        }
        buf.extend_from_slice(&available[..consumed]);
        reader.consume(consumed);
        if found_newline {
            return Ok(LineStatus::Complete);
        }
    }
}

/// Discard input up to and including the next newline (or EOF).
fn skip_to_newline(reader: &mut impl BufRead) -> Result<()> {
    loop {
        let rest = reader.fill_buf().context("fill_buf failed")?;
        if rest.is_empty() {
            return Ok(());
        }
        match rest.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let n = rest.len();
                reader.consume(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_line_limited_splits_lines() {
        let mut reader = Cursor::new(b"one\ntwo".to_vec());
        let mut buf = Vec::new();

        let status = read_line_limited(&mut reader, &mut buf, 64).expect("read");
        assert_eq!(status, LineStatus::Complete);
        assert_eq!(buf, b"one\n");

        buf.clear();
        let status = read_line_limited(&mut reader, &mut buf, 64).expect("read");
        assert_eq!(status, LineStatus::Complete);
        assert_eq!(buf, b"two");

        buf.clear();
        let status = read_line_limited(&mut reader, &mut buf, 64).expect("read");
        assert_eq!(status, LineStatus::Eof);
    }

    #[test]
    fn test_read_line_limited_discards_oversized_line() {
        let input = format!("{}\nnext\n", "x".repeat(100));
        let mut reader = std::io::BufReader::with_capacity(16, Cursor::new(input.into_bytes()));
        let mut buf = Vec::new();

        let status = read_line_limited(&mut reader, &mut buf, 32).expect("read");
        assert_eq!(status, LineStatus::TooLong);

        buf.clear();
        let status = read_line_limited(&mut reader, &mut buf, 32).expect("read");
        assert_eq!(status, LineStatus::Complete);
        assert_eq!(buf, b"next\n");
    }

    #[test]
    fn test_read_line_limited_keeps_split_multibyte_char() {
        // 'é' is two bytes; with a 4-byte buffer it straddles a refill.
        let input = "abcé\n".as_bytes().to_vec();
        let mut reader = std::io::BufReader::with_capacity(4, Cursor::new(input));
        let mut buf = Vec::new();

        let status = read_line_limited(&mut reader, &mut buf, 64).expect("read");
        assert_eq!(status, LineStatus::Complete);
        assert_eq!(std::str::from_utf8(&buf).expect("utf-8"), "abcé\n");
    }
}
