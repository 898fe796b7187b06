//! Tool router — registers and dispatches MCP tool calls.
//!
//! Each tool is a function that takes JSON arguments and returns a
//! [`ToolCallResult`]. The router maintains the tool registry and
//! provides `list_tools()` / `call_tool()` for the MCP server.

pub mod compare;
pub mod extract;
pub mod score;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::server::{ContentItem, ServerConfig, ToolCallResult, ToolDefinition};

/// Wrap plain text in a single-item tool result.
pub(crate) fn text_result(text: String, is_error: bool) -> ToolCallResult {
    ToolCallResult {
        content: vec![ContentItem {
            content_type: "text".to_owned(),
            text,
        }],
        is_error,
    }
}

/// Serialize `value` as pretty JSON into a successful tool result.
pub(crate) fn json_result(value: &impl Serialize) -> Result<ToolCallResult> {
    let text = serde_json::to_string_pretty(value)?;
    Ok(text_result(text, false))
}

/// Tool router that dispatches MCP tool calls to implementations.
pub struct ToolRouter {
    /// Defaults for fields a request leaves out.
    config: ServerConfig,
}

impl ToolRouter {
    /// Create a new tool router.
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// List all available tools with their JSON Schema definitions.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![
            score::tool_definition(),
            compare::tool_definition(),
            extract::tool_definition(),
        ]
    }

    /// Call a tool by name with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments do not deserialize or the result
    /// cannot be serialized.
    pub fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<ToolCallResult> {
        debug!(tool = name, "dispatching tool call");

        match name {
            "score" => score::execute(&self.config, arguments),
            "compare" => compare::execute(arguments),
            "extract" => extract::execute(&self.config, arguments),
            _ => Ok(text_result(format!("Unknown tool: {name}"), true)),
        }
    }
}
