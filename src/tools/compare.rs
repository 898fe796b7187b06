//! Compare tool — every scorer over one pair, side by side.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub a: String,
    pub b: String,
}

/// Return the MCP tool definition for `compare`.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "compare".to_owned(),
        description: "Report ratio, partial_ratio, token_sort_ratio and token_set_ratio \
            for two strings."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "a": { "type": "string", "description": "First string" },
                "b": { "type": "string", "description": "Second string" }
            },
            "required": ["a", "b"]
        }),
    }
}

/// Execute the compare tool.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute(arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: CompareParams =
        serde_json::from_value(arguments).context("invalid compare parameters")?;

    super::json_result(&crate::score::compare(&params.a, &params.b))
}
