//! Score tool — one scorer applied to one pair of strings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::score::{Score, Scorer};
use crate::server::{ServerConfig, ToolCallResult, ToolDefinition};

/// Parameters for the score tool.
#[derive(Debug, Deserialize)]
pub struct ScoreParams {
    pub a: String,
    pub b: String,
    /// Scorer name; falls back to the server default.
    #[serde(default)]
    pub scorer: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScoreOutput {
    scorer: Scorer,
    score: Score,
}

/// Return the MCP tool definition for `score`.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "score".to_owned(),
        description: "Score the similarity of two strings (0-100) with one scorer.".to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "a": { "type": "string", "description": "First string" },
                "b": { "type": "string", "description": "Second string" },
                "scorer": {
                    "type": "string",
                    "enum": ["ratio", "partial_ratio", "token_sort_ratio", "token_set_ratio"],
                    "description": "Scorer to apply (default: server default)"
                }
            },
            "required": ["a", "b"]
        }),
    }
}

/// Execute the score tool.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute(config: &ServerConfig, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: ScoreParams =
        serde_json::from_value(arguments).context("invalid score parameters")?;

    let scorer = match params.scorer.as_deref() {
        Some(name) => match name.parse::<Scorer>() {
            Ok(s) => s,
            Err(e) => return Ok(super::text_result(format!("Error: {e}"), true)),
        },
        None => config.default_scorer,
    };

    let score = scorer.score(&params.a, &params.b);
    super::json_result(&ScoreOutput { scorer, score })
}
