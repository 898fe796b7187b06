//! Extract tool — best matches for a query among candidate strings.
//!
//! Omitted `scorer`, `cutoff` and `limit` fall back to the server
//! defaults. Configuration problems come back as tool errors before any
//! candidate is scored.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::error::MatchResult;
use crate::process::{MatchOptions, extract_best};
use crate::score::Scorer;
use crate::server::{ServerConfig, ToolCallResult, ToolDefinition};

/// Parameters for the extract tool.
#[derive(Debug, Deserialize)]
pub struct ExtractParams {
    pub query: String,
    pub candidates: Vec<String>,
    #[serde(default)]
    pub scorer: Option<String>,
    /// Raw integer so out-of-range values reach validation instead of
    /// failing deserialization.
    #[serde(default)]
    pub cutoff: Option<i64>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ExtractParams {
    /// Resolve scorer and options against the server defaults.
    fn resolve(&self, config: &ServerConfig) -> MatchResult<(Scorer, MatchOptions)> {
        let scorer = match self.scorer.as_deref() {
            Some(name) => name.parse::<Scorer>()?,
            None => config.default_scorer,
        };

        let mut options = config.match_options();
        if let Some(raw) = self.cutoff {
            options.cutoff = MatchOptions::cutoff_from_i64(raw)?;
        }
        if self.limit.is_some() {
            options.limit = self.limit;
        }
        options.validate()?;

        Ok((scorer, options))
    }
}

/// Return the MCP tool definition for `extract`.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "extract".to_owned(),
        description: "Return the best-matching candidates for a query, highest score first. \
            Candidates under the cutoff are dropped; equal scores keep their input order."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "String to match"
                },
                "candidates": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Candidate strings, in priority order for ties"
                },
                "scorer": {
                    "type": "string",
                    "enum": ["ratio", "partial_ratio", "token_sort_ratio", "token_set_ratio"],
                    "description": "Scorer to apply (default: server default)"
                },
                "cutoff": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": 100,
                    "description": "Minimum score to include (default: server default)"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of results (default: unbounded)"
                }
            },
            "required": ["query", "candidates"]
        }),
    }
}

/// Execute the extract tool.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute(config: &ServerConfig, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: ExtractParams =
        serde_json::from_value(arguments).context("invalid extract parameters")?;

    let (scorer, options) = match params.resolve(config) {
        Ok(resolved) => resolved,
        Err(e) => return Ok(super::text_result(format!("Error: {e}"), true)),
    };

    debug!(
        scorer = %scorer,
        candidates = params.candidates.len(),
        "running extract"
    );

    let matches = extract_best(&params.query, &params.candidates, scorer, &options)?;
    super::json_result(&matches)
}
