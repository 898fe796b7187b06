//! `oa-fuzzmatch` — fuzzy string-similarity engine.
//!
//! Scores string pairs on a 0–100 scale and picks the best-matching
//! candidates for a query. Usable as a library or as a standalone MCP
//! tool server over stdio (JSON-RPC 2.0, newline-delimited).
//!
//! # Scorers
//!
//! - `ratio` — normalized Levenshtein similarity
//! - `partial_ratio` — best alignment of the shorter string inside the longer
//! - `token_sort_ratio` — word-order-insensitive comparison
//! - `token_set_ratio` — tolerant of reordered, repeated and extra words
//!
//! # Architecture
//!
//! ```text
//! stdin (JSON-RPC) → McpServer → ToolRouter → extract_best / compare
//!                                                   ↓
//!                                             score::{ratio, ...}
//! stdout (JSON-RPC) ←────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use oa_fuzzmatch::{MatchOptions, Scorer, extract_best};
//!
//! let candidates = ["Miller James", "James Mill", "Totally Different"];
//! let options = MatchOptions::new().with_cutoff(80).with_limit(2);
//! let best = extract_best("James Miller", &candidates, Scorer::TokenSet, &options)?;
//! assert_eq!(best[0].candidate, "Miller James");
//! assert_eq!(best[0].score, 100);
//! # Ok::<(), oa_fuzzmatch::MatchError>(())
//! ```

pub mod error;
pub mod process;
pub mod score;
pub mod server;
pub mod tools;

pub use error::{MatchError, MatchResult};
pub use process::{MatchOptions, ScoredMatch, extract_best, extract_one};
pub use score::{
    Comparison, Score, Scorer, compare, partial_ratio, ratio, token_set_ratio, token_sort_ratio,
};
pub use server::{ServerConfig, run_mcp_server};
