//! Similarity scorers.
//!
//! Every scorer maps a pair of strings to an integer [`Score`] in
//! `0..=100`. All of them reduce to the edit-distance [`ratio`]:
//!
//! 1. `ratio` — normalized Levenshtein similarity
//! 2. `partial_ratio` — best same-length window of the longer string
//! 3. `token_sort_ratio` — `ratio` over sorted lowercase tokens
//! 4. `token_set_ratio` — intersection/difference token groups, best of three
//!
//! [`Scorer`] is the tagged selector used by the extraction API and the
//! tool server; it dispatches through a static table rather than by name at
//! call time.

pub mod levenshtein;
pub mod partial;
pub mod token;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;

pub use levenshtein::{distance, ratio};
pub use partial::partial_ratio;
pub use token::{TokenMode, normalize, token_set_ratio, token_sort_ratio};

/// Normalized similarity, `0..=100`.
pub type Score = u8;

/// Highest possible score (identical under the scorer's normalization).
pub const MAX_SCORE: Score = 100;

/// A scorer function signature: takes `(a, b)` and returns a score.
pub type ScoreFn = fn(&str, &str) -> Score;

/// Scorer registry, in [`Scorer::ALL`] order.
const SCORER_TABLE: &[(Scorer, &str, ScoreFn)] = &[
    (Scorer::Ratio, "ratio", ratio),
    (Scorer::PartialRatio, "partial_ratio", partial_ratio),
    (Scorer::TokenSort, "token_sort_ratio", token_sort_ratio),
    (Scorer::TokenSet, "token_set_ratio", token_set_ratio),
];

/// Scorer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scorer {
    #[serde(rename = "ratio")]
    Ratio,
    #[serde(rename = "partial_ratio")]
    PartialRatio,
    #[serde(rename = "token_sort_ratio")]
    TokenSort,
    /// Default: tolerant of word order and extra tokens, which suits names.
    #[default]
    #[serde(rename = "token_set_ratio")]
    TokenSet,
}

impl Scorer {
    /// All scorers, in registry order.
    pub const ALL: [Self; 4] = [
        Self::Ratio,
        Self::PartialRatio,
        Self::TokenSort,
        Self::TokenSet,
    ];

    const fn entry(self) -> (&'static str, ScoreFn) {
        let (_, name, func) = SCORER_TABLE[self as usize];
        (name, func)
    }

    /// Wire name of this scorer.
    pub const fn name(self) -> &'static str {
        self.entry().0
    }

    /// The scoring function behind this selector.
    pub const fn func(self) -> ScoreFn {
        self.entry().1
    }

    /// Score `a` against `b`.
    pub fn score(self, a: &str, b: &str) -> Score {
        (self.func())(a, b)
    }
}

impl fmt::Display for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scorer {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SCORER_TABLE
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|&(scorer, _, _)| scorer)
            .ok_or_else(|| MatchError::UnknownScorer { name: s.to_owned() })
    }
}

/// Every scorer applied to one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub ratio: Score,
    pub partial_ratio: Score,
    pub token_sort_ratio: Score,
    pub token_set_ratio: Score,
}

/// Run all four scorers over `(a, b)`.
pub fn compare(a: &str, b: &str) -> Comparison {
    Comparison {
        ratio: ratio(a, b),
        partial_ratio: partial_ratio(a, b),
        token_sort_ratio: token_sort_ratio(a, b),
        token_set_ratio: token_set_ratio(a, b),
    }
}
