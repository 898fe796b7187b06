//! Best-match selection over a candidate collection.
//!
//! Scores every candidate against the query, drops anything under the
//! cutoff, orders the rest by descending score and truncates to the limit.
//! The sort is stable, so equal scores keep their original candidate order.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MatchError, MatchResult};
use crate::score::{MAX_SCORE, Score, Scorer};

/// One candidate and the score it received against the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub candidate: String,
    pub score: Score,
}

/// Cutoff, limit and execution settings for an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Minimum score a candidate must reach to be returned.
    #[serde(default)]
    pub cutoff: Score,
    /// Maximum number of results; `None` returns every match.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Score candidates on the rayon pool. Ignored without the
    /// `parallel` feature.
    #[serde(default)]
    pub parallel: bool,
}

impl MatchOptions {
    /// Create options with no cutoff and no limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum score.
    #[must_use]
    pub const fn with_cutoff(mut self, cutoff: Score) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Cap the number of results.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Toggle parallel candidate scoring.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Convert an untrusted integer cutoff, rejecting values outside `0..=100`.
    pub fn cutoff_from_i64(raw: i64) -> MatchResult<Score> {
        Score::try_from(raw)
            .ok()
            .filter(|&c| c <= MAX_SCORE)
            .ok_or_else(|| MatchError::invalid(format!("cutoff {raw} outside 0..=100")))
    }

    /// Check the options before any scoring work starts.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidConfiguration`] if the cutoff exceeds 100 or the
    /// limit is zero.
    pub fn validate(&self) -> MatchResult<()> {
        if self.cutoff > MAX_SCORE {
            return Err(MatchError::invalid(format!(
                "cutoff {} outside 0..=100",
                self.cutoff
            )));
        }
        if self.limit == Some(0) {
            return Err(MatchError::invalid("limit must be at least 1"));
        }
        Ok(())
    }
}

/// Return the best-scoring candidates for `query`, highest first.
///
/// Candidates scoring below `options.cutoff` are dropped; ties keep their
/// original relative order; at most `options.limit` entries are returned.
/// Inputs are never modified.
///
/// # Errors
///
/// [`MatchError::InvalidConfiguration`] from [`MatchOptions::validate`],
/// raised before any candidate is scored.
pub fn extract_best<S: AsRef<str> + Sync>(
    query: &str,
    candidates: &[S],
    scorer: Scorer,
    options: &MatchOptions,
) -> MatchResult<Vec<ScoredMatch>> {
    if let Err(e) = options.validate() {
        warn!(error = %e, "rejected match configuration");
        return Err(e);
    }

    let scores = score_all(query, candidates, scorer, options.parallel);

    let mut matches: Vec<ScoredMatch> = candidates
        .iter()
        .zip(scores)
        .filter(|&(_, score)| score >= options.cutoff)
        .map(|(candidate, score)| ScoredMatch {
            candidate: candidate.as_ref().to_owned(),
            score,
        })
        .collect();

    // `sort_by` is stable.
    matches.sort_by(|a, b| b.score.cmp(&a.score));

    if let Some(limit) = options.limit {
        matches.truncate(limit);
    }

    debug!(
        scorer = %scorer,
        candidates = candidates.len(),
        kept = matches.len(),
        cutoff = options.cutoff,
        "extracted best matches"
    );

    Ok(matches)
}

/// The single best candidate, or `None` if nothing reaches the cutoff.
///
/// Ties resolve to the earliest candidate. `options.limit` is ignored.
pub fn extract_one<S: AsRef<str> + Sync>(
    query: &str,
    candidates: &[S],
    scorer: Scorer,
    options: &MatchOptions,
) -> MatchResult<Option<ScoredMatch>> {
    let options = MatchOptions {
        limit: Some(1),
        ..*options
    };
    Ok(extract_best(query, candidates, scorer, &options)?
        .into_iter()
        .next())
}

/// Score every candidate, returning scores in candidate order.
fn score_all<S: AsRef<str> + Sync>(
    query: &str,
    candidates: &[S],
    scorer: Scorer,
    parallel: bool,
) -> Vec<Score> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        if parallel {
            return candidates
                .par_iter()
                .map(|c| scorer.score(query, c.as_ref()))
                .collect();
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    candidates
        .iter()
        .map(|c| scorer.score(query, c.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<&'static str> {
        vec!["Miller James", "James Mill", "Totally Different"]
    }

    #[test]
    fn test_scenario_token_set() {
        let options = MatchOptions::new().with_cutoff(80).with_limit(2);
        let result = extract_best("James Miller", &names(), Scorer::TokenSet, &options)
            .expect("valid options");

        assert!(result.len() <= 2);
        assert_eq!(result[0].candidate, "Miller James");
        assert_eq!(result[0].score, 100);
        assert_eq!(result[1].candidate, "James Mill");
        assert_eq!(result[1].score, 91);
    }

    #[test]
    fn test_cutoff_and_limit_respected() {
        let candidates = ["a", "ab", "abc", "abcd", "xyz"];
        for cutoff in [0, 40, 75, 100] {
            for limit in [1, 2, 10] {
                let options = MatchOptions::new().with_cutoff(cutoff).with_limit(limit);
                let result = extract_best("abc", &candidates, Scorer::Ratio, &options)
                    .expect("valid options");
                assert!(result.len() <= limit);
                assert!(result.iter().all(|m| m.score >= cutoff));
            }
        }
    }

    #[test]
    fn test_sorted_descending() {
        let candidates = ["abcd", "a", "abc", "ab", "xyz"];
        let result = extract_best("abc", &candidates, Scorer::Ratio, &MatchOptions::new())
            .expect("valid options");
        assert_eq!(result.len(), candidates.len());
        assert!(result.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(result[0].candidate, "abc");
    }

    #[test]
    fn test_stable_ties() {
        // All three score 100 under token_sort; "other" scores lower.
        let candidates = ["smith john", "other", "John Smith", "JOHN  SMITH"];
        let options = MatchOptions::new();
        let result = extract_best("john smith", &candidates, Scorer::TokenSort, &options)
            .expect("valid options");
        let order: Vec<&str> = result.iter().map(|m| m.candidate.as_str()).collect();
        assert_eq!(order, ["smith john", "John Smith", "JOHN  SMITH", "other"]);
    }

    #[test]
    fn test_duplicates_kept() {
        let candidates = ["Smith", "Smith", "Smyth"];
        let result = extract_best("Smith", &candidates, Scorer::Ratio, &MatchOptions::new())
            .expect("valid options");
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].candidate, "Smith");
        assert_eq!(result[1].candidate, "Smith");
    }

    #[test]
    fn test_empty_results() {
        let options = MatchOptions::new().with_cutoff(100);
        let result = extract_best("zzz", &names(), Scorer::Ratio, &options).expect("valid options");
        assert!(result.is_empty());

        let none: [&str; 0] = [];
        let result = extract_best("zzz", &none, Scorer::Ratio, &MatchOptions::new())
            .expect("valid options");
        assert!(result.is_empty());
    }

    #[test]
    fn test_invalid_limit() {
        let options = MatchOptions::new().with_limit(0);
        let err = extract_best("q", &names(), Scorer::Ratio, &options).expect_err("limit 0");
        assert!(matches!(err, MatchError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_invalid_cutoff() {
        let options = MatchOptions::new().with_cutoff(101);
        let err = extract_best("q", &names(), Scorer::Ratio, &options).expect_err("cutoff 101");
        assert!(matches!(err, MatchError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_cutoff_from_i64() {
        assert_eq!(MatchOptions::cutoff_from_i64(0).ok(), Some(0));
        assert_eq!(MatchOptions::cutoff_from_i64(100).ok(), Some(100));
        assert!(MatchOptions::cutoff_from_i64(-1).is_err());
        assert!(MatchOptions::cutoff_from_i64(101).is_err());
        assert!(MatchOptions::cutoff_from_i64(300).is_err());
    }

    #[test]
    fn test_owned_candidates() {
        let candidates: Vec<String> = names().into_iter().map(str::to_owned).collect();
        let result = extract_best("Miller", &candidates, Scorer::PartialRatio, &MatchOptions::new())
            .expect("valid options");
        assert_eq!(result[0].candidate, "Miller James");
        assert_eq!(result[0].score, 100);
    }

    #[test]
    fn test_extract_one() {
        let best = extract_one("James Miller", &names(), Scorer::TokenSort, &MatchOptions::new())
            .expect("valid options");
        assert_eq!(
            best,
            Some(ScoredMatch {
                candidate: "Miller James".to_owned(),
                score: 100
            })
        );

        let options = MatchOptions::new().with_cutoff(100);
        let none = extract_one("nobody", &names(), Scorer::Ratio, &options).expect("valid options");
        assert_eq!(none, None);
    }

    #[test]
    fn test_extract_one_ignores_zero_limit() {
        let options = MatchOptions::new().with_limit(0);
        assert!(extract_one("James", &names(), Scorer::Ratio, &options).is_ok());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let candidates: Vec<String> = (0..200)
            .map(|i| format!("Name{} Surname{}", i % 17, i % 5))
            .collect();
        let sequential = MatchOptions::new().with_cutoff(50).with_limit(25);
        let parallel = sequential.with_parallel(true);

        let a = extract_best("Name3 Surname2", &candidates, Scorer::TokenSet, &sequential)
            .expect("valid options");
        let b = extract_best("Name3 Surname2", &candidates, Scorer::TokenSet, &parallel)
            .expect("valid options");
        assert_eq!(a, b);
    }
}
