//! Token normalization and the word-order-insensitive scorers.
//!
//! Tokens are maximal runs of non-whitespace, compared lowercased. Both
//! scorers rebuild canonical strings from tokens and hand them to
//! [`ratio`](super::ratio).

use std::collections::BTreeSet;

use super::Score;
use super::levenshtein::ratio;

/// Canonical form produced by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    /// Lowercased tokens, sorted, duplicates kept.
    Sorted,
    /// Lowercased tokens, sorted, each distinct token once.
    Set,
}

/// Split on whitespace runs and lowercase each token.
fn tokens(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_lowercase).collect()
}

/// Rebuild a canonical string from `s`'s tokens.
///
/// A string with no tokens normalizes to `""`.
pub fn normalize(s: &str, mode: TokenMode) -> String {
    let mut toks = tokens(s);
    toks.sort();
    if mode == TokenMode::Set {
        toks.dedup();
    }
    toks.join(" ")
}

/// [`ratio`] over the sorted token forms of both inputs.
pub fn token_sort_ratio(a: &str, b: &str) -> Score {
    ratio(&normalize(a, TokenMode::Sorted), &normalize(b, TokenMode::Sorted))
}

/// Set-based comparison tolerant of reordered, repeated and extra tokens.
///
/// Splits both token sets into the shared tokens `I` and the leftovers
/// `D_a`, `D_b`, then takes the best of `I` vs `I + D_a`, `I` vs `I + D_b`
/// and `I + D_a` vs `I + D_b`. With no shared tokens this is a plain
/// [`ratio`] of the two leftover strings.
pub fn token_set_ratio(a: &str, b: &str) -> Score {
    let set_a: BTreeSet<String> = tokens(a).into_iter().collect();
    let set_b: BTreeSet<String> = tokens(b).into_iter().collect();

    let sect = join(set_a.intersection(&set_b));
    let diff_a = join(set_a.difference(&set_b));
    let diff_b = join(set_b.difference(&set_a));

    if sect.is_empty() {
        return ratio(&diff_a, &diff_b);
    }

    let combined_a = concat(&sect, &diff_a);
    let combined_b = concat(&sect, &diff_b);

    ratio(&sect, &combined_a)
        .max(ratio(&sect, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join<'a>(toks: impl Iterator<Item = &'a String>) -> String {
    toks.map(String::as_str).collect::<Vec<_>>().join(" ")
}

fn concat(sect: &str, diff: &str) -> String {
    if diff.is_empty() {
        sect.to_owned()
    } else {
        format!("{sect} {diff}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sorted() {
        assert_eq!(normalize("  Smith   John ", TokenMode::Sorted), "john smith");
        assert_eq!(normalize("b a b", TokenMode::Sorted), "a b b");
    }

    #[test]
    fn test_normalize_set() {
        assert_eq!(normalize("b a B\tA", TokenMode::Set), "a b");
    }

    #[test]
    fn test_normalize_no_tokens() {
        assert_eq!(normalize("", TokenMode::Sorted), "");
        assert_eq!(normalize(" \t\n ", TokenMode::Set), "");
    }

    #[test]
    fn test_token_sort_permutation() {
        assert_eq!(token_sort_ratio("a b", "b a"), 100);
        assert_eq!(token_sort_ratio("Miller James", "James Miller"), 100);
        assert_eq!(token_sort_ratio("John Smith", "smith JOHN"), 100);
    }

    #[test]
    fn test_token_sort_keeps_duplicates() {
        assert!(token_sort_ratio("new new york", "new york") < 100);
    }

    #[test]
    fn test_token_set_superset() {
        assert_eq!(token_set_ratio("John Smith", "John Smith Jr"), 100);
        assert_eq!(token_set_ratio("James Miller", "Miller James III"), 100);
        let (a, b) = ("John Smith", "John Smith Jr");
        assert!(token_set_ratio(a, b) >= ratio(a, b));
    }

    #[test]
    fn test_token_set_ignores_duplicates() {
        assert_eq!(token_set_ratio("new new york", "york new"), 100);
    }

    #[test]
    fn test_token_set_partial_overlap() {
        // I = "james", D_a = "miller", D_b = "mill":
        // "james miller" vs "james mill" → d = 2 over 22 chars → 91
        assert_eq!(token_set_ratio("James Miller", "James Mill"), 91);
    }

    #[test]
    fn test_token_set_disjoint() {
        assert_eq!(token_set_ratio("abc", "xyz"), ratio("abc", "xyz"));
        assert_eq!(token_set_ratio("", "John"), 0);
        assert_eq!(token_set_ratio("", ""), 100);
    }

    #[test]
    fn test_token_set_symmetric() {
        let pairs = [("James Mill", "James Miller"), ("a b c", "c d"), ("x", "")];
        for (a, b) in pairs {
            assert_eq!(token_set_ratio(a, b), token_set_ratio(b, a), "{a:?} vs {b:?}");
        }
    }
}
