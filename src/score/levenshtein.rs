//! Levenshtein edit distance and the normalized ratio built on it.
//!
//! Every other scorer bottoms out in [`ratio`].

use std::cmp::Ordering;

use super::{MAX_SCORE, Score};

/// Compute the Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character edits (insertions,
/// deletions, substitutions) required to transform `a` into `b`. Strings
/// are compared as sequences of Unicode scalar values.
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    char_distance(&a_chars, &b_chars)
}

/// Edit distance over pre-split character slices.
///
/// Keeps a single row sized to the shorter input.
pub(crate) fn char_distance(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let n = short.len();

    if n == 0 {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=n).collect();

    for (i, &lc) in long.iter().enumerate() {
        // `diag` is the previous row's value one column to the left.
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            let next = (row[j + 1] + 1) // deletion
                .min(row[j] + 1) // insertion
                .min(diag + cost); // substitution
            diag = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[n]
}

/// Normalized similarity in [0, 100] derived from the edit distance.
///
/// `round(100 * (len(a) + len(b) - d) / (len(a) + len(b)))`, with exact
/// halves rounded to even and two empty strings scoring 100.
///
/// A substitution costs one edit but spans a character on each side, so
/// disjoint strings of equal length score 50, not 0 (`ratio("a", "b") == 50`).
/// Only a comparison against the empty string reaches 0.
pub fn ratio(a: &str, b: &str) -> Score {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    char_ratio(&a_chars, &b_chars)
}

pub(crate) fn char_ratio(a: &[char], b: &[char]) -> Score {
    let total = a.len() + b.len();
    if total == 0 {
        return MAX_SCORE;
    }
    if a == b {
        return MAX_SCORE;
    }
    let dist = char_distance(a, b);
    normalize(total - dist, total)
}

/// Round `100 * matched / total` half to even, clamped to the score range.
fn normalize(matched: usize, total: usize) -> Score {
    let scaled = 100 * matched;
    let (quot, rem) = (scaled / total, scaled % total);
    let rounded = match (2 * rem).cmp(&total) {
        Ordering::Greater => quot + 1,
        Ordering::Equal => quot + quot % 2,
        Ordering::Less => quot,
    };
    Score::try_from(rounded.min(usize::from(MAX_SCORE))).unwrap_or(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(distance("hello", "hello"), 0);
        assert_eq!(ratio("hello", "hello"), 100);
    }

    #[test]
    fn test_empty() {
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("", ""), 0);
        assert_eq!(ratio("", ""), 100);
        assert_eq!(ratio("abc", ""), 0);
        assert_eq!(ratio("", "abc"), 0);
    }

    #[test]
    fn test_single_edit() {
        assert_eq!(distance("kitten", "sitten"), 1); // substitution
        assert_eq!(distance("cat", "cats"), 1); // insertion
        assert_eq!(distance("cats", "cat"), 1); // deletion
    }

    #[test]
    fn test_classic() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_no_length_shortcut() {
        // Large length differences still get an exact distance.
        assert_eq!(distance("a", "abcdefghij"), 9);
        assert_eq!(distance("smith", "john smith iii"), 9);
    }

    #[test]
    fn test_unicode_code_points() {
        assert_eq!(distance("café", "cafe"), 1);
        assert_eq!(distance("日本語", "日本"), 1);
        assert_eq!(ratio("über", "über"), 100);
    }

    #[test]
    fn test_ratio_rounding() {
        // d = 1, 5 + 4 = 9 → round(800 / 9) = 89
        assert_eq!(ratio("James", "Jame"), 89);
        // d = 3, 6 + 7 = 13 → round(1000 / 13) = 77
        assert_eq!(ratio("kitten", "sitting"), 77);
        // d = 1, 1 + 1 = 2 → 50
        assert_eq!(ratio("a", "b"), 50);
        assert_eq!(ratio("ab", "ac"), 75);
    }

    #[test]
    fn test_ratio_half_to_even() {
        // d = 3, 4 + 4 = 8 → 62.5 → 62
        assert_eq!(ratio("abcd", "axyz"), 62);
        // d = 1, 4 + 4 = 8 → 87.5 → 88
        assert_eq!(ratio("abcd", "abcz"), 88);
    }

    #[test]
    fn test_ratio_symmetric() {
        let pairs = [
            ("James Miller", "Miller James"),
            ("", "x"),
            ("kitten", "sitting"),
            ("Robert", "Rupert"),
        ];
        for (a, b) in pairs {
            assert_eq!(ratio(a, b), ratio(b, a), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_case_sensitive() {
        assert!(ratio("SMITH", "smith") < 100);
    }
}
