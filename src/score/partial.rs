//! Best-aligned substring scoring.

use super::levenshtein::char_ratio;
use super::{MAX_SCORE, Score};

/// Score the best alignment of the shorter string inside the longer one.
///
/// Slides the shorter string over every same-length window of the longer
/// string and returns the highest [`ratio`](super::ratio) observed. An empty
/// shorter string scores 100.
pub fn partial_ratio(a: &str, b: &str) -> Score {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let (short, long) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    if short.is_empty() {
        return MAX_SCORE;
    }

    let mut best: Score = 0;
    for window in long.windows(short.len()) {
        best = best.max(char_ratio(short, window));
        if best == MAX_SCORE {
            break;
        }
    }
    best
}
