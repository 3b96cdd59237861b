//! Indel-based fuzzy ratios on a 0-100 scale.
//!
//! Semantics follow the usual FuzzyWuzzy/RapidFuzz family:
//! - `ratio`: normalized indel similarity of the whole strings
//! - `partial_ratio`: best alignment of the shorter string inside the longer
//! - `token_sort_ratio` / `token_set_ratio`: word order and duplicate insensitive
//! - `weighted_ratio`: picks between the above depending on the length ratio
//!
//! Every function returns 0.0 when either side is empty.

use std::collections::BTreeSet;

/// Length of the longest common subsequence of two char slices.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (a, b) = if a.len() < b.len() { (b, a) } else { (a, b) };
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Similarity from an indel distance and the combined length of both sides.
#[inline]
fn indel_similarity(distance: usize, total_len: usize) -> f64 {
    if total_len == 0 {
        return 0.0;
    }
    100.0 * (1.0 - distance as f64 / total_len as f64)
}

/// Normalized indel similarity: `200 * LCS / (len(a) + len(b))`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

fn partial_ratio_ordered(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let m = haystack.len();
    let mut best = 0.0f64;

    // windows that run off the left edge
    for end in 1..n {
        best = best.max(ratio_chars(needle, &haystack[..end]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    // full-width windows
    for start in 0..=(m - n) {
        best = best.max(ratio_chars(needle, &haystack[start..start + n]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    // windows that run off the right edge
    for start in (m - n + 1)..m {
        best = best.max(ratio_chars(needle, &haystack[start..]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    best
}

/// Best `ratio` of the shorter string against any alignment within the longer.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.len() < b.len() {
        partial_ratio_ordered(&a, &b)
    } else if a.len() > b.len() {
        partial_ratio_ordered(&b, &a)
    } else {
        partial_ratio_ordered(&a, &b).max(partial_ratio_ordered(&b, &a))
    }
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join_tokens<'a>(tokens: impl IntoIterator<Item = &'a &'a str>) -> String {
    tokens.into_iter().copied().collect::<Vec<_>>().join(" ")
}

/// `ratio` after sorting the whitespace tokens of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Set-based token comparison: shared tokens are compared against each side's
/// shared-plus-remaining tokens and the best of the three is kept.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let sect: Vec<&str> = set_a.intersection(&set_b).copied().collect();
    let diff_ab: Vec<&str> = set_a.difference(&set_b).copied().collect();
    let diff_ba: Vec<&str> = set_b.difference(&set_a).copied().collect();

    // one side is a subset of the other
    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab_joined: Vec<char> = join_tokens(&diff_ab).chars().collect();
    let diff_ba_joined: Vec<char> = join_tokens(&diff_ba).chars().collect();
    let sect_len = join_tokens(&sect).chars().count();
    let sep = usize::from(sect_len != 0);
    let sect_ab_len = sect_len + sep + diff_ab_joined.len();
    let sect_ba_len = sect_len + sep + diff_ba_joined.len();

    // "sect diff_ab" vs "sect diff_ba": only the diffs can differ
    let diff_distance = diff_ab_joined.len() + diff_ba_joined.len()
        - 2 * lcs_len(&diff_ab_joined, &diff_ba_joined);
    let mut best = indel_similarity(diff_distance, sect_ab_len + sect_ba_len);

    if sect_len > 0 {
        let sect_ab = indel_similarity(sep + diff_ab_joined.len(), sect_len + sect_ab_len);
        let sect_ba = indel_similarity(sep + diff_ba_joined.len(), sect_len + sect_ba_len);
        best = best.max(sect_ab).max(sect_ba);
    }
    best
}

/// Best of the set and sort token comparisons.
pub fn token_ratio(a: &str, b: &str) -> f64 {
    token_set_ratio(a, b).max(token_sort_ratio(a, b))
}

/// Token-aware `partial_ratio`. Any shared token is a perfect score.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: Vec<&str> = a.split_whitespace().collect();
    let tokens_b: Vec<&str> = b.split_whitespace().collect();
    let set_a: BTreeSet<&str> = tokens_a.iter().copied().collect();
    let set_b: BTreeSet<&str> = tokens_b.iter().copied().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    if set_a.intersection(&set_b).next().is_some() {
        return 100.0;
    }

    let result = partial_ratio(&sorted_tokens(a), &sorted_tokens(b));
    if tokens_a.len() == set_a.len() && tokens_b.len() == set_b.len() {
        return result;
    }
    // disjoint sets, so the differences are the deduplicated token sets
    result.max(partial_ratio(&join_tokens(&set_a), &join_tokens(&set_b)))
}

const UNBASE_SCALE: f64 = 0.95;

/// Weighted whole-string similarity. Close lengths compare whole strings and
/// token orderings; strongly different lengths lean on partial alignment,
/// scaled down as the length gap grows.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let mut best = ratio(a, b);

    if len_ratio < 1.5 {
        return best.max(token_ratio(a, b) * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio <= 8.0 { 0.9 } else { 0.6 };
    best = best.max(partial_ratio(a, b) * partial_scale);
    best.max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("priya", "priya"), 100.0);
        assert!(close(ratio("priyaa", "priya"), 90.909));
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("", "priya"), 0.0);
        assert_eq!(ratio("", ""), 0.0);
    }

    #[test]
    fn test_ratio_counts_chars_not_bytes() {
        assert_eq!(ratio("प्रिया", "प्रिया"), 100.0);
        // 6 chars vs 5 chars sharing 5
        assert!(close(ratio("प्रिया", "प्रिय"), 90.909));
    }

    #[test]
    fn test_partial_ratio() {
        assert_eq!(partial_ratio("sharma", "priya sharma"), 100.0);
        // window "priya" at the left edge: 2 * 5 / (6 + 5)
        assert!(close(partial_ratio("priyaa", "priya verma"), 90.909));
        assert_eq!(partial_ratio("", "x"), 0.0);
    }

    #[test]
    fn test_partial_ratio_edge_windows() {
        // best alignment hangs off the end of the haystack
        assert!(close(partial_ratio("mark", "dim ma"), 66.667));
    }

    #[test]
    fn test_token_sort_ratio() {
        assert_eq!(token_sort_ratio("sharma priya", "priya sharma"), 100.0);
        assert!(token_sort_ratio("priya sharma", "priya verma") < 100.0);
    }

    #[test]
    fn test_token_set_ratio() {
        assert_eq!(token_set_ratio("priya", "priya sharma"), 100.0);
        assert_eq!(token_set_ratio("priya priya sharma", "sharma priya"), 100.0);
        // sect "priya" (5) vs "priya sharma" (12) and "priya verma" (11)
        let score = token_set_ratio("priya sharma", "priya verma");
        assert!(score > ratio("sharma", "verma"));
        assert!(score < 100.0);
        assert_eq!(token_set_ratio("", "priya"), 0.0);
    }

    #[test]
    fn test_partial_token_ratio() {
        assert_eq!(partial_token_ratio("amit kumar", "kumar"), 100.0);
        assert!(partial_token_ratio("amit", "sumit kaur") < 100.0);
    }

    #[test]
    fn test_weighted_ratio_close_lengths() {
        assert!(close(weighted_ratio("sharma priya", "priya sharma"), 95.0));
        assert!(close(weighted_ratio("priyaa", "priya"), 90.909));
    }

    #[test]
    fn test_weighted_ratio_length_gap() {
        // 6 vs 11 chars: partial alignment 90.909 scaled by 0.9
        assert!(close(weighted_ratio("priyaa", "priya verma"), 81.818));
        // exact substring, scaled by 0.9
        assert!(close(weighted_ratio("ravi", "ravi shankar"), 90.0));
        assert_eq!(weighted_ratio("", "ravi"), 0.0);
    }

    #[test]
    fn test_all_ratios_bounded() {
        let pairs = [
            ("a", "a b c d e f g h i j"),
            ("priya sharma", "sharma"),
            ("x", "y"),
            ("anand anand", "anand"),
        ];
        for (a, b) in pairs {
            for f in [
                ratio,
                partial_ratio,
                token_sort_ratio,
                token_set_ratio,
                partial_token_ratio,
                weighted_ratio,
            ] {
                let s = f(a, b);
                assert!((0.0..=100.0).contains(&s), "{a:?} {b:?} -> {s}");
            }
        }
    }
}
