use std::collections::HashMap;

use crate::config::SearchConfig;
use crate::models::{MatchResult, PreparedRecords};

pub mod fuzz;
pub mod phonetic;
pub mod prepare;
pub mod query;
pub mod scorer;

pub use phonetic::{DEFAULT_PHONETIC_KEY_LEN, phonetic_key};
pub use prepare::{prepare, prepare_with_key_len};
pub use query::build_query;
pub use scorer::{ScoreBreakdown, Signals, explain, score};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Inclusive lower bound on the score of returned results.
    pub min_score: f64,
    pub top_n: usize,
    /// Return the best `top_n` regardless of score when nothing clears `min_score`.
    pub allow_fallback: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_score: 60.0,
            top_n: 3,
            allow_fallback: false,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(cfg: &SearchConfig) -> Self {
        Self {
            min_score: cfg.min_score,
            top_n: cfg.top_n,
            allow_fallback: cfg.allow_fallback,
        }
    }
}

/// Rank every record of one collection against `query_text`.
///
/// Results are sorted by score descending; equal scores keep record order.
/// Nothing below `min_score` is returned unless `allow_fallback` is set and no
/// record reached the threshold. Blank queries, and queries that normalize to
/// nothing, return no results.
pub fn search<'a>(
    query_text: &str,
    records: &'a PreparedRecords,
    options: &SearchOptions,
) -> Vec<MatchResult<'a>> {
    if query_text.trim().is_empty() {
        log::debug!("empty query, skipping search");
        return Vec::new();
    }
    let query = build_query(query_text, records.phonetic_key_len());
    if query.normalized.is_empty() {
        log::debug!("query {:?} normalizes to nothing, skipping search", query_text);
        return Vec::new();
    }

    // scores go into a per-call list; the record set itself is never touched
    let mut results: Vec<MatchResult<'a>> = records
        .iter()
        .map(|record| {
            let (score, reason) = score(&query, record);
            MatchResult {
                record,
                score,
                reason,
            }
        })
        .collect();
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    let passing = results
        .iter()
        .take_while(|r| r.score >= options.min_score)
        .count();
    if passing == 0 && options.allow_fallback {
        log::debug!(
            "no record reached {:.2} for {:?}; falling back to best {}",
            options.min_score,
            query_text,
            options.top_n
        );
        results.truncate(options.top_n);
    } else {
        results.truncate(passing.min(options.top_n));
    }
    results
}

/// Search several record collections and merge the hits.
///
/// Each collection is searched for `final_size * 2` candidates, duplicates by
/// record id keep their best score (the earlier collection wins a tie) and the
/// merged list is re-sorted and cut to `final_size`. `options.top_n` is not
/// used; `final_size` takes its place.
pub fn search_partitions<'a>(
    query_text: &str,
    partitions: &[&'a PreparedRecords],
    options: &SearchOptions,
    final_size: usize,
) -> Vec<MatchResult<'a>> {
    let per_partition = SearchOptions {
        top_n: final_size.saturating_mul(2),
        allow_fallback: false,
        ..*options
    };
    let mut merged = merge_partitions(query_text, partitions, &per_partition);

    if merged.is_empty() && options.allow_fallback {
        log::debug!("no partition produced a match for {:?}; falling back", query_text);
        let fallback = SearchOptions {
            allow_fallback: true,
            ..per_partition
        };
        merged = merge_partitions(query_text, partitions, &fallback);
    }

    merged.sort_by(|a, b| b.score.total_cmp(&a.score));
    merged.truncate(final_size);
    merged
}

fn merge_partitions<'a>(
    query_text: &str,
    partitions: &[&'a PreparedRecords],
    options: &SearchOptions,
) -> Vec<MatchResult<'a>> {
    let mut merged: Vec<MatchResult<'a>> = Vec::new();
    let mut seen: HashMap<&'a str, usize> = HashMap::new();
    for &records in partitions {
        for hit in search(query_text, records, options) {
            match seen.get(hit.record.id.as_str()) {
                Some(&idx) => {
                    if hit.score > merged[idx].score {
                        merged[idx] = hit;
                    }
                }
                None => {
                    seen.insert(hit.record.id.as_str(), merged.len());
                    merged.push(hit);
                }
            }
        }
    }
    merged
}
