//! Multi-signal similarity between a query profile and one prepared record.

use super::fuzz::{partial_ratio, ratio, token_set_ratio, token_sort_ratio, weighted_ratio};
use crate::models::{MatchReason, PreparedRecord, QueryProfile};

/// Flat bonus when one normalized name contains the other.
pub const SUBSTRING_BOOST: f64 = 15.0;

/// Raw, unweighted signal values, each on a 0-100 scale (the substring boost is
/// either 0 or [`SUBSTRING_BOOST`]).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Signals {
    pub full_ratio: f64,
    pub partial_ratio: f64,
    pub token_set_ratio: f64,
    pub token_sort_ratio: f64,
    pub alias_best: f64,
    pub first_name: f64,
    pub substring_boost: f64,
    pub phonetic: f64,
    pub cross_script: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    SingleToken,
    MultiToken,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::SingleToken => "single-token",
            Regime::MultiToken => "multi-token",
        }
    }
}

struct Weights {
    roman: f64,
    partial: f64,
    first_name: f64,
    alias: f64,
    phonetic: f64,
    cross_script: f64,
}

const SINGLE_TOKEN_WEIGHTS: Weights = Weights {
    roman: 0.35,
    partial: 0.25,
    first_name: 0.20,
    alias: 0.10,
    phonetic: 0.05,
    cross_script: 0.05,
};

// partial alignment is folded into `roman` for multi-token queries
const MULTI_TOKEN_WEIGHTS: Weights = Weights {
    roman: 0.55,
    partial: 0.0,
    first_name: 0.0,
    alias: 0.10,
    phonetic: 0.20,
    cross_script: 0.15,
};

/// Everything that went into one score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// `None` when the exact-match short-circuit fired.
    pub signals: Option<Signals>,
    pub regime: Regime,
    pub score: f64,
    pub reason: MatchReason,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn contains_either(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// A key carries sound information only if it holds a consonant class digit;
/// the all-zero key of a name without consonants says nothing.
fn has_consonant_class(key: &str) -> bool {
    key.bytes().any(|b| matches!(b, b'1'..=b'7'))
}

fn compute_signals(query: &QueryProfile, record: &PreparedRecord) -> Signals {
    let q = query.normalized.as_str();
    let name = record.normalized_name.as_str();

    let alias_best = record
        .aliases
        .iter()
        .map(|alias| weighted_ratio(q, alias))
        .fold(0.0, f64::max);
    let first_name = if query.single_token {
        weighted_ratio(q, &record.first_token)
    } else {
        0.0
    };
    let substring_boost = if contains_either(q, name) {
        SUBSTRING_BOOST
    } else {
        0.0
    };
    let phonetic = if record.native_name.is_empty()
        || !has_consonant_class(&query.phonetic_key)
        || !has_consonant_class(&record.phonetic_key)
    {
        0.0
    } else {
        ratio(&query.phonetic_key, &record.phonetic_key)
    };
    let cross_script = if query.native.is_empty() {
        0.0
    } else {
        weighted_ratio(&query.native, &record.native_name)
    };

    Signals {
        full_ratio: weighted_ratio(q, name),
        partial_ratio: partial_ratio(q, name),
        token_set_ratio: token_set_ratio(q, name),
        token_sort_ratio: token_sort_ratio(q, name),
        alias_best,
        first_name,
        substring_boost,
        phonetic,
        cross_script,
    }
}

fn fuse(signals: &Signals, regime: Regime) -> f64 {
    let s = signals;
    let (w, roman) = match regime {
        Regime::SingleToken => (
            &SINGLE_TOKEN_WEIGHTS,
            s.full_ratio.max(s.token_set_ratio).max(s.token_sort_ratio),
        ),
        Regime::MultiToken => (
            &MULTI_TOKEN_WEIGHTS,
            s.full_ratio
                .max(s.partial_ratio)
                .max(s.token_set_ratio)
                .max(s.token_sort_ratio),
        ),
    };
    roman * w.roman
        + s.partial_ratio * w.partial
        + s.first_name * w.first_name
        + s.alias_best * w.alias
        + s.phonetic * w.phonetic
        + s.cross_script * w.cross_script
}

/// Largest raw signal wins; on a tie the earlier entry wins.
fn dominant_reason(s: &Signals) -> MatchReason {
    let candidates = [
        (MatchReason::StringSimilarity, s.full_ratio),
        (MatchReason::AliasMatch, s.alias_best),
        (MatchReason::FirstNameMatch, s.first_name),
        (MatchReason::PhoneticMatch, s.phonetic),
        (MatchReason::CrossScriptMatch, s.cross_script),
        (MatchReason::SubstringBoost, s.substring_boost),
    ];
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// Score one record against a query and report every signal involved.
pub fn explain(query: &QueryProfile, record: &PreparedRecord) -> ScoreBreakdown {
    let regime = if query.single_token {
        Regime::SingleToken
    } else {
        Regime::MultiToken
    };

    if !query.normalized.is_empty() && record.forms.contains(&query.normalized) {
        return ScoreBreakdown {
            signals: None,
            regime,
            score: 100.0,
            reason: MatchReason::ExactMatch,
        };
    }

    let signals = compute_signals(query, record);
    let fused = fuse(&signals, regime) + signals.substring_boost;
    ScoreBreakdown {
        signals: Some(signals),
        regime,
        score: round2(fused.clamp(0.0, 100.0)),
        reason: dominant_reason(&signals),
    }
}

/// Final score in 0..=100 (two decimals) and the dominant reason.
pub fn score(query: &QueryProfile, record: &PreparedRecord) -> (f64, MatchReason) {
    let b = explain(query, record);
    (b.score, b.reason)
}
