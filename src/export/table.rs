//! Plain-text rendering for terminal output.

use crate::matching::ScoreBreakdown;
use crate::models::MatchResult;
use std::fmt::Write as _;

const HEADERS: [&str; 6] = ["#", "person_id", "name", "native_name", "score", "reason"];

fn pad(out: &mut String, cell: &str, width: usize) {
    out.push_str(cell);
    for _ in cell.chars().count()..width {
        out.push(' ');
    }
}

/// Aligned table, one row per hit, widths measured in chars.
pub fn render_table(results: &[MatchResult<'_>]) -> String {
    let rows: Vec<[String; 6]> = results
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            [
                (i + 1).to_string(),
                hit.record.id.clone(),
                hit.record.name.clone(),
                hit.record.native_name.clone(),
                format!("{:.2}", hit.score),
                hit.reason.label().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut line = |cells: &[&str]| {
        let mut s = String::new();
        for (idx, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
            if idx > 0 {
                s.push_str("  ");
            }
            pad(&mut s, cell, *width);
        }
        out.push_str(s.trim_end());
        out.push('\n');
    };
    line(&HEADERS);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        line(&cells);
    }
    out
}

/// Multi-line description of how one score was reached.
pub fn render_breakdown(id: &str, b: &ScoreBreakdown) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {:.2} ({}, {})",
        id,
        b.score,
        b.reason,
        b.regime.as_str()
    );
    match &b.signals {
        None => out.push_str("  exact match on a normalized form\n"),
        Some(s) => {
            let signals = [
                ("full_ratio", s.full_ratio),
                ("partial_ratio", s.partial_ratio),
                ("token_set_ratio", s.token_set_ratio),
                ("token_sort_ratio", s.token_sort_ratio),
                ("alias_best", s.alias_best),
                ("first_name", s.first_name),
                ("substring_boost", s.substring_boost),
                ("phonetic", s.phonetic),
                ("cross_script", s.cross_script),
            ];
            for (name, value) in signals {
                let _ = writeln!(out, "  {:<16} {:>6.2}", name, value);
            }
        }
    }
    out
}
