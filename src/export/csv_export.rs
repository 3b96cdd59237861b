use crate::error::ExportError;
use crate::models::MatchResult;
use anyhow::{Context, Result};
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADERS: [&str; 7] = [
    "rank",
    "person_id",
    "name",
    "native_name",
    "gender",
    "score",
    "reason",
];

fn write_row<W: Write>(
    w: &mut Writer<W>,
    rank: usize,
    hit: &MatchResult<'_>,
) -> Result<(), ExportError> {
    let r = hit.record;
    w.write_record([
        rank.to_string().as_str(),
        r.id.as_str(),
        r.name.as_str(),
        r.native_name.as_str(),
        r.gender.as_str(),
        format!("{:.2}", hit.score).as_str(),
        hit.reason.label(),
    ])?;
    Ok(())
}

/// Write ranked results as CSV (header row first, ranks starting at 1).
pub fn write_results_csv<W: Write>(
    writer: W,
    results: &[MatchResult<'_>],
) -> Result<(), ExportError> {
    let mut w = WriterBuilder::new().from_writer(writer);
    w.write_record(HEADERS)?;
    for (idx, hit) in results.iter().enumerate() {
        write_row(&mut w, idx + 1, hit)?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_to_csv(path: &Path, results: &[MatchResult<'_>]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let buf_writer = BufWriter::with_capacity(512 * 1024, file);
    write_results_csv(buf_writer, results)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    log::info!("Wrote {} results to {}", results.len(), path.display());
    Ok(())
}
