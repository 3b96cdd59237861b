//! CSV reference datasets.

use crate::error::DatasetError;
use crate::models::{ColumnMapping, Gender, RawRecord};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

fn header_key(h: &str) -> String {
    h.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    let wanted = header_key(name);
    headers.iter().position(|h| header_key(h) == wanted)
}

fn required_column(headers: &StringRecord, name: &str) -> Result<usize, DatasetError> {
    find_column(headers, name).ok_or_else(|| DatasetError::MissingColumn {
        column: name.to_string(),
    })
}

fn optional_column(headers: &StringRecord, name: Option<&str>) -> Option<usize> {
    let name = name.filter(|n| !n.trim().is_empty())?;
    let idx = find_column(headers, name);
    if idx.is_none() {
        log::debug!("Optional column '{}' not present", name);
    }
    idx
}

fn cell(row: &StringRecord, idx: Option<usize>) -> Option<String> {
    let value = row.get(idx?)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Read person records from CSV text with a header row. Header names are
/// matched case-insensitively; a leading byte-order mark is ignored.
pub fn read_records<R: Read>(
    reader: R,
    mapping: &ColumnMapping,
) -> Result<Vec<RawRecord>, DatasetError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let idx_id = required_column(&headers, &mapping.id)?;
    let idx_name = required_column(&headers, &mapping.name)?;
    let idx_native = optional_column(&headers, mapping.native_name.as_deref());
    let idx_aliases = optional_column(&headers, mapping.aliases.as_deref());
    let idx_gender = optional_column(&headers, mapping.gender.as_deref());

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (line, result) in rdr.records().enumerate() {
        let row = result?;
        let Some(id) = cell(&row, Some(idx_id)) else {
            skipped += 1;
            log::warn!("Skipping data row {} with empty '{}'", line + 1, mapping.id);
            continue;
        };
        records.push(RawRecord {
            id,
            name: cell(&row, Some(idx_name)).unwrap_or_default(),
            native_name: cell(&row, idx_native),
            aliases: cell(&row, idx_aliases),
            gender: cell(&row, idx_gender)
                .map(|g| Gender::from_tag(&g))
                .unwrap_or_default(),
        });
    }
    if skipped > 0 {
        log::warn!("Skipped {} rows without an identifier", skipped);
    }
    Ok(records)
}

pub fn load_records(path: &Path, mapping: &ColumnMapping) -> Result<Vec<RawRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let records = read_records(BufReader::new(file), mapping)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}Person_ID,name_english,name_hindi,aliases,gender\n\
        1,Priya Sharma,प्रिया शर्मा,Pinky;Pia,F\n\
        2,Rahul Verma,,,male\n\
        ,Nameless,,,\n\
        3,Sunita Devi,सुनीता देवी,,x\n";

    #[test]
    fn reads_all_columns_with_bom_and_mixed_case_headers() {
        let recs = read_records(SAMPLE.as_bytes(), &ColumnMapping::default()).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].id, "1");
        assert_eq!(recs[0].native_name.as_deref(), Some("प्रिया शर्मा"));
        assert_eq!(recs[0].aliases.as_deref(), Some("Pinky;Pia"));
        assert_eq!(recs[0].gender, Gender::Female);
        assert_eq!(recs[1].native_name, None);
        assert_eq!(recs[1].gender, Gender::Male);
        assert_eq!(recs[2].gender, Gender::Unknown);
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let csv = "person_id,name_english\n10,Anil Kapoor\n";
        let recs = read_records(csv.as_bytes(), &ColumnMapping::default()).unwrap();
        assert_eq!(recs, vec![RawRecord::new("10", "Anil Kapoor")]);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let csv = "id,full_name\n1,X\n";
        let err = read_records(csv.as_bytes(), &ColumnMapping::default()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingColumn { ref column } if column == "person_id"
        ));
    }

    #[test]
    fn custom_mapping() {
        let csv = "id,full_name,sex\n5,Kiran Rao,M\n";
        let mapping = ColumnMapping {
            id: "id".into(),
            name: "full_name".into(),
            native_name: None,
            aliases: None,
            gender: Some("sex".into()),
        };
        let recs = read_records(csv.as_bytes(), &mapping).unwrap();
        assert_eq!(recs[0].gender, Gender::Male);
    }

    #[test]
    fn load_from_file() {
        let path =
            std::env::temp_dir().join(format!("name_resolver_ds_{}.csv", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let recs = load_records(&path, &ColumnMapping::default()).unwrap();
        assert_eq!(recs.len(), 3);
        let _ = std::fs::remove_file(&path);

        assert!(load_records(&path, &ColumnMapping::default()).is_err());
    }
}
