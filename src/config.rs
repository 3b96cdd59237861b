use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::matching::phonetic::DEFAULT_PHONETIC_KEY_LEN;
use crate::models::ColumnMapping;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SearchConfig {
    pub min_score: f64,
    pub top_n: usize,
    pub allow_fallback: bool,
    pub phonetic_key_len: usize,
    /// Result size when several partitions are searched together.
    pub merged_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_score: 60.0,
            top_n: 3,
            allow_fallback: false,
            phonetic_key_len: DEFAULT_PHONETIC_KEY_LEN,
            merged_limit: 5,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct DatasetConfig {
    pub male: Option<String>,
    pub female: Option<String>,
    #[serde(default)]
    pub columns: ColumnMapping,
}

impl DatasetConfig {
    pub fn is_empty(&self) -> bool {
        let blank = |p: &Option<String>| p.as_deref().is_none_or(|s| s.trim().is_empty());
        blank(&self.male) && blank(&self.female)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ExportConfig {
    pub out_path: Option<String>,
    pub format: Option<String>, // table|csv
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_path: None,
            format: Some("table".into()),
        }
    }
}

impl ExportConfig {
    /// Parsed format; anything other than "csv" renders as a table.
    pub fn output_format(&self) -> OutputFormat {
        match self.format.as_deref() {
            Some("csv") => OutputFormat::Csv,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub datasets: DatasetConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.search;
        if !(0.0..=100.0).contains(&s.min_score) {
            return Err(ConfigError::InvalidValue {
                field: "search.min_score",
                reason: format!("{} not in 0..=100", s.min_score),
            });
        }
        if s.top_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.top_n",
                reason: "must be > 0".into(),
            });
        }
        if s.merged_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.merged_limit",
                reason: "must be > 0".into(),
            });
        }
        if s.phonetic_key_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.phonetic_key_len",
                reason: "must be > 0".into(),
            });
        }

        if self.datasets.is_empty() {
            return Err(ConfigError::MissingField {
                field: "datasets.male|datasets.female",
            });
        }
        if let Some(field) = self.datasets.columns.blank_required() {
            return Err(ConfigError::MissingField { field });
        }

        if let Some(ref fmt) = self.export.format {
            match fmt.as_str() {
                "table" | "csv" => {}
                other => {
                    return Err(ConfigError::InvalidValue {
                        field: "export.format",
                        reason: format!("unsupported: {}", other),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AppConfig {
        AppConfig {
            datasets: DatasetConfig {
                male: Some("malesf.csv".into()),
                ..DatasetConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn defaults_validate_once_a_dataset_is_set() {
        assert!(valid().validate().is_ok());
        let err = AppConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));
    }

    #[test]
    fn rejects_out_of_range_search_values() {
        let mut cfg = valid();
        cfg.search.min_score = 100.5;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { field: "search.min_score", .. })
        ));

        let mut cfg = valid();
        cfg.search.top_n = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = valid();
        cfg.search.merged_limit = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = valid();
        cfg.search.phonetic_key_len = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_blank_columns_and_unknown_format() {
        let mut cfg = valid();
        cfg.datasets.columns.name = "  ".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingField { field: "datasets.columns.name" })
        ));

        let mut cfg = valid();
        cfg.export.format = Some("xlsx".into());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blank_dataset_paths_count_as_missing() {
        let mut cfg = valid();
        cfg.datasets.male = Some("   ".into());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn output_format_parsing() {
        let mut export = ExportConfig::default();
        assert_eq!(export.output_format(), OutputFormat::Table);
        export.format = Some("csv".into());
        assert_eq!(export.output_format(), OutputFormat::Csv);
    }
}
