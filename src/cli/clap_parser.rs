use crate::config::{AppConfig, DatasetConfig, ExportConfig, SearchConfig};
use crate::error::ConfigError;
use crate::matching::DEFAULT_PHONETIC_KEY_LEN;
use crate::models::ColumnMapping;
use crate::util::partition::PartitionSelector;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, ValueEnum, Debug)]
pub enum FormatOpt {
    Table,
    Csv,
}

impl FormatOpt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Csv => "csv",
        }
    }
}
impl std::fmt::Display for FormatOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum, Debug)]
pub enum GenderOpt {
    Male,
    Female,
    /// Search every dataset and merge the results
    Unknown,
}

impl GenderOpt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        }
    }
}
impl std::fmt::Display for GenderOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<GenderOpt> for PartitionSelector {
    fn from(g: GenderOpt) -> Self {
        match g {
            GenderOpt::Male => PartitionSelector::Male,
            GenderOpt::Female => PartitionSelector::Female,
            GenderOpt::Unknown => PartitionSelector::Unknown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "name_resolver",
    version,
    about = "Resolve a person name (Latin or Devanagari) against reference datasets",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Name to search for
    #[arg(value_name = "QUERY", required_unless_present = "write_env_template")]
    pub query: Option<String>,
    /// Male reference dataset (env: NAME_RESOLVER_MALE_CSV)
    #[arg(long, value_name = "PATH", env = "NAME_RESOLVER_MALE_CSV")]
    pub male: Option<String>,
    /// Female reference dataset (env: NAME_RESOLVER_FEMALE_CSV)
    #[arg(long, value_name = "PATH", env = "NAME_RESOLVER_FEMALE_CSV")]
    pub female: Option<String>,
    /// Which dataset(s) to search
    #[arg(long, value_enum, env = "NAME_RESOLVER_GENDER", default_value_t = GenderOpt::Unknown)]
    pub gender: GenderOpt,
    /// Minimum score (0-100) for a result to be shown
    #[arg(
        long = "min-score",
        value_name = "SCORE",
        env = "NAME_RESOLVER_MIN_SCORE",
        default_value_t = 60.0
    )]
    pub min_score: f64,
    /// Maximum results from a single dataset
    #[arg(
        long = "top-n",
        value_name = "N",
        env = "NAME_RESOLVER_TOP_N",
        default_value_t = 3
    )]
    pub top_n: usize,
    /// Maximum results when several datasets are searched together
    #[arg(
        long = "merged-limit",
        value_name = "N",
        env = "NAME_RESOLVER_MERGED_LIMIT",
        default_value_t = 5
    )]
    pub merged_limit: usize,
    /// Show the best candidates even when none reaches --min-score (env: NAME_RESOLVER_FALLBACK)
    #[arg(long = "fallback", env = "NAME_RESOLVER_FALLBACK")]
    pub fallback: bool,
    /// Phonetic key length
    #[arg(
        long = "phonetic-len",
        value_name = "LEN",
        env = "NAME_RESOLVER_PHONETIC_LEN",
        default_value_t = DEFAULT_PHONETIC_KEY_LEN
    )]
    pub phonetic_len: usize,
    /// Output format
    #[arg(long, value_enum, env = "NAME_RESOLVER_FORMAT", default_value_t = FormatOpt::Table)]
    pub format: FormatOpt,
    /// Write results to this file instead of stdout (CSV)
    #[arg(long = "out", value_name = "PATH", env = "NAME_RESOLVER_OUT")]
    pub out: Option<String>,
    /// Print the signal breakdown of every result
    #[arg(long)]
    pub explain: bool,
    /// Load environment variables from this file instead of ./.env
    #[arg(long = "env-file", value_name = "PATH")]
    pub env_file: Option<PathBuf>,
    /// Write a commented .env template to PATH and exit
    #[arg(long = "write-env-template", value_name = "PATH")]
    pub write_env_template: Option<PathBuf>,
    /// Identifier column
    #[arg(
        long = "col-id",
        value_name = "COLUMN",
        env = "NAME_RESOLVER_COL_ID",
        default_value = "person_id"
    )]
    pub col_id: String,
    /// Primary-script name column
    #[arg(
        long = "col-name",
        value_name = "COLUMN",
        env = "NAME_RESOLVER_COL_NAME",
        default_value = "name_english"
    )]
    pub col_name: String,
    /// Native-script name column; empty to ignore
    #[arg(
        long = "col-native",
        value_name = "COLUMN",
        env = "NAME_RESOLVER_COL_NATIVE",
        default_value = "name_hindi"
    )]
    pub col_native: String,
    /// Alias column; empty to ignore
    #[arg(
        long = "col-aliases",
        value_name = "COLUMN",
        env = "NAME_RESOLVER_COL_ALIASES",
        default_value = "aliases"
    )]
    pub col_aliases: String,
    /// Gender column; empty to ignore
    #[arg(
        long = "col-gender",
        value_name = "COLUMN",
        env = "NAME_RESOLVER_COL_GENDER",
        default_value = "gender"
    )]
    pub col_gender: String,
}

fn optional_column(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

impl Cli {
    pub fn to_app_config(&self) -> Result<AppConfig, ConfigError> {
        let cfg = AppConfig {
            search: SearchConfig {
                min_score: self.min_score,
                top_n: self.top_n,
                allow_fallback: self.fallback,
                phonetic_key_len: self.phonetic_len,
                merged_limit: self.merged_limit,
            },
            datasets: DatasetConfig {
                male: self.male.clone(),
                female: self.female.clone(),
                columns: ColumnMapping {
                    id: self.col_id.trim().to_string(),
                    name: self.col_name.trim().to_string(),
                    native_name: optional_column(&self.col_native),
                    aliases: optional_column(&self.col_aliases),
                    gender: optional_column(&self.col_gender),
                },
            },
            export: ExportConfig {
                out_path: self.out.clone(),
                format: Some(self.format.as_str().into()),
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }
}
