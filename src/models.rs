use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Lenient parse of a dataset gender cell ("M", "male", "F", "Female", ...).
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Gender::Male,
            "f" | "female" => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        }
    }
}

/// A person row as it comes out of a dataset, before any derived keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub name: String,
    pub native_name: Option<String>,
    /// Separator-delimited alternate names (`;`, `,` or `|`).
    pub aliases: Option<String>,
    #[serde(default)]
    pub gender: Gender,
}

impl RawRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            native_name: None,
            aliases: None,
            gender: Gender::Unknown,
        }
    }

    pub fn with_native(mut self, native: impl Into<String>) -> Self {
        self.native_name = Some(native.into());
        self
    }

    pub fn with_aliases(mut self, aliases: impl Into<String>) -> Self {
        self.aliases = Some(aliases.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }
}

/// A record with every comparison key precomputed. Built once by
/// [`crate::matching::prepare`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct PreparedRecord {
    pub id: String,
    pub name: String,
    /// Empty when the source had no native-script name.
    pub native_name: String,
    pub gender: Gender,
    pub normalized_name: String,
    /// All zeros when there is no native-script name.
    pub phonetic_key: String,
    /// Normalized, non-empty aliases.
    pub aliases: Vec<String>,
    pub tokens: Vec<String>,
    pub first_token: String,
    /// Only set for names with two or more tokens.
    pub last_token: String,
    /// normalized name, aliases, first and last token; never contains "".
    pub forms: HashSet<String>,
}

/// Immutable collection of prepared records. Searches borrow it; there is no
/// mutable access after preparation.
#[derive(Debug, Clone, Default)]
pub struct PreparedRecords {
    records: Vec<PreparedRecord>,
    phonetic_key_len: usize,
}

impl PreparedRecords {
    pub(crate) fn new(records: Vec<PreparedRecord>, phonetic_key_len: usize) -> Self {
        Self {
            records,
            phonetic_key_len,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PreparedRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PreparedRecord> {
        self.records.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&PreparedRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Length of the phonetic keys stored on every record; queries must be
    /// encoded with the same length.
    pub fn phonetic_key_len(&self) -> usize {
        self.phonetic_key_len
    }
}

impl<'a> IntoIterator for &'a PreparedRecords {
    type Item = &'a PreparedRecord;
    type IntoIter = std::slice::Iter<'a, PreparedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    Devanagari,
}

/// Derived view of one search query.
#[derive(Debug, Clone)]
pub struct QueryProfile {
    pub raw: String,
    pub script: Script,
    pub normalized: String,
    /// Native-script form; empty when none could be produced.
    pub native: String,
    /// Empty when `native` is empty.
    pub phonetic_key: String,
    pub single_token: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchReason {
    ExactMatch,
    StringSimilarity,
    AliasMatch,
    FirstNameMatch,
    PhoneticMatch,
    CrossScriptMatch,
    SubstringBoost,
}

impl MatchReason {
    pub fn label(&self) -> &'static str {
        match self {
            MatchReason::ExactMatch => "Exact Match",
            MatchReason::StringSimilarity => "String Similarity",
            MatchReason::AliasMatch => "Alias Match",
            MatchReason::FirstNameMatch => "First Name Match",
            MatchReason::PhoneticMatch => "Phonetic Match",
            MatchReason::CrossScriptMatch => "Cross-Script Match",
            MatchReason::SubstringBoost => "Substring Boost",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One ranked hit. Borrows the record from the collection it was found in.
#[derive(Debug, Clone, Copy)]
pub struct MatchResult<'a> {
    pub record: &'a PreparedRecord,
    /// 0..=100, rounded to two decimals.
    pub score: f64,
    pub reason: MatchReason,
}

// Column mapping for dataset files; maps source header names to record fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub id: String,
    pub name: String,
    pub native_name: Option<String>,
    pub aliases: Option<String>,
    pub gender: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            id: "person_id".into(),
            name: "name_english".into(),
            native_name: Some("name_hindi".into()),
            aliases: Some("aliases".into()),
            gender: Some("gender".into()),
        }
    }
}

impl ColumnMapping {
    /// Config path of the first required column left blank, if any.
    pub fn blank_required(&self) -> Option<&'static str> {
        if self.id.trim().is_empty() {
            Some("datasets.columns.id")
        } else if self.name.trim().is_empty() {
            Some("datasets.columns.name")
        } else {
            None
        }
    }
}
