use std::collections::HashSet;

use super::phonetic::{DEFAULT_PHONETIC_KEY_LEN, phonetic_key};
use crate::models::{PreparedRecord, PreparedRecords, RawRecord};
use crate::normalize::normalize;

const ALIAS_SEPARATORS: &[char] = &[';', ',', '|'];

/// Split a raw alias cell and normalize every piece, dropping empties.
pub fn split_aliases(raw: &str) -> Vec<String> {
    raw.split(ALIAS_SEPARATORS)
        .map(normalize)
        .filter(|a| !a.is_empty())
        .collect()
}

fn prepare_one(raw: RawRecord, key_len: usize) -> PreparedRecord {
    let normalized_name = normalize(&raw.name);
    let native_name = raw
        .native_name
        .map(|n| n.trim().to_string())
        .unwrap_or_default();
    let phonetic_key = phonetic_key(&native_name, key_len);
    let aliases = raw
        .aliases
        .as_deref()
        .map(split_aliases)
        .unwrap_or_default();

    let tokens: Vec<String> = normalized_name
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let first_token = tokens.first().cloned().unwrap_or_default();
    let last_token = if tokens.len() >= 2 {
        tokens.last().cloned().unwrap_or_default()
    } else {
        String::new()
    };

    let forms: HashSet<String> = std::iter::once(&normalized_name)
        .chain([&first_token, &last_token])
        .chain(aliases.iter())
        .filter(|f| !f.is_empty())
        .cloned()
        .collect();

    PreparedRecord {
        id: raw.id,
        name: raw.name,
        native_name,
        gender: raw.gender,
        normalized_name,
        phonetic_key,
        aliases,
        tokens,
        first_token,
        last_token,
        forms,
    }
}

/// Precompute every comparison key for a batch of records, using the default
/// phonetic key length.
pub fn prepare<I>(records: I) -> PreparedRecords
where
    I: IntoIterator<Item = RawRecord>,
{
    prepare_with_key_len(records, DEFAULT_PHONETIC_KEY_LEN)
}

pub fn prepare_with_key_len<I>(records: I, phonetic_key_len: usize) -> PreparedRecords
where
    I: IntoIterator<Item = RawRecord>,
{
    let prepared: Vec<PreparedRecord> = records
        .into_iter()
        .map(|r| prepare_one(r, phonetic_key_len))
        .collect();
    let with_native = prepared.iter().filter(|r| !r.native_name.is_empty()).count();
    let with_aliases = prepared.iter().filter(|r| !r.aliases.is_empty()).count();
    log::info!(
        "Prepared {} records ({} with native-script name, {} with aliases)",
        prepared.len(),
        with_native,
        with_aliases
    );
    PreparedRecords::new(prepared, phonetic_key_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[test]
    fn test_prepare_derives_all_keys() {
        let raw = RawRecord::new("p1", "Dr. Priya  Sharma")
            .with_native("प्रिया शर्मा")
            .with_aliases("Pia; P. Sharma,|")
            .with_gender(Gender::Female);
        let recs = prepare(vec![raw]);
        assert_eq!(recs.len(), 1);
        let r = recs.get(0).unwrap();
        assert_eq!(r.normalized_name, "priya sharma");
        assert_eq!(r.tokens, vec!["priya", "sharma"]);
        assert_eq!(r.first_token, "priya");
        assert_eq!(r.last_token, "sharma");
        assert_eq!(r.aliases, vec!["pia", "p sharma"]);
        assert_eq!(r.phonetic_key, "567650");
        assert_eq!(r.gender, Gender::Female);
        for form in ["priya sharma", "priya", "sharma", "pia", "p sharma"] {
            assert!(r.forms.contains(form), "missing form {form}");
        }
        assert_eq!(r.forms.len(), 5);
    }

    #[test]
    fn test_single_token_has_no_last_token() {
        let recs = prepare(vec![RawRecord::new("p2", "Anand")]);
        let r = recs.find("p2").unwrap();
        assert_eq!(r.first_token, "anand");
        assert_eq!(r.last_token, "");
        assert!(!r.forms.contains(""));
        assert_eq!(r.phonetic_key, "000000");
        assert!(r.aliases.is_empty());
    }

    #[test]
    fn test_empty_name_yields_empty_forms() {
        let recs = prepare(vec![RawRecord::new("p3", "  ")]);
        let r = recs.get(0).unwrap();
        assert!(r.tokens.is_empty());
        assert_eq!(r.first_token, "");
        assert!(r.forms.is_empty());
    }

    #[test]
    fn test_prepare_is_deterministic() {
        let input = || {
            vec![
                RawRecord::new("a", "Rahul Verma").with_native("राहुल वर्मा"),
                RawRecord::new("b", "Sunita").with_aliases("Sunny"),
            ]
        };
        let a = prepare(input());
        let b = prepare(input());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.normalized_name, y.normalized_name);
            assert_eq!(x.phonetic_key, y.phonetic_key);
            assert_eq!(x.forms, y.forms);
        }
    }

    #[test]
    fn test_custom_key_length() {
        let recs = prepare_with_key_len(vec![RawRecord::new("x", "Ram").with_native("राम")], 4);
        assert_eq!(recs.phonetic_key_len(), 4);
        assert_eq!(recs.get(0).unwrap().phonetic_key, "6500");
    }
}
