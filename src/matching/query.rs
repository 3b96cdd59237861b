use super::phonetic::phonetic_key;
use crate::models::{QueryProfile, Script};
use crate::normalize::{is_native_script, normalize};
use crate::transliterate::{to_latin, to_native_script};

/// Build the comparison profile of a raw query.
///
/// Devanagari input is normalized through its romanization (or directly, if
/// it cannot be romanized) and keeps the raw text as its native form. Latin
/// input is normalized and transliterated to get a best-effort native form.
pub fn build_query(raw: &str, phonetic_key_len: usize) -> QueryProfile {
    let (script, normalized, native) = if is_native_script(raw) {
        let normalized = match to_latin(raw) {
            Ok(latin) => normalize(&latin),
            Err(e) => {
                log::debug!("romanization failed for query {:?}: {}", raw, e);
                normalize(raw)
            }
        };
        let native = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        (Script::Devanagari, normalized, native)
    } else {
        let normalized = normalize(raw);
        let native = to_native_script(&normalized);
        (Script::Latin, normalized, native)
    };

    let phonetic_key = if native.is_empty() {
        String::new()
    } else {
        phonetic_key(&native, phonetic_key_len)
    };
    let single_token = normalized.split_whitespace().count() <= 1;

    QueryProfile {
        raw: raw.to_string(),
        script,
        normalized,
        native,
        phonetic_key,
        single_token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_query_gets_native_form() {
        let q = build_query("Mr. Priyaa", 6);
        assert_eq!(q.script, Script::Latin);
        assert_eq!(q.normalized, "priyaa");
        assert_eq!(q.native, "प्रिया");
        assert_eq!(q.phonetic_key, "560000");
        assert!(q.single_token);
    }

    #[test]
    fn devanagari_query_round_trips_through_latin() {
        let q = build_query("  प्रिया   शर्मा ", 6);
        assert_eq!(q.script, Script::Devanagari);
        assert_eq!(q.normalized, "priya sharma");
        assert_eq!(q.native, "प्रिया शर्मा");
        assert_eq!(q.phonetic_key, "567650");
        assert!(!q.single_token);
    }

    #[test]
    fn unromanizable_native_query_falls_back() {
        // Bengali KA inside Devanagari text fails strict romanization
        let q = build_query("रा\u{0995}", 6);
        assert_eq!(q.script, Script::Devanagari);
        // the raw text is folded directly, the Bengali letter included
        assert!(q.normalized.starts_with("ra"), "{:?}", q.normalized);
        assert!(q.normalized.chars().all(|c| c.is_ascii_lowercase()));
        assert_eq!(q.native, "रा\u{0995}");
    }

    #[test]
    fn diacritics_are_folded_before_transliteration() {
        let q = build_query("José", 6);
        assert_eq!(q.normalized, "jose");
        assert_eq!(q.native, "जोसे");
    }

    #[test]
    fn empty_query_has_no_phonetic_key() {
        let q = build_query("", 6);
        assert_eq!(q.native, "");
        assert_eq!(q.phonetic_key, "");
        assert!(q.single_token);
    }
}
