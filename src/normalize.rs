use crate::transliterate::romanize_lossy;
use deunicode::deunicode_char;
use unicode_normalization::char::is_combining_mark;

/// Leading titles dropped before comparison.
const HONORIFICS: &[&str] = &["mr", "mrs", "ms", "smt", "shri", "dr", "prof"];

const DEVANAGARI_START: char = '\u{0900}';
const DEVANAGARI_END: char = '\u{097F}';

#[inline]
pub(crate) fn is_devanagari_char(c: char) -> bool {
    (DEVANAGARI_START..=DEVANAGARI_END).contains(&c)
}

/// True iff any code point of `text` falls in the Devanagari block.
pub fn is_native_script(text: &str) -> bool {
    text.chars().any(is_devanagari_char)
}

/// Canonical comparison form of a person name: lowercase ASCII letters, digits
/// and single spaces, with leading honorifics removed.
///
/// Total and idempotent: any input (including empty) yields a string, and
/// `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let folded = fold_to_ascii(&raw.to_lowercase());
    // First pass sees periods, so "dr.sharma" loses its title before the
    // period is stripped; second pass catches titles exposed by the cleanup.
    let untitled = strip_honorifics(&folded, true);
    let cleaned = keep_name_chars(untitled);
    strip_honorifics(&cleaned, false).to_string()
}

/// Map every character to a close ASCII spelling. Devanagari runs are
/// romanized; other letters and combining marks go through `deunicode` (a bare
/// accent folds to nothing); whitespace becomes a space and everything else is
/// removed.
fn fold_to_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut native_run = String::new();
    for ch in s.chars() {
        if is_devanagari_char(ch) {
            native_run.push(ch);
            continue;
        }
        if !native_run.is_empty() {
            out.push_str(&romanize_lossy(&native_run));
            native_run.clear();
        }
        if ch.is_ascii() {
            out.push(ch);
        } else if ch.is_whitespace() {
            out.push(' ');
        } else if ch.is_alphanumeric() || is_combining_mark(ch) {
            out.push_str(deunicode_char(ch).unwrap_or_default());
        }
    }
    if !native_run.is_empty() {
        out.push_str(&romanize_lossy(&native_run));
    }
    out.make_ascii_lowercase();
    out
}

/// Remove leading honorific tokens. A title only counts as a whole token: it
/// must be followed by whitespace, the end of input, or (when `allow_period`)
/// a period.
fn strip_honorifics(s: &str, allow_period: bool) -> &str {
    let mut rest = s.trim_start();
    'titles: loop {
        for title in HONORIFICS {
            let Some(after) = rest.strip_prefix(title) else {
                continue;
            };
            let (after, had_period) = match after.strip_prefix('.') {
                Some(after_period) if allow_period => (after_period, true),
                _ => (after, false),
            };
            if had_period || after.is_empty() || after.starts_with(char::is_whitespace) {
                rest = after.trim_start();
                continue 'titles;
            }
        }
        return rest;
    }
}

/// Keep `[a-z0-9]`, collapse whitespace runs to one space, trim.
fn keep_name_chars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
        } else if ch.is_whitespace() && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}
