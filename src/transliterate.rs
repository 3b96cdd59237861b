//! Best-effort transliteration between Latin (ITRANS romanization) and Devanagari.
//!
//! Both directions are table driven. The strict entry points report the first
//! character they cannot place; [`to_native_script`] swallows that error and
//! returns an empty string so callers can treat "no native form" uniformly.

use crate::error::TransliterationError;
use crate::normalize::is_devanagari_char;

const VIRAMA: char = '\u{094D}';
const NUKTA: char = '\u{093C}';
const ZWNJ: char = '\u{200C}';
const ZWJ: char = '\u{200D}';

/// Longest ITRANS token, in chars ("RRi", "chh", "kSh", ".Dh", ...).
const MAX_TOKEN_CHARS: usize = 3;

#[derive(Debug, Clone, Copy)]
enum Itrans {
    /// Independent vowel letter and the dependent sign used after a consonant.
    /// `sign == None` is the inherent `a`.
    Vowel {
        letter: char,
        sign: Option<char>,
    },
    Consonant(&'static str),
    /// Anusvara, visarga, chandrabindu: attach to the preceding syllable.
    Modifier(char),
    /// Stand-alone symbols (digits, dandas, avagraha, om).
    Symbol(&'static str),
}

static ITRANS_TOKENS: &[(&str, Itrans)] = &[
    // vowels
    ("a", Itrans::Vowel { letter: 'अ', sign: None }),
    ("aa", Itrans::Vowel { letter: 'आ', sign: Some('ा') }),
    ("A", Itrans::Vowel { letter: 'आ', sign: Some('ा') }),
    ("i", Itrans::Vowel { letter: 'इ', sign: Some('ि') }),
    ("ii", Itrans::Vowel { letter: 'ई', sign: Some('ी') }),
    ("I", Itrans::Vowel { letter: 'ई', sign: Some('ी') }),
    ("ee", Itrans::Vowel { letter: 'ई', sign: Some('ी') }),
    ("u", Itrans::Vowel { letter: 'उ', sign: Some('ु') }),
    ("uu", Itrans::Vowel { letter: 'ऊ', sign: Some('ू') }),
    ("U", Itrans::Vowel { letter: 'ऊ', sign: Some('ू') }),
    ("oo", Itrans::Vowel { letter: 'ऊ', sign: Some('ू') }),
    ("RRi", Itrans::Vowel { letter: 'ऋ', sign: Some('ृ') }),
    ("R^i", Itrans::Vowel { letter: 'ऋ', sign: Some('ृ') }),
    ("e", Itrans::Vowel { letter: 'ए', sign: Some('े') }),
    ("ai", Itrans::Vowel { letter: 'ऐ', sign: Some('ै') }),
    ("o", Itrans::Vowel { letter: 'ओ', sign: Some('ो') }),
    ("au", Itrans::Vowel { letter: 'औ', sign: Some('ौ') }),
    // velars
    ("k", Itrans::Consonant("क")),
    ("kh", Itrans::Consonant("ख")),
    ("g", Itrans::Consonant("ग")),
    ("gh", Itrans::Consonant("घ")),
    ("~N", Itrans::Consonant("ङ")),
    // palatals
    ("c", Itrans::Consonant("च")),
    ("ch", Itrans::Consonant("च")),
    ("Ch", Itrans::Consonant("छ")),
    ("chh", Itrans::Consonant("छ")),
    ("j", Itrans::Consonant("ज")),
    ("jh", Itrans::Consonant("झ")),
    ("~n", Itrans::Consonant("ञ")),
    // retroflexes
    ("T", Itrans::Consonant("ट")),
    ("Th", Itrans::Consonant("ठ")),
    ("D", Itrans::Consonant("ड")),
    ("Dh", Itrans::Consonant("ढ")),
    ("N", Itrans::Consonant("ण")),
    // dentals
    ("t", Itrans::Consonant("त")),
    ("th", Itrans::Consonant("थ")),
    ("d", Itrans::Consonant("द")),
    ("dh", Itrans::Consonant("ध")),
    ("n", Itrans::Consonant("न")),
    // labials
    ("p", Itrans::Consonant("प")),
    ("ph", Itrans::Consonant("फ")),
    ("b", Itrans::Consonant("ब")),
    ("bh", Itrans::Consonant("भ")),
    ("m", Itrans::Consonant("म")),
    // semivowels, sibilants, glottal
    ("y", Itrans::Consonant("य")),
    ("r", Itrans::Consonant("र")),
    ("l", Itrans::Consonant("ल")),
    ("v", Itrans::Consonant("व")),
    ("w", Itrans::Consonant("व")),
    ("sh", Itrans::Consonant("श")),
    ("Sh", Itrans::Consonant("ष")),
    ("s", Itrans::Consonant("स")),
    ("h", Itrans::Consonant("ह")),
    ("L", Itrans::Consonant("ळ")),
    // conjuncts
    ("x", Itrans::Consonant("क्ष")),
    ("kSh", Itrans::Consonant("क्ष")),
    ("GY", Itrans::Consonant("ज्ञ")),
    ("j~n", Itrans::Consonant("ज्ञ")),
    // nukta letters
    ("q", Itrans::Consonant("\u{0958}")),
    ("K", Itrans::Consonant("\u{0959}")),
    ("G", Itrans::Consonant("\u{095A}")),
    ("z", Itrans::Consonant("\u{095B}")),
    (".D", Itrans::Consonant("\u{095C}")),
    (".Dh", Itrans::Consonant("\u{095D}")),
    ("f", Itrans::Consonant("\u{095E}")),
    // signs
    ("M", Itrans::Modifier('ं')),
    (".n", Itrans::Modifier('ं')),
    ("H", Itrans::Modifier('ः')),
    (".N", Itrans::Modifier('ँ')),
    (".a", Itrans::Symbol("ऽ")),
    ("OM", Itrans::Symbol("ॐ")),
    ("|", Itrans::Symbol("।")),
    ("||", Itrans::Symbol("॥")),
    ("0", Itrans::Symbol("०")),
    ("1", Itrans::Symbol("१")),
    ("2", Itrans::Symbol("२")),
    ("3", Itrans::Symbol("३")),
    ("4", Itrans::Symbol("४")),
    ("5", Itrans::Symbol("५")),
    ("6", Itrans::Symbol("६")),
    ("7", Itrans::Symbol("७")),
    ("8", Itrans::Symbol("८")),
    ("9", Itrans::Symbol("९")),
];

fn itrans_token(s: &str) -> Option<Itrans> {
    ITRANS_TOKENS
        .iter()
        .find(|(token, _)| *token == s)
        .map(|(_, kind)| *kind)
}

/// Transliterate ITRANS-romanized text into Devanagari.
///
/// Tokens are matched greedily (longest first). A bare consonant followed by
/// another consonant, whitespace or the end of input receives a virama, so
/// `"raam"` becomes `राम्` while `"raama"` becomes `राम`.
pub fn itrans_to_devanagari(latin: &str) -> Result<String, TransliterationError> {
    let chars: Vec<char> = latin.chars().collect();
    let mut out = String::with_capacity(latin.len() * 3);
    let mut pending_consonant = false;
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        if ch.is_whitespace() {
            if pending_consonant {
                out.push(VIRAMA);
                pending_consonant = false;
            }
            out.push(ch);
            pos += 1;
            continue;
        }

        let mut matched = None;
        for len in (1..=MAX_TOKEN_CHARS.min(chars.len() - pos)).rev() {
            let candidate: String = chars[pos..pos + len].iter().collect();
            if let Some(kind) = itrans_token(&candidate) {
                matched = Some((kind, len));
                break;
            }
        }
        let Some((kind, len)) = matched else {
            return Err(TransliterationError::Unsupported { ch, position: pos });
        };

        match kind {
            Itrans::Vowel { letter, sign } => {
                if pending_consonant {
                    if let Some(sign) = sign {
                        out.push(sign);
                    }
                } else {
                    out.push(letter);
                }
                pending_consonant = false;
            }
            Itrans::Consonant(glyphs) => {
                if pending_consonant {
                    out.push(VIRAMA);
                }
                out.push_str(glyphs);
                pending_consonant = true;
            }
            Itrans::Modifier(sign) => {
                out.push(sign);
                pending_consonant = false;
            }
            Itrans::Symbol(glyphs) => {
                if pending_consonant {
                    out.push(VIRAMA);
                    pending_consonant = false;
                }
                out.push_str(glyphs);
            }
        }
        pos += len;
    }

    if pending_consonant {
        out.push(VIRAMA);
    }
    Ok(out)
}

/// Latin → Devanagari, empty string when the input cannot be transliterated.
pub fn to_native_script(latin: &str) -> String {
    let latin = latin.trim();
    if latin.is_empty() {
        return String::new();
    }
    match itrans_to_devanagari(latin) {
        Ok(native) => native,
        Err(e) => {
            log::debug!("no native-script form for {:?}: {}", latin, e);
            String::new()
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Devanagari {
    Consonant(&'static str),
    Vowel(&'static str),
    VowelSign(&'static str),
    Modifier(&'static str),
    Symbol(&'static str),
    Virama,
    /// Nukta and joiners: no sound of their own.
    Silent,
}

fn classify_devanagari(ch: char) -> Option<Devanagari> {
    use Devanagari::*;
    let class = match ch {
        'क' => Consonant("k"),
        'ख' => Consonant("kh"),
        'ग' => Consonant("g"),
        'घ' => Consonant("gh"),
        'ङ' => Consonant("~N"),
        'च' => Consonant("ch"),
        'छ' => Consonant("Ch"),
        'ज' => Consonant("j"),
        'झ' => Consonant("jh"),
        'ञ' => Consonant("~n"),
        'ट' => Consonant("T"),
        'ठ' => Consonant("Th"),
        'ड' => Consonant("D"),
        'ढ' => Consonant("Dh"),
        'ण' => Consonant("N"),
        'त' => Consonant("t"),
        'थ' => Consonant("th"),
        'द' => Consonant("d"),
        'ध' => Consonant("dh"),
        'न' | '\u{0929}' => Consonant("n"),
        'प' => Consonant("p"),
        'फ' => Consonant("ph"),
        'ब' => Consonant("b"),
        'भ' => Consonant("bh"),
        'म' => Consonant("m"),
        'य' | '\u{095F}' => Consonant("y"),
        'र' | '\u{0931}' => Consonant("r"),
        'ल' => Consonant("l"),
        'ळ' | '\u{0934}' => Consonant("L"),
        'व' => Consonant("v"),
        'श' => Consonant("sh"),
        'ष' => Consonant("Sh"),
        'स' => Consonant("s"),
        'ह' => Consonant("h"),
        '\u{0958}' => Consonant("q"),
        '\u{0959}' => Consonant("K"),
        '\u{095A}' => Consonant("G"),
        '\u{095B}' => Consonant("z"),
        '\u{095C}' => Consonant(".D"),
        '\u{095D}' => Consonant(".Dh"),
        '\u{095E}' => Consonant("f"),
        'अ' => Vowel("a"),
        'आ' => Vowel("A"),
        'इ' => Vowel("i"),
        'ई' => Vowel("I"),
        'उ' => Vowel("u"),
        'ऊ' => Vowel("U"),
        'ऋ' => Vowel("RRi"),
        'ॠ' => Vowel("RRI"),
        'ऌ' => Vowel("LLi"),
        'ऍ' | 'ऎ' | 'ए' => Vowel("e"),
        'ऐ' => Vowel("ai"),
        'ऑ' | 'ऒ' | 'ओ' => Vowel("o"),
        'औ' => Vowel("au"),
        'ा' => VowelSign("A"),
        'ि' => VowelSign("i"),
        'ी' => VowelSign("I"),
        'ु' => VowelSign("u"),
        'ू' => VowelSign("U"),
        'ृ' => VowelSign("RRi"),
        'ॄ' => VowelSign("RRI"),
        'ॅ' | 'ॆ' | 'े' => VowelSign("e"),
        'ै' => VowelSign("ai"),
        'ॉ' | 'ॊ' | 'ो' => VowelSign("o"),
        'ौ' => VowelSign("au"),
        'ं' => Modifier("M"),
        'ः' => Modifier("H"),
        'ँ' => Modifier(".N"),
        'ऽ' => Symbol(".a"),
        'ॐ' => Symbol("OM"),
        '।' => Symbol("|"),
        '॥' => Symbol("||"),
        '०' => Symbol("0"),
        '१' => Symbol("1"),
        '२' => Symbol("2"),
        '३' => Symbol("3"),
        '४' => Symbol("4"),
        '५' => Symbol("5"),
        '६' => Symbol("6"),
        '७' => Symbol("7"),
        '८' => Symbol("8"),
        '९' => Symbol("9"),
        VIRAMA => Virama,
        NUKTA | ZWNJ | ZWJ => Silent,
        _ => return None,
    };
    Some(class)
}

fn romanize(native: &str, strict: bool) -> Result<String, TransliterationError> {
    let mut out = String::with_capacity(native.len());
    // A consonant was written and still owes its inherent `a`.
    let mut pending_consonant = false;

    for (position, ch) in native.chars().enumerate() {
        let class = classify_devanagari(ch);
        let class = match class {
            Some(class) => class,
            None if ch.is_ascii() || (ch.is_whitespace() && !is_devanagari_char(ch)) => {
                if pending_consonant {
                    out.push('a');
                    pending_consonant = false;
                }
                out.push(ch);
                continue;
            }
            None if strict => return Err(TransliterationError::Unsupported { ch, position }),
            None => {
                if pending_consonant {
                    out.push('a');
                    pending_consonant = false;
                }
                continue;
            }
        };

        match class {
            Devanagari::Consonant(latin) => {
                if pending_consonant {
                    out.push('a');
                }
                out.push_str(latin);
                pending_consonant = true;
            }
            Devanagari::VowelSign(latin) => {
                out.push_str(latin);
                pending_consonant = false;
            }
            Devanagari::Virama => pending_consonant = false,
            Devanagari::Silent => {}
            Devanagari::Vowel(latin) | Devanagari::Modifier(latin) | Devanagari::Symbol(latin) => {
                if pending_consonant {
                    out.push('a');
                    pending_consonant = false;
                }
                out.push_str(latin);
            }
        }
    }
    if pending_consonant {
        out.push('a');
    }
    Ok(out)
}

/// Devanagari → ITRANS romanization. ASCII passes through unchanged; any other
/// character outside the supported table is an error.
pub fn to_latin(native: &str) -> Result<String, TransliterationError> {
    romanize(native, true)
}

/// Like [`to_latin`] but drops unsupported characters instead of failing.
pub(crate) fn romanize_lossy(native: &str) -> String {
    romanize(native, false).unwrap_or_default()
}
