//! Articulation-class phonetic keys for Devanagari names.

pub const DEFAULT_PHONETIC_KEY_LEN: usize = 6;

const BLOCK_START: u32 = 0x0900;
const BLOCK_LEN: usize = 0x80;

/// Class code per code point of the Devanagari block, 0 = unmapped.
/// Consonants map to digits by place of articulation; independent vowels map
/// to a letter placeholder that is only ever used as the seed.
static PHONETIC_CLASSES: [u8; BLOCK_LEN] = build_classes();

const fn build_classes() -> [u8; BLOCK_LEN] {
    let mut t = [0u8; BLOCK_LEN];
    let mut i = 0;
    while i < BLOCK_LEN {
        t[i] = match i {
            // velars क..ङ, nukta क़ ख़ ग़
            0x15..=0x19 | 0x58..=0x5A => b'1',
            // palatals च..ञ, ज़
            0x1A..=0x1E | 0x5B => b'2',
            // retroflexes ट..ण, ड़ ढ़
            0x1F..=0x23 | 0x5C..=0x5D => b'3',
            // dentals त..न, ऩ
            0x24..=0x29 => b'4',
            // labials प..म, फ़
            0x2A..=0x2E | 0x5E => b'5',
            // semivowels and liquids य..ळ ऴ व, य़
            0x2F..=0x35 | 0x5F => b'6',
            // sibilants and glottal श ष स ह
            0x36..=0x39 => b'7',
            0x05 | 0x06 => b'A',
            0x07 | 0x08 => b'I',
            0x09 | 0x0A => b'U',
            0x0B | 0x0C | 0x60 | 0x61 => b'R',
            0x0D..=0x10 => b'E',
            0x11..=0x14 => b'O',
            _ => 0,
        };
        i += 1;
    }
    t
}

#[inline]
fn class_of(ch: char) -> Option<u8> {
    let offset = (ch as u32).checked_sub(BLOCK_START)? as usize;
    match PHONETIC_CLASSES.get(offset) {
        Some(&code) if code != 0 => Some(code),
        _ => None,
    }
}

/// Fixed-length phonetic key of a native-script name.
///
/// The first mapped character seeds the key; after that only consonant digits
/// are appended, and a digit equal to the last one appended is skipped, so
/// doubled consonants and conjunct spellings collapse together. Output is
/// always exactly `length` characters. A name that yields no digit at all
/// (Latin text, vowels only, empty) encodes as all zeros.
pub fn phonetic_key(native_name: &str, length: usize) -> String {
    let mut codes = native_name.chars().filter_map(class_of);
    let Some(seed) = codes.next() else {
        return "0".repeat(length);
    };

    let mut key = String::with_capacity(length.max(1));
    key.push(seed as char);
    let mut saw_digit = seed.is_ascii_digit();
    let mut last_digit = saw_digit.then_some(seed);

    for code in codes {
        if !code.is_ascii_digit() || last_digit == Some(code) {
            continue;
        }
        key.push(code as char);
        last_digit = Some(code);
        saw_digit = true;
    }

    if !saw_digit {
        return "0".repeat(length);
    }
    while key.len() < length {
        key.push('0');
    }
    key.truncate(length);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conjunct_and_schwa_spellings_share_a_key() {
        assert_eq!(phonetic_key("शर्मा", 6), "765000");
        assert_eq!(phonetic_key("शरमा", 6), "765000");
    }

    #[test]
    fn doubled_consonants_collapse() {
        assert_eq!(phonetic_key("पप्पू", 6), "500000");
        assert_eq!(phonetic_key("पपू", 6), "500000");
    }

    #[test]
    fn vowel_seed() {
        assert_eq!(phonetic_key("अमित", 6), "A54000");
        assert_eq!(phonetic_key("आ", 6), "000000");
    }

    #[test]
    fn non_native_text_is_all_zero() {
        assert_eq!(phonetic_key("Priya", 6), "000000");
        assert_eq!(phonetic_key("", 4), "0000");
    }

    #[test]
    fn length_is_always_exact() {
        let long = "कखगघचछजझटठडढतथदधपफबभ";
        for len in [0, 1, 3, 6, 12] {
            assert_eq!(phonetic_key(long, len).chars().count(), len);
            assert_eq!(phonetic_key("", len).chars().count(), len);
            assert_eq!(phonetic_key("अमित", len).chars().count(), len);
        }
        assert_eq!(phonetic_key(long, 3), "123");
    }

    #[test]
    fn table_covers_consonant_classes() {
        assert_eq!(class_of('क'), Some(b'1'));
        assert_eq!(class_of('ञ'), Some(b'2'));
        assert_eq!(class_of('ण'), Some(b'3'));
        assert_eq!(class_of('न'), Some(b'4'));
        assert_eq!(class_of('म'), Some(b'5'));
        assert_eq!(class_of('व'), Some(b'6'));
        assert_eq!(class_of('ह'), Some(b'7'));
        assert_eq!(class_of('ा'), None);
        assert_eq!(class_of('a'), None);
    }
}
