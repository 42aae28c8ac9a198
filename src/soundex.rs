// 🔤 Soundex Encoder
// Phonetic surname code: initial letter + 3 digits, padded with '0'
//
// Groups: BFPV=1, CGJKQSXZ=2, DT=3, L=4, MN=5, R=6
// Everything else (vowels, H, W, Y, digits, punctuation) has no code and
// resets the duplicate-suppression state.

use crate::error::{DlError, Result};
use serde::Serialize;
use std::fmt;

/// Code length (initial + 3 digits)
pub const SOUNDEX_LEN: usize = 4;

// Indexed by `letter - 'A'`
const LETTER_CODES: [Option<char>; 26] = [
    None,      // A
    Some('1'), // B
    Some('2'), // C
    Some('3'), // D
    None,      // E
    Some('1'), // F
    Some('2'), // G
    None,      // H
    None,      // I
    Some('2'), // J
    Some('2'), // K
    Some('4'), // L
    Some('5'), // M
    Some('5'), // N
    None,      // O
    Some('1'), // P
    Some('2'), // Q
    Some('6'), // R
    Some('2'), // S
    Some('3'), // T
    None,      // U
    Some('1'), // V
    None,      // W
    Some('2'), // X
    None,      // Y
    Some('2'), // Z
];

fn letter_code(c: char) -> Option<char> {
    if c.is_ascii_uppercase() {
        LETTER_CODES[(c as u8 - b'A') as usize]
    } else {
        None
    }
}

// ============================================================================
// SOUNDEX CODE
// ============================================================================

/// A 4-character Soundex code, e.g. `R163`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SoundexCode(String);

impl SoundexCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First character of the uppercased name
    pub fn initial(&self) -> char {
        self.0.chars().next().unwrap_or('0')
    }

    /// The three trailing code characters (everything after the initial)
    pub fn digits(&self) -> &str {
        &self.0[self.initial().len_utf8()..]
    }
}

impl fmt::Display for SoundexCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SoundexCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// ENCODER
// ============================================================================

/// Encode a surname as Soundex
///
/// Adjacent characters with the same code collapse to one digit, but only
/// while no uncoded character sits between them. The initial never seeds the
/// duplicate check, so `Pfister` encodes as `P123`.
///
/// # Errors
/// * `DlError::EmptyName` - if `name` is empty
pub fn soundex(name: &str) -> Result<SoundexCode> {
    let upper = name.to_uppercase();
    let mut chars = upper.chars();
    let initial = chars.next().ok_or(DlError::EmptyName)?;

    let mut code = String::with_capacity(SOUNDEX_LEN);
    code.push(initial);
    let mut len = 1;
    let mut last_code: Option<char> = None;

    for c in chars {
        if len == SOUNDEX_LEN {
            break;
        }

        match letter_code(c) {
            Some(digit) if last_code != Some(digit) => {
                code.push(digit);
                last_code = Some(digit);
                len += 1;
            }
            Some(_) => {}
            None => last_code = None,
        }
    }

    for _ in len..SOUNDEX_LEN {
        code.push('0');
    }

    Ok(SoundexCode(code))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn code(name: &str) -> String {
        soundex(name).unwrap().to_string()
    }

    #[test]
    fn test_robert_rupert_equivalence() {
        assert_eq!(code("Robert"), "R163");
        assert_eq!(code("Rupert"), "R163");
    }

    #[test]
    fn test_common_surnames() {
        assert_eq!(code("Smith"), "S530");
        assert_eq!(code("Johnson"), "J525");
        assert_eq!(code("Tymczak"), "T522");
        assert_eq!(code("Lee"), "L000");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(code("smith"), code("SMITH"));
        assert_eq!(code("sMiTh"), "S530");
    }

    #[test]
    fn test_adjacent_duplicates_suppressed() {
        // C and K share code 2
        assert_eq!(code("Jackson"), "J250");
    }

    #[test]
    fn test_vowel_separated_duplicates_repeat() {
        // S, A (reset), S again -> 2 is emitted twice
        assert_eq!(code("Casas"), "C220");
    }

    #[test]
    fn test_h_and_w_reset_last_code() {
        // S=2, H resets, C=2 emitted again
        assert_eq!(code("Ashcraft"), "A226");
    }

    #[test]
    fn test_initial_does_not_seed_duplicate_check() {
        // P and F are both 1, but F is still emitted
        assert_eq!(code("Pfister"), "P123");
    }

    #[test]
    fn test_non_letters_have_no_code() {
        assert_eq!(code("O'Brien"), "O165");
        assert_eq!(code("Smith2"), "S530");
        assert_eq!(code("B-B"), "B100");
    }

    #[test]
    fn test_single_letter_is_padded() {
        assert_eq!(code("a"), "A000");
    }

    #[test]
    fn test_long_name_is_truncated() {
        assert_eq!(code("Bartholomew-Fitzgerald"), "B634");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(soundex(""), Err(DlError::EmptyName)));
    }

    #[test]
    fn test_initial_and_digits() {
        let sdx = soundex("Washington").unwrap();
        assert_eq!(sdx.as_str(), "W252");
        assert_eq!(sdx.initial(), 'W');
        assert_eq!(sdx.digits(), "252");
    }

    proptest! {
        #[test]
        fn prop_code_shape(name in "[A-Za-z]{1,24}") {
            let sdx = soundex(&name).unwrap();
            let chars: Vec<char> = sdx.as_str().chars().collect();

            prop_assert_eq!(chars.len(), SOUNDEX_LEN);
            prop_assert_eq!(chars[0], name.chars().next().unwrap().to_ascii_uppercase());
            prop_assert!(chars[1..].iter().all(|c| ('0'..='6').contains(c)));
        }

        #[test]
        fn prop_deterministic(name in "[A-Za-z' -]{1,24}") {
            prop_assert_eq!(soundex(&name).unwrap(), soundex(&name).unwrap());
        }
    }
}
