//! Field validators and the normalizers applied to accepted answers.
//!
//! Validators are total: malformed input yields `false`, never a panic.

use std::sync::LazyLock;

use regex::Regex;

/// Letters, whitespace, and periods only.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s.]+$").unwrap());

/// PAN layout: 5 letters, 4 digits, 1 letter.
static PAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());

const MIN_NAME_LEN: usize = 2;
const PHONE_DIGITS: usize = 10;
const PAN_LEN: usize = 10;

/// A full name: at least two characters of letters, spaces, and periods.
pub fn validate_name(text: &str) -> bool {
    let name = text.trim();
    name.chars().count() >= MIN_NAME_LEN && NAME_PATTERN.is_match(name)
}

/// A phone number with exactly ten digits once punctuation is stripped.
pub fn validate_phone(text: &str) -> bool {
    phone_digits(text).len() == PHONE_DIGITS
}

/// A PAN-style tax ID, case- and space-insensitive.
pub fn validate_tax_id(text: &str) -> bool {
    let id = normalize_tax_id(text);
    id.len() == PAN_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric())
        && PAN_PATTERN.is_match(&id)
}

/// Stored form of a name.
pub fn normalize_name(text: &str) -> String {
    text.trim().to_string()
}

/// Digits of a phone number, everything else dropped.
///
/// Only ASCII `0`-`9` count. Digits from other scripts (Devanagari `९`,
/// fullwidth `９`) are dropped like punctuation, so a number spoken back in
/// those scripts fails validation instead of being stored in mixed form.
pub fn phone_digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Stored form of a tax ID: whitespace removed, uppercased.
pub fn normalize_tax_id(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_accepts_letters_spaces_periods() {
        for name in ["John Doe", "Jo", "J. R. R. Tolkien", "  Mary Ann  ", "ab"] {
            assert!(validate_name(name), "{name:?} should be valid");
        }
    }

    #[test]
    fn name_rejects_short_or_symbolic() {
        for name in ["", " ", "J", "  J  ", "John3", "O'Brien", "Jane-Doe", "Zoë"] {
            assert!(!validate_name(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn name_validity_tracks_length_for_letter_strings() {
        let letters = "abcdefghij";
        for len in 0..=letters.len() {
            let candidate = &letters[..len];
            assert_eq!(validate_name(candidate), len >= 2, "length {len}");
        }
    }

    #[test]
    fn phone_counts_digits_only() {
        assert!(validate_phone("9876543210"));
        assert!(validate_phone("(555) 123-4567"));
        assert!(validate_phone("98765 43210"));
        assert!(!validate_phone("555-1234"));
        assert!(!validate_phone("+91 98765 43210"));
        assert!(!validate_phone("nine eight seven"));
        assert!(!validate_phone(""));
    }

    #[test]
    fn phone_digits_strips_punctuation() {
        assert_eq!(phone_digits("(555) 123-4567"), "5551234567");
        assert_eq!(phone_digits("no digits"), "");
    }

    #[test]
    fn phone_digits_are_ascii_only() {
        assert_eq!(phone_digits("९८७६५४३२१०"), "");
        assert!(!validate_phone("९८७६५४३२१०"));
        assert!(!validate_phone("９８７６５４３２１０"));
        assert_eq!(phone_digits("98765 ४३२१०"), "98765");
    }

    #[test]
    fn tax_id_is_case_and_space_insensitive() {
        assert!(validate_tax_id("ABCDE1234F"));
        assert!(validate_tax_id("abcde1234f"));
        assert!(validate_tax_id("ABCDE 1234F"));
        assert!(validate_tax_id(" a b c d e 1 2 3 4 f "));
    }

    #[test]
    fn tax_id_rejects_wrong_layout() {
        for id in [
            "ABCD12345F",  // 4 letters
            "ABCDE12345",  // trailing digit
            "ABCDE1234",   // too short
            "ABCDE1234FG", // too long
            "ABCDE-1234F", // punctuation
            "",
        ] {
            assert!(!validate_tax_id(id), "{id:?} should be invalid");
        }
    }

    #[test]
    fn normalizers_produce_stored_forms() {
        assert_eq!(normalize_name("  John Doe "), "John Doe");
        assert_eq!(normalize_tax_id("abcde 1234f"), "ABCDE1234F");
    }
}
