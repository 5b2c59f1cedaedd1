//! Student ID number formatting and validation
//!
//! Canonical form is `TUPT-XX-XXXX` where every `X` is an ASCII digit.

use regex::Regex;
use std::sync::OnceLock;

/// Fixed institutional prefix
pub const ID_PREFIX: &str = "TUPT";

/// Length of a complete identifier
pub const ID_MAX_LEN: usize = 12;

/// Digits after the prefix in a complete identifier
const BODY_DIGITS: usize = 6;

static ID_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn id_regex() -> Option<&'static Regex> {
    ID_REGEX.get_or_init(|| Regex::new(r"^TUPT-\d{2}-\d{4}$").ok()).as_ref()
}

/// Whether `id` is a complete, canonical identifier
///
/// No normalization is applied: lowercase or unhyphenated input is invalid.
pub fn is_valid_id_number(id: &str) -> bool {
    id_regex().is_some_and(|re| re.is_match(id))
}

/// Normalize arbitrary text into a (possibly partial) canonical identifier
///
/// Non-alphanumerics are dropped, letters upper-cased, the `TUPT` prefix
/// supplied when missing, and hyphens placed after the prefix and after
/// the second digit. Only digits are kept after the prefix and the result
/// never exceeds [`ID_MAX_LEN`] characters.
///
/// ```
/// use app_core::validation::format_id_number;
///
/// assert_eq!(format_id_number("211234"), "TUPT-21-1234");
/// assert_eq!(format_id_number("tupt 21 1"), "TUPT-21-1");
/// assert_eq!(format_id_number(""), "");
/// ```
pub fn format_id_number(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if cleaned.is_empty() {
        return String::new();
    }

    let body = cleaned.strip_prefix(ID_PREFIX).unwrap_or(&cleaned);
    let digits: Vec<char> = body.chars().filter(char::is_ascii_digit).take(BODY_DIGITS).collect();

    let mut formatted = String::with_capacity(ID_MAX_LEN);
    formatted.push_str(ID_PREFIX);
    if !digits.is_empty() {
        formatted.push('-');
        formatted.extend(digits.iter().take(2));
    }
    if digits.len() > 2 {
        formatted.push('-');
        formatted.extend(digits.iter().skip(2));
    }
    formatted
}

/// Keystroke handler for the ID field
///
/// `previous` is the field's current value and `raw` the value after the
/// edit. Appends and pastes go straight through [`format_id_number`].
/// Deletions get two adjustments so backspace always makes progress:
///
/// - removing a hyphen also removes the digit in front of it
/// - deleting into the prefix clears the field
pub fn format_id_input(previous: &str, raw: &str) -> String {
    if raw.len() < previous.len() && previous.starts_with(raw) {
        let fragment = raw.trim_end_matches('-').to_ascii_uppercase();
        if ID_PREFIX.starts_with(&fragment) && fragment.len() < ID_PREFIX.len() {
            return String::new();
        }
    }

    if let Some(joined) = hyphen_deleted(previous, raw) {
        return format_id_number(&joined);
    }

    format_id_number(raw)
}

/// If `raw` is `previous` with one hyphen removed and a digit before it,
/// returns `raw` with that digit removed as well.
fn hyphen_deleted(previous: &str, raw: &str) -> Option<String> {
    if raw.len() + 1 != previous.len() {
        return None;
    }

    let at = previous.bytes().zip(raw.bytes()).position(|(a, b)| a != b).unwrap_or(raw.len());
    if previous.as_bytes().get(at) != Some(&b'-') || previous.get(at + 1..)? != raw.get(at..)? {
        return None;
    }

    let before = at.checked_sub(1)?;
    if !previous.as_bytes().get(before)?.is_ascii_digit() {
        return None;
    }

    Some(format!("{}{}", previous.get(..before)?, raw.get(at..)?))
}
