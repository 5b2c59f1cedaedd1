//! Password strength scoring

use serde::{Deserialize, Serialize};

/// Symbols that count toward a strong password
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 6;

/// Length from which a password can be rated strong
pub const STRONG_PASSWORD_LEN: usize = 8;

/// Strength tier shown under the password field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    /// Empty password, meter hidden
    #[default]
    None,
    /// Too short to submit
    Weak,
    /// Acceptable
    Medium,
    /// Long, with mixed character classes
    Strong,
}

impl PasswordStrength {
    /// Score a password
    ///
    /// Length is counted in characters. A password of at least
    /// [`STRONG_PASSWORD_LEN`] characters is strong only if it has a
    /// lowercase letter, an uppercase letter, a digit and one of
    /// [`PASSWORD_SYMBOLS`].
    pub fn classify(password: &str) -> Self {
        let len = password.chars().count();

        if len == 0 {
            PasswordStrength::None
        } else if len < MIN_PASSWORD_LEN {
            PasswordStrength::Weak
        } else if len < STRONG_PASSWORD_LEN {
            PasswordStrength::Medium
        } else if has_all_classes(password) {
            PasswordStrength::Strong
        } else {
            PasswordStrength::Medium
        }
    }

    /// Lowercase label, empty for [`PasswordStrength::None`]
    pub fn label(&self) -> &'static str {
        match self {
            PasswordStrength::None => "",
            PasswordStrength::Weak => "weak",
            PasswordStrength::Medium => "medium",
            PasswordStrength::Strong => "strong",
        }
    }
}

fn has_all_classes(password: &str) -> bool {
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut symbol = false;

    for c in password.chars() {
        lower |= c.is_ascii_lowercase();
        upper |= c.is_ascii_uppercase();
        digit |= c.is_ascii_digit();
        symbol |= PASSWORD_SYMBOLS.contains(c);
    }

    lower && upper && digit && symbol
}
