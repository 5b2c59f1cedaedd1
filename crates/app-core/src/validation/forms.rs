//! Form validators
//!
//! Each validator runs its checks in a fixed order and stops at the first
//! failure. The failure carries a stable code and the text shown to the user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::age::{age_in_years, parse_birthdate};
use super::id_number::is_valid_id_number;
use super::password::MIN_PASSWORD_LEN;

/// Youngest age allowed to register
pub const MIN_REGISTRATION_AGE: i32 = 16;

/// Ages above this are treated as a mistyped birthdate
pub const MAX_PLAUSIBLE_AGE: i32 = 100;

/// Registration screen fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    /// Full name
    pub full_name: String,
    /// Student ID number
    pub id_number: String,
    /// ISO `YYYY-MM-DD` birthdate
    pub birthdate: String,
    /// Password
    pub password: String,
    /// Password confirmation
    pub confirm_password: String,
}

/// Login screen fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    /// Student ID number
    pub id_number: String,
    /// Password
    pub password: String,
}

/// Profile edit fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    /// Full name
    pub name: String,
    /// ISO birthdate
    pub birthdate: String,
    /// Current password, needed only when changing it
    pub current_password: String,
    /// New password, empty to keep the current one
    pub new_password: String,
    /// New password confirmation
    pub confirm_password: String,
}

impl ProfileForm {
    /// Whether the user asked to change the password
    pub fn changes_password(&self) -> bool {
        !self.new_password.is_empty()
    }

    /// Blank the three password fields
    pub fn clear_passwords(&mut self) {
        self.current_password.clear();
        self.new_password.clear();
        self.confirm_password.clear();
    }
}

/// First failed check of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationFailure {
    /// A required field is empty
    #[error("Please fill in all fields")]
    MissingFields,
    /// ID number is not `TUPT-XX-XXXX`
    #[error("Please enter a valid ID number in format: TUPT-XX-XXXX")]
    InvalidIdFormat,
    /// Younger than the registration minimum
    #[error("You must be at least 16 years old to register")]
    TooYoung,
    /// Unparseable, future, or implausibly old birthdate
    #[error("Please enter a valid birthdate")]
    InvalidBirthdate,
    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// Password below the minimum length
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    /// Profile name is blank
    #[error("Name is required")]
    NameRequired,
    /// Profile birthdate is empty
    #[error("Birthdate is required")]
    BirthdateRequired,
    /// Password change without the current password
    #[error("Current password is required to change password")]
    CurrentPasswordRequired,
    /// New password below the minimum length
    #[error("New password must be at least 6 characters")]
    NewPasswordTooShort,
    /// New password and confirmation differ
    #[error("New passwords do not match")]
    NewPasswordMismatch,
}

impl ValidationFailure {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::MissingFields => "missing_fields",
            ValidationFailure::InvalidIdFormat => "invalid_id_format",
            ValidationFailure::TooYoung => "too_young",
            ValidationFailure::InvalidBirthdate => "invalid_birthdate",
            ValidationFailure::PasswordMismatch => "password_mismatch",
            ValidationFailure::PasswordTooShort => "password_too_short",
            ValidationFailure::NameRequired => "name_required",
            ValidationFailure::BirthdateRequired => "birthdate_required",
            ValidationFailure::CurrentPasswordRequired => "current_password_required",
            ValidationFailure::NewPasswordTooShort => "new_password_too_short",
            ValidationFailure::NewPasswordMismatch => "new_password_mismatch",
        }
    }

    /// Text shown to the user
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Validate a registration form against `today`
///
/// Checks, in order: all fields present, ID format, birthdate (parseable,
/// not in the future, at least 16 years, at most 100 years), password
/// confirmation, password length.
pub fn validate_registration(
    form: &RegistrationForm,
    today: NaiveDate,
) -> Result<(), ValidationFailure> {
    let required = [
        &form.full_name,
        &form.id_number,
        &form.birthdate,
        &form.password,
        &form.confirm_password,
    ];
    if required.iter().any(|field| field.is_empty()) {
        return Err(ValidationFailure::MissingFields);
    }

    if !is_valid_id_number(&form.id_number) {
        return Err(ValidationFailure::InvalidIdFormat);
    }

    let birthdate = parse_birthdate(&form.birthdate).ok_or(ValidationFailure::InvalidBirthdate)?;
    if birthdate > today {
        return Err(ValidationFailure::InvalidBirthdate);
    }

    let age = age_in_years(birthdate, today);
    if age < MIN_REGISTRATION_AGE {
        return Err(ValidationFailure::TooYoung);
    }
    if age > MAX_PLAUSIBLE_AGE {
        return Err(ValidationFailure::InvalidBirthdate);
    }

    if form.password != form.confirm_password {
        return Err(ValidationFailure::PasswordMismatch);
    }

    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationFailure::PasswordTooShort);
    }

    Ok(())
}

/// Validate a login form: fields present, then ID format
pub fn validate_login(form: &LoginForm) -> Result<(), ValidationFailure> {
    if form.id_number.is_empty() || form.password.is_empty() {
        return Err(ValidationFailure::MissingFields);
    }

    if !is_valid_id_number(&form.id_number) {
        return Err(ValidationFailure::InvalidIdFormat);
    }

    Ok(())
}

/// Validate a profile edit form
///
/// Password checks apply only when a new password was entered.
pub fn validate_profile(form: &ProfileForm) -> Result<(), ValidationFailure> {
    if form.name.trim().is_empty() {
        return Err(ValidationFailure::NameRequired);
    }

    if form.birthdate.is_empty() {
        return Err(ValidationFailure::BirthdateRequired);
    }

    if form.changes_password() {
        if form.current_password.is_empty() {
            return Err(ValidationFailure::CurrentPasswordRequired);
        }
        if form.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationFailure::NewPasswordTooShort);
        }
        if form.new_password != form.confirm_password {
            return Err(ValidationFailure::NewPasswordMismatch);
        }
    }

    Ok(())
}
