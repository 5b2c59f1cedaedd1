//! Input formatting and validation shared by the auth and profile screens
//!
//! Everything here is pure: no I/O, no clock. Callers pass "today" in.

pub mod age;
pub mod forms;
pub mod id_number;
pub mod password;

pub use age::{age_in_years, display_birthdate, format_display_date, parse_birthdate};
pub use forms::{
    validate_login, validate_profile, validate_registration, LoginForm, ProfileForm,
    RegistrationForm, ValidationFailure,
};
pub use id_number::{format_id_input, format_id_number, is_valid_id_number};
pub use password::PasswordStrength;
