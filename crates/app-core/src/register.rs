//! Registration screen flow

use app_state::{InFlight, ToastDispatcher};
use archive_client::RegisterRequest;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::auth::{reject_invalid, report_api_error, AuthApi, Result, SubmitError};
use crate::validation::{
    age::ISO_DATE_FORMAT, format_id_input, validate_registration, PasswordStrength,
    RegistrationForm,
};

/// Success text when the server sends none
pub const REGISTER_SUCCESS_MESSAGE: &str = "Account created successfully!";

/// Rejection text when the server sends none
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed";

#[derive(Debug, Default)]
struct RegisterState {
    form: RegistrationForm,
    strength: PasswordStrength,
}

/// State and submission logic behind the registration screen
///
/// On success the form is reset and the caller is expected to move to the
/// login screen.
pub struct RegisterFlow {
    api: Arc<dyn AuthApi>,
    toasts: Arc<ToastDispatcher>,
    state: Mutex<RegisterState>,
    in_flight: InFlight,
}

impl RegisterFlow {
    /// Create a flow with an empty form
    pub fn new(api: Arc<dyn AuthApi>, toasts: Arc<ToastDispatcher>) -> Self {
        Self { api, toasts, state: Mutex::new(RegisterState::default()), in_flight: InFlight::new() }
    }

    /// Current form contents
    pub fn form(&self) -> RegistrationForm {
        self.state.lock().form.clone()
    }

    /// Strength of the current password
    pub fn password_strength(&self) -> PasswordStrength {
        self.state.lock().strength
    }

    /// Whether a submission is outstanding
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Update the full name
    pub fn set_full_name(&self, value: impl Into<String>) {
        self.state.lock().form.full_name = value.into();
    }

    /// Apply a keystroke to the ID field, returning the reformatted value
    pub fn set_id_number(&self, raw: &str) -> String {
        let mut state = self.state.lock();
        let formatted = format_id_input(&state.form.id_number, raw);
        state.form.id_number = formatted.clone();
        formatted
    }

    /// Set the birthdate from a date picker
    pub fn set_birthdate(&self, date: NaiveDate) {
        self.state.lock().form.birthdate = date.format(ISO_DATE_FORMAT).to_string();
    }

    /// Update the password and rescore it
    pub fn set_password(&self, value: impl Into<String>) -> PasswordStrength {
        let mut state = self.state.lock();
        state.form.password = value.into();
        state.strength = PasswordStrength::classify(&state.form.password);
        state.strength
    }

    /// Update the password confirmation
    pub fn set_confirm_password(&self, value: impl Into<String>) {
        self.state.lock().form.confirm_password = value.into();
    }

    /// Reset every field and the strength meter
    pub fn clear(&self) {
        *self.state.lock() = RegisterState::default();
    }

    /// Validate and submit the form
    ///
    /// Returns the success message that was toasted.
    pub async fn submit(&self, today: NaiveDate) -> Result<String> {
        let Some(_guard) = self.in_flight.try_begin() else {
            return Err(SubmitError::Busy);
        };

        let form = self.form();
        validate_registration(&form, today).map_err(|f| reject_invalid(&self.toasts, f))?;

        let request = RegisterRequest {
            name: form.full_name,
            id_number: form.id_number,
            birthdate: form.birthdate,
            password: form.password,
        };

        tracing::debug!(id_number = %request.id_number, "submitting registration");
        let response = self
            .api
            .register(&request)
            .await
            .map_err(|e| report_api_error(&self.toasts, e, REGISTER_FAILED_MESSAGE))?;

        let message = response.message.unwrap_or_else(|| REGISTER_SUCCESS_MESSAGE.to_string());
        tracing::info!(id_number = %request.id_number, "account registered");
        self.toasts.success(message.clone());
        self.clear();
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MockAuthApi, NETWORK_ERROR_MESSAGE};
    use crate::validation::ValidationFailure;
    use app_state::Severity;
    use archive_client::{ApiError, MessageResponse};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn flow(api: MockAuthApi) -> (RegisterFlow, Arc<ToastDispatcher>) {
        let toasts = Arc::new(ToastDispatcher::new());
        (RegisterFlow::new(Arc::new(api), Arc::clone(&toasts)), toasts)
    }

    fn fill(flow: &RegisterFlow) {
        flow.set_full_name("Maria Santos");
        for raw in ["2", "TUPT-21", "TUPT-211234"] {
            flow.set_id_number(raw);
        }
        flow.set_birthdate(NaiveDate::from_ymd_opt(2002, 3, 14).unwrap());
        flow.set_password("Secret1!");
        flow.set_confirm_password("Secret1!");
    }

    #[tokio::test]
    async fn test_field_updates() {
        let (flow, _) = flow(MockAuthApi::new());
        fill(&flow);

        let form = flow.form();
        assert_eq!(form.id_number, "TUPT-21-1234");
        assert_eq!(form.birthdate, "2002-03-14");
        assert_eq!(flow.password_strength(), PasswordStrength::Strong);
    }

    #[tokio::test]
    async fn test_clear_resets_form_and_strength() {
        let (flow, _) = flow(MockAuthApi::new());
        fill(&flow);
        flow.clear();

        assert_eq!(flow.form(), RegistrationForm::default());
        assert_eq!(flow.password_strength(), PasswordStrength::None);
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let mut api = MockAuthApi::new();
        api.expect_register().never();
        let (flow, toasts) = flow(api);
        fill(&flow);
        flow.set_confirm_password("Different1!");

        let err = flow.submit(today()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Validation(ValidationFailure::PasswordMismatch)));
        assert_eq!(toasts.state().message().unwrap().text, "Passwords do not match");
        assert_eq!(flow.form().full_name, "Maria Santos");
    }

    #[tokio::test]
    async fn test_success_resets_and_toasts() {
        let mut api = MockAuthApi::new();
        api.expect_register()
            .withf(|req| req.id_number == "TUPT-21-1234" && req.name == "Maria Santos")
            .times(1)
            .returning(|_| Ok(MessageResponse { message: None }));
        let (flow, toasts) = flow(api);
        fill(&flow);

        let message = flow.submit(today()).await.unwrap();
        assert_eq!(message, REGISTER_SUCCESS_MESSAGE);

        let state = toasts.state();
        let toast = state.message().unwrap();
        assert_eq!(toast.severity, Severity::Success);
        assert_eq!(toast.text, REGISTER_SUCCESS_MESSAGE);
        assert_eq!(flow.form(), RegistrationForm::default());
        assert!(!flow.is_submitting());
    }

    #[tokio::test]
    async fn test_network_failure_keeps_form() {
        let mut api = MockAuthApi::new();
        api.expect_register().returning(|_| Err(ApiError::Network("refused".into())));
        let (flow, toasts) = flow(api);
        fill(&flow);

        let err = flow.submit(today()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
        assert_eq!(toasts.state().message().unwrap().text, NETWORK_ERROR_MESSAGE);
        assert_eq!(flow.form().id_number, "TUPT-21-1234");
    }

    #[tokio::test]
    async fn test_rejection_shows_server_message() {
        let mut api = MockAuthApi::new();
        api.expect_register().returning(|_| {
            Err(ApiError::Rejected { status: 409, message: Some("ID number already exists".into()) })
        });
        let (flow, toasts) = flow(api);
        fill(&flow);

        let err = flow.submit(today()).await.unwrap_err();
        assert_eq!(err.to_string(), "ID number already exists");
        assert_eq!(toasts.state().message().unwrap().text, "ID number already exists");
    }

    #[tokio::test]
    async fn test_busy_while_in_flight() {
        let mut api = MockAuthApi::new();
        api.expect_register().never();
        let (flow, _) = flow(api);
        fill(&flow);

        let _guard = flow.in_flight.try_begin().unwrap();
        assert!(flow.is_submitting());
        assert!(matches!(flow.submit(today()).await, Err(SubmitError::Busy)));
    }
}
