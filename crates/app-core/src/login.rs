//! Login screen flow

use app_state::{InFlight, SessionContext, ToastDispatcher};
use archive_client::{LoginRequest, UserRecord};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::auth::{reject_invalid, report_api_error, AuthApi, Result, SubmitError};
use crate::validation::{format_id_input, validate_login, LoginForm};

/// Toast shown after a successful login
pub const LOGIN_SUCCESS_MESSAGE: &str = "Logged in successfully!";

/// Rejection text when the server sends none
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Toast shown when the user could not be persisted
pub const SESSION_SAVE_FAILED_MESSAGE: &str = "Error saving login data";

/// State and submission logic behind the login screen
pub struct LoginFlow {
    api: Arc<dyn AuthApi>,
    toasts: Arc<ToastDispatcher>,
    session: Arc<SessionContext>,
    form: Mutex<LoginForm>,
    in_flight: InFlight,
}

impl LoginFlow {
    /// Create a flow with an empty form
    pub fn new(
        api: Arc<dyn AuthApi>,
        toasts: Arc<ToastDispatcher>,
        session: Arc<SessionContext>,
    ) -> Self {
        Self { api, toasts, session, form: Mutex::new(LoginForm::default()), in_flight: InFlight::new() }
    }

    /// Current form contents
    pub fn form(&self) -> LoginForm {
        self.form.lock().clone()
    }

    /// Whether a submission is outstanding
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Apply a keystroke to the ID field, returning the reformatted value
    pub fn set_id_number(&self, raw: &str) -> String {
        let mut form = self.form.lock();
        form.id_number = format_id_input(&form.id_number, raw);
        form.id_number.clone()
    }

    /// Update the password
    pub fn set_password(&self, value: impl Into<String>) {
        self.form.lock().password = value.into();
    }

    /// Reset both fields
    pub fn clear(&self) {
        *self.form.lock() = LoginForm::default();
    }

    /// Validate, authenticate, and persist the user to the session
    pub async fn submit(&self) -> Result<UserRecord> {
        let Some(_guard) = self.in_flight.try_begin() else {
            return Err(SubmitError::Busy);
        };

        let form = self.form();
        validate_login(&form).map_err(|f| reject_invalid(&self.toasts, f))?;

        let request = LoginRequest { id_number: form.id_number, password: form.password };

        tracing::debug!(id_number = %request.id_number, "submitting login");
        let response = self
            .api
            .login(&request)
            .await
            .map_err(|e| report_api_error(&self.toasts, e, LOGIN_FAILED_MESSAGE))?;

        let user = response.user;
        if let Err(e) = self.session.save(user.clone()).await {
            tracing::warn!(error = %e, "failed to persist session");
            self.toasts.error(SESSION_SAVE_FAILED_MESSAGE);
            return Err(e.into());
        }

        self.toasts.success(LOGIN_SUCCESS_MESSAGE);
        Ok(user)
    }
}
