//! Profile screen flow
//!
//! The profile is seeded from the session user. Editing works on a copy of
//! the form; cancel restores it from the stored user and a successful
//! submit merges the server's reply into the session.

use app_state::{InFlight, SessionContext, SessionStateError, ToastDispatcher};
use archive_client::{ProfileUpdateRequest, UserRecord};
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::auth::{reject_invalid, report_api_error, AuthApi, Result, SubmitError};
use crate::validation::{age::ISO_DATE_FORMAT, validate_profile, ProfileForm};

/// Toast shown when the stored user cannot be read
pub const PROFILE_LOAD_FAILED_MESSAGE: &str = "Error loading profile data";

/// Toast shown after a successful update
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully!";

/// Rejection text when the server sends none
pub const PROFILE_UPDATE_FAILED_MESSAGE: &str = "Failed to update profile";

#[derive(Debug, Default)]
struct ProfileState {
    user: Option<UserRecord>,
    form: ProfileForm,
    editing: bool,
}

fn form_for(user: &UserRecord) -> ProfileForm {
    ProfileForm {
        name: user.name.clone(),
        birthdate: user.birthdate.clone(),
        ..Default::default()
    }
}

/// State and submission logic behind the profile screen
pub struct ProfileFlow {
    api: Arc<dyn AuthApi>,
    toasts: Arc<ToastDispatcher>,
    session: Arc<SessionContext>,
    state: Mutex<ProfileState>,
    in_flight: InFlight,
}

impl ProfileFlow {
    /// Create a flow; call [`ProfileFlow::load`] before showing the screen
    pub fn new(
        api: Arc<dyn AuthApi>,
        toasts: Arc<ToastDispatcher>,
        session: Arc<SessionContext>,
    ) -> Self {
        Self {
            api,
            toasts,
            session,
            state: Mutex::new(ProfileState::default()),
            in_flight: InFlight::new(),
        }
    }

    /// Read the user from session storage and seed the form
    ///
    /// `Ok(None)` means nobody is signed in.
    pub async fn load(&self) -> Result<Option<UserRecord>> {
        let user = match self.session.load().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load profile");
                self.toasts.error(PROFILE_LOAD_FAILED_MESSAGE);
                return Err(e.into());
            }
        };

        let mut state = self.state.lock();
        state.form = user.as_ref().map(form_for).unwrap_or_default();
        state.user = user.clone();
        state.editing = false;
        Ok(user)
    }

    /// The loaded user
    pub fn user(&self) -> Option<UserRecord> {
        self.state.lock().user.clone()
    }

    /// Current form contents
    pub fn form(&self) -> ProfileForm {
        self.state.lock().form.clone()
    }

    /// Whether the form is in edit mode
    pub fn is_editing(&self) -> bool {
        self.state.lock().editing
    }

    /// Whether a submission is outstanding
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Enter edit mode
    pub fn begin_edit(&self) {
        self.state.lock().editing = true;
    }

    /// Leave edit mode and discard changes
    pub fn cancel_edit(&self) {
        let mut state = self.state.lock();
        state.editing = false;
        state.form = state.user.as_ref().map(form_for).unwrap_or_default();
    }

    /// Update the name
    pub fn set_name(&self, value: impl Into<String>) {
        self.state.lock().form.name = value.into();
    }

    /// Set the birthdate from a date picker
    pub fn set_birthdate(&self, date: NaiveDate) {
        self.state.lock().form.birthdate = date.format(ISO_DATE_FORMAT).to_string();
    }

    /// Update the current password
    pub fn set_current_password(&self, value: impl Into<String>) {
        self.state.lock().form.current_password = value.into();
    }

    /// Update the new password
    pub fn set_new_password(&self, value: impl Into<String>) {
        self.state.lock().form.new_password = value.into();
    }

    /// Update the new password confirmation
    pub fn set_confirm_password(&self, value: impl Into<String>) {
        self.state.lock().form.confirm_password = value.into();
    }

    /// Validate and submit the edited profile
    pub async fn submit(&self) -> Result<UserRecord> {
        let Some(_guard) = self.in_flight.try_begin() else {
            return Err(SubmitError::Busy);
        };

        let (user, form) = {
            let state = self.state.lock();
            (state.user.clone(), state.form.clone())
        };
        let Some(mut user) = user else {
            self.toasts.error(PROFILE_LOAD_FAILED_MESSAGE);
            return Err(SessionStateError::NoCurrentSession.into());
        };

        validate_profile(&form).map_err(|f| reject_invalid(&self.toasts, f))?;

        let request = ProfileUpdateRequest {
            user_id: user.id.clone(),
            name: form.name.trim().to_string(),
            birthdate: form.birthdate.clone(),
            current_password: form.current_password.clone(),
            new_password: form.new_password.clone(),
        };

        tracing::debug!(user_id = %request.user_id, "submitting profile update");
        let response = self
            .api
            .update_profile(&request)
            .await
            .map_err(|e| report_api_error(&self.toasts, e, PROFILE_UPDATE_FAILED_MESSAGE))?;

        user.apply(response.data.user);
        if let Err(e) = self.session.save(user.clone()).await {
            tracing::warn!(error = %e, "failed to persist updated profile");
            self.toasts.error(PROFILE_UPDATE_FAILED_MESSAGE);
            return Err(e.into());
        }

        {
            let mut state = self.state.lock();
            state.user = Some(user.clone());
            state.editing = false;
            state.form.clear_passwords();
        }

        tracing::info!(user_id = %user.id, "profile updated");
        self.toasts.success(PROFILE_UPDATED_MESSAGE);
        Ok(user)
    }
}
