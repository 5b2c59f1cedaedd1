//! Authentication API seam and submission outcomes
//!
//! Screen flows talk to the backend through [`AuthApi`] so they can be
//! driven by a mock in tests and by [`ArchiveClient`] in the app.

use app_state::{SessionStateError, ToastDispatcher};
use archive_client::{
    ApiError, ArchiveClient, LoginRequest, LoginResponse, MessageResponse, ProfileUpdateRequest,
    ProfileUpdateResponse, RegisterRequest,
};
use async_trait::async_trait;
use thiserror::Error;

use crate::validation::ValidationFailure;

/// Toast text for any failure to reach or understand the server
pub const NETWORK_ERROR_MESSAGE: &str = "Cannot connect to server. Please try again.";

/// Backend operations used by the screen flows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Create an account
    async fn register(&self, request: &RegisterRequest) -> archive_client::Result<MessageResponse>;

    /// Authenticate
    async fn login(&self, request: &LoginRequest) -> archive_client::Result<LoginResponse>;

    /// Update name, birthdate and optionally password
    async fn update_profile(
        &self,
        request: &ProfileUpdateRequest,
    ) -> archive_client::Result<ProfileUpdateResponse>;
}

#[async_trait]
impl AuthApi for ArchiveClient {
    async fn register(&self, request: &RegisterRequest) -> archive_client::Result<MessageResponse> {
        ArchiveClient::register(self, request).await
    }

    async fn login(&self, request: &LoginRequest) -> archive_client::Result<LoginResponse> {
        ArchiveClient::login(self, request).await
    }

    async fn update_profile(
        &self,
        request: &ProfileUpdateRequest,
    ) -> archive_client::Result<ProfileUpdateResponse> {
        ArchiveClient::update_profile(self, request).await
    }
}

/// Why a form submission did not succeed
///
/// Every variant except [`SubmitError::Busy`] has already been shown to
/// the user as an error toast by the time it is returned.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Local validation failed; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// A submission from the same form is still outstanding
    #[error("A submission is already in progress")]
    Busy,

    /// The server could not be reached or its reply was unreadable
    #[error("Cannot connect to server. Please try again.")]
    Network(String),

    /// The server refused the request
    #[error("{0}")]
    Rejected(String),

    /// Session storage failed
    #[error("Session error: {0}")]
    Session(#[from] SessionStateError),
}

/// Result type for form submissions
pub type Result<T> = std::result::Result<T, SubmitError>;

/// Report a validation failure and convert it
pub(crate) fn reject_invalid(toasts: &ToastDispatcher, failure: ValidationFailure) -> SubmitError {
    tracing::debug!(code = failure.code(), "validation failed");
    toasts.error(failure.message());
    SubmitError::Validation(failure)
}

/// Report an API failure and convert it
///
/// Rejections show the server's message, or `fallback` when it sent none.
pub(crate) fn report_api_error(
    toasts: &ToastDispatcher,
    err: ApiError,
    fallback: &str,
) -> SubmitError {
    if err.is_network_error() {
        tracing::warn!(error = %err, "request failed");
        toasts.error(NETWORK_ERROR_MESSAGE);
        return SubmitError::Network(err.to_string());
    }

    let message = err.server_message().unwrap_or(fallback).to_string();
    tracing::debug!(error = %err, "request rejected");
    toasts.error(message.clone());
    SubmitError::Rejected(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_state::Severity;

    #[tokio::test]
    async fn test_network_error_uses_fixed_text() {
        let toasts = ToastDispatcher::new();
        let err = report_api_error(&toasts, ApiError::Network("refused".into()), "Login failed");

        assert!(matches!(err, SubmitError::Network(_)));
        let state = toasts.state();
        let message = state.message().unwrap();
        assert_eq!(message.text, NETWORK_ERROR_MESSAGE);
        assert_eq!(message.severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_rejection_prefers_server_message() {
        let toasts = ToastDispatcher::new();
        let err = report_api_error(
            &toasts,
            ApiError::Rejected { status: 400, message: Some("ID already registered".into()) },
            "Registration failed",
        );

        assert!(matches!(&err, SubmitError::Rejected(m) if m == "ID already registered"));
        assert_eq!(toasts.state().message().unwrap().text, "ID already registered");
    }

    #[tokio::test]
    async fn test_rejection_falls_back() {
        let toasts = ToastDispatcher::new();
        let err = report_api_error(
            &toasts,
            ApiError::Rejected { status: 500, message: None },
            "Failed to update profile",
        );

        assert_eq!(err.to_string(), "Failed to update profile");
    }

    #[tokio::test]
    async fn test_validation_failure_is_toasted() {
        let toasts = ToastDispatcher::new();
        let err = reject_invalid(&toasts, ValidationFailure::PasswordMismatch);

        assert_eq!(err.to_string(), "Passwords do not match");
        assert_eq!(toasts.state().message().unwrap().text, "Passwords do not match");
    }
}
