//! REST client for the TUPT Thesis Archive API
//!
//! This crate provides the wire types exchanged with the archive backend
//! and a thin HTTP client for the registration, login and profile endpoints.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod types;

pub use client::{ArchiveClient, ClientConfig};
pub use types::{
    LoginRequest, LoginResponse, MessageResponse, ProfileUpdateRequest, ProfileUpdateResponse,
    RegisterRequest, UserPatch, UserRecord,
};

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Error types for API operations
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Connection failure, timeout, or an unreadable response body
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("Request rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Message supplied by the server, if any
        message: Option<String>,
    },

    /// Request body could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether the failure happened below the application layer
    ///
    /// Rejections carry a server decision; everything else means the
    /// server could not be reached or understood.
    pub fn is_network_error(&self) -> bool {
        !matches!(self, ApiError::Rejected { .. })
    }

    /// Server-supplied message for a rejection
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
