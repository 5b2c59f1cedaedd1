//! Core application logic for the TUPT Thesis Archive client
//!
//! This crate contains the input validation pipeline and the screen flows
//! for registration, login, profile editing, thesis analysis and the home
//! feature search.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod features;
pub mod login;
pub mod profile;
pub mod register;
pub mod thesis;
pub mod validation;

pub use auth::{AuthApi, SubmitError, NETWORK_ERROR_MESSAGE};
pub use features::{Feature, FeatureSearch};
pub use login::LoginFlow;
pub use profile::ProfileFlow;
pub use register::RegisterFlow;
pub use thesis::{AnalysisConfig, AnalysisResult, SelectedDocument, ThesisAnalysisFlow, ThesisError};
