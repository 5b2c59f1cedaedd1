//! Application state for the TUPT Thesis Archive client
//!
//! This crate provides the process-wide pieces of state every screen
//! shares: the signed-in user, the toast notification channel, and
//! submission in-flight tracking.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;
pub mod submit;
pub mod toast;

pub use session::{KvSessionStore, SessionContext, SessionStateError, SessionStore, USER_DATA_KEY};
pub use submit::{InFlight, InFlightGuard};
pub use toast::{
    Severity, ToastDispatcher, ToastError, ToastMessage, ToastPhase, ToastState, ToastSurface,
    ToastTiming,
};
