//! User interface state for the TUPT Thesis Archive client
//!
//! This crate holds the platform-independent half of the UI: routes and the
//! navigation stack, the hamburger menu, the header search field, and the
//! presentation models for toasts, the password meter and analysis scores.
//!
//! # Modules
//!
//! - [`navigation`] - Routes and the navigation stack
//! - [`menu`] - Hamburger side menu
//! - [`header`] - Header search field
//! - [`components`] - Presentation models for shared widgets

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod header;
pub mod menu;
pub mod navigation;

pub use components::{ScoreCard, StrengthMeter, ToastView};
pub use header::HeaderSearch;
pub use menu::{HamburgerMenu, MenuAction, MenuItem, UserSection, MENU_ITEMS};
pub use navigation::{NavigationStack, Route, StackEntry};
