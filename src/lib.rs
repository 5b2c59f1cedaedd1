//! TUPT Thesis Archive client
//!
//! Top-level crate: configuration, logging setup, and the [`App`] that wires
//! storage, the API client, session state and the toast channel together.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;

pub use app::App;
pub use config::AppConfig;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this more than
/// once is harmless; later calls are ignored.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(false)
        .try_init();
}
