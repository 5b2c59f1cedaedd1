//! Storage layer for the TUPT Thesis Archive client
//!
//! This crate provides the device-local key-value store that backs
//! session persistence.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;

pub use kv::{KvConfig, KvError, KvStore};
