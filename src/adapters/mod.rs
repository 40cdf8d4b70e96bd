//! Driven adapters — implementations of the port traits in
//! [`crate::app::ports`].
//!
//! Each adapter is dual-target: ESP-IDF bindings under
//! `#[cfg(target_os = "espidf")]`, a host simulation otherwise.

pub mod gpio;
pub mod log_sink;
pub mod nvs;
pub mod time;
