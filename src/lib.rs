//! Water-pump scheduler firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod fsm;
pub mod schedule;
pub mod store;

pub mod pins;

// Dual-target modules: ESP-IDF implementations are guarded by cfg
// attributes inside, the host fallbacks keep everything testable.
pub mod adapters;
pub mod drivers;
