//! Hardware drivers.
//!
//! Each driver talks to its peripheral through the `hw` shim, which maps
//! to ESP-IDF GPIO calls on target and to an in-memory pin table on the
//! host. Drivers hold no business logic; classification and policy live
//! in the `app` layer.

pub mod button;
pub mod hw;
pub mod pump;
