//! Unified error type for the firmware composition root.
//!
//! Subsystem errors stay typed at their own boundaries
//! ([`ConfigError`](crate::app::ports::ConfigError),
//! [`StorageError`](crate::app::ports::StorageError)); this funnel exists
//! so `main()` can propagate any of them with `?` behind one type.

use core::fmt;

use crate::app::ports::StorageError;
use crate::drivers::hw::HwInitError;

#[derive(Debug)]
pub enum Error {
    /// Peripheral initialisation failed.
    Hw(HwInitError),
    /// Persistent storage could not be brought up.
    Storage(StorageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hw(e) => write!(f, "hw: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Hw(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
