//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (button input, pump relay, wall clock, event sinks,
//! storage) implement these traits. The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches hardware directly and the whole
//! control cycle runs under test with mock ports.

use crate::clock::DateTime;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the manual-override button.
pub trait InputPort {
    /// Current raw button level (true = high = released, active low).
    fn button_level(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the pump relay.
pub trait ActuatorPort {
    /// Drive the pump relay. Implementations must be idempotent.
    fn set_pump(&mut self, on: bool);

    /// Actual (last-commanded) pump state. The short-press toggle keys off
    /// this, not off the override state, so "pump on by schedule" and
    /// "pump on by manual" toggle identically.
    fn pump_is_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: RTC / system time → domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock and monotonic time source.
pub trait ClockPort {
    /// Current civil date-time, or `None` while the clock is unset
    /// (e.g. RTC lost power). The service treats an unset clock as
    /// "schedule evaluates off" rather than an error.
    fn now(&mut self) -> Option<DateTime>;

    /// Monotonic milliseconds since boot. Shared by the gesture
    /// classifier and the manual-on safety timeout.
    fn millis(&mut self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log,
/// telemetry uplink, test capture).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Persistent key-value storage (NVS on target, in-memory map on host).
///
/// Keys are namespaced to prevent collisions between subsystems. Write
/// operations MUST be atomic — no partial records on power loss; the
/// ESP-IDF NVS API guarantees this natively.
pub trait StoragePort {
    /// Read a value. Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key. Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No record found in storage (first boot).
    NotFound,
    /// Stored record failed deserialization or validation.
    Corrupted,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Underlying storage is full.
    StorageFull,
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::StorageFull => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => Self::NotFound,
            StorageError::Full => Self::StorageFull,
            StorageError::IoError => Self::IoError,
        }
    }
}
