//! Configuration store — owns the active schedule record and its
//! persistence.
//!
//! All config mutation in the firmware funnels through this type. Two
//! rules hold everywhere:
//!
//! * **Validate at the boundary.** A record is checked wholesale before it
//!   becomes active; rejected input leaves the active record untouched. A
//!   stored record that fails validation on load is discarded and replaced
//!   by the safe default — never repaired field-by-field.
//! * **Persist only on change.** The serialized record is compared
//!   byte-for-byte against storage before writing, so a control loop that
//!   re-applies the same config does not wear the flash.

use log::{info, warn};

use crate::app::ports::{ConfigError, StoragePort};
use crate::config::{DailyWindow, Date, ScheduleConfig, ScheduleMode};

/// NVS namespace for all pump-controller keys.
pub const NAMESPACE: &str = "aquactl";

/// Key holding the postcard-serialized [`ScheduleConfig`].
pub const CONFIG_KEY: &str = "schedcfg";

/// Largest serialized record we will read back. The record is a handful
/// of bytes; anything bigger than this is corrupt by definition.
const MAX_RECORD_LEN: usize = 64;

pub struct ConfigStore {
    active: ScheduleConfig,
    /// True when the last load discarded a stored record.
    substituted: bool,
}

impl ConfigStore {
    /// Load the stored record, substituting (and persisting) the safe
    /// default when the record is missing, undecodable, or fails
    /// validation. Infallible: a broken storage backend degrades to the
    /// in-memory default.
    pub fn load(storage: &mut impl StoragePort) -> Self {
        let mut buf = [0u8; MAX_RECORD_LEN];
        let stored = match storage.read(NAMESPACE, CONFIG_KEY, &mut buf) {
            Ok(len) => postcard::from_bytes::<ScheduleConfig>(&buf[..len]).ok(),
            Err(_) => None,
        };

        match stored {
            Some(cfg) if cfg.validate().is_ok() => {
                info!("config loaded: {}", cfg);
                Self {
                    active: cfg,
                    substituted: false,
                }
            }
            Some(_) => {
                warn!("stored config failed validation, substituting default");
                Self::reset_to_default(storage)
            }
            None => {
                warn!("no readable config record, substituting default");
                Self::reset_to_default(storage)
            }
        }
    }

    fn reset_to_default(storage: &mut impl StoragePort) -> Self {
        let store = Self {
            active: ScheduleConfig::safe_default(),
            substituted: true,
        };
        if let Err(e) = store.persist_if_changed(storage) {
            warn!("could not persist default config: {}", e);
        }
        store
    }

    /// Whether [`load`](Self::load) replaced a stored record with the
    /// default.
    pub fn was_reset(&self) -> bool {
        self.substituted
    }

    pub fn active(&self) -> &ScheduleConfig {
        &self.active
    }

    /// Validate and activate a full record, clearing the suspend-today
    /// flag. Persists only when the serialized bytes differ from storage.
    pub fn apply(
        &mut self,
        mut new: ScheduleConfig,
        storage: &mut impl StoragePort,
    ) -> Result<(), ConfigError> {
        new.validate()?;
        new.suspend_today = false;

        if new.window_end_minutes() <= new.window_start_minutes() {
            // Accepted but inert: the evaluator never fires such a window.
            warn!("schedule window end <= start, schedule will never fire");
        }

        self.active = new;
        self.persist_if_changed(storage)?;
        info!("config applied: {}", self.active);
        Ok(())
    }

    /// Switch to a weekday-mask schedule. Enables the schedule and clears
    /// suspend-today as part of the apply.
    pub fn configure_by_weekday(
        &mut self,
        weekdays: u8,
        window: DailyWindow,
        storage: &mut impl StoragePort,
    ) -> Result<(), ConfigError> {
        self.configure(ScheduleMode::ByWeekday { weekdays }, window, storage)
    }

    /// Switch to an every-N-days schedule anchored at `anchor`.
    pub fn configure_by_interval(
        &mut self,
        interval_days: u8,
        anchor: Date,
        window: DailyWindow,
        storage: &mut impl StoragePort,
    ) -> Result<(), ConfigError> {
        self.configure(
            ScheduleMode::ByInterval {
                interval_days,
                anchor,
            },
            window,
            storage,
        )
    }

    /// Switch to a single-date schedule.
    pub fn configure_by_date(
        &mut self,
        target: Date,
        window: DailyWindow,
        storage: &mut impl StoragePort,
    ) -> Result<(), ConfigError> {
        self.configure(ScheduleMode::ByDate { target }, window, storage)
    }

    fn configure(
        &mut self,
        mode: ScheduleMode,
        window: DailyWindow,
        storage: &mut impl StoragePort,
    ) -> Result<(), ConfigError> {
        let candidate = ScheduleConfig {
            enabled: true,
            suspend_today: false,
            mode,
            start_hour: window.start_hour,
            start_minute: window.start_minute,
            end_hour: window.end_hour,
            end_minute: window.end_minute,
        };
        self.apply(candidate, storage)
    }

    /// Flip only the master switch.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        storage: &mut impl StoragePort,
    ) -> Result<(), ConfigError> {
        self.active.enabled = enabled;
        self.persist_if_changed(storage)?;
        info!("schedule {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    /// Suppress automatic operation until [`resume_today`](Self::resume_today)
    /// or the next apply.
    pub fn suspend_today(&mut self, storage: &mut impl StoragePort) -> Result<(), ConfigError> {
        self.set_suspend(true, storage)
    }

    /// Clear the suspend-today flag.
    pub fn resume_today(&mut self, storage: &mut impl StoragePort) -> Result<(), ConfigError> {
        self.set_suspend(false, storage)
    }

    fn set_suspend(
        &mut self,
        suspend: bool,
        storage: &mut impl StoragePort,
    ) -> Result<(), ConfigError> {
        if self.active.suspend_today != suspend {
            self.active.suspend_today = suspend;
            self.persist_if_changed(storage)?;
            info!("suspend-today {}", if suspend { "set" } else { "cleared" });
        }
        Ok(())
    }

    /// Serialize the active record and write it only if storage holds
    /// different bytes. Returns whether a write happened.
    fn persist_if_changed(&self, storage: &mut impl StoragePort) -> Result<bool, ConfigError> {
        let bytes = postcard::to_allocvec(&self.active).map_err(|_| ConfigError::Corrupted)?;

        let mut buf = [0u8; MAX_RECORD_LEN];
        if let Ok(len) = storage.read(NAMESPACE, CONFIG_KEY, &mut buf) {
            if buf[..len] == bytes[..] {
                return Ok(false);
            }
        }

        storage.write(NAMESPACE, CONFIG_KEY, &bytes)?;
        Ok(true)
    }
}
