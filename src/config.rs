//! Persisted pump schedule configuration.
//!
//! One compact record holds everything the schedule evaluator needs. The
//! record is versionless and validated wholesale on load: a record failing
//! any range check is replaced by [`ScheduleConfig::safe_default`] rather
//! than repaired field-by-field, so a corrupt byte can never smuggle a
//! half-valid schedule into the evaluator.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Year range accepted for any embedded date.
pub const YEAR_MIN: u16 = 2024;
pub const YEAR_MAX: u16 = 2100;

/// Maximum repeat period for interval schedules, in days.
pub const INTERVAL_DAYS_MAX: u8 = 30;

/// A calendar date. Range-checked only — 31 February passes validation.
/// Callers must not assume calendar correctness beyond the field bounds;
/// this is an accepted simplification inherited from the deployed system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    /// 1–31
    pub day: u8,
    /// 1–12
    pub month: u8,
    /// Full year, 2024–2100
    pub year: u16,
}

impl Date {
    fn validate(&self, what: &'static str) -> Result<(), ConfigError> {
        if self.day < 1 || self.day > 31 || self.month < 1 || self.month > 12 {
            return Err(ConfigError::ValidationFailed(what));
        }
        if self.year < YEAR_MIN || self.year > YEAR_MAX {
            return Err(ConfigError::ValidationFailed(what));
        }
        Ok(())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day, self.month, self.year)
    }
}

/// Daily activation window as carried by configuration requests. This is
/// a parameter object only; [`ScheduleConfig`] persists the four fields
/// flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyWindow {
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

/// Which rule family decides the active days.
///
/// The daily activation window (start/end time) is shared by all modes and
/// lives on [`ScheduleConfig`]; only the day-selection inputs differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleMode {
    /// Active on the weekdays whose bit is set. Bit positions follow the
    /// Sunday = 0 convention of [`crate::clock::Weekday`].
    ByWeekday { weekdays: u8 },
    /// Active every `interval_days` days counted from `anchor` at the
    /// window start time.
    ByInterval { interval_days: u8, anchor: Date },
    /// Active on a single calendar day.
    ByDate { target: Date },
}

/// The persisted schedule record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Master switch. When false the evaluator always says "off".
    pub enabled: bool,
    /// One-shot emergency suppression: forces "off" in Auto until cleared
    /// by a long-press reset or by applying a new schedule.
    pub suspend_today: bool,
    pub mode: ScheduleMode,
    /// Daily activation window, half-open `[start, end)`.
    /// `end <= start` never fires (overnight windows are unsupported).
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

impl ScheduleConfig {
    /// The record substituted whenever a stored record fails validation:
    /// disabled, Mon–Fri, 06:00–22:00. Disabled means the pump stays off
    /// until someone deliberately configures a schedule.
    pub fn safe_default() -> Self {
        Self {
            enabled: false,
            suspend_today: false,
            mode: ScheduleMode::ByWeekday {
                weekdays: 0b0111110,
            },
            start_hour: 6,
            start_minute: 0,
            end_hour: 22,
            end_minute: 0,
        }
    }

    /// Full invariant check (range bounds on every field). All-or-nothing:
    /// callers substitute [`safe_default`](Self::safe_default) on failure
    /// instead of repairing individual fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_hour > 23 || self.end_hour > 23 {
            return Err(ConfigError::ValidationFailed("hour must be 0–23"));
        }
        if self.start_minute > 59 || self.end_minute > 59 {
            return Err(ConfigError::ValidationFailed("minute must be 0–59"));
        }
        match &self.mode {
            ScheduleMode::ByWeekday { weekdays } => {
                if *weekdays & 0b1000_0000 != 0 {
                    return Err(ConfigError::ValidationFailed("weekday mask is 7 bits"));
                }
            }
            ScheduleMode::ByInterval {
                interval_days,
                anchor,
            } => {
                if *interval_days == 0 || *interval_days > INTERVAL_DAYS_MAX {
                    return Err(ConfigError::ValidationFailed("interval_days must be 1–30"));
                }
                anchor.validate("anchor date out of range")?;
            }
            ScheduleMode::ByDate { target } => {
                target.validate("target date out of range")?;
            }
        }
        Ok(())
    }

    /// Start of the daily window in minutes since midnight.
    pub fn window_start_minutes(&self) -> u16 {
        u16::from(self.start_hour) * 60 + u16::from(self.start_minute)
    }

    /// End of the daily window in minutes since midnight (exclusive).
    pub fn window_end_minutes(&self) -> u16 {
        u16::from(self.end_hour) * 60 + u16::from(self.end_minute)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::safe_default()
    }
}

impl fmt::Display for ScheduleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            ScheduleMode::ByWeekday { weekdays } => {
                write!(f, "weekdays {weekdays:#09b}")?;
            }
            ScheduleMode::ByInterval {
                interval_days,
                anchor,
            } => {
                write!(f, "every {interval_days}d from {anchor}")?;
            }
            ScheduleMode::ByDate { target } => write!(f, "on {target}")?,
        }
        write!(
            f,
            ", {:02}:{:02}–{:02}:{:02}, enabled={}, suspended={}",
            self.start_hour,
            self.start_minute,
            self.end_hour,
            self.end_minute,
            self.enabled,
            self.suspend_today
        )
    }
}
