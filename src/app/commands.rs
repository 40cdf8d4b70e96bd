//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (remote control
//! surface, serial console, tests) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.
//! They enter as already-parsed values; transport and wire format are the
//! caller's problem.

use crate::config::{DailyWindow, ScheduleMode};

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy)]
pub enum AppCommand {
    /// Remote equivalent of a short press toward "on" (starts the
    /// manual-on safety timeout).
    ForceOn,

    /// Remote equivalent of a short press toward "off".
    ForceOff,

    /// Remote equivalent of a long-press reset: back to Auto and clear
    /// the suspend-today flag.
    ResetToAuto,

    /// Flip the schedule master switch without touching the rest of the
    /// record.
    SetEnabled(bool),

    /// Suppress automatic operation until reset or reconfiguration.
    SuspendToday,

    /// Clear the suspend-today flag.
    ResumeToday,

    /// Replace the day-selection rule and daily window. Validated at the
    /// config-store boundary; rejected input leaves the active record
    /// untouched.
    Configure {
        mode: ScheduleMode,
        window: DailyWindow,
    },
}
