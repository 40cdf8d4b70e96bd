//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — log to serial, push to a display,
//! publish to telemetry.

use crate::config::ScheduleConfig;
use crate::fsm::OverrideState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries the active config).
    Started(ScheduleConfig),

    /// The override machine transitioned between states.
    OverrideChanged {
        from: OverrideState,
        to: OverrideState,
    },

    /// The pump relay changed state.
    PumpChanged(bool),

    /// A new schedule record was validated and applied.
    ConfigApplied(ScheduleConfig),

    /// A stored record failed validation and was replaced by the safe
    /// default.
    ConfigReset,

    /// A configuration request was rejected at the validation boundary.
    ConfigRejected(&'static str),

    /// The suspend-today flag was set or cleared.
    SuspendChanged(bool),
}
