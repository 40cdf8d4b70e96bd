//! Event sink that forwards application events to the `log` facade.
//!
//! The default sink on both targets: events end up on the serial console
//! on hardware and in test output on the host.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(cfg) => info!("started with config: {}", cfg),
            AppEvent::OverrideChanged { from, to } => {
                info!("override changed: {:?} -> {:?}", from, to)
            }
            AppEvent::PumpChanged(on) => info!("pump changed: {}", if *on { "ON" } else { "OFF" }),
            AppEvent::ConfigApplied(cfg) => info!("config applied: {}", cfg),
            AppEvent::ConfigReset => warn!("stored config was reset to default"),
            AppEvent::ConfigRejected(reason) => warn!("config rejected: {}", reason),
            AppEvent::SuspendChanged(suspended) => info!(
                "schedule {}",
                if *suspended { "suspended for today" } else { "resumed" }
            ),
        }
    }
}
