//! Mock hardware ports for integration tests.
//!
//! Records pump transitions and captures emitted events so tests can
//! assert on the full history without touching real GPIO.

use aquactl::app::events::AppEvent;
use aquactl::app::ports::{ActuatorPort, EventSink, InputPort};

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Raw level fed to the gesture classifier (true = released).
    pub button_level: bool,
    pump_on: bool,
    /// Every pump state *change*, in order.
    pub pump_transitions: Vec<bool>,
}

impl MockHardware {
    pub fn new() -> Self {
        Self {
            button_level: true,
            pump_on: false,
            pump_transitions: Vec::new(),
        }
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockHardware {
    fn button_level(&mut self) -> bool {
        self.button_level
    }
}

impl ActuatorPort for MockHardware {
    fn set_pump(&mut self, on: bool) {
        if on != self.pump_on {
            self.pump_transitions.push(on);
            self.pump_on = on;
        }
    }

    fn pump_is_on(&self) -> bool {
        self.pump_on
    }
}

// ── CaptureSink ───────────────────────────────────────────────

pub struct CaptureSink {
    pub events: Vec<AppEvent>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count<F: Fn(&AppEvent) -> bool>(&self, pred: F) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for CaptureSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for CaptureSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
