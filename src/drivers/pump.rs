//! Pump relay driver.
//!
//! Owns the relay output pin and caches the commanded state so the rest of
//! the firmware can ask "is the pump on" without reading hardware back.
//! Writes are level-idempotent; the driver still skips redundant GPIO
//! writes so the relay line is only touched on actual changes.

use log::info;

use crate::drivers::hw;
use crate::pins;

pub struct PumpRelay {
    on: bool,
}

impl PumpRelay {
    /// Construct with the relay forced off. `hw::init_gpio` must already
    /// have configured the pin.
    pub fn new() -> Self {
        hw::gpio_write(pins::PUMP_RELAY_GPIO, false);
        Self { on: false }
    }

    /// Drive the relay to `on`. No-op if already in that state.
    pub fn set(&mut self, on: bool) {
        if on == self.on {
            return;
        }
        hw::gpio_write(pins::PUMP_RELAY_GPIO, on);
        self.on = on;
        info!("pump {}", if on { "ON" } else { "OFF" });
    }

    /// Last commanded state.
    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Default for PumpRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_off_and_tracks_commanded_state() {
        let mut pump = PumpRelay::new();
        assert!(!pump.is_on());

        pump.set(true);
        assert!(pump.is_on());
        assert!(hw::gpio_read(pins::PUMP_RELAY_GPIO));

        pump.set(true); // redundant
        assert!(pump.is_on());

        pump.set(false);
        assert!(!pump.is_on());
        assert!(!hw::gpio_read(pins::PUMP_RELAY_GPIO));
    }
}
