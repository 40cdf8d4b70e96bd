//! GPIO adapter bundling the physical input and actuator ports.
//!
//! Wraps the button pin and the pump relay driver behind [`InputPort`]
//! and [`ActuatorPort`] so the service sees one hardware handle. The
//! host build reads and writes the simulated pin table, which is how the
//! drivers get exercised in unit tests.

use crate::app::ports::{ActuatorPort, InputPort};
use crate::drivers::hw;
use crate::drivers::pump::PumpRelay;
use crate::pins;

pub struct GpioAdapter {
    pump: PumpRelay,
}

impl GpioAdapter {
    /// `hw::init_gpio` must have run first.
    pub fn new() -> Self {
        Self {
            pump: PumpRelay::new(),
        }
    }
}

impl Default for GpioAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for GpioAdapter {
    fn button_level(&mut self) -> bool {
        hw::gpio_read(pins::BUTTON_GPIO)
    }
}

impl ActuatorPort for GpioAdapter {
    fn set_pump(&mut self, on: bool) {
        self.pump.set(on);
    }

    fn pump_is_on(&self) -> bool {
        self.pump.is_on()
    }
}
