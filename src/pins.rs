//! Board pin assignments.
//!
//! Single source of truth for which GPIO does what. Raw pin numbers are
//! passed to the `drivers::hw` shim; nothing outside `drivers/` should
//! touch these directly.

/// Momentary push button, active low with internal pull-up.
pub const BUTTON_GPIO: i32 = 4;

/// Pump relay coil driver, active high.
pub const PUMP_RELAY_GPIO: i32 = 5;
