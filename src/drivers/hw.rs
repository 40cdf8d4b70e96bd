//! One-shot GPIO initialization and raw pin access.
//!
//! Thin shim over ESP-IDF sys calls. Called once from `main()` before the
//! control loop starts; the host build keeps pin levels in-memory so the
//! drivers behave identically under test.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::pins;

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_gpio() -> Result<(), HwInitError> {
    // SAFETY: called once from main() before the control loop; single-threaded.
    unsafe {
        let ret = gpio_set_direction(pins::PUMP_RELAY_GPIO, gpio_mode_t_GPIO_MODE_OUTPUT);
        if ret != ESP_OK {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        gpio_set_level(pins::PUMP_RELAY_GPIO, 0);

        let ret = gpio_set_direction(pins::BUTTON_GPIO, gpio_mode_t_GPIO_MODE_INPUT);
        if ret != ESP_OK {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        let ret = gpio_set_pull_mode(pins::BUTTON_GPIO, gpio_pull_mode_t_GPIO_PULLUP_ONLY);
        if ret != ESP_OK {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }
    log::info!("hw: GPIO configured (pump={}, button={})", pins::PUMP_RELAY_GPIO, pins::BUTTON_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_gpio() -> Result<(), HwInitError> {
    log::info!("hw(sim): GPIO init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin was configured as output in init_gpio().
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: pin was configured as input in init_gpio().
    unsafe { gpio_get_level(pin) != 0 }
}

// ── Host simulation backend ───────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::sync::Mutex;

    // Pin level table for the simulation; inputs default high (pull-up).
    static LEVELS: Mutex<[bool; 64]> = Mutex::new([true; 64]);

    pub fn write(pin: i32, high: bool) {
        if let Ok(mut levels) = LEVELS.lock() {
            levels[pin as usize & 63] = high;
        }
    }

    pub fn read(pin: i32) -> bool {
        LEVELS
            .lock()
            .map(|levels| levels[pin as usize & 63])
            .unwrap_or(true)
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim::write(pin, high);
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::read(pin)
}
