//! System clock adapter.
//!
//! Implements [`ClockPort`] for both targets:
//!
//! - **`target_os = "espidf"`** — monotonic time from
//!   `esp_timer_get_time()`, civil time from `gettimeofday` +
//!   `localtime_r` (the RTC/SNTP layer keeps the system clock set).
//! - **`not(target_os = "espidf")`** — `std::time::Instant` for monotonic
//!   time, `std::time::SystemTime` (UTC) for civil time.
//!
//! A wall clock reading before 2024-01-01 is treated as unset — an RTC
//! that lost power reports a default date, and running a schedule against
//! it would energize the pump at arbitrary times.

use crate::app::ports::ClockPort;
use crate::clock::DateTime;

/// Unix timestamp of 2024-01-01 00:00:00 UTC; anything earlier means the
/// wall clock was never set.
const EPOCH_2024: i64 = 1_704_067_200;

pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
impl ClockPort for SystemClock {
    fn now(&mut self) -> Option<DateTime> {
        use crate::config::Date;
        use esp_idf_svc::sys;

        let mut tv = sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: plain libc call with a valid out-pointer.
        if unsafe { sys::gettimeofday(&mut tv, core::ptr::null_mut()) } != 0 {
            return None;
        }
        if i64::from(tv.tv_sec) < EPOCH_2024 {
            return None;
        }

        let secs = tv.tv_sec as sys::time_t;
        let mut tm: sys::tm = unsafe { core::mem::zeroed() };
        // SAFETY: localtime_r writes into the caller-provided tm.
        if unsafe { sys::localtime_r(&secs, &mut tm) }.is_null() {
            return None;
        }

        let date = Date {
            day: tm.tm_mday as u8,
            month: (tm.tm_mon + 1) as u8,
            year: (tm.tm_year + 1900) as u16,
        };
        Some(DateTime::from_parts(
            date,
            tm.tm_hour as u8,
            tm.tm_min as u8,
            tm.tm_sec as u8,
        ))
    }

    fn millis(&mut self) -> u64 {
        // SAFETY: esp_timer_get_time is always safe to call after boot.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1000
    }
}

#[cfg(not(target_os = "espidf"))]
impl ClockPort for SystemClock {
    fn now(&mut self) -> Option<DateTime> {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .ok()?
            .as_secs() as i64;
        if secs < EPOCH_2024 {
            return None;
        }
        Some(DateTime::from_unix_seconds(secs))
    }

    fn millis(&mut self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn host_clock_is_set_and_monotonic() {
        let mut clock = SystemClock::new();
        let now = clock.now().expect("host wall clock is set");
        assert!(now.date.year >= 2024);

        let a = clock.millis();
        let b = clock.millis();
        assert!(b >= a);
    }
}
