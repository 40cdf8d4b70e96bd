//! Calendar time types shared by the schedule evaluator and clock adapters.
//!
//! The weekday convention is pinned crate-wide to the DS3231 RTC indexing:
//! **Sunday = 0 … Saturday = 6**. The weekday bitmask in
//! [`ScheduleMode::ByWeekday`](crate::config::ScheduleMode) uses the same
//! bit positions, so Mon–Fri is `0b0111110`.

use crate::config::Date;

/// Day of week, Sunday-first (DS3231 convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// Bit position of this weekday inside a 7-bit schedule mask.
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }

    /// Convert an index 0–6 (Sunday-first) back to a `Weekday`.
    /// Out-of-range input falls back to Sunday in release builds.
    pub fn from_index(idx: u8) -> Self {
        match idx {
            0 => Self::Sunday,
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            6 => Self::Saturday,
            _ => {
                debug_assert!(false, "invalid weekday index: {idx}");
                Self::Sunday
            }
        }
    }
}

/// A wall-clock instant as supplied by the clock collaborator.
///
/// `weekday` is carried rather than recomputed so that an RTC which reports
/// day-of-week directly stays authoritative; [`DateTime::from_parts`]
/// derives it for sources that only have a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub date: Date,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub weekday: Weekday,
}

impl DateTime {
    /// Build a `DateTime` from calendar fields, deriving the weekday.
    pub fn from_parts(date: Date, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            weekday: weekday_of(&date),
        }
    }

    /// Build a `DateTime` from a Unix timestamp (UTC).
    pub fn from_unix_seconds(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let tod = secs.rem_euclid(86_400);
        let date = civil_from_days(days);
        Self {
            date,
            hour: (tod / 3600) as u8,
            minute: (tod / 60 % 60) as u8,
            second: (tod % 60) as u8,
            weekday: weekday_from_days(days),
        }
    }

    /// Minutes since midnight, the unit of the daily activation window.
    pub fn minutes_of_day(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    /// Seconds since the Unix epoch. Used for day-interval arithmetic only;
    /// the RTC is assumed never to go backward within a session.
    pub fn total_seconds(&self) -> i64 {
        days_from_civil(&self.date) * 86_400
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }
}

/// Days since 1970-01-01 for a civil date (Howard Hinnant's algorithm).
/// Valid for the full `Date` range; no calendar validity check is applied
/// beyond what `Date` itself guarantees.
pub fn days_from_civil(date: &Date) -> i64 {
    let y = i64::from(date.year) - i64::from(date.month <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i64::from(date.month);
    let d = i64::from(date.day);
    let doy = (153 * (m + if m > 2 { -3 } else { 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> Date {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = mp + if mp < 10 { 3 } else { -9 };
    Date {
        day: d as u8,
        month: m as u8,
        year: (y + i64::from(m <= 2)) as u16,
    }
}

fn weekday_from_days(days: i64) -> Weekday {
    // 1970-01-01 was a Thursday (index 4, Sunday-first).
    Weekday::from_index(((days + 4).rem_euclid(7)) as u8)
}

/// Day of week for a civil date.
pub fn weekday_of(date: &Date) -> Weekday {
    weekday_from_days(days_from_civil(date))
}
