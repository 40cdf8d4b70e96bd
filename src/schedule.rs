//! Schedule evaluator.
//!
//! Pure function of (config, instant) → "should the pump be on". No side
//! effects, no clock access; the caller supplies one [`DateTime`] per
//! control cycle and the override state machine consumes the result.
//!
//! ## Known limitation
//!
//! The daily window is half-open `[start, end)` in minutes-since-midnight
//! and does **not** wrap across midnight: a window with `end <= start`
//! never fires. This mirrors the deployed behaviour; midnight-wrap intent
//! is deliberately not inferred.

use crate::clock::{DateTime, days_from_civil};
use crate::config::{ScheduleConfig, ScheduleMode};

/// Decide whether the schedule alone (ignoring overrides and the
/// suspend-today flag) wants the pump energized at `now`.
pub fn should_be_on(cfg: &ScheduleConfig, now: &DateTime) -> bool {
    if !cfg.enabled {
        return false;
    }

    match &cfg.mode {
        ScheduleMode::ByWeekday { weekdays } => {
            weekdays & now.weekday.mask() != 0 && in_window(cfg, now)
        }
        ScheduleMode::ByInterval {
            interval_days,
            anchor,
        } => {
            // Anchor sits at the window start time on the anchor date.
            // Euclidean division keeps "later that anchor day but before
            // the window" on day zero while anything before the anchor
            // date lands strictly negative.
            let anchor_secs = days_from_civil(anchor) * 86_400
                + i64::from(cfg.start_hour) * 3600
                + i64::from(cfg.start_minute) * 60;
            let days_passed = (now.total_seconds() - anchor_secs).div_euclid(86_400);

            if days_passed < 0 {
                return false; // Anchor in the future.
            }
            days_passed % i64::from(*interval_days) == 0 && in_window(cfg, now)
        }
        ScheduleMode::ByDate { target } => now.date == *target && in_window(cfg, now),
    }
}

/// Half-open membership test on the daily window.
fn in_window(cfg: &ScheduleConfig, now: &DateTime) -> bool {
    let t = now.minutes_of_day();
    t >= cfg.window_start_minutes() && t < cfg.window_end_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Date;

    fn base() -> ScheduleConfig {
        ScheduleConfig {
            enabled: true,
            ..ScheduleConfig::safe_default()
        }
    }

    fn at(date: Date, hour: u8, minute: u8) -> DateTime {
        DateTime::from_parts(date, hour, minute, 0)
    }

    // 2025-06-18 is a Wednesday, 2025-06-21 a Saturday.
    const WED: Date = Date {
        day: 18,
        month: 6,
        year: 2025,
    };
    const SAT: Date = Date {
        day: 21,
        month: 6,
        year: 2025,
    };

    #[test]
    fn disabled_config_is_always_off() {
        let cfg = ScheduleConfig {
            enabled: false,
            ..base()
        };
        assert!(!should_be_on(&cfg, &at(WED, 7, 0)));
        assert!(!should_be_on(&cfg, &at(SAT, 12, 0)));
    }

    #[test]
    fn weekday_fires_inside_window_on_active_day() {
        // Mon–Fri 06:00–22:00, Wednesday 07:00.
        assert!(should_be_on(&base(), &at(WED, 7, 0)));
    }

    #[test]
    fn weekday_silent_on_inactive_day() {
        // Saturday 07:00 with a Mon–Fri mask.
        assert!(!should_be_on(&base(), &at(SAT, 7, 0)));
    }

    #[test]
    fn window_boundaries_are_half_open() {
        let cfg = base();
        assert!(!should_be_on(&cfg, &at(WED, 5, 59)));
        assert!(should_be_on(&cfg, &at(WED, 6, 0))); // t == start → on
        assert!(should_be_on(&cfg, &at(WED, 21, 59)));
        assert!(!should_be_on(&cfg, &at(WED, 22, 0))); // t == end → off
    }

    #[test]
    fn empty_window_never_fires() {
        let cfg = ScheduleConfig {
            start_hour: 10,
            end_hour: 10,
            start_minute: 30,
            end_minute: 30,
            ..base()
        };
        assert!(!should_be_on(&cfg, &at(WED, 10, 30)));
    }

    #[test]
    fn overnight_window_never_fires() {
        // end < start is unsupported — no midnight wrap.
        let cfg = ScheduleConfig {
            start_hour: 22,
            end_hour: 6,
            ..base()
        };
        assert!(!should_be_on(&cfg, &at(WED, 23, 0)));
        assert!(!should_be_on(&cfg, &at(WED, 3, 0)));
    }

    #[test]
    fn interval_of_one_fires_every_day() {
        let cfg = ScheduleConfig {
            mode: ScheduleMode::ByInterval {
                interval_days: 1,
                anchor: Date {
                    day: 1,
                    month: 6,
                    year: 2025,
                },
            },
            ..base()
        };
        for day in 18..=21 {
            let d = Date {
                day,
                month: 6,
                year: 2025,
            };
            assert!(should_be_on(&cfg, &at(d, 12, 0)), "day {day}");
            assert!(!should_be_on(&cfg, &at(d, 23, 0)), "day {day} outside window");
        }
    }

    #[test]
    fn interval_respects_period() {
        let anchor = Date {
            day: 1,
            month: 6,
            year: 2025,
        };
        let cfg = ScheduleConfig {
            mode: ScheduleMode::ByInterval {
                interval_days: 3,
                anchor,
            },
            ..base()
        };
        // Days 1, 4, 7, ... fire; the rest do not.
        assert!(should_be_on(&cfg, &at(anchor, 12, 0)));
        assert!(!should_be_on(
            &cfg,
            &at(
                Date {
                    day: 2,
                    month: 6,
                    year: 2025
                },
                12,
                0
            )
        ));
        assert!(should_be_on(
            &cfg,
            &at(
                Date {
                    day: 4,
                    month: 6,
                    year: 2025
                },
                12,
                0
            )
        ));
    }

    #[test]
    fn interval_anchor_in_future_never_fires() {
        let cfg = ScheduleConfig {
            mode: ScheduleMode::ByInterval {
                interval_days: 1,
                anchor: Date {
                    day: 1,
                    month: 7,
                    year: 2025,
                },
            },
            ..base()
        };
        assert!(!should_be_on(&cfg, &at(WED, 12, 0)));
    }

    #[test]
    fn interval_day_before_anchor_is_negative_not_zero() {
        // 23:00 the night before the anchor is less than a day early; a
        // truncating division would call that "day zero" and fire inside a
        // late window. Floor division must not.
        let cfg = ScheduleConfig {
            mode: ScheduleMode::ByInterval {
                interval_days: 1,
                anchor: Date {
                    day: 19,
                    month: 6,
                    year: 2025,
                },
            },
            start_hour: 20,
            end_hour: 23,
            end_minute: 59,
            ..base()
        };
        assert!(!should_be_on(&cfg, &at(WED, 23, 0)));
        // The anchor evening itself fires.
        assert!(should_be_on(
            &cfg,
            &at(
                Date {
                    day: 19,
                    month: 6,
                    year: 2025
                },
                23,
                0
            )
        ));
    }

    #[test]
    fn by_date_fires_only_on_target() {
        let cfg = ScheduleConfig {
            mode: ScheduleMode::ByDate { target: WED },
            ..base()
        };
        assert!(should_be_on(&cfg, &at(WED, 7, 0)));
        assert!(!should_be_on(&cfg, &at(SAT, 7, 0)));
        assert!(!should_be_on(&cfg, &at(WED, 22, 0)));
    }
}
