//! End-to-end control-cycle tests: button, schedule, overrides, commands
//! and persistence together, driven tick by tick like the firmware loop.

use aquactl::adapters::nvs::NvsStorage;
use aquactl::app::commands::AppCommand;
use aquactl::app::events::AppEvent;
use aquactl::app::ports::ActuatorPort;
use aquactl::app::service::AppService;
use aquactl::clock::DateTime;
use aquactl::config::{DailyWindow, Date, ScheduleMode};
use aquactl::fsm::{MAX_MANUAL_ON_MS, OverrideState};
use aquactl::store::ConfigStore;

use crate::mock_hw::{CaptureSink, MockHardware};

const TICK_MS: u64 = 50;

// 2025-06-18 is a Wednesday, 2025-06-21 a Saturday.
fn wed(hour: u8, minute: u8) -> DateTime {
    DateTime::from_parts(
        Date {
            day: 18,
            month: 6,
            year: 2025,
        },
        hour,
        minute,
        0,
    )
}

fn sat(hour: u8, minute: u8) -> DateTime {
    DateTime::from_parts(
        Date {
            day: 21,
            month: 6,
            year: 2025,
        },
        hour,
        minute,
        0,
    )
}

fn six_to_ten_pm() -> DailyWindow {
    DailyWindow {
        start_hour: 6,
        start_minute: 0,
        end_hour: 22,
        end_minute: 0,
    }
}

struct Harness {
    app: AppService,
    hw: MockHardware,
    storage: NvsStorage,
    sink: CaptureSink,
    now_ms: u64,
}

impl Harness {
    fn new() -> Self {
        let mut storage = NvsStorage::new();
        let store = ConfigStore::load(&mut storage);
        let mut app = AppService::new(store);
        let mut sink = CaptureSink::new();
        app.start(&mut sink);
        Self {
            app,
            hw: MockHardware::new(),
            storage,
            sink,
            now_ms: 0,
        }
    }

    fn cycle(&mut self, now: Option<DateTime>) {
        self.now_ms += TICK_MS;
        self.app.run_cycle(
            now,
            self.now_ms,
            &mut self.hw,
            &mut self.storage,
            &mut self.sink,
        );
    }

    fn run_for(&mut self, duration_ms: u64, now: Option<DateTime>) {
        let end = self.now_ms + duration_ms;
        while self.now_ms < end {
            self.cycle(now);
        }
    }

    /// Hold the button for `hold_ms`, then release and settle.
    fn press(&mut self, hold_ms: u64, now: Option<DateTime>) {
        self.hw.button_level = false;
        self.run_for(hold_ms, now);
        self.hw.button_level = true;
        self.run_for(300, now);
    }

    fn configure_mon_fri(&mut self) {
        assert!(self.app.enqueue(AppCommand::Configure {
            mode: ScheduleMode::ByWeekday {
                weekdays: 0b0111110,
            },
            window: six_to_ten_pm(),
        }));
        self.cycle(None);
    }
}

// ── Boot and schedule basics ──────────────────────────────────

#[test]
fn default_boot_keeps_pump_off() {
    let mut h = Harness::new();
    h.run_for(500, Some(wed(7, 0)));
    assert!(!h.hw.pump_is_on());
    assert!(h.hw.pump_transitions.is_empty());
}

#[test]
fn mon_fri_schedule_runs_wednesday_not_saturday() {
    let mut h = Harness::new();
    h.configure_mon_fri();

    h.cycle(Some(wed(7, 0)));
    assert!(h.hw.pump_is_on(), "Wednesday 07:00 is inside Mon–Fri window");

    h.cycle(Some(sat(7, 0)));
    assert!(!h.hw.pump_is_on(), "Saturday is outside the weekday mask");
}

#[test]
fn window_boundaries_half_open_end_to_end() {
    let mut h = Harness::new();
    h.configure_mon_fri();

    h.cycle(Some(wed(5, 59)));
    assert!(!h.hw.pump_is_on());
    h.cycle(Some(wed(6, 0)));
    assert!(h.hw.pump_is_on());
    h.cycle(Some(wed(21, 59)));
    assert!(h.hw.pump_is_on());
    h.cycle(Some(wed(22, 0)));
    assert!(!h.hw.pump_is_on());
}

#[test]
fn pump_change_events_fire_only_on_transitions() {
    let mut h = Harness::new();
    h.configure_mon_fri();
    h.run_for(1000, Some(wed(7, 0)));

    let on_events = h
        .sink
        .count(|e| matches!(e, AppEvent::PumpChanged(true)));
    assert_eq!(on_events, 1, "steady on must not re-emit");
}

// ── Manual override via the button ────────────────────────────

#[test]
fn short_press_on_idle_pump_forces_on() {
    let mut h = Harness::new();
    // Schedule disabled (safe default) — only manual can run the pump.
    h.press(300, Some(wed(7, 0)));
    assert!(h.hw.pump_is_on());
    assert_eq!(h.app.override_state(), OverrideState::ManualOn);
}

#[test]
fn short_press_during_window_forces_off_then_self_heals() {
    let mut h = Harness::new();
    h.configure_mon_fri();
    h.cycle(Some(wed(7, 0)));
    assert!(h.hw.pump_is_on());

    // Short press while the schedule runs the pump → forced off.
    h.press(300, Some(wed(7, 0)));
    assert!(!h.hw.pump_is_on());
    assert_eq!(h.app.override_state(), OverrideState::ManualOff);

    // Stays off for the rest of the window, no gesture needed after.
    h.run_for(500, Some(wed(12, 0)));
    assert!(!h.hw.pump_is_on());
    assert_eq!(h.app.override_state(), OverrideState::ManualOff);

    // Window lapses → back to Auto; next window runs normally.
    h.cycle(Some(wed(22, 30)));
    assert_eq!(h.app.override_state(), OverrideState::Auto);
    h.cycle(Some(wed(7, 0)));
    assert!(h.hw.pump_is_on(), "recovered without a manual reset");
}

#[test]
fn manual_on_times_out_after_one_hour() {
    let mut h = Harness::new();
    assert!(h.app.enqueue(AppCommand::ForceOn));
    h.cycle(Some(wed(23, 30)));
    assert!(h.hw.pump_is_on());

    // Jump past the safety window.
    h.now_ms += MAX_MANUAL_ON_MS + 1000;
    h.cycle(Some(wed(23, 30)));
    assert!(!h.hw.pump_is_on());
    assert_eq!(h.app.override_state(), OverrideState::Auto);
}

#[test]
fn long_press_clears_suspend_and_resumes_schedule() {
    let mut h = Harness::new();
    h.configure_mon_fri();
    assert!(h.app.enqueue(AppCommand::SuspendToday));
    h.cycle(Some(wed(7, 0)));
    assert!(!h.hw.pump_is_on(), "suspend-today suppresses the window");

    h.press(1300, Some(wed(7, 0)));
    assert!(h.hw.pump_is_on(), "long press resumes automatic operation");
    assert_eq!(h.app.override_state(), OverrideState::Auto);
    assert_eq!(
        h.sink.count(|e| matches!(e, AppEvent::SuspendChanged(false))),
        1
    );
}

// ── Remote commands ───────────────────────────────────────────

#[test]
fn invalid_configure_is_rejected_and_leaves_config_untouched() {
    let mut h = Harness::new();
    assert!(h.app.enqueue(AppCommand::Configure {
        mode: ScheduleMode::ByInterval {
            interval_days: 0,
            anchor: Date {
                day: 1,
                month: 6,
                year: 2025,
            },
        },
        window: six_to_ten_pm(),
    }));
    h.cycle(Some(wed(7, 0)));

    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::ConfigRejected(_))), 1);
    assert!(!h.app.config().enabled, "active record must be untouched");
    assert!(!h.hw.pump_is_on());
}

#[test]
fn configure_applies_and_reports() {
    let mut h = Harness::new();
    h.configure_mon_fri();
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::ConfigApplied(_))), 1);
    assert!(h.app.config().enabled);
}

#[test]
fn command_queue_overflow_drops_instead_of_blocking() {
    let mut h = Harness::new();
    for _ in 0..8 {
        assert!(h.app.enqueue(AppCommand::ForceOn));
    }
    assert!(!h.app.enqueue(AppCommand::ForceOff), "ninth command drops");

    // Queue drains fully on the next cycle and accepts again.
    h.cycle(None);
    assert!(h.app.enqueue(AppCommand::ForceOff));
}

#[test]
fn unset_clock_allows_manual_control_only() {
    let mut h = Harness::new();
    h.configure_mon_fri();

    h.run_for(500, None);
    assert!(!h.hw.pump_is_on(), "no wall clock, no schedule");

    assert!(h.app.enqueue(AppCommand::ForceOn));
    h.cycle(None);
    assert!(h.hw.pump_is_on(), "manual override needs no wall clock");
}

// ── Persistence across reboot ─────────────────────────────────

#[test]
fn configured_schedule_survives_reboot_but_override_does_not() {
    let mut h = Harness::new();
    h.configure_mon_fri();
    assert!(h.app.enqueue(AppCommand::ForceOn));
    h.cycle(Some(wed(23, 0)));
    assert_eq!(h.app.override_state(), OverrideState::ManualOn);

    // "Reboot": rebuild the service from the same storage.
    let store = ConfigStore::load(&mut h.storage);
    assert!(!store.was_reset());
    assert!(store.active().enabled);
    assert_eq!(
        store.active().mode,
        ScheduleMode::ByWeekday {
            weekdays: 0b0111110
        }
    );

    let mut app = AppService::new(store);
    let mut sink = CaptureSink::new();
    app.start(&mut sink);
    assert_eq!(
        app.override_state(),
        OverrideState::Auto,
        "overrides are ephemeral"
    );
}
