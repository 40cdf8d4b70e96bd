//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the config store, the override machine, the
//! gesture classifier, and the bounded remote-command queue. It exposes
//! one clean entry point per control tick. All I/O flows through port
//! traits injected at call sites, making the entire service testable
//! with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!   ClockPort ──▶ │         AppService          │
//! ActuatorPort ◀──│ gestures · schedule · fsm   │◀──▶ StoragePort
//!                 └────────────────────────────┘
//! ```

use heapless::Deque;
use log::{info, warn};

use crate::clock::DateTime;
use crate::drivers::button::{ButtonEvent, GestureClassifier};
use crate::fsm::{OverrideMachine, OverrideState};
use crate::schedule;
use crate::store::ConfigStore;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{ActuatorPort, ConfigError, EventSink, InputPort, StoragePort};

/// Remote commands queued between cycles. Overflow drops the newest
/// command rather than blocking the control loop.
const COMMAND_QUEUE_DEPTH: usize = 8;

pub struct AppService {
    store: ConfigStore,
    machine: OverrideMachine,
    button: GestureClassifier,
    commands: Deque<AppCommand, COMMAND_QUEUE_DEPTH>,
}

impl AppService {
    pub fn new(store: ConfigStore) -> Self {
        Self {
            store,
            machine: OverrideMachine::new(),
            button: GestureClassifier::new(),
            commands: Deque::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup. Call once before the first cycle.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        if self.store.was_reset() {
            sink.emit(&AppEvent::ConfigReset);
        }
        sink.emit(&AppEvent::Started(*self.store.active()));
        info!("service started: {}", self.store.active());
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &crate::config::ScheduleConfig {
        self.store.active()
    }

    pub fn override_state(&self) -> OverrideState {
        self.machine.state()
    }

    // ── Command intake ────────────────────────────────────────

    /// Queue a command for the next cycle. Returns false (and drops the
    /// command) when the queue is full.
    pub fn enqueue(&mut self, cmd: AppCommand) -> bool {
        match self.commands.push_back(cmd) {
            Ok(()) => true,
            Err(dropped) => {
                warn!("command queue full, dropping {:?}", dropped);
                false
            }
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: sample the button → drain commands →
    /// evaluate the schedule → arbitrate overrides → actuate.
    ///
    /// `now` is `None` while the wall clock is unset; the schedule then
    /// evaluates off and only manual control can run the pump. The `hw`
    /// parameter satisfies both [`InputPort`] and [`ActuatorPort`] — this
    /// avoids a double mutable borrow while keeping the port boundary
    /// explicit.
    pub fn run_cycle(
        &mut self,
        now: Option<DateTime>,
        now_ms: u64,
        hw: &mut (impl InputPort + ActuatorPort),
        storage: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) {
        let prev_state = self.machine.state();
        let pump_was_on = hw.pump_is_on();

        // 1. Sample and classify the button.
        let gesture = self.button.poll(hw.button_level(), now_ms);

        // 2. A long press also clears the suspend-today flag; the machine
        //    itself never mutates config.
        if gesture == Some(ButtonEvent::LongPress) {
            self.clear_suspend(storage, sink);
        }

        // 3. Drain queued remote commands.
        while let Some(cmd) = self.commands.pop_front() {
            self.handle_command(cmd, now_ms, storage, sink);
        }

        // 4. Fresh schedule decision for this instant.
        let schedule_on = match &now {
            Some(n) => schedule::should_be_on(self.store.active(), n),
            None => false,
        };

        // 5. Override arbitration.
        let want_on = self.machine.evaluate(
            now_ms,
            pump_was_on,
            self.store.active().suspend_today,
            schedule_on,
            gesture,
        );

        // 6. Actuate; the relay driver makes repeats cheap.
        hw.set_pump(want_on);
        if want_on != pump_was_on {
            sink.emit(&AppEvent::PumpChanged(want_on));
        }

        // 7. Report override movement.
        let new_state = self.machine.state();
        if new_state != prev_state {
            sink.emit(&AppEvent::OverrideChanged {
                from: prev_state,
                to: new_state,
            });
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply one remote command. Failures are reported through the sink
    /// and the log; nothing here can abort the control cycle.
    fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u64,
        storage: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::ForceOn => self.machine.force_on(now_ms),
            AppCommand::ForceOff => self.machine.force_off(),
            AppCommand::ResetToAuto => {
                self.machine.reset();
                self.clear_suspend(storage, sink);
            }
            AppCommand::SetEnabled(enabled) => {
                if let Err(e) = self.store.set_enabled(enabled, storage) {
                    warn!("set_enabled failed: {}", e);
                }
            }
            AppCommand::SuspendToday => {
                if !self.store.active().suspend_today {
                    match self.store.suspend_today(storage) {
                        Ok(()) => sink.emit(&AppEvent::SuspendChanged(true)),
                        Err(e) => warn!("suspend failed: {}", e),
                    }
                }
            }
            AppCommand::ResumeToday => self.clear_suspend(storage, sink),
            AppCommand::Configure { mode, window } => {
                let result = match mode {
                    crate::config::ScheduleMode::ByWeekday { weekdays } => {
                        self.store.configure_by_weekday(weekdays, window, storage)
                    }
                    crate::config::ScheduleMode::ByInterval {
                        interval_days,
                        anchor,
                    } => self
                        .store
                        .configure_by_interval(interval_days, anchor, window, storage),
                    crate::config::ScheduleMode::ByDate { target } => {
                        self.store.configure_by_date(target, window, storage)
                    }
                };
                match result {
                    Ok(()) => sink.emit(&AppEvent::ConfigApplied(*self.store.active())),
                    Err(ConfigError::ValidationFailed(reason)) => {
                        sink.emit(&AppEvent::ConfigRejected(reason));
                    }
                    Err(e) => warn!("configure failed: {}", e),
                }
            }
        }
    }

    fn clear_suspend(&mut self, storage: &mut impl StoragePort, sink: &mut impl EventSink) {
        if self.store.active().suspend_today {
            match self.store.resume_today(storage) {
                Ok(()) => sink.emit(&AppEvent::SuspendChanged(false)),
                Err(e) => warn!("resume failed: {}", e),
            }
        }
    }
}
