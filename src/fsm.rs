//! Override state machine.
//!
//! Arbitrates between the automatic schedule and manual intervention.
//! One instance, evaluated exactly once per control cycle with the rules
//! applied in a fixed order (the order encodes priority):
//!
//! 1. Short press toggles: pump on (any cause) → `ManualOff`, pump off →
//!    `ManualOn` (start of the safety-timeout clock).
//! 2. Long press resets to `Auto` unconditionally. The service layer also
//!    clears the suspend-today flag through the config store — config
//!    mutation never happens inside this machine.
//! 3. Safety timeout: `ManualOn` older than one hour falls back to `Auto`,
//!    gesture or no gesture.
//! 4. Self-heal: `ManualOff` while the schedule would be off anyway reverts
//!    to `Auto`, so tomorrow runs normally without a manual reset.
//! 5. Output: `Auto` follows the schedule gated by suspend-today;
//!    `ManualOn`/`ManualOff` force the obvious answer.
//!
//! The state is deliberately not persisted: manual overrides are ephemeral
//! safety actions, and every boot starts in `Auto`.

use log::info;

use crate::drivers::button::ButtonEvent;

/// Who currently controls the actuator decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverrideState {
    /// The schedule decides.
    #[default]
    Auto,
    /// Forced on, subject to the one-hour safety timeout.
    ManualOn,
    /// Forced off until the schedule window lapses.
    ManualOff,
}

/// Maximum time the pump may stay in `ManualOn` without re-confirmation.
pub const MAX_MANUAL_ON_MS: u64 = 3_600_000;

pub struct OverrideMachine {
    state: OverrideState,
    /// Monotonic instant `ManualOn` was entered; meaningful only while in
    /// `ManualOn`.
    manual_on_since_ms: u64,
}

impl OverrideMachine {
    pub fn new() -> Self {
        Self {
            state: OverrideState::Auto,
            manual_on_since_ms: 0,
        }
    }

    pub fn state(&self) -> OverrideState {
        self.state
    }

    /// Run one evaluation cycle and return the final actuate decision.
    ///
    /// * `now_ms` — monotonic milliseconds (same clock as the gesture
    ///   classifier).
    /// * `pump_is_on` — actual actuator state, used by the short-press
    ///   toggle ("turn off whatever is on, by any cause").
    /// * `suspend_today` — emergency suppression flag from the config.
    /// * `schedule_on` — fresh schedule evaluation for this cycle.
    /// * `gesture` — at most one classified button event for this cycle.
    pub fn evaluate(
        &mut self,
        now_ms: u64,
        pump_is_on: bool,
        suspend_today: bool,
        schedule_on: bool,
        gesture: Option<ButtonEvent>,
    ) -> bool {
        match gesture {
            Some(ButtonEvent::ShortPress) => {
                if pump_is_on {
                    self.transition(OverrideState::ManualOff);
                } else {
                    self.manual_on_since_ms = now_ms;
                    self.transition(OverrideState::ManualOn);
                }
            }
            Some(ButtonEvent::LongPress) => {
                self.transition(OverrideState::Auto);
            }
            None => {}
        }

        // Safety timeout — runs every cycle, not only on gestures.
        if self.state == OverrideState::ManualOn
            && now_ms.saturating_sub(self.manual_on_since_ms) > MAX_MANUAL_ON_MS
        {
            info!("manual-on timeout exceeded, back to auto");
            self.transition(OverrideState::Auto);
        }

        // ManualOff self-heals once the schedule window has lapsed.
        if self.state == OverrideState::ManualOff && !schedule_on {
            self.transition(OverrideState::Auto);
        }

        match self.state {
            OverrideState::Auto => !suspend_today && schedule_on,
            OverrideState::ManualOn => true,
            OverrideState::ManualOff => false,
        }
    }

    /// Remote equivalent of a short press toward "on" (bypasses the
    /// gesture classifier; unconditional, no toggle).
    pub fn force_on(&mut self, now_ms: u64) {
        self.manual_on_since_ms = now_ms;
        self.transition(OverrideState::ManualOn);
    }

    /// Remote equivalent of a short press toward "off".
    pub fn force_off(&mut self) {
        self.transition(OverrideState::ManualOff);
    }

    /// Remote equivalent of a long-press reset.
    pub fn reset(&mut self) {
        self.transition(OverrideState::Auto);
    }

    fn transition(&mut self, next: OverrideState) {
        if next != self.state {
            info!("override: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

impl Default for OverrideMachine {
    fn default() -> Self {
        Self::new()
    }
}
