//! Debounced button driver with short and long press detection.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up: raw level `false` means
//! pressed. The raw level is sampled once per control tick and fed to
//! [`GestureClassifier::poll`], which runs the debounce + gesture state
//! machine. No interrupts are involved.
//!
//! ## Gesture detection
//!
//! | Gesture     | Condition                                   |
//! |-------------|---------------------------------------------|
//! | Short press | Release after < 1s, long press not yet fired |
//! | Long press  | Hold >= 1s — fires once, while still held    |
//!
//! Each poll returns at most one event and clears it; events are never
//! queued. A stuck input degrades to "no event", never to an error.

const DEBOUNCE_MS: u64 = 50;
const LONG_PRESS_MS: u64 = 1000;

/// Button events emitted after gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    ShortPress,
    LongPress,
}

/// Per-button gesture state. One instance per monitored input; no sharing.
pub struct GestureClassifier {
    /// Debounced logical level (true = high = released).
    stable_level: bool,
    /// Last raw sample, for debounce edge detection.
    last_raw_level: bool,
    /// Instant of the last raw edge.
    last_change_ms: u64,
    /// Instant the current press began.
    press_started_ms: u64,
    press_active: bool,
    long_fired: bool,
    pending: Option<ButtonEvent>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self {
            stable_level: true,
            last_raw_level: true,
            last_change_ms: 0,
            press_started_ms: 0,
            press_active: false,
            long_fired: false,
            pending: None,
        }
    }

    /// Feed one raw sample. `now_ms` is monotonic milliseconds; the same
    /// clock must be used for every call on this instance.
    pub fn poll(&mut self, raw_level: bool, now_ms: u64) -> Option<ButtonEvent> {
        // Debounce: any raw edge restarts the stability timer.
        if raw_level != self.last_raw_level {
            self.last_change_ms = now_ms;
        }
        self.last_raw_level = raw_level;

        // Only a level that has been stable past the window is trusted.
        if now_ms.saturating_sub(self.last_change_ms) > DEBOUNCE_MS
            && raw_level != self.stable_level
        {
            self.stable_level = raw_level;

            if !self.stable_level {
                // Falling edge: press begins.
                self.press_started_ms = now_ms;
                self.press_active = true;
                self.long_fired = false;
            } else if self.press_active {
                // Rising edge: released.
                self.press_active = false;
                let duration = now_ms.saturating_sub(self.press_started_ms);
                if !self.long_fired && duration < LONG_PRESS_MS {
                    self.pending = Some(ButtonEvent::ShortPress);
                }
            }
        }

        // Long press fires while still held, exactly once per press.
        if self.press_active
            && !self.long_fired
            && now_ms.saturating_sub(self.press_started_ms) >= LONG_PRESS_MS
        {
            self.pending = Some(ButtonEvent::LongPress);
            self.long_fired = true;
        }

        self.pending.take()
    }

    /// Debounced "physically held down right now".
    pub fn is_pressed(&self) -> bool {
        !self.stable_level
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new()
    }
}
