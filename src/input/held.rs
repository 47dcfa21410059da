//! Turns press/release key events into per-frame held state
//!
//! Terminals report presses and auto-repeats, and only report releases when the
//! keyboard enhancement protocol is active. Without releases, a key counts as held
//! until `hold_window` passes with no further press or repeat.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::handler::Control;
use crate::game::PlayerInput;

/// Default time a key stays held after its last press or repeat
pub const DEFAULT_HOLD_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct HeldKeys {
    last_seen: HashMap<Control, Instant>,
    hold_window: Duration,
    release_events: bool,
}

impl HeldKeys {
    pub fn new(hold_window: Duration) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window,
            release_events: false,
        }
    }

    /// Keys stay held until released; used when the terminal reports releases
    pub fn with_release_events(mut self) -> Self {
        self.release_events = true;
        self
    }

    pub fn press(&mut self, control: Control, now: Instant) {
        self.last_seen.insert(control, now);
    }

    pub fn release(&mut self, control: Control) {
        self.last_seen.remove(&control);
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }

    pub fn is_held(&self, control: Control, now: Instant) -> bool {
        match self.last_seen.get(&control) {
            Some(_) if self.release_events => true,
            Some(&seen) => now.saturating_duration_since(seen) <= self.hold_window,
            None => false,
        }
    }

    /// Controls held at `now`
    pub fn snapshot(&self, now: Instant) -> PlayerInput {
        PlayerInput {
            left: self.is_held(Control::Left, now),
            right: self.is_held(Control::Right, now),
            jump: self.is_held(Control::Jump, now),
        }
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_then_expire() {
        let start = Instant::now();
        let mut held = HeldKeys::new(Duration::from_millis(100));

        held.press(Control::Left, start);

        assert!(held.is_held(Control::Left, start + Duration::from_millis(50)));
        assert!(!held.is_held(Control::Left, start + Duration::from_millis(150)));
        assert!(!held.is_held(Control::Right, start));
    }

    #[test]
    fn test_repeat_extends_hold() {
        let start = Instant::now();
        let mut held = HeldKeys::new(Duration::from_millis(100));

        held.press(Control::Right, start);
        held.press(Control::Right, start + Duration::from_millis(90));

        assert!(held.is_held(Control::Right, start + Duration::from_millis(150)));
    }

    #[test]
    fn test_release_clears_immediately() {
        let start = Instant::now();
        let mut held = HeldKeys::default();

        held.press(Control::Jump, start);
        held.release(Control::Jump);

        assert!(!held.is_held(Control::Jump, start));
    }

    #[test]
    fn test_release_mode_never_expires() {
        let start = Instant::now();
        let mut held = HeldKeys::new(Duration::from_millis(10)).with_release_events();

        held.press(Control::Left, start);
        assert!(held.is_held(Control::Left, start + Duration::from_secs(5)));

        held.release(Control::Left);
        assert!(!held.is_held(Control::Left, start + Duration::from_secs(5)));
    }

    #[test]
    fn test_snapshot() {
        let start = Instant::now();
        let mut held = HeldKeys::default();
        held.press(Control::Left, start);
        held.press(Control::Jump, start);

        let input = held.snapshot(start);
        assert_eq!(
            input,
            PlayerInput {
                left: true,
                right: false,
                jump: true,
            }
        );

        held.clear();
        assert_eq!(held.snapshot(start), PlayerInput::IDLE);
    }
}
