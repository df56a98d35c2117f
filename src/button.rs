//! Polled button input with long-press detection.
//!
//! The host loop reads the raw pin level and feeds it to [`Button::poll`]
//! together with the current time; at most one event comes back per call.
//! Timing here is wall-clock, unlike the sampler's tick-count windows,
//! because a "hold for three seconds" gesture is a human contract, not a
//! loop-rate one.

use embassy_time::{Duration, Instant};

/// Default hold duration before a press counts as a long press.
pub const DEFAULT_LONGPRESS_TIMEOUT: Duration = Duration::from_millis(3000);

/// Observable button transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// The button went down
    Pressed,
    /// The button has been held past the long-press timeout; fires once per hold
    LongPress,
    /// The button went up; `long` tells whether this hold was a long press,
    /// so callers can suppress the short-press action after one
    Released { long: bool },
}

/// Edge and long-press tracker for one polled button.
#[derive(Debug, Clone)]
pub struct Button {
    longpress_timeout: Duration,
    down: bool,
    long_fired: bool,
    pressed_at: Instant,
}

impl Button {
    /// Create a button with the default long-press timeout.
    pub const fn new() -> Self {
        Self::with_longpress_timeout(DEFAULT_LONGPRESS_TIMEOUT)
    }

    /// Create a button with a custom long-press timeout.
    pub const fn with_longpress_timeout(timeout: Duration) -> Self {
        Self {
            longpress_timeout: timeout,
            down: false,
            long_fired: false,
            pressed_at: Instant::from_millis(0),
        }
    }

    /// Feed the current pin level and time; returns at most one event.
    pub fn poll(&mut self, level: bool, now: Instant) -> Option<ButtonEvent> {
        if level {
            if !self.down {
                self.down = true;
                self.long_fired = false;
                self.pressed_at = now;
                return Some(ButtonEvent::Pressed);
            }
            if !self.long_fired && now >= self.pressed_at + self.longpress_timeout {
                self.long_fired = true;
                return Some(ButtonEvent::LongPress);
            }
        } else if self.down {
            self.down = false;
            return Some(ButtonEvent::Released {
                long: self.long_fired,
            });
        }

        None
    }

    /// Whether the button is currently held down.
    pub const fn is_down(&self) -> bool {
        self.down
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}
