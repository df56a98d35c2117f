//! Installation mode switching.
//!
//! The installation runs in one of a few top-level modes cycled by the
//! mode button. Demo modes fall back to the plain light after a timeout so
//! the piece is never left showing off overnight. The controller consumes
//! queued input events and reports what the host should apply as a plain
//! effects struct; it never renders and never touches the sensor itself.

use embassy_time::{Duration, Instant};

use crate::events::{EventReceiver, InputEvent};

const MODE_NAME_LIGHT: &str = "light";
const MODE_NAME_PLAYGROUND: &str = "playground";
const MODE_NAME_LASERS: &str = "lasers";
const MODE_NAME_OFF: &str = "off";

const MODE_ID_LIGHT: u8 = 0;
const MODE_ID_PLAYGROUND: u8 = 1;
const MODE_ID_LASERS: u8 = 2;
const MODE_ID_OFF: u8 = 3;

const MODE_COUNT: u8 = 4;

/// Default idle timeout after which demo modes fall back to light.
pub const DEFAULT_DEMO_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Default number of playground patterns to cycle through.
pub const DEFAULT_PLAYGROUND_PATTERNS: u16 = 5;

/// Top-level installation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Light = MODE_ID_LIGHT,
    Playground = MODE_ID_PLAYGROUND,
    Lasers = MODE_ID_LASERS,
    Off = MODE_ID_OFF,
}

impl Mode {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_LIGHT => Self::Light,
            MODE_ID_PLAYGROUND => Self::Playground,
            MODE_ID_LASERS => Self::Lasers,
            MODE_ID_OFF => Self::Off,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => MODE_NAME_LIGHT,
            Self::Playground => MODE_NAME_PLAYGROUND,
            Self::Lasers => MODE_NAME_LASERS,
            Self::Off => MODE_NAME_OFF,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_LIGHT => Some(Self::Light),
            MODE_NAME_PLAYGROUND => Some(Self::Playground),
            MODE_NAME_LASERS => Some(Self::Lasers),
            MODE_NAME_OFF => Some(Self::Off),
            _ => None,
        }
    }

    /// The mode after this one in button-cycling order.
    pub fn next(self) -> Self {
        // MODE_COUNT keeps the wrap in sync with the id table.
        Self::from_raw((self as u8 + 1) % MODE_COUNT).unwrap_or(Self::Light)
    }

    /// Whether this mode times out back to [`Mode::Light`].
    pub const fn is_demo(self) -> bool {
        matches!(self, Self::Playground | Self::Lasers)
    }
}

/// Configuration for the mode controller.
#[derive(Debug, Clone, Copy)]
pub struct ModeConfig {
    /// Idle timeout for demo modes
    pub demo_timeout: Duration,
    /// Number of playground patterns the actuator cycles through
    pub playground_patterns: u16,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            demo_timeout: DEFAULT_DEMO_TIMEOUT,
            playground_patterns: DEFAULT_PLAYGROUND_PATTERNS,
        }
    }
}

/// Side effects the host should apply after processing input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeUpdate {
    /// New mode to display
    pub mode: Option<Mode>,
    /// New playground pattern index to display
    pub pattern: Option<u16>,
    /// The sensor should be recalibrated before the loop resumes
    pub recalibrate: bool,
}

impl ModeUpdate {
    /// Check if anything needs to be applied.
    pub const fn has_effects(&self) -> bool {
        self.mode.is_some() || self.pattern.is_some() || self.recalibrate
    }
}

/// Consumes input events and tracks the current mode.
pub struct ModeController<'a, const SIZE: usize> {
    events: EventReceiver<'a, SIZE>,
    config: ModeConfig,
    current: Mode,
    pattern: u16,
    timeout_at: Option<Instant>,
}

impl<'a, const SIZE: usize> ModeController<'a, SIZE> {
    /// Create a controller starting in [`Mode::Light`].
    pub const fn new(events: EventReceiver<'a, SIZE>, config: ModeConfig) -> Self {
        Self {
            events,
            config,
            current: Mode::Light,
            pattern: 0,
            timeout_at: None,
        }
    }

    /// Drain pending input events and apply the demo timeout.
    ///
    /// Non-blocking; call once per loop iteration. Returns the accumulated
    /// side effects for the host to apply.
    pub fn process_pending(&mut self, now: Instant) -> ModeUpdate {
        let mut update = ModeUpdate::default();

        while let Ok(event) = self.events.try_receive() {
            match event {
                InputEvent::ModeShortPress => {
                    self.set_mode(self.current.next(), now, &mut update);
                }
                InputEvent::ModeLongPress => {
                    // Long-press is the on-demand recalibration gesture; it
                    // only makes sense in the plain light mode.
                    if self.current == Mode::Light {
                        update.recalibrate = true;
                    }
                }
                InputEvent::ActuatorPressed => {
                    if self.current == Mode::Playground {
                        self.pattern = (self.pattern + 1) % self.config.playground_patterns.max(1);
                        update.pattern = Some(self.pattern);
                    }
                }
                InputEvent::ActuatorReleased | InputEvent::ProximityChanged(_) => {}
            }
        }

        if let Some(deadline) = self.timeout_at {
            if now >= deadline {
                self.set_mode(Mode::Light, now, &mut update);
            }
        }

        update
    }

    /// Currently active mode.
    pub const fn current(&self) -> Mode {
        self.current
    }

    /// Currently selected playground pattern index.
    pub const fn pattern(&self) -> u16 {
        self.pattern
    }

    fn set_mode(&mut self, mode: Mode, now: Instant, update: &mut ModeUpdate) {
        self.current = mode;
        self.timeout_at = if mode.is_demo() {
            Some(now + self.config.demo_timeout)
        } else {
            None
        };
        update.mode = Some(mode);
    }
}
