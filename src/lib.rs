#![no_std]

pub mod button;
pub mod calibration;
pub mod events;
pub mod mode;
pub mod proximity;
pub mod sampler;
pub mod sensor;

pub use button::{Button, ButtonEvent, DEFAULT_LONGPRESS_TIMEOUT};
pub use calibration::{DEFAULT_CALIBRATION_CYCLES, calibrate_offset};
pub use events::{EventReceiver, EventSender, InputEvent, InputQueue, QueueEmpty, QueueFull};
pub use mode::{Mode, ModeConfig, ModeController, ModeUpdate};
pub use proximity::{DEFAULT_PROXIMITY_TOLERANCE, proximity};
pub use sampler::{SamplePhase, SampleWindows, Sampler};
pub use sensor::{ProximitySensor, SensorConfig};

pub use embassy_time::{Duration, Instant};

/// Abstract analog detector trait
///
/// Implement this trait to read the photodetector on a concrete platform.
/// Samples are opaque unsigned values in the converter's native range
/// (e.g. 0-1023 for a 10-bit ADC).
pub trait AnalogSource {
    /// Read one sample from the detector
    fn read(&mut self) -> u16;
}

/// Abstract IR emitter pin trait
///
/// Implement this trait to drive the emitter's digital output pin.
pub trait EmitterPin {
    /// Drive the emitter on (HIGH) or off (LOW)
    fn set_active(&mut self, on: bool);
}
