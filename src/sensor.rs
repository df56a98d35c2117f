//! Proximity sensor instance.
//!
//! Ties one analog detector and one emitter pin to a [`Sampler`] and the
//! calibrated crosstalk offset. Every sensor owns its full state, so a
//! multi-sensor installation is simply several instances ticked from the
//! same loop.

use crate::calibration::{DEFAULT_CALIBRATION_CYCLES, calibrate_offset};
use crate::proximity::{DEFAULT_PROXIMITY_TOLERANCE, proximity};
use crate::sampler::{SampleWindows, Sampler};
use crate::{AnalogSource, EmitterPin};

/// Configuration for a proximity sensor.
#[derive(Debug, Clone, Copy)]
pub struct SensorConfig {
    /// Acquisition window lengths
    pub windows: SampleWindows,
    /// Noise margin for the proximity reading
    pub tolerance: u16,
    /// Full cycles averaged during calibration
    pub calibration_cycles: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            windows: SampleWindows::default(),
            tolerance: DEFAULT_PROXIMITY_TOLERANCE,
            calibration_cycles: DEFAULT_CALIBRATION_CYCLES,
        }
    }
}

/// One emitter/detector pair with its acquisition and calibration state.
pub struct ProximitySensor<A: AnalogSource, E: EmitterPin> {
    adc: A,
    emitter: E,
    sampler: Sampler,
    offset: u16,
    tolerance: u16,
    calibration_cycles: u8,
}

impl<A: AnalogSource, E: EmitterPin> ProximitySensor<A, E> {
    /// Create a sensor over the given pins.
    ///
    /// The offset starts at zero; call [`calibrate`](Self::calibrate)
    /// before the steady-state loop to measure the real crosstalk baseline.
    pub fn new(adc: A, emitter: E, config: SensorConfig) -> Self {
        Self {
            adc,
            emitter,
            sampler: Sampler::new(config.windows),
            offset: 0,
            tolerance: config.tolerance,
            calibration_cycles: config.calibration_cycles,
        }
    }

    /// Advance the acquisition by one tick.
    ///
    /// Call once per host loop iteration. Does O(1) work and never blocks.
    /// Returns `true` when a full acquisition cycle has just completed and
    /// a fresh ambient/IR pair is available.
    pub fn tick(&mut self) -> bool {
        self.sampler.tick(&mut self.adc, &mut self.emitter)
    }

    /// Run the blocking calibration procedure and store the new offset.
    ///
    /// Monopolizes the processor for `calibration_cycles` full acquisition
    /// cycles; only invoke it where nothing else needs servicing, in
    /// practice at startup.
    pub fn calibrate(&mut self) {
        self.offset = calibrate_offset(
            &mut self.sampler,
            &mut self.adc,
            &mut self.emitter,
            self.calibration_cycles,
        );
    }

    /// Current tolerance-gated proximity magnitude.
    ///
    /// Pure read over the latest completed ambient/IR pair; callable in any
    /// phase. Between cycle completions it reflects the previous pair.
    pub fn proximity(&self) -> u16 {
        proximity(
            self.sampler.ambient_level(),
            self.sampler.ir_level(),
            self.offset,
            self.tolerance,
        )
    }

    /// Latest emitter-off baseline average.
    pub const fn ambient_level(&self) -> u16 {
        self.sampler.ambient_level()
    }

    /// Latest emitter-on average.
    pub const fn ir_level(&self) -> u16 {
        self.sampler.ir_level()
    }

    /// Calibrated crosstalk offset currently in effect.
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    /// Access the underlying sampler (phase inspection, diagnostics).
    pub const fn sampler(&self) -> &Sampler {
        &self.sampler
    }
}
