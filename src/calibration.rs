//! Crosstalk baseline calibration.
//!
//! Even with nothing in front of the sensor, turning the emitter on shifts
//! the detector reading: light leaks directly from the emitter into the
//! photodetector and the emitter's load sags the supply. Calibration
//! measures that parasitic delta so the proximity computation can subtract
//! it out instead of attributing it to a reflective target.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::sampler::Sampler;
use crate::{AnalogSource, EmitterPin};

/// Default number of full acquisition cycles averaged into the offset.
pub const DEFAULT_CALIBRATION_CYCLES: u8 = 10;

/// Measure the baseline delta between emitter-on and emitter-off readings.
///
/// Drives the sampler through `cycles` complete acquisition cycles in a
/// tight synchronous loop and returns the floor average of the per-cycle
/// `|ambient - ir|` delta. This is the one intentionally blocking routine
/// in the crate; run it before the steady-state loop starts, while no other
/// obligation is active.
///
/// The emitter is driven low and the sampler fully reset before the first
/// cycle. Afterwards the sampler is back in its initial phase with zero
/// counters, and its published levels retain the values from the last
/// calibration cycle.
pub fn calibrate_offset<A: AnalogSource, E: EmitterPin>(
    sampler: &mut Sampler,
    adc: &mut A,
    emitter: &mut E,
    cycles: u8,
) -> u16 {
    let cycles = if cycles == 0 { 1 } else { cycles };

    emitter.set_active(false);
    sampler.reset();

    #[cfg(feature = "esp32-log")]
    println!("calibrating IR baseline ({} cycles)...", cycles);

    let mut total_delta: u32 = 0;
    for _cycle in 0..cycles {
        while !sampler.tick(adc, emitter) {}
        total_delta += u32::from(sampler.ambient_level().abs_diff(sampler.ir_level()));

        #[cfg(feature = "esp32-log")]
        println!(
            "  cycle {}: ambient={} ir={}",
            _cycle + 1,
            sampler.ambient_level(),
            sampler.ir_level()
        );
    }

    let offset = total_delta / u32::from(cycles);
    // Each per-cycle delta fits u16, so their mean does too.
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);

    #[cfg(feature = "esp32-log")]
    println!("calibration complete, baseline delta: {}", offset);

    offset
}
