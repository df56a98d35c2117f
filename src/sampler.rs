//! Non-blocking IR acquisition state machine.
//!
//! The sampler alternates between an emitter-off baseline window, a short
//! settling window and an emitter-on window, averaging the detector over
//! each sampling window. One call to [`Sampler::tick`] performs at most one
//! analog read, so the host loop is never blocked for longer than a single
//! conversion.

use crate::{AnalogSource, EmitterPin};

/// Default baseline window length in ticks.
pub const DEFAULT_AMBIENT_WINDOW: u16 = 700;

/// Default settling window length in ticks.
pub const DEFAULT_DEAD_WINDOW: u16 = 10;

/// Default emitter-on window length in ticks.
pub const DEFAULT_IR_WINDOW: u16 = 200;

/// Phase of the acquisition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePhase {
    /// Emitter off, accumulating the background light baseline
    Ambient,
    /// Emitter off, no sampling; masks transients around the emitter switch
    Dead,
    /// Emitter on, accumulating reflected-plus-ambient light
    Ir,
}

/// Window lengths for one acquisition cycle, in ticks.
///
/// Windows are tick counts, not wall-clock durations: if the host loop's
/// iteration rate varies, the effective sampling duration varies with it.
/// The baseline window is deliberately long relative to the others to keep
/// the ambient average stable.
#[derive(Debug, Clone, Copy)]
pub struct SampleWindows {
    pub ambient: u16,
    pub dead: u16,
    pub ir: u16,
}

impl SampleWindows {
    /// Total ticks in one full AMBIENT -> DEAD -> IR cycle.
    pub const fn cycle_ticks(self) -> u32 {
        self.ambient as u32 + self.dead as u32 + self.ir as u32
    }

    /// Normalize so every phase runs for at least one tick.
    ///
    /// A zero-length sampling window would otherwise divide by zero when
    /// the phase average is published.
    const fn normalized(self) -> Self {
        Self {
            ambient: if self.ambient == 0 { 1 } else { self.ambient },
            dead: if self.dead == 0 { 1 } else { self.dead },
            ir: if self.ir == 0 { 1 } else { self.ir },
        }
    }
}

impl Default for SampleWindows {
    fn default() -> Self {
        Self {
            ambient: DEFAULT_AMBIENT_WINDOW,
            dead: DEFAULT_DEAD_WINDOW,
            ir: DEFAULT_IR_WINDOW,
        }
    }
}

/// Acquisition state machine for one emitter/detector pair.
///
/// All state is owned by the instance; driving several sensors is just a
/// matter of creating several samplers, each with its own pins.
#[derive(Debug, Clone)]
pub struct Sampler {
    windows: SampleWindows,
    phase: SamplePhase,
    phase_ticks: u16,
    // u32 holds u16::MAX ticks of u16::MAX samples without wrapping,
    // so the running sum cannot overflow for any window length.
    level_sum: u32,
    ambient_level: u16,
    ir_level: u16,
}

impl Sampler {
    /// Create a sampler in its initial state (ambient phase, zero counters).
    pub const fn new(windows: SampleWindows) -> Self {
        Self {
            windows: windows.normalized(),
            phase: SamplePhase::Ambient,
            phase_ticks: 0,
            level_sum: 0,
            ambient_level: 0,
            ir_level: 0,
        }
    }

    /// Advance the state machine by one tick.
    ///
    /// Performs at most one analog read and one accumulation; phase
    /// averages are published only on the tick that completes a window.
    /// Returns `true` on the tick that completes the emitter-on window,
    /// i.e. once per full acquisition cycle.
    pub fn tick<A: AnalogSource, E: EmitterPin>(&mut self, adc: &mut A, emitter: &mut E) -> bool {
        match self.phase {
            SamplePhase::Ambient => {
                self.accumulate(adc);
                if self.phase_ticks == self.windows.ambient {
                    self.ambient_level = self.window_mean();
                    self.enter(SamplePhase::Dead);
                }
                false
            }
            SamplePhase::Dead => {
                self.phase_ticks += 1;
                if self.phase_ticks == self.windows.dead {
                    emitter.set_active(true);
                    self.enter(SamplePhase::Ir);
                }
                false
            }
            SamplePhase::Ir => {
                self.accumulate(adc);
                if self.phase_ticks == self.windows.ir {
                    self.ir_level = self.window_mean();
                    emitter.set_active(false);
                    self.enter(SamplePhase::Ambient);
                    return true;
                }
                false
            }
        }
    }

    /// Reset to the initial state, clearing counters and published levels.
    pub fn reset(&mut self) {
        self.phase = SamplePhase::Ambient;
        self.phase_ticks = 0;
        self.level_sum = 0;
        self.ambient_level = 0;
        self.ir_level = 0;
    }

    /// Current phase of the acquisition cycle.
    pub const fn phase(&self) -> SamplePhase {
        self.phase
    }

    /// Latest completed emitter-off average.
    ///
    /// Stale between window completions; read it together with
    /// [`ir_level`](Self::ir_level) after a full cycle has elapsed.
    pub const fn ambient_level(&self) -> u16 {
        self.ambient_level
    }

    /// Latest completed emitter-on average.
    pub const fn ir_level(&self) -> u16 {
        self.ir_level
    }

    /// Configured window lengths.
    pub const fn windows(&self) -> SampleWindows {
        self.windows
    }

    fn accumulate<A: AnalogSource>(&mut self, adc: &mut A) {
        self.level_sum += u32::from(adc.read());
        self.phase_ticks += 1;
    }

    /// Average of the just-completed sampling window.
    fn window_mean(&self) -> u16 {
        let mean = self.level_sum / u32::from(self.phase_ticks);
        // A mean of u16 samples always fits back into u16.
        u16::try_from(mean).unwrap_or(u16::MAX)
    }

    fn enter(&mut self, phase: SamplePhase) {
        self.phase = phase;
        self.phase_ticks = 0;
        self.level_sum = 0;
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(SampleWindows::default())
    }
}
