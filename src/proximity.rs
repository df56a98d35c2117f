//! Tolerance-gated proximity derivation.

/// Default noise margin below which no proximity is reported.
pub const DEFAULT_PROXIMITY_TOLERANCE: u16 = 5;

/// Derive a proximity magnitude from an ambient/IR level pair.
///
/// The raw reading is `|ambient - ir| - offset`; anything below `tolerance`
/// is treated as noise and reported as zero. The subtraction is performed
/// in `i32` so an offset larger than the measured delta cannot underflow,
/// and the result is never negative.
pub fn proximity(ambient: u16, ir: u16, offset: u16, tolerance: u16) -> u16 {
    let corrected = i32::from(ambient.abs_diff(ir)) - i32::from(offset);
    if corrected < i32::from(tolerance) {
        return 0;
    }
    // Bounded above by the raw u16 delta.
    u16::try_from(corrected).unwrap_or(u16::MAX)
}
