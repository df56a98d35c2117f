mod tests {
    use reflect_ir::{DEFAULT_PROXIMITY_TOLERANCE, proximity};

    #[test]
    fn test_within_noise_floor_reports_zero() {
        // |100 - 97| - 0 = 3 < 5
        assert_eq!(proximity(100, 97, 0, DEFAULT_PROXIMITY_TOLERANCE), 0);
        // |100 - 80| - 18 = 2 < 5
        assert_eq!(proximity(100, 80, 18, DEFAULT_PROXIMITY_TOLERANCE), 0);
    }

    #[test]
    fn test_at_tolerance_boundary() {
        // Exactly the tolerance is reported; one below is not.
        assert_eq!(proximity(100, 80, 15, 5), 5);
        assert_eq!(proximity(100, 80, 16, 5), 0);
    }

    #[test]
    fn test_reports_corrected_delta_above_tolerance() {
        assert_eq!(proximity(100, 60, 10, 5), 30);
        // Direction of the delta does not matter.
        assert_eq!(proximity(60, 100, 10, 5), 30);
    }

    #[test]
    fn test_offset_larger_than_delta_cannot_underflow() {
        // A careless unsigned reimplementation would wrap here.
        assert_eq!(proximity(100, 95, 50, 5), 0);
        assert_eq!(proximity(0, 0, u16::MAX, 5), 0);
        assert_eq!(proximity(100, 100, u16::MAX, 0), 0);
    }

    #[test]
    fn test_extreme_inputs_stay_in_range() {
        assert_eq!(proximity(u16::MAX, 0, 0, 0), u16::MAX);
        assert_eq!(proximity(0, u16::MAX, 0, 0), u16::MAX);
        assert_eq!(proximity(u16::MAX, 0, u16::MAX, 0), 0);
    }

    #[test]
    fn test_zero_tolerance_passes_any_positive_delta() {
        assert_eq!(proximity(10, 9, 0, 0), 1);
        assert_eq!(proximity(10, 10, 0, 0), 0);
    }
}
