mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use reflect_ir::{
        AnalogSource, EmitterPin, ProximitySensor, SamplePhase, SampleWindows, Sampler,
        SensorConfig, calibrate_offset,
    };

    const SMALL: SampleWindows = SampleWindows {
        ambient: 5,
        dead: 2,
        ir: 5,
    };

    /// Emitter double that counts completed cycles on falling edges.
    struct EmitterProbe {
        on: Rc<Cell<bool>>,
        cycles_done: Rc<Cell<usize>>,
    }

    impl EmitterPin for EmitterProbe {
        fn set_active(&mut self, active: bool) {
            if self.on.get() && !active {
                self.cycles_done.set(self.cycles_done.get() + 1);
            }
            self.on.set(active);
        }
    }

    /// Detector double with a per-cycle crosstalk delta while the emitter
    /// is on.
    struct Scene {
        emitter_on: Rc<Cell<bool>>,
        cycles_done: Rc<Cell<usize>>,
        ambient: u16,
        deltas: Vec<u16>,
    }

    impl AnalogSource for Scene {
        fn read(&mut self) -> u16 {
            if self.emitter_on.get() {
                let idx = self.cycles_done.get().min(self.deltas.len() - 1);
                self.ambient + self.deltas[idx]
            } else {
                self.ambient
            }
        }
    }

    fn rig(ambient: u16, deltas: &[u16]) -> (Scene, EmitterProbe) {
        let on = Rc::new(Cell::new(false));
        let cycles_done = Rc::new(Cell::new(0));
        let scene = Scene {
            emitter_on: Rc::clone(&on),
            cycles_done: Rc::clone(&cycles_done),
            ambient,
            deltas: deltas.to_vec(),
        };
        let probe = EmitterProbe {
            on,
            cycles_done,
        };
        (scene, probe)
    }

    #[test]
    fn test_noiseless_sensor_calibrates_to_zero() {
        let (mut scene, mut emitter) = rig(100, &[0]);
        let mut sampler = Sampler::new(SMALL);

        let offset = calibrate_offset(&mut sampler, &mut scene, &mut emitter, 10);
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_offset_is_floor_average_of_cycle_deltas() {
        // Per-cycle deltas 10, 15, 21 -> floor(46 / 3) = 15.
        let (mut scene, mut emitter) = rig(200, &[10, 15, 21]);
        let mut sampler = Sampler::new(SMALL);

        let offset = calibrate_offset(&mut sampler, &mut scene, &mut emitter, 3);
        assert_eq!(offset, 15);
    }

    #[test]
    fn test_sampler_left_in_initial_phase_with_last_levels() {
        let (mut scene, mut emitter) = rig(100, &[20]);
        let mut sampler = Sampler::new(SMALL);

        calibrate_offset(&mut sampler, &mut scene, &mut emitter, 2);

        assert_eq!(sampler.phase(), SamplePhase::Ambient);
        // Levels from the last calibration cycle are retained.
        assert_eq!(sampler.ambient_level(), 100);
        assert_eq!(sampler.ir_level(), 120);
    }

    #[test]
    fn test_calibration_discards_prior_state() {
        let (mut scene, mut emitter) = rig(100, &[20]);
        let mut sampler = Sampler::new(SMALL);

        // Leave the sampler mid-cycle with stale levels, then recalibrate.
        for _ in 0..8 {
            sampler.tick(&mut scene, &mut emitter);
        }
        let offset = calibrate_offset(&mut sampler, &mut scene, &mut emitter, 2);
        assert_eq!(offset, 20);
    }

    #[test]
    fn test_zero_cycles_treated_as_one() {
        let (mut scene, mut emitter) = rig(100, &[12]);
        let mut sampler = Sampler::new(SMALL);

        let offset = calibrate_offset(&mut sampler, &mut scene, &mut emitter, 0);
        assert_eq!(offset, 12);
    }

    #[test]
    fn test_end_to_end_calibrate_then_measure() {
        // The reference scenario: ambient 100, lit 80, tolerance 5. Two
        // calibration cycles of identical delta give offset 20; the
        // measured delta then lands exactly on the offset, inside the
        // noise floor, so no proximity is reported.
        let on = Rc::new(Cell::new(false));
        struct Pin(Rc<Cell<bool>>);
        impl EmitterPin for Pin {
            fn set_active(&mut self, active: bool) {
                self.0.set(active);
            }
        }
        struct Detector(Rc<Cell<bool>>);
        impl AnalogSource for Detector {
            fn read(&mut self) -> u16 {
                if self.0.get() { 80 } else { 100 }
            }
        }

        let config = SensorConfig {
            windows: SMALL,
            tolerance: 5,
            calibration_cycles: 2,
        };
        let mut sensor =
            ProximitySensor::new(Detector(Rc::clone(&on)), Pin(Rc::clone(&on)), config);

        sensor.calibrate();
        assert_eq!(sensor.ambient_level(), 100);
        assert_eq!(sensor.ir_level(), 80);
        assert_eq!(sensor.offset(), 20);

        // One steady-state cycle, one tick per "loop iteration".
        while !sensor.tick() {}
        assert_eq!(sensor.proximity(), 0);
    }
}
