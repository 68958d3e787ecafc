//! Unit tests for tms-core primitives.

#[cfg(test)]
mod ids {
    use crate::IntersectionId;

    #[test]
    fn index_roundtrip() {
        let id = IntersectionId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(IntersectionId::try_from(42usize).unwrap(), id);
    }
}

#[cfg(test)]
mod signal {
    use crate::TrafficSignal;

    #[test]
    fn default_is_red() {
        assert_eq!(TrafficSignal::default(), TrafficSignal::Red);
    }

    #[test]
    fn display_lowercase() {
        assert_eq!(TrafficSignal::Yellow.to_string(), "yellow");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn clock_hms() {
        let mut clock = SimClock::new();
        for _ in 0..3_725 {
            clock.advance();
        }
        assert_eq!(clock.current_tick, Tick(3_725));
        assert_eq!(clock.elapsed_hms(), (1, 2, 5));
        assert_eq!(clock.to_string(), "T3725 (1:02:05)");
    }

    #[test]
    fn config_end_and_snapshots() {
        let config = SimConfig { total_ticks: 10, output_interval_ticks: 4, ..SimConfig::default() };
        assert_eq!(config.end_tick(), Tick(10));
        assert!(config.is_snapshot_tick(Tick(0)));
        assert!(config.is_snapshot_tick(Tick(8)));
        assert!(!config.is_snapshot_tick(Tick(5)));
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let config = SimConfig { output_interval_ticks: 0, ..SimConfig::default() };
        assert!(!config.is_snapshot_tick(Tick(0)));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let xs: Vec<i32> = (0..16).map(|_| a.gen_range(-5..=5)).collect();
        let ys: Vec<i32> = (0..16).map(|_| b.gen_range(-5..=5)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(1);
        for _ in 0..1_000 {
            let x: u32 = rng.gen_range(0..=100);
            assert!(x <= 100);
        }
    }
}
