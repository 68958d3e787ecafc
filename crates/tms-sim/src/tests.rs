//! Tests for tms-sim.

use tms_core::{SimConfig, SimRng, Tick, TrafficSignal};
use tms_network::{Network, Route};

use crate::{CongestionModel, NoopObserver, RandomWalkCongestion, Sim, SimObserver, StaticCongestion};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        total_ticks,
        seed:                  42,
        output_interval_ticks: total_ticks,
        slowdown_threshold:    None,
    }
}

/// A and B feed X (lights, duration 3, order A then B); X feeds A back.
/// A→X carries a speed sign showing 60.
fn junction() -> Network {
    let mut net = Network::new(1);
    for id in ["A", "B", "X"] {
        net.add_intersection(id).unwrap();
    }
    net.connect_intersections("A", "X", 60).unwrap();
    net.connect_intersections("B", "X", 40).unwrap();
    net.connect_intersections("X", "A", 50).unwrap();
    net.add_speed_sign("A", "X", 60).unwrap();
    net.add_lights("X", 3, &["A", "B"]).unwrap();
    net
}

fn congestion_levels(net: &Network) -> Vec<u32> {
    net.routes().map(Route::congestion).collect()
}

/// Records every hook as a short string.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.events.push(format!("start {}", tick.0));
    }
    fn on_tick_end(&mut self, tick: Tick, _network: &Network) {
        self.events.push(format!("end {}", tick.0));
    }
    fn on_snapshot(&mut self, tick: Tick, _network: &Network) {
        self.events.push(format!("snapshot {}", tick.0));
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.events.push(format!("sim_end {}", final_tick.0));
    }
}

/// Always reports the same level.
struct Fixed(u32);

impl CongestionModel for Fixed {
    fn next_level(&mut self, _route: &Route, _tick: Tick, _rng: &mut SimRng) -> Option<u32> {
        Some(self.0)
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;
    use crate::SimError;

    #[test]
    fn starts_at_tick_zero() {
        let sim = Sim::new(test_config(10), junction(), StaticCongestion).unwrap();
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
        assert_eq!(sim.network.len(), 3);
    }

    #[test]
    fn slowdown_threshold_above_100_rejected() {
        let config = SimConfig { slowdown_threshold: Some(101), ..test_config(10) };
        assert!(matches!(
            Sim::new(config, junction(), StaticCongestion),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn slowdown_threshold_of_100_accepted() {
        let config = SimConfig { slowdown_threshold: Some(100), ..test_config(10) };
        assert!(Sim::new(config, junction(), StaticCongestion).is_ok());
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_loop {
    use super::*;

    #[test]
    fn hook_order() {
        let mut sim = Sim::new(test_config(2), junction(), StaticCongestion).unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        // output_interval_ticks = 2, so only tick 0 is a snapshot tick.
        assert_eq!(rec.events, ["start 0", "end 0", "snapshot 0", "start 1", "end 1", "sim_end 2"]);
    }

    #[test]
    fn run_stops_at_total_ticks() {
        let mut sim = Sim::new(test_config(5), junction(), StaticCongestion).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));

        // Already at the end: nothing more happens except the end hook.
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.events, ["sim_end 5"]);
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut sim = Sim::new(test_config(2), junction(), StaticCongestion).unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(5, &mut rec).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));
        assert!(!rec.events.iter().any(|e| e.starts_with("sim_end")));
    }

    #[test]
    fn snapshot_interval() {
        let config = SimConfig { output_interval_ticks: 3, ..test_config(7) };
        let mut sim = Sim::new(config, junction(), StaticCongestion).unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let snaps: Vec<&str> = rec
            .events
            .iter()
            .map(String::as_str)
            .filter(|e| e.starts_with("snapshot"))
            .collect();
        assert_eq!(snaps, ["snapshot 0", "snapshot 3", "snapshot 6"]);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let config = SimConfig { output_interval_ticks: 0, ..test_config(4) };
        let mut sim = Sim::new(config, junction(), StaticCongestion).unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(!rec.events.iter().any(|e| e.starts_with("snapshot")));
    }

    #[test]
    fn lights_advance_once_per_tick() {
        let mut sim = Sim::new(test_config(10), junction(), StaticCongestion).unwrap();
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        assert_eq!(sim.network.get_connection("A", "X").unwrap().signal(), Some(TrafficSignal::Green));

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.network.get_connection("A", "X").unwrap().signal(), Some(TrafficSignal::Red));
        assert_eq!(sim.network.get_connection("B", "X").unwrap().signal(), Some(TrafficSignal::Green));
    }
}

// ── Congestion models ─────────────────────────────────────────────────────────

#[cfg(test)]
mod congestion {
    use super::*;
    use crate::SimError;

    #[test]
    fn static_model_leaves_levels_alone() {
        let mut net = junction();
        net.set_congestion("B", "X", 35).unwrap();
        let mut sim = Sim::new(test_config(20), net, StaticCongestion).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(congestion_levels(&sim.network), [0, 35, 0]);
    }

    #[test]
    fn fixed_model_applies_to_every_route() {
        let mut sim = Sim::new(test_config(1), junction(), Fixed(70)).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(congestion_levels(&sim.network), [70, 70, 70]);
    }

    #[test]
    fn level_above_100_aborts_tick() {
        let mut sim = Sim::new(test_config(1), junction(), Fixed(101)).unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::Network(_)));
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn random_walk_is_deterministic_per_seed() {
        let run = |seed: u64| {
            let config = SimConfig { seed, ..test_config(50) };
            let mut sim = Sim::new(config, junction(), RandomWalkCongestion::new(10)).unwrap();
            sim.run(&mut NoopObserver).unwrap();
            congestion_levels(&sim.network)
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }

    #[test]
    fn random_walk_stays_in_range() {
        struct Bounds;
        impl SimObserver for Bounds {
            fn on_tick_end(&mut self, _tick: Tick, network: &Network) {
                assert!(network.routes().all(|r| r.congestion() <= 100));
            }
        }

        let mut net = junction();
        net.set_congestion("A", "X", 100).unwrap();
        let mut sim = Sim::new(test_config(300), net, RandomWalkCongestion::new(30)).unwrap();
        sim.run(&mut Bounds).unwrap();
    }

    #[test]
    fn zero_step_random_walk_is_static() {
        let mut net = junction();
        net.set_congestion("X", "A", 12).unwrap();
        let mut sim = Sim::new(test_config(10), net, RandomWalkCongestion::new(0)).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(congestion_levels(&sim.network), [0, 0, 12]);
    }
}

// ── Slowdown policy ───────────────────────────────────────────────────────────

#[cfg(test)]
mod slowdown {
    use super::*;

    fn congested_junction() -> Network {
        let mut net = junction();
        net.set_congestion("A", "X", 90).unwrap();
        net.set_congestion("B", "X", 90).unwrap();
        net
    }

    #[test]
    fn congested_intersection_reduces_signs() {
        let config = SimConfig { slowdown_threshold: Some(80), ..test_config(10) };
        let mut sim = Sim::new(config, congested_junction(), StaticCongestion).unwrap();

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.network.get_connection("A", "X").unwrap().speed(), 50);

        // Never reduced below 50.
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.network.get_connection("A", "X").unwrap().speed(), 50);
    }

    #[test]
    fn below_threshold_leaves_signs() {
        let config = SimConfig { slowdown_threshold: Some(95), ..test_config(10) };
        let mut sim = Sim::new(config, congested_junction(), StaticCongestion).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.network.get_connection("A", "X").unwrap().speed(), 60);
    }

    #[test]
    fn disabled_without_threshold() {
        let mut sim = Sim::new(test_config(10), congested_junction(), StaticCongestion).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.network.get_connection("A", "X").unwrap().speed(), 60);
    }
}
