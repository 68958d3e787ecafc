//! The `CongestionModel` trait: where congestion levels come from.
//!
//! The network itself never changes congestion; it only stores whatever the
//! outside world reports.  A congestion model plays that outside world in a
//! simulation run.

use tms_core::{SimRng, Tick};
use tms_network::Route;
use tms_network::route::MAX_CONGESTION;

/// Pluggable source of congestion readings.
///
/// Called once per route per tick, in route creation order, before the
/// lights advance.  Return `Some(level)` to report a new reading or `None`
/// to leave the route as it is.  Levels above 100 abort the tick with an
/// error.
///
/// # Example
///
/// ```rust,ignore
/// struct RushHour { peak: Tick }
///
/// impl CongestionModel for RushHour {
///     fn next_level(&mut self, _route: &Route, tick: Tick, _rng: &mut SimRng) -> Option<u32> {
///         (tick == self.peak).then_some(100)
///     }
/// }
/// ```
pub trait CongestionModel {
    fn next_level(&mut self, route: &Route, tick: Tick, rng: &mut SimRng) -> Option<u32>;
}

/// Leaves every congestion level unchanged.
#[derive(Copy, Clone, Debug, Default)]
pub struct StaticCongestion;

impl CongestionModel for StaticCongestion {
    fn next_level(&mut self, _route: &Route, _tick: Tick, _rng: &mut SimRng) -> Option<u32> {
        None
    }
}

/// Moves each level by a uniform step in `[-max_step, max_step]` every tick,
/// clamped to `0..=100`.
#[derive(Copy, Clone, Debug)]
pub struct RandomWalkCongestion {
    pub max_step: u32,
}

impl RandomWalkCongestion {
    pub fn new(max_step: u32) -> Self {
        Self { max_step }
    }
}

impl CongestionModel for RandomWalkCongestion {
    fn next_level(&mut self, route: &Route, _tick: Tick, rng: &mut SimRng) -> Option<u32> {
        if self.max_step == 0 {
            return None;
        }
        let bound = i64::from(self.max_step);
        let step: i64 = rng.gen_range(-bound..=bound);
        let level = (i64::from(route.congestion()) + step).clamp(0, i64::from(MAX_CONGESTION));
        Some(level as u32)
    }
}
