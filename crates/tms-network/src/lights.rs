//! Round-robin traffic-light scheduler for one intersection.
//!
//! # Cycle model
//!
//! The lights hold a fixed cycling order of incoming routes.  Exactly one
//! route (the *active* one) has right of way; every other route in the order
//! is red.  Each tick advances `elapsed` by one:
//!
//! ```text
//! elapsed += 1
//! if elapsed >= duration:  elapsed = 0, active = (active + 1) % len
//! phase = YELLOW if elapsed > duration - yellow_time else GREEN
//! ```
//!
//! With order `[A, B]`, `yellow_time = 2`, `duration = 3`:
//!
//! ```text
//! tick 0: A green   tick 1: A green   tick 2: A yellow   tick 3: B green
//! ```

use std::fmt;

use tms_core::TrafficSignal;

use crate::route::{FIELD_SEPARATOR, Route};
use crate::{NetworkError, NetworkResult};

/// Separator between origin ids in a rendered cycling order.
pub const ORDER_SEPARATOR: char = ',';

/// One position in the cycling order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightSlot {
    /// Index of the route in the owning intersection's connection list.
    pub route: usize,
    /// Identifier of the route's origin, used for rendering.
    pub origin: String,
}

impl LightSlot {
    pub fn new(route: usize, origin: impl Into<String>) -> Self {
        Self { route, origin: origin.into() }
    }
}

/// Cyclic light controller over a non-empty order of incoming routes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntersectionLights {
    order:       Vec<LightSlot>,
    yellow_time: u32,
    duration:    u32,
    /// Seconds spent in the current green+yellow cycle.
    elapsed:     u32,
    /// Position in `order` of the route that currently has right of way.
    active:      usize,
}

impl IntersectionLights {
    /// Create lights starting with the first route in `order` green.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidOrder`] if `order` is empty.
    /// - [`NetworkError::InvalidArgument`] if `yellow_time < 1` or
    ///   `duration < yellow_time + 1`.
    pub fn new(order: Vec<LightSlot>, yellow_time: u32, duration: u32) -> NetworkResult<Self> {
        if order.is_empty() {
            return Err(NetworkError::InvalidOrder("cycling order is empty".into()));
        }
        check_timing(yellow_time, duration)?;
        Ok(Self { order, yellow_time, duration, elapsed: 0, active: 0 })
    }

    /// Advance one second and update the signals of the ordered routes.
    ///
    /// `routes` is the owning intersection's connection list; slots that do
    /// not index into it are skipped.
    pub fn one_second(&mut self, routes: &mut [Route]) {
        self.elapsed += 1;
        if self.elapsed >= self.duration {
            self.elapsed = 0;
            self.active = (self.active + 1) % self.order.len();
            log::trace!("lights: {} now has right of way", self.order[self.active].origin);
        }
        self.apply(routes);
    }

    /// Push the current state onto the routes: the active route shows the
    /// phase, every other ordered route shows red.
    pub(crate) fn apply(&self, routes: &mut [Route]) {
        let phase = self.phase();
        for (position, slot) in self.order.iter().enumerate() {
            let signal = if position == self.active { phase } else { TrafficSignal::Red };
            if let Some(route) = routes.get_mut(slot.route) {
                route.set_signal(signal);
            }
        }
    }

    /// Change the green+yellow cycle length.
    ///
    /// The phase counter is clamped to `min(elapsed, duration)` so a shrink
    /// never strands the cycle past its end; the next tick then rotates.
    pub fn set_duration(&mut self, duration: u32) -> NetworkResult<()> {
        check_timing(self.yellow_time, duration)?;
        self.duration = duration;
        self.elapsed = self.elapsed.min(duration);
        Ok(())
    }

    /// `Green` or `Yellow`: the signal the active route is showing.
    pub fn phase(&self) -> TrafficSignal {
        if self.elapsed > self.duration - self.yellow_time {
            TrafficSignal::Yellow
        } else {
            TrafficSignal::Green
        }
    }

    pub fn yellow_time(&self) -> u32 {
        self.yellow_time
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn order(&self) -> &[LightSlot] {
        &self.order
    }

    /// Origin id of the route that currently has right of way.
    pub fn active_origin(&self) -> &str {
        &self.order[self.active].origin
    }

    /// Whether the route at `route` (connection index) takes part in the cycle.
    pub fn controls(&self, route: usize) -> bool {
        self.order.iter().any(|slot| slot.route == route)
    }
}

/// `"<duration>:<origin1>,<origin2>,...,<originN>"`
impl fmt::Display for IntersectionLights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{FIELD_SEPARATOR}", self.duration)?;
        for (i, slot) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, "{ORDER_SEPARATOR}")?;
            }
            f.write_str(&slot.origin)?;
        }
        Ok(())
    }
}

/// Shared by construction, duration changes, and `Intersection` pre-checks.
pub(crate) fn check_timing(yellow_time: u32, duration: u32) -> NetworkResult<()> {
    if yellow_time < 1 {
        return Err(NetworkError::InvalidArgument(format!(
            "yellow time must be at least 1, got {yellow_time}"
        )));
    }
    if duration <= yellow_time {
        return Err(NetworkError::InvalidArgument(format!(
            "duration must be at least yellow time + 1 ({}), got {duration}",
            u64::from(yellow_time) + 1
        )));
    }
    Ok(())
}
