//! Intersections: the nodes of the network graph.

use std::fmt;
use std::hash::{Hash, Hasher};

use tms_core::IntersectionId;

use crate::lights::{LightSlot, check_timing};
use crate::route::FIELD_SEPARATOR;
use crate::{IntersectionLights, NetworkError, NetworkResult, Route};

/// Speed signs showing less than this are never reduced.
pub const SPEED_REDUCTION_CUTOFF: i32 = 50;

/// Amount each reduction takes off a speed sign's display.
pub const SPEED_REDUCTION_AMOUNT: i32 = 10;

/// A point at which routes originate and terminate.
///
/// Owns its incoming routes and, optionally, one set of traffic lights.
/// Two intersections are equal iff their identifiers are equal.
#[derive(Clone, Debug)]
pub struct Intersection {
    handle:      IntersectionId,
    id:          String,
    /// Routes that terminate here, in the order they were added.
    connections: Vec<Route>,
    lights:      Option<IntersectionLights>,
}

impl Intersection {
    /// Create an intersection with no connections and no lights.
    ///
    /// `handle` is the intersection's slot in its network; standalone
    /// intersections may use any value.
    pub fn new(handle: IntersectionId, id: impl Into<String>) -> Self {
        Self {
            handle,
            id: id.into(),
            connections: Vec::new(),
            lights: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn handle(&self) -> IntersectionId {
        self.handle
    }

    /// All routes that end at this intersection, in insertion order.
    pub fn connections(&self) -> &[Route] {
        &self.connections
    }

    /// Handles of every intersection that feeds a route ending here.
    pub fn connected_intersections(&self) -> Vec<IntersectionId> {
        self.connections.iter().map(|r| r.from()).collect()
    }

    pub fn has_traffic_lights(&self) -> bool {
        self.lights.is_some()
    }

    pub fn lights(&self) -> Option<&IntersectionLights> {
        self.lights.as_ref()
    }

    // ── Connections ───────────────────────────────────────────────────────

    /// Add a route from `from` to this intersection.
    ///
    /// If this intersection already has lights, the new route is marked as
    /// light-controlled but is *not* part of the cycling order, so it stays
    /// red.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidArgument`] if `default_speed` is negative.
    /// - [`NetworkError::InvalidState`] if a route from `from` already exists.
    pub fn add_connection(&mut self, from: &Intersection, default_speed: i32) -> NetworkResult<()> {
        self.connect_from(from.handle, &from.id, default_speed)
    }

    /// Handle-based form of [`add_connection`](Self::add_connection), used by
    /// `Network` where the origin cannot be borrowed alongside `self`.
    pub(crate) fn connect_from(
        &mut self,
        from:          IntersectionId,
        from_id:       &str,
        default_speed: i32,
    ) -> NetworkResult<()> {
        let mut route = Route::new(from, from_id, self.id.as_str(), default_speed)?;
        if self.position_of(from_id).is_some() {
            return Err(NetworkError::InvalidState(format!(
                "connection already exists from {from_id:?} to {:?}",
                self.id
            )));
        }
        if self.lights.is_some() {
            route.add_traffic_light();
            log::warn!(
                "route {} added to lighted intersection {:?}; it is not in the cycle and stays red",
                route.id(),
                self.id
            );
        }
        self.connections.push(route);
        Ok(())
    }

    /// The route from `from` to this intersection.
    pub fn get_connection(&self, from: &Intersection) -> NetworkResult<&Route> {
        self.connection_from(&from.id)
    }

    /// Look up an incoming route by its origin identifier.
    pub fn connection_from(&self, from_id: &str) -> NetworkResult<&Route> {
        self.position_of(from_id)
            .map(|i| &self.connections[i])
            .ok_or_else(|| self.route_not_found(from_id))
    }

    pub fn connection_from_mut(&mut self, from_id: &str) -> NetworkResult<&mut Route> {
        match self.position_of(from_id) {
            Some(i) => Ok(&mut self.connections[i]),
            None => Err(self.route_not_found(from_id)),
        }
    }

    fn position_of(&self, from_id: &str) -> Option<usize> {
        self.connections.iter().position(|r| r.from_name() == from_id)
    }

    fn route_not_found(&self, from_id: &str) -> NetworkError {
        NetworkError::RouteNotFound { from: from_id.to_owned(), to: self.id.clone() }
    }

    // ── Traffic lights ────────────────────────────────────────────────────

    /// Install traffic lights cycling through `order` (origin identifiers).
    ///
    /// `order` must be a permutation of the current incoming connections:
    /// every connection exactly once, nothing else.  Everything is validated
    /// before any route is touched.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidState`] if lights are already installed.
    /// - [`NetworkError::InvalidArgument`] if `yellow_time < 1` or
    ///   `duration < yellow_time + 1`.
    /// - [`NetworkError::InvalidOrder`] if `order` is empty or not a
    ///   permutation of the connections.
    pub fn add_traffic_lights<S: AsRef<str>>(
        &mut self,
        order:       &[S],
        yellow_time: u32,
        duration:    u32,
    ) -> NetworkResult<()> {
        if self.lights.is_some() {
            return Err(NetworkError::InvalidState(format!(
                "intersection {:?} already has traffic lights",
                self.id
            )));
        }
        check_timing(yellow_time, duration)?;
        let slots = self.resolve_order(order)?;
        let lights = IntersectionLights::new(slots, yellow_time, duration)?;

        for slot in lights.order() {
            self.connections[slot.route].add_traffic_light();
        }
        lights.apply(&mut self.connections);
        log::debug!("intersection {:?}: lights installed ({lights})", self.id);
        self.lights = Some(lights);
        Ok(())
    }

    /// Map origin ids to connection slots, rejecting anything that is not a
    /// permutation of the connections.
    fn resolve_order<S: AsRef<str>>(&self, order: &[S]) -> NetworkResult<Vec<LightSlot>> {
        let invalid = |reason: String| {
            NetworkError::InvalidOrder(format!("intersection {:?}: {reason}", self.id))
        };
        if order.is_empty() {
            return Err(invalid("cycling order is empty".into()));
        }

        let mut seen = vec![false; self.connections.len()];
        let mut slots = Vec::with_capacity(order.len());
        for origin in order {
            let origin = origin.as_ref();
            let Some(i) = self.position_of(origin) else {
                return Err(invalid(format!("{origin:?} is not an incoming connection")));
            };
            if std::mem::replace(&mut seen[i], true) {
                return Err(invalid(format!("{origin:?} appears more than once")));
            }
            slots.push(LightSlot::new(i, origin));
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(invalid(format!(
                "connection from {:?} is missing",
                self.connections[missing].from_name()
            )));
        }
        Ok(slots)
    }

    /// Change the green+yellow duration of this intersection's lights.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidState`] if there are no lights.
    /// - [`NetworkError::InvalidArgument`] if `duration < yellow_time + 1`.
    pub fn set_light_duration(&mut self, duration: u32) -> NetworkResult<()> {
        let Some(lights) = self.lights.as_mut() else {
            return Err(NetworkError::InvalidState(format!(
                "intersection {:?} has no traffic lights",
                self.id
            )));
        };
        lights.set_duration(duration)?;
        lights.apply(&mut self.connections);
        log::debug!("intersection {:?}: light duration set to {duration}", self.id);
        Ok(())
    }

    /// Advance this intersection's lights by one second.  No-op without lights.
    pub fn one_second(&mut self) {
        if let Some(lights) = self.lights.as_mut() {
            lights.one_second(&mut self.connections);
        }
    }

    // ── Speed signs ───────────────────────────────────────────────────────

    /// Lower every incoming speed sign showing at least 50 to
    /// `max(50, speed - 10)`.  Routes without a sign, or already below 50,
    /// are left alone.
    pub fn reduce_incoming_speed_signs(&mut self) {
        for route in self.connections.iter_mut().filter(|r| r.has_speed_sign()) {
            let current = route.speed();
            if current >= SPEED_REDUCTION_CUTOFF {
                route.lower_speed_sign(SPEED_REDUCTION_CUTOFF.max(current - SPEED_REDUCTION_AMOUNT));
            }
        }
    }

    /// Mean congestion over incoming routes, or `None` with no connections.
    pub fn mean_incoming_congestion(&self) -> Option<u32> {
        if self.connections.is_empty() {
            return None;
        }
        let total: u64 = self.connections.iter().map(|r| u64::from(r.congestion())).sum();
        Some((total / self.connections.len() as u64) as u32)
    }

    pub(crate) fn connections_mut(&mut self) -> &mut [Route] {
        &mut self.connections
    }
}

impl PartialEq for Intersection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Intersection {}

impl Hash for Intersection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// `"<id>"`, or `"<id>:<lights>"` when lights are installed.
impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lights {
            None => f.write_str(&self.id),
            Some(lights) => write!(f, "{}{FIELD_SEPARATOR}{lights}", self.id),
        }
    }
}
