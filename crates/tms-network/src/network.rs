//! The network graph: every intersection, addressed by id or handle.
//!
//! # Data layout
//!
//! Intersections live in a `Vec` in insertion order; an `IntersectionId` is
//! simply the position in that `Vec`.  A name index maps identifiers to
//! handles.  Each intersection owns the routes that *end* at it, and the
//! network remembers the order in which routes were created so iteration
//! (and therefore serialization and ticking) is deterministic.
//!
//! All mutation goes through `Network` methods so that the creation-order
//! record can never go stale.

use tms_core::IntersectionId;

use crate::{Intersection, NetworkError, NetworkResult, Route};

#[cfg(feature = "fx-hash")]
type NameIndex = rustc_hash::FxHashMap<String, IntersectionId>;
#[cfg(not(feature = "fx-hash"))]
type NameIndex = std::collections::HashMap<String, IntersectionId>;

/// Characters that delimit fields in the persistence format and therefore
/// cannot appear in an intersection identifier.
pub const RESERVED_ID_CHARS: [char; 3] = [':', ',', ';'];

/// Position of one route: destination handle plus index in its connections.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct RouteSlot {
    to:   IntersectionId,
    slot: usize,
}

/// Directed road graph of intersections and routes.
#[derive(Clone, Debug)]
pub struct Network {
    intersections: Vec<Intersection>,
    by_name:       NameIndex,
    route_order:   Vec<RouteSlot>,
    /// Default yellow time for lights added without an explicit one.
    yellow_time:   u32,
}

impl Network {
    /// Create an empty network with the given default yellow time.
    pub fn new(yellow_time: u32) -> Self {
        Self {
            intersections: Vec::new(),
            by_name:       NameIndex::default(),
            route_order:   Vec::new(),
            yellow_time,
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// The network-wide default yellow time.
    pub fn yellow_time(&self) -> u32 {
        self.yellow_time
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn route_count(&self) -> usize {
        self.route_order.len()
    }

    // ── Intersections ─────────────────────────────────────────────────────

    /// Add an intersection and return its handle.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidArgument`] if `id` is empty or contains a
    ///   reserved separator or whitespace.
    /// - [`NetworkError::InvalidState`] if `id` is already taken.
    pub fn add_intersection(&mut self, id: &str) -> NetworkResult<IntersectionId> {
        if id.is_empty()
            || id.contains(RESERVED_ID_CHARS)
            || id.chars().any(char::is_whitespace)
        {
            return Err(NetworkError::InvalidArgument(format!(
                "invalid intersection identifier {id:?}"
            )));
        }
        if self.by_name.contains_key(id) {
            return Err(NetworkError::InvalidState(format!(
                "intersection {id:?} already exists"
            )));
        }
        let handle = IntersectionId::try_from(self.intersections.len()).map_err(|_| {
            NetworkError::InvalidState("intersection table is full".into())
        })?;
        self.intersections.push(Intersection::new(handle, id));
        self.by_name.insert(id.to_owned(), handle);
        Ok(handle)
    }

    /// Look up an intersection by identifier.
    pub fn find_intersection(&self, id: &str) -> NetworkResult<&Intersection> {
        let handle = self.handle_of(id)?;
        Ok(&self.intersections[handle.index()])
    }

    /// Look up an intersection by handle.
    pub fn intersection(&self, handle: IntersectionId) -> Option<&Intersection> {
        self.intersections.get(handle.index())
    }

    /// All intersections in insertion order.
    pub fn intersections(&self) -> impl ExactSizeIterator<Item = &Intersection> + '_ {
        self.intersections.iter()
    }

    /// Intersections that feed a route ending at `id`.
    pub fn connected_intersections(&self, id: &str) -> NetworkResult<Vec<&Intersection>> {
        let to = self.find_intersection(id)?;
        Ok(to
            .connected_intersections()
            .into_iter()
            .map(|h| &self.intersections[h.index()])
            .collect())
    }

    fn handle_of(&self, id: &str) -> NetworkResult<IntersectionId> {
        self.by_name
            .get(id)
            .copied()
            .ok_or_else(|| NetworkError::IntersectionNotFound(id.to_owned()))
    }

    fn find_mut(&mut self, id: &str) -> NetworkResult<&mut Intersection> {
        let handle = self.handle_of(id)?;
        Ok(&mut self.intersections[handle.index()])
    }

    // ── Routes ────────────────────────────────────────────────────────────

    /// Create a route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::IntersectionNotFound`] for either endpoint.
    /// - [`NetworkError::InvalidArgument`] / [`NetworkError::InvalidState`]
    ///   as for [`Intersection::add_connection`].
    pub fn connect_intersections(&mut self, from: &str, to: &str, default_speed: i32) -> NetworkResult<()> {
        let from_handle = self.handle_of(from)?;
        let to_handle = self.handle_of(to)?;
        let dest = &mut self.intersections[to_handle.index()];
        dest.connect_from(from_handle, from, default_speed)?;
        self.route_order.push(RouteSlot { to: to_handle, slot: dest.connections().len() - 1 });
        Ok(())
    }

    /// Add the reverse of the route `from → to`, with the same default speed
    /// and, if the original has one, a speed sign showing the same speed.
    pub fn make_two_way(&mut self, from: &str, to: &str) -> NetworkResult<()> {
        let forward = self.get_connection(from, to)?;
        let default_speed = forward.default_speed();
        let sign = forward.has_speed_sign().then(|| forward.speed());

        self.connect_intersections(to, from, default_speed)?;
        if let Some(speed) = sign {
            self.add_speed_sign(to, from, speed)?;
        }
        Ok(())
    }

    /// The route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::IntersectionNotFound`] for either endpoint.
    /// - [`NetworkError::RouteNotFound`] if no such route exists.
    pub fn get_connection(&self, from: &str, to: &str) -> NetworkResult<&Route> {
        self.handle_of(from)?;
        self.find_intersection(to)?.connection_from(from)
    }

    fn connection_mut(&mut self, from: &str, to: &str) -> NetworkResult<&mut Route> {
        self.handle_of(from)?;
        self.find_mut(to)?.connection_from_mut(from)
    }

    /// Congestion on the route from `from` to `to`.
    pub fn get_congestion(&self, from: &str, to: &str) -> NetworkResult<u32> {
        Ok(self.get_connection(from, to)?.congestion())
    }

    pub fn set_congestion(&mut self, from: &str, to: &str, level: u32) -> NetworkResult<()> {
        self.connection_mut(from, to)?.set_congestion(level)
    }

    pub fn add_speed_sign(&mut self, from: &str, to: &str, initial_speed: i32) -> NetworkResult<()> {
        self.connection_mut(from, to)?.add_speed_sign(initial_speed)
    }

    pub fn set_speed_limit(&mut self, from: &str, to: &str, limit: i32) -> NetworkResult<()> {
        self.connection_mut(from, to)?.set_speed_limit(limit)
    }

    /// All routes in creation order.
    pub fn routes(&self) -> impl ExactSizeIterator<Item = &Route> + '_ {
        self.route_order
            .iter()
            .map(|r| &self.intersections[r.to.index()].connections()[r.slot])
    }

    /// Visit every route mutably, in creation order.
    pub fn for_each_route_mut(&mut self, mut f: impl FnMut(&mut Route)) {
        for r in &self.route_order {
            f(&mut self.intersections[r.to.index()].connections_mut()[r.slot]);
        }
    }

    // ── Lights & speed signs ──────────────────────────────────────────────

    /// Install lights at `id` using the network's default yellow time.
    pub fn add_lights<S: AsRef<str>>(&mut self, id: &str, duration: u32, order: &[S]) -> NetworkResult<()> {
        let yellow_time = self.yellow_time;
        self.find_mut(id)?.add_traffic_lights(order, yellow_time, duration)
    }

    /// Install lights at `id` with a per-intersection yellow time.
    pub fn add_lights_with_yellow<S: AsRef<str>>(
        &mut self,
        id:          &str,
        yellow_time: u32,
        duration:    u32,
        order:       &[S],
    ) -> NetworkResult<()> {
        self.find_mut(id)?.add_traffic_lights(order, yellow_time, duration)
    }

    pub fn change_light_duration(&mut self, id: &str, duration: u32) -> NetworkResult<()> {
        self.find_mut(id)?.set_light_duration(duration)
    }

    pub fn reduce_incoming_speed_signs(&mut self, id: &str) -> NetworkResult<()> {
        self.find_mut(id)?.reduce_incoming_speed_signs();
        Ok(())
    }

    // ── Simulation ────────────────────────────────────────────────────────

    /// Advance every set of lights by one second, in insertion order.
    pub fn tick(&mut self) {
        for intersection in self.intersections.iter_mut().filter(|i| i.has_traffic_lights()) {
            intersection.one_second();
        }
    }
}
