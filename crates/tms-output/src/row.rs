//! Plain data rows written by output backends.

use tms_core::TrafficSignal;
use tms_network::{Network, Route};

/// State of one route at a snapshot tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSnapshotRow {
    pub tick:       u64,
    /// `"from:to"`.
    pub route:      String,
    /// `None` for routes without a traffic light.
    pub signal:     Option<TrafficSignal>,
    pub congestion: u32,
    /// Effective speed: the sign if present, else the default speed.
    pub speed:      i32,
}

impl RouteSnapshotRow {
    pub fn from_route(tick: u64, route: &Route) -> Self {
        Self {
            tick,
            route:      route.id(),
            signal:     route.signal(),
            congestion: route.congestion(),
            speed:      route.speed(),
        }
    }
}

/// Network-wide figures for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:            u64,
    /// Routes whose light shows green.  Unlit routes are not counted.
    pub green_routes:    u64,
    /// Integer mean over all routes; 0 for a network without routes.
    pub mean_congestion: u32,
}

impl TickSummaryRow {
    pub fn from_network(tick: u64, network: &Network) -> Self {
        let mut green_routes = 0u64;
        let mut total = 0u64;
        for route in network.routes() {
            if route.signal() == Some(TrafficSignal::Green) {
                green_routes += 1;
            }
            total += u64::from(route.congestion());
        }
        let mean_congestion = match network.route_count() as u64 {
            0 => 0,
            n => (total / n) as u32,
        };
        Self { tick, green_routes, mean_congestion }
    }
}
