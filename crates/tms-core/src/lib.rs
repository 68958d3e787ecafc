//! `tms-core`: foundational types for the traffic management system.
//!
//! This crate is a dependency of every other `tms-*` crate.  It has no
//! `tms-*` dependencies and only `rand` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `IntersectionId` table handle                          |
//! | [`signal`]   | `TrafficSignal` (green / yellow / red)                 |
//! | [`time`]     | `Tick`, `SimClock`, `SimConfig`                        |
//! | [`rng`]      | `SimRng` (seeded, deterministic)                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod ids;
pub mod rng;
pub mod signal;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::IntersectionId;
pub use rng::SimRng;
pub use signal::TrafficSignal;
pub use time::{SimClock, SimConfig, Tick};
