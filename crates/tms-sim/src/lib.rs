//! `tms-sim`: drives a traffic network one simulated second at a time.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Congestion  CongestionModel::next_level for every route
//!                 (creation order, seeded RNG).
//!   ② Slowdown    intersections at or above slowdown_threshold reduce
//!                 their incoming speed signs.
//!   ③ Lights      Network::tick advances every light cycle by one second.
//! ```
//!
//! # Quick-start
//!
//! ```
//! use tms_core::SimConfig;
//! use tms_network::Network;
//! use tms_sim::{NoopObserver, RandomWalkCongestion, Sim};
//!
//! let mut net = Network::new(1);
//! net.add_intersection("A").unwrap();
//! net.add_intersection("B").unwrap();
//! net.connect_intersections("A", "B", 50).unwrap();
//!
//! let config = SimConfig { total_ticks: 60, ..SimConfig::default() };
//! let mut sim = Sim::new(config, net, RandomWalkCongestion::new(5)).unwrap();
//! sim.run(&mut NoopObserver).unwrap();
//! assert!(sim.network.get_congestion("A", "B").unwrap() <= 100);
//! ```

pub mod congestion;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use congestion::{CongestionModel, RandomWalkCongestion, StaticCongestion};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
