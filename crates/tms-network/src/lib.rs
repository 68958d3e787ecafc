//! `tms-network`: the road-traffic network model.
//!
//! # Crate layout
//!
//! | Module           | Contents                                               |
//! |------------------|--------------------------------------------------------|
//! | [`route`]        | `Route`: directed edge, speed sign, congestion         |
//! | [`lights`]       | `IntersectionLights`: round-robin signal scheduler     |
//! | [`intersection`] | `Intersection`: node owning its incoming routes        |
//! | [`network`]      | `Network`: graph container and per-second tick         |
//! | [`error`]        | `NetworkError`, `NetworkResult<T>`                     |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | Use FxHash for the intersection name index.              |
//!
//! # Example
//!
//! ```
//! use tms_core::TrafficSignal;
//! use tms_network::Network;
//!
//! let mut net = Network::new(1);
//! for id in ["A", "B", "X"] {
//!     net.add_intersection(id).unwrap();
//! }
//! net.connect_intersections("A", "X", 60).unwrap();
//! net.connect_intersections("B", "X", 40).unwrap();
//! net.add_lights("X", 3, &["A", "B"]).unwrap();
//!
//! for _ in 0..3 {
//!     net.tick();
//! }
//! let b_to_x = net.get_connection("B", "X").unwrap();
//! assert_eq!(b_to_x.signal(), Some(TrafficSignal::Green));
//! ```

pub mod error;
pub mod intersection;
pub mod lights;
pub mod network;
pub mod route;


pub use error::{NetworkError, NetworkResult};
pub use intersection::Intersection;
pub use lights::{IntersectionLights, LightSlot};
pub use network::Network;
pub use route::Route;
