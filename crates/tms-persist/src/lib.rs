//! `tms-persist`: reading and writing networks as text.
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`loader`] | `load_network`, `load_network_reader`, `parse_network` |
//! | [`writer`] | `save_network`, `write_network`, `serialize_network`   |
//! | [`error`]  | `PersistError`, `PersistResult<T>`                     |
//!
//! Loading a file written by [`save_network`] yields a network that
//! serializes to the same bytes.

pub mod error;
pub mod loader;
pub mod writer;


pub use error::{PersistError, PersistResult};
pub use loader::{load_network, load_network_reader, parse_network};
pub use writer::{NetworkText, save_network, serialize_network, write_network};
