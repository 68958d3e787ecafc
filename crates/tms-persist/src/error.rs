use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    /// The text violates the format or describes an impossible network.
    /// `line` is 1-based; a value one past the last line means "at end of
    /// input".
    #[error("invalid network at line {line}: {reason}")]
    InvalidNetwork { line: usize, reason: String },

    /// The network file could not be opened or read.
    #[error("network file {} unavailable: {source}", path.display())]
    FileUnavailable {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A route joined a lighted intersection after its lights were set, so
    /// the intersection's light order no longer lists every incoming route.
    #[error("cannot save network: route {route} at intersection {intersection:?} is outside its light cycle")]
    RouteOutsideCycle { intersection: String, route: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PersistError {
    pub(crate) fn invalid(line: usize, reason: impl std::fmt::Display) -> Self {
        PersistError::InvalidNetwork { line, reason: reason.to_string() }
    }
}

pub type PersistResult<T> = Result<T, PersistError>;
