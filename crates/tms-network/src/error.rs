//! Network-model error type.

use thiserror::Error;

/// Errors produced by `tms-network`.
///
/// Every operation validates its inputs before touching any state, so an
/// `Err` always means the network is unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// A numeric argument is out of range (negative speed, yellow time
    /// below one, cycle too short, congestion above 100, …).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not valid in the current configuration (duplicate
    /// connection, lights missing or already present, no speed sign, …).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A light cycling order is empty or not a permutation of the
    /// intersection's incoming routes.
    #[error("invalid light order: {0}")]
    InvalidOrder(String),

    #[error("intersection {0:?} not found")]
    IntersectionNotFound(String),

    #[error("no route from {from:?} to {to:?}")]
    RouteNotFound { from: String, to: String },
}

impl NetworkError {
    /// `true` for either kind of lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NetworkError::IntersectionNotFound(_) | NetworkError::RouteNotFound { .. }
        )
    }
}

pub type NetworkResult<T> = Result<T, NetworkError>;
