//! Error type shared by body construction, runtime setters and collision
//! resolution

use thiserror::Error;

use super::states::BodyHandle;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error("body radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("restitution must lie in [0, 1], got {0}")]
    InvalidRestitution(f64),

    #[error("octree max body count must be at least 1, got {0}")]
    InvalidMaxBodyCount(usize),

    #[error("octree rebuild interval must be at least 1 tick, got {0}")]
    InvalidRebuildInterval(u32),

    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("`{field}` needs 3 components, got {len}")]
    MalformedVector { field: &'static str, len: usize },

    #[error("`{field}` must have finite components")]
    NonFiniteVector { field: &'static str },

    #[error("no body registered for {0:?}")]
    UnknownBody(BodyHandle),

    #[error("collision between bodies {first} and {second} has no valid mass")]
    InvalidPair { first: usize, second: usize },
}

/// Reject NaN/inf and anything not strictly positive
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}
