//! Engine error taxonomy
//!
//! None of these end a session. `InvalidGeometry` marks an internal bug or a
//! bad settings file; the other two are refused commands and stale lookups
//! that callers log and drop.

use crate::sim::EntityId;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// An entity or field was built with negative or degenerate geometry
    #[error("invalid geometry: {what} = {value}")]
    InvalidGeometry { what: &'static str, value: f64 },

    /// Fire requested while a projectile is live or no shots remain
    #[error("illegal fire attempt: {reason}")]
    IllegalFireAttempt { reason: &'static str },

    /// A settings value outside the range the session can play with
    #[error("invalid setting: {what} = {value}")]
    InvalidSetting { what: &'static str, value: i64 },

    /// Lookup of a target that is no longer live
    #[error("missing entity: {id}")]
    MissingEntity { id: EntityId },
}

impl SimError {
    /// Check a length/radius is finite and non-negative
    pub(crate) fn check_non_negative(what: &'static str, value: f64) -> Result<f64, SimError> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(SimError::InvalidGeometry { what, value })
        }
    }

    /// Check a radius/speed is finite and strictly positive
    pub(crate) fn check_positive(what: &'static str, value: f64) -> Result<f64, SimError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(SimError::InvalidGeometry { what, value })
        }
    }
}
