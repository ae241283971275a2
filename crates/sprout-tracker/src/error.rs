//! # Service Error Type
//!
//! Unified error type for lifecycle service operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Sprout                                 │
//! │                                                                         │
//! │  Caller (CLI)                Tracker operation                          │
//! │  ────────────                ─────────────────                          │
//! │                                                                         │
//! │  tracker.record_harvest(...)                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Result<Batch, TrackerError>                                     │  │
//! │  │                                                                  │  │
//! │  │  Validation failed?  ── CoreError::Validation ──┐                │  │
//! │  │  Unknown batch id?   ── CoreError::BatchNotFound│               │  │
//! │  │  Out of order?       ── CoreError::InvalidTransition ► Core(..)  │  │
//! │  │  Storage broke?      ── DbError ───────────────────── ► Storage  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Validation / NotFound / InvalidTransition are expected, recoverable   │
//! │  conditions; Storage errors are not retried.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use sprout_core::{CoreError, ValidationError};
use sprout_db::DbError;

/// Error returned by lifecycle service operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Lifecycle rule violation or invalid input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying storage failure.
    #[error(transparent)]
    Storage(#[from] DbError),
}

/// ValidationError reaches the service through CoreError.
impl From<ValidationError> for TrackerError {
    fn from(err: ValidationError) -> Self {
        TrackerError::Core(CoreError::Validation(err))
    }
}

impl TrackerError {
    /// True for bad-input failures (empty cultivar, non-positive weight,
    /// inverted date range).
    pub fn is_validation(&self) -> bool {
        matches!(self, TrackerError::Core(CoreError::Validation(_)))
    }

    /// True when the referenced batch id did not resolve.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackerError::Core(CoreError::BatchNotFound(_)))
    }

    /// True when a lifecycle transition was requested out of order.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, TrackerError::Core(CoreError::InvalidTransition { .. }))
    }
}

/// Result type for lifecycle service operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates_match_variants() {
        let err: TrackerError = ValidationError::Required {
            field: "cultivar".to_string(),
        }
        .into();
        assert!(err.is_validation());
        assert!(!err.is_not_found());

        let err: TrackerError = CoreError::BatchNotFound("MG-1".to_string()).into();
        assert!(err.is_not_found());
        assert!(!err.is_invalid_transition());

        let err: TrackerError = DbError::PoolExhausted.into();
        assert!(!err.is_validation());
        assert!(!err.is_not_found());
    }
}
