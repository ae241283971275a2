//! # Error Types
//!
//! Domain-specific error types for sprout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sprout-core errors (this file)                                        │
//! │  ├── CoreError        - Lifecycle rule violations                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  sprout-db errors (separate crate)                                     │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  sprout-tracker errors (service crate)                                 │
//! │  └── TrackerError     - What callers see (wraps both)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → TrackerError → Caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (batch id, statuses, ...)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::BatchStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Lifecycle rule violations.
///
/// These are expected, recoverable-by-caller conditions surfaced as typed
/// results - never silent no-ops.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced batch id does not resolve to a stored batch.
    ///
    /// ## When This Occurs
    /// - Recording germination/watering/harvest against a typo'd id
    /// - The id was created against a different database file
    #[error("Batch not found: {0}")]
    BatchNotFound(String),

    /// A lifecycle transition was requested out of order.
    ///
    /// Transitions must follow `Planted → Germinated → Harvested` with the
    /// batch in the immediate predecessor state:
    ///
    /// ```text
    /// record_germination: requires Planted
    /// record_harvest:     requires Germinated
    /// ```
    #[error("Batch {batch_id} is {current:?}, cannot transition to {requested:?}")]
    InvalidTransition {
        batch_id: String,
        current: BatchStatus,
        requested: BatchStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any storage access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive (seed weight, harvest weight).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A date range query where start comes after end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
