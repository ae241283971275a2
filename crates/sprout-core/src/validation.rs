//! # Validation Module
//!
//! Input validation for the lifecycle service boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (CLI prompt loop, out of scope here)                  │
//! │  ├── Parses raw text into typed arguments                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Lifecycle service (Rust)                                     │
//! │  └── THIS MODULE: domain rule validation                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE constraint on batch_id                                     │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The entity types themselves carry no validation; positivity and
//! non-emptiness are checked here, at the service boundary, before any
//! storage access happens.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a cultivar name.
///
/// ## Rules
/// - Must not be empty (after trimming)
///
/// ## Example
/// ```rust
/// use sprout_core::validation::validate_cultivar;
///
/// assert!(validate_cultivar("Radish").is_ok());
/// assert!(validate_cultivar("").is_err());
/// assert!(validate_cultivar("   ").is_err());
/// ```
pub fn validate_cultivar(cultivar: &str) -> ValidationResult<()> {
    if cultivar.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "cultivar".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a seed weight in grams.
///
/// ## Rules
/// - Must be strictly positive (> 0); zero-gram plantings are rejected
pub fn validate_seed_weight(grams: f64) -> ValidationResult<()> {
    if grams <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "seed weight".to_string(),
        });
    }

    Ok(())
}

/// Validates a harvest weight in grams.
///
/// Same rule as seed weight, separate function so the error names the
/// field the caller actually supplied.
pub fn validate_harvest_weight(grams: f64) -> ValidationResult<()> {
    if grams <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "harvest weight".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Range Validators
// =============================================================================

/// Validates a plant-date query range.
///
/// ## Rules
/// - `start` must not come after `end`
/// - `start == end` is a valid single-instant range (inclusive bounds)
pub fn validate_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> ValidationResult<()> {
    if start > end {
        return Err(ValidationError::InvalidDateRange { start, end });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_cultivar() {
        assert!(validate_cultivar("Pea").is_ok());
        assert!(validate_cultivar("Sunflower Black Oil").is_ok());

        assert!(validate_cultivar("").is_err());
        assert!(validate_cultivar("   ").is_err());
    }

    #[test]
    fn test_validate_seed_weight() {
        assert!(validate_seed_weight(25.0).is_ok());
        assert!(validate_seed_weight(0.1).is_ok());

        assert!(validate_seed_weight(0.0).is_err());
        assert!(validate_seed_weight(-1.0).is_err());
    }

    #[test]
    fn test_validate_harvest_weight() {
        assert!(validate_harvest_weight(110.5).is_ok());
        assert!(validate_harvest_weight(0.0).is_err());
        assert!(validate_harvest_weight(-5.0).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let start = Utc::now();
        let end = start + Duration::days(7);

        assert!(validate_date_range(start, end).is_ok());
        assert!(validate_date_range(start, start).is_ok());
        assert!(validate_date_range(end, start).is_err());
    }
}
