//! # sprout-tracker: Lifecycle Service for Sprout
//!
//! The caller-facing operations of the batch tracker: plant, record
//! germination, record watering, record harvest, and the query variants.
//! The interactive menu loop that drives these operations lives outside
//! this workspace; it calls in with already-parsed arguments and handles
//! all presentation itself.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprout_db::{Database, DbConfig};
//! use sprout_tracker::Tracker;
//!
//! // Explicit startup: pool + schema, fatal on failure
//! let db = Database::new(DbConfig::new("sprout.db")).await?;
//! let tracker = Tracker::new(db, "database_export.json");
//!
//! let batch = tracker.plant("Pea", 25.0).await?;
//! tracker.record_watering(&batch.batch_id, Utc::now()).await?;
//! ```
//!
//! ## Modules
//!
//! - [`service`] - The Tracker and its operations
//! - [`error`] - Unified service error type

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{TrackerError, TrackerResult};
pub use service::Tracker;
