//! # sprout-db: Storage Layer for Sprout
//!
//! This crate provides database access for the Sprout batch tracker.
//! It uses SQLite for local storage with sqlx for async operations, and
//! owns the human-readable JSON export mirror.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sprout Data Flow                                 │
//! │                                                                         │
//! │  Lifecycle Service (record_watering, ...)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     sprout-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌────────────────┐   │   │
//! │  │   │   Database    │   │  Repository   │   │ Export Mirror  │   │   │
//! │  │   │   (pool.rs)   │   │  (batch.rs)   │   │  (export.rs)   │   │   │
//! │  │   │               │   │               │   │                │   │   │
//! │  │   │ SqlitePool    │◄──│ BatchRepo     │   │ JSON snapshot  │   │   │
//! │  │   │ Migrations    │   │ BatchFilter   │   │ temp + rename  │   │   │
//! │  │   └───────────────┘   └───────────────┘   └────────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                          │                      │
//! │       ▼                                          ▼                      │
//! │  sprout.db (SQLite)                    database_export.json             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Batch repository (store CRUD and queries)
//! - [`export`] - Export snapshot writer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprout_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let db = Database::new(DbConfig::new("path/to/sprout.db")).await?;
//!
//! // Use the repository and the exporter
//! let batches = db.batches().query(&BatchFilter::All).await?;
//! db.snapshots().write_to(Path::new("database_export.json")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use export::SnapshotExporter;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::batch::{generate_batch_id, BatchFilter, BatchRepository};
