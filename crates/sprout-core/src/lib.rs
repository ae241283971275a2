//! # sprout-core: Pure Domain Logic for Sprout
//!
//! This crate is the heart of the Sprout batch tracker. It contains the
//! entity model, the lifecycle state machine, and input validation as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sprout Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (interactive CLI, external)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                sprout-tracker (Lifecycle Service)               │   │
//! │  │    plant, record_germination, record_watering, record_harvest  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sprout-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌───────────┐      ┌───────────┐          │   │
//! │  │   │   types   │      │validation │      │   error   │          │   │
//! │  │   │   Batch   │      │   rules   │      │ taxonomy  │          │   │
//! │  │   │  Watering │      │  checks   │      │           │          │   │
//! │  │   └───────────┘      └───────────┘      └───────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sprout-db (Storage Layer)                    │   │
//! │  │         SQLite queries, migrations, export snapshot             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Batch, WateringEvent, BatchStatus)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sprout_core::Batch` instead of
// `use sprout_core::types::Batch`

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::{Batch, BatchStatus, WateringEvent};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix for generated batch identifiers.
///
/// Full format is `MG-<YYYYmmddHHMMSS>-<suffix>`: the timestamp keeps ids
/// human-sortable by creation time, the random suffix makes them unique
/// even when two batches are planted within the same clock second.
pub const BATCH_ID_PREFIX: &str = "MG-";
