//! # Domain Types
//!
//! Core domain types for the Sprout batch tracker.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │        Batch         │        │    WateringEvent     │              │
//! │  │  ──────────────────  │ 1    n │  ──────────────────  │              │
//! │  │  batch_id (MG-...)   │◄───────│  batch_id (FK-ish)   │              │
//! │  │  cultivar            │        │  water_date          │              │
//! │  │  seed_weight_grams   │        └──────────────────────┘              │
//! │  │  status              │                                              │
//! │  │  plant/germ/harvest  │        ┌──────────────────────┐              │
//! │  │  dates + weight      │        │     BatchStatus      │              │
//! │  └──────────────────────┘        │  ──────────────────  │              │
//! │                                  │  Planted             │              │
//! │                                  │  Germinated          │              │
//! │                                  │  Harvested           │              │
//! │                                  └──────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle Invariant
//! A batch's `status` is always consistent with its populated date fields:
//! - `Planted`    ⇒ germinate_date and harvest_date both None
//! - `Germinated` ⇒ germinate_date set, harvest_date None
//! - `Harvested`  ⇒ all date/weight fields set
//!
//! The lifecycle service is solely responsible for maintaining this; the
//! store performs no cross-field validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Batch Status
// =============================================================================

/// The lifecycle stage of a cultivation batch.
///
/// Transitions are strictly forward: `Planted → Germinated → Harvested`.
/// Skipping a stage is a domain error (`CoreError::InvalidTransition`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Seeds are in the tray, nothing has sprouted yet.
    Planted,
    /// Germination has been recorded.
    Germinated,
    /// The batch has been cut and weighed. Terminal state.
    Harvested,
}

impl BatchStatus {
    /// Returns the next stage in the lifecycle, or `None` for the
    /// terminal `Harvested` state.
    pub const fn successor(self) -> Option<BatchStatus> {
        match self {
            BatchStatus::Planted => Some(BatchStatus::Germinated),
            BatchStatus::Germinated => Some(BatchStatus::Harvested),
            BatchStatus::Harvested => None,
        }
    }

    /// Checks whether `next` is the immediate successor of this status.
    pub fn allows_transition_to(self, next: BatchStatus) -> bool {
        self.successor() == Some(next)
    }
}

// =============================================================================
// Watering Event
// =============================================================================

/// A single timestamped watering applied to a batch.
///
/// Created once via the "record watering" operation and never mutated or
/// deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct WateringEvent {
    /// Identifier of the batch this event belongs to.
    pub batch_id: String,

    /// When the watering happened.
    pub water_date: DateTime<Utc>,
}

// =============================================================================
// Batch
// =============================================================================

/// One cultivation run of a microgreen cultivar, from planting to harvest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Batch {
    /// Unique identifier, generated at creation, immutable.
    ///
    /// Format: `MG-<YYYYmmddHHMMSS>-<suffix>`. The timestamp prefix keeps
    /// ids human-sortable; the random suffix carries the uniqueness
    /// guarantee.
    pub batch_id: String,

    /// Cultivar name ("Pea", "Radish", ...). Free text, never empty.
    pub cultivar: String,

    /// Seed weight in grams. Positive, set once at creation.
    pub seed_weight_grams: f64,

    /// When the seeds were planted. Set once at creation, never null.
    pub plant_date: DateTime<Utc>,

    /// None until germination is recorded; once set, never cleared.
    pub germinate_date: Option<DateTime<Utc>>,

    /// Set together with `harvest_weight_grams` at harvest; never cleared.
    pub harvest_date: Option<DateTime<Utc>>,

    /// Harvested yield in grams.
    pub harvest_weight_grams: Option<f64>,

    /// Current lifecycle stage.
    pub status: BatchStatus,

    /// Watering events for this batch, sorted by `water_date` ascending.
    ///
    /// Populated on read by a join-style secondary lookup; not part of the
    /// batch's own storage row.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub watering_events: Vec<WateringEvent>,
}

impl Batch {
    /// Creates a freshly planted batch with all later-stage fields unset.
    pub fn planted(
        batch_id: String,
        cultivar: String,
        seed_weight_grams: f64,
        plant_date: DateTime<Utc>,
    ) -> Self {
        Batch {
            batch_id,
            cultivar,
            seed_weight_grams,
            plant_date,
            germinate_date: None,
            harvest_date: None,
            harvest_weight_grams: None,
            status: BatchStatus::Planted,
            watering_events: Vec::new(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_successor_chain() {
        assert_eq!(
            BatchStatus::Planted.successor(),
            Some(BatchStatus::Germinated)
        );
        assert_eq!(
            BatchStatus::Germinated.successor(),
            Some(BatchStatus::Harvested)
        );
        assert_eq!(BatchStatus::Harvested.successor(), None);
    }

    #[test]
    fn test_allows_transition_to() {
        assert!(BatchStatus::Planted.allows_transition_to(BatchStatus::Germinated));
        assert!(BatchStatus::Germinated.allows_transition_to(BatchStatus::Harvested));

        // No skips, no going back, no self-loops
        assert!(!BatchStatus::Planted.allows_transition_to(BatchStatus::Harvested));
        assert!(!BatchStatus::Germinated.allows_transition_to(BatchStatus::Planted));
        assert!(!BatchStatus::Harvested.allows_transition_to(BatchStatus::Harvested));
    }

    #[test]
    fn test_planted_constructor() {
        let now = Utc::now();
        let batch = Batch::planted("MG-1".to_string(), "Pea".to_string(), 25.0, now);

        assert_eq!(batch.status, BatchStatus::Planted);
        assert_eq!(batch.plant_date, now);
        assert!(batch.germinate_date.is_none());
        assert!(batch.harvest_date.is_none());
        assert!(batch.harvest_weight_grams.is_none());
        assert!(batch.watering_events.is_empty());
    }
}
