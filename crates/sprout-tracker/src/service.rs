//! # Lifecycle Service
//!
//! The caller-facing operations over batches and watering events.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Mutating Operation                             │
//! │                                                                         │
//! │  1. Validate intent (core rules, no I/O)                               │
//! │  2. Resolve + check lifecycle order (NotFound / InvalidTransition)     │
//! │  3. Mutate the store                                                   │
//! │  4. Refresh the export snapshot                                        │
//! │       └── on failure: warn and keep going - the primary data is        │
//! │           authoritative, the mirror is merely stale                    │
//! │  5. Return the updated batch                                           │
//! │                                                                         │
//! │  Steps 1-2 failing means NO storage write and NO snapshot refresh.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-writer, synchronous-in-effect: each operation runs to completion
//! before the next begins. If this service is ever shared across tasks,
//! each mutation plus its snapshot refresh must become one critical
//! section so the mirror never lags the last acknowledged write.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

use sprout_core::validation::{
    validate_cultivar, validate_date_range, validate_harvest_weight, validate_seed_weight,
};
use sprout_core::{Batch, BatchStatus, CoreError, WateringEvent};
use sprout_db::{generate_batch_id, BatchFilter, Database};

use crate::error::TrackerResult;

// =============================================================================
// Tracker
// =============================================================================

/// The lifecycle service: owns the database handle and the snapshot
/// destination, both fixed at startup.
#[derive(Debug, Clone)]
pub struct Tracker {
    db: Database,
    snapshot_path: PathBuf,
}

impl Tracker {
    /// Creates a tracker over an already-initialized database.
    ///
    /// Initialization (pool creation, schema migration) happens in
    /// [`Database::new`] and is the caller's explicit startup step; a
    /// failure there is fatal and never reaches this constructor.
    pub fn new(db: Database, snapshot_path: impl Into<PathBuf>) -> Self {
        Tracker {
            db,
            snapshot_path: snapshot_path.into(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Plants a new batch.
    ///
    /// Generates the batch id, persists a `Planted` batch with both
    /// later-stage date fields unset, and refreshes the snapshot.
    ///
    /// ## Errors
    /// `ValidationError` if the cultivar is empty or the seed weight is
    /// not positive.
    pub async fn plant(&self, cultivar: &str, seed_weight_grams: f64) -> TrackerResult<Batch> {
        validate_cultivar(cultivar)?;
        validate_seed_weight(seed_weight_grams)?;

        let now = Utc::now();
        let batch = Batch::planted(
            generate_batch_id(now),
            cultivar.trim().to_string(),
            seed_weight_grams,
            now,
        );

        self.db.batches().insert(&batch).await?;
        info!(batch_id = %batch.batch_id, cultivar = %batch.cultivar, "Planted batch");

        self.refresh_snapshot().await;
        Ok(batch)
    }

    /// Records germination for a batch.
    ///
    /// ## Errors
    /// - `NotFound` if the id does not resolve
    /// - `InvalidTransition` unless the batch is currently `Planted`
    pub async fn record_germination(
        &self,
        batch_id: &str,
        when: DateTime<Utc>,
    ) -> TrackerResult<Batch> {
        let mut batch = self.require_batch(batch_id).await?;
        self.require_transition(&batch, BatchStatus::Germinated)?;

        let affected = self.db.batches().mark_germinated(batch_id, when).await?;
        if affected == 0 {
            // The store treats a missing id as a zero-row no-op; promote it.
            return Err(CoreError::BatchNotFound(batch_id.to_string()).into());
        }
        info!(batch_id = %batch_id, "Recorded germination");

        self.refresh_snapshot().await;

        batch.germinate_date = Some(when);
        batch.status = BatchStatus::Germinated;
        Ok(batch)
    }

    /// Records a watering event for a batch.
    ///
    /// Does not change any batch fields; appends one child event. Allowed
    /// at any lifecycle stage.
    ///
    /// ## Errors
    /// `NotFound` if the id does not resolve.
    pub async fn record_watering(
        &self,
        batch_id: &str,
        when: DateTime<Utc>,
    ) -> TrackerResult<Batch> {
        self.require_batch(batch_id).await?;

        self.db
            .batches()
            .insert_watering_event(&WateringEvent {
                batch_id: batch_id.to_string(),
                water_date: when,
            })
            .await?;
        info!(batch_id = %batch_id, "Recorded watering");

        self.refresh_snapshot().await;

        // Re-read so the returned batch carries its events chronologically
        self.require_batch(batch_id).await
    }

    /// Records harvest for a batch: date, weight and status move together.
    ///
    /// ## Errors
    /// - `ValidationError` if the weight is not positive
    /// - `NotFound` if the id does not resolve
    /// - `InvalidTransition` unless the batch is currently `Germinated`
    pub async fn record_harvest(
        &self,
        batch_id: &str,
        when: DateTime<Utc>,
        harvest_weight_grams: f64,
    ) -> TrackerResult<Batch> {
        validate_harvest_weight(harvest_weight_grams)?;

        let mut batch = self.require_batch(batch_id).await?;
        self.require_transition(&batch, BatchStatus::Harvested)?;

        let affected = self
            .db
            .batches()
            .mark_harvested(batch_id, when, harvest_weight_grams)
            .await?;
        if affected == 0 {
            return Err(CoreError::BatchNotFound(batch_id.to_string()).into());
        }
        info!(batch_id = %batch_id, weight = %harvest_weight_grams, "Recorded harvest");

        self.refresh_snapshot().await;

        batch.harvest_date = Some(when);
        batch.harvest_weight_grams = Some(harvest_weight_grams);
        batch.status = BatchStatus::Harvested;
        Ok(batch)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All batches currently in the given lifecycle stage.
    pub async fn query_by_status(&self, status: BatchStatus) -> TrackerResult<Vec<Batch>> {
        Ok(self.db.batches().query(&BatchFilter::ByStatus(status)).await?)
    }

    /// All batches of the given cultivar.
    pub async fn query_by_cultivar(&self, cultivar: &str) -> TrackerResult<Vec<Batch>> {
        Ok(self
            .db
            .batches()
            .query(&BatchFilter::ByCultivar(cultivar.to_string()))
            .await?)
    }

    /// All batches planted within `[start, end]`, inclusive on both ends.
    ///
    /// ## Errors
    /// `ValidationError` when `start > end`.
    pub async fn query_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TrackerResult<Vec<Batch>> {
        validate_date_range(start, end)?;
        Ok(self
            .db
            .batches()
            .query(&BatchFilter::PlantedBetween { start, end })
            .await?)
    }

    /// The batch with the given id, or `None` - absence is a valid empty
    /// result for a query, unlike for the mutating operations.
    pub async fn query_by_id(&self, batch_id: &str) -> TrackerResult<Option<Batch>> {
        Ok(self.db.batches().find_by_id(batch_id).await?)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Resolves a batch id or fails with `NotFound`.
    async fn require_batch(&self, batch_id: &str) -> TrackerResult<Batch> {
        self.db
            .batches()
            .find_by_id(batch_id)
            .await?
            .ok_or_else(|| CoreError::BatchNotFound(batch_id.to_string()).into())
    }

    /// Enforces the strict lifecycle order: the batch must currently be in
    /// the immediate predecessor of `requested`.
    fn require_transition(&self, batch: &Batch, requested: BatchStatus) -> TrackerResult<()> {
        if !batch.status.allows_transition_to(requested) {
            return Err(CoreError::InvalidTransition {
                batch_id: batch.batch_id.clone(),
                current: batch.status,
                requested,
            }
            .into());
        }
        Ok(())
    }

    /// Rewrites the export snapshot after a successful mutation.
    ///
    /// A failed mirror write does not roll back or fail the operation:
    /// the store remains authoritative and the stale snapshot is reported
    /// as a warning.
    async fn refresh_snapshot(&self) {
        if let Err(err) = self.db.snapshots().write_to(&self.snapshot_path).await {
            warn!(
                error = %err,
                path = %self.snapshot_path.display(),
                "Export snapshot refresh failed; stored data remains authoritative"
            );
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sprout_db::DbConfig;
    use tempfile::TempDir;

    async fn test_tracker() -> (Tracker, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tracker = Tracker::new(db, dir.path().join("database_export.json"));
        (tracker, dir)
    }

    fn snapshot_doc(dir: &TempDir) -> serde_json::Value {
        let raw = std::fs::read_to_string(dir.path().join("database_export.json")).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_plant_returns_planted_batch() {
        let (tracker, _dir) = test_tracker().await;

        let batch = tracker.plant("Pea", 25.0).await.unwrap();

        assert_eq!(batch.status, BatchStatus::Planted);
        assert_eq!(batch.cultivar, "Pea");
        assert_eq!(batch.seed_weight_grams, 25.0);
        assert!(batch.germinate_date.is_none());
        assert!(batch.harvest_date.is_none());
        assert!(batch.harvest_weight_grams.is_none());
        assert!(batch.batch_id.starts_with("MG-"));
    }

    #[tokio::test]
    async fn test_plant_rejects_bad_input() {
        let (tracker, _dir) = test_tracker().await;

        assert!(tracker.plant("Radish", 0.0).await.unwrap_err().is_validation());
        assert!(tracker.plant("Radish", -1.0).await.unwrap_err().is_validation());
        assert!(tracker.plant("", 5.0).await.unwrap_err().is_validation());

        // Nothing was written, nothing was exported
        assert!(tracker.query_by_status(BatchStatus::Planted).await.unwrap().is_empty());
        assert!(!tracker.snapshot_path.exists());
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let (tracker, _dir) = test_tracker().await;

        let batch = tracker.plant("Sunflower", 40.0).await.unwrap();
        let id = batch.batch_id.clone();

        let germ_at = Utc::now();
        let batch = tracker.record_germination(&id, germ_at).await.unwrap();
        assert_eq!(batch.status, BatchStatus::Germinated);
        assert_eq!(batch.germinate_date, Some(germ_at));
        assert!(batch.harvest_date.is_none());

        let harvest_at = Utc::now();
        let batch = tracker.record_harvest(&id, harvest_at, 130.0).await.unwrap();
        assert_eq!(batch.status, BatchStatus::Harvested);
        assert_eq!(batch.germinate_date, Some(germ_at));
        assert_eq!(batch.harvest_date, Some(harvest_at));
        assert_eq!(batch.harvest_weight_grams, Some(130.0));

        // Stored state matches what the service returned
        let stored = tracker.query_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status, BatchStatus::Harvested);
        assert_eq!(stored.harvest_weight_grams, Some(130.0));
    }

    #[tokio::test]
    async fn test_unknown_batch_is_not_found_with_no_side_effects() {
        let (tracker, _dir) = test_tracker().await;
        let when = Utc::now();

        assert!(tracker
            .record_germination("MG-missing", when)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(tracker
            .record_watering("MG-missing", when)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(tracker
            .record_harvest("MG-missing", when, 10.0)
            .await
            .unwrap_err()
            .is_not_found());

        // No storage mutation and no export trigger
        assert!(tracker.query_by_status(BatchStatus::Planted).await.unwrap().is_empty());
        assert!(!tracker.snapshot_path.exists());
    }

    #[tokio::test]
    async fn test_transitions_cannot_skip_or_repeat() {
        let (tracker, _dir) = test_tracker().await;

        let batch = tracker.plant("Pea", 25.0).await.unwrap();
        let id = batch.batch_id.clone();
        let when = Utc::now();

        // Planted → Harvested skips germination
        assert!(tracker
            .record_harvest(&id, when, 50.0)
            .await
            .unwrap_err()
            .is_invalid_transition());

        tracker.record_germination(&id, when).await.unwrap();

        // Germinated twice
        assert!(tracker
            .record_germination(&id, when)
            .await
            .unwrap_err()
            .is_invalid_transition());

        tracker.record_harvest(&id, when, 50.0).await.unwrap();

        // Harvested is terminal
        assert!(tracker
            .record_germination(&id, when)
            .await
            .unwrap_err()
            .is_invalid_transition());
        assert!(tracker
            .record_harvest(&id, when, 50.0)
            .await
            .unwrap_err()
            .is_invalid_transition());
    }

    #[tokio::test]
    async fn test_harvest_weight_must_be_positive() {
        let (tracker, _dir) = test_tracker().await;

        let batch = tracker.plant("Pea", 25.0).await.unwrap();
        tracker
            .record_germination(&batch.batch_id, Utc::now())
            .await
            .unwrap();

        let err = tracker
            .record_harvest(&batch.batch_id, Utc::now(), 0.0)
            .await
            .unwrap_err();
        assert!(err.is_validation());

        // Batch untouched by the rejected harvest
        let stored = tracker.query_by_id(&batch.batch_id).await.unwrap().unwrap();
        assert_eq!(stored.status, BatchStatus::Germinated);
    }

    #[tokio::test]
    async fn test_watering_events_come_back_chronological() {
        let (tracker, _dir) = test_tracker().await;

        let batch = tracker.plant("Pea", 25.0).await.unwrap();
        let id = batch.batch_id.clone();

        let t1 = Utc::now();
        let t2 = t1 - Duration::hours(12); // earlier, recorded second

        tracker.record_watering(&id, t1).await.unwrap();
        let batch = tracker.record_watering(&id, t2).await.unwrap();

        let dates: Vec<_> = batch.watering_events.iter().map(|e| e.water_date).collect();
        assert_eq!(dates, vec![t2, t1]);
    }

    #[tokio::test]
    async fn test_snapshot_tracks_every_mutation() {
        let (tracker, dir) = test_tracker().await;

        let a = tracker.plant("Pea", 25.0).await.unwrap();
        let _b = tracker.plant("Radish", 10.0).await.unwrap();
        tracker.record_watering(&a.batch_id, Utc::now()).await.unwrap();
        tracker
            .record_germination(&a.batch_id, Utc::now())
            .await
            .unwrap();

        let doc = snapshot_doc(&dir);
        assert_eq!(doc["microgreen_batches"].as_array().unwrap().len(), 2);
        assert_eq!(doc["watering_events"].as_array().unwrap().len(), 1);

        // One more mutation, mirror follows
        tracker.record_watering(&a.batch_id, Utc::now()).await.unwrap();
        let doc = snapshot_doc(&dir);
        assert_eq!(doc["watering_events"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_query_by_date_range() {
        let (tracker, _dir) = test_tracker().await;

        let before = Utc::now() - Duration::seconds(1);
        let batch = tracker.plant("Pea", 25.0).await.unwrap();
        let after = Utc::now() + Duration::seconds(1);

        let hits = tracker.query_by_date_range(before, after).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].batch_id, batch.batch_id);

        // Inclusive at the exact plant instant
        let exact = tracker
            .query_by_date_range(batch.plant_date, batch.plant_date)
            .await
            .unwrap();
        assert_eq!(exact.len(), 1);

        let miss = tracker
            .query_by_date_range(after, after + Duration::seconds(1))
            .await
            .unwrap();
        assert!(miss.is_empty());

        // Inverted range is rejected before touching the store
        assert!(tracker
            .query_by_date_range(after, before)
            .await
            .unwrap_err()
            .is_validation());
    }

    #[tokio::test]
    async fn test_query_by_id_absence_is_none() {
        let (tracker, _dir) = test_tracker().await;

        assert!(tracker.query_by_id("MG-missing").await.unwrap().is_none());

        let batch = tracker.plant("Pea", 25.0).await.unwrap();
        assert!(tracker.query_by_id(&batch.batch_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_snapshot_does_not_fail_the_mutation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tracker = Tracker::new(db, "/nonexistent-dir/export.json");

        // Mutation succeeds; the stale mirror is only warned about
        let batch = tracker.plant("Pea", 25.0).await.unwrap();
        let stored = tracker.query_by_id(&batch.batch_id).await.unwrap();
        assert!(stored.is_some());
    }
}
