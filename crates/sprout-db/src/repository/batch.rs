//! # Batch Repository
//!
//! Database operations for cultivation batches and their watering events.
//!
//! ## Composite Reads
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 How a Batch Is Reassembled                              │
//! │                                                                         │
//! │  query(&BatchFilter::ByStatus(Planted))                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... FROM microgreen_batches WHERE status = ?                   │
//! │       │                                                                 │
//! │       ▼  for each batch row                                            │
//! │  SELECT ... FROM watering_events WHERE batch_id = ?                    │
//! │           ORDER BY water_date ASC                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Batch { watering_events: [...] }  ← composite object                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The repository knows nothing about lifecycle order. It exposes dedicated
//! per-transition update methods that report rows affected; a zero-row
//! update is a silent no-op here and is promoted to an error by the
//! lifecycle service.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use sprout_core::{Batch, BatchStatus, WateringEvent, BATCH_ID_PREFIX};

/// Columns of the batches table, in the order the row mapping expects.
const BATCH_COLUMNS: &str = "batch_id, cultivar, seed_weight_grams, plant_date, \
     germinate_date, harvest_date, harvest_weight_grams, status";

// =============================================================================
// Batch Filter
// =============================================================================

/// A typed query filter over batch fields.
///
/// The repository stays generic: it renders whichever filter the service
/// hands it into a WHERE clause plus positional binds, instead of growing
/// one query method per user-facing filter.
#[derive(Debug, Clone)]
pub enum BatchFilter {
    /// Every batch in the store.
    All,
    /// Exactly the batch with this identifier (zero or one row).
    ById(String),
    /// Batches currently in the given lifecycle stage.
    ByStatus(BatchStatus),
    /// Batches of the given cultivar (exact match).
    ByCultivar(String),
    /// Batches planted within `[start, end]`, both ends inclusive.
    PlantedBetween {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl BatchFilter {
    /// WHERE clause fragment for this filter (empty for `All`).
    fn where_clause(&self) -> &'static str {
        match self {
            BatchFilter::All => "",
            BatchFilter::ById(_) => "WHERE batch_id = ?1",
            BatchFilter::ByStatus(_) => "WHERE status = ?1",
            BatchFilter::ByCultivar(_) => "WHERE cultivar = ?1",
            BatchFilter::PlantedBetween { .. } => "WHERE plant_date >= ?1 AND plant_date <= ?2",
        }
    }
}

// =============================================================================
// Batch Repository
// =============================================================================

/// Repository for batch database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BatchRepository::new(pool);
///
/// repo.insert(&batch).await?;
/// let planted = repo.query(&BatchFilter::ByStatus(BatchStatus::Planted)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BatchRepository {
    pool: SqlitePool,
}

impl BatchRepository {
    /// Creates a new BatchRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BatchRepository { pool }
    }

    /// Inserts a new batch row.
    ///
    /// All required fields must be populated; nullable fields may be None.
    /// There is no duplicate pre-check - the UNIQUE constraint on batch_id
    /// surfaces collisions as `DbError::UniqueViolation`.
    pub async fn insert(&self, batch: &Batch) -> DbResult<()> {
        debug!(batch_id = %batch.batch_id, cultivar = %batch.cultivar, "Inserting batch");

        sqlx::query(
            "INSERT INTO microgreen_batches (
                batch_id, cultivar, seed_weight_grams, plant_date,
                germinate_date, harvest_date, harvest_weight_grams, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(batch.batch_id.as_str())
        .bind(batch.cultivar.as_str())
        .bind(batch.seed_weight_grams)
        .bind(batch.plant_date)
        .bind(batch.germinate_date)
        .bind(batch.harvest_date)
        .bind(batch.harvest_weight_grams)
        .bind(batch.status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records germination on a batch row: sets the germinate date and
    /// moves the status forward.
    ///
    /// ## Returns
    /// Rows affected. Zero means no batch matched the id - a silent no-op
    /// at this layer; the caller decides whether that is an error.
    pub async fn mark_germinated(&self, batch_id: &str, when: DateTime<Utc>) -> DbResult<u64> {
        debug!(batch_id = %batch_id, "Marking batch germinated");

        let result = sqlx::query(
            "UPDATE microgreen_batches SET germinate_date = ?2, status = ?3 WHERE batch_id = ?1",
        )
        .bind(batch_id)
        .bind(when)
        .bind(BatchStatus::Germinated)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Records harvest on a batch row: sets harvest date and weight
    /// together and moves the status forward.
    ///
    /// ## Returns
    /// Rows affected, with the same zero-row semantics as
    /// [`mark_germinated`](Self::mark_germinated).
    pub async fn mark_harvested(
        &self,
        batch_id: &str,
        when: DateTime<Utc>,
        harvest_weight_grams: f64,
    ) -> DbResult<u64> {
        debug!(batch_id = %batch_id, weight = %harvest_weight_grams, "Marking batch harvested");

        let result = sqlx::query(
            "UPDATE microgreen_batches
             SET harvest_date = ?2, harvest_weight_grams = ?3, status = ?4
             WHERE batch_id = ?1",
        )
        .bind(batch_id)
        .bind(when)
        .bind(harvest_weight_grams)
        .bind(BatchStatus::Harvested)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Appends a watering event row.
    ///
    /// No existence check on the referenced batch_id: the store tolerates
    /// dangling events by design, existence is the service's concern.
    pub async fn insert_watering_event(&self, event: &WateringEvent) -> DbResult<()> {
        debug!(batch_id = %event.batch_id, "Inserting watering event");

        sqlx::query("INSERT INTO watering_events (batch_id, water_date) VALUES (?1, ?2)")
            .bind(event.batch_id.as_str())
            .bind(event.water_date)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Queries batches matching a filter, each reassembled with its full
    /// list of watering events.
    ///
    /// ## Returns
    /// An empty vec (never an error) when nothing matches. Batches come
    /// back ordered by plant date; events within each batch are sorted by
    /// `water_date` ascending regardless of insertion order.
    pub async fn query(&self, filter: &BatchFilter) -> DbResult<Vec<Batch>> {
        let sql = format!(
            "SELECT {BATCH_COLUMNS} FROM microgreen_batches {} ORDER BY plant_date, batch_id",
            filter.where_clause()
        );

        let query = sqlx::query_as::<_, Batch>(&sql);
        let query = match filter {
            BatchFilter::All => query,
            BatchFilter::ById(id) => query.bind(id.as_str()),
            BatchFilter::ByStatus(status) => query.bind(*status),
            BatchFilter::ByCultivar(cultivar) => query.bind(cultivar.as_str()),
            BatchFilter::PlantedBetween { start, end } => query.bind(*start).bind(*end),
        };

        let mut batches = query.fetch_all(&self.pool).await?;

        for batch in &mut batches {
            batch.watering_events = self.watering_events_for(&batch.batch_id).await?;
        }

        debug!(count = batches.len(), "Query returned batches");
        Ok(batches)
    }

    /// Gets the single batch with the given identifier.
    ///
    /// ## Returns
    /// * `Ok(Some(Batch))` - Batch found, events attached
    /// * `Ok(None)` - No such batch; a valid empty result, not an error
    pub async fn find_by_id(&self, batch_id: &str) -> DbResult<Option<Batch>> {
        let batches = self
            .query(&BatchFilter::ById(batch_id.to_string()))
            .await?;
        Ok(batches.into_iter().next())
    }

    /// Fetches the watering events for one batch, chronologically.
    async fn watering_events_for(&self, batch_id: &str) -> DbResult<Vec<WateringEvent>> {
        let events = sqlx::query_as::<_, WateringEvent>(
            "SELECT batch_id, water_date FROM watering_events
             WHERE batch_id = ?1 ORDER BY water_date ASC",
        )
        .bind(batch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Counts stored batches (for diagnostics and snapshot checks).
    pub async fn count_batches(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM microgreen_batches")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts stored watering events.
    pub async fn count_watering_events(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM watering_events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Id Generation
// =============================================================================

/// Generates a new batch identifier.
///
/// ## Format
/// `MG-<YYYYmmddHHMMSS>-<8 hex chars>`
///
/// The timestamp prefix keeps ids human-sortable by creation time. The
/// original scheme stopped there, which collides for two batches planted
/// within the same clock second; the random suffix closes that gap since
/// the schema enforces uniqueness.
///
/// ## Example
/// `MG-20260830143005-9f3a1c7e`
pub fn generate_batch_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}{}-{}",
        BATCH_ID_PREFIX,
        now.format("%Y%m%d%H%M%S"),
        &suffix[..8]
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::DbError;
    use chrono::Duration;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn pea_batch(id: &str, plant_date: DateTime<Utc>) -> Batch {
        Batch::planted(id.to_string(), "Pea".to_string(), 25.0, plant_date)
    }

    #[tokio::test]
    async fn test_insert_and_find_roundtrip() {
        let db = test_db().await;
        let repo = db.batches();

        let now = Utc::now();
        let batch = pea_batch("MG-1", now);
        repo.insert(&batch).await.unwrap();

        let found = repo.find_by_id("MG-1").await.unwrap().unwrap();
        assert_eq!(found.batch_id, "MG-1");
        assert_eq!(found.cultivar, "Pea");
        assert_eq!(found.seed_weight_grams, 25.0);
        assert_eq!(found.plant_date, now);
        assert_eq!(found.status, BatchStatus::Planted);
        assert!(found.germinate_date.is_none());
        assert!(found.watering_events.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let db = test_db().await;
        let found = db.batches().find_by_id("MG-nope").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_batch_id_rejected() {
        let db = test_db().await;
        let repo = db.batches();

        let batch = pea_batch("MG-dup", Utc::now());
        repo.insert(&batch).await.unwrap();

        let err = repo.insert(&batch).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_mark_germinated_reports_rows_affected() {
        let db = test_db().await;
        let repo = db.batches();

        repo.insert(&pea_batch("MG-g", Utc::now())).await.unwrap();

        let when = Utc::now();
        assert_eq!(repo.mark_germinated("MG-g", when).await.unwrap(), 1);
        // Unknown id: silent no-op at this layer
        assert_eq!(repo.mark_germinated("MG-nope", when).await.unwrap(), 0);

        let found = repo.find_by_id("MG-g").await.unwrap().unwrap();
        assert_eq!(found.status, BatchStatus::Germinated);
        assert_eq!(found.germinate_date, Some(when));
        assert!(found.harvest_date.is_none());
    }

    #[tokio::test]
    async fn test_mark_harvested_sets_date_and_weight_together() {
        let db = test_db().await;
        let repo = db.batches();

        repo.insert(&pea_batch("MG-h", Utc::now())).await.unwrap();
        repo.mark_germinated("MG-h", Utc::now()).await.unwrap();

        let when = Utc::now();
        assert_eq!(repo.mark_harvested("MG-h", when, 110.5).await.unwrap(), 1);

        let found = repo.find_by_id("MG-h").await.unwrap().unwrap();
        assert_eq!(found.status, BatchStatus::Harvested);
        assert_eq!(found.harvest_date, Some(when));
        assert_eq!(found.harvest_weight_grams, Some(110.5));
    }

    #[tokio::test]
    async fn test_watering_events_sorted_by_date_not_insertion() {
        let db = test_db().await;
        let repo = db.batches();

        repo.insert(&pea_batch("MG-w", Utc::now())).await.unwrap();

        let t1 = Utc::now();
        let t2 = t1 - Duration::hours(6); // earlier, inserted second
        for water_date in [t1, t2] {
            repo.insert_watering_event(&WateringEvent {
                batch_id: "MG-w".to_string(),
                water_date,
            })
            .await
            .unwrap();
        }

        let found = repo.find_by_id("MG-w").await.unwrap().unwrap();
        let dates: Vec<_> = found.watering_events.iter().map(|e| e.water_date).collect();
        assert_eq!(dates, vec![t2, t1]);
    }

    #[tokio::test]
    async fn test_watering_event_without_batch_is_tolerated() {
        let db = test_db().await;
        let repo = db.batches();

        // No orphan check on insert: the store accepts the row
        repo.insert_watering_event(&WateringEvent {
            batch_id: "MG-ghost".to_string(),
            water_date: Utc::now(),
        })
        .await
        .unwrap();

        assert_eq!(repo.count_watering_events().await.unwrap(), 1);
        assert_eq!(repo.count_batches().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_query_by_status_and_cultivar() {
        let db = test_db().await;
        let repo = db.batches();

        let now = Utc::now();
        repo.insert(&pea_batch("MG-a", now)).await.unwrap();
        repo.insert(&Batch::planted(
            "MG-b".to_string(),
            "Radish".to_string(),
            10.0,
            now,
        ))
        .await
        .unwrap();
        repo.mark_germinated("MG-b", now).await.unwrap();

        let planted = repo
            .query(&BatchFilter::ByStatus(BatchStatus::Planted))
            .await
            .unwrap();
        assert_eq!(planted.len(), 1);
        assert_eq!(planted[0].batch_id, "MG-a");

        let radishes = repo
            .query(&BatchFilter::ByCultivar("Radish".to_string()))
            .await
            .unwrap();
        assert_eq!(radishes.len(), 1);
        assert_eq!(radishes[0].batch_id, "MG-b");

        let none = repo
            .query(&BatchFilter::ByCultivar("Kale".to_string()))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_query_date_range_is_inclusive() {
        let db = test_db().await;
        let repo = db.batches();

        let base = Utc::now();
        let days: Vec<_> = (0..3).map(|d| base + Duration::days(d)).collect();
        for (i, day) in days.iter().enumerate() {
            repo.insert(&pea_batch(&format!("MG-{i}"), *day))
                .await
                .unwrap();
        }

        // [day0, day1] inclusive on both ends
        let hits = repo
            .query(&BatchFilter::PlantedBetween {
                start: days[0],
                end: days[1],
            })
            .await
            .unwrap();
        let ids: Vec<_> = hits.iter().map(|b| b.batch_id.as_str()).collect();
        assert_eq!(ids, vec!["MG-0", "MG-1"]);
    }

    #[test]
    fn test_generate_batch_id_format_and_sortability() {
        let earlier = Utc::now();
        let later = earlier + Duration::seconds(2);

        let id_a = generate_batch_id(earlier);
        let id_b = generate_batch_id(later);

        assert!(id_a.starts_with("MG-"));
        // "MG-" + 14 digit timestamp + "-" + 8 hex chars
        assert_eq!(id_a.len(), 3 + 14 + 1 + 8);
        assert!(id_a < id_b);

        // Same instant: prefixes match, suffixes keep ids distinct
        assert_ne!(generate_batch_id(earlier), generate_batch_id(earlier));
    }
}
