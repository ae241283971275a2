//! # Export Mirror
//!
//! Human-readable JSON snapshot of the entire store.
//!
//! ## Snapshot Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Export Snapshot                                    │
//! │                                                                         │
//! │  Every mutation                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Read EVERY row of both tables (raw, not via Batch reassembly)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Serialize one pretty JSON document:                                   │
//! │    { "microgreen_batches": [...], "watering_events": [...] }           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Write <dest>.tmp  ──rename──►  <dest>                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Full overwrite, not incremental, not versioned: the snapshot is always a
//! complete point-in-time view. The temp-file-and-rename step means a
//! reader of the destination never observes a partially written document.
//! Timestamps are rendered as `YYYY-MM-DD HH:MM:SS` strings so the file
//! stays greppable by humans.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Timestamp rendering used in the snapshot. Readable, second precision.
const SNAPSHOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Flat Records
// =============================================================================

/// Raw batch row as read for export. Deliberately separate from
/// `sprout_core::Batch`: the mirror reflects storage, row by row.
#[derive(Debug, sqlx::FromRow)]
struct BatchRow {
    id: i64,
    batch_id: String,
    cultivar: String,
    seed_weight_grams: f64,
    plant_date: DateTime<Utc>,
    germinate_date: Option<DateTime<Utc>>,
    harvest_date: Option<DateTime<Utc>>,
    harvest_weight_grams: Option<f64>,
    status: String,
}

#[derive(Debug, sqlx::FromRow)]
struct WateringRow {
    id: i64,
    batch_id: String,
    water_date: DateTime<Utc>,
}

/// One flat field→value record in the `microgreen_batches` collection.
#[derive(Debug, Serialize)]
struct BatchRecord {
    id: i64,
    batch_id: String,
    cultivar: String,
    seed_weight_grams: f64,
    plant_date: String,
    germinate_date: Option<String>,
    harvest_date: Option<String>,
    harvest_weight_grams: Option<f64>,
    status: String,
}

#[derive(Debug, Serialize)]
struct WateringRecord {
    id: i64,
    batch_id: String,
    water_date: String,
}

/// The full snapshot document: two top-level ordered collections.
#[derive(Debug, Serialize)]
struct Snapshot {
    microgreen_batches: Vec<BatchRecord>,
    watering_events: Vec<WateringRecord>,
}

fn render_time(when: DateTime<Utc>) -> String {
    when.format(SNAPSHOT_TIME_FORMAT).to_string()
}

impl From<BatchRow> for BatchRecord {
    fn from(row: BatchRow) -> Self {
        BatchRecord {
            id: row.id,
            batch_id: row.batch_id,
            cultivar: row.cultivar,
            seed_weight_grams: row.seed_weight_grams,
            plant_date: render_time(row.plant_date),
            germinate_date: row.germinate_date.map(render_time),
            harvest_date: row.harvest_date.map(render_time),
            harvest_weight_grams: row.harvest_weight_grams,
            status: row.status,
        }
    }
}

impl From<WateringRow> for WateringRecord {
    fn from(row: WateringRow) -> Self {
        WateringRecord {
            id: row.id,
            batch_id: row.batch_id,
            water_date: render_time(row.water_date),
        }
    }
}

// =============================================================================
// Snapshot Exporter
// =============================================================================

/// Writes the export snapshot for the whole store.
///
/// ## Usage
/// ```rust,ignore
/// db.snapshots().write_to(Path::new("database_export.json")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotExporter {
    pool: SqlitePool,
}

impl SnapshotExporter {
    /// Creates a new SnapshotExporter.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotExporter { pool }
    }

    /// Reads both tables in full and rewrites the snapshot at `dest`.
    ///
    /// ## Atomicity
    /// The document is written to a sibling `.tmp` file and renamed into
    /// place, so `dest` always holds a complete, self-consistent snapshot.
    ///
    /// ## Errors
    /// `DbError::SnapshotFailed` when the destination cannot be written;
    /// query errors propagate as usual. The caller decides whether a
    /// failed mirror write invalidates the primary mutation (it does not).
    pub async fn write_to(&self, dest: &Path) -> DbResult<()> {
        let snapshot = self.read_snapshot().await?;

        debug!(
            batches = snapshot.microgreen_batches.len(),
            watering_events = snapshot.watering_events.len(),
            path = %dest.display(),
            "Writing export snapshot"
        );

        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| DbError::SnapshotFailed(e.to_string()))?;

        let tmp = dest.with_extension("tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| DbError::SnapshotFailed(e.to_string()))?;
        tokio::fs::rename(&tmp, dest)
            .await
            .map_err(|e| DbError::SnapshotFailed(e.to_string()))?;

        Ok(())
    }

    /// Reads every row of both tables, in insertion (rowid) order.
    async fn read_snapshot(&self) -> DbResult<Snapshot> {
        let batches = sqlx::query_as::<_, BatchRow>(
            "SELECT id, batch_id, cultivar, seed_weight_grams, plant_date,
                    germinate_date, harvest_date, harvest_weight_grams, status
             FROM microgreen_batches ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let events = sqlx::query_as::<_, WateringRow>(
            "SELECT id, batch_id, water_date FROM watering_events ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(Snapshot {
            microgreen_batches: batches.into_iter().map(BatchRecord::from).collect(),
            watering_events: events.into_iter().map(WateringRecord::from).collect(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
