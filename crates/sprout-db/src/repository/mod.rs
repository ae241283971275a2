//! # Repository Module
//!
//! Database repository implementations for Sprout.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Lifecycle Service                                                     │
//! │       │                                                                 │
//! │       │  db.batches().query(&BatchFilter::ByStatus(status))            │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  BatchRepository                                                       │
//! │  ├── insert(&self, batch)                                              │
//! │  ├── mark_germinated(&self, id, when)                                  │
//! │  ├── mark_harvested(&self, id, when, weight)                           │
//! │  ├── insert_watering_event(&self, event)                               │
//! │  └── query(&self, filter)                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • The store stays free of lifecycle knowledge                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod batch;
