//! Persisted sync progress.
//!
//! This module provides:
//! - The per-URL sync record and its on-disk shape
//! - The per-location JSON store
//! - Reconciliation of download results into records

pub mod reconcile;
pub mod record;
pub mod store;

pub use reconcile::{reconcile, scan_floor};
pub use record::{Progress, SyncRecord, SCAN_DATE_FORMAT};
pub use store::ProgressStore;
