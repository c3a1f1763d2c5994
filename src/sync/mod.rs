//! Incremental synchronization.
//!
//! Provides:
//! - Planning of what to download per entry
//! - The per-location sync loop
//! - Pass monitoring and statistics

pub mod monitor;
pub mod planner;
pub mod runner;
pub mod stats;

pub use monitor::PassMonitor;
pub use planner::{plan, Addressing, SkipReason, SyncPlan};
pub use runner::{sync_location, RunContext};
pub use stats::{RunStats, SyncStats};
