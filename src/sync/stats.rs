//! Per-location and per-run sync statistics.

use std::path::PathBuf;

/// Statistics for one watched location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub root: PathBuf,
    /// Entries that went through a download.
    pub entries_processed: u64,
    /// Entries with nothing new to download.
    pub entries_skipped: u64,
    /// Entries that could not be resolved or downloaded.
    pub entries_failed: u64,
    /// Items newly reported as complete by a primary pass.
    pub items_downloaded: u64,
    pub groups_repaired: u64,
}

impl SyncStats {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }
}

/// Statistics across all locations of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub locations_processed: u64,
    pub locations_failed: u64,
    pub entries_processed: u64,
    pub entries_skipped: u64,
    pub entries_failed: u64,
    pub items_downloaded: u64,
    pub groups_repaired: u64,
}

impl RunStats {
    /// Add statistics from a location.
    pub fn add_location_stats(&mut self, stats: &SyncStats) {
        self.entries_processed += stats.entries_processed;
        self.entries_skipped += stats.entries_skipped;
        self.entries_failed += stats.entries_failed;
        self.items_downloaded += stats.items_downloaded;
        self.groups_repaired += stats.groups_repaired;
        self.locations_processed += 1;
    }

    /// Mark a location as failed.
    pub fn mark_location_failed(&mut self) {
        self.locations_failed += 1;
    }
}
