//! Folding download results back into sync records.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::media::{MediaKind, RemoteMetadata};
use crate::progress::record::{Progress, SyncRecord};

/// Date recorded as a channel's scan floor: one day before `today`, so
/// uploads the site reports late are picked up by the next scan.
pub fn scan_floor(today: NaiveDate) -> NaiveDate {
    today.pred_opt().unwrap_or(today)
}

/// Merge the outcome of a scan into `record`.
///
/// `successes` holds the 1-based indexes the downloader reported as fully
/// merged and moved. Returns whether the record changed.
pub fn reconcile(
    record: &mut SyncRecord,
    metadata: &RemoteMetadata,
    successes: &BTreeSet<u32>,
    today: NaiveDate,
) -> bool {
    let before = record.progress.clone();

    match metadata.kind {
        MediaKind::Channel => {
            tracing::debug!("Scan done");
            record.progress = Progress::Channel {
                last_scan: Some(scan_floor(today)),
                last_video_id: metadata.latest_item_id.clone(),
            };
        }
        MediaKind::Playlist => match &mut record.progress {
            Progress::Playlist { done } => {
                if !successes.is_empty() {
                    tracing::debug!("Successfully downloaded {:?}", successes);
                    done.extend(successes.iter().copied());
                }
            }
            Progress::Channel { .. } => {
                tracing::warn!(
                    "'{}' is now a playlist, dropping its channel progress",
                    record.title
                );
                record.progress = playlist_progress(successes);
            }
            Progress::Fresh => {
                record.progress = playlist_progress(successes);
            }
        },
    }

    let changed = record.progress != before;
    if !changed {
        tracing::debug!("Did nothing");
    }
    changed
}

fn playlist_progress(successes: &BTreeSet<u32>) -> Progress {
    if successes.is_empty() {
        Progress::Fresh
    } else {
        Progress::Playlist {
            done: successes.clone(),
        }
    }
}
