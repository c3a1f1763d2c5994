//! Deciding what to download for one playlist or channel.

use std::fmt;

use chrono::NaiveDate;

use crate::media::{MediaKind, Pass, RemoteMetadata};
use crate::progress::{Progress, SyncRecord};
use crate::source::PlaylistEntry;

/// Which items to request from the downloader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addressing {
    /// Explicit 1-based playlist positions.
    Indexes(Vec<u32>),
    /// Items uploaded on or after the given date.
    DateAfter(NaiveDate),
    /// Everything, starting at position 1.
    FromStart,
}

impl fmt::Display for Addressing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addressing::Indexes(indexes) => {
                write!(f, "{} missing item(s)", indexes.len())
            }
            Addressing::DateAfter(date) => write!(f, "items uploaded since {}", date),
            Addressing::FromStart => write!(f, "all items"),
        }
    }
}

/// Why a plan has nothing to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The channel's latest upload is the one seen by the previous scan.
    NoNewUpload,
    /// Every playlist position is already downloaded.
    AllDone,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoNewUpload => write!(f, "no new video detected"),
            SkipReason::AllDone => write!(f, "nothing to download"),
        }
    }
}

/// Outcome of planning one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPlan {
    NothingToDo(SkipReason),
    Download {
        addressing: Addressing,
        passes: &'static [Pass],
    },
}

/// Compute the plan for `entry` given fresh metadata and its stored record.
pub fn plan(
    entry: &PlaylistEntry,
    metadata: &RemoteMetadata,
    record: Option<&SyncRecord>,
) -> SyncPlan {
    let progress = record
        .map(|r| &r.progress)
        .filter(|p| match p.kind() {
            Some(kind) if kind != metadata.kind => {
                tracing::warn!(
                    "'{}' was a {} and is now a {}, ignoring stored progress",
                    entry.url,
                    kind,
                    metadata.kind
                );
                false
            }
            _ => true,
        });

    let addressing = match (metadata.kind, progress) {
        (
            MediaKind::Channel,
            Some(Progress::Channel {
                last_scan,
                last_video_id,
            }),
        ) => {
            // A scanned channel that is still empty also counts as unchanged.
            if *last_video_id == metadata.latest_item_id {
                return SyncPlan::NothingToDo(SkipReason::NoNewUpload);
            }
            match last_scan {
                Some(date) => Addressing::DateAfter(*date),
                None => Addressing::FromStart,
            }
        }
        (MediaKind::Playlist, Some(Progress::Playlist { done })) => {
            let missing: Vec<u32> = (1..=metadata.item_count)
                .filter(|i| !done.contains(i))
                .collect();
            if missing.is_empty() {
                return SyncPlan::NothingToDo(SkipReason::AllDone);
            }
            Addressing::Indexes(missing)
        }
        _ => Addressing::FromStart,
    };

    SyncPlan::Download {
        addressing,
        passes: entry.audio_mode.passes(),
    }
}
