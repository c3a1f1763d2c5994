//! Persisted per-URL sync records.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::media::MediaKind;

/// Date format used for `last_scan` on disk.
pub const SCAN_DATE_FORMAT: &str = "%Y%m%d";

/// Sync state of one playlist or channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord", into = "RawRecord")]
pub struct SyncRecord {
    /// Title from the first successful resolution.
    pub title: String,
    pub progress: Progress,
}

/// Kind-specific progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Progress {
    /// Seen, but no plan has executed yet.
    #[default]
    Fresh,
    /// 1-based indexes already downloaded.
    Playlist { done: BTreeSet<u32> },
    /// Date floor and most recent upload seen by the last scan. Either may
    /// be missing from hand-edited or older stores.
    Channel {
        last_scan: Option<NaiveDate>,
        last_video_id: Option<String>,
    },
}

impl Progress {
    /// Kind this progress belongs to, if any has been recorded.
    pub fn kind(&self) -> Option<MediaKind> {
        match self {
            Progress::Fresh => None,
            Progress::Playlist { .. } => Some(MediaKind::Playlist),
            Progress::Channel { .. } => Some(MediaKind::Channel),
        }
    }
}

impl SyncRecord {
    /// Create a record for a newly seen URL.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            progress: Progress::Fresh,
        }
    }

    /// Completed indexes, when this is playlist progress.
    pub fn done(&self) -> Option<&BTreeSet<u32>> {
        match &self.progress {
            Progress::Playlist { done } => Some(done),
            _ => None,
        }
    }

    /// Last scan date, when this is channel progress.
    pub fn last_scan(&self) -> Option<NaiveDate> {
        match &self.progress {
            Progress::Channel { last_scan, .. } => *last_scan,
            _ => None,
        }
    }

    /// Last seen upload id, when this is channel progress.
    pub fn last_video_id(&self) -> Option<&str> {
        match &self.progress {
            Progress::Channel { last_video_id, .. } => last_video_id.as_deref(),
            _ => None,
        }
    }
}

/// On-disk shape: a flat object with optional kind-specific keys.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawRecord {
    title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    done: Option<Vec<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_scan: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_video_id: Option<String>,
}

impl TryFrom<RawRecord> for SyncRecord {
    type Error = Error;

    fn try_from(raw: RawRecord) -> std::result::Result<Self, Self::Error> {
        let has_channel_fields = raw.last_scan.is_some() || raw.last_video_id.is_some();
        if raw.done.is_some() && has_channel_fields {
            return Err(Error::ConflictingRecord(raw.title));
        }

        let progress = if let Some(done) = raw.done {
            Progress::Playlist {
                done: done.into_iter().filter(|&i| i > 0).collect(),
            }
        } else if has_channel_fields {
            Progress::Channel {
                last_scan: raw
                    .last_scan
                    .map(|s| NaiveDate::parse_from_str(&s, SCAN_DATE_FORMAT))
                    .transpose()?,
                last_video_id: raw.last_video_id,
            }
        } else {
            Progress::Fresh
        };

        Ok(SyncRecord {
            title: raw.title,
            progress,
        })
    }
}

impl From<SyncRecord> for RawRecord {
    fn from(record: SyncRecord) -> Self {
        let mut raw = RawRecord {
            title: record.title,
            ..Default::default()
        };

        match record.progress {
            Progress::Fresh => {}
            Progress::Playlist { done } => raw.done = Some(done.into_iter().collect()),
            Progress::Channel {
                last_scan,
                last_video_id,
            } => {
                raw.last_scan = last_scan.map(|d| d.format(SCAN_DATE_FORMAT).to_string());
                raw.last_video_id = last_video_id;
            }
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_record_from_json() {
        let record: SyncRecord =
            serde_json::from_str(r#"{"title": "Chan - Mix", "done": [3, 1, 3]}"#).unwrap();
        assert_eq!(record.title, "Chan - Mix");
        assert_eq!(record.done(), Some(&BTreeSet::from([1, 3])));
        assert_eq!(record.progress.kind(), Some(MediaKind::Playlist));
    }

    #[test]
    fn test_channel_record_from_json() {
        let record: SyncRecord = serde_json::from_str(
            r#"{"title": "Chan", "last_scan": "20240131", "last_video_id": "abc"}"#,
        )
        .unwrap();
        assert_eq!(record.last_scan(), NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(record.last_video_id(), Some("abc"));
    }

    #[test]
    fn test_fresh_record_serializes_title_only() {
        let json = serde_json::to_value(SyncRecord::new("New")).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "New" }));
    }

    #[test]
    fn test_channel_record_serializes_compact_date() {
        let record = SyncRecord {
            title: "Chan".to_string(),
            progress: Progress::Channel {
                last_scan: NaiveDate::from_ymd_opt(2023, 12, 5),
                last_video_id: Some("xyz".to_string()),
            },
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": "Chan", "last_scan": "20231205", "last_video_id": "xyz" })
        );
    }

    #[test]
    fn test_channel_record_without_scan_date_keeps_video_id() {
        let record: SyncRecord =
            serde_json::from_str(r#"{"title": "C", "last_video_id": "latest"}"#).unwrap();
        assert_eq!(
            record.progress,
            Progress::Channel {
                last_scan: None,
                last_video_id: Some("latest".to_string()),
            }
        );
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({ "title": "C", "last_video_id": "latest" })
        );
    }

    #[test]
    fn test_mixed_record_rejected() {
        let result: std::result::Result<SyncRecord, _> = serde_json::from_str(
            r#"{"title": "X", "done": [1], "last_scan": "20240101"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        let result: std::result::Result<SyncRecord, _> =
            serde_json::from_str(r#"{"title": "X", "last_scan": "2024-01-01"}"#);
        assert!(result.is_err());
    }
}
