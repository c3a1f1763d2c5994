//! Typed progress events emitted by the downloader.
//!
//! yt-dlp is asked to print machine-readable lines through
//! `--progress-template`; this module defines those templates and parses
//! the lines back into events.

use std::collections::BTreeSet;

/// Marker prefix of download progress lines.
const DOWNLOAD_MARKER: &str = "AYDL_DL";

/// Marker prefix of post-processing lines.
const POSTPROCESS_MARKER: &str = "AYDL_PP";

/// `--progress-template` for transfer ticks.
pub const DOWNLOAD_TEMPLATE: &str = "download:AYDL_DL|%(info.playlist_index)s|%(info.n_entries)s|%(progress._percent_str)s|%(progress._speed_str)s|%(progress._eta_str)s";

/// `--progress-template` for post-processing stage transitions.
pub const POSTPROCESS_TEMPLATE: &str =
    "postprocess:AYDL_PP|%(progress.postprocessor)s|%(progress.status)s|%(info.playlist_index)s";

/// Post-processor that merges separate video and audio streams.
pub const MERGER: &str = "Merger";

/// Post-processor that moves finished files to their destination.
pub const MOVE_FILES: &str = "MoveFiles";

/// One transfer progress tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    /// 1-based position in the playlist being downloaded.
    pub index: Option<u32>,
    /// Number of items in the playlist.
    pub total: Option<u32>,
    pub percent: Option<f32>,
    pub speed: Option<String>,
    pub eta: Option<String>,
}

/// State of a post-processing stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    Started,
    Processing,
    Finished,
    Other(String),
}

impl From<&str> for StageStatus {
    fn from(s: &str) -> Self {
        match s {
            "started" => StageStatus::Started,
            "processing" => StageStatus::Processing,
            "finished" => StageStatus::Finished,
            other => StageStatus::Other(other.to_string()),
        }
    }
}

/// One post-processing stage transition for an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProcessEvent {
    pub postprocessor: String,
    pub status: StageStatus,
    /// 1-based position of the item in the playlist.
    pub index: Option<u32>,
}

impl PostProcessEvent {
    pub fn is_finished(&self, postprocessor: &str) -> bool {
        self.status == StageStatus::Finished && self.postprocessor == postprocessor
    }
}

/// A parsed line of downloader output.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    Progress(DownloadProgress),
    PostProcess(PostProcessEvent),
}

/// Receives events while a pass runs.
pub trait DownloadObserver: Send {
    /// Transfer tick; for display only.
    fn on_progress(&mut self, progress: &DownloadProgress);

    /// Post-processing stage transition.
    fn on_postprocess(&mut self, event: &PostProcessEvent);
}

/// Parse a line printed through one of our progress templates.
pub fn parse_output_line(line: &str) -> Option<OutputEvent> {
    let mut fields = line.trim().split('|');
    match fields.next()? {
        DOWNLOAD_MARKER => {
            let index = fields.next().and_then(parse_number);
            let total = fields.next().and_then(parse_number);
            let percent = fields
                .next()
                .and_then(field)
                .and_then(|p| p.trim_end_matches('%').trim().parse().ok());
            let speed = fields.next().and_then(field).map(str::to_string);
            let eta = fields.next().and_then(field).map(str::to_string);
            Some(OutputEvent::Progress(DownloadProgress {
                index,
                total,
                percent,
                speed,
                eta,
            }))
        }
        POSTPROCESS_MARKER => {
            let postprocessor = fields.next().and_then(field)?.to_string();
            let status = StageStatus::from(fields.next().and_then(field)?);
            let index = fields.next().and_then(parse_number);
            Some(OutputEvent::PostProcess(PostProcessEvent {
                postprocessor,
                status,
                index,
            }))
        }
        _ => None,
    }
}

/// Template fields render as `NA` when unavailable.
fn field(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "NA" {
        None
    } else {
        Some(raw)
    }
}

fn parse_number(raw: &str) -> Option<u32> {
    field(raw)?.parse().ok()
}

/// Derives per-item success from the post-processing stream.
///
/// An item counts once its merge finished and its files were moved. When
/// no merge is expected (audio-only downloads) the move alone counts.
#[derive(Debug, Default)]
pub struct PostProcessTracker {
    requires_merge: bool,
    merged: BTreeSet<u32>,
    successes: BTreeSet<u32>,
}

impl PostProcessTracker {
    pub fn new(requires_merge: bool) -> Self {
        Self {
            requires_merge,
            ..Default::default()
        }
    }

    pub fn record(&mut self, event: &PostProcessEvent) {
        let Some(index) = event.index else {
            return;
        };

        if event.is_finished(MERGER) {
            self.merged.insert(index);
        } else if event.is_finished(MOVE_FILES)
            && (!self.requires_merge || self.merged.contains(&index))
        {
            self.successes.insert(index);
        }
    }

    pub fn into_successes(self) -> BTreeSet<u32> {
        self.successes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pp(postprocessor: &str, status: &str, index: u32) -> PostProcessEvent {
        PostProcessEvent {
            postprocessor: postprocessor.to_string(),
            status: StageStatus::from(status),
            index: Some(index),
        }
    }

    #[test]
    fn test_parse_download_line() {
        let event = parse_output_line("AYDL_DL|3|12|  45.2%|1.21MiB/s|00:07").unwrap();
        assert_eq!(
            event,
            OutputEvent::Progress(DownloadProgress {
                index: Some(3),
                total: Some(12),
                percent: Some(45.2),
                speed: Some("1.21MiB/s".to_string()),
                eta: Some("00:07".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_download_line_with_missing_fields() {
        let Some(OutputEvent::Progress(progress)) =
            parse_output_line("AYDL_DL|NA|NA|100.0%|NA|NA")
        else {
            panic!("expected a progress event");
        };
        assert_eq!(progress.index, None);
        assert_eq!(progress.percent, Some(100.0));
        assert_eq!(progress.speed, None);
    }

    #[test]
    fn test_parse_postprocess_line() {
        assert_eq!(
            parse_output_line("AYDL_PP|Merger|finished|7"),
            Some(OutputEvent::PostProcess(pp("Merger", "finished", 7)))
        );
    }

    #[test]
    fn test_other_lines_ignored() {
        assert_eq!(parse_output_line("[youtube] abc: Downloading webpage"), None);
        assert_eq!(parse_output_line("AYDL_PP|NA|finished|1"), None);
    }

    #[test]
    fn test_tracker_requires_merge_then_move() {
        let mut tracker = PostProcessTracker::new(true);
        tracker.record(&pp("MoveFiles", "finished", 1));
        tracker.record(&pp("Merger", "started", 2));
        tracker.record(&pp("Merger", "finished", 2));
        tracker.record(&pp("MoveFiles", "started", 2));
        tracker.record(&pp("MoveFiles", "finished", 2));
        tracker.record(&pp("Merger", "finished", 3));

        assert_eq!(tracker.into_successes(), BTreeSet::from([2]));
    }

    #[test]
    fn test_tracker_audio_only_counts_moves() {
        let mut tracker = PostProcessTracker::new(false);
        tracker.record(&pp("MoveFiles", "finished", 4));
        tracker.record(&pp("MoveFiles", "finished", 5));
        assert_eq!(tracker.into_successes(), BTreeSet::from([4, 5]));
    }
}
