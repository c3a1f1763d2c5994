//! Observer that turns downloader events into feedback and successes.

use std::collections::BTreeSet;

use indicatif::ProgressBar;

use crate::ytdlp::{DownloadObserver, DownloadProgress, PostProcessEvent, PostProcessTracker};

/// Observes one pass.
///
/// Only the primary pass carries a tracker; secondary passes are display
/// only.
pub struct PassMonitor {
    spinner: Option<ProgressBar>,
    log_progress: bool,
    tracker: Option<PostProcessTracker>,
}

impl PassMonitor {
    pub fn new(
        spinner: Option<ProgressBar>,
        log_progress: bool,
        tracker: Option<PostProcessTracker>,
    ) -> Self {
        Self {
            spinner,
            log_progress,
            tracker,
        }
    }

    /// Indexes reported as complete, empty for a secondary pass.
    pub fn finish(self) -> BTreeSet<u32> {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
        self.tracker
            .map(PostProcessTracker::into_successes)
            .unwrap_or_default()
    }
}

fn position(index: Option<u32>, total: Option<u32>) -> String {
    match (index, total) {
        (Some(i), Some(n)) => format!("[{}/{}]", i, n),
        (Some(i), None) => format!("[{}]", i),
        _ => "[?]".to_string(),
    }
}

impl DownloadObserver for PassMonitor {
    fn on_progress(&mut self, progress: &DownloadProgress) {
        let line = format!(
            "{} {:>5.1}% at {} ETA {}",
            position(progress.index, progress.total),
            progress.percent.unwrap_or(0.0),
            progress.speed.as_deref().unwrap_or("?"),
            progress.eta.as_deref().unwrap_or("?"),
        );

        if self.log_progress {
            tracing::debug!("{}", line);
        }
        if let Some(spinner) = &self.spinner {
            spinner.set_message(line);
        }
    }

    fn on_postprocess(&mut self, event: &PostProcessEvent) {
        tracing::debug!(
            "Post-processing {} {}: {:?}",
            position(event.index, None),
            event.postprocessor,
            event.status
        );
        if let Some(tracker) = &mut self.tracker {
            tracker.record(event);
        }
    }
}
