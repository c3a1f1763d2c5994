//! Synchronization of one watched location.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::Result;
use crate::fs::{output_template, WatchedLocation};
use crate::media::Pass;
use crate::output::create_spinner;
use crate::progress::{reconcile, ProgressStore};
use crate::repair::{repair_location, Remuxer};
use crate::source::{read_source_file, PlaylistEntry};
use crate::sync::monitor::PassMonitor;
use crate::sync::planner::{plan, SyncPlan};
use crate::sync::stats::SyncStats;
use crate::ytdlp::{DownloadExecutor, MetadataResolver, PassRequest, PostProcessTracker};

/// Everything a run needs, built once at startup.
pub struct RunContext {
    pub config: Config,
    pub resolver: Arc<dyn MetadataResolver>,
    pub executor: Arc<dyn DownloadExecutor>,
    pub remuxer: Arc<dyn Remuxer>,
    /// Local date the run started on.
    pub today: NaiveDate,
    /// Route per-item progress ticks into the log.
    pub log_progress: bool,
    pub skip_repair: bool,
    /// Show a spinner while passes run.
    pub interactive: bool,
}

impl RunContext {
    fn format_for(&self, pass: Pass) -> &str {
        match pass {
            Pass::Video => &self.config.downloader.video_format,
            Pass::Audio => &self.config.downloader.audio_format,
        }
    }
}

/// How a single entry ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryOutcome {
    Skipped,
    /// Number of items the primary pass completed.
    Downloaded(usize),
}

/// Sync every entry of a location, then repair leftover parts.
///
/// Entry failures are logged and counted; only problems with the location
/// itself (unreadable source file, corrupt store) are returned as errors.
pub async fn sync_location(ctx: &RunContext, location: &WatchedLocation) -> Result<SyncStats> {
    let mut stats = SyncStats::new(location.root.clone());

    let entries = read_source_file(&location.source_file)?;
    let mut store = ProgressStore::open(&location.store_file)?;
    tracing::info!(
        "Processing {} entr{} in {}",
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" },
        location.root.display()
    );

    let total = entries.len();
    for (i, entry) in entries.iter().enumerate() {
        tracing::info!("[{}/{}] {} ({})", i + 1, total, entry.url, entry.audio_mode);

        match process_entry(ctx, &location.root, &mut store, entry).await {
            Ok(EntryOutcome::Skipped) => stats.entries_skipped += 1,
            Ok(EntryOutcome::Downloaded(count)) => {
                stats.entries_processed += 1;
                stats.items_downloaded += count as u64;
            }
            Err(e) => {
                tracing::error!("Failed to sync '{}': {}", entry.url, e);
                stats.entries_failed += 1;
            }
        }
    }

    if ctx.skip_repair {
        tracing::debug!("Skipping repair of {}", location.root.display());
    } else {
        match repair_location(&location.root, ctx.remuxer.as_ref()).await {
            Ok(repaired) => stats.groups_repaired = repaired as u64,
            Err(e) => tracing::error!("Repair of {} failed: {}", location.root.display(), e),
        }
    }

    Ok(stats)
}

async fn process_entry(
    ctx: &RunContext,
    root: &Path,
    store: &mut ProgressStore,
    entry: &PlaylistEntry,
) -> Result<EntryOutcome> {
    let metadata = ctx.resolver.resolve(&entry.url).await?;
    tracing::info!(
        "{} '{}' lists {} item(s)",
        metadata.kind,
        metadata.title,
        metadata.item_count
    );

    let is_new = store.get(&entry.url).is_none();
    store.record_mut(&entry.url, &metadata.title);
    if is_new {
        store.save()?;
    }

    let (addressing, passes) = match plan(entry, &metadata, store.get(&entry.url)) {
        SyncPlan::NothingToDo(reason) => {
            tracing::info!("'{}': {}", metadata.title, reason);
            return Ok(EntryOutcome::Skipped);
        }
        SyncPlan::Download { addressing, passes } => (addressing, passes),
    };
    tracing::info!("'{}': downloading {}", metadata.title, addressing);

    let mut successes = BTreeSet::new();
    for (position, pass) in passes.iter().enumerate() {
        let primary = position == 0;
        let request = PassRequest {
            url: entry.url.clone(),
            format: ctx.format_for(*pass).to_string(),
            template: output_template(metadata.kind, *pass, &metadata.title)?,
            addressing: addressing.clone(),
            root: root.to_path_buf(),
        };

        let tracker = primary.then(|| PostProcessTracker::new(*pass == Pass::Video));
        let spinner = ctx
            .interactive
            .then(|| create_spinner(&format!("{} pass for '{}'", pass, metadata.title)));
        let mut monitor = PassMonitor::new(spinner, ctx.log_progress, tracker);

        let result = ctx.executor.execute(&request, &mut monitor).await;
        let pass_successes = monitor.finish();

        match result {
            Ok(()) if primary => successes = pass_successes,
            Ok(()) => {}
            Err(e) if primary => return Err(e),
            Err(e) => tracing::error!("{} pass failed for '{}': {}", pass, entry.url, e),
        }
    }

    let changed = store
        .get_mut(&entry.url)
        .map(|record| reconcile(record, &metadata, &successes, ctx.today))
        .unwrap_or(false);
    if changed {
        store.save()?;
    }

    Ok(EntryOutcome::Downloaded(successes.len()))
}
