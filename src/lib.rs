//! AutoYoutubeDL - incremental backups of YouTube playlists and channels.
//!
//! Every watched directory holds a hand-edited `AutoYoutubeDL.txt` listing
//! playlist and channel URLs, and an `AutoYoutubeDL.json` progress store.
//! Each run resolves every URL, works out what is new since the last run,
//! downloads only that through yt-dlp and records the outcome.
//!
//! # Features
//!
//! - Playlists tracked by downloaded positions, channels by scan date and
//!   latest upload
//! - Optional extra audio-only pass or audio-only downloads per entry
//! - Repair of items left as separate video and audio parts
//! - Single-run lock so overlapping scheduled runs never interfere
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use auto_youtube_dl::{
//!     fs::prepare_location, repair::FfmpegRemuxer, sync::{sync_location, RunContext},
//!     ytdlp::{YtDlpExecutor, YtDlpResolver}, Config,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(std::path::Path::new("AutoYoutubeDL.toml"))?;
//!     let roots = config.watched_paths().to_vec();
//!     let ctx = RunContext {
//!         resolver: Arc::new(YtDlpResolver::new(config.downloader.yt_dlp.clone())),
//!         executor: Arc::new(YtDlpExecutor::new(config.downloader.yt_dlp.clone())),
//!         remuxer: Arc::new(FfmpegRemuxer::new(config.downloader.ffmpeg.clone())),
//!         today: chrono::Local::now().date_naive(),
//!         log_progress: false,
//!         skip_repair: false,
//!         interactive: true,
//!         config,
//!     };
//!
//!     for root in &roots {
//!         if let Some(location) = prepare_location(root)? {
//!             sync_location(&ctx, &location).await?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod progress;
pub mod repair;
pub mod source;
pub mod sync;
pub mod ytdlp;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use media::{AudioMode, MediaKind, RemoteMetadata};
pub use progress::{ProgressStore, SyncRecord};
pub use sync::{sync_location, RunContext};
