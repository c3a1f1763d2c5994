//! yt-dlp adapter.
//!
//! Provides:
//! - Metadata resolution for playlists and channels
//! - Download passes with typed progress events

pub mod events;
pub mod executor;
pub mod resolver;

pub use events::{
    parse_output_line, DownloadObserver, DownloadProgress, OutputEvent, PostProcessEvent,
    PostProcessTracker, StageStatus,
};
pub use executor::{DownloadExecutor, PassRequest, YtDlpExecutor};
pub use resolver::{MetadataResolver, YtDlpResolver};
