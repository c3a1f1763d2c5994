//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::fs::{default_home, HomePaths};

/// AutoYoutubeDL CLI.
#[derive(Parser, Debug)]
#[command(
    name = "auto-youtube-dl",
    version,
    about = "Keep incremental backups of YouTube playlists and channels",
    long_about = "Downloads new items of the playlists and channels listed in the \
                  AutoYoutubeDL.txt file of every watched directory.\n\n\
                  Progress is tracked per directory in AutoYoutubeDL.json, so each \
                  run only fetches what is missing."
)]
pub struct Args {
    /// Write per-item download progress to the log.
    #[arg(long)]
    pub log_progress: bool,

    /// Installation directory holding the config, lock and log files.
    #[arg(long, env = "AUTOYTDL_HOME")]
    pub home: Option<PathBuf>,

    /// Path to configuration file [default: <home>/AutoYoutubeDL.toml].
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    /// Don't merge leftover video/audio parts after syncing.
    #[arg(long)]
    pub skip_repair: bool,
}

impl Args {
    /// Installation file layout implied by the arguments.
    pub fn home_paths(&self) -> HomePaths {
        let home = self.home.clone().unwrap_or_else(default_home);
        let paths = HomePaths::new(&home);
        match &self.config {
            Some(config) => paths.with_config(config.clone()),
            None => paths,
        }
    }
}
