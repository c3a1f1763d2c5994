//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the configuration file inside the installation home.
pub const CONFIG_FILE_NAME: &str = "AutoYoutubeDL.toml";

/// Placeholder path written into the configuration template.
pub const PLACEHOLDER_PATH: &str = "/example/path";

/// Template written when no configuration file exists yet.
pub const CONFIG_TEMPLATE: &str = r#"# AutoYoutubeDL configuration

[settings]
# Directories to watch. Each one gets an AutoYoutubeDL.txt file listing
# playlist/channel URLs and an AutoYoutubeDL.json file tracking progress.
surveiled_path = ["/example/path"]

[downloader]
# yt_dlp = "yt-dlp"
# ffmpeg = "ffmpeg"
# video_format = "bestvideo[ext=mp4][height<=?1080]+bestaudio[ext=m4a]/best"
# audio_format = "bestaudio[ext=m4a]/bestaudio"
"#;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub settings: SettingsConfig,

    #[serde(default)]
    pub downloader: DownloaderConfig,
}

/// Watched locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Directories to scan for playlist files, processed in order.
    #[serde(default)]
    pub surveiled_path: Vec<PathBuf>,
}

/// External tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloaderConfig {
    /// Path or name of the yt-dlp executable.
    #[serde(default = "default_yt_dlp")]
    pub yt_dlp: PathBuf,

    /// Path or name of the ffmpeg executable.
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: PathBuf,

    /// Format selection for the video pass.
    #[serde(default = "default_video_format")]
    pub video_format: String,

    /// Format selection for the audio pass.
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            yt_dlp: default_yt_dlp(),
            ffmpeg: default_ffmpeg(),
            video_format: default_video_format(),
            audio_format: default_audio_format(),
        }
    }
}

fn default_yt_dlp() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_ffmpeg() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_video_format() -> String {
    "bestvideo[ext=mp4][height<=?1080]+bestaudio[ext=m4a]/best".to_string()
}

fn default_audio_format() -> String {
    "bestaudio[ext=m4a]/bestaudio".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Watched paths that are relative are resolved against the directory
    /// holding the configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let mut config: Config = toml::from_str(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.settings.surveiled_path = config
            .settings
            .surveiled_path
            .into_iter()
            .map(|p| if p.is_relative() { base.join(p) } else { p })
            .collect();

        Ok(config)
    }

    /// Load configuration, writing a template first if the file is absent.
    ///
    /// A freshly written template is reported as [`Error::MissingConfig`] so
    /// the caller can stop and let the operator fill it in.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.is_file() {
            write_template(path)?;
            return Err(Error::MissingConfig(path.to_path_buf()));
        }

        tracing::info!("Reading config from '{}'", path.display());
        Self::load(path)
    }

    /// Watched directories in processing order.
    pub fn watched_paths(&self) -> &[PathBuf] {
        &self.settings.surveiled_path
    }
}

/// Write the configuration template, refusing to clobber an existing file.
pub fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::Config(format!(
            "Refusing to overwrite existing file {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    tracing::info!("Writing default config to '{}'", path.display());
    fs::write(path, CONFIG_TEMPLATE)?;
    Ok(())
}
