//! Error types for the auto-youtube-dl application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Configuration file was missing, a template was written to {0}")]
    MissingConfig(PathBuf),

    // Remote collaborator errors
    #[error("Could not resolve '{url}': {message}")]
    Resolve { url: String, message: String },

    #[error("Downloader failed: {0}")]
    Executor(String),

    #[error("yt-dlp not found at '{0}'. Please install yt-dlp and ensure it's in your PATH.")]
    YtDlpNotFound(String),

    // Progress store errors
    #[error("Progress store {path} is invalid: {message}")]
    ProgressStore { path: PathBuf, message: String },

    #[error("Conflicting progress for '{0}': record has both playlist and channel fields")]
    ConflictingRecord(String),

    // File system errors
    #[error("Invalid file or folder name: {0}")]
    InvalidFilename(String),

    // External tool errors
    #[error("FFmpeg error: {0}")]
    FFmpeg(String),

    #[error("FFmpeg not found. Please install ffmpeg and ensure it's in your PATH.")]
    FFmpegNotFound,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid date: {0}")]
    Date(#[from] chrono::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
