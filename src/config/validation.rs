//! Configuration validation logic.

use std::path::Path;

use crate::config::loader::{Config, PLACEHOLDER_PATH};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_paths(config.watched_paths())?;
    validate_tool("downloader.yt_dlp", &config.downloader.yt_dlp)?;
    validate_tool("downloader.ffmpeg", &config.downloader.ffmpeg)?;
    validate_format("downloader.video_format", &config.downloader.video_format)?;
    validate_format("downloader.audio_format", &config.downloader.audio_format)?;

    Ok(())
}

/// Validate the watched directories.
pub fn validate_paths<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    if paths.is_empty() {
        return Err(Error::ConfigValidation {
            field: "settings.surveiled_path".to_string(),
            message: "At least one directory to watch is required".to_string(),
        });
    }

    for path in paths {
        let path = path.as_ref();
        if path == Path::new(PLACEHOLDER_PATH) {
            return Err(Error::ConfigValidation {
                field: "settings.surveiled_path".to_string(),
                message: format!(
                    "'{}' is the template placeholder. Please list your own directories.",
                    PLACEHOLDER_PATH
                ),
            });
        }

        if path.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                field: "settings.surveiled_path".to_string(),
                message: "Empty path".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_tool(field: &str, tool: &Path) -> Result<()> {
    if tool.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Executable path cannot be empty".to_string(),
        });
    }

    Ok(())
}

fn validate_format(field: &str, format: &str) -> Result<()> {
    if format.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Format selection cannot be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{DownloaderConfig, SettingsConfig};
    use std::path::PathBuf;

    fn make_config(paths: &[&str]) -> Config {
        Config {
            settings: SettingsConfig {
                surveiled_path: paths.iter().map(PathBuf::from).collect(),
            },
            downloader: DownloaderConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&make_config(&["/srv/videos", "/srv/music"])).is_ok());
    }

    #[test]
    fn test_no_paths() {
        assert!(validate_config(&make_config(&[])).is_err());
    }

    #[test]
    fn test_placeholder_rejected() {
        let err = validate_config(&make_config(&[PLACEHOLDER_PATH])).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_empty_format_rejected() {
        let mut config = make_config(&["/srv/videos"]);
        config.downloader.audio_format = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
