//! Path and directory management.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::config::CONFIG_FILE_NAME;
use crate::error::Result;
use crate::source::SOURCE_TEMPLATE;

/// Playlist source file inside a watched location.
pub const SOURCE_FILE_NAME: &str = "AutoYoutubeDL.txt";

/// Progress store inside a watched location.
pub const STORE_FILE_NAME: &str = "AutoYoutubeDL.json";

/// Files owned by one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePaths {
    pub home: PathBuf,
    pub config: PathBuf,
    pub lock: PathBuf,
    pub run_log: PathBuf,
    pub warning_log: PathBuf,
    pub timestamp_log: PathBuf,
}

impl HomePaths {
    /// Lay out installation files under `home`.
    pub fn new(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            config: home.join(CONFIG_FILE_NAME),
            lock: home.join("AutoYoutubeDL.lock"),
            run_log: home.join("AutoYoutubeDL.log"),
            warning_log: home.join("WARNING.log"),
            timestamp_log: home.join("AutoYoutubeDL.run.log"),
        }
    }

    /// Use an explicit config file instead of the one in `home`.
    pub fn with_config(mut self, config: PathBuf) -> Self {
        self.config = config;
        self
    }
}

/// Default installation home: the platform config directory, or the
/// current directory when none can be determined.
pub fn default_home() -> PathBuf {
    ProjectDirs::from("", "", "AutoYoutubeDL")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// A watched directory with its source file and progress store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedLocation {
    pub root: PathBuf,
    pub source_file: PathBuf,
    pub store_file: PathBuf,
}

impl WatchedLocation {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            source_file: root.join(SOURCE_FILE_NAME),
            store_file: root.join(STORE_FILE_NAME),
        }
    }
}

/// Make sure a watched directory and its files exist.
///
/// Returns `None` when the location cannot be processed this run: the path
/// is not a directory, or its source file was only just created from the
/// template and has nothing to sync yet.
pub fn prepare_location(root: &Path) -> Result<Option<WatchedLocation>> {
    if !root.is_dir() {
        if root.exists() {
            tracing::error!("Path '{}' exists but is not a directory!", root.display());
            return Ok(None);
        }
        tracing::warn!("Creating '{}' !", root.display());
        ensure_dir(root)?;
    }

    let location = WatchedLocation::new(root);

    if !location.source_file.is_file() {
        tracing::info!(
            "Writing playlist template to '{}'",
            location.source_file.display()
        );
        fs::write(&location.source_file, SOURCE_TEMPLATE)?;
        return Ok(None);
    }

    if !location.store_file.is_file() {
        fs::write(&location.store_file, "{}")?;
    }

    Ok(Some(location))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_layout() {
        let paths = HomePaths::new(Path::new("/opt/aydl"));
        assert_eq!(paths.config, PathBuf::from("/opt/aydl/AutoYoutubeDL.toml"));
        assert_eq!(paths.lock, PathBuf::from("/opt/aydl/AutoYoutubeDL.lock"));
        assert_eq!(paths.warning_log, PathBuf::from("/opt/aydl/WARNING.log"));

        let paths = paths.with_config(PathBuf::from("/etc/aydl.toml"));
        assert_eq!(paths.config, PathBuf::from("/etc/aydl.toml"));
    }

    #[test]
    fn test_new_location_gets_template_and_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("videos");

        assert!(prepare_location(&root).unwrap().is_none());
        let source = fs::read_to_string(root.join(SOURCE_FILE_NAME)).unwrap();
        assert_eq!(source, SOURCE_TEMPLATE);
        assert!(!root.join(STORE_FILE_NAME).exists());

        let location = prepare_location(&root).unwrap().unwrap();
        assert_eq!(fs::read_to_string(&location.store_file).unwrap(), "{}");
    }

    #[test]
    fn test_existing_store_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SOURCE_FILE_NAME), "").unwrap();
        fs::write(dir.path().join(STORE_FILE_NAME), "{\"u\": {\"title\": \"t\"}}").unwrap();

        let location = prepare_location(dir.path()).unwrap().unwrap();
        assert_eq!(
            fs::read_to_string(location.store_file).unwrap(),
            "{\"u\": {\"title\": \"t\"}}"
        );
    }

    #[test]
    fn test_file_in_place_of_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        fs::write(&file, "x").unwrap();
        assert!(prepare_location(&file).unwrap().is_none());
    }
}
