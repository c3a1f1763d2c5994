//! Per-location progress store backed by a JSON document.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::progress::record::SyncRecord;

/// Mapping of playlist/channel URL to its sync record for one location.
#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    path: PathBuf,
    records: BTreeMap<String, SyncRecord>,
}

impl ProgressStore {
    /// Load the store from disk. A missing file yields an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let records = match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| Error::ProgressStore {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::Io(e)),
        };

        tracing::debug!(
            "Loaded {} record(s) from {}",
            records.len(),
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    pub fn get(&self, url: &str) -> Option<&SyncRecord> {
        self.records.get(url)
    }

    pub fn get_mut(&mut self, url: &str) -> Option<&mut SyncRecord> {
        self.records.get_mut(url)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the record for `url`, creating it with `title` if it is new.
    ///
    /// An existing record keeps its original title; a differing one is
    /// only logged.
    pub fn record_mut(&mut self, url: &str, title: &str) -> &mut SyncRecord {
        let record = self.records.entry(url.to_string()).or_insert_with(|| {
            tracing::info!("Added new playlist/channel: {}", title);
            SyncRecord::new(title)
        });

        if record.title != title {
            tracing::warn!(
                "Playlist title mismatch: stored='{}', resolved='{}'",
                record.title,
                title
            );
        }

        record
    }

    /// Rewrite the whole store to disk.
    ///
    /// The document is written to a temporary sibling and renamed over the
    /// store so readers only ever see a complete file.
    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.records)?;

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("progress.json");
        let temp_path = parent.join(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

        let write_result = (|| -> Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)?;
            Ok(())
        })();

        if write_result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }

        write_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::record::Progress;
    use std::collections::BTreeSet;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::open(&dir.path().join("AutoYoutubeDL.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AutoYoutubeDL.json");
        fs::write(&path, "{}").unwrap();

        let mut store = ProgressStore::open(&path).unwrap();
        store.record_mut("https://a", "A").progress = Progress::Playlist {
            done: BTreeSet::from([1, 2]),
        };
        store.record_mut("https://b", "B");
        store.save().unwrap();

        let reloaded = ProgressStore::open(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("https://a").unwrap().done().unwrap().len(), 2);
        assert_eq!(reloaded.get("https://b").unwrap().progress, Progress::Fresh);

        // Only the store itself is left behind.
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_saved_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AutoYoutubeDL.json");

        let mut store = ProgressStore::open(&path).unwrap();
        store.record_mut("https://a", "A");
        store.save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"https://a\": {\n    \"title\": \"A\"\n  }\n}");
    }

    #[test]
    fn test_title_is_kept_on_mismatch() {
        let mut store = ProgressStore::default();
        store.record_mut("https://a", "Original");
        let record = store.record_mut("https://a", "Renamed");
        assert_eq!(record.title, "Original");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AutoYoutubeDL.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ProgressStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::ProgressStore { .. }));
    }
}
