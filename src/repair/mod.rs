//! Post-scan repair of downloads left as separate video and audio parts.
//!
//! When yt-dlp cannot merge the streams of an item it leaves files such as
//! `Foo.f137.mp4` and `Foo.f140.m4a` next to each other. This pass finds
//! those pairs and remuxes them into `Foo.mp4`.

pub mod ffmpeg;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::error::Result;

pub use ffmpeg::{FfmpegRemuxer, Remuxer};

/// Unmuxed parts of one item, keyed by directory and base stem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartGroup {
    pub dir: PathBuf,
    pub stem: String,
    pub parts: Vec<PathBuf>,
}

impl PartGroup {
    /// Path of the merged file.
    pub fn output(&self) -> PathBuf {
        self.dir.join(format!("{}.mp4", self.stem))
    }

    /// The `(video, audio)` pair, if the group is exactly one of each.
    pub fn pair(&self) -> Option<(&Path, &Path)> {
        let [a, b] = self.parts.as_slice() else {
            return None;
        };
        match (extension(a), extension(b)) {
            (Some("mp4"), Some("m4a")) => Some((a.as_path(), b.as_path())),
            (Some("m4a"), Some("mp4")) => Some((b.as_path(), a.as_path())),
            _ => None,
        }
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

fn format_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?P<base>.+)\.f\d+$").expect("format suffix regex is valid"))
}

/// Find unmuxed parts under `root`, grouped by directory and base stem.
pub fn find_part_groups(root: &Path) -> Vec<PartGroup> {
    let mut groups: BTreeMap<(PathBuf, String), PartGroup> = BTreeMap::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry during repair scan: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(captures) = format_suffix().captures(stem) else {
            continue;
        };

        let dir = path.parent().unwrap_or(root).to_path_buf();
        let base = captures["base"].to_string();
        groups
            .entry((dir.clone(), base.clone()))
            .or_insert_with(|| PartGroup {
                dir,
                stem: base,
                parts: Vec::new(),
            })
            .parts
            .push(path.to_path_buf());
    }

    groups.into_values().collect()
}

/// Remux every complete part group under `root`.
///
/// Failures stay local to their group and leave its parts in place.
/// Returns the number of groups repaired.
pub async fn repair_location(root: &Path, remuxer: &dyn Remuxer) -> Result<usize> {
    let groups = find_part_groups(root);
    if groups.is_empty() {
        tracing::debug!("No unmuxed parts under {}", root.display());
        return Ok(0);
    }

    let mut repaired = 0;
    for group in &groups {
        let Some((video, audio)) = group.pair() else {
            tracing::warn!(
                "Cannot repair '{}' in {}: expected one .mp4 and one .m4a part, found {:?}",
                group.stem,
                group.dir.display(),
                group.parts
            );
            continue;
        };

        let output = group.output();
        if output.exists() {
            tracing::warn!(
                "Cannot repair '{}': {} already exists",
                group.stem,
                output.display()
            );
            continue;
        }

        tracing::info!("Merging parts of '{}'", output.display());
        if let Err(e) = remuxer.remux(video, audio, &output).await {
            tracing::error!("Failed to merge '{}': {}", output.display(), e);
            continue;
        }

        for part in [video, audio] {
            if let Err(e) = tokio::fs::remove_file(part).await {
                tracing::error!("Failed to remove part {}: {}", part.display(), e);
            }
        }
        repaired += 1;
    }

    Ok(repaired)
}
