//! Remote metadata resolution through `yt-dlp --dump-single-json`.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::media::{MediaKind, RemoteMetadata};

/// Resolves a playlist or channel URL to its current metadata.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<RemoteMetadata>;
}

/// Flat playlist document printed by yt-dlp.
#[derive(Debug, Default, Deserialize)]
struct PlaylistInfo {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    channel_id: Option<String>,
    #[serde(default)]
    channel_url: Option<String>,
    #[serde(default)]
    playlist_count: Option<u32>,
    #[serde(default)]
    entries: Vec<EntryInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct EntryInfo {
    #[serde(default)]
    id: Option<String>,
}

/// Resolver backed by the yt-dlp executable.
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    binary: PathBuf,
}

impl YtDlpResolver {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

#[async_trait]
impl MetadataResolver for YtDlpResolver {
    async fn resolve(&self, url: &str) -> Result<RemoteMetadata> {
        tracing::info!("Fetching playlist infos for '{}'. This could take a moment ..", url);
        let query_url = listing_url(url);

        let output = Command::new(&self.binary)
            .args([
                "--flat-playlist",
                "--dump-single-json",
                "--no-warnings",
                "--no-colors",
                query_url.as_str(),
            ])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::YtDlpNotFound(self.binary.display().to_string())
                } else {
                    Error::Resolve {
                        url: url.to_string(),
                        message: format!("Failed to run yt-dlp: {}", e),
                    }
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Resolve {
                url: url.to_string(),
                message: stderr.trim().to_string(),
            });
        }

        let info: PlaylistInfo =
            serde_json::from_slice(&output.stdout).map_err(|e| Error::Resolve {
                url: url.to_string(),
                message: format!("yt-dlp returned invalid JSON: {}", e),
            })?;

        metadata_from_info(url, &query_url, info)
    }
}

/// Channel root URLs list their tabs rather than uploads; point them at the
/// uploads tab instead.
fn listing_url(url: &str) -> String {
    let Ok(parsed) = url::Url::parse(url) else {
        return url.to_string();
    };

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let is_channel_root = match segments.as_slice() {
        [handle] => handle.starts_with('@'),
        [kind, _] => matches!(*kind, "channel" | "c" | "user"),
        _ => false,
    };

    if is_channel_root {
        let mut listing = parsed.clone();
        let path = format!("{}/videos", parsed.path().trim_end_matches('/'));
        listing.set_path(&path);
        listing.to_string()
    } else {
        url.to_string()
    }
}

fn same_url(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn metadata_from_info(url: &str, query_url: &str, info: PlaylistInfo) -> Result<RemoteMetadata> {
    let channel = info
        .channel
        .clone()
        .or_else(|| info.uploader.clone())
        .unwrap_or_default();

    let title = match info.title.as_deref() {
        Some(title) if Some(title) != info.id.as_deref() => title.to_string(),
        _ => {
            tracing::warn!("Could not resolve title; url=`{}`", url);
            info.id.clone().ok_or_else(|| Error::Resolve {
                url: url.to_string(),
                message: "yt-dlp returned neither title nor id".to_string(),
            })?
        }
    };

    let is_channel = (!channel.is_empty() && title == format!("{} - Videos", channel))
        || info
            .channel_url
            .as_deref()
            .is_some_and(|c| same_url(c, url) || same_url(c, query_url))
        || (info.channel_id.is_some() && info.channel_id == info.id);

    let item_count = info
        .playlist_count
        .unwrap_or(info.entries.len() as u32);

    if is_channel {
        let name = if channel.is_empty() { title } else { channel };
        let latest = info.entries.first().and_then(|e| e.id.clone());
        Ok(RemoteMetadata {
            title: name,
            item_count,
            kind: MediaKind::Channel,
            latest_item_id: latest,
        })
    } else {
        let full_title = if channel.is_empty() {
            title
        } else {
            format!("{} - {}", capitalize_first(&channel), title)
        };
        Ok(RemoteMetadata::playlist(full_title, item_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(json: serde_json::Value) -> PlaylistInfo {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_listing_url_for_channel_roots() {
        assert_eq!(
            listing_url("https://www.youtube.com/channel/UCabc"),
            "https://www.youtube.com/channel/UCabc/videos"
        );
        assert_eq!(
            listing_url("https://www.youtube.com/@someone/"),
            "https://www.youtube.com/@someone/videos"
        );
        assert_eq!(
            listing_url("https://www.youtube.com/user/someone"),
            "https://www.youtube.com/user/someone/videos"
        );
    }

    #[test]
    fn test_listing_url_leaves_others_alone() {
        let playlist = "https://www.youtube.com/playlist?list=PL123";
        assert_eq!(listing_url(playlist), playlist);
        let tab = "https://www.youtube.com/channel/UCabc/shorts";
        assert_eq!(listing_url(tab), tab);
    }

    #[test]
    fn test_channel_metadata() {
        let url = "https://www.youtube.com/channel/UCabc";
        let metadata = metadata_from_info(
            url,
            &listing_url(url),
            info(serde_json::json!({
                "id": "UCabc",
                "title": "someone - Videos",
                "channel": "someone",
                "channel_id": "UCabc",
                "channel_url": "https://www.youtube.com/channel/UCabc",
                "entries": [{"id": "new1"}, {"id": "old2"}]
            })),
        )
        .unwrap();

        assert_eq!(metadata.kind, MediaKind::Channel);
        assert_eq!(metadata.title, "someone");
        assert_eq!(metadata.item_count, 2);
        assert_eq!(metadata.latest_item_id.as_deref(), Some("new1"));
    }

    #[test]
    fn test_playlist_metadata() {
        let url = "https://www.youtube.com/playlist?list=PL123";
        let metadata = metadata_from_info(
            url,
            url,
            info(serde_json::json!({
                "id": "PL123",
                "title": "Road trip",
                "channel": "someone",
                "channel_id": "UCabc",
                "channel_url": "https://www.youtube.com/channel/UCabc",
                "playlist_count": 42,
                "entries": [{"id": "a"}]
            })),
        )
        .unwrap();

        assert_eq!(metadata, RemoteMetadata::playlist("Someone - Road trip", 42));
    }

    #[test]
    fn test_missing_title_falls_back_to_id() {
        let metadata = metadata_from_info(
            "https://x/y",
            "https://x/y",
            info(serde_json::json!({ "id": "PL9", "entries": [] })),
        )
        .unwrap();
        assert_eq!(metadata.title, "PL9");
        assert_eq!(metadata.kind, MediaKind::Playlist);
    }
}
