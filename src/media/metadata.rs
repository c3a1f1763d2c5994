//! Freshly resolved remote metadata.

use crate::media::kind::MediaKind;

/// What the resolver knows about a playlist or channel at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMetadata {
    /// Display title: the channel name, or `"<Channel> - <playlist>"`.
    pub title: String,

    /// Number of items currently listed.
    pub item_count: u32,

    pub kind: MediaKind,

    /// Identifier of the most recent upload (channels only).
    pub latest_item_id: Option<String>,
}

impl RemoteMetadata {
    /// Build metadata for a playlist.
    pub fn playlist(title: impl Into<String>, item_count: u32) -> Self {
        Self {
            title: title.into(),
            item_count,
            kind: MediaKind::Playlist,
            latest_item_id: None,
        }
    }

    /// Build metadata for a channel.
    pub fn channel(
        title: impl Into<String>,
        item_count: u32,
        latest_item_id: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            item_count,
            kind: MediaKind::Channel,
            latest_item_id,
        }
    }
}
