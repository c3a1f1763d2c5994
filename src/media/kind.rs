//! Remote source kinds, audio modes and download passes.

use std::fmt;

/// Kind of remote content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Bounded source with stable 1-based item positions.
    Playlist,
    /// Unbounded, append-only source addressed by upload date.
    Channel,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Playlist => write!(f, "playlist"),
            MediaKind::Channel => write!(f, "channel"),
        }
    }
}

/// Audio handling requested for a playlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioMode {
    /// Video only.
    #[default]
    None,
    /// Video, then a second audio-only pass (`[audio]` tag).
    ExtractAudioAlso,
    /// Audio only, no video pass (`[audio only]` tag).
    AudioOnly,
}

impl AudioMode {
    /// Download passes to run for this mode, in order.
    pub fn passes(&self) -> &'static [Pass] {
        match self {
            AudioMode::None => &[Pass::Video],
            AudioMode::ExtractAudioAlso => &[Pass::Video, Pass::Audio],
            AudioMode::AudioOnly => &[Pass::Audio],
        }
    }
}

impl fmt::Display for AudioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioMode::None => write!(f, "none"),
            AudioMode::ExtractAudioAlso => write!(f, "audio"),
            AudioMode::AudioOnly => write!(f, "audio only"),
        }
    }
}

/// One downloader invocation for a given output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Video,
    Audio,
}

impl Pass {
    /// Root folder the pass writes under, relative to the watched location.
    pub fn root_folder(&self) -> Option<&'static str> {
        match self {
            Pass::Video => None,
            Pass::Audio => Some("Audio"),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Video => write!(f, "video"),
            Pass::Audio => write!(f, "audio"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_per_mode() {
        assert_eq!(AudioMode::None.passes(), &[Pass::Video]);
        assert_eq!(AudioMode::ExtractAudioAlso.passes(), &[Pass::Video, Pass::Audio]);
        assert_eq!(AudioMode::AudioOnly.passes(), &[Pass::Audio]);
    }
}
