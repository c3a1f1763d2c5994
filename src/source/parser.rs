//! Playlist source file parsing.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;
use crate::media::AudioMode;

/// Lines shorter than this after comment stripping are ignored.
const MIN_LINE_LENGTH: usize = 10;

/// One playlist or channel to keep in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub url: String,
    pub audio_mode: AudioMode,
}

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(http\S+)(\s\[.+\])?").expect("line pattern is a valid regex")
    })
}

/// Read and parse a playlist source file.
pub fn read_source_file(path: &Path) -> Result<Vec<PlaylistEntry>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_source(&content))
}

/// Parse the contents of a playlist source file.
///
/// Malformed lines are logged and skipped.
pub fn parse_source(content: &str) -> Vec<PlaylistEntry> {
    content.lines().filter_map(parse_line).collect()
}

/// Parse a single line, returning `None` for comments, short lines and
/// malformed lines.
pub fn parse_line(line: &str) -> Option<PlaylistEntry> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
    .trim();

    if line.chars().count() < MIN_LINE_LENGTH {
        return None;
    }

    let Some(captures) = line_pattern().captures(line) else {
        tracing::warn!("Line '{}' did not match pattern!", line);
        return None;
    };

    let url = captures.get(1).map(|m| m.as_str())?;
    if let Err(e) = url::Url::parse(url) {
        tracing::warn!("Line '{}' has an invalid URL: {}", line, e);
        return None;
    }

    let audio_mode = captures
        .get(2)
        .map(|tag| parse_tag(tag.as_str()))
        .unwrap_or_default();

    Some(PlaylistEntry {
        url: url.to_string(),
        audio_mode,
    })
}

/// Interpret a bracketed tag, ignoring case and anything but letters.
fn parse_tag(tag: &str) -> AudioMode {
    let simplified: String = tag
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    match simplified.as_str() {
        "audioonly" => AudioMode::AudioOnly,
        "audio" => AudioMode::ExtractAudioAlso,
        _ => {
            tracing::warn!("Unknown tag '{}', ignoring it", tag.trim());
            AudioMode::None
        }
    }
}
