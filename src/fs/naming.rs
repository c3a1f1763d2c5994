//! Output naming templates.

use crate::error::{Error, Result};
use crate::media::{MediaKind, Pass};

/// File part of the template for channel uploads, ordered by upload date.
const CHANNEL_ITEM_TEMPLATE: &str = "%(upload_date>%Y-%m-%d)s - %(title)s.%(ext)s";

/// File part of the template for playlist items, ordered by position.
const PLAYLIST_ITEM_TEMPLATE: &str = "%(playlist_index)03d - %(title)s.%(ext)s";

/// Sanitize a path component (folder or file name).
///
/// Separators and characters reserved on common filesystems are replaced
/// rather than rejected, since titles come from the remote site.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    // Reject null bytes
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    // Sanitize problematic characters (replace with underscore)
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let sanitized = sanitized.trim().trim_end_matches('.').to_string();

    // Reject empty names and bare dot components
    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        return Err(Error::InvalidFilename(format!(
            "Path component cannot be empty or dots only: '{}'",
            name
        )));
    }

    Ok(sanitized)
}

/// Escape a literal for yt-dlp's output template language.
fn escape_template(literal: &str) -> String {
    literal.replace('%', "%%")
}

/// Build the yt-dlp output template for one pass over a source.
///
/// Channel items are named by upload date, playlist items by position;
/// audio passes are relocated under the `Audio` root.
pub fn output_template(kind: MediaKind, pass: Pass, folder: &str) -> Result<String> {
    let folder = escape_template(&sanitize_path_component(folder)?);
    let item = match kind {
        MediaKind::Channel => CHANNEL_ITEM_TEMPLATE,
        MediaKind::Playlist => PLAYLIST_ITEM_TEMPLATE,
    };

    Ok(match pass.root_folder() {
        Some(root) => format!("./{}/{}/{}", root, folder, item),
        None => format!("./{}/{}", folder, item),
    })
}
