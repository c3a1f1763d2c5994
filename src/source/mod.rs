//! Playlist source files.
//!
//! Provides:
//! - Parsing of the human-edited URL list
//! - The bilingual template written for new locations

pub mod parser;
pub mod template;

pub use parser::{parse_line, parse_source, read_source_file, PlaylistEntry};
pub use template::SOURCE_TEMPLATE;
