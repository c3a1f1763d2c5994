//! Media module: source kinds, audio modes and remote metadata.

pub mod kind;
pub mod metadata;

pub use kind::{AudioMode, MediaKind, Pass};
pub use metadata::RemoteMetadata;
