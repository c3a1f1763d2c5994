//! Filesystem module.
//!
//! Provides:
//! - Installation and watched-location layout
//! - Output naming templates
//! - The run lock

pub mod lock;
pub mod naming;
pub mod paths;

pub use lock::RunLock;
pub use naming::{output_template, sanitize_path_component};
pub use paths::{
    default_home, ensure_dir, prepare_location, HomePaths, WatchedLocation, SOURCE_FILE_NAME,
    STORE_FILE_NAME,
};
