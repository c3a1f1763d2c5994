//! Output module for console output, logging and progress.
//!
//! Provides:
//! - Colored console output
//! - Log file setup
//! - Progress spinner
//! - Statistics reporting

pub mod console;
pub mod logging;
pub mod progress;
pub mod stats;

pub use console::{print_banner, print_config_summary, print_error, print_warning};
pub use logging::{init_logging, log_run_timestamp};
pub use progress::create_spinner;
pub use stats::{print_location_stats, print_run_stats};
