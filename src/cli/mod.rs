//! Command-line interface.

pub mod args;
pub mod startup;

pub use args::Args;
pub use startup::begin_run;
