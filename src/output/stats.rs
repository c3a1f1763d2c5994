//! Statistics reporting.

use console::style;

use crate::sync::{RunStats, SyncStats};

/// Print statistics for a single location.
pub fn print_location_stats(stats: &SyncStats) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for {}:", stats.root.display())).bold()
    );
    println!("  Synced:    {}", stats.entries_processed);
    println!("  Up to date: {}", stats.entries_skipped);
    if stats.entries_failed > 0 {
        println!("  Failed:    {}", style(stats.entries_failed).red());
    }
    println!("  Items:     {} downloaded", stats.items_downloaded);
    println!("  Repaired:  {}", stats.groups_repaired);
}

/// Print statistics across all locations.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Locations processed: {}", stats.locations_processed);
    if stats.locations_failed > 0 {
        println!(
            "  Locations failed:    {}",
            style(stats.locations_failed).red()
        );
    }
    println!("  Synced:    {}", stats.entries_processed);
    println!("  Up to date: {}", stats.entries_skipped);
    if stats.entries_failed > 0 {
        println!("  Failed:    {}", style(stats.entries_failed).red());
    }
    println!("  Items:     {} downloaded", stats.items_downloaded);
    println!("  Repaired:  {}", stats.groups_repaired);
    println!("{}", style("═".repeat(50)).dim());
}
