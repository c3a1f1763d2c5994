//! Console output utilities.

use std::path::Path;

use console::style;

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     AutoYoutubeDL                                     ║
║     Incremental backups of playlists and channels     ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print the watched locations about to be processed.
pub fn print_config_summary(config_path: &Path, locations: &[std::path::PathBuf]) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Config: {}", config_path.display());
    for location in locations {
        println!("  Watching: {}", location.display());
    }
    println!();
}
