//! AutoYoutubeDL - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use auto_youtube_dl::{
    cli::{begin_run, Args},
    config::{validate_config, Config},
    error::Error,
    fs::prepare_location,
    output::{
        print_banner, print_config_summary, print_error, print_location_stats, print_run_stats,
        print_warning,
    },
    repair::FfmpegRemuxer,
    sync::{sync_location, RunContext, RunStats},
    ytdlp::{YtDlpExecutor, YtDlpResolver},
};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = run().await {
        tracing::error!("{:#}", e);
        print_error(&format!("{:#}", e));
    }
    // Failures are reported through the logs; the scheduler never sees them.
    ExitCode::SUCCESS
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();
    let paths = args.home_paths();

    // Take the lock before touching any log or state file
    let Some(_lock) = begin_run(&paths, args.debug).with_context(|| {
        format!("Failed to start run in {}", paths.home.display())
    })?
    else {
        return Ok(());
    };
    print_banner();

    // Load configuration
    let config = match Config::load_or_init(&paths.config) {
        Ok(config) => config,
        Err(Error::MissingConfig(path)) => {
            print_warning(&format!(
                "Please fill configuration file {} and run again.",
                path.display()
            ));
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to load configuration"),
    };
    validate_config(&config).with_context(|| {
        format!(
            "Invalid configuration in {}, please fix it and run again",
            paths.config.display()
        )
    })?;
    print_config_summary(&paths.config, config.watched_paths());

    let ctx = RunContext {
        resolver: Arc::new(YtDlpResolver::new(config.downloader.yt_dlp.clone())),
        executor: Arc::new(YtDlpExecutor::new(config.downloader.yt_dlp.clone())),
        remuxer: Arc::new(FfmpegRemuxer::new(config.downloader.ffmpeg.clone())),
        today: chrono::Local::now().date_naive(),
        log_progress: args.log_progress,
        skip_repair: args.skip_repair,
        interactive: console::Term::stdout().is_term(),
        config,
    };

    let mut run_stats = RunStats::default();

    // Process each watched location
    for root in ctx.config.watched_paths() {
        tracing::info!("Checking {}", root.display());

        let location = match prepare_location(root) {
            Ok(Some(location)) => location,
            Ok(None) => continue,
            Err(e) => {
                tracing::error!("Failed to prepare {}: {}", root.display(), e);
                run_stats.mark_location_failed();
                continue;
            }
        };

        match sync_location(&ctx, &location).await {
            Ok(stats) => {
                print_location_stats(&stats);
                run_stats.add_location_stats(&stats);
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", root.display(), e);
                run_stats.mark_location_failed();
            }
        }
    }

    print_run_stats(&run_stats);
    tracing::info!("Done");

    Ok(())
}
