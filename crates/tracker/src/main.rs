//! Obojima Party Tracker
//!
//! Run with: cargo run -p tracker
//!
//! Examples:
//!   cargo run -p tracker -- --fallback default-data.json
//!   cargo run -p tracker -- --date 327-Sep-13
//!   cargo run -p tracker -- --watch --refresh-secs 60

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tracker::config::{parse_date_arg, TrackerConfig};
use tracker::render;
use tracker::state::TrackerState;

/// Obojima Party Tracker
#[derive(Parser, Debug)]
#[command(name = "obojima-tracker")]
#[command(about = "Calendar and adventure log tracker for the Obojima campaign")]
struct Args {
    /// Remote snapshot URL (overrides TRACKER_SOURCE_URL)
    #[arg(long)]
    source_url: Option<String>,

    /// Local fallback snapshot file (overrides TRACKER_FALLBACK_PATH)
    #[arg(long)]
    fallback: Option<PathBuf>,

    /// Refresh interval in seconds for watch mode (overrides TRACKER_REFRESH_SECS)
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// Date to select, e.g. 327-Sep-13 (defaults to the snapshot's current date)
    #[arg(long)]
    date: Option<String>,

    /// Keep running and re-fetch on the refresh interval
    #[arg(long)]
    watch: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = TrackerConfig::from_env();
    if let Some(url) = args.source_url {
        config.source_url = Some(url);
    }
    if let Some(path) = args.fallback {
        config.fallback_path = path;
    }
    if let Some(secs) = args.refresh_secs {
        config.refresh_interval = Duration::from_secs(secs);
    }

    let mut state = TrackerState::new();
    if !state.refresh(&config) {
        let reason = state.last_error.as_deref().unwrap_or("unknown error");
        eprintln!("failed to load snapshot: {}", reason);
        std::process::exit(1);
    }

    loop {
        if let Some(current) = &state.current {
            let selected = match &args.date {
                Some(arg) => match parse_date_arg(arg, current.date.era) {
                    Some(date) => date,
                    None => {
                        eprintln!("unusable --date {:?}, expected e.g. 327-Sep-13", arg);
                        std::process::exit(2);
                    }
                },
                None => current.date,
            };
            print!("{}", render::render_tracker(current, &selected));
        }

        if !args.watch {
            break;
        }
        // Stopping the process is the only cancellation primitive; an
        // in-flight fetch is never aborted mid-cycle.
        std::thread::sleep(config.refresh_interval);
        state.refresh(&config);
    }
}
