use crate::config::Config;
use crate::model::Roster;
use clap::Parser;
use eyre::WrapErr;
use std::path::PathBuf;
use tracing::{Level, info, warn};

mod checks;
mod config;
mod display;
mod error;
mod loaders;
mod model;
mod stats;

#[derive(Parser)]
#[command(version, author, about)]
struct Args {
    /// Use FILE instead of rstudents.toml
    #[arg(short, long, value_name = "FILE", default_value = "rstudents.toml")]
    config: PathBuf,
    /// Read students from FILE instead of the configured source
    #[arg(long, value_name = "FILE")]
    source: Option<PathBuf>,
    /// Write students to FILE instead of the configured destination
    #[arg(long, value_name = "FILE")]
    destination: Option<PathBuf>,
    /// Add POINTS to every score if all of them stay within [0, 100]
    #[arg(short, long, value_name = "POINTS", allow_hyphen_values = true)]
    bonus: Option<i32>,
    /// Sort students before displaying and saving them
    #[arg(short, long)]
    sort: bool,
    /// Do not write back results to the destination file
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Display score statistics
    #[arg(long)]
    stats: bool,
    /// Set verbosity level
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let mut config = Config::load(&args.config).wrap_err("cannot load configuration file")?;
    if let Some(source) = args.source {
        config.files.source = source;
    }
    if let Some(destination) = args.destination {
        config.files.destination = destination;
    }
    let mut roster = Roster::new(config.files);
    if let Err(e) = roster.load() {
        // The roster is empty but still usable.
        warn!("continuing without students: {e}");
    }
    checks::check_duplicate_ids(&roster);
    checks::check_score_range(&roster);
    if let Some(points) = args.bonus {
        match roster.bonify_scores(points) {
            Ok(()) => info!(points, "bonus applied to {} students", roster.len()),
            Err(e) => println!("Bonus of {points} points not applied: {e}"),
        }
    }
    if args.sort {
        roster.sort();
    }
    display::display_roster(&roster);
    if args.stats {
        display::display_stats(stats::statistics(&roster));
    }
    if !args.dry_run {
        save_roster(&roster);
    }
    Ok(())
}

/// Save the roster, reporting a failure without aborting.
fn save_roster(roster: &Roster) -> bool {
    match roster.save() {
        Ok(()) => true,
        Err(e) => {
            warn!(
                "students not saved to {}: {e}",
                roster.files().destination.display()
            );
            false
        }
    }
}
