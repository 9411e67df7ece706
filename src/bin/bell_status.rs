//! Print the current bell status as JSON.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use flexi_logger::Logger;
use log::info;

use bell_schedule::clock::{Clock, FixedClock, SystemClock};
use bell_schedule::config::EngineConfig;
use bell_schedule::engine::BellEngine;
use bell_schedule::feed::JsonFileFeed;
use bell_schedule::presentation::PresentationMapper;

#[derive(Debug, Parser)]
#[command(
    name = "bell-status",
    about = "Resolve the school bell status from a calendar feed"
)]
struct Args {
    /// Calendar feed: a JSON array of calendar rows.
    #[arg(long, value_name = "FILE")]
    feed: PathBuf,

    /// Engine config (JSON). Defaults apply when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Resolve at this instant (RFC 3339) instead of now.
    #[arg(long, value_name = "TIME", conflicts_with = "watch")]
    at: Option<DateTime<Utc>>,

    /// Keep resolving every poll interval.
    #[arg(long)]
    watch: bool,

    /// Print the display form (headline, label, detail, color).
    #[arg(long)]
    present: bool,
}

fn main() -> anyhow::Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?
        .log_to_stderr()
        .start()?;

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match args.at {
        Some(at) => run(&args, &config, FixedClock::new(at)),
        None => run(&args, &config, SystemClock),
    }
}

fn run<C: Clock>(args: &Args, config: &EngineConfig, clock: C) -> anyhow::Result<()> {
    let feed = JsonFileFeed::new(&args.feed);
    let mut engine = BellEngine::new(feed, clock, config)?;
    info!(
        "resolving in {} with cutoff minute {}",
        config.timezone, config.cutoff_minute
    );

    loop {
        let resolution = engine.resolve_now();
        let line = if args.present {
            serde_json::to_string(&PresentationMapper::present(&resolution))?
        } else {
            serde_json::to_string(&resolution)?
        };
        println!("{line}");

        if !args.watch {
            return Ok(());
        }
        std::thread::sleep(config.poll_interval());
    }
}
