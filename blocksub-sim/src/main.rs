//! Block substitution simulator
//!
//! Loads a world fixture, runs the substitution engine over it the way a
//! host would (startup sweep, then deferred region loads in parallel), and
//! optionally writes the rewritten world back out.
//!
//! Usage:
//!   blocksub-sim --world world.json --config-dir config --out rewritten.json

use anyhow::{Context, Result};
use blocksub_config::ConfigStore;
use blocksub_sim::{WorldFixture, simulate};
use clap::Parser;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "blocksub-sim")]
#[command(about = "Run the block substitution engine over a world fixture")]
struct Args {
    /// Directory holding blocksub.json (created with defaults if missing)
    #[arg(short, long, default_value = "config")]
    config_dir: PathBuf,

    /// World fixture to load
    #[arg(short, long)]
    world: PathBuf,

    /// Write the rewritten world fixture here
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = ConfigStore::new(&args.config_dir).load();

    let fixture = load_fixture(&args.world)?;
    let simulation = simulate(&fixture, &config)
        .with_context(|| format!("Failed to build world from {:?}", args.world))?;

    let report = simulation.report;
    info!(
        "Replaced {} cells ({} payloads carried) in {} dirty regions; {} at startup, {} later",
        report.cells_replaced,
        report.payloads_carried,
        report.dirty_regions,
        report.startup_regions,
        report.deferred_regions
    );

    if let Some(out) = &args.out {
        let json = fixture
            .capture(&simulation.world)
            .to_json()
            .context("Failed to serialize rewritten world")?;
        fs::write(out, json + "\n").with_context(|| format!("Failed to write {:?}", out))?;
        info!("Wrote rewritten world to {:?}", out);
    }

    Ok(())
}

fn load_fixture(path: &Path) -> Result<WorldFixture> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    WorldFixture::from_json(&json)
        .with_context(|| format!("Failed to parse world fixture {:?}", path))
}
