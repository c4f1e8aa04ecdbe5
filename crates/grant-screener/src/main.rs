//! Grant Screening CLI
//!
//! Extracts grants from FAD dumps and screens them against one protection
//! constraint.
//!
//! Usage:
//!   screen-grants --uut fad/uut.json --th fad/th1.json --th fad/th2.json \
//!                 --constraint constraint.json --output report.json

use anyhow::Result;
use clap::Parser;
use grant_screener::{loader, screen, ConstantTerrain};
use interference::{get_grant_objects_from_fad, Haversine};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(
    name = "screen-grants",
    about = "Screen FAD grants against a CBRS protection constraint"
)]
struct Args {
    /// FAD dump of the SAS under test
    #[arg(short, long)]
    uut: PathBuf,

    /// FAD dump of a test-harness SAS (repeatable)
    #[arg(long = "th")]
    th: Vec<PathBuf>,

    /// Protection constraint JSON file
    #[arg(short, long)]
    constraint: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "screening_report.json")]
    output: PathBuf,

    /// Terrain elevation in meters used to convert AMSL heights
    #[arg(long, default_value_t = 0.0)]
    terrain_elevation: f64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over --verbose
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{}", "=".repeat(60));
    info!("CBRS Grant Screener");
    info!("{}", "=".repeat(60));

    let (uut, th) = loader::load_all_dumps(&args.uut, &args.th)?;
    let constraint = loader::load_constraint(&args.constraint)?;

    let terrain = ConstantTerrain(args.terrain_elevation);
    let grants = get_grant_objects_from_fad(&uut, &th, &terrain)?;

    let report = screen(&grants, &constraint, &Haversine)?;

    info!("Writing report to {:?}", args.output);
    let file = File::create(&args.output)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;

    info!("{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    info!(
        "Neighborhood grants: {} of {}",
        report.neighborhood_grants.len(),
        report.total_grants
    );
    for channel in &report.channels {
        info!(
            "  {:.1}-{:.1} MHz: {} overlapping grants",
            channel.low_frequency / 1e6,
            channel.high_frequency / 1e6,
            channel.overlapping_grants.len()
        );
    }

    Ok(())
}
