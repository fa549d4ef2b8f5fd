//! trailmerge CLI - One-shot batch consolidation of Madeira PR routes
//!
//! Usage:
//!   trailmerge-cli --input data/routes.geojson --output public/data/paid_routes.geojson
//!
//! Reads the raw segment collection, fetches the official paid-route list
//! (best effort), merges segments per route and island, and writes the
//! consolidated FeatureCollection. The process exits non-zero only when the
//! input is missing or malformed; an unreachable authority degrades to the
//! all-paid fallback.

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use trailmerge::{
    authority::{AuthoritySource, SimplificaPortal, StatusApi},
    consolidate, read_collection, write_collection,
};

#[derive(Parser)]
#[command(name = "trailmerge-cli")]
#[command(about = "Consolidate Madeira PR trail segments into canonical routes", long_about = None)]
struct Cli {
    /// Input GeoJSON FeatureCollection with raw trail segments
    #[arg(short, long)]
    input: PathBuf,

    /// Output path for the consolidated FeatureCollection
    #[arg(short, long)]
    output: PathBuf,

    /// Override the Simplifica payment portal URL
    #[arg(long)]
    authority_url: Option<String>,

    /// Fetch the paid-route list from a JSON status API instead of the portal
    #[arg(long, conflicts_with = "authority_url")]
    status_api_url: Option<String>,

    /// Skip the authority fetch and apply the all-paid fallback
    #[arg(long)]
    offline: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    println!("{}", "=".repeat(60));
    println!("Madeira PR route consolidation");
    println!("{}", "=".repeat(60));

    let authority = if cli.offline {
        None
    } else if let Some(url) = &cli.status_api_url {
        StatusApi::new(url).fetch()
    } else {
        let portal = match &cli.authority_url {
            Some(url) => SimplificaPortal::new(url),
            None => SimplificaPortal::default(),
        };
        portal.fetch()
    };

    let collection = match read_collection(&cli.input) {
        Ok(collection) => collection,
        Err(err) => {
            eprintln!("Error reading {}: {err}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    let output = match consolidate(&collection, authority.as_ref()) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("Consolidation failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!();
    for route in &output.routes {
        let status = if route.requires_payment { "PAID" } else { "FREE" };
        println!("  ✓ {} ({}) [{}]: {}", route.id, route.island, status, route.name);
    }

    let summary = &output.summary;
    println!("\nSummary:");
    println!("  Paid routes:      {}", summary.paid_routes);
    println!("  Free routes:      {}", summary.free_routes);
    println!("  Total routes:     {}", summary.merged_routes);
    println!("  Merged segments:  {}", summary.input_segments);
    println!("  Skipped features: {}", summary.skipped.total());
    if summary.fallback_used {
        println!("  (authority unavailable, all routes marked as paid)");
    }
    if !summary.unmatched_authority.is_empty() {
        println!(
            "  Authority entries without a route: {}",
            summary.unmatched_authority.join(", ")
        );
    }

    if let Err(err) = write_collection(&cli.output, &output.collection) {
        eprintln!("Error writing {}: {err}", cli.output.display());
        return ExitCode::FAILURE;
    }
    println!(
        "\nWrote {} routes to {}",
        summary.merged_routes,
        cli.output.display()
    );

    ExitCode::SUCCESS
}
