mod annotation;
mod cli;
mod filter;
mod library;
mod norm;
mod pipeline;
mod reads;
mod stages;
mod types;

use anyhow::Result;
use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    // Initialize tracing subscriber
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            if args.quiet {
                EnvFilter::new("warn")
            } else {
                EnvFilter::new("info")
            }
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let stats = pipeline::run(&args)?;
    tracing::info!(
        total_read_length = stats.total_read_length,
        records_kept = stats.records_kept,
        records_dropped = stats.records_dropped,
        normalization_factor = stats.normalization_factor,
        "tequant-rs: processing complete"
    );
    Ok(())
}
