//! Status command - show freshness of every cached dataset.

use chrono::Local;
use coralert::cache::{CacheStore, DatasetStatus};
use coralert::Dataset;
use console::style;

use super::common::{styled_staleness, Context};
use crate::error::CliError;

/// Run the status command.
pub fn run(ctx: &Context, dataset: Option<Dataset>) -> Result<(), CliError> {
    let store = ctx.open_store()?;
    let datasets: Vec<Dataset> = match dataset {
        Some(d) => vec![d],
        None => Dataset::all().to_vec(),
    };

    println!("Dataset cache: {}", ctx.store_dir.display());
    println!();

    for status in collect(&store, &datasets) {
        print_status(&status);
    }

    Ok(())
}

/// Freshness of each dataset, in the given order.
pub fn collect(store: &CacheStore, datasets: &[Dataset]) -> Vec<DatasetStatus> {
    datasets.iter().map(|d| store.status(d.key())).collect()
}

fn print_status(status: &DatasetStatus) {
    let age = status
        .age_minutes
        .map(coralert::staleness::age_compact)
        .unwrap_or_else(|| "-".to_string());

    match &status.entry {
        Some(entry) => {
            let source = entry
                .source
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!(
                "  {:<14} {} {:>5}  {} bytes, source {}, cached {}",
                status.key,
                styled_staleness(status.staleness),
                age,
                entry.payload.len(),
                source,
                entry.cached_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
            );
        }
        None => {
            println!(
                "  {:<14} {} {:>5}  {}",
                status.key,
                styled_staleness(status.staleness),
                age,
                style("(not cached)").dim(),
            );
        }
    }
}
