//! Clear command - remove cached datasets.

use coralert::Dataset;
use tracing::info;

use super::common::Context;
use crate::error::CliError;

/// Run the clear command. Without a dataset, everything is removed.
pub fn run(ctx: &Context, dataset: Option<Dataset>) -> Result<(), CliError> {
    let store = ctx.open_store()?;

    match dataset {
        Some(dataset) => {
            if store.clear(dataset.key())? {
                println!("Cleared {}", dataset);
            } else {
                println!("{} was not cached", dataset);
            }
        }
        None => {
            println!("Clearing dataset cache at: {}", ctx.store_dir.display());
            let removed = store.clear_all()?;
            info!(removed, "Cleared dataset cache");
            println!("Removed {} dataset(s)", removed);
        }
    }

    Ok(())
}
