//! Init command - write a configuration file with the effective settings.

use super::common::Context;
use crate::error::CliError;

/// Run the init command.
pub fn run(ctx: &Context) -> Result<(), CliError> {
    let existed = ctx.config_path.exists();
    ctx.config.save_to(&ctx.config_path)?;

    if existed {
        println!("Configuration file rewritten: {}", ctx.config_path.display());
    } else {
        println!("Configuration file created: {}", ctx.config_path.display());
    }
    println!("Dataset cache: {}", ctx.store_dir.display());
    println!();
    println!("Edit this file to customize staleness thresholds and advisory ranking.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
