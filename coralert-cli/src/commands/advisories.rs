//! Advisories command - rank the cached incidents, rain gauges and alerts.

use std::sync::Arc;

use coralert::advisory::{AdvisoryCard, Prioritizer};
use coralert::SystemClock;
use console::style;

use super::common::Context;
use crate::error::CliError;

/// Run the advisories command.
pub fn run(ctx: &Context, json: bool) -> Result<(), CliError> {
    let cards = rank(ctx)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("No advisories.");
        return Ok(());
    }

    for card in &cards {
        print_card(card);
    }
    Ok(())
}

/// Ranked cards from the cached datasets.
pub fn rank(ctx: &Context) -> Result<Vec<AdvisoryCard>, CliError> {
    let store = ctx.open_store()?;
    let prioritizer = Prioritizer::new(ctx.config.advisory.clone(), Arc::new(SystemClock));
    Ok(prioritizer.rank_cached(&store))
}

fn print_card(card: &AdvisoryCard) {
    let tag = format!("{:<16}", card.color_key.as_str());
    let tag = match card.priority {
        0 | 1 => style(tag).red().bold(),
        2 | 3 => style(tag).red(),
        4 | 5 => style(tag).yellow(),
        _ => style(tag).cyan(),
    };
    println!("[{}] {} {}", card.priority, tag, card.title);
    if !card.description.is_empty() {
        println!("    {}", card.description);
    }
    if let Some(location) = card.location {
        println!("    at {}", style(location).dim());
    }
}
