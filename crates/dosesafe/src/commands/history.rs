use dosesafe_core::HistoryFilter;

use super::render::{format_history_row, format_scan};
use super::Context;

pub fn run_list(ctx: &Context, filter: &HistoryFilter) -> anyhow::Result<()> {
    ctx.require_user()?;
    let history = ctx.history();
    let records = history.search(filter);

    if records.is_empty() {
        if filter.is_empty() {
            println!("No scans yet");
        } else {
            println!("No scans match the current filters");
        }
        return Ok(());
    }

    println!("Recent Scans ({})", records.len());
    println!("{}", "=".repeat(60));
    for record in &records {
        println!("{}", format_history_row(record));
    }
    Ok(())
}

/// Opening a saved scan makes it the current result
pub fn run_show(ctx: &Context, id: &str) -> anyhow::Result<()> {
    ctx.require_user()?;
    let record = ctx.history().view(id)?;
    print!("{}", format_scan(&record));
    Ok(())
}

pub fn run_delete(ctx: &Context, id: &str) -> anyhow::Result<()> {
    ctx.require_user()?;
    let history = ctx.history();
    let before = history.read().len();
    let remaining = history.delete(id)?;

    if remaining.len() == before {
        println!("No scan with id {id}");
    } else {
        println!("Deleted scan {id} ({} remaining)", remaining.len());
    }
    Ok(())
}

pub fn run_clear(ctx: &Context) -> anyhow::Result<()> {
    ctx.require_user()?;
    ctx.history().clear()?;
    println!("Cleared scan history");
    Ok(())
}
