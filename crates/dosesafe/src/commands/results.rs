use dosesafe_core::chatbot::save_context;

use super::render::format_scan;
use super::Context;

pub fn run(ctx: &Context, ask: bool, clear: bool) -> anyhow::Result<()> {
    ctx.require_user()?;
    let history = ctx.history();

    if clear {
        history.clear_latest()?;
        println!("Cleared current result");
        return Ok(());
    }

    let Some(record) = history.latest() else {
        println!("No results yet. Run `dosesafe scan` to analyze a prescription.");
        return Ok(());
    };

    if ask {
        save_context(&ctx.store, &record.chatbot_context())?;
        println!("Saved this result for the assistant. Run `dosesafe chat` to ask about it.");
        return Ok(());
    }

    print!("{}", format_scan(&record));
    Ok(())
}
