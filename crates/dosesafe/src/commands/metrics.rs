use dosesafe_core::MetricsTracker;

use super::render::format_metrics;
use super::Context;

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    ctx.require_user()?;
    let tracker = MetricsTracker::new(&ctx.store);
    println!("{}", format_metrics(&tracker.metrics()));
    Ok(())
}
