use super::Context;

pub async fn run(ctx: &Context) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let status = client.health().await?;
    println!("Service at {} is up", ctx.config.api_url);
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
