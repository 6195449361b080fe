pub fn run() -> anyhow::Result<()> {
    println!("dosesafe {}", env!("CARGO_PKG_VERSION"));
    println!("Prescription safety checks: scan, interactions and a medication assistant");
    Ok(())
}
