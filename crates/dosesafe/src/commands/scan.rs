use std::path::Path;

use dosesafe_client::ScanService;
use dosesafe_core::ManualMedication;

use super::render::format_scan;
use super::Context;

pub async fn run_image(
    ctx: &Context,
    path: &Path,
    patient_age: u32,
    patient_condition: &str,
) -> anyhow::Result<()> {
    ctx.require_user()?;
    let client = ctx.client()?;
    let service = ScanService::new(&client, &ctx.store);

    println!("Analyzing {}...", path.display());
    let record = service
        .image_scan(path, patient_age, patient_condition)
        .await?;
    print!("{}", format_scan(&record));
    Ok(())
}

pub async fn run_manual(
    ctx: &Context,
    medications: &[ManualMedication],
    patient_age: u32,
    patient_condition: &str,
) -> anyhow::Result<()> {
    ctx.require_user()?;
    let client = ctx.client()?;
    let service = ScanService::new(&client, &ctx.store);

    println!("Analyzing {} medication(s)...", medications.len());
    let record = service
        .manual_scan(medications, patient_age, patient_condition)
        .await?;
    print!("{}", format_scan(&record));
    Ok(())
}
