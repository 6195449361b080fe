use dosesafe_core::validation::validate_age;
use dosesafe_core::InteractionMedication;

use super::render::format_report;
use super::Context;

pub async fn run(
    ctx: &Context,
    medications: &[InteractionMedication],
    patient_age: u32,
) -> anyhow::Result<()> {
    ctx.require_user()?;
    let patient_age = validate_age(patient_age)?;
    let client = ctx.client()?;

    let report = client.check_interactions(medications, patient_age).await;
    print!("{}", format_report(&report));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_interactions_degrade_to_default_report() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(dir.path());
        ctx.session().login("ana@example.com", "secret1").unwrap();
        let meds: Vec<InteractionMedication> =
            vec!["Warfarin:5mg".parse().unwrap(), "Aspirin".parse().unwrap()];
        assert!(run(&ctx, &meds, 70).await.is_ok());
        assert!(run(&ctx, &meds, 121).await.is_err());
    }
}
