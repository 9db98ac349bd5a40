use crate::view::local_time;
use patrimonio_api::{OutcomeKind, ScanOutcome};
use patrimonio_core::Inventory;

pub fn run(inventory: &Inventory, ids: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    if let [id] = ids {
        let outcome = inventory.register(id)?;
        print_outcome(&outcome);
        return Ok(());
    }

    let report = inventory.register_batch(ids);
    for outcome in report
        .success
        .iter()
        .chain(&report.already_registered)
        .chain(&report.not_found)
    {
        print_outcome(outcome);
    }

    println!(
        "\n{} registered, {} already registered, {} not found",
        report.count(OutcomeKind::Success),
        report.count(OutcomeKind::AlreadyRegistered),
        report.count(OutcomeKind::NotFound)
    );

    match report.error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn print_outcome(outcome: &ScanOutcome) {
    match outcome {
        ScanOutcome::Success { asset, .. } => println!(
            "[ok]       {} {}",
            asset.asset_id,
            asset.description.as_deref().unwrap_or("")
        ),
        ScanOutcome::AlreadyRegistered {
            asset,
            registered_at,
        } => println!(
            "[repeat]   {} registered at {}",
            asset.asset_id,
            local_time(*registered_at)
        ),
        ScanOutcome::NotFound { asset_id } => println!("[missing]  {}", asset_id),
    }
}

pub fn observe(
    inventory: &Inventory,
    id: &str,
    reason: &str,
    moved_to: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let observation = inventory.attach_observation(id, reason, moved_to)?;
    println!("{}: {}", id.trim(), observation.note);
    Ok(())
}
