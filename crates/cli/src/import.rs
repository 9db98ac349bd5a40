use patrimonio_core::Inventory;
use std::path::Path;
use tracing::info;

pub fn run(inventory: &Inventory, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!("Importing records from {}...", file.display());

    let bytes = std::fs::read(file)?;
    let payload: serde_json::Value = serde_json::from_slice(&bytes)?;
    let summary = inventory.import_json(payload)?;

    println!("Imported {} assets", summary.total);
    println!("  located: {}", summary.located);
    println!("  pending: {}", summary.pending);
    if !summary.duplicates.is_empty() {
        println!(
            "  duplicate ids (last record kept): {}",
            summary.duplicates.join(", ")
        );
    }
    Ok(())
}
