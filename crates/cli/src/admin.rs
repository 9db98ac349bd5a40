use patrimonio_core::Inventory;
use tracing::{info, warn};

pub fn check(inventory: &Inventory) -> Result<(), Box<dyn std::error::Error>> {
    let drifted = inventory.verify();
    if drifted.is_empty() {
        println!("All partitions consistent.");
        return Ok(());
    }
    warn!("Partitions out of step: {}", drifted.join(", "));
    Err(format!("partitions out of step: {}", drifted.join(", ")).into())
}

pub fn clear_marks(inventory: &Inventory) -> Result<(), Box<dyn std::error::Error>> {
    let cleared = inventory.clear_registrations()?;
    info!("Cleared {} registration(s).", cleared);
    println!("Cleared {} registration(s).", cleared);
    Ok(())
}

pub fn reset(inventory: &Inventory) -> Result<(), Box<dyn std::error::Error>> {
    inventory.reset()?;
    println!("Inventory, registrations and history removed.");
    Ok(())
}
