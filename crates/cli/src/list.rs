use crate::PartitionArg;
use crate::view::{AssetRow, HistoryRow, RegisteredRow, local_time};
use patrimonio_api::InventoryQuery;
use patrimonio_core::Inventory;
use tabled::{Table, settings::Style};

pub fn partition(
    inventory: &dyn InventoryQuery,
    partition: PartitionArg,
    filter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let count = match partition {
        PartitionArg::Located | PartitionArg::Pending => {
            let assets = if partition == PartitionArg::Located {
                inventory.located(filter)
            } else {
                inventory.pending(filter)
            };
            let rows: Vec<AssetRow> = assets.iter().map(AssetRow::from_asset).collect();
            println!("{}", Table::new(&rows).with(Style::psql()));
            rows.len()
        }
        PartitionArg::Registered => {
            let rows: Vec<RegisteredRow> = inventory
                .registered(filter)
                .iter()
                .map(|(asset, at)| RegisteredRow::new(asset, *at))
                .collect();
            println!("{}", Table::new(&rows).with(Style::psql()));
            rows.len()
        }
    };
    println!("{} item(s)", count);
    Ok(())
}

pub fn groups(inventory: &dyn InventoryQuery) -> Result<(), Box<dyn std::error::Error>> {
    for key in inventory.group_keys() {
        println!("{:<24} {}", key, inventory.group_members(&key).len());
    }
    Ok(())
}

pub fn group(
    inventory: &dyn InventoryQuery,
    key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<AssetRow> = inventory
        .group_members(key)
        .iter()
        .map(AssetRow::from_asset)
        .collect();
    if rows.is_empty() {
        println!("No assets in group '{}'", key.trim());
    } else {
        println!("{}", Table::new(&rows).with(Style::psql()));
    }
    Ok(())
}

pub fn show(inventory: &Inventory, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(asset) = inventory.lookup(id) else {
        println!("No asset matches '{}'", id.trim());
        return Ok(());
    };

    println!("{}", serde_json::to_string_pretty(&asset)?);
    match inventory.registration(id) {
        Some(at) => println!("Registered: {}", local_time(at)),
        None => println!("Registered: no"),
    }
    if let Some(observation) = inventory.observation(id) {
        println!("Observation: {}", observation.note);
    }
    Ok(())
}

pub fn history(
    inventory: &dyn InventoryQuery,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<HistoryRow> = inventory
        .recent(limit)
        .iter()
        .map(HistoryRow::from_entry)
        .collect();
    println!("{}", Table::new(&rows).with(Style::psql()));
    Ok(())
}

pub fn stats(inventory: &dyn InventoryQuery) -> Result<(), Box<dyn std::error::Error>> {
    let stats = inventory.stats();
    println!("Total:      {}", stats.total);
    println!("Located:    {} ({}%)", stats.located, stats.percent_located);
    println!("Pending:    {}", stats.pending);
    println!("Registered: {}", stats.registered);
    Ok(())
}
