use chrono::{DateTime, Local, Utc};
use patrimonio_api::{Asset, HistoryEntry};
use tabled::Tabled;

/// Terminal row for a plain asset listing
#[derive(Tabled)]
pub struct AssetRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Unit")]
    pub unit: String,
    #[tabled(rename = "Group")]
    pub group: String,
}

impl AssetRow {
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            id: asset.asset_id.clone(),
            description: truncate(asset.description.as_deref().unwrap_or("-"), 48),
            unit: or_dash(asset.destination_unit.as_deref()),
            group: or_dash(asset.destination_group.as_deref()),
        }
    }
}

#[derive(Tabled)]
pub struct RegisteredRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Registered")]
    pub registered_at: String,
}

impl RegisteredRow {
    pub fn new(asset: &Asset, at: DateTime<Utc>) -> Self {
        Self {
            id: asset.asset_id.clone(),
            description: truncate(asset.description.as_deref().unwrap_or("-"), 48),
            registered_at: local_time(at),
        }
    }
}

#[derive(Tabled)]
pub struct HistoryRow {
    #[tabled(rename = "When")]
    pub when: String,
    #[tabled(rename = "Outcome")]
    pub kind: String,
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Note")]
    pub note: String,
}

impl HistoryRow {
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            when: local_time(entry.timestamp),
            kind: entry.kind.to_string(),
            id: entry.asset_id.clone(),
            note: or_dash(entry.note.as_deref()),
        }
    }
}

pub fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
