//! Read-only view handed to rendering collaborators.

use crate::models::{Asset, HistoryEntry, InventoryStats};
use chrono::{DateTime, Utc};

pub trait InventoryQuery: Send + Sync {
    /// Find an asset by identifier, ignoring case and surrounding whitespace.
    fn lookup(&self, asset_id: &str) -> Option<Asset>;

    /// Assets with a destination unit, ascending by id.
    fn located(&self, filter: Option<&str>) -> Vec<Asset>;

    /// Assets without a destination unit, ascending by id.
    fn pending(&self, filter: Option<&str>) -> Vec<Asset>;

    /// Registered assets with their mark time, most recent first.
    fn registered(&self, filter: Option<&str>) -> Vec<(Asset, DateTime<Utc>)>;

    fn group_members(&self, group: &str) -> Vec<Asset>;

    fn group_keys(&self) -> Vec<String>;

    fn recent(&self, n: usize) -> Vec<HistoryEntry>;

    fn stats(&self) -> InventoryStats;
}
