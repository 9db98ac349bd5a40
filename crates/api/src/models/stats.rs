use serde::{Deserialize, Serialize};

/// Partition counts over the current inventory.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total: usize,
    pub located: usize,
    pub pending: usize,
    /// Global mark count. Marks outlive imports, so this may exceed `total`.
    pub registered: usize,
    pub percent_located: u32,
}

/// Summary returned by an import.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total: usize,
    pub located: usize,
    pub pending: usize,
    /// Normalized keys that appeared more than once. The last record wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicates: Vec<String>,
}
