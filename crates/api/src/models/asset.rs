use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single inventoried item as delivered by an import.
///
/// Only `asset_id` is interpreted by the registry; every other field is
/// carried through untouched. Columns outside the known set land in `extra`
/// so a round trip through storage never drops data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Destination unit. Blank or absent means the asset is still pending.
    #[serde(default, rename = "uorg", skip_serializing_if = "Option::is_none")]
    pub destination_unit: Option<String>,
    /// Destination group, used by the secondary grouping index.
    #[serde(default, rename = "group", skip_serializing_if = "Option::is_none")]
    pub destination_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Asset {
    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            description: None,
            category: None,
            value: None,
            destination_unit: None,
            destination_group: None,
            site: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.destination_unit = Some(unit.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.destination_group = Some(group.into());
        self
    }

    /// Key used by the primary index.
    pub fn key(&self) -> String {
        normalize_key(&self.asset_id)
    }

    /// An asset is located once it has a non-blank destination unit.
    pub fn is_located(&self) -> bool {
        non_blank(self.destination_unit.as_deref()).is_some()
    }

    /// Trimmed destination group, if any.
    pub fn group_key(&self) -> Option<&str> {
        non_blank(self.destination_group.as_deref())
    }
}

/// Canonical lookup key for an asset identifier: trimmed and uppercased.
///
/// Index construction and lookups must both go through this function,
/// otherwise scans silently miss imported assets.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
