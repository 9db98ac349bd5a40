//! Derived lookup structures over the imported asset collection.
//!
//! `AssetIndex` is always built from scratch: a rebuild produces a fresh
//! value that replaces the old one wholesale, so no caller can observe a
//! partially populated index.

use crate::util::TextFilter;
use chrono::{DateTime, Utc};
use patrimonio_api::{Asset, normalize_key};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Registration marks keyed by the asset id exactly as imported.
pub type RegistrationMarks = BTreeMap<String, DateTime<Utc>>;

/// Outcome of a rebuild that callers may want to surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Normalized keys seen more than once. The last occurrence is indexed.
    pub duplicates: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    /// Every asset in import order, duplicates included
    assets: Vec<Arc<Asset>>,
    /// Normalized id -> asset (last write wins)
    primary: HashMap<String, Arc<Asset>>,
    /// Trimmed destination group -> members in import order
    groups: HashMap<String, Vec<Arc<Asset>>>,
    located: Vec<Arc<Asset>>,
    pending: Vec<Arc<Asset>>,
    registered: Vec<(Arc<Asset>, DateTime<Utc>)>,
}

impl AssetIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build every index in one pass over `assets`.
    pub fn rebuild(assets: Vec<Asset>, marks: &RegistrationMarks) -> (Self, RebuildReport) {
        let mut index = Self {
            assets: Vec::with_capacity(assets.len()),
            primary: HashMap::with_capacity(assets.len()),
            ..Self::default()
        };
        let mut duplicates = Vec::new();
        let mut reported = HashSet::new();

        for asset in assets {
            let asset = Arc::new(asset);
            let key = asset.key();

            if index.primary.insert(key.clone(), asset.clone()).is_some() {
                tracing::warn!(
                    "Duplicate asset id '{}' in import; keeping the later record",
                    asset.asset_id
                );
                if reported.insert(key.clone()) {
                    duplicates.push(key);
                }
            }

            if let Some(group) = asset.group_key() {
                index
                    .groups
                    .entry(group.to_string())
                    .or_default()
                    .push(asset.clone());
            }

            if asset.is_located() {
                index.located.push(asset.clone());
            } else {
                index.pending.push(asset.clone());
            }

            if let Some(at) = marks.get(&asset.asset_id) {
                index.registered.push((asset.clone(), *at));
            }

            index.assets.push(asset);
        }

        index.located.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));
        index.pending.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));
        sort_by_mark(&mut index.registered);

        (index, RebuildReport { duplicates })
    }

    /// Find an asset by scanned or typed identifier.
    pub fn lookup(&self, raw_id: &str) -> Option<&Arc<Asset>> {
        self.primary.get(&normalize_key(raw_id))
    }

    pub fn group_members(&self, group: &str) -> &[Arc<Asset>] {
        self.groups
            .get(group.trim())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn group_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.groups.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn located(&self, filter: Option<&TextFilter>) -> Vec<Arc<Asset>> {
        filtered(&self.located, filter)
    }

    pub fn pending(&self, filter: Option<&TextFilter>) -> Vec<Arc<Asset>> {
        filtered(&self.pending, filter)
    }

    /// Registered assets derived from the live mark map, not from the
    /// partition captured at rebuild time.
    pub fn registered(
        &self,
        marks: &RegistrationMarks,
        filter: Option<&TextFilter>,
    ) -> Vec<(Arc<Asset>, DateTime<Utc>)> {
        let mut members: Vec<_> = registered_members(&self.assets, marks)
            .into_iter()
            .filter(|(asset, _)| filter.is_none_or(|f| f.matches(asset)))
            .collect();
        sort_by_mark(&mut members);
        members
    }

    /// Keep the materialized registered partition in step with a new mark.
    pub fn note_registered(&mut self, asset: &Arc<Asset>, at: DateTime<Utc>) {
        for candidate in self.assets.iter().filter(|a| a.asset_id == asset.asset_id) {
            self.registered.push((candidate.clone(), at));
        }
        sort_by_mark(&mut self.registered);
    }

    /// Check the materialized partitions against a fresh derivation from
    /// the collection and `marks`. Returns the names of drifted partitions.
    pub fn drift(&self, marks: &RegistrationMarks) -> Vec<&'static str> {
        let (fresh, _) = Self::rebuild(
            self.assets.iter().map(|a| a.as_ref().clone()).collect(),
            marks,
        );
        let mut drifted = Vec::new();
        if ids(&self.located) != ids(&fresh.located) {
            drifted.push("located");
        }
        if ids(&self.pending) != ids(&fresh.pending) {
            drifted.push("pending");
        }
        if marked_ids(&self.registered) != marked_ids(&fresh.registered) {
            drifted.push("registered");
        }
        drifted
    }

    pub fn assets(&self) -> &[Arc<Asset>] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn located_count(&self) -> usize {
        self.located.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn ids(list: &[Arc<Asset>]) -> Vec<&str> {
    list.iter().map(|a| a.asset_id.as_str()).collect()
}

fn marked_ids(list: &[(Arc<Asset>, DateTime<Utc>)]) -> Vec<(&str, DateTime<Utc>)> {
    list.iter().map(|(a, at)| (a.asset_id.as_str(), *at)).collect()
}

fn registered_members(
    assets: &[Arc<Asset>],
    marks: &RegistrationMarks,
) -> Vec<(Arc<Asset>, DateTime<Utc>)> {
    assets
        .iter()
        .filter_map(|asset| marks.get(&asset.asset_id).map(|at| (asset.clone(), *at)))
        .collect()
}

// Most recent first; ties fall back to id so the order is stable.
fn sort_by_mark(list: &mut [(Arc<Asset>, DateTime<Utc>)]) {
    list.sort_by(|(a, at_a), (b, at_b)| at_b.cmp(at_a).then_with(|| a.asset_id.cmp(&b.asset_id)));
}

fn filtered(list: &[Arc<Asset>], filter: Option<&TextFilter>) -> Vec<Arc<Asset>> {
    match filter {
        Some(f) => list.iter().filter(|a| f.matches(a)).cloned().collect(),
        None => list.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Vec<Asset> {
        vec![
            Asset::new("300").with_unit("FIN").with_group("ADM"),
            Asset::new("100").with_description("Mesa de reunião"),
            Asset::new("200").with_unit("RH").with_group(" ADM "),
            Asset::new("050").with_group("TI"),
        ]
    }

    #[test]
    fn test_partitions_are_disjoint_and_sorted() {
        let (index, report) = AssetIndex::rebuild(sample(), &RegistrationMarks::new());
        assert!(report.duplicates.is_empty());

        let located: Vec<_> = index.located(None).iter().map(|a| a.asset_id.clone()).collect();
        let pending: Vec<_> = index.pending(None).iter().map(|a| a.asset_id.clone()).collect();
        assert_eq!(located, vec!["200", "300"]);
        assert_eq!(pending, vec!["050", "100"]);
        assert_eq!(index.len(), located.len() + pending.len());
    }

    #[test]
    fn test_lookup_normalizes_input() {
        let (index, _) = AssetIndex::rebuild(vec![Asset::new(" ab-1 ")], &RegistrationMarks::new());
        assert!(index.lookup("AB-1").is_some());
        assert!(index.lookup("  ab-1\n").is_some());
        assert!(index.lookup("ab-2").is_none());
    }

    #[test]
    fn test_groups_use_trimmed_keys() {
        let (index, _) = AssetIndex::rebuild(sample(), &RegistrationMarks::new());
        assert_eq!(index.group_keys(), vec!["ADM", "TI"]);
        assert_eq!(index.group_members("ADM").len(), 2);
        assert_eq!(index.group_members(" TI ").len(), 1);
        assert!(index.group_members("NOPE").is_empty());
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        let assets = vec![
            Asset::new("x1").with_description("first"),
            Asset::new("X1 ").with_description("second"),
        ];
        let (index, report) = AssetIndex::rebuild(assets, &RegistrationMarks::new());
        assert_eq!(report.duplicates, vec!["X1"]);
        assert_eq!(
            index.lookup("x1").unwrap().description.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_duplicate_records_both_stay_in_partitions() {
        let assets = vec![
            Asset::new("X1").with_description("first"),
            Asset::new("X1").with_description("second").with_unit("FIN"),
        ];
        let mut marks = RegistrationMarks::new();
        marks.insert("X1".to_string(), Utc::now());
        let (index, _) = AssetIndex::rebuild(assets, &marks);

        assert_eq!(index.len(), 2);
        assert_eq!(index.located_count() + index.pending_count(), 2);
        let descs: Vec<_> = index
            .registered(&marks, None)
            .iter()
            .map(|(a, _)| a.description.clone())
            .collect();
        assert_eq!(descs, vec![Some("first".to_string()), Some("second".to_string())]);
    }

    #[test]
    fn test_registered_follows_live_marks() {
        let now = Utc::now();
        let mut marks = RegistrationMarks::new();
        marks.insert("100".to_string(), now - Duration::minutes(5));
        let (mut index, _) = AssetIndex::rebuild(sample(), &marks);
        assert_eq!(index.registered(&marks, None).len(), 1);

        marks.insert("300".to_string(), now);
        let live = index.registered(&marks, None);
        assert_eq!(live[0].0.asset_id, "300");
        assert_eq!(live[1].0.asset_id, "100");

        assert_eq!(index.drift(&marks), vec!["registered"]);
        let asset = index.lookup("300").unwrap().clone();
        index.note_registered(&asset, now);
        assert!(index.drift(&marks).is_empty());
    }

    #[test]
    fn test_filter_is_accent_insensitive() {
        let (index, _) = AssetIndex::rebuild(sample(), &RegistrationMarks::new());
        let filter = TextFilter::new(Some("REUNIAO"));
        let hits = index.pending(filter.as_ref());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].asset_id, "100");
    }
}
