//! The inventory store: asset collection, indices, registration marks,
//! observations, scan history and cached statistics behind one lock.
//!
//! Mutations (import, scan, observation, reset) hold the write lock for
//! their whole duration, persistence write included. Readers therefore
//! never see indices built from one collection next to marks from another.

use crate::error::{InventoryError, Result};
use crate::history::HistoryLog;
use crate::index::{AssetIndex, RegistrationMarks};
use crate::stats;
use crate::storage::{load_or_default, load_required, save_value};
use crate::util::TextFilter;
use chrono::{DateTime, Utc};
use patrimonio_api::persistence::{
    ASSETS_KEY, HISTORY_KEY, OBSERVATIONS_KEY, REGISTRATIONS_KEY,
};
use patrimonio_api::{
    Asset, HistoryEntry, InventoryQuery, InventoryStats, Observation, PersistenceGateway,
};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod import;
mod lifecycle;
mod scan;

pub type Observations = BTreeMap<String, Observation>;

pub(crate) struct InventoryState {
    pub(crate) index: AssetIndex,
    pub(crate) marks: RegistrationMarks,
    pub(crate) observations: Observations,
    pub(crate) history: HistoryLog,
    pub(crate) stats: InventoryStats,
}

impl InventoryState {
    fn empty() -> Self {
        Self {
            index: AssetIndex::empty(),
            marks: RegistrationMarks::new(),
            observations: Observations::new(),
            history: HistoryLog::default(),
            stats: InventoryStats::default(),
        }
    }

    fn refresh_stats(&mut self) {
        self.stats = stats::compute(&self.index, &self.marks);
    }
}

pub struct Inventory {
    store: Arc<dyn PersistenceGateway>,
    state: RwLock<InventoryState>,
}

impl Inventory {
    /// Load persisted state from `store` and build the indices.
    ///
    /// Fails if the stored collection, marks or observations are unreadable.
    /// Only the history log falls back to empty.
    pub fn open(store: Arc<dyn PersistenceGateway>) -> Result<Self> {
        let assets: Vec<Asset> = load_required(store.as_ref(), ASSETS_KEY)?;
        let marks: RegistrationMarks = load_required(store.as_ref(), REGISTRATIONS_KEY)?;
        let observations: Observations = load_required(store.as_ref(), OBSERVATIONS_KEY)?;
        let history: Vec<HistoryEntry> = load_or_default(store.as_ref(), HISTORY_KEY)?;

        let (index, report) = AssetIndex::rebuild(assets, &marks);
        if !report.duplicates.is_empty() {
            tracing::warn!(
                "Stored collection has {} duplicate id(s)",
                report.duplicates.len()
            );
        }

        let mut state = InventoryState {
            index,
            marks,
            observations,
            history: HistoryLog::from_entries(history),
            stats: InventoryStats::default(),
        };
        state.refresh_stats();

        tracing::info!(
            "Inventory opened: {} assets, {} registrations, {} history entries",
            state.stats.total,
            state.stats.registered,
            state.history.len()
        );

        Ok(Self {
            store,
            state: RwLock::new(state),
        })
    }

    // ---- Queries ----

    pub fn lookup(&self, raw_id: &str) -> Option<Asset> {
        self.read().index.lookup(raw_id).map(|a| a.as_ref().clone())
    }

    pub fn located(&self, filter: Option<&str>) -> Vec<Asset> {
        let filter = TextFilter::new(filter);
        to_owned(self.read().index.located(filter.as_ref()))
    }

    pub fn pending(&self, filter: Option<&str>) -> Vec<Asset> {
        let filter = TextFilter::new(filter);
        to_owned(self.read().index.pending(filter.as_ref()))
    }

    pub fn registered(&self, filter: Option<&str>) -> Vec<(Asset, DateTime<Utc>)> {
        let filter = TextFilter::new(filter);
        let state = self.read();
        state
            .index
            .registered(&state.marks, filter.as_ref())
            .into_iter()
            .map(|(asset, at)| (asset.as_ref().clone(), at))
            .collect()
    }

    pub fn group_members(&self, group: &str) -> Vec<Asset> {
        self.read()
            .index
            .group_members(group)
            .iter()
            .map(|a| a.as_ref().clone())
            .collect()
    }

    pub fn group_keys(&self) -> Vec<String> {
        self.read().index.group_keys()
    }

    pub fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        self.read().history.recent(n)
    }

    pub fn stats(&self) -> InventoryStats {
        self.read().stats
    }

    /// Registration time for an asset, looked up by its canonical id.
    pub fn registration(&self, raw_id: &str) -> Option<DateTime<Utc>> {
        let state = self.read();
        let asset = state.index.lookup(raw_id)?;
        state.marks.get(&asset.asset_id).copied()
    }

    pub fn observation(&self, raw_id: &str) -> Option<Observation> {
        let state = self.read();
        let asset = state.index.lookup(raw_id)?;
        state.observations.get(&asset.asset_id).cloned()
    }

    // ---- Lock helpers ----

    // Every mutation either completes or restores the previous value before
    // returning, so a poisoned lock still guards consistent data for readers.
    fn read(&self) -> RwLockReadGuard<'_, InventoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, InventoryState>> {
        self.state.write().map_err(|_| InventoryError::Poisoned)
    }
}

impl InventoryQuery for Inventory {
    fn lookup(&self, asset_id: &str) -> Option<Asset> {
        Inventory::lookup(self, asset_id)
    }

    fn located(&self, filter: Option<&str>) -> Vec<Asset> {
        Inventory::located(self, filter)
    }

    fn pending(&self, filter: Option<&str>) -> Vec<Asset> {
        Inventory::pending(self, filter)
    }

    fn registered(&self, filter: Option<&str>) -> Vec<(Asset, DateTime<Utc>)> {
        Inventory::registered(self, filter)
    }

    fn group_members(&self, group: &str) -> Vec<Asset> {
        Inventory::group_members(self, group)
    }

    fn group_keys(&self) -> Vec<String> {
        Inventory::group_keys(self)
    }

    fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        Inventory::recent(self, n)
    }

    fn stats(&self) -> InventoryStats {
        Inventory::stats(self)
    }
}

fn to_owned(list: Vec<Arc<Asset>>) -> Vec<Asset> {
    list.into_iter().map(|a| a.as_ref().clone()).collect()
}
