use super::*;
use crate::records;
use patrimonio_api::ImportSummary;
use serde_json::Value;

impl Inventory {
    /// Replace the asset collection and rebuild every index.
    ///
    /// Callers must pass records with a non-blank `asset_id`. Registration
    /// marks, observations and history are left alone: replacing the
    /// inventory does not undo scan progress. The collection is persisted
    /// before the swap, so a failed write leaves the previous state in place.
    pub fn import(&self, assets: Vec<Asset>) -> Result<ImportSummary> {
        let mut state = self.write()?;

        save_value(self.store.as_ref(), ASSETS_KEY, &assets)?;

        let (index, report) = AssetIndex::rebuild(assets, &state.marks);
        state.index = index;
        state.refresh_stats();

        let summary = ImportSummary {
            total: state.stats.total,
            located: state.stats.located,
            pending: state.stats.pending,
            duplicates: report.duplicates,
        };

        tracing::info!(
            "Imported {} assets ({} located, {} pending, {} duplicate ids)",
            summary.total,
            summary.located,
            summary.pending,
            summary.duplicates.len()
        );

        Ok(summary)
    }

    /// Import a parsed JSON payload: an array of flat records.
    ///
    /// Headers are canonicalized and records without an id are dropped
    /// before conversion. Any structural problem aborts the import.
    pub fn import_json(&self, payload: Value) -> Result<ImportSummary> {
        let raw = records::parse_payload(payload)?;
        let assets = records::into_assets(records::prepare_records(raw))?;
        self.import(assets)
    }
}
