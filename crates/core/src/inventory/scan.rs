use super::*;
use indexmap::IndexMap;
use patrimonio_api::{BatchReport, ScanOutcome, normalize_key};

impl Inventory {
    /// Register a scanned identifier.
    ///
    /// The first scan of a known asset creates its mark and returns
    /// `Success`; later scans return `AlreadyRegistered` with the original
    /// timestamp. The mark map is written through before returning; if the
    /// write fails the mark is dropped again and the error is returned.
    /// Every returned outcome is appended to the history log.
    pub fn register(&self, raw_id: &str) -> Result<ScanOutcome> {
        let scanned = raw_id.trim();
        if scanned.is_empty() {
            return Err(InventoryError::EmptyIdentifier);
        }

        let mut state = self.write()?;
        let outcome = self.transition(&mut state, scanned)?;

        tracing::debug!("Scan '{}' -> {}", scanned, outcome.kind());

        state
            .history
            .append(HistoryEntry::from_outcome(&outcome, Utc::now()));
        if let Err(e) = save_value(self.store.as_ref(), HISTORY_KEY, &state.history.to_vec()) {
            tracing::warn!("Failed to persist scan history: {}", e);
        }

        Ok(outcome)
    }

    fn transition(&self, state: &mut InventoryState, scanned: &str) -> Result<ScanOutcome> {
        let Some(asset) = state.index.lookup(scanned).cloned() else {
            return Ok(ScanOutcome::NotFound {
                asset_id: scanned.to_string(),
            });
        };

        // Marks are keyed by the stored id, not by what the label said
        if let Some(registered_at) = state.marks.get(&asset.asset_id) {
            return Ok(ScanOutcome::AlreadyRegistered {
                asset: asset.as_ref().clone(),
                registered_at: *registered_at,
            });
        }

        let registered_at = Utc::now();
        state.marks.insert(asset.asset_id.clone(), registered_at);

        if let Err(e) = save_value(self.store.as_ref(), REGISTRATIONS_KEY, &state.marks) {
            state.marks.remove(&asset.asset_id);
            tracing::error!("Registration of '{}' not persisted: {}", asset.asset_id, e);
            return Err(e.into());
        }

        state.index.note_registered(&asset, registered_at);
        state.refresh_stats();

        Ok(ScanOutcome::Success {
            asset: asset.as_ref().clone(),
            registered_at,
        })
    }

    /// Register several identifiers in order.
    ///
    /// Identifiers that normalize to the same key collapse to their first
    /// occurrence; blanks are skipped. The batch is not transactional: on
    /// an error it stops, keeps what was already committed and reports the
    /// error alongside the outcomes gathered so far.
    pub fn register_batch<I, S>(&self, ids: I) -> BatchReport<InventoryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: IndexMap<String, String> = IndexMap::new();
        for raw in ids {
            let trimmed = raw.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            unique
                .entry(normalize_key(trimmed))
                .or_insert_with(|| trimmed.to_string());
        }

        let mut report = BatchReport::new();
        for scanned in unique.values() {
            match self.register(scanned) {
                Ok(outcome) => report.push(outcome),
                Err(e) => {
                    tracing::warn!(
                        "Batch stopped at '{}' after {} scan(s): {}",
                        scanned,
                        report.attempted(),
                        e
                    );
                    report.error = Some(e);
                    break;
                }
            }
        }

        tracing::info!(
            "Batch scan: {} registered, {} already registered, {} not found",
            report.success.len(),
            report.already_registered.len(),
            report.not_found.len()
        );
        report
    }

    /// Attach a note to a registered asset.
    ///
    /// The registration mark is left untouched. A later call replaces the
    /// previous observation for the same asset.
    pub fn attach_observation(
        &self,
        raw_id: &str,
        reason: &str,
        moved_to: Option<&str>,
    ) -> Result<Observation> {
        let scanned = raw_id.trim();
        if scanned.is_empty() {
            return Err(InventoryError::EmptyIdentifier);
        }
        if reason.trim().is_empty() {
            return Err(InventoryError::EmptyReason);
        }

        let mut state = self.write()?;
        let asset_id = state
            .index
            .lookup(scanned)
            .map(|a| a.asset_id.clone())
            .ok_or_else(|| InventoryError::NotFound(scanned.to_string()))?;

        if !state.marks.contains_key(&asset_id) {
            return Err(InventoryError::NotRegistered(asset_id));
        }

        let observation = Observation::new(reason, moved_to, Utc::now());
        let previous = state
            .observations
            .insert(asset_id.clone(), observation.clone());

        if let Err(e) = save_value(self.store.as_ref(), OBSERVATIONS_KEY, &state.observations) {
            match previous {
                Some(prev) => state.observations.insert(asset_id, prev),
                None => state.observations.remove(&asset_id),
            };
            return Err(e.into());
        }

        tracing::info!("Observation on '{}': {}", asset_id, observation.note);
        Ok(observation)
    }
}
