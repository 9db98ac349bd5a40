use super::*;

impl Inventory {
    /// Drop every stored value and start from an empty inventory.
    pub fn reset(&self) -> Result<()> {
        let mut state = self.write()?;

        for name in [REGISTRATIONS_KEY, OBSERVATIONS_KEY, HISTORY_KEY, ASSETS_KEY] {
            self.store.remove(name)?;
        }

        *state = InventoryState::empty();
        tracing::info!("Inventory reset");
        Ok(())
    }

    /// Remove all registration marks (and the observations that hang off
    /// them). The asset collection and history stay.
    pub fn clear_registrations(&self) -> Result<usize> {
        let mut state = self.write()?;
        let cleared = state.marks.len();

        save_value(self.store.as_ref(), REGISTRATIONS_KEY, &RegistrationMarks::new())?;
        save_value(self.store.as_ref(), OBSERVATIONS_KEY, &Observations::new())?;

        state.marks.clear();
        state.observations.clear();
        let assets = state.index.assets().iter().map(|a| a.as_ref().clone()).collect();
        let (index, _) = AssetIndex::rebuild(assets, &state.marks);
        state.index = index;
        state.refresh_stats();

        tracing::info!("Cleared {} registration(s)", cleared);
        Ok(cleared)
    }

    /// Names of partitions whose materialized contents no longer match a
    /// fresh derivation from the collection and the mark map.
    pub fn verify(&self) -> Vec<&'static str> {
        let state = self.read();
        state.index.drift(&state.marks)
    }
}
