use patrimonio_core::config::DataPaths;
use patrimonio_core::storage::FileStore;
use patrimonio_core::{Inventory, Result};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

/// Opens the inventory persisted under `paths`, backed by a file store.
pub fn open_inventory(paths: &DataPaths) -> Result<Arc<Inventory>> {
    let store = FileStore::new(paths.data_dir())?;
    tracing::debug!("Using data directory {}", store.base_dir().display());
    Ok(Arc::new(Inventory::open(Arc::new(store))?))
}

/// Sends inventory logs to `<home>/logs/<component>.<date>.log`.
///
/// A host without a writable log directory keeps running unlogged; the
/// failure is reported once on stderr.
pub fn init_logging(
    paths: &DataPaths,
    component: &str,
    echo_stderr: bool,
) -> Option<WorkerGuard> {
    match patrimonio_core::logging::init_logging(&paths.logs_dir(), component, echo_stderr) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!(
                "patrimonio: logging disabled, cannot write to {}: {e}",
                paths.logs_dir().display()
            );
            None
        }
    }
}
