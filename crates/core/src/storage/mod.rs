//! Persistence gateway implementations and typed helpers.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use patrimonio_api::{PersistenceError, PersistenceGateway, PersistenceResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Load `name` as `T`, falling back to `T::default()` when nothing is stored
/// or the stored value is unreadable. I/O failures still propagate.
pub fn load_or_default<T>(store: &dyn PersistenceGateway, name: &str) -> PersistenceResult<T>
where
    T: DeserializeOwned + Default,
{
    let value = match store.load(name) {
        Ok(Some(value)) => value,
        Ok(None) => return Ok(T::default()),
        Err(PersistenceError::Json { source, .. }) => {
            tracing::warn!(
                "Stored value '{}' is not valid JSON: {}. Starting empty.",
                name,
                source
            );
            return Ok(T::default());
        }
        Err(e) => return Err(e),
    };

    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            tracing::warn!(
                "Stored value '{}' could not be decoded: {}. Starting empty.",
                name,
                e
            );
            Ok(T::default())
        }
    }
}

/// Load `name` as `T`, or `T::default()` when nothing is stored. An
/// unreadable stored value is an error: the caller must not overwrite it.
pub fn load_required<T>(store: &dyn PersistenceGateway, name: &str) -> PersistenceResult<T>
where
    T: DeserializeOwned + Default,
{
    match store.load(name)? {
        Some(value) => serde_json::from_value(value).map_err(|source| {
            tracing::error!("Stored value '{}' could not be decoded: {}", name, source);
            PersistenceError::Json {
                name: name.to_string(),
                source,
            }
        }),
        None => Ok(T::default()),
    }
}

pub fn save_value<T: Serialize + ?Sized>(
    store: &dyn PersistenceGateway,
    name: &str,
    value: &T,
) -> PersistenceResult<()> {
    let value = serde_json::to_value(value).map_err(|source| PersistenceError::Json {
        name: name.to_string(),
        source,
    })?;
    store.save(name, &value)
}
