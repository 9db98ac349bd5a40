//! Contract for the key-value store the inventory writes through to.
//!
//! Values are opaque JSON documents keyed by a short name. Implementations
//! must finish the write before `save` returns: a successful scan is only
//! reported once its registration mark is on disk.

use crate::error::PersistenceResult;
use serde_json::Value;

/// Name under which the imported asset collection is stored.
pub const ASSETS_KEY: &str = "assets";
/// Name under which the registration-mark map is stored.
pub const REGISTRATIONS_KEY: &str = "registrations";
/// Name under which the scan history is stored.
pub const HISTORY_KEY: &str = "history";
/// Name under which asset observations are stored.
pub const OBSERVATIONS_KEY: &str = "observations";

pub trait PersistenceGateway: Send + Sync {
    /// Store `value` under `name`, replacing any previous value.
    fn save(&self, name: &str, value: &Value) -> PersistenceResult<()>;

    /// Fetch the value stored under `name`, or `None` if nothing was saved yet.
    fn load(&self, name: &str) -> PersistenceResult<Option<Value>>;

    /// Drop the value stored under `name`. Missing names are not an error.
    fn remove(&self, name: &str) -> PersistenceResult<()>;
}
