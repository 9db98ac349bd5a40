use patrimonio_api::{PersistenceError, PersistenceGateway, PersistenceResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-process store. Writes can be switched off to exercise failure paths.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save`/`remove` fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values
            .read()
            .map(|values| values.contains_key(name))
            .unwrap_or(false)
    }

    fn check_writable(&self, name: &str) -> PersistenceResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(format!(
                "write to '{name}' rejected"
            )));
        }
        Ok(())
    }

    fn poisoned() -> PersistenceError {
        PersistenceError::Unavailable("memory store lock poisoned".to_string())
    }
}

impl PersistenceGateway for MemoryStore {
    fn save(&self, name: &str, value: &Value) -> PersistenceResult<()> {
        self.check_writable(name)?;
        let mut values = self.values.write().map_err(|_| Self::poisoned())?;
        values.insert(name.to_string(), value.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> PersistenceResult<Option<Value>> {
        let values = self.values.read().map_err(|_| Self::poisoned())?;
        Ok(values.get(name).cloned())
    }

    fn remove(&self, name: &str) -> PersistenceResult<()> {
        self.check_writable(name)?;
        let mut values = self.values.write().map_err(|_| Self::poisoned())?;
        values.remove(name);
        Ok(())
    }
}
