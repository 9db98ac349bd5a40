use patrimonio_api::{PersistenceError, PersistenceGateway, PersistenceResult};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One pretty-printed JSON file per name inside a data directory.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> PersistenceResult<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| PersistenceError::Io {
            name: base_dir.display().to_string(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, name: &str) -> PersistenceResult<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PersistenceError::Unavailable(format!(
                "invalid storage name '{name}'"
            )));
        }
        Ok(self.base_dir.join(format!("{name}.json")))
    }
}

impl PersistenceGateway for FileStore {
    fn save(&self, name: &str, value: &Value) -> PersistenceResult<()> {
        let path = self.path_for(name)?;
        let io_err = |source: std::io::Error| PersistenceError::Io {
            name: name.to_string(),
            source,
        };

        let bytes = serde_json::to_vec_pretty(value).map_err(|source| PersistenceError::Json {
            name: name.to_string(),
            source,
        })?;

        // Flush the temp file to disk before renaming it over the old value
        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);
        fs::rename(&temp_path, &path).map_err(io_err)?;

        tracing::debug!("Saved '{}' to {}", name, path.display());
        Ok(())
    }

    fn load(&self, name: &str) -> PersistenceResult<Option<Value>> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|source| PersistenceError::Io {
            name: name.to_string(),
            source,
        })?;
        let value = serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Json {
            name: name.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn remove(&self, name: &str) -> PersistenceResult<()> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }
}
