//! Filesystem locations used by the inventory.
//!
//! Resolution order for the home directory: `PATRIMONIO_HOME`, then
//! `~/.patrimonio`. The data directory can be moved on its own with
//! `PATRIMONIO_DATA_DIR`.

use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "PATRIMONIO_HOME";
pub const DATA_DIR_ENV: &str = "PATRIMONIO_DATA_DIR";
pub const DEFAULT_HOME_DIR: &str = ".patrimonio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    home: PathBuf,
    data_dir: PathBuf,
}

impl DataPaths {
    /// Resolve paths from the environment.
    pub fn from_env() -> Self {
        let home = std::env::var(HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home());
        let data_dir = std::env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join("data"));
        Self { home, data_dir }
    }

    /// Root everything under `home`, ignoring the environment.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let data_dir = home.join("data");
        Self { home, data_dir }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.home.join("logs")
    }
}

fn default_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_HOME_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_home_layout() {
        let paths = DataPaths::with_home("/tmp/inv");
        assert_eq!(paths.data_dir(), Path::new("/tmp/inv/data"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/tmp/inv/logs"));
    }
}
