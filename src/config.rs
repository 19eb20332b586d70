//! Engine configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::error::DatabaseError;

/// Where the engine keeps its files and how hard it pushes writes to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding `<table>.tbl`, `<table>.schema` and the write log.
    pub data_dir: PathBuf,
    /// File name of the write log inside `data_dir`.
    pub wal_file_name: String,
    /// `sync_data` the write log after every record, not just flush it.
    pub sync_wal: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            wal_file_name: "db.wal".to_string(),
            sync_wal: false,
        }
    }
}

impl EngineConfig {
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text).map_err(|e| DatabaseError::Config {
            details: format!("{}: {}", path.as_ref().display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(DatabaseError::Config {
                details: "data_dir must not be empty".to_string(),
            });
        }
        if self.wal_file_name.is_empty()
            || self.wal_file_name.contains(['/', '\\'])
            || self.wal_file_name.ends_with(".tbl")
            || self.wal_file_name.ends_with(".schema")
        {
            return Err(DatabaseError::Config {
                details: format!("invalid wal_file_name '{}'", self.wal_file_name),
            });
        }
        Ok(())
    }

    pub fn wal_path(&self) -> PathBuf {
        self.data_dir.join(&self.wal_file_name)
    }
}
