use std::path::Path;

use tempfile::TempDir;

use crate::{executor::engine::Engine, types::error::DatabaseError};

/// A data directory that is removed when dropped, with an engine on top.
pub struct TempDatabase {
    dir: TempDir,
    engine: Option<Engine>,
}

impl TempDatabase {
    pub fn with_prefix(prefix: &str) -> Result<Self, DatabaseError> {
        let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
        Ok(Self { dir, engine: None })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open an engine over the directory, replacing any previous one.
    pub fn create_engine(&mut self) -> Result<&mut Engine, DatabaseError> {
        let engine = Engine::open_dir(self.dir.path())?;
        Ok(self.engine.insert(engine))
    }

    /// Drop the current engine and open a fresh one over the same files.
    /// Nothing is cached across the reopen except what is on disk.
    pub fn reopen(&mut self) -> Result<&mut Engine, DatabaseError> {
        self.engine = None;
        self.create_engine()
    }
}
