//! Table caching.
//!
//! Building a MeSH or taxonomy table from raw records is slow, so built tables
//! are kept as one JSON document per key and reused until a rebuild is forced.

use std::fs;
use std::path::{Path, PathBuf};

use chexmix_graph::Table;

use crate::error::{Result, SourceError};

pub trait CacheStore {
    /// `Ok(None)` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<Table>>;
    fn save(&self, key: &str, table: &Table) -> Result<()>;
}

/// Stores each table at `<dir>/<key>.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CacheStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Table>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(|e| SourceError::io(&path, e))?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, key: &str, table: &Table) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| SourceError::io(&self.dir, e))?;
        let path = self.path_for(key);
        let bytes = serde_json::to_vec(table)?;
        fs::write(&path, bytes).map_err(|e| SourceError::io(&path, e))
    }
}

/// Return the table stored under `key`, or build it with `compute` and store
/// the result. `force` skips the lookup but still refreshes the store.
pub fn cached_or_compute<F>(
    store: &dyn CacheStore,
    key: &str,
    force: bool,
    compute: F,
) -> anyhow::Result<Table>
where
    F: FnOnce() -> anyhow::Result<Table>,
{
    if force {
        tracing::info!(key, "cache bypassed, rebuilding table");
    } else if let Some(table) = store.load(key)? {
        tracing::info!(key, rows = table.len(), "loaded cached table");
        return Ok(table);
    }

    let table = compute()?;
    store.save(key, &table)?;
    tracing::info!(key, rows = table.len(), "saved table to cache");
    Ok(table)
}
