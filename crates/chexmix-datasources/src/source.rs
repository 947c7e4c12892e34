//! Named providers of node tables.

use chexmix_graph::Table;

use crate::cache::{cached_or_compute, CacheStore, JsonFileStore};
use crate::config::DataConfig;
use crate::mesh::{build_mesh_table, MeshDescriptor, MeshSupplement};
use crate::taxonomy::{build_taxonomy_table, TaxonomyRecord};

pub trait TableSource {
    /// Stable name, also used as the cache key
    fn name(&self) -> &str;
    fn load_table(&self) -> anyhow::Result<Table>;
}

/// A table that is already in memory.
#[derive(Debug, Clone)]
pub struct StaticTable {
    name: String,
    table: Table,
}

impl StaticTable {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

impl TableSource for StaticTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_table(&self) -> anyhow::Result<Table> {
        Ok(self.table.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeshRecords {
    pub descriptors: Vec<MeshDescriptor>,
    pub supplements: Vec<MeshSupplement>,
}

impl TableSource for MeshRecords {
    fn name(&self) -> &str {
        "mesh"
    }

    fn load_table(&self) -> anyhow::Result<Table> {
        Ok(build_mesh_table(&self.descriptors, &self.supplements))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaxonomyRecords {
    pub records: Vec<TaxonomyRecord>,
}

impl TableSource for TaxonomyRecords {
    fn name(&self) -> &str {
        "taxonomy"
    }

    fn load_table(&self) -> anyhow::Result<Table> {
        Ok(build_taxonomy_table(&self.records)?)
    }
}

/// Wraps another source and caches its table under the inner source's name.
pub struct CachedSource<S, C = JsonFileStore> {
    inner: S,
    store: C,
    force: bool,
}

impl<S: TableSource, C: CacheStore> CachedSource<S, C> {
    pub fn new(inner: S, store: C, force: bool) -> Self {
        Self { inner, store, force }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: TableSource> CachedSource<S> {
    /// Cache under `data_path`; rebuilds every time when caching is disabled.
    pub fn from_config(inner: S, config: &DataConfig) -> Self {
        Self::new(inner, JsonFileStore::new(&config.data_path), !config.enable_cache)
    }
}

impl<S: TableSource, C: CacheStore> TableSource for CachedSource<S, C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn load_table(&self) -> anyhow::Result<Table> {
        cached_or_compute(&self.store, self.inner.name(), self.force, || {
            self.inner.load_table()
        })
    }
}
