//! # ChexMix data sources
//!
//! Turns parsed MeSH and NCBI taxonomy records into the node tables that
//! `chexmix_graph` builds hierarchies from, and caches built tables on disk.
//!
//! ```text
//! records ──build_*_table──▶ Table ──from_table──▶ MeshGraph / TaxonomyGraph
//!                              │
//!                         JsonFileStore
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod mesh;
pub mod source;
pub mod taxonomy;

pub use cache::{cached_or_compute, CacheStore, JsonFileStore};
pub use config::DataConfig;
pub use error::{Result, SourceError};
pub use mesh::{build_mesh_table, MeshDescriptor, MeshSupplement};
pub use source::{CachedSource, MeshRecords, StaticTable, TableSource, TaxonomyRecords};
pub use taxonomy::{build_taxonomy_table, rank_level, TaxonomyRecord, RANKS};

use chexmix_graph::{MeshGraph, TaxonomyGraph};

/// Load `source` and build a MeSH hierarchy from its table.
pub fn mesh_graph(source: &dyn TableSource) -> anyhow::Result<MeshGraph> {
    let table = source.load_table()?;
    Ok(MeshGraph::from_table(&table)?)
}

/// Load `source` and build a taxonomy hierarchy from its table.
pub fn taxonomy_graph(source: &dyn TableSource) -> anyhow::Result<TaxonomyGraph> {
    let table = source.load_table()?;
    Ok(TaxonomyGraph::from_table(&table)?)
}
