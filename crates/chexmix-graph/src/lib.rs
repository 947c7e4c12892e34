//! ChexMix BioGraph: typed directed multigraphs of biological entities
//!
//! One concrete container, [`BioGraph`], holds nodes and parallel edges with
//! attribute maps and provides the set algebra and traversals. Ontologies
//! attach an ancestry strategy to it:
//!
//! ```text
//!                  ┌──────────────────────────┐
//!                  │         BioGraph         │
//!                  │ nodes · edges · algebra  │
//!                  └────────────┬─────────────┘
//!          ┌────────────────────┼─────────────────────┐
//!          ▼                    ▼                     ▼
//!   HierarchicalGraph     PubMedGraph           PubTatorGraph
//!   <DescendancyCheck>    keyword → article     entity → article
//!     ├─ MeshAncestry
//!     ├─ TaxonomyLineage
//!     └─ ClassyFireLineage
//! ```
//!
//! ## Identifiers
//!
//! Every node id is `HEADER:RAWID` with a four-character header naming the
//! source ontology (see [`ids`]).
//!
//! ## Tables
//!
//! Graphs round-trip through a nested `id -> attributes` form with a
//! synthesized `relationship` map (see [`table`]); the MeSH and taxonomy
//! ingestion layers produce this form.

pub mod classyfire;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod ids;
pub mod mesh;
pub mod pubmed;
pub mod pubtator;
pub mod sources;
pub mod table;
pub mod taxonomy;
pub mod types;

pub use classyfire::{ChemOntoTerm, ClassyFireEntity, ClassyFireGraph, ClassyFireLineage};
pub use error::{GraphError, Result};
pub use graph::{edge_attr, BioGraph, EdgeAttr, NodeAttr};
pub use hierarchy::{DescendancyCheck, HierarchicalGraph};
pub use ids::{create_node_id, get_header, get_raw_id, reverse_prefix, Header, NodeId, RawId};
pub use mesh::{MeshAncestry, MeshGraph};
pub use pubmed::PubMedGraph;
pub use pubtator::{BioentityCounts, PubTatorGraph, PubTatorTable};
pub use sources::{ArticleRecord, PubMedSearch, PubTatorAnnotations};
pub use table::{Table, RELATIONSHIP};
pub use taxonomy::{BioentityLabelling, TaxonomyGraph, TaxonomyLineage};
pub use types::{mesh_category, EdgeType, NodeType, TaxParentType};
