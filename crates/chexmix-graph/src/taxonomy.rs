//! NCBI taxonomy hierarchy. Each taxon carries its precomputed `lineage`
//! (ancestor ids, root first).

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::error::{GraphError, Result};
use crate::graph::BioGraph;
use crate::hierarchy::{DescendancyCheck, HierarchicalGraph};
use crate::ids::{create_node_id, get_raw_id, Header, NodeId};
use crate::pubtator::BioentityCounts;
use crate::table::Table;
use crate::types::{NodeType, TaxParentType};

pub type TaxonomyGraph = HierarchicalGraph<TaxonomyLineage>;

/// `a` descends from `b` when `b` is listed in `a`'s `lineage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxonomyLineage;

impl DescendancyCheck for TaxonomyLineage {
    fn is_descendant(&self, graph: &BioGraph, descendant: &str, ancestor: &str) -> Result<bool> {
        let lineage = graph.attr(descendant, "lineage")?;
        let lineage = lineage
            .as_array()
            .ok_or_else(|| GraphError::invalid(descendant, "lineage", lineage.to_string()))?;
        Ok(lineage.iter().any(|id| id.as_str() == Some(ancestor)))
    }
}

/// Optional filters for [`TaxonomyGraph::subgraph_from_pubtator_bioentities`].
#[derive(Debug, Clone, Default)]
pub struct BioentityLabelling {
    /// Only these observed tax ids are considered.
    pub targets_to_keep: Option<Vec<u64>>,
    /// `sub_type` given to every node in `optional_type_targets`.
    pub optional_type: Option<String>,
    pub optional_type_targets: Option<Vec<u64>>,
}

fn text_field<'t>(table: &'t Table, id: &str, key: &str) -> Result<&'t str> {
    let row = table
        .get(id)
        .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
    let value = row.get(key).ok_or_else(|| GraphError::missing(id, key))?;
    value
        .as_str()
        .ok_or_else(|| GraphError::invalid(id, key, value.to_string()))
}

fn numeric_raw_id(id: &str) -> Result<u64> {
    get_raw_id(id)
        .as_int()
        .ok_or_else(|| GraphError::InvalidRawId(id.to_string()))
}

impl HierarchicalGraph<TaxonomyLineage> {
    /// Node ids of the `parent_type` taxa (genus or family) of `tax_ids`.
    ///
    /// Ids missing from `table` and taxa with an empty rank name are skipped.
    /// Names are resolved back to ids through every `name` in `table`.
    pub fn get_parents<S: AsRef<str>>(
        tax_ids: &[S],
        table: &Table,
        parent_type: TaxParentType,
    ) -> Result<Vec<NodeId>> {
        let field = parent_type.field();
        let mut names: IndexSet<&str> = IndexSet::new();
        for id in tax_ids {
            let id = id.as_ref();
            if !table.contains_key(id) {
                continue;
            }
            let name = text_field(table, id, field)?;
            if !name.is_empty() {
                names.insert(name);
            }
        }

        let mut by_name: IndexMap<&str, &str> = IndexMap::new();
        for id in table.keys() {
            by_name.insert(text_field(table, id, "name")?, id.as_str());
        }

        names
            .into_iter()
            .map(|name| {
                by_name
                    .get(name)
                    .map(|id| id.to_string())
                    .ok_or_else(|| GraphError::UnknownName(name.to_string()))
            })
            .collect()
    }

    /// Subgraph rooted at the `root_type` parents of the observed taxa.
    ///
    /// Every node gets a `sub_type`: the optional type first, then
    /// `Literature` (with the observed `count`) for observed taxa, then the
    /// root type for the roots themselves. Later labels overwrite earlier ones.
    pub fn subgraph_from_pubtator_bioentities(
        &self,
        table: &Table,
        root_type: TaxParentType,
        bioentities: &BioentityCounts,
        labelling: &BioentityLabelling,
    ) -> Result<TaxonomyGraph> {
        let mut observed: IndexMap<u64, u64> = IndexMap::new();
        for (raw_id, count) in bioentities {
            let tax_id = raw_id
                .as_int()
                .ok_or_else(|| GraphError::InvalidRawId(raw_id.to_string()))?;
            let keep = labelling
                .targets_to_keep
                .as_ref()
                .map_or(true, |keep| keep.contains(&tax_id));
            if keep {
                observed.insert(tax_id, *count);
            }
        }

        let tax_ids: Vec<NodeId> = observed
            .keys()
            .map(|tax_id| create_node_id(Header::Taxonomy, tax_id))
            .collect();
        let root_ids = Self::get_parents(&tax_ids, table, root_type)?;
        let mut subgraph = self.subgraph_from_roots(&root_ids, &[])?;

        for id in subgraph.node_ids() {
            let raw_id = numeric_raw_id(&id)?;
            let Some(attrs) = subgraph.node_attrs_mut(&id) else {
                continue;
            };
            if let (Some(targets), Some(optional)) =
                (&labelling.optional_type_targets, &labelling.optional_type)
            {
                if targets.contains(&raw_id) {
                    attrs.insert("sub_type".to_string(), Value::from(optional.as_str()));
                }
            }
            if let Some(count) = observed.get(&raw_id) {
                attrs.insert("sub_type".to_string(), Value::from(NodeType::Literature));
                attrs.insert("count".to_string(), Value::from(*count));
            }
            if root_ids.contains(&id) {
                attrs.insert("sub_type".to_string(), Value::from(root_type));
            }
        }

        tracing::debug!(
            roots = root_ids.len(),
            nodes = subgraph.node_count(),
            root_type = %root_type,
            "extracted taxonomy subgraph"
        );
        Ok(self.with_graph(subgraph))
    }
}
