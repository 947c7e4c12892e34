//! MeSH hierarchy: descriptors ordered by tree-number prefix, supplementary
//! concepts attached to the descriptors that `CONTAINS` them.

use serde_json::Value;

use crate::error::{GraphError, Result};
use crate::graph::BioGraph;
use crate::hierarchy::{DescendancyCheck, HierarchicalGraph};
use crate::ids::{create_node_id, get_header, Header, NodeId};
use crate::pubtator::BioentityCounts;
use crate::table::RELATIONSHIP;
use crate::types::EdgeType;

pub type MeshGraph = HierarchicalGraph<MeshAncestry>;

/// `a` descends from `b` when one of `a`'s tree numbers starts with one of
/// `b`'s. Supplementary concepts borrow the tree numbers of their descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshAncestry;

impl MeshAncestry {
    fn descriptors<'g>(graph: &'g BioGraph, id: &'g str) -> Result<Vec<&'g str>> {
        if get_header(id) != Header::MeSHC.as_str() {
            return Ok(vec![id]);
        }
        let attrs = graph.node_attrs(id)?;
        let Some(relationship) = attrs.get(RELATIONSHIP) else {
            // No stored relationship: fall back to the CONTAINS edges.
            return Ok(graph
                .predecessors(id)
                .filter(|source| {
                    graph.edge_data(source, id).map_or(false, |parallel| {
                        parallel
                            .iter()
                            .any(|a| a.get("type").and_then(Value::as_str) == Some(EdgeType::Contains.as_str()))
                    })
                })
                .collect());
        };
        let key = EdgeType::Contains.reversed();
        let containing = relationship
            .get(&key)
            .ok_or_else(|| GraphError::missing(id, &key))?;
        string_list(id, RELATIONSHIP, containing)
    }

    fn tree_numbers<'g>(graph: &'g BioGraph, id: &str) -> Result<Vec<&'g str>> {
        string_list(id, "tree_numbers", graph.attr(id, "tree_numbers")?)
    }
}

impl DescendancyCheck for MeshAncestry {
    fn is_descendant(&self, graph: &BioGraph, descendant: &str, ancestor: &str) -> Result<bool> {
        let lower = Self::descriptors(graph, descendant)?;
        let upper = Self::descriptors(graph, ancestor)?;
        for d1 in &lower {
            let tns1 = Self::tree_numbers(graph, d1)?;
            for d2 in &upper {
                let tns2 = Self::tree_numbers(graph, d2)?;
                if tns1.iter().any(|tn1| tns2.iter().any(|tn2| tn1.starts_with(tn2))) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

fn string_list<'v>(id: &str, key: &str, value: &'v Value) -> Result<Vec<&'v str>> {
    let items = value
        .as_array()
        .ok_or_else(|| GraphError::invalid(id, key, value.to_string()))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| GraphError::invalid(id, key, item.to_string()))
        })
        .collect()
}

impl HierarchicalGraph<MeshAncestry> {
    /// Node id for a raw MeSH UI: descriptors start with `D`, everything else
    /// is a supplementary concept.
    pub fn mesh_node_id_from(raw_id: &str) -> NodeId {
        let header = if raw_id.starts_with('D') {
            Header::MeSHD
        } else {
            Header::MeSHC
        };
        create_node_id(header, raw_id)
    }

    /// Observed entities plus all of their ancestors, each observed node
    /// annotated with its `count`.
    pub fn subgraph_from_pubtator_bioentities(&self, bioentities: &BioentityCounts) -> Result<MeshGraph> {
        let observed: Vec<(NodeId, u64)> = bioentities
            .iter()
            .map(|(raw_id, count)| (Self::mesh_node_id_from(&raw_id.to_string()), *count))
            .collect();
        let leaves: Vec<&str> = observed.iter().map(|(id, _)| id.as_str()).collect();

        let mut subgraph = self.subgraph_from_leaves(&leaves, &[])?;
        for (id, count) in &observed {
            if let Some(attrs) = subgraph.node_attrs_mut(id) {
                attrs.insert("count".to_string(), Value::from(*count));
            }
        }
        tracing::debug!(
            observed = observed.len(),
            nodes = subgraph.node_count(),
            "extracted MeSH ancestry subgraph"
        );
        Ok(self.with_graph(subgraph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::RawId;
    use crate::table::Table;
    use serde_json::json;

    fn mesh_table() -> Table {
        let rows = json!({
            "MSHD:D003920": {
                "id": "MSHD:D003920", "raw_id": "D003920", "name": "Diabetes Mellitus",
                "tree_numbers": ["C18.452.394.750", "C19.246"], "level": 2,
                "relationship": {"CONTAINS": ["MSHC:C565928"]}
            },
            "MSHD:D050197": {
                "id": "MSHD:D050197", "raw_id": "D050197", "name": "Atherosclerosis",
                "tree_numbers": ["C14.907.137.126.307"], "level": 5,
                "relationship": {"INCLUDES": ["MSHD:D058729"], "CONTAINS": ["MSHC:C565928"]}
            },
            "MSHD:D058729": {
                "id": "MSHD:D058729", "raw_id": "D058729", "name": "Peripheral Arterial Disease",
                "tree_numbers": ["C14.907.137.126.307.500", "C14.907.617.671"], "level": 4,
                "relationship": {"_INCLUDES": ["MSHD:D050197"]}
            },
            "MSHC:C565928": {
                "id": "MSHC:C565928", "raw_id": "C565928",
                "name": "Atherosclerosis, Premature, with Deafness, Nephropathy, Diabetes Mellitus, Photomyoclonus, and Degenerative Neurologic Disease",
                "relationship": {"_CONTAINS": ["MSHD:D050197", "MSHD:D003920"]}
            }
        });
        let order = ["MSHD:D003920", "MSHD:D050197", "MSHD:D058729", "MSHC:C565928"];
        order
            .iter()
            .map(|id| (id.to_string(), rows[id].as_object().cloned().unwrap()))
            .collect()
    }

    #[test]
    fn test_mesh_node_id_from() {
        for (id, row) in mesh_table() {
            let raw = row["raw_id"].as_str().unwrap();
            assert_eq!(MeshGraph::mesh_node_id_from(raw), id);
        }
    }

    #[test]
    fn test_subgraph_from_pubtator_bioentities() {
        let graph = MeshGraph::from_table(&mesh_table()).unwrap();
        let mut observed = BioentityCounts::new();
        observed.insert(RawId::from("D058729"), 1);
        let subgraph = graph.subgraph_from_pubtator_bioentities(&observed).unwrap();
        assert_eq!(subgraph.node_ids(), vec!["MSHD:D058729", "MSHD:D050197"]);
        assert_eq!(subgraph.node("MSHD:D058729").unwrap()["count"], json!(1));
        assert!(subgraph.node("MSHD:D050197").unwrap().get("count").is_none());
    }

    #[test]
    fn test_is_descendant() {
        let graph = MeshGraph::from_table(&mesh_table()).unwrap();
        assert!(graph.is_descendant("MSHD:D058729", "MSHD:D050197").unwrap());
        assert!(graph.is_descendant("MSHD:D058729", "MSHC:C565928").unwrap());
        assert!(!graph.is_descendant("MSHD:D050197", "MSHD:D058729").unwrap());
        assert!(!graph.is_descendant("MSHD:D003920", "MSHD:D050197").unwrap());
    }

    #[test]
    fn test_missing_contains_list_is_an_error() {
        let mut table = mesh_table();
        if let Some(row) = table.get_mut("MSHC:C565928") {
            row.insert(RELATIONSHIP.to_string(), json!({}));
        }
        let graph = MeshGraph::from_table(&table).unwrap();
        assert!(matches!(
            graph.is_descendant("MSHC:C565928", "MSHD:D050197"),
            Err(GraphError::MissingAttribute { key, .. }) if key == "_CONTAINS"
        ));
    }

    #[test]
    fn test_supplement_falls_back_to_contains_edges() {
        let (mut nodes, edges) = crate::table::nodes_and_edges_from_table(&mesh_table()).unwrap();
        for (_, attrs) in nodes.iter_mut() {
            attrs.remove(RELATIONSHIP);
        }
        let graph = MeshGraph::new(BioGraph::new(nodes, edges), MeshAncestry);
        assert!(graph.is_descendant("MSHC:C565928", "MSHD:D050197").unwrap());
        assert!(graph.is_descendant("MSHC:C565928", "MSHD:D003920").unwrap());
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let graph = MeshGraph::from_table(&mesh_table()).unwrap();
        assert!(matches!(
            graph.is_descendant("MSHD:D000000", "MSHD:D050197"),
            Err(GraphError::UnknownNode(_))
        ));
    }
}
