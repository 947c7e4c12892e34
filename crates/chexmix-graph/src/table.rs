//! Tabular form of a graph: `node id -> attributes`, with edges folded into a
//! per-node `relationship` map of `edge type -> [neighbour ids]`.
//!
//! Forward edge types list targets on the source row; `_`-prefixed reverse
//! types list sources on the target row. Only forward keys produce edges when
//! a table is turned back into a graph.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{GraphError, Result};
use crate::graph::{edge_attr, BioGraph, EdgeAttr, NodeAttr};
use crate::ids::{get_header, reverse_prefix, Header, NodeId};

pub type Table = IndexMap<NodeId, NodeAttr>;

pub const RELATIONSHIP: &str = "relationship";

pub type NodeList = Vec<(NodeId, NodeAttr)>;
pub type EdgeList = Vec<(NodeId, NodeId, EdgeAttr)>;

fn push_neighbour(relationship: &mut Map<String, Value>, edge_type: String, neighbour: &str) {
    let entry = relationship
        .entry(edge_type)
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(list) = entry {
        list.push(Value::from(neighbour));
    }
}

impl BioGraph {
    /// Snapshot of the graph as a [`Table`]. The graph is not modified.
    pub fn get_table(&self) -> Result<Table> {
        let mut relationships: IndexMap<&str, Map<String, Value>> =
            self.nodes().map(|(id, _)| (id, Map::new())).collect();

        for (source, target, attrs) in self.edges() {
            let edge_type = attrs
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| GraphError::missing(&format!("{source}->{target}"), "type"))?;
            if let Some(rel) = relationships.get_mut(source) {
                push_neighbour(rel, edge_type.to_string(), target);
            }
            if let Some(rel) = relationships.get_mut(target) {
                push_neighbour(rel, reverse_prefix(edge_type), source);
            }
        }

        Ok(self
            .nodes()
            .map(|(id, attrs)| {
                let mut row = attrs.clone();
                let rel = relationships.swap_remove(id).unwrap_or_default();
                row.insert(RELATIONSHIP.to_string(), Value::Object(rel));
                (id.to_string(), row)
            })
            .collect())
    }

    /// Rebuild a graph from a [`Table`].
    pub fn from_table(table: &Table) -> Result<BioGraph> {
        let (nodes, edges) = nodes_and_edges_from_table(table)?;
        Ok(BioGraph::new(nodes, edges))
    }
}

/// Split a table into node and edge lists.
///
/// `relationship` is dropped from node attributes except on MeSH
/// supplementary records, which resolve their descriptors through it. Edges
/// come from the forward (non-`_`) relationship keys with `{type: key}`.
pub fn nodes_and_edges_from_table(table: &Table) -> Result<(NodeList, EdgeList)> {
    let mut nodes = Vec::with_capacity(table.len());
    let mut edges = Vec::new();

    for (id, row) in table {
        let relationship = row
            .get(RELATIONSHIP)
            .ok_or_else(|| GraphError::missing(id, RELATIONSHIP))?;
        let relationship = relationship
            .as_object()
            .ok_or_else(|| GraphError::invalid(id, RELATIONSHIP, relationship.to_string()))?;

        for (edge_type, neighbours) in relationship {
            if edge_type.starts_with('_') {
                continue;
            }
            let neighbours = neighbours
                .as_array()
                .ok_or_else(|| GraphError::invalid(id, RELATIONSHIP, neighbours.to_string()))?;
            for neighbour in neighbours {
                let target = neighbour
                    .as_str()
                    .ok_or_else(|| GraphError::invalid(id, RELATIONSHIP, neighbour.to_string()))?;
                edges.push((id.clone(), target.to_string(), edge_attr(edge_type)));
            }
        }

        let mut attrs = row.clone();
        if get_header(id) != Header::MeSHC.as_str() {
            attrs.remove(RELATIONSHIP);
        }
        nodes.push((id.clone(), attrs));
    }

    Ok((nodes, edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> NodeAttr {
        value.as_object().cloned().unwrap_or_default()
    }

    fn sample() -> BioGraph {
        let nodes = vec![
            ("2 : node2".to_string(), row(json!({"type": "genus", "count": 0}))),
            ("2.1 : node21".to_string(), row(json!({"type": "Literature", "count": 3}))),
            ("2.2 : node22".to_string(), row(json!({"type": "Literature", "count": 1}))),
        ];
        let edges = vec![
            ("2 : node2".to_string(), "2.1 : node21".to_string(), edge_attr("test")),
            ("2 : node2".to_string(), "2.1 : node21".to_string(), edge_attr("test2")),
            ("2.1 : node21".to_string(), "2.2 : node22".to_string(), edge_attr("test")),
        ];
        BioGraph::new(nodes, edges)
    }

    #[test]
    fn test_get_table() {
        let graph = sample();
        let table = graph.get_table().unwrap();
        assert_eq!(table.len(), 3);

        let rel = table["2.1 : node21"][RELATIONSHIP].as_object().unwrap();
        assert_eq!(rel.len(), 3);
        assert_eq!(rel["test"], json!(["2.2 : node22"]));
        assert_eq!(rel["_test"], json!(["2 : node2"]));
        assert_eq!(rel["_test2"], json!(["2 : node2"]));
        assert_eq!(table["2 : node2"][RELATIONSHIP]["test"], json!(["2.1 : node21"]));

        // The graph itself carries no relationship attribute.
        assert!(graph.node("2 : node2").unwrap().get(RELATIONSHIP).is_none());
    }

    #[test]
    fn test_from_table_rebuilds_forward_edges() {
        let graph = sample();
        let rebuilt = BioGraph::from_table(&graph.get_table().unwrap()).unwrap();
        assert_eq!(rebuilt.node_ids(), graph.node_ids());
        assert_eq!(rebuilt.edge_count(), 3);
        assert!(rebuilt.contains_edge("2 : node2", "2.1 : node21", &edge_attr("test2")));
        assert!(rebuilt.node("2.1 : node21").unwrap().get(RELATIONSHIP).is_none());
    }

    #[test]
    fn test_supplementary_records_keep_relationship() {
        let mut table = Table::new();
        table.insert(
            "MSHD:D050197".to_string(),
            row(json!({"relationship": {"CONTAINS": ["MSHC:C565928"]}})),
        );
        table.insert(
            "MSHC:C565928".to_string(),
            row(json!({"relationship": {"_CONTAINS": ["MSHD:D050197"]}})),
        );
        let (nodes, edges) = nodes_and_edges_from_table(&table).unwrap();
        assert!(nodes[0].1.get(RELATIONSHIP).is_none());
        assert_eq!(nodes[1].1[RELATIONSHIP]["_CONTAINS"], json!(["MSHD:D050197"]));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].0, "MSHD:D050197");
    }

    #[test]
    fn test_missing_relationship_is_an_error() {
        let mut table = Table::new();
        table.insert("TAXO:1".to_string(), row(json!({"name": "root"})));
        assert!(matches!(
            nodes_and_edges_from_table(&table),
            Err(GraphError::MissingAttribute { key, .. }) if key == RELATIONSHIP
        ));
    }
}
