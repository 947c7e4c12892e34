//! MeSH descriptor and supplementary-concept records -> MeSH table.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use chexmix_graph::{create_node_id, EdgeType, Header, NodeId, NodeType, Table, RELATIONSHIP};

/// Parsed `DescriptorRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshDescriptor {
    #[serde(rename = "DescriptorUI")]
    pub ui: String,
    #[serde(rename = "DescriptorName")]
    pub name: String,
    #[serde(rename = "TreeNumberList", default)]
    pub tree_numbers: Vec<String>,
}

/// Parsed `SupplementalRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSupplement {
    #[serde(rename = "SupplementalRecordUI")]
    pub ui: String,
    #[serde(rename = "SupplementalRecordName")]
    pub name: String,
    /// Descriptor UIs, optionally `*`-prefixed for major headings
    #[serde(rename = "HeadingMappedToListForIndex", default)]
    pub headings: Vec<String>,
}

fn parent_tree_number(tree_number: &str) -> Option<&str> {
    tree_number.rsplit_once('.').map(|(parent, _)| parent)
}

/// Fewest dotted components over all tree numbers; 0 without any.
fn level(tree_numbers: &[String]) -> usize {
    tree_numbers
        .iter()
        .map(|tn| tn.split('.').count())
        .min()
        .unwrap_or(0)
}

#[derive(Default)]
struct Relationships(IndexMap<NodeId, IndexMap<String, IndexSet<NodeId>>>);

impl Relationships {
    fn link(&mut self, source: &str, target: &str, edge_type: EdgeType) {
        self.push(source, edge_type.as_str().to_string(), target);
        self.push(target, edge_type.reversed(), source);
    }

    fn push(&mut self, node: &str, key: String, neighbour: &str) {
        self.0
            .entry(node.to_string())
            .or_default()
            .entry(key)
            .or_default()
            .insert(neighbour.to_string());
    }

    fn take(&mut self, node: &str) -> Value {
        let rel: Map<String, Value> = self
            .0
            .swap_remove(node)
            .unwrap_or_default()
            .into_iter()
            .map(|(key, ids)| (key, Value::from(ids.into_iter().collect::<Vec<_>>())))
            .collect();
        Value::Object(rel)
    }
}

/// Build the MeSH table.
///
/// A descriptor `INCLUDES` every descriptor holding a tree number whose parent
/// tree number it owns. A supplementary concept is `CONTAINS`-linked from
/// each of its heading descriptors. Dangling parents and headings are logged
/// and skipped.
pub fn build_mesh_table(descriptors: &[MeshDescriptor], supplements: &[MeshSupplement]) -> Table {
    let mut owner: IndexMap<&str, NodeId> = IndexMap::new();
    for descriptor in descriptors {
        let id = create_node_id(Header::MeSHD, &descriptor.ui);
        for tn in &descriptor.tree_numbers {
            owner.insert(tn.as_str(), id.clone());
        }
    }

    let mut relationships = Relationships::default();
    for descriptor in descriptors {
        let id = create_node_id(Header::MeSHD, &descriptor.ui);
        for tn in &descriptor.tree_numbers {
            let Some(parent_tn) = parent_tree_number(tn) else {
                continue;
            };
            match owner.get(parent_tn) {
                Some(parent) => relationships.link(parent, &id, EdgeType::Includes),
                None => tracing::warn!(tree_number = %parent_tn, child = %id, "parent tree number not found"),
            }
        }
    }

    let known: IndexSet<NodeId> = descriptors
        .iter()
        .map(|d| create_node_id(Header::MeSHD, &d.ui))
        .collect();
    for supplement in supplements {
        let id = create_node_id(Header::MeSHC, &supplement.ui);
        for heading in &supplement.headings {
            let heading_id = create_node_id(Header::MeSHD, heading.trim_start_matches('*'));
            if known.contains(&heading_id) {
                relationships.link(&heading_id, &id, EdgeType::Contains);
            } else {
                tracing::warn!(heading = %heading, supplement = %id, "heading does not exist");
            }
        }
    }

    let mut table = Table::new();
    for descriptor in descriptors {
        let id = create_node_id(Header::MeSHD, &descriptor.ui);
        let row = json!({
            "id": id,
            "raw_id": descriptor.ui,
            "name": descriptor.name,
            "type": NodeType::MeSHD,
            "tree_numbers": descriptor.tree_numbers,
            "level": level(&descriptor.tree_numbers),
        });
        if let Value::Object(mut row) = row {
            row.insert(RELATIONSHIP.to_string(), relationships.take(&id));
            table.insert(id, row);
        }
    }
    for supplement in supplements {
        let id = create_node_id(Header::MeSHC, &supplement.ui);
        let row = json!({
            "id": id,
            "raw_id": supplement.ui,
            "name": supplement.name,
            "type": NodeType::MeSHC,
        });
        if let Value::Object(mut row) = row {
            row.insert(RELATIONSHIP.to_string(), relationships.take(&id));
            table.insert(id, row);
        }
    }

    tracing::debug!(
        descriptors = descriptors.len(),
        supplements = supplements.len(),
        "built MeSH table"
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors() -> Vec<MeshDescriptor> {
        serde_json::from_value(json!([
            {"DescriptorUI": "D058729", "DescriptorName": "Peripheral Arterial Disease",
             "TreeNumberList": ["C14.907.137.126.307.500", "C14.907.617.671"]},
            {"DescriptorUI": "D050197", "DescriptorName": "Atherosclerosis", "TreeNumberList": ["C14.907.137.126.307"]},
            {"DescriptorUI": "D001161", "DescriptorName": "Arteriosclerosis", "TreeNumberList": ["C14.907.137.126"]},
            {"DescriptorUI": "D001157", "DescriptorName": "Arterial Occlusive Diseases",
             "TreeNumberList": ["C14.907.137"]},
            {"DescriptorUI": "D014652", "DescriptorName": "Vascular Diseases", "TreeNumberList": ["C14.907"]},
            {"DescriptorUI": "D002318", "DescriptorName": "Cardiovascular Diseases", "TreeNumberList": ["C14"]},
            {"DescriptorUI": "D016491", "DescriptorName": "Peripheral Vascular Diseases",
             "TreeNumberList": ["C14.907.617"]}
        ]))
        .unwrap()
    }

    #[test]
    fn test_levels() {
        let table = build_mesh_table(&descriptors(), &[]);
        assert_eq!(table["MSHD:D058729"]["level"], json!(4));
        assert_eq!(table["MSHD:D050197"]["level"], json!(5));
        assert_eq!(table["MSHD:D002318"]["level"], json!(1));
    }

    #[test]
    fn test_includes_follow_parent_tree_numbers() {
        let table = build_mesh_table(&descriptors(), &[]);
        assert_eq!(
            table["MSHD:D058729"][RELATIONSHIP],
            json!({"_INCLUDES": ["MSHD:D050197", "MSHD:D016491"]})
        );
        assert_eq!(
            table["MSHD:D014652"][RELATIONSHIP]["INCLUDES"],
            json!(["MSHD:D001157", "MSHD:D016491"])
        );
        assert_eq!(table["MSHD:D002318"][RELATIONSHIP]["_INCLUDES"], Value::Null);
    }

    #[test]
    fn test_supplements_are_contained_by_headings() {
        let supplements: Vec<MeshSupplement> = serde_json::from_value(json!([
            {"SupplementalRecordUI": "C565928", "SupplementalRecordName": "Premature atherosclerosis",
             "HeadingMappedToListForIndex": ["*D050197", "D999999"]}
        ]))
        .unwrap();
        let table = build_mesh_table(&descriptors(), &supplements);
        assert_eq!(
            table["MSHC:C565928"][RELATIONSHIP],
            json!({"_CONTAINS": ["MSHD:D050197"]})
        );
        assert_eq!(table["MSHC:C565928"]["type"], json!("MeSH Supplementary Record"));
        assert_eq!(
            table["MSHD:D050197"][RELATIONSHIP]["CONTAINS"],
            json!(["MSHC:C565928"])
        );
    }
}
