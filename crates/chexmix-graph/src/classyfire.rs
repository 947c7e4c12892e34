//! ClassyFire chemical ontology: one linear lineage per classified chemical,
//! merged into a single graph.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{GraphError, Result};
use crate::graph::{edge_attr, BioGraph, NodeAttr};
use crate::hierarchy::{DescendancyCheck, HierarchicalGraph};
use crate::ids::{create_node_id, Header, NodeId};
use crate::table::{EdgeList, NodeList};
use crate::types::{EdgeType, NodeType};

pub type ClassyFireGraph = HierarchicalGraph<ClassyFireLineage>;

/// Level names, in lineage order. Lineages longer than this are truncated.
pub const LEVEL_INDEX: [&str; 12] = [
    "kingdom",
    "superclass",
    "class",
    "subclass",
    "level5",
    "level6",
    "level7",
    "level8",
    "level9",
    "level10",
    "level11",
    "level12",
];

const CHEMONT_PREFIX: &str = "CHEMONTID:";
const INCHIKEY_PREFIX: &str = "InChIKey=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemOntoTerm {
    pub name: String,
    pub chemont_id: String,
}

/// One classification result from the ClassyFire API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassyFireEntity {
    pub inchikey: String,
    #[serde(default)]
    pub kingdom: Option<ChemOntoTerm>,
    #[serde(default)]
    pub superclass: Option<ChemOntoTerm>,
    #[serde(default)]
    pub class: Option<ChemOntoTerm>,
    #[serde(default)]
    pub subclass: Option<ChemOntoTerm>,
    #[serde(default)]
    pub intermediate_nodes: Vec<ChemOntoTerm>,
    pub direct_parent: ChemOntoTerm,
    #[serde(default)]
    pub smiles: Value,
    #[serde(default)]
    pub molecular_framework: Value,
}

impl ClassyFireEntity {
    fn node_id(&self) -> NodeId {
        let key = self
            .inchikey
            .strip_prefix(INCHIKEY_PREFIX)
            .unwrap_or(&self.inchikey);
        create_node_id(Header::Chemical, key)
    }

    /// Kingdom down to the direct parent. The fixed tiers stop early once
    /// one of them is the direct parent.
    fn lineage(&self) -> Result<Vec<&ChemOntoTerm>> {
        let tiers = [
            ("kingdom", &self.kingdom),
            ("superclass", &self.superclass),
            ("class", &self.class),
            ("subclass", &self.subclass),
        ];
        let mut lineage = Vec::new();
        for (level, term) in tiers {
            let term = term
                .as_ref()
                .ok_or_else(|| GraphError::missing(&self.inchikey, level))?;
            if *term == self.direct_parent {
                break;
            }
            lineage.push(term);
        }
        lineage.extend(self.intermediate_nodes.iter());
        lineage.push(&self.direct_parent);
        Ok(lineage)
    }
}

fn term_node_id(term: &ChemOntoTerm) -> NodeId {
    let raw = term
        .chemont_id
        .strip_prefix(CHEMONT_PREFIX)
        .unwrap_or(&term.chemont_id);
    create_node_id(Header::ChemOnto, raw)
}

fn object(value: Value) -> NodeAttr {
    match value {
        Value::Object(map) => map,
        _ => NodeAttr::new(),
    }
}

/// Ontology nodes of one chemical's lineage, its chemical leaf, and the
/// `INCLUDES` chain ending in a `CONTAINS` edge to the leaf.
pub fn nodes_and_edges_from_entity(entity: &ClassyFireEntity) -> Result<(NodeList, EdgeList)> {
    let mut nodes: NodeList = Vec::new();
    let mut lineage_ids: Vec<NodeId> = Vec::new();

    for (level, term) in LEVEL_INDEX.iter().zip(entity.lineage()?) {
        let id = term_node_id(term);
        let attrs = object(json!({
            "level": level,
            "name": term.name,
            "chemont_id": term.chemont_id,
            "lineage": lineage_ids,
            "type": NodeType::ChemOnto,
        }));
        nodes.push((id.clone(), attrs));
        lineage_ids.push(id);
    }

    let parent = lineage_ids
        .last()
        .cloned()
        .ok_or_else(|| GraphError::missing(&entity.inchikey, "direct_parent"))?;
    let chemical = entity.node_id();
    nodes.push((
        chemical.clone(),
        object(json!({
            "smiles": entity.smiles,
            "molecular_framework": entity.molecular_framework,
            "parent": parent,
            "type": NodeType::Chemical,
        })),
    ));

    let mut edges: EdgeList = lineage_ids
        .windows(2)
        .map(|pair| (pair[0].clone(), pair[1].clone(), edge_attr(EdgeType::Includes)))
        .collect();
    edges.push((parent, chemical, edge_attr(EdgeType::Contains)));
    Ok((nodes, edges))
}

/// `a` descends from `b` when they are the same ontology term or `b` is in
/// `a`'s lineage. Chemicals are compared through their parent term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassyFireLineage;

impl ClassyFireLineage {
    fn ontology_attrs<'g>(graph: &'g BioGraph, id: &str) -> Result<&'g NodeAttr> {
        let attrs = graph.node_attrs(id)?;
        if attrs.get("type").and_then(Value::as_str) != Some(NodeType::Chemical.as_str()) {
            return Ok(attrs);
        }
        let parent = attrs.get("parent").ok_or_else(|| GraphError::missing(id, "parent"))?;
        let parent = parent
            .as_str()
            .ok_or_else(|| GraphError::invalid(id, "parent", parent.to_string()))?;
        graph.node_attrs(parent)
    }
}

impl DescendancyCheck for ClassyFireLineage {
    fn is_descendant(&self, graph: &BioGraph, descendant: &str, ancestor: &str) -> Result<bool> {
        let lower = Self::ontology_attrs(graph, descendant)?;
        let upper = Self::ontology_attrs(graph, ancestor)?;
        if lower == upper {
            return Ok(true);
        }
        let lineage = lower
            .get("lineage")
            .ok_or_else(|| GraphError::missing(descendant, "lineage"))?;
        let lineage = lineage
            .as_array()
            .ok_or_else(|| GraphError::invalid(descendant, "lineage", lineage.to_string()))?;
        Ok(lineage.iter().any(|id| id.as_str() == Some(ancestor)))
    }
}

impl HierarchicalGraph<ClassyFireLineage> {
    /// Merge the lineages of many chemicals. Shared ancestors collapse by id
    /// and repeated edges are kept once, in first-seen order.
    pub fn from_classyfire_entities(entities: &[ClassyFireEntity]) -> Result<ClassyFireGraph> {
        let mut nodes = Vec::new();
        let mut edges: EdgeList = Vec::new();
        for entity in entities {
            let (entity_nodes, entity_edges) = nodes_and_edges_from_entity(entity)?;
            nodes.extend(entity_nodes);
            for edge in entity_edges {
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }
        let graph = BioGraph::new(nodes, edges);
        tracing::debug!(
            chemicals = entities.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built ClassyFire graph"
        );
        Ok(ClassyFireGraph::new(graph, ClassyFireLineage))
    }
}
