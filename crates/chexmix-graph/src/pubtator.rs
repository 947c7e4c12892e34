//! Entity -> article bipartite graph built from PubTator annotations.

use std::ops::Deref;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::error::{GraphError, Result};
use crate::graph::{edge_attr, BioGraph, NodeAttr};
use crate::ids::{create_node_id, get_header, get_raw_id, Header, NodeId, RawId};
use crate::sources::PubTatorAnnotations;
use crate::table::{EdgeList, NodeList};
use crate::types::{EdgeType, NodeType};

/// Annotation detail of one entity in one article (`text`, ...).
pub type Annotation = serde_json::Map<String, Value>;

/// `pmid -> entity node id -> annotation`.
pub type PubTatorTable = IndexMap<u64, IndexMap<NodeId, Annotation>>;

/// Observed entity raw id -> number of articles mentioning it.
pub type BioentityCounts = IndexMap<RawId, u64>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PubTatorGraph(BioGraph);

fn entity_type(id: &str) -> Result<NodeType> {
    let header: Header = get_header(id).parse()?;
    match header {
        Header::Taxonomy => Ok(NodeType::Taxonomy),
        Header::MeSHD => Ok(NodeType::MeSHD),
        Header::MeSHC => Ok(NodeType::MeSHC),
        Header::Gene => Ok(NodeType::Gene),
        Header::Mutation => Ok(NodeType::Mutation),
        other => Err(GraphError::UnknownHeader(other.to_string())),
    }
}

/// Entity and article nodes with `APPEARED_IN` edges from each entity to
/// every article annotating it.
///
/// Entity `count` is the number of articles mentioning the entity across the
/// whole table. Each entity node appears once, at its first article.
pub fn nodes_and_edges_from_pubtator(table: &PubTatorTable) -> Result<(NodeList, EdgeList)> {
    let mut frequency: IndexMap<&str, u64> = IndexMap::new();
    for entities in table.values() {
        for id in entities.keys() {
            *frequency.entry(id.as_str()).or_default() += 1;
        }
    }

    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut visited: IndexSet<&str> = IndexSet::new();
    for (pmid, entities) in table {
        let article = create_node_id(Header::Article, pmid);
        for (id, annotation) in entities {
            edges.push((id.clone(), article.clone(), edge_attr(EdgeType::AppearedIn)));
            if !visited.insert(id.as_str()) {
                continue;
            }
            let mut attrs = NodeAttr::new();
            attrs.insert("type".to_string(), Value::from(entity_type(id)?));
            attrs.insert(
                "count".to_string(),
                Value::from(frequency.get(id.as_str()).copied().unwrap_or_default()),
            );
            attrs.insert(
                "name".to_string(),
                annotation.get("text").cloned().unwrap_or(Value::Null),
            );
            nodes.push((id.clone(), attrs));
        }
        let mut attrs = NodeAttr::new();
        attrs.insert("type".to_string(), Value::from(NodeType::Article));
        nodes.push((article, attrs));
    }
    Ok((nodes, edges))
}

impl PubTatorGraph {
    pub fn from_table(table: &PubTatorTable) -> Result<Self> {
        let (nodes, edges) = nodes_and_edges_from_pubtator(table)?;
        Ok(Self(BioGraph::new(nodes, edges)))
    }

    pub fn from_article_ids(article_ids: &[u64], source: &dyn PubTatorAnnotations) -> Result<Self> {
        let table = source.annotations(article_ids)?;
        tracing::debug!(
            requested = article_ids.len(),
            annotated = table.len(),
            "PubTator annotations loaded"
        );
        Self::from_table(&table)
    }

    /// Raw ids of entities mentioned at least once, with their article count.
    /// A non-empty `headers` keeps only entities in those namespaces.
    pub fn bioentities(&self, headers: &[Header]) -> BioentityCounts {
        self.0
            .nodes()
            .filter_map(|(id, _)| {
                let degree = self.0.out_degree(id);
                if degree == 0 {
                    return None;
                }
                if !headers.is_empty() && !Header::of(id).map_or(false, |h| headers.contains(&h)) {
                    return None;
                }
                Some((get_raw_id(id), degree as u64))
            })
            .collect()
    }

    pub fn into_graph(self) -> BioGraph {
        self.0
    }
}

impl Deref for PubTatorGraph {
    type Target = BioGraph;

    fn deref(&self) -> &BioGraph {
        &self.0
    }
}

impl From<BioGraph> for PubTatorGraph {
    fn from(graph: BioGraph) -> Self {
        Self(graph)
    }
}
