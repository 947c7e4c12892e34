//! Keyword -> article bipartite graph built from PubMed search hits.

use std::ops::Deref;

use serde_json::Value;

use crate::error::{GraphError, Result};
use crate::graph::{edge_attr, BioGraph};
use crate::ids::{create_node_id, get_header, get_raw_id, Header};
use crate::sources::{ArticleRecord, PubMedSearch};
use crate::table::{EdgeList, NodeList};
use crate::types::{EdgeType, NodeType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PubMedGraph(BioGraph);

/// Keyword node (id = the keyword itself) plus one `ARTI:<Id>` node per
/// record, linked by `MENTIONED` edges.
pub fn nodes_and_edges_from_pubmed(keyword: &str, records: &[ArticleRecord]) -> Result<(NodeList, EdgeList)> {
    let mut keyword_attrs = ArticleRecord::new();
    keyword_attrs.insert("type".to_string(), Value::from(NodeType::Keyword));

    let mut nodes = vec![(keyword.to_string(), keyword_attrs)];
    let mut edges = Vec::with_capacity(records.len());
    for record in records {
        let id = match record.get("Id") {
            Some(Value::String(id)) => create_node_id(Header::Article, id),
            Some(Value::Number(id)) => create_node_id(Header::Article, id),
            Some(other) => return Err(GraphError::invalid(keyword, "Id", other.to_string())),
            None => return Err(GraphError::missing(keyword, "Id")),
        };
        let mut attrs = record.clone();
        attrs.insert("type".to_string(), Value::from(NodeType::Article));
        nodes.push((id.clone(), attrs));
        edges.push((keyword.to_string(), id, edge_attr(EdgeType::Mentioned)));
    }
    Ok((nodes, edges))
}

impl PubMedGraph {
    pub fn from_records(keyword: &str, records: &[ArticleRecord]) -> Result<Self> {
        let (nodes, edges) = nodes_and_edges_from_pubmed(keyword, records)?;
        Ok(Self(BioGraph::new(nodes, edges)))
    }

    pub fn from_keyword(keyword: &str, search: &dyn PubMedSearch) -> Result<Self> {
        let records = search.search(keyword)?;
        tracing::debug!(keyword, hits = records.len(), "PubMed search finished");
        Self::from_records(keyword, &records)
    }

    /// PubMed ids of all article nodes, in node order.
    pub fn article_ids(&self) -> Result<Vec<u64>> {
        self.0
            .nodes()
            .map(|(id, _)| id)
            .filter(|id| get_header(id) == Header::Article.as_str())
            .map(|id| {
                get_raw_id(id)
                    .as_int()
                    .ok_or_else(|| GraphError::InvalidRawId(id.to_string()))
            })
            .collect()
    }

    pub fn into_graph(self) -> BioGraph {
        self.0
    }
}

impl Deref for PubMedGraph {
    type Target = BioGraph;

    fn deref(&self) -> &BioGraph {
        &self.0
    }
}

impl From<BioGraph> for PubMedGraph {
    fn from(graph: BioGraph) -> Self {
        Self(graph)
    }
}
