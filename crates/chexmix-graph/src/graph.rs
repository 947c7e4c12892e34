//! `BioGraph`: directed multigraph of typed biological entities.
//!
//! Storage is insertion-ordered: nodes iterate in the order they were first
//! added, and edges iterate by source node, then target, then insertion.
//! Parallel edges between the same ordered pair are kept as a list of
//! attribute maps, so duplicate relationships survive.
//!
//! Every transforming operation returns a new graph; the receiver is left
//! untouched.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

use crate::error::{GraphError, Result};
use crate::ids::NodeId;
use crate::types::NodeType;

pub type NodeAttr = Map<String, Value>;
pub type EdgeAttr = Map<String, Value>;

/// Attribute map holding only an edge `type` tag.
pub fn edge_attr(edge_type: impl AsRef<str>) -> EdgeAttr {
    let mut attr = EdgeAttr::new();
    attr.insert("type".to_string(), Value::from(edge_type.as_ref()));
    attr
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Successors,
    Predecessors,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BioGraph {
    nodes: IndexMap<NodeId, NodeAttr>,
    /// source -> target -> parallel edge attributes
    succ: IndexMap<NodeId, IndexMap<NodeId, Vec<EdgeAttr>>>,
    /// target -> sources
    pred: IndexMap<NodeId, IndexSet<NodeId>>,
}

impl BioGraph {
    /// Build a graph from (id, attrs) pairs and (source, target, attrs) triples.
    ///
    /// Re-adding a node merges attributes (last write wins per key). Edge
    /// endpoints that were not listed as nodes are created without attributes.
    pub fn new<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = (NodeId, NodeAttr)>,
        E: IntoIterator<Item = (NodeId, NodeId, EdgeAttr)>,
    {
        let mut graph = Self::default();
        for (id, attrs) in nodes {
            graph.add_node(id, attrs);
        }
        for (source, target, attrs) in edges {
            graph.add_edge(source, target, attrs);
        }
        graph
    }

    // ========================================================================
    // Construction primitives (crate-internal)
    // ========================================================================

    pub(crate) fn add_node(&mut self, id: NodeId, attrs: NodeAttr) {
        self.ensure_node(&id);
        if let Some(existing) = self.nodes.get_mut(&id) {
            existing.extend(attrs);
        }
    }

    fn ensure_node(&mut self, id: &str) {
        if !self.nodes.contains_key(id) {
            self.nodes.insert(id.to_string(), NodeAttr::new());
            self.succ.insert(id.to_string(), IndexMap::new());
            self.pred.insert(id.to_string(), IndexSet::new());
        }
    }

    pub(crate) fn add_edge(&mut self, source: NodeId, target: NodeId, attrs: EdgeAttr) {
        self.ensure_node(&source);
        self.ensure_node(&target);
        if let Some(targets) = self.succ.get_mut(&source) {
            targets.entry(target.clone()).or_default().push(attrs);
        }
        if let Some(sources) = self.pred.get_mut(&target) {
            sources.insert(source);
        }
    }

    /// Remove a node together with every incident edge.
    pub(crate) fn remove_node(&mut self, id: &str) {
        if self.nodes.shift_remove(id).is_none() {
            return;
        }
        if let Some(targets) = self.succ.shift_remove(id) {
            for target in targets.keys() {
                if let Some(sources) = self.pred.get_mut(target) {
                    sources.shift_remove(id);
                }
            }
        }
        if let Some(sources) = self.pred.shift_remove(id) {
            for source in &sources {
                if let Some(targets) = self.succ.get_mut(source) {
                    targets.shift_remove(id);
                }
            }
        }
    }

    pub(crate) fn node_attrs_mut(&mut self, id: &str) -> Option<&mut NodeAttr> {
        self.nodes.get_mut(id)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.succ
            .values()
            .flat_map(|targets| targets.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&NodeAttr> {
        self.nodes.get(id)
    }

    /// Attributes of `id`, or `UnknownNode`.
    pub fn node_attrs(&self, id: &str) -> Result<&NodeAttr> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    /// Attribute `key` of `id`; missing nodes and missing keys are both errors.
    pub fn attr(&self, id: &str, key: &str) -> Result<&Value> {
        self.node_attrs(id)?
            .get(key)
            .ok_or_else(|| GraphError::missing(id, key))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &NodeAttr)> + '_ {
        self.nodes.iter().map(|(id, attrs)| (id.as_str(), attrs))
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().cloned().collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &EdgeAttr)> + '_ {
        self.succ.iter().flat_map(|(source, targets)| {
            targets.iter().flat_map(move |(target, parallel)| {
                parallel
                    .iter()
                    .map(move |attrs| (source.as_str(), target.as_str(), attrs))
            })
        })
    }

    /// Parallel edge attributes between `source` and `target`.
    pub fn edge_data(&self, source: &str, target: &str) -> Option<&[EdgeAttr]> {
        self.succ.get(source)?.get(target).map(Vec::as_slice)
    }

    pub fn contains_edge(&self, source: &str, target: &str, attrs: &EdgeAttr) -> bool {
        self.edge_data(source, target)
            .map_or(false, |parallel| parallel.contains(attrs))
    }

    pub fn successors(&self, id: &str) -> impl Iterator<Item = &str> + '_ {
        self.succ
            .get(id)
            .into_iter()
            .flat_map(|targets| targets.keys().map(String::as_str))
    }

    pub fn predecessors(&self, id: &str) -> impl Iterator<Item = &str> + '_ {
        self.pred
            .get(id)
            .into_iter()
            .flat_map(|sources| sources.iter().map(String::as_str))
    }

    /// Number of inbound edges, parallel edges counted separately.
    pub fn in_degree(&self, id: &str) -> usize {
        self.predecessors(id)
            .filter_map(|source| self.edge_data(source, id))
            .map(<[EdgeAttr]>::len)
            .sum()
    }

    /// Number of outbound edges, parallel edges counted separately.
    pub fn out_degree(&self, id: &str) -> usize {
        self.succ
            .get(id)
            .map_or(0, |targets| targets.values().map(Vec::len).sum())
    }

    // ========================================================================
    // Set algebra
    // ========================================================================

    /// Edges and nodes present in both graphs, compared with their attributes.
    ///
    /// Edges are added first and nodes second, independently: an endpoint of a
    /// shared edge is kept (without attributes) even when its attribute map
    /// differs between the two graphs.
    pub fn intersection(&self, other: &BioGraph) -> BioGraph {
        let mut out = BioGraph::default();
        for (source, target, attrs) in self.edges() {
            if other.contains_edge(source, target, attrs) {
                out.add_edge(source.to_string(), target.to_string(), attrs.clone());
            }
        }
        for (id, attrs) in self.nodes() {
            if other.node(id) == Some(attrs) {
                out.add_node(id.to_string(), attrs.clone());
            }
        }
        out
    }

    /// Edges and nodes of `self` absent from `other` (self - other), with
    /// the same independent edge/node handling as [`BioGraph::intersection`].
    pub fn difference(&self, other: &BioGraph) -> BioGraph {
        let mut out = BioGraph::default();
        for (source, target, attrs) in self.edges() {
            if !other.contains_edge(source, target, attrs) {
                out.add_edge(source.to_string(), target.to_string(), attrs.clone());
            }
        }
        for (id, attrs) in self.nodes() {
            if other.node(id) != Some(attrs) {
                out.add_node(id.to_string(), attrs.clone());
            }
        }
        out
    }

    /// All nodes and edges of both graphs. Node attributes merge with
    /// `other` winning; an edge of `other` identical to one already in
    /// `self` between the same pair is not added a second time.
    pub fn union(&self, other: &BioGraph) -> BioGraph {
        let mut out = self.clone();
        for (id, attrs) in other.nodes() {
            out.add_node(id.to_string(), attrs.clone());
        }
        for (source, targets) in &other.succ {
            for (target, parallel) in targets {
                let mut unmatched: Vec<&EdgeAttr> = self
                    .edge_data(source, target)
                    .map(|existing| existing.iter().collect())
                    .unwrap_or_default();
                for attrs in parallel {
                    match unmatched.iter().position(|a| *a == attrs) {
                        Some(pos) => {
                            unmatched.swap_remove(pos);
                        }
                        None => out.add_edge(source.clone(), target.clone(), attrs.clone()),
                    }
                }
            }
        }
        out
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    /// Drop every non-Keyword node whose `count` is below `threshold`.
    ///
    /// Every node must carry `count` and `type`.
    pub fn threshold(&self, threshold: i64) -> Result<BioGraph> {
        let mut trimmed = self.clone();
        for (id, attrs) in self.nodes() {
            let below = count_of(id, attrs)? < threshold;
            let keyword = type_of(id, attrs)? == NodeType::Keyword.as_str();
            if below && !keyword {
                trimmed.remove_node(id);
            }
        }
        Ok(trimmed)
    }

    /// Graph made only of edges whose `type` is in `edge_types`, with full
    /// node attributes restored from `self`.
    pub fn remain_by_edge_types(&self, edge_types: &[&str]) -> Result<BioGraph> {
        let mut trimmed = BioGraph::default();
        for (source, target, attrs) in self.edges() {
            let edge_type = attrs
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| GraphError::missing(&format!("{source}->{target}"), "type"))?;
            if edge_types.contains(&edge_type) {
                trimmed.add_edge(source.to_string(), target.to_string(), attrs.clone());
            }
        }
        Ok(trimmed.inherit_attr_from(self))
    }

    /// Copy without the nodes whose `type` is not in `node_types`; their
    /// incident edges go with them.
    pub fn remain_by_node_types(&self, node_types: &[&str]) -> Result<BioGraph> {
        let mut filtered = self.clone();
        for (id, attrs) in self.nodes() {
            if !node_types.contains(&type_of(id, attrs)?) {
                filtered.remove_node(id);
            }
        }
        Ok(filtered)
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Nodes with zero in-degree. A non-empty `edge_types` first restricts the
    /// graph to edges of those types.
    pub fn find_roots(&self, edge_types: &[&str]) -> Result<Vec<NodeId>> {
        let filtered;
        let graph = if edge_types.is_empty() {
            self
        } else {
            filtered = self.remain_by_edge_types(edge_types)?;
            &filtered
        };
        Ok(graph
            .nodes
            .keys()
            .filter(|id| graph.in_degree(id) == 0)
            .cloned()
            .collect())
    }

    /// Nodes with zero out-degree, with the same `edge_types` restriction as
    /// [`BioGraph::find_roots`].
    pub fn find_leaves(&self, edge_types: &[&str]) -> Result<Vec<NodeId>> {
        let filtered;
        let graph = if edge_types.is_empty() {
            self
        } else {
            filtered = self.remain_by_edge_types(edge_types)?;
            &filtered
        };
        Ok(graph
            .nodes
            .keys()
            .filter(|id| graph.out_degree(id) == 0)
            .cloned()
            .collect())
    }

    /// Sum of `count` over `ids`; nodes without `count` are skipped.
    pub fn total_count<S: AsRef<str>>(&self, ids: &[S]) -> Result<i64> {
        let mut total = 0;
        for id in ids {
            let id = id.as_ref();
            let attrs = self.node_attrs(id)?;
            if attrs.contains_key("count") {
                total += count_of(id, attrs)?;
            }
        }
        Ok(total)
    }

    /// `roots` and everything reachable from them through successors.
    pub fn subgraph_from_roots<S: AsRef<str>>(
        &self,
        roots: &[S],
        edge_types: &[&str],
    ) -> Result<BioGraph> {
        self.reachable_subgraph(roots, edge_types, Direction::Successors)
    }

    /// `leaves` and everything reaching them through predecessors.
    pub fn subgraph_from_leaves<S: AsRef<str>>(
        &self,
        leaves: &[S],
        edge_types: &[&str],
    ) -> Result<BioGraph> {
        self.reachable_subgraph(leaves, edge_types, Direction::Predecessors)
    }

    fn reachable_subgraph<S: AsRef<str>>(
        &self,
        start: &[S],
        edge_types: &[&str],
        direction: Direction,
    ) -> Result<BioGraph> {
        let filtered;
        let graph = if edge_types.is_empty() {
            self
        } else {
            filtered = self.remain_by_edge_types(edge_types)?;
            &filtered
        };

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut visited: IndexSet<&str> = IndexSet::new();
        let mut stack: Vec<&str> = start.iter().map(AsRef::as_ref).collect();

        while let Some(id) = stack.pop() {
            if visited.contains(id) {
                continue;
            }
            let Some(attrs) = graph.node(id) else {
                continue;
            };
            visited.insert(id);
            nodes.push((id.to_string(), attrs.clone()));

            match direction {
                Direction::Successors => {
                    for child in graph.successors(id) {
                        stack.push(child);
                        for attrs in graph.edge_data(id, child).unwrap_or_default() {
                            edges.push((id.to_string(), child.to_string(), attrs.clone()));
                        }
                    }
                }
                Direction::Predecessors => {
                    for parent in graph.predecessors(id) {
                        stack.push(parent);
                        for attrs in graph.edge_data(parent, id).unwrap_or_default() {
                            edges.push((parent.to_string(), id.to_string(), attrs.clone()));
                        }
                    }
                }
            }
        }

        Ok(BioGraph::new(nodes, edges).inherit_attr_from(self))
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Copy with `attrs[key] = value` on each of `ids`.
    pub fn set_attribute<S: AsRef<str>>(&self, key: &str, value: Value, ids: &[S]) -> Result<BioGraph> {
        let mut out = self.clone();
        for id in ids {
            let id = id.as_ref();
            out.node_attrs_mut(id)
                .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?
                .insert(key.to_string(), value.clone());
        }
        Ok(out)
    }

    /// Copy whose shared nodes take `other`'s attributes (merged over their
    /// own), and whose attribute-less edge bundles take `other`'s parallel
    /// edges between the same pair.
    pub fn inherit_attr_from(&self, other: &BioGraph) -> BioGraph {
        let mut out = self.clone();
        for (id, attrs) in out.nodes.iter_mut() {
            if let Some(theirs) = other.node(id) {
                attrs.extend(theirs.clone());
            }
        }
        for (source, targets) in out.succ.iter_mut() {
            for (target, parallel) in targets.iter_mut() {
                if !parallel.iter().all(Map::is_empty) {
                    continue;
                }
                if let Some(theirs) = other.edge_data(source, target) {
                    *parallel = theirs.to_vec();
                }
            }
        }
        out
    }
}

pub(crate) fn count_of(id: &str, attrs: &NodeAttr) -> Result<i64> {
    let value = attrs.get("count").ok_or_else(|| GraphError::missing(id, "count"))?;
    value
        .as_i64()
        .ok_or_else(|| GraphError::invalid(id, "count", value.to_string()))
}

pub(crate) fn type_of<'a>(id: &str, attrs: &'a NodeAttr) -> Result<&'a str> {
    let value = attrs.get("type").ok_or_else(|| GraphError::missing(id, "type"))?;
    value
        .as_str()
        .ok_or_else(|| GraphError::invalid(id, "type", value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> NodeAttr {
        value.as_object().cloned().unwrap_or_default()
    }

    fn node(id: &str, ty: &str, count: i64) -> (NodeId, NodeAttr) {
        (id.to_string(), attrs(json!({"type": ty, "count": count})))
    }

    fn edge(s: &str, t: &str, ty: &str) -> (NodeId, NodeId, EdgeAttr) {
        (s.to_string(), t.to_string(), edge_attr(ty))
    }

    fn bio_graphs() -> (BioGraph, BioGraph) {
        let nodes1 = vec![
            node("1 : node1", "genus", 0),
            node("1.1 : node11", "KPEB", 5),
            node("2 : node2", "genus", 0),
            node("2.1 : node21", "Literature", 3),
            node("2.2 : node22", "Literature", 1),
            node("3 : node3", "genus", 0),
        ];
        let nodes2 = vec![
            node("2 : node2", "genus", 0),
            node("2.1 : node21", "Literature", 4),
            node("3 : node3", "genus", 0),
        ];
        let edges1 = vec![
            edge("1 : node1", "1.1 : node11", "test"),
            edge("2 : node2", "2.1 : node21", "test"),
            edge("2 : node2", "2.1 : node21", "test2"),
            edge("2.1 : node21", "2.2 : node22", "test"),
        ];
        let edges2 = vec![edge("2 : node2", "2.1 : node21", "test")];
        (BioGraph::new(nodes1, edges1), BioGraph::new(nodes2, edges2))
    }

    fn edge_list(graph: &BioGraph) -> Vec<(String, String, String)> {
        graph
            .edges()
            .map(|(s, t, a)| {
                let ty = a.get("type").and_then(Value::as_str).unwrap_or_default();
                (s.to_string(), t.to_string(), ty.to_string())
            })
            .collect()
    }

    fn triple(s: &str, t: &str, ty: &str) -> (String, String, String) {
        (s.to_string(), t.to_string(), ty.to_string())
    }

    #[test]
    fn test_union() {
        let (g1, g2) = bio_graphs();
        let union = g1.union(&g2);
        assert_eq!(union.edge_count(), 4);
        assert_eq!(union.node_count(), 6);
        assert_eq!(union.node("2.1 : node21").unwrap()["count"], json!(4));
    }

    #[test]
    fn test_intersection() {
        let (g1, g2) = bio_graphs();
        let inter = g1.intersection(&g2);
        assert_eq!(inter.node_ids(), vec!["2 : node2", "2.1 : node21", "3 : node3"]);
        assert_eq!(edge_list(&inter), vec![triple("2 : node2", "2.1 : node21", "test")]);
        // Shared edge endpoint whose attributes differ survives bare.
        assert!(inter.node("2.1 : node21").unwrap().is_empty());
    }

    #[test]
    fn test_difference() {
        let (g1, g2) = bio_graphs();
        let diff = g1.difference(&g2);
        assert_eq!(
            edge_list(&diff),
            vec![
                triple("1 : node1", "1.1 : node11", "test"),
                triple("2 : node2", "2.1 : node21", "test2"),
                triple("2.1 : node21", "2.2 : node22", "test"),
            ]
        );
    }

    #[test]
    fn test_find_roots() {
        let (g1, g2) = bio_graphs();
        assert_eq!(g1.find_roots(&[]).unwrap(), vec!["1 : node1", "2 : node2", "3 : node3"]);
        assert_eq!(g2.find_roots(&[]).unwrap(), vec!["2 : node2", "3 : node3"]);
        assert_eq!(g1.find_roots(&["test2"]).unwrap(), vec!["2 : node2"]);
    }

    #[test]
    fn test_find_leaves() {
        let (g1, g2) = bio_graphs();
        assert_eq!(
            g1.find_leaves(&[]).unwrap(),
            vec!["1.1 : node11", "2.2 : node22", "3 : node3"]
        );
        assert_eq!(g2.find_leaves(&[]).unwrap(), vec!["2.1 : node21", "3 : node3"]);
        assert_eq!(g1.find_leaves(&["test2"]).unwrap(), vec!["2.1 : node21"]);
    }

    #[test]
    fn test_total_count() {
        let (g1, g2) = bio_graphs();
        assert_eq!(
            g1.total_count(&["2 : node2", "2.1 : node21", "2.2 : node22"]).unwrap(),
            4
        );
        assert_eq!(g2.total_count(&["3 : node3"]).unwrap(), 0);
    }

    #[test]
    fn test_total_count_skips_uncounted_nodes() {
        let graph = BioGraph::new(
            vec![
                ("a".to_string(), attrs(json!({"type": "Article"}))),
                node("b", "Taxonomy", 7),
            ],
            vec![],
        );
        assert_eq!(graph.total_count(&["a", "b"]).unwrap(), 7);
        assert!(matches!(
            graph.total_count(&["missing"]),
            Err(GraphError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_threshold_keeps_keywords() {
        let graph = BioGraph::new(
            vec![
                node("kw", "Keyword", 0),
                node("ARTI:1", "Article", 0),
                node("TAXO:9606", "Taxonomy", 9),
            ],
            vec![edge("kw", "ARTI:1", "MENTIONED")],
        );
        let trimmed = graph.threshold(5).unwrap();
        assert_eq!(trimmed.node_ids(), vec!["kw", "TAXO:9606"]);
        assert_eq!(trimmed.edge_count(), 0);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_threshold_requires_count() {
        let graph = BioGraph::new(
            vec![("ARTI:1".to_string(), attrs(json!({"type": "Article"})))],
            vec![],
        );
        assert!(matches!(
            graph.threshold(1),
            Err(GraphError::MissingAttribute { key, .. }) if key == "count"
        ));
    }

    #[test]
    fn test_subgraph_from_roots() {
        let (g1, g2) = bio_graphs();
        let s11 = g1.subgraph_from_roots(&["1 : node1"], &[]).unwrap();
        let s12 = g1.subgraph_from_roots(&["2 : node2"], &[]).unwrap();
        let s21 = g2.subgraph_from_roots(&["2 : node2"], &[]).unwrap();
        assert_eq!((s11.node_count(), s11.edge_count()), (2, 1));
        assert_eq!((s12.node_count(), s12.edge_count()), (3, 3));
        assert_eq!((s21.node_count(), s21.edge_count()), (2, 1));
        assert_eq!(s12.node("2.2 : node22").unwrap()["count"], json!(1));
    }

    #[test]
    fn test_subgraph_from_leaves() {
        let (g1, g2) = bio_graphs();
        let s11 = g1.subgraph_from_leaves(&["1.1 : node11"], &[]).unwrap();
        let s12 = g1.subgraph_from_leaves(&["2.2 : node22"], &[]).unwrap();
        let s21 = g2.subgraph_from_leaves(&["2.1 : node21"], &[]).unwrap();
        assert_eq!((s11.node_count(), s11.edge_count()), (2, 1));
        assert_eq!((s12.node_count(), s12.edge_count()), (3, 3));
        assert_eq!((s21.node_count(), s21.edge_count()), (2, 1));
    }

    #[test]
    fn test_subgraph_with_edge_type_filter_restores_attributes() {
        let (g1, _) = bio_graphs();
        let sub = g1.subgraph_from_roots(&["2 : node2"], &["test2"]).unwrap();
        assert_eq!(sub.node_ids(), vec!["2 : node2", "2.1 : node21"]);
        assert_eq!(edge_list(&sub), vec![triple("2 : node2", "2.1 : node21", "test2")]);
        assert_eq!(sub.node("2.1 : node21").unwrap()["type"], json!("Literature"));
    }

    #[test]
    fn test_subgraph_ignores_unknown_start_nodes() {
        let (g1, _) = bio_graphs();
        let sub = g1.subgraph_from_roots(&["nope", "3 : node3"], &[]).unwrap();
        assert_eq!(sub.node_ids(), vec!["3 : node3"]);
    }

    #[test]
    fn test_remain_by_node_types_cascades() {
        let (g1, _) = bio_graphs();
        let filtered = g1.remain_by_node_types(&["genus", "KPEB"]).unwrap();
        assert_eq!(filtered.node_ids(), vec!["1 : node1", "1.1 : node11", "2 : node2", "3 : node3"]);
        assert_eq!(edge_list(&filtered), vec![triple("1 : node1", "1.1 : node11", "test")]);
        assert_eq!(filtered.out_degree("2 : node2"), 0);
    }

    #[test]
    fn test_set_attribute_returns_copy() {
        let (g1, _) = bio_graphs();
        let marked = g1
            .set_attribute("sub_type", json!("Genus"), &["1 : node1", "2 : node2"])
            .unwrap();
        assert_eq!(marked.node("1 : node1").unwrap()["sub_type"], json!("Genus"));
        assert!(g1.node("1 : node1").unwrap().get("sub_type").is_none());
        assert!(g1.set_attribute("x", json!(1), &["missing"]).is_err());
    }

    #[test]
    fn test_inherit_attr_from_fills_bare_edges() {
        let (g1, _) = bio_graphs();
        let bare = BioGraph::new(
            vec![],
            vec![(
                "2 : node2".to_string(),
                "2.1 : node21".to_string(),
                EdgeAttr::new(),
            )],
        );
        let inherited = bare.inherit_attr_from(&g1);
        assert_eq!(inherited.edge_data("2 : node2", "2.1 : node21").unwrap().len(), 2);
        assert_eq!(inherited.node("2 : node2").unwrap()["type"], json!("genus"));
    }

    #[test]
    fn test_degrees_count_parallel_edges() {
        let (g1, _) = bio_graphs();
        assert_eq!(g1.out_degree("2 : node2"), 2);
        assert_eq!(g1.in_degree("2.1 : node21"), 2);
        assert_eq!(g1.successors("2 : node2").collect::<Vec<_>>(), vec!["2.1 : node21"]);
    }

    #[test]
    fn test_readding_node_merges_attributes() {
        let graph = BioGraph::new(
            vec![
                ("n".to_string(), attrs(json!({"type": "Gene", "count": 1}))),
                ("n".to_string(), attrs(json!({"count": 2, "name": "BRCA1"}))),
            ],
            vec![],
        );
        assert_eq!(
            graph.node("n").unwrap(),
            &attrs(json!({"type": "Gene", "count": 2, "name": "BRCA1"}))
        );
    }
}
