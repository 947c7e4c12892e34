//! Hierarchy-aware graphs: a [`BioGraph`] paired with the strategy that
//! decides ancestry in its ontology.

use std::ops::Deref;

use crate::error::Result;
use crate::graph::BioGraph;
use crate::table::Table;

/// Ancestry notion of one ontology.
pub trait DescendancyCheck {
    /// True iff `descendant` sits below `ancestor` in `graph`'s hierarchy.
    fn is_descendant(&self, graph: &BioGraph, descendant: &str, ancestor: &str) -> Result<bool>;
}

/// Graph container with a descendancy strategy attached.
///
/// All [`BioGraph`] operations are reachable through `Deref`; they return
/// plain graphs, which [`HierarchicalGraph::with_graph`] rewraps with the
/// same strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchicalGraph<S> {
    graph: BioGraph,
    strategy: S,
}

impl<S: DescendancyCheck> HierarchicalGraph<S> {
    pub fn new(graph: BioGraph, strategy: S) -> Self {
        Self { graph, strategy }
    }

    pub fn is_descendant(&self, descendant: &str, ancestor: &str) -> Result<bool> {
        self.strategy.is_descendant(&self.graph, descendant, ancestor)
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn graph(&self) -> &BioGraph {
        &self.graph
    }

    pub fn into_graph(self) -> BioGraph {
        self.graph
    }
}

impl<S: DescendancyCheck + Clone> HierarchicalGraph<S> {
    /// Same strategy, different graph.
    pub fn with_graph(&self, graph: BioGraph) -> Self {
        Self {
            graph,
            strategy: self.strategy.clone(),
        }
    }
}

impl<S: DescendancyCheck + Default> HierarchicalGraph<S> {
    /// Hierarchy built from its tabular form.
    pub fn from_table(table: &Table) -> Result<Self> {
        Ok(Self::new(BioGraph::from_table(table)?, S::default()))
    }
}

impl<S: DescendancyCheck + Default> From<BioGraph> for HierarchicalGraph<S> {
    fn from(graph: BioGraph) -> Self {
        Self::new(graph, S::default())
    }
}

impl<S> Deref for HierarchicalGraph<S> {
    type Target = BioGraph;

    fn deref(&self) -> &BioGraph {
        &self.graph
    }
}
