//! petgraph::StableGraph wrapper holding the assumed causal structure.

use std::collections::{HashMap, HashSet, VecDeque};

use freightlens_core::constants::UNOBSERVED_CONFOUNDERS;
use freightlens_core::errors::GraphError;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::Dfs;
use petgraph::{Directed, Direction};
use serde::Serialize;

/// A variable in the causal graph.
#[derive(Debug, Clone, Serialize)]
pub struct CausalVariable {
    pub name: String,
    /// Whether the variable is measured in the data. Latent variables cannot
    /// be adjusted for.
    pub observed: bool,
}

/// The underlying directed graph type. Edges carry no weight.
pub type CausalStableGraph = StableGraph<CausalVariable, (), Directed>;

/// Directed acyclic graph over named variables.
#[derive(Debug, Clone)]
pub struct CausalGraph {
    pub graph: CausalStableGraph,
    pub node_index: HashMap<String, NodeIndex>,
}

impl CausalGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// The graph implied by a list of common causes: each cause points at
    /// both treatment and outcome, and treatment points at outcome. With
    /// `unobserved_confounding`, a latent node also points at both.
    pub fn from_common_causes(
        treatment: &str,
        outcome: &str,
        common_causes: &[String],
        unobserved_confounding: bool,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        let t = graph.ensure_variable(treatment, true);
        let y = graph.ensure_variable(outcome, true);
        for cause in common_causes {
            let w = graph.ensure_variable(cause, true);
            graph.add_edge(w, t)?;
            graph.add_edge(w, y)?;
        }
        if unobserved_confounding {
            let u = graph.ensure_variable(UNOBSERVED_CONFOUNDERS, false);
            graph.add_edge(u, t)?;
            graph.add_edge(u, y)?;
        }
        graph.add_edge(t, y)?;
        Ok(graph)
    }

    /// Get or create a variable.
    pub fn ensure_variable(&mut self, name: &str, observed: bool) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(CausalVariable {
            name: name.to_string(),
            observed,
        });
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    pub fn get_node(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<NodeIndex, GraphError> {
        self.get_node(name).ok_or_else(|| GraphError::UnknownVariable {
            name: name.to_string(),
        })
    }

    pub fn name(&self, idx: NodeIndex) -> &str {
        self.graph
            .node_weight(idx)
            .map(|v| v.name.as_str())
            .unwrap_or("")
    }

    pub fn is_observed(&self, idx: NodeIndex) -> bool {
        self.graph.node_weight(idx).is_some_and(|v| v.observed)
    }

    /// Add `source → target`, rejecting edges that would close a cycle.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex) -> Result<(), GraphError> {
        if would_create_cycle(&self.graph, source, target) {
            return Err(GraphError::CycleDetected {
                path: format!("{} -> {}", self.name(source), self.name(target)),
            });
        }
        if self.graph.find_edge(source, target).is_none() {
            self.graph.add_edge(source, target, ());
        }
        Ok(())
    }

    /// Every node reachable from `from` along directed edges, excluding `from`.
    pub fn descendants(&self, from: NodeIndex) -> HashSet<NodeIndex> {
        let mut seen = HashSet::new();
        let mut dfs = Dfs::new(&self.graph, from);
        while let Some(node) = dfs.next(&self.graph) {
            if node != from {
                seen.insert(node);
            }
        }
        seen
    }

    /// `seeds` plus every node with a directed path into one of them,
    /// ignoring edges leaving `cut`.
    pub fn ancestral_set(
        &self,
        seeds: impl IntoIterator<Item = NodeIndex>,
        cut: Option<NodeIndex>,
    ) -> HashSet<NodeIndex> {
        let mut visited = HashSet::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        for seed in seeds {
            if visited.insert(seed) {
                queue.push_back(seed);
            }
        }
        while let Some(current) = queue.pop_front() {
            for parent in self.parents(current, cut) {
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        visited
    }

    /// Direct causes of `node`, ignoring edges leaving `cut`.
    pub fn parents(&self, node: NodeIndex, cut: Option<NodeIndex>) -> Vec<NodeIndex> {
        self.graph
            .neighbors_directed(node, Direction::Incoming)
            .filter(|&p| Some(p) != cut)
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for CausalGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Adding `source → target` closes a cycle iff `target` already reaches
/// `source`. Self-loops are always cycles.
pub fn would_create_cycle(graph: &CausalStableGraph, source: NodeIndex, target: NodeIndex) -> bool {
    if source == target {
        return true;
    }
    let mut dfs = Dfs::new(graph, target);
    while let Some(node) = dfs.next(graph) {
        if node == source {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_cause_graph_shape() {
        let graph = CausalGraph::from_common_causes(
            "is_far",
            "delivery_delay",
            &["distance_km".to_string()],
            true,
        )
        .unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 5);
        let u = graph.get_node(UNOBSERVED_CONFOUNDERS).unwrap();
        assert!(!graph.is_observed(u));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut graph = CausalGraph::new();
        let a = graph.ensure_variable("a", true);
        let b = graph.ensure_variable("b", true);
        let c = graph.ensure_variable("c", true);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        assert!(matches!(
            graph.add_edge(c, a),
            Err(GraphError::CycleDetected { .. })
        ));
        assert!(graph.add_edge(a, a).is_err());
    }

    #[test]
    fn test_descendants_and_ancestors() {
        let mut graph = CausalGraph::new();
        let a = graph.ensure_variable("a", true);
        let b = graph.ensure_variable("b", true);
        let c = graph.ensure_variable("c", true);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();

        let desc = graph.descendants(a);
        assert!(desc.contains(&b) && desc.contains(&c) && !desc.contains(&a));

        let anc = graph.ancestral_set([c], None);
        assert_eq!(anc.len(), 3);
        // Cutting b's outgoing edges hides a and b from c.
        let anc = graph.ancestral_set([c], Some(b));
        assert_eq!(anc.len(), 1);
    }
}
