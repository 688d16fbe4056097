//! Backdoor identification.
//!
//! An adjustment set Z identifies the effect of T on Y when:
//! 1. every member of Z is observed,
//! 2. no member of Z is a descendant of T,
//! 3. Z d-separates T from Y once T's outgoing edges are removed.
//!
//! Condition 3 is tested on the moral graph of the ancestral set of
//! {T, Y} ∪ Z: connect each node to its parents, marry co-parents, drop
//! Z, and look for any remaining undirected path from T to Y.

use std::collections::{HashMap, HashSet, VecDeque};

use freightlens_core::errors::GraphError;
use petgraph::stable_graph::NodeIndex;
use serde::Serialize;

use super::graph::CausalGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentificationStatus {
    /// The adjustment set satisfies the backdoor criterion.
    Identified,
    /// It does not; any estimate is best effort.
    Unidentified,
}

/// Outcome of identification for one treatment/outcome pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifiedEstimand {
    pub treatment: String,
    pub outcome: String,
    pub adjustment_set: Vec<String>,
    pub status: IdentificationStatus,
    /// Why identification failed, when it did.
    pub reason: Option<String>,
}

impl IdentifiedEstimand {
    pub fn is_identified(&self) -> bool {
        self.status == IdentificationStatus::Identified
    }
}

/// Check whether `adjustment` satisfies the backdoor criterion for
/// `treatment → outcome` in `graph`.
pub fn identify_backdoor(
    graph: &CausalGraph,
    treatment: &str,
    outcome: &str,
    adjustment: &[String],
) -> Result<IdentifiedEstimand, GraphError> {
    let t = graph.require(treatment)?;
    let y = graph.require(outcome)?;
    let z: Vec<NodeIndex> = adjustment
        .iter()
        .map(|name| graph.require(name))
        .collect::<Result<_, _>>()?;

    let verdict = |reason: Option<String>| IdentifiedEstimand {
        treatment: treatment.to_string(),
        outcome: outcome.to_string(),
        adjustment_set: adjustment.to_vec(),
        status: if reason.is_none() {
            IdentificationStatus::Identified
        } else {
            IdentificationStatus::Unidentified
        },
        reason,
    };

    if let Some(&latent) = z.iter().find(|&&n| !graph.is_observed(n)) {
        return Ok(verdict(Some(format!(
            "adjustment variable {} is unobserved",
            graph.name(latent)
        ))));
    }

    let descendants = graph.descendants(t);
    if let Some(&d) = z.iter().find(|n| descendants.contains(n)) {
        return Ok(verdict(Some(format!(
            "adjustment variable {} is a descendant of {treatment}",
            graph.name(d)
        ))));
    }

    let blocked: HashSet<NodeIndex> = z.iter().copied().collect();
    if backdoor_path_open(graph, t, y, &blocked) {
        return Ok(verdict(Some(format!(
            "a backdoor path from {treatment} to {outcome} is not blocked"
        ))));
    }

    Ok(verdict(None))
}

/// True when T and Y stay connected in the moralised ancestral graph of
/// {T, Y} ∪ Z (T's outgoing edges removed) after deleting Z.
fn backdoor_path_open(
    graph: &CausalGraph,
    t: NodeIndex,
    y: NodeIndex,
    conditioned: &HashSet<NodeIndex>,
) -> bool {
    let seeds = [t, y].into_iter().chain(conditioned.iter().copied());
    let relevant = graph.ancestral_set(seeds, Some(t));

    let mut moral: HashMap<NodeIndex, HashSet<NodeIndex>> = HashMap::new();
    let mut link = |a: NodeIndex, b: NodeIndex| {
        moral.entry(a).or_default().insert(b);
        moral.entry(b).or_default().insert(a);
    };
    for &node in &relevant {
        let parents: Vec<NodeIndex> = graph
            .parents(node, Some(t))
            .into_iter()
            .filter(|p| relevant.contains(p))
            .collect();
        for (i, &p) in parents.iter().enumerate() {
            link(node, p);
            for &q in &parents[i + 1..] {
                link(p, q);
            }
        }
    }

    let mut visited = HashSet::from([t]);
    let mut queue = VecDeque::from([t]);
    while let Some(current) = queue.pop_front() {
        if current == y {
            return true;
        }
        let Some(neighbors) = moral.get(&current) else {
            continue;
        };
        for &next in neighbors {
            if conditioned.contains(&next) {
                continue;
            }
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}
