//! Load order via Kahn's algorithm
//!
//! A package can be loaded once everything it depends on has been loaded, so
//! a node's in-degree is the number of dependencies it lists. Nodes left with
//! a positive in-degree when the queue drains sit on a cycle or depend on one.

use super::DependencyGraph;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

/// Linear load order plus whatever could not be ordered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadOrder {
    /// Dependencies before their dependents
    pub order: Vec<String>,
    /// Nodes on, or depending on, a cycle
    pub cyclic: BTreeSet<String>,
}

impl LoadOrder {
    /// True when every node was ordered
    pub fn is_acyclic(&self) -> bool {
        self.cyclic.is_empty()
    }
}

/// Compute the load order of every node in the graph's universe
///
/// Zero in-degree nodes are seeded in lexicographic order and released in
/// FIFO order, so the result is reproducible for a given graph.
pub fn load_order(graph: &DependencyGraph) -> LoadOrder {
    let universe = graph.universe();

    let mut indegree: BTreeMap<&str, usize> = universe.iter().map(|&node| (node, 0)).collect();
    let mut dependents: BTreeMap<&str, Vec<&str>> =
        universe.iter().map(|&node| (node, Vec::new())).collect();

    for (node, dep) in graph.edges() {
        *indegree.entry(node).or_default() += 1;
        dependents.entry(dep).or_default().push(node);
    }

    let mut queue: VecDeque<&str> = indegree
        .iter()
        .filter(|&(_, &count)| count == 0)
        .map(|(&node, _)| node)
        .collect();
    let mut order = Vec::with_capacity(universe.len());

    while let Some(node) = queue.pop_front() {
        order.push(node.to_string());
        for &dependent in dependents.get(node).into_iter().flatten() {
            if let Some(count) = indegree.get_mut(dependent) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(dependent);
                }
            }
        }
    }

    let cyclic: BTreeSet<String> = indegree
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .map(|(node, _)| node.to_string())
        .collect();

    debug!(
        ordered = order.len(),
        cyclic = cyclic.len(),
        "Computed load order"
    );
    LoadOrder { order, cyclic }
}

impl DependencyGraph {
    /// See [`load_order`]
    pub fn load_order(&self) -> LoadOrder {
        load_order(self)
    }
}

#[cfg(test)]
mod tests {
    include!("order.test.rs");
}
