//! Dependency graph construction and ordering
//!
//! [`DependencyGraph`] maps each visited package to the ordered list of its
//! direct dependencies. Packages that only ever appear as a dependency (leaves
//! never explored, or packages whose lookup failed) have no entry of their
//! own but still belong to the graph's node universe.
//!
//! - [`builder`] - Traversal over a [`DependencyProvider`](crate::provider::DependencyProvider)
//! - [`order`] - Load order with cycle detection (Kahn's algorithm)

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub mod builder;
pub mod order;

pub use builder::{BuildError, BuildOutcome, GraphBuilder, LookupFailure};
pub use order::{LoadOrder, load_order};

/// Package name to ordered direct dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    entries: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the direct dependencies of a visited package
    pub fn insert(&mut self, node: impl Into<String>, dependencies: Vec<String>) {
        self.entries.insert(node.into(), dependencies);
    }

    /// Direct dependencies of a visited package
    pub fn dependencies(&self, node: &str) -> Option<&[String]> {
        self.entries.get(node).map(Vec::as_slice)
    }

    /// Whether the package was visited (has its own entry)
    pub fn contains(&self, node: &str) -> bool {
        self.entries.contains_key(node)
    }

    /// Visited packages with their dependency lists, ordered by name
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(node, deps)| (node.as_str(), deps.as_slice()))
    }

    /// Every `(from, to)` edge, `from` ordered by name and `to` in declaration order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries()
            .flat_map(|(from, deps)| deps.iter().map(move |to| (from, to.as_str())))
    }

    /// All identifiers appearing as a key or as a dependency
    pub fn universe(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(|(node, deps)| std::iter::once(node).chain(deps.iter()))
            .map(String::as_str)
            .collect()
    }

    /// Number of visited packages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the node universe
    pub fn node_count(&self) -> usize {
        self.universe().len()
    }

    pub fn edge_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Dependency cycles as strongly connected components
    ///
    /// Each cycle is sorted by name and the list is sorted, so the result is
    /// stable across runs. A package depending on itself is a cycle of one.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let graph = self.to_petgraph();

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&idx| graph.contains_edge(idx, idx))
            })
            .map(|component| {
                let mut names: Vec<String> =
                    component.iter().map(|&idx| graph[idx].to_string()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Petgraph view with edges pointing from dependent to dependency
    fn to_petgraph(&self) -> DiGraph<&str, ()> {
        let mut graph = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for node in self.universe() {
            index.insert(node, graph.add_node(node));
        }
        for (from, to) in self.edges() {
            graph.update_edge(index[from], index[to], ());
        }

        graph
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<String>)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (S, Vec<String>)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (node, deps) in iter {
            graph.insert(node, deps);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
