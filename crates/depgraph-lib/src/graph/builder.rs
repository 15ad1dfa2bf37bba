//! Graph construction by traversal over a dependency provider
//!
//! Starting from a root package, the builder asks the provider for each
//! package's direct dependencies exactly once and accumulates the results in
//! a [`DependencyGraph`]. The frontier is an explicit stack (depth-first) or
//! queue (breadth-first), so deep dependency chains never grow the call stack.

use super::DependencyGraph;
use crate::primitives::{FailurePolicy, TraversalOrder};
use crate::provider::{DependencyProvider, LookupError};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use thiserror::Error;
use tracing::{debug, info_span, trace, warn};

/// Errors that abort a build
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Root package name is empty")]
    EmptyRoot,

    #[error("Failed to resolve dependencies of {node} {version}: {source}")]
    Lookup {
        node: String,
        version: String,
        #[source]
        source: LookupError,
    },
}

/// A lookup that failed but was tolerated under [`FailurePolicy::Lenient`]
#[derive(Debug)]
pub struct LookupFailure {
    pub node: String,
    pub version: String,
    pub error: LookupError,
}

/// Result of a completed traversal
#[derive(Debug)]
pub struct BuildOutcome {
    pub graph: DependencyGraph,
    /// Graph key of the root package
    pub root: String,
    /// Packages recorded with no dependencies because their lookup failed
    pub failures: Vec<LookupFailure>,
}

impl BuildOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pending visit: package name and the version to ask the provider for
struct Visit {
    node: String,
    version: String,
}

/// Traversal frontier; the order only changes which lookup is issued next
struct Frontier {
    order: TraversalOrder,
    pending: VecDeque<Visit>,
}

impl Frontier {
    fn new(order: TraversalOrder, root: Visit) -> Self {
        Self {
            order,
            pending: VecDeque::from([root]),
        }
    }

    fn pop(&mut self) -> Option<Visit> {
        match self.order {
            TraversalOrder::DepthFirst => self.pending.pop_back(),
            TraversalOrder::BreadthFirst => self.pending.pop_front(),
        }
    }

    /// Schedule the children of one package
    ///
    /// Depth-first pushes in reverse so the first declared dependency is
    /// explored first, matching a recursive walk.
    fn extend(&mut self, visits: Vec<Visit>) {
        match self.order {
            TraversalOrder::DepthFirst => self.pending.extend(visits.into_iter().rev()),
            TraversalOrder::BreadthFirst => self.pending.extend(visits),
        }
    }
}

/// Spellings of each package name, folded to ASCII lowercase
///
/// The graph key for a package is the provider's canonical name when it gave
/// one, otherwise the smallest spelling seen anywhere in the traversal. Both
/// are the same whichever order the packages were visited in.
#[derive(Default)]
struct Names {
    canonical: HashMap<String, String>,
    seen: HashMap<String, BTreeSet<String>>,
}

impl Names {
    fn saw(&mut self, name: &str) {
        self.seen
            .entry(name.to_ascii_lowercase())
            .or_default()
            .insert(name.to_string());
    }

    fn declare(&mut self, name: &str, canonical: &str) {
        let canonical = canonical.trim();
        if !canonical.is_empty() {
            self.canonical
                .insert(name.to_ascii_lowercase(), canonical.to_string());
        }
    }

    fn key(&self, name: &str) -> String {
        let folded = name.to_ascii_lowercase();
        self.canonical
            .get(&folded)
            .or_else(|| self.seen.get(&folded).and_then(BTreeSet::first))
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

/// Builds a [`DependencyGraph`] rooted at one package
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    order: TraversalOrder,
    policy: FailurePolicy,
}

impl GraphBuilder {
    /// Depth-first, lenient builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Traverse from `root` and return the accumulated graph
    ///
    /// Dependencies without a declared version are looked up with
    /// `root_version`. Packages are deduplicated ignoring ASCII case, and
    /// every spelling of a package, key or dependency, is rewritten to one
    /// graph key that does not depend on the traversal order.
    pub fn build<P>(
        &self,
        provider: &P,
        root: &str,
        root_version: &str,
    ) -> Result<BuildOutcome, BuildError>
    where
        P: DependencyProvider + ?Sized,
    {
        let root = root.trim();
        if root.is_empty() {
            return Err(BuildError::EmptyRoot);
        }

        let span = info_span!("traversal", root, order = self.order.as_str());
        let _guard = span.enter();

        let mut names = Names::default();
        let mut visits: Vec<(String, Vec<String>)> = Vec::new();
        let mut failures = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier = Frontier::new(
            self.order,
            Visit {
                node: root.to_string(),
                version: root_version.to_string(),
            },
        );

        while let Some(Visit { node, version }) = frontier.pop() {
            if !visited.insert(node.to_ascii_lowercase()) {
                trace!(node = %node, "Already visited");
                continue;
            }
            names.saw(&node);

            let resolved = match provider.resolve(&node, &version) {
                Ok(resolved) => resolved,
                Err(error) => match self.policy {
                    FailurePolicy::Strict => {
                        return Err(BuildError::Lookup {
                            node,
                            version,
                            source: error,
                        });
                    }
                    FailurePolicy::Lenient => {
                        warn!(node = %node, version = %version, error = %error, "Lookup failed, recording package without dependencies");
                        visits.push((node.clone(), Vec::new()));
                        failures.push(LookupFailure {
                            node,
                            version,
                            error,
                        });
                        continue;
                    }
                },
            };
            if let Some(canonical) = &resolved.canonical {
                names.declare(&node, canonical);
            }

            let dependencies: Vec<_> = resolved
                .dependencies
                .into_iter()
                .filter(|dep| !dep.id.trim().is_empty())
                .collect();

            let children = dependencies
                .iter()
                .filter(|dep| !visited.contains(&dep.id.to_ascii_lowercase()))
                .map(|dep| Visit {
                    node: dep.id.clone(),
                    version: dep
                        .version
                        .clone()
                        .filter(|v| !v.trim().is_empty())
                        .unwrap_or_else(|| root_version.to_string()),
                })
                .collect();

            for dep in &dependencies {
                names.saw(&dep.id);
            }
            debug!(node = %node, version = %version, count = dependencies.len(), "Visited");
            visits.push((node, dependencies.into_iter().map(|dep| dep.id).collect()));
            frontier.extend(children);
        }

        let graph: DependencyGraph = visits
            .into_iter()
            .map(|(node, deps)| {
                let deps: Vec<String> = deps.iter().map(|dep| names.key(dep)).collect();
                (names.key(&node), deps)
            })
            .collect();
        for failure in &mut failures {
            failure.node = names.key(&failure.node);
        }

        debug!(
            visited = graph.len(),
            nodes = graph.node_count(),
            failures = failures.len(),
            "Traversal complete"
        );
        Ok(BuildOutcome {
            graph,
            root: names.key(root),
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("builder.test.rs");
}
