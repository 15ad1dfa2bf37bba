// Tests for graph construction

use super::*;
use crate::provider::{Dependency, FixtureProvider};
use std::cell::RefCell;
use std::collections::HashMap;

const SAMPLE: &str = "App: Lib1 Lib2\nLib1: Core\nLib2: Core\nCore:";

/// Provider with scripted answers that records every lookup it receives
#[derive(Default)]
struct ScriptedProvider {
    answers: HashMap<String, Vec<Dependency>>,
    failing: Vec<String>,
    calls: RefCell<Vec<(String, String)>>,
}

impl ScriptedProvider {
    fn with(mut self, node: &str, deps: &[(&str, Option<&str>)]) -> Self {
        self.answers.insert(
            node.to_string(),
            deps.iter()
                .map(|(id, version)| Dependency::new(*id, version.map(str::to_string)))
                .collect(),
        );
        self
    }

    fn failing(mut self, node: &str) -> Self {
        self.failing.push(node.to_string());
        self
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }
}

impl DependencyProvider for ScriptedProvider {
    fn lookup(&self, id: &str, version: &str) -> Result<Vec<Dependency>, LookupError> {
        self.calls
            .borrow_mut()
            .push((id.to_string(), version.to_string()));
        if self.failing.iter().any(|f| f == id) {
            return Err(LookupError::NotFound {
                package: id.to_string(),
                version: version.to_string(),
            });
        }
        Ok(self.answers.get(id).cloned().unwrap_or_default())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_sample_fixture_builds_expected_graph() {
    let fixture = FixtureProvider::parse(SAMPLE).unwrap();
    let outcome = GraphBuilder::new().build(&fixture, "App", "1.0.0").unwrap();

    assert!(outcome.is_complete());
    let graph = outcome.graph;
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.dependencies("App").unwrap(), strings(&["Lib1", "Lib2"]));
    assert_eq!(graph.dependencies("Lib1").unwrap(), strings(&["Core"]));
    assert_eq!(graph.dependencies("Lib2").unwrap(), strings(&["Core"]));
    assert!(graph.dependencies("Core").unwrap().is_empty());
}

#[test]
fn test_depth_first_issues_lookups_in_recursive_preorder() {
    let provider = ScriptedProvider::default()
        .with("A", &[("B", None), ("C", None)])
        .with("B", &[("D", None)])
        .with("C", &[("D", None)]);

    GraphBuilder::new()
        .with_order(TraversalOrder::DepthFirst)
        .build(&provider, "A", "1.0")
        .unwrap();

    let order: Vec<String> = provider.calls().into_iter().map(|(id, _)| id).collect();
    assert_eq!(order, strings(&["A", "B", "D", "C"]));
}

#[test]
fn test_breadth_first_issues_lookups_level_by_level() {
    let provider = ScriptedProvider::default()
        .with("A", &[("B", None), ("C", None)])
        .with("B", &[("D", None)])
        .with("C", &[("D", None)]);

    GraphBuilder::new()
        .with_order(TraversalOrder::BreadthFirst)
        .build(&provider, "A", "1.0")
        .unwrap();

    let order: Vec<String> = provider.calls().into_iter().map(|(id, _)| id).collect();
    assert_eq!(order, strings(&["A", "B", "C", "D"]));
}

#[test]
fn test_both_traversal_orders_converge_to_same_graph() {
    let fixture = FixtureProvider::parse(
        "A: B C E\nB: D F\nC: D A\nD: G\nE: G B\nF: A\nG:",
    )
    .unwrap();

    let dfs = GraphBuilder::new()
        .with_order(TraversalOrder::DepthFirst)
        .build(&fixture, "A", "1.0")
        .unwrap();
    let bfs = GraphBuilder::new()
        .with_order(TraversalOrder::BreadthFirst)
        .build(&fixture, "A", "1.0")
        .unwrap();

    assert_eq!(dfs.graph, bfs.graph);
    assert_eq!(dfs.graph.len(), 7);
}

#[test]
fn test_each_package_is_looked_up_once_ignoring_case() {
    let provider = ScriptedProvider::default()
        .with("App", &[("Core", None), ("CORE", None)])
        .with("Core", &[("app", None)]);

    let outcome = GraphBuilder::new().build(&provider, "App", "1.0").unwrap();

    assert_eq!(
        provider.calls(),
        vec![
            ("App".to_string(), "1.0".to_string()),
            ("Core".to_string(), "1.0".to_string()),
        ]
    );
    // Without a name from the provider, the smallest spelling seen is the key
    assert_eq!(outcome.root, "App");
    assert_eq!(
        outcome.graph.dependencies("App").unwrap(),
        strings(&["CORE", "CORE"])
    );
    assert_eq!(outcome.graph.dependencies("CORE").unwrap(), strings(&["App"]));
    assert_eq!(outcome.graph.len(), 2);
    assert_eq!(outcome.graph.node_count(), 2);
}

#[test]
fn test_mixed_case_ids_converge_across_traversal_orders() {
    let provider = ScriptedProvider::default()
        .with("Root", &[("A", None), ("b", None)])
        .with("A", &[("B", None)]);

    let dfs = GraphBuilder::new()
        .with_order(TraversalOrder::DepthFirst)
        .build(&provider, "Root", "1.0")
        .unwrap();
    let bfs = GraphBuilder::new()
        .with_order(TraversalOrder::BreadthFirst)
        .build(&provider, "Root", "1.0")
        .unwrap();

    assert_eq!(dfs.graph, bfs.graph);
    let keys: Vec<&str> = dfs.graph.entries().map(|(node, _)| node).collect();
    assert_eq!(keys, ["A", "B", "Root"]);
    assert_eq!(dfs.graph.dependencies("Root").unwrap(), strings(&["A", "B"]));
    assert_eq!(dfs.graph.dependencies("A").unwrap(), strings(&["B"]));
}

#[test]
fn test_provider_spelling_becomes_the_key() {
    let fixture = FixtureProvider::parse("app: LIB\nLib: core\nCore:").unwrap();

    let dfs = GraphBuilder::new()
        .with_order(TraversalOrder::DepthFirst)
        .build(&fixture, "App", "1.0")
        .unwrap();
    let bfs = GraphBuilder::new()
        .with_order(TraversalOrder::BreadthFirst)
        .build(&fixture, "App", "1.0")
        .unwrap();

    assert_eq!(dfs.graph, bfs.graph);
    assert_eq!(dfs.root, "app");
    assert_eq!(dfs.graph.dependencies("app").unwrap(), strings(&["Lib"]));
    assert_eq!(dfs.graph.dependencies("Lib").unwrap(), strings(&["Core"]));
    assert!(dfs.graph.dependencies("Core").unwrap().is_empty());
}

#[test]
fn test_declared_versions_propagate_and_fall_back_to_root() {
    let provider = ScriptedProvider::default()
        .with("App", &[("Pinned", Some("2.5.0")), ("Floating", None)])
        .with("Pinned", &[("Blank", Some("  "))]);

    GraphBuilder::new().build(&provider, "App", "1.0.0").unwrap();

    assert_eq!(
        provider.calls(),
        vec![
            ("App".to_string(), "1.0.0".to_string()),
            ("Pinned".to_string(), "2.5.0".to_string()),
            ("Blank".to_string(), "1.0.0".to_string()),
            ("Floating".to_string(), "1.0.0".to_string()),
        ]
    );
}

#[test]
fn test_dependencies_without_identifier_are_dropped() {
    let provider = ScriptedProvider::default().with("App", &[("", None), ("Lib", None), ("  ", None)]);

    let outcome = GraphBuilder::new().build(&provider, "App", "1.0").unwrap();

    assert_eq!(outcome.graph.dependencies("App").unwrap(), strings(&["Lib"]));
    assert_eq!(provider.calls().len(), 2);
}

#[test]
fn test_lenient_policy_records_failed_node_and_continues() {
    let provider = ScriptedProvider::default()
        .with("App", &[("Broken", None), ("Lib", None)])
        .with("Lib", &[("Core", None)])
        .failing("Broken");

    let outcome = GraphBuilder::new()
        .with_policy(FailurePolicy::Lenient)
        .build(&provider, "App", "1.0")
        .unwrap();

    assert!(!outcome.is_complete());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].node, "Broken");
    assert!(matches!(
        outcome.failures[0].error,
        LookupError::NotFound { .. }
    ));
    assert_eq!(outcome.graph.dependencies("Broken"), Some(&[][..]));
    assert!(outcome.graph.contains("Lib"));
    assert!(outcome.graph.contains("Core"));
}

#[test]
fn test_strict_policy_aborts_on_first_failure() {
    let provider = ScriptedProvider::default()
        .with("App", &[("Broken", None), ("Lib", None)])
        .failing("Broken");

    let err = GraphBuilder::new()
        .with_policy(FailurePolicy::Strict)
        .build(&provider, "App", "1.0")
        .unwrap_err();

    match err {
        BuildError::Lookup { node, version, .. } => {
            assert_eq!(node, "Broken");
            assert_eq!(version, "1.0");
        }
        other => panic!("unexpected error: {other}"),
    }
    // Lib was never reached
    assert_eq!(provider.calls().len(), 2);
}

#[test]
fn test_root_failure_under_lenient_policy_yields_single_entry() {
    let provider = ScriptedProvider::default().failing("App");
    let outcome = GraphBuilder::new().build(&provider, "App", "1.0").unwrap();

    assert_eq!(outcome.graph.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
}

#[test]
fn test_empty_root_is_rejected() {
    let provider = ScriptedProvider::default();
    let err = GraphBuilder::new().build(&provider, "   ", "1.0").unwrap_err();
    assert!(matches!(err, BuildError::EmptyRoot));
    assert!(provider.calls().is_empty());
}

#[test]
fn test_cyclic_dependencies_terminate() {
    let fixture = FixtureProvider::parse("A: B\nB: A").unwrap();
    let outcome = GraphBuilder::new().build(&fixture, "A", "1.0").unwrap();

    assert_eq!(outcome.graph.dependencies("A").unwrap(), strings(&["B"]));
    assert_eq!(outcome.graph.dependencies("B").unwrap(), strings(&["A"]));
}

#[test]
fn test_repeated_builds_are_identical() {
    let fixture = FixtureProvider::parse(SAMPLE).unwrap();
    let builder = GraphBuilder::new();

    let first = builder.build(&fixture, "App", "1.0").unwrap();
    let second = builder.build(&fixture, "App", "1.0").unwrap();
    assert_eq!(first.graph, second.graph);
}

#[test]
fn test_works_through_trait_object() {
    let fixture = FixtureProvider::parse(SAMPLE).unwrap();
    let boxed: Box<dyn DependencyProvider> = Box::new(fixture);

    let outcome = GraphBuilder::new().build(&boxed, "App", "1.0").unwrap();
    assert_eq!(outcome.graph.len(), 4);
}
