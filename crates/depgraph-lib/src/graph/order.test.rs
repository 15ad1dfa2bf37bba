// Tests for load ordering and cycle detection

use super::*;

fn graph_of(entries: &[(&str, &[&str])]) -> DependencyGraph {
    entries
        .iter()
        .map(|(node, deps)| (*node, deps.iter().map(|d| d.to_string()).collect()))
        .collect()
}

fn position(order: &LoadOrder, node: &str) -> usize {
    order
        .order
        .iter()
        .position(|n| n == node)
        .unwrap_or_else(|| panic!("{node} missing from order {:?}", order.order))
}

/// Every dependency must be loaded before each package that lists it
fn assert_dependencies_first(graph: &DependencyGraph, order: &LoadOrder) {
    for (from, to) in graph.edges() {
        assert!(
            position(order, to) < position(order, from),
            "{to} should load before {from}: {:?}",
            order.order
        );
    }
}

#[test]
fn test_sample_graph_loads_core_first() {
    let graph = graph_of(&[
        ("App", &["Lib1", "Lib2"]),
        ("Lib1", &["Core"]),
        ("Lib2", &["Core"]),
        ("Core", &[]),
    ]);

    let order = load_order(&graph);

    assert!(order.is_acyclic());
    assert_eq!(order.order, vec!["Core", "Lib1", "Lib2", "App"]);
    assert_dependencies_first(&graph, &order);
}

#[test]
fn test_mutual_dependency_is_cyclic_remainder() {
    let graph = graph_of(&[("A", &["B"]), ("B", &["A"])]);

    let order = graph.load_order();

    assert!(order.order.is_empty());
    assert_eq!(
        order.cyclic,
        BTreeSet::from(["A".to_string(), "B".to_string()])
    );
    assert!(!order.is_acyclic());
}

#[test]
fn test_cycle_remainder_includes_dependents_of_cycle() {
    let graph = graph_of(&[
        ("App", &["A", "Util"]),
        ("A", &["B"]),
        ("B", &["A"]),
        ("Util", &[]),
    ]);

    let order = load_order(&graph);

    assert_eq!(order.order, vec!["Util"]);
    assert_eq!(
        order.cyclic,
        BTreeSet::from(["A".to_string(), "App".to_string(), "B".to_string()])
    );
}

#[test]
fn test_self_dependency_is_cyclic() {
    let graph = graph_of(&[("Loop", &["Loop"]), ("Free", &[])]);
    let order = load_order(&graph);

    assert_eq!(order.order, vec!["Free"]);
    assert_eq!(order.cyclic, BTreeSet::from(["Loop".to_string()]));
}

#[test]
fn test_unexplored_leaves_are_ordered() {
    // Leaf nodes appear only as dependency values
    let graph = graph_of(&[("App", &["Zeta", "Alpha"])]);
    let order = load_order(&graph);

    assert_eq!(order.order, vec!["Alpha", "Zeta", "App"]);
}

#[test]
fn test_order_covers_entire_universe_for_dags() {
    let graph = graph_of(&[
        ("A", &["B", "C", "E"]),
        ("B", &["D", "F"]),
        ("C", &["D"]),
        ("D", &["G"]),
        ("E", &["G", "B"]),
        ("F", &["H"]),
    ]);

    let order = load_order(&graph);

    let ordered: BTreeSet<&str> = order.order.iter().map(String::as_str).collect();
    assert_eq!(ordered, graph.universe());
    assert_eq!(order.order.len(), graph.node_count());
    assert_dependencies_first(&graph, &order);
}

#[test]
fn test_ties_are_broken_lexicographically_then_fifo() {
    let graph = graph_of(&[("Root", &["b", "a", "c"]), ("c", &["a"])]);
    let order = load_order(&graph);

    // a and b start at zero; c is released by a, Root by c
    assert_eq!(order.order, vec!["a", "b", "c", "Root"]);
}

#[test]
fn test_duplicate_edges_are_counted_consistently() {
    let graph = graph_of(&[("App", &["Core", "Core"])]);
    let order = load_order(&graph);

    assert!(order.is_acyclic());
    assert_eq!(order.order, vec!["Core", "App"]);
}

#[test]
fn test_empty_graph() {
    let order = load_order(&DependencyGraph::new());
    assert!(order.order.is_empty());
    assert!(order.is_acyclic());
}

#[test]
fn test_order_is_deterministic() {
    let graph = graph_of(&[("X", &["M", "N"]), ("M", &["Q"]), ("N", &["Q"])]);
    assert_eq!(load_order(&graph), load_order(&graph));
}
