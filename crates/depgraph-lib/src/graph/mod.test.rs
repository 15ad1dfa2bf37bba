// Tests for the shared dependency graph structure

use super::*;

fn graph_of(entries: &[(&str, &[&str])]) -> DependencyGraph {
    entries
        .iter()
        .map(|(node, deps)| (*node, deps.iter().map(|d| d.to_string()).collect()))
        .collect()
}

#[test]
fn test_new_graph_is_empty() {
    let graph = DependencyGraph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.cycles().is_empty());
}

#[test]
fn test_universe_includes_unexplored_dependencies() {
    let graph = graph_of(&[("App", &["Lib1", "Lib2"]), ("Lib1", &["Core"])]);

    let universe: Vec<&str> = graph.universe().into_iter().collect();
    assert_eq!(universe, vec!["App", "Core", "Lib1", "Lib2"]);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.node_count(), 4);
    assert!(!graph.contains("Core"));
    assert!(graph.dependencies("Core").is_none());
}

#[test]
fn test_universe_keeps_distinct_casings() {
    let graph = graph_of(&[("App", &["core"]), ("Lib", &["Core"])]);
    assert_eq!(graph.node_count(), 4);
}

#[test]
fn test_edges_follow_key_order_then_declaration_order() {
    let graph = graph_of(&[("B", &["Z", "A"]), ("A", &["C"])]);
    let edges: Vec<(&str, &str)> = graph.edges().collect();
    assert_eq!(edges, vec![("A", "C"), ("B", "Z"), ("B", "A")]);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_insert_replaces_entry() {
    let mut graph = DependencyGraph::new();
    graph.insert("App", vec!["Old".to_string()]);
    graph.insert("App", vec![]);
    assert_eq!(graph.dependencies("App"), Some(&[][..]));
}

#[test]
fn test_cycles_lists_mutual_dependency() {
    let graph = graph_of(&[("A", &["B"]), ("B", &["A"]), ("C", &["A"])]);
    assert_eq!(
        graph.cycles(),
        vec![vec!["A".to_string(), "B".to_string()]]
    );
}

#[test]
fn test_cycles_include_self_loops_and_are_sorted() {
    let graph = graph_of(&[
        ("Z", &["Z"]),
        ("C", &["D"]),
        ("D", &["E"]),
        ("E", &["C"]),
        ("F", &[]),
    ]);

    assert_eq!(
        graph.cycles(),
        vec![
            vec!["C".to_string(), "D".to_string(), "E".to_string()],
            vec!["Z".to_string()],
        ]
    );
}

#[test]
fn test_acyclic_graph_has_no_cycles() {
    let graph = graph_of(&[
        ("App", &["Lib1", "Lib2"]),
        ("Lib1", &["Core"]),
        ("Lib2", &["Core"]),
        ("Core", &[]),
    ]);
    assert!(graph.cycles().is_empty());
}
