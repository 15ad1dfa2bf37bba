// Tests for Mermaid text output

use super::*;

fn graph_of(entries: &[(&str, &[&str])]) -> DependencyGraph {
    entries
        .iter()
        .map(|(node, deps)| (*node, deps.iter().map(|d| d.to_string()).collect()))
        .collect()
}

#[test]
fn test_sample_graph() {
    let graph = graph_of(&[
        ("App", &["Lib2", "Lib1"]),
        ("Lib1", &["Core"]),
        ("Lib2", &["Core"]),
        ("Core", &[]),
    ]);

    let expected = "graph TD\n\
                    \tCore\n\
                    \tApp --> Lib1\n\
                    \tApp --> Lib2\n\
                    \tLib1 --> Core\n\
                    \tLib2 --> Core";
    assert_eq!(render_mermaid(&graph), expected);
}

#[test]
fn test_unexplored_leaf_is_listed_as_isolated_node() {
    let graph = graph_of(&[("App", &["Leaf"])]);
    assert_eq!(render_mermaid(&graph), "graph TD\n\tLeaf\n\tApp --> Leaf");
}

#[test]
fn test_disconnected_node_appears_as_isolated_line() {
    let graph = graph_of(&[("App", &["Lib"]), ("Lib", &[]), ("Orphan", &[])]);
    let text = render_mermaid(&graph);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["graph TD", "\tLib", "\tOrphan", "\tApp --> Lib"]);
}

#[test]
fn test_mutual_edges_both_listed() {
    let graph = graph_of(&[("A", &["B"]), ("B", &["A"])]);
    assert_eq!(render_mermaid(&graph), "graph TD\n\tA --> B\n\tB --> A");
}

#[test]
fn test_empty_graph_is_header_only() {
    assert_eq!(render_mermaid(&DependencyGraph::new()), HEADER);
}

#[test]
fn test_output_is_deterministic() {
    let graph = graph_of(&[("Z", &["m", "a"]), ("a", &["m"]), ("Q", &[])]);
    assert_eq!(render_mermaid(&graph), render_mermaid(&graph));
}
