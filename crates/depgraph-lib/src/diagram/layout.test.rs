// Tests for level assignment and node placement

use super::*;

fn graph_of(entries: &[(&str, &[&str])]) -> DependencyGraph {
    entries
        .iter()
        .map(|(node, deps)| (*node, deps.iter().map(|d| d.to_string()).collect()))
        .collect()
}

fn sample() -> DependencyGraph {
    graph_of(&[
        ("App", &["Lib2", "Lib1"]),
        ("Lib1", &["Core"]),
        ("Lib2", &["Core"]),
        ("Core", &[]),
    ])
}

#[test]
fn test_levels_follow_breadth_first_distance() {
    let levels = assign_levels(&sample(), "App");

    assert_eq!(levels["App"], 0);
    assert_eq!(levels["Lib1"], 1);
    assert_eq!(levels["Lib2"], 1);
    assert_eq!(levels["Core"], 2);
}

#[test]
fn test_first_discovered_level_wins() {
    // D is reached directly from A before B is expanded; the back edge to A
    // does not move the root
    let graph = graph_of(&[("A", &["B", "D"]), ("B", &["D"]), ("D", &["A"])]);
    let levels = assign_levels(&graph, "A");

    assert_eq!(levels["A"], 0);
    assert_eq!(levels["B"], 1);
    assert_eq!(levels["D"], 1);
}

#[test]
fn test_sample_positions() {
    let layout = layout(&sample(), "App");

    assert_eq!(layout.len(), 4);
    assert_eq!(layout.get("App"), Some(Position::new(100, 100)));
    // Siblings sorted by name regardless of declaration order
    assert_eq!(layout.get("Lib1"), Some(Position::new(300, 100)));
    assert_eq!(layout.get("Lib2"), Some(Position::new(300, 200)));
    assert_eq!(layout.get("Core"), Some(Position::new(500, 100)));
    assert_eq!(layout.max_extent(), Some((500, 200)));
}

#[test]
fn test_disconnected_node_is_placed_below_everything() {
    let graph = graph_of(&[
        ("App", &["Lib1", "Lib2"]),
        ("Lib1", &[]),
        ("Lib2", &[]),
        ("Orphan", &[]),
    ]);

    let layout = layout(&graph, "App");

    assert_eq!(layout.len(), 4);
    // Three nodes placed already, so the orphan takes row 3 of the first column
    assert_eq!(layout.get("Orphan"), Some(Position::new(MARGIN, MARGIN + 3 * ROW_STEP)));
}

#[test]
fn test_multiple_unreachable_nodes_do_not_overlap() {
    let graph = graph_of(&[("App", &[]), ("Zed", &["Yak"]), ("Xen", &[])]);
    let layout = layout(&graph, "App");

    let mut seen = std::collections::HashSet::new();
    for (node, position) in layout.iter() {
        assert!(seen.insert(position), "{node} overlaps another node at {position:?}");
    }
    assert_eq!(layout.len(), 4);
}

#[test]
fn test_root_missing_from_graph_still_positioned() {
    let layout = layout(&DependencyGraph::new(), "Lonely");
    assert_eq!(layout.len(), 1);
    assert_eq!(layout.get("Lonely"), Some(Position::new(MARGIN, MARGIN)));
}

#[test]
fn test_layout_is_deterministic() {
    let graph = graph_of(&[
        ("R", &["c", "a", "b"]),
        ("a", &["x"]),
        ("b", &["x", "y"]),
        ("Island", &["z"]),
    ]);

    let first = layout(&graph, "R");
    let second = layout(&graph, "R");
    assert_eq!(first, second);
    assert_eq!(first.len(), graph.node_count());
}

#[test]
fn test_coordinates_saturate_instead_of_overflowing() {
    assert_eq!(coordinate(0, LEVEL_STEP), MARGIN);
    assert_eq!(coordinate(2, LEVEL_STEP), 500);
    assert_eq!(coordinate(3, ROW_STEP), 400);
    assert_eq!(coordinate(u32::MAX as usize, ROW_STEP), u32::MAX);
    assert_eq!(coordinate(usize::MAX, LEVEL_STEP), u32::MAX);
}
