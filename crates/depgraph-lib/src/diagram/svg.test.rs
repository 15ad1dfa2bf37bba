// Tests for SVG rendering and edge geometry

use super::*;
use crate::diagram::layout::layout;

fn graph_of(entries: &[(&str, &[&str])]) -> DependencyGraph {
    entries
        .iter()
        .map(|(node, deps)| (*node, deps.iter().map(|d| d.to_string()).collect()))
        .collect()
}

fn close_to(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn render(graph: &DependencyGraph, root: &str) -> String {
    render_svg(graph, &layout(graph, root)).expect("render")
}

#[test]
fn test_mutual_pair_draws_two_offset_lines() {
    let graph = graph_of(&[("A", &["B"]), ("B", &["A"])]);
    let placed = layout(&graph, "A");

    let segments = edge_segments(&graph, &placed);
    assert_eq!(segments.len(), 2);

    // A at (100, 100), B at (300, 100): the normal points straight down
    let [forward, backward] = [segments[0], segments[1]];
    assert!(close_to(forward.x1, 100.0) && close_to(forward.y1, 110.0));
    assert!(close_to(forward.x2, 300.0) && close_to(forward.y2, 110.0));
    assert!(close_to(backward.x1, 300.0) && close_to(backward.y1, 90.0));
    assert!(close_to(backward.x2, 100.0) && close_to(backward.y2, 90.0));
}

#[test]
fn test_mutual_offset_is_perpendicular_with_fixed_length() {
    let graph = graph_of(&[("A", &["B", "C"]), ("B", &[]), ("C", &["A"])]);
    let placed = layout(&graph, "A");
    let a = placed.get("A").unwrap();
    let c = placed.get("C").unwrap();

    // A -> B straight, then the A <-> C pair; C -> A is not drawn again
    let segments = edge_segments(&graph, &placed);
    assert_eq!(segments.len(), 3);

    let forward = segments[1];
    let (ox, oy) = (forward.x1 - f64::from(a.x), forward.y1 - f64::from(a.y));
    assert!(close_to(ox.hypot(oy), PARALLEL_OFFSET));

    let (dx, dy) = (f64::from(c.x) - f64::from(a.x), f64::from(c.y) - f64::from(a.y));
    assert!(close_to(ox * dx + oy * dy, 0.0));

    let backward = segments[2];
    assert!(close_to(backward.x1, f64::from(c.x) - ox));
    assert!(close_to(backward.y1, f64::from(c.y) - oy));
}

#[test]
fn test_one_way_edges_are_single_lines() {
    let graph = graph_of(&[("App", &["Lib"]), ("Lib", &["Core"]), ("Core", &[])]);
    let svg = render(&graph, "App");

    assert_eq!(svg.matches("<line").count(), 2);
    assert_eq!(svg.matches("<circle").count(), 3);
    assert_eq!(svg.matches("<text").count(), 3);
}

#[test]
fn test_mutual_pair_renders_exactly_two_lines() {
    let graph = graph_of(&[("A", &["B"]), ("B", &["A"])]);
    let svg = render(&graph, "A");

    assert_eq!(svg.matches("<line").count(), 2);
    assert_eq!(svg.matches("marker-end=\"url(#arrow)\"").count(), 2);
}

#[test]
fn test_duplicate_edges_drawn_once() {
    let graph = graph_of(&[("A", &["B", "B"]), ("B", &[])]);
    let svg = render(&graph, "A");
    assert_eq!(svg.matches("<line").count(), 1);
}

#[test]
fn test_self_dependency_is_single_line() {
    let graph = graph_of(&[("A", &["A"])]);
    let placed = layout(&graph, "A");

    let segments = edge_segments(&graph, &placed);
    assert_eq!(segments.len(), 1);
    assert!(close_to(segments[0].x1, segments[0].x2));
}

#[test]
fn test_document_structure() {
    let graph = graph_of(&[("App", &["Lib"]), ("Lib", &[])]);
    let svg = render(&graph, "App");

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    // App at x=100, Lib at x=300, single row
    assert!(svg.contains("width=\"400\""));
    assert!(svg.contains("height=\"200\""));
    assert_eq!(svg.matches("<marker").count(), 1);
    assert!(svg.contains("<path d=\"M0,0 L0,6 L9,3 z\" fill=\"#000\"/>"));
    assert!(svg.contains(">App</text>"));
    assert!(svg.contains(">Lib</text>"));

    // Edges are painted before nodes so circles sit on top
    let last_line = svg.rfind("<line").unwrap();
    let first_circle = svg.find("<circle").unwrap();
    assert!(last_line < first_circle);
}

#[test]
fn test_empty_layout_uses_default_canvas() {
    let svg = render_svg(&DependencyGraph::new(), &Layout::default()).unwrap();

    assert!(svg.contains("width=\"300\""));
    assert!(svg.contains("height=\"200\""));
    assert_eq!(svg.matches("<circle").count(), 0);
}

#[test]
fn test_names_are_escaped() {
    let graph = graph_of(&[("A<&>", &["B\"q"]), ("B\"q", &[])]);
    let svg = render(&graph, "A<&>");

    assert!(svg.contains("A&lt;&amp;&gt;"));
    assert!(!svg.contains("A<&>"));
}

#[test]
fn test_rendering_is_deterministic() {
    let graph = graph_of(&[
        ("Root", &["A", "B"]),
        ("A", &["B"]),
        ("B", &["A", "C"]),
        ("C", &[]),
    ]);

    assert_eq!(render(&graph, "Root"), render(&graph, "Root"));
}
