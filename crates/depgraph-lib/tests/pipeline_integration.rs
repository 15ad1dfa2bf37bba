//! Integration tests for the full pipeline
//!
//! Fixture text goes in, a graph is built with both traversal orders, and
//! the load order and both diagram formats come out.

use anyhow::Result;
use depgraph_lib::diagram::assign_levels;
use depgraph_lib::{
    DependencyProvider, FailurePolicy, FixtureProvider, GraphBuilder, Position, TraversalOrder,
    layout, render_mermaid, render_svg,
};

const SAMPLE: &str = "\
# sample package set
App: Lib1 Lib2
Lib1: Core
Lib2: Core
Core:
";

/// Both traversal orders visit the same packages and record the same edges
#[test]
fn traversal_orders_build_the_same_graph() -> Result<()> {
    let fixture: FixtureProvider = SAMPLE.parse()?;

    let depth_first = GraphBuilder::new()
        .with_order(TraversalOrder::DepthFirst)
        .build(&fixture, "App", "1.0.0")?;
    let breadth_first = GraphBuilder::new()
        .with_order(TraversalOrder::BreadthFirst)
        .build(&fixture, "App", "1.0.0")?;

    assert!(depth_first.is_complete());
    assert_eq!(depth_first.graph, breadth_first.graph);
    assert_eq!(depth_first.graph.node_count(), 4);
    assert_eq!(depth_first.graph.edge_count(), 4);
    Ok(())
}

/// Sample package set from fixture text to SVG document
#[test]
fn sample_pipeline_end_to_end() -> Result<()> {
    let fixture: FixtureProvider = SAMPLE.parse()?;
    let outcome = GraphBuilder::new().build(&fixture, "App", "1.0.0")?;
    let graph = &outcome.graph;

    // Load order: dependencies first, ties broken by name
    let order = graph.load_order();
    assert!(order.is_acyclic());
    assert_eq!(order.order, ["Core", "Lib1", "Lib2", "App"]);

    // Mermaid: one edge line per declared dependency
    let mermaid = render_mermaid(graph);
    assert!(mermaid.starts_with("graph TD"));
    for edge in ["App --> Lib1", "App --> Lib2", "Lib1 --> Core", "Lib2 --> Core"] {
        assert!(mermaid.contains(edge), "missing edge {edge}");
    }

    // Layout: one column per breadth-first level
    let levels = assign_levels(graph, "App");
    assert_eq!(levels["Core"], 2);
    let placed = layout(graph, "App");
    assert_eq!(placed.get("App"), Some(Position::new(100, 100)));

    let svg = render_svg(graph, &placed)?;
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<circle").count(), 4);
    assert_eq!(svg.matches("<line").count(), 4);
    Ok(())
}

/// Mutual dependencies are reported as a cycle and drawn as two offset lines
#[test]
fn mutual_dependency_pipeline() -> Result<()> {
    let fixture: FixtureProvider = "A: B\nB: A\n".parse()?;
    let outcome = GraphBuilder::new().build(&fixture, "A", "1.0.0")?;
    let graph = &outcome.graph;

    let order = graph.load_order();
    assert!(order.order.is_empty());
    assert_eq!(order.cyclic.len(), 2);
    assert_eq!(graph.cycles(), vec![vec!["A".to_string(), "B".to_string()]]);

    let svg = render_svg(graph, &layout(graph, "A"))?;
    assert_eq!(svg.matches("<line").count(), 2);
    Ok(())
}

/// A dependency the fixture never declares becomes a leaf, not a failure
#[test]
fn undeclared_dependency_is_a_leaf() -> Result<()> {
    let fixture: FixtureProvider = "App: Ghost\n".parse()?;
    assert!(fixture.lookup("Ghost", "1.0.0")?.is_empty());

    let outcome = GraphBuilder::new()
        .with_policy(FailurePolicy::Strict)
        .build(&fixture, "App", "1.0.0")?;

    assert_eq!(outcome.graph.dependencies("Ghost"), Some(&[][..]));
    assert_eq!(outcome.graph.load_order().order, ["Ghost", "App"]);
    Ok(())
}
