use super::*;

#[test]
fn test_join_with_and_without_details() {
    assert_eq!(join("SVG file", "graph.svg"), "SVG file: graph.svg");
    assert_eq!(join("Done", ""), "Done");
}

#[test]
fn test_status_lines_do_not_panic() {
    let styling = StyleManager::new(false);
    let status = StatusDisplay::new(&styling);

    status.success("Graph built", "4 nodes");
    status.error("Lib1", "not found");
    status.warning("Lookup failed for Lib1");
    status.info("using fixture provider");
    status.emphasis("Load order:");
    status.subtle("Run 'depgraph --help' for usage");
    status.list(&["Core", "Lib1"]);
}
