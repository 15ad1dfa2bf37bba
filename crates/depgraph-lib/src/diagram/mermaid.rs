//! Mermaid flowchart text

use crate::graph::DependencyGraph;

/// Diagram header line
pub const HEADER: &str = "graph TD";

/// Render the graph as a Mermaid flowchart
///
/// Nodes without outgoing edges are listed first (one per line), then every
/// edge as `source --> destination`. Both passes run in name order.
pub fn render_mermaid(graph: &DependencyGraph) -> String {
    let mut lines = vec![HEADER.to_string()];

    for node in graph.universe() {
        if graph.dependencies(node).is_none_or(<[String]>::is_empty) {
            lines.push(format!("\t{node}"));
        }
    }

    for (node, deps) in graph.entries() {
        let mut sorted: Vec<&String> = deps.iter().collect();
        sorted.sort();
        for dep in sorted {
            lines.push(format!("\t{node} --> {dep}"));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    include!("mermaid.test.rs");
}
