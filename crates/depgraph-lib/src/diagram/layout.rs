//! Level-based node placement
//!
//! Levels come from a breadth-first walk from the root: the first time a
//! node is reached fixes its level. Columns are levels, rows are the
//! lexicographic position of a node within its level.

use crate::graph::DependencyGraph;
use std::collections::{BTreeMap, VecDeque};
use tracing::trace;

/// Distance from the canvas edge to the first row/column
pub const MARGIN: u32 = 100;
/// Horizontal distance between levels
pub const LEVEL_STEP: u32 = 200;
/// Vertical distance between siblings in a level
pub const ROW_STEP: u32 = 100;

/// Canvas coordinate of a node's center
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Positions for every node of a graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    positions: BTreeMap<String, Position>,
}

impl Layout {
    pub fn get(&self, node: &str) -> Option<Position> {
        self.positions.get(node).copied()
    }

    /// Nodes with their positions, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, Position)> {
        self.positions
            .iter()
            .map(|(node, position)| (node.as_str(), *position))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Largest x and y over all positions, if any
    pub fn max_extent(&self) -> Option<(u32, u32)> {
        let max_x = self.positions.values().map(|p| p.x).max()?;
        let max_y = self.positions.values().map(|p| p.y).max()?;
        Some((max_x, max_y))
    }
}

/// Offset of the `index`-th column or row, saturating at the canvas limit
pub fn coordinate(index: usize, step: u32) -> u32 {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    MARGIN.saturating_add(index.saturating_mul(step))
}

/// Breadth-first level of every node reachable from `root`
pub fn assign_levels(graph: &DependencyGraph, root: &str) -> BTreeMap<String, usize> {
    let mut levels = BTreeMap::from([(root.to_string(), 0)]);
    let mut queue = VecDeque::from([root.to_string()]);

    while let Some(node) = queue.pop_front() {
        let level = levels[&node];
        for dep in graph.dependencies(&node).unwrap_or_default() {
            if !levels.contains_key(dep) {
                levels.insert(dep.clone(), level + 1);
                queue.push_back(dep.clone());
            }
        }
    }

    levels
}

/// Assign a position to every node in the graph's universe plus the root
///
/// Nodes the walk from `root` never reaches go in the first column below
/// everything already placed, in name order.
pub fn layout(graph: &DependencyGraph, root: &str) -> Layout {
    let levels = assign_levels(graph, root);

    let mut per_level: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for (node, &level) in &levels {
        per_level.entry(level).or_default().push(node);
    }

    let mut positions = BTreeMap::new();
    for (&level, nodes) in &per_level {
        // `levels` iterates in name order, so siblings are already sorted
        for (row, node) in nodes.iter().enumerate() {
            positions.insert(
                node.to_string(),
                Position::new(coordinate(level, LEVEL_STEP), coordinate(row, ROW_STEP)),
            );
        }
    }

    for node in graph.universe() {
        if !positions.contains_key(node) {
            let row = positions.len();
            trace!(node, row, "Placing node unreachable from root");
            positions.insert(node.to_string(), Position::new(MARGIN, coordinate(row, ROW_STEP)));
        }
    }

    Layout { positions }
}

#[cfg(test)]
mod tests {
    include!("layout.test.rs");
}
