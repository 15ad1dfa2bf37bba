//! SVG rendering
//!
//! Edges are drawn first as arrow-tipped lines, then every node as a circle
//! with its name on top. When two packages depend on each other the pair is
//! drawn once as two parallel lines, shifted to either side of the straight
//! connection along its unit normal, so both arrows stay visible.

use super::layout::{Layout, MARGIN, Position};
use crate::graph::DependencyGraph;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::collections::HashSet;
use thiserror::Error;
use tracing::trace;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const ARROW_ID: &str = "arrow";
const STROKE: &str = "#000";

/// Circle radius for node markers
pub const NODE_RADIUS: u32 = 20;
/// Distance of each line of a mutual pair from the straight connection
pub const PARALLEL_OFFSET: f64 = 10.0;
/// Canvas size used when there is nothing to place
pub const EMPTY_CANVAS: (u32, u32) = (300, 200);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write SVG document: {reason}")]
    Write { reason: String },

    #[error("SVG document is not valid UTF-8: {source}")]
    Encoding {
        #[from]
        source: std::string::FromUtf8Error,
    },
}

fn write_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Write {
        reason: err.to_string(),
    }
}

/// One straight line on the canvas, drawn from `(x1, y1)` to `(x2, y2)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    fn between(from: Position, to: Position) -> Self {
        Self::shifted(from, to, (0.0, 0.0))
    }

    fn shifted(from: Position, to: Position, (dx, dy): (f64, f64)) -> Self {
        Self {
            x1: f64::from(from.x) + dx,
            y1: f64::from(from.y) + dy,
            x2: f64::from(to.x) + dx,
            y2: f64::from(to.y) + dy,
        }
    }
}

/// Offset of length [`PARALLEL_OFFSET`] perpendicular to `from -> to`
fn normal_offset(from: Position, to: Position) -> (f64, f64) {
    let dx = f64::from(to.x) - f64::from(from.x);
    let dy = f64::from(to.y) - f64::from(from.y);
    let length = dx.hypot(dy);
    let length = if length == 0.0 { 1.0 } else { length };
    let scale = PARALLEL_OFFSET / length;
    (-dy * scale, dx * scale)
}

/// Line segments for every edge of the graph
///
/// A mutual pair `a -> b`, `b -> a` yields exactly two segments, offset to
/// opposite sides and pointing in opposite directions. Repeated edges are
/// drawn once. A self-dependency is a single zero-length segment.
pub fn edge_segments(graph: &DependencyGraph, layout: &Layout) -> Vec<Segment> {
    let edges: HashSet<(&str, &str)> = graph.edges().collect();
    let mut drawn: HashSet<(&str, &str)> = HashSet::new();
    let mut segments = Vec::new();

    for (source, target) in graph.edges() {
        if !drawn.insert((source, target)) {
            continue;
        }

        let from = layout.get(source).unwrap_or_default();
        let to = layout.get(target).unwrap_or_default();

        if source != target && edges.contains(&(target, source)) {
            drawn.insert((target, source));
            let (px, py) = normal_offset(from, to);
            trace!(source, target, "Drawing mutual edge pair");
            segments.push(Segment::shifted(from, to, (px, py)));
            segments.push(Segment::shifted(to, from, (-px, -py)));
        } else {
            segments.push(Segment::between(from, to));
        }
    }

    segments
}

/// Thin wrapper over the XML writer for the handful of shapes we emit
struct SvgWriter {
    writer: Writer<Vec<u8>>,
}

impl SvgWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn open(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), RenderError> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer
            .write_event(Event::Start(start))
            .map_err(write_error)
    }

    fn close(&mut self, name: &str) -> Result<(), RenderError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(write_error)
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), RenderError> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer
            .write_event(Event::Empty(element))
            .map_err(write_error)
    }

    fn text(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<(), RenderError> {
        self.open(name, attributes)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error)?;
        self.close(name)
    }

    fn finish(self) -> Result<String, RenderError> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

/// Render the graph at the given layout as a standalone SVG document
pub fn render_svg(graph: &DependencyGraph, layout: &Layout) -> Result<String, RenderError> {
    let (width, height) = layout
        .max_extent()
        .map(|(x, y)| (x.saturating_add(MARGIN), y.saturating_add(MARGIN)))
        .unwrap_or(EMPTY_CANVAS);

    let mut svg = SvgWriter::new();
    svg.open(
        "svg",
        &[
            ("xmlns", SVG_NAMESPACE),
            ("width", &width.to_string()),
            ("height", &height.to_string()),
        ],
    )?;

    svg.open("defs", &[])?;
    svg.open(
        "marker",
        &[
            ("id", ARROW_ID),
            ("markerWidth", "10"),
            ("markerHeight", "10"),
            ("refX", "10"),
            ("refY", "3"),
            ("orient", "auto"),
            ("markerUnits", "strokeWidth"),
        ],
    )?;
    svg.empty("path", &[("d", "M0,0 L0,6 L9,3 z"), ("fill", STROKE)])?;
    svg.close("marker")?;
    svg.close("defs")?;

    let marker = format!("url(#{ARROW_ID})");
    for segment in edge_segments(graph, layout) {
        svg.empty(
            "line",
            &[
                ("x1", &segment.x1.to_string()),
                ("y1", &segment.y1.to_string()),
                ("x2", &segment.x2.to_string()),
                ("y2", &segment.y2.to_string()),
                ("stroke", STROKE),
                ("marker-end", &marker),
            ],
        )?;
    }

    let radius = NODE_RADIUS.to_string();
    for (node, position) in layout.iter() {
        let x = position.x.to_string();
        let y = position.y.to_string();
        svg.empty(
            "circle",
            &[
                ("cx", &x),
                ("cy", &y),
                ("r", &radius),
                ("stroke", STROKE),
                ("fill", "#fff"),
            ],
        )?;
        svg.text(
            "text",
            &[
                ("x", &x),
                ("y", &y),
                ("text-anchor", "middle"),
                ("dy", ".3em"),
                ("font-family", "monospace"),
                ("font-size", "12"),
            ],
            node,
        )?;
    }

    svg.close("svg")?;
    svg.finish()
}

#[cfg(test)]
mod tests {
    include!("svg.test.rs");
}
