//! Graph visualization
//!
//! - [`layout`] - Breadth-first level placement of nodes
//! - [`mermaid`] - Mermaid flowchart text
//! - [`svg`] - Standalone SVG document, mutual dependencies as parallel lines

pub mod layout;
pub mod mermaid;
pub mod svg;

pub use layout::{Layout, Position, assign_levels, layout};
pub use mermaid::render_mermaid;
pub use svg::{RenderError, render_svg};
