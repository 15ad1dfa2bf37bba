//! # depgraph Library
//!
//! Transitive dependency graphs of packages, from a NuGet flat-container
//! registry or a static fixture, with load order and diagrams.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Shared enums and ambient error types
//! - [`logger`] - Structured logging with progress spinners
//! - [`provider`] - Dependency sources (fixture file, registry)
//! - [`graph`] - Graph construction, load order, cycles
//! - [`diagram`] - Layout, Mermaid text and SVG rendering
//! - [`display`] - User-facing status output and prompts
//! - [`application`] - CLI interface, configuration and stage handlers
//!
//! ## Quick Start
//!
//! ```
//! use depgraph_lib::{FixtureProvider, GraphBuilder};
//!
//! let fixture: FixtureProvider = "App: Lib\nLib:".parse().unwrap();
//! let outcome = GraphBuilder::new().build(&fixture, "App", "1.0.0").unwrap();
//! assert_eq!(outcome.graph.load_order().order, ["Lib", "App"]);
//! ```

pub mod application;
pub mod diagram;
pub mod display;
pub mod graph;
pub mod logger;
pub mod primitives;
pub mod provider;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, ProjectConfig, execute_command};
pub use diagram::{Layout, Position, RenderError, layout, render_mermaid, render_svg};
pub use display::Display;
pub use graph::{BuildError, BuildOutcome, DependencyGraph, GraphBuilder, LoadOrder, load_order};
pub use logger::Logger;
pub use primitives::{
    ColorIntent, ConfigError, FailurePolicy, LogFormat, LogLevel, LogOutput, LoggerError,
    SourceMode, TraversalOrder,
};
pub use provider::{
    Dependency, DependencyProvider, FixtureError, FixtureProvider, LookupError, RegistryProvider,
    Resolved,
};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Colors are settled before anything is printed or logged
    Display::init(config.app_config.color)?;
    Logger::init(config.app_config.to_logger_config(Display::styling().colors()))?;

    // Execute the command
    execute_command(config)
}
