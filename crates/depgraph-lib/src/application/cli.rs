use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::AppConfig;

/// depgraph CLI - package dependency graph explorer
#[derive(Debug, Clone, Parser)]
#[command(name = "depgraph")]
#[command(about = "Explore a package's transitive dependencies, load order and diagram")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// Stage to run; without one an interactive menu is shown
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
    /// Running under CI, never prompt
    pub ci: bool,
}

/// The five pipeline stages
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Print the project configuration
    Config,

    /// List the root package's direct dependencies (real mode only)
    Direct,

    /// Build and print the full dependency graph
    Graph,

    /// Print the load order and any cycle found
    Order {
        /// Emit a JSON document instead of the text report
        #[arg(long, help = "Print order, cyclic remainder and cycles as JSON")]
        json: bool,
    },

    /// Print the Mermaid diagram and write the SVG image
    Visualize {
        /// Where to write the SVG, instead of graph_image_file
        #[arg(short, long, help = "Write the SVG here instead of graph_image_file")]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Every stage in pipeline order, with default arguments
    pub fn stages() -> [Commands; 5] {
        [
            Commands::Config,
            Commands::Direct,
            Commands::Graph,
            Commands::Order { json: false },
            Commands::Visualize { output: None },
        ]
    }

    /// Menu label for the stage
    pub fn label(&self) -> &'static str {
        match self {
            Commands::Config => "Print configuration",
            Commands::Direct => "Direct dependencies (real mode)",
            Commands::Graph => "Dependency graph",
            Commands::Order { .. } => "Load order",
            Commands::Visualize { .. } => "Visualize (Mermaid + SVG)",
        }
    }

    /// Whether the stage needs the dependency graph built first
    pub fn requires_graph(&self) -> bool {
        matches!(
            self,
            Commands::Graph | Commands::Order { .. } | Commands::Visualize { .. }
        )
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
