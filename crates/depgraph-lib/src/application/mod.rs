//! Application layer modules
//!
//! CLI interface, configuration layering, the project file and the stage
//! handlers that drive the graph engine.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;
pub mod project;
pub mod session;

// Re-export main types for convenience
pub use cli::{Cli, CliConfig, Commands};
pub use commands::{execute_command, execute_command_with_session};
pub use config::AppConfig;
pub use env::EnvironmentConfig;
pub use loader::load_env_files;
pub use project::{ProjectConfig, ProjectConfigError};
pub use session::CommandSession;
