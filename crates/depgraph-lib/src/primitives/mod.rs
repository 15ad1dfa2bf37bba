//! depgraph primitives - core types, errors, and coordination
//!
//! Shared enums that flow between configuration, logging and the graph
//! engine. Every enum here is a clap `ValueEnum` so it can be taken from the
//! command line, the environment or the project file with the same spelling.

use clap::ValueEnum;
use std::str::FromStr;
use thiserror::Error;

// Shared macros and patterns
mod shared;
use shared::impl_fromstr_for_value_enum;

/// Available log output streams
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// STDERR
    Stderr,
    /// STDOUT
    Stdout,
}

/// Log levels for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

/// Output formats for structured logging
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// TEXT
    /// alias: text, txt, plain
    Text,

    /// JSON
    /// alias: json
    Json,

    /// YAML
    /// alias: yaml, yml
    Yaml,
}

/// Color output intent, resolved against the terminal at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum ColorIntent {
    Auto,
    Always,
    Never,
}

/// Where dependency information comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum SourceMode {
    /// Live NuGet flat-container registry
    Real,
    /// Static `name: dep1 dep2` fixture file
    Test,
}

/// Order in which the graph builder issues provider lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum TraversalOrder {
    #[default]
    DepthFirst,
    BreadthFirst,
}

/// What the graph builder does when a single lookup fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum FailurePolicy {
    /// Record the node with no dependencies, warn, and keep going
    #[default]
    Lenient,
    /// Abort the whole build on the first failed lookup
    Strict,
}

// ============================================================================
// LOGGER CONFIGURATION TYPES
// ============================================================================

/// Logger configuration resolved from application config and terminal state
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub ansi: bool,
}

// ============================================================================
// STRUCTURED ERROR TYPES
// ============================================================================

/// Application configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load environment file '{file}': {source}")]
    EnvFileError {
        file: String,
        source: dotenvy::Error,
    },

    #[error("Global configuration already initialized")]
    AlreadyInitialized,

    #[error("Failed to parse environment variables: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Failed to parse configuration value '{value}': {reason}")]
    ParseError { value: String, reason: String },
}

/// Logger initialization and operation errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to initialize tracing subscriber: {reason}")]
    InitializationFailed { reason: String },

    #[error("Logger already initialized")]
    AlreadyInitialized,
}

impl LogLevel {
    /// Convert verbosity level from AppConfig to LogLevel
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            4.. => LogLevel::Trace,
        }
    }


    /// Directive name understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl SourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Real => "real",
            SourceMode::Test => "test",
        }
    }
}

impl TraversalOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalOrder::DepthFirst => "depth-first",
            TraversalOrder::BreadthFirst => "breadth-first",
        }
    }
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Lenient => "warn",
            FailurePolicy::Strict => "fail",
        }
    }
}

impl ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Error,
            Self::Warning,
            Self::Info,
            Self::Debug,
            Self::Trace,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Error => Some(
                clap::builder::PossibleValue::new("error")
                    .alias("err")
                    .alias("fatal"),
            ),
            Self::Warning => Some(clap::builder::PossibleValue::new("warn").alias("warning")),
            Self::Info => Some(clap::builder::PossibleValue::new("info")),
            Self::Debug => Some(clap::builder::PossibleValue::new("debug")),
            Self::Trace => Some(
                clap::builder::PossibleValue::new("trace")
                    .alias("tracing")
                    .alias("verbose"),
            ),
        }
    }
}

impl ValueEnum for LogFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Text, Self::Json, Self::Yaml]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Text => Some(
                clap::builder::PossibleValue::new("text")
                    .alias("txt")
                    .alias("plain"),
            ),
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Yaml => Some(clap::builder::PossibleValue::new("yaml").alias("yml")),
        }
    }
}

impl ValueEnum for ColorIntent {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Auto, Self::Always, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Auto => Some(
                clap::builder::PossibleValue::new("auto")
                    .alias("automatic")
                    .alias("detect"),
            ),
            Self::Always => Some(
                clap::builder::PossibleValue::new("always")
                    .alias("force")
                    .alias("on"),
            ),
            Self::Never => Some(clap::builder::PossibleValue::new("never").alias("off")),
        }
    }
}

impl ValueEnum for SourceMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Real, Self::Test]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Real => Some(clap::builder::PossibleValue::new("real")),
            Self::Test => Some(clap::builder::PossibleValue::new("test")),
        }
    }
}

impl ValueEnum for TraversalOrder {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::DepthFirst, Self::BreadthFirst]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::DepthFirst => Some(
                clap::builder::PossibleValue::new("depth-first")
                    .alias("dfs")
                    .alias("depth"),
            ),
            Self::BreadthFirst => Some(
                clap::builder::PossibleValue::new("breadth-first")
                    .alias("bfs")
                    .alias("breadth"),
            ),
        }
    }
}

impl ValueEnum for FailurePolicy {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Lenient, Self::Strict]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Lenient => Some(
                clap::builder::PossibleValue::new("warn")
                    .alias("lenient")
                    .alias("continue"),
            ),
            Self::Strict => Some(
                clap::builder::PossibleValue::new("fail")
                    .alias("strict")
                    .alias("abort"),
            ),
        }
    }
}

// Generate FromStr implementations for all ValueEnum types
impl_fromstr_for_value_enum!(LogLevel, "invalid log level");
impl_fromstr_for_value_enum!(LogFormat, "invalid log format");
impl_fromstr_for_value_enum!(LogOutput, "invalid log output stream");
impl_fromstr_for_value_enum!(ColorIntent, "invalid color intent");
impl_fromstr_for_value_enum!(SourceMode, "expected 'real' or 'test'");
impl_fromstr_for_value_enum!(TraversalOrder, "expected 'depth-first' or 'breadth-first'");
impl_fromstr_for_value_enum!(FailurePolicy, "expected 'warn' or 'fail'");

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
