//! Application configuration management
//!
//! Process-level settings (logging, colors, network timeout, policy
//! overrides) following the precedence: defaults -> .env -> env vars -> CLI
//! args. The project being analyzed is described separately, see
//! [`super::project`].

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const CONFIG_FILE: &str = "config.yaml";
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const NET_TIMEOUT: &str = "30";
}

/// Typed counterparts of [`defaults`] for serde and merging
mod default_fns {
    use super::*;

    pub fn config() -> PathBuf {
        PathBuf::from(defaults::CONFIG_FILE)
    }

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }

    pub fn net_timeout() -> u64 {
        30
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Project configuration file
    #[arg(long, env = "DEPGRAPH_CONFIG", default_value = defaults::CONFIG_FILE)]
    #[serde(default = "default_fns::config")]
    pub config: PathBuf,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "DEPGRAPH_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, env = "DEPGRAPH_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "DEPGRAPH_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "DEPGRAPH_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Registry request timeout in seconds
    #[arg(short, long, env = "DEPGRAPH_NET_TIMEOUT", default_value = defaults::NET_TIMEOUT)]
    #[serde(default = "default_fns::net_timeout")]
    pub net_timeout: u64,

    /// Traversal order, overrides the project file (depth-first, breadth-first)
    #[arg(long, env = "DEPGRAPH_TRAVERSAL")]
    #[serde(default)]
    pub traversal: Option<TraversalOrder>,

    /// Lookup failure policy, overrides the project file (warn, fail)
    #[arg(long, env = "DEPGRAPH_ON_LOOKUP_FAILURE")]
    #[serde(default)]
    pub on_lookup_failure: Option<FailurePolicy>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: default_fns::config(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
            net_timeout: default_fns::net_timeout(),
            traversal: None,
            on_lookup_failure: None,
        }
    }
}

impl AppConfig {
    /// Logger settings; `ansi` is the resolved color decision
    pub fn to_logger_config(&self, ansi: bool) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi,
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        // For Option fields, take other if it's Some
        if other.traversal.is_some() {
            self.traversal = other.traversal;
        }
        if other.on_lookup_failure.is_some() {
            self.on_lookup_failure = other.on_lookup_failure;
        }

        // For everything else, take other if it's not the default
        if other.config != default_fns::config() {
            self.config = other.config;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if other.net_timeout != default_fns::net_timeout() {
            self.net_timeout = other.net_timeout;
        }
        if other.log_format != default_fns::log_format() {
            self.log_format = other.log_format;
        }
        if other.log_output != default_fns::log_output() {
            self.log_output = other.log_output;
        }
        if other.color != default_fns::color() {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.config.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "config path is empty".to_string(),
            });
        }
        if self.net_timeout == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "net_timeout must be at least 1 second".to_string(),
            });
        }
        if self.log_level > 4 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("log_level {} is out of range 0-4", self.log_level),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
