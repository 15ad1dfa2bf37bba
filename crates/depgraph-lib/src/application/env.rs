//! Environment variable handling for application configuration
//!
//! Manages standard environment variables for color and CI detection
//! following established conventions.

use crate::primitives::{ColorIntent, ConfigError};
use serde::Deserialize;

/// Environment variables that affect application behavior
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    /// NO_COLOR environment variable (any value = disable color)
    pub no_color: Option<String>,
    /// FORCE_COLOR environment variable (0/false = disable, 1/2/3/true = enable)
    pub force_color: Option<String>,
    /// CLICOLOR environment variable (0 = disable color)
    pub clicolor: Option<String>,
    /// CI environment variable (any value = CI mode)
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    /// Load environment configuration from current environment
    pub fn load() -> Result<Self, ConfigError> {
        Ok(envy::from_env()?)
    }

    /// Whether the process runs under continuous integration
    pub fn is_ci(&self) -> bool {
        self.ci.is_some()
    }

    /// Apply environment variables to color configuration
    ///
    /// Precedence: CI > CLICOLOR < NO_COLOR < FORCE_COLOR
    pub fn apply_color_config(&self, mut color: ColorIntent) -> ColorIntent {
        if self.is_ci() {
            return ColorIntent::Never;
        }

        if self.clicolor.as_deref() == Some("0") {
            color = ColorIntent::Never;
        }

        if self.no_color.as_deref().is_some_and(|value| !value.is_empty()) {
            color = ColorIntent::Never;
        }

        match self.force_color.as_deref() {
            Some("0" | "false") => color = ColorIntent::Never,
            Some("1" | "2" | "3" | "true") => color = ColorIntent::Always,
            _ => {} // Invalid values ignored
        }

        color
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}
