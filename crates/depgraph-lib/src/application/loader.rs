//! Configuration loading
//!
//! Coordinates the configuration sources into one [`CliConfig`]:
//! defaults -> .env files -> environment -> CLI arguments.

use crate::primitives::ConfigError;
use clap::Parser;

use super::{
    cli::{Cli, CliConfig},
    config::AppConfig,
    env::EnvironmentConfig,
};

/// Env files read before the environment, most specific first
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load `.env.local` and `.env` into the process environment
///
/// Missing files are fine; a file that exists but cannot be parsed is not.
/// Variables already set in the environment are never overwritten.
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        match dotenvy::from_filename(env_file) {
            Err(e) if !e.not_found() => {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

impl AppConfig {
    /// Layer the environment and parsed CLI values over the defaults
    pub fn resolve(env: &EnvironmentConfig, cli: AppConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Standard color variables apply unless the CLI says otherwise
        config.color = env.apply_color_config(config.color);

        config = config.merge_with(cli);
        config.validate()?;

        Ok(config)
    }
}

impl CliConfig {
    /// Load configuration from env files, environment and command line
    pub fn load() -> Result<Self, ConfigError> {
        load_env_files()?;
        let env = EnvironmentConfig::load()?;
        let cli = Cli::parse();

        Ok(Self {
            app_config: AppConfig::resolve(&env, cli.config)?,
            command: cli.command,
            ci: env.is_ci(),
        })
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
