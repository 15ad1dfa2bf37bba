use crate::primitives::*;
use std::sync::OnceLock;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Crates whose chatter is capped at `warn` regardless of the chosen level
const QUIET_CRATES: &[&str] = &["hyper_util", "reqwest", "h2", "rustls", "mio", "want"];

/// Logger implementation using tracing with indicatif progress integration
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        // Spinners for long-running spans (registry traversal)
        let indicatif_layer = IndicatifLayer::new();

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Self::filter_directives(config.level)));

        let fmt_layer = match (config.output, config.format) {
            (LogOutput::Stderr, LogFormat::Text) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(config.ansi)
                .compact()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Json) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Yaml) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(config.ansi)
                .pretty()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Text) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(config.ansi)
                .compact()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Json) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Yaml) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(config.ansi)
                .pretty()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        GLOBAL_LOGGER
            .set(Logger { config })
            .map_err(|_| LoggerError::AlreadyInitialized)?;
        let logger = GLOBAL_LOGGER.get().ok_or(LoggerError::AlreadyInitialized)?;

        let installed = logger.config();
        tracing::debug!(
            level = ?installed.level,
            format = ?installed.format,
            output = ?installed.output,
            ansi = installed.ansi,
            "Logger initialized"
        );

        Ok(logger)
    }

    /// Build the default `EnvFilter` directive string for a level
    pub fn filter_directives(level: LogLevel) -> String {
        let level_str = level.as_filter();
        let mut directives = vec![format!("depgraph={level_str}"), format!("depgraph_lib={level_str}")];
        directives.extend(QUIET_CRATES.iter().map(|name| format!("{name}=warn")));
        directives.push(level_str.to_string());
        directives.join(",")
    }

    /// Configuration the global subscriber was installed with
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
