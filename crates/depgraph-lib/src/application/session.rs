//! Command session
//!
//! Owns everything one command invocation needs: the application config, the
//! validated project config and the directory relative paths resolve against.
//! Providers and builders are created from it on demand.

use super::config::AppConfig;
use super::project::ProjectConfig;
use crate::graph::{BuildOutcome, GraphBuilder};
use crate::primitives::SourceMode;
use crate::provider::{DependencyProvider, FixtureProvider, RegistryProvider};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// State shared by the stage handlers of one invocation
#[derive(Debug, Clone)]
pub struct CommandSession {
    app_config: AppConfig,
    project: ProjectConfig,
    base_dir: PathBuf,
}

impl CommandSession {
    /// Load the project config named by `app_config` and apply CLI overrides
    ///
    /// Relative paths in the project config resolve against the directory
    /// holding the config file.
    pub fn open(app_config: AppConfig) -> Result<Self> {
        let path = app_config.config.clone();
        let project = ProjectConfig::load(&path)
            .with_context(|| format!("Failed to load project config {}", path.display()))?
            .with_overrides(app_config.traversal, app_config.on_lookup_failure);
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(Self::new(app_config, project, base_dir))
    }

    pub fn new(app_config: AppConfig, project: ProjectConfig, base_dir: PathBuf) -> Self {
        Self {
            app_config,
            project,
            base_dir,
        }
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    /// Resolve a path from the project config
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Registry client for the configured base URL
    pub fn registry(&self) -> Result<RegistryProvider> {
        let timeout = Duration::from_secs(self.app_config.net_timeout);
        RegistryProvider::new(&self.project.repo, timeout)
            .with_context(|| format!("Failed to set up registry {}", self.project.repo))
    }

    /// Provider for the configured source mode
    pub fn provider(&self) -> Result<Box<dyn DependencyProvider>> {
        match self.project.test_mode {
            SourceMode::Test => {
                let path = self.resolve(&self.project.repo);
                let fixture = FixtureProvider::load(&path)
                    .with_context(|| format!("Failed to load fixture {}", path.display()))?;
                Ok(Box::new(fixture))
            }
            SourceMode::Real => Ok(Box::new(self.registry()?)),
        }
    }

    /// Builder configured with the project's traversal order and failure policy
    pub fn builder(&self) -> GraphBuilder {
        GraphBuilder::new()
            .with_order(self.project.traversal)
            .with_policy(self.project.on_lookup_failure)
    }

    /// Build the dependency graph of the root package
    pub fn build_graph(&self) -> Result<BuildOutcome> {
        let provider = self.provider()?;
        let builder = self.builder();
        let outcome = builder
            .build(&*provider, &self.project.package_name, &self.project.version)
            .with_context(|| {
                format!(
                    "Failed to build dependency graph of {} {}",
                    self.project.package_name, self.project.version
                )
            })?;

        info!(
            root = %self.project.package_name,
            mode = self.project.test_mode.as_str(),
            order = builder.order().as_str(),
            policy = builder.policy().as_str(),
            nodes = outcome.graph.node_count(),
            edges = outcome.graph.edge_count(),
            failures = outcome.failures.len(),
            "Dependency graph built"
        );
        Ok(outcome)
    }
}
