//! Project configuration file
//!
//! `config.yaml` names the package to analyze and where its dependency data
//! comes from. Every key is checked and all problems are reported together,
//! so a broken file is fixed in one pass.

use crate::primitives::{FailurePolicy, SourceMode, TraversalOrder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProjectConfigError {
    #[error("Failed to read project config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Project config is not a YAML mapping: {source}")]
    Parse {
        #[from]
        source: serde_saphyr::Error,
    },

    #[error("Invalid project config:{}", bullet_list(.problems))]
    Invalid { problems: Vec<String> },
}

fn bullet_list(problems: &[String]) -> String {
    problems.iter().map(|p| format!("\n- {p}")).collect()
}

/// Keys as they appear in the file, before validation
#[derive(Debug, Default, Deserialize)]
struct RawProjectConfig {
    package_name: Option<String>,
    repo: Option<String>,
    test_mode: Option<String>,
    version: Option<String>,
    graph_image_file: Option<String>,
    traversal: Option<String>,
    on_lookup_failure: Option<String>,
}

/// Validated project configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Root package
    pub package_name: String,
    /// Fixture file path (test mode) or registry base URL (real mode)
    pub repo: String,
    pub test_mode: SourceMode,
    /// Root version, also the fallback for dependencies without one
    pub version: String,
    /// SVG output file name
    pub graph_image_file: String,
    pub traversal: TraversalOrder,
    pub on_lookup_failure: FailurePolicy,
}

fn is_package_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

fn is_version(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
}

fn is_bare_file_name(value: &str) -> bool {
    !value.trim().is_empty()
        && value.contains('.')
        && !value.starts_with('.')
        && !value.contains(['/', '\\'])
}

/// Collects problems while checking one key after another
struct Checker {
    problems: Vec<String>,
}

impl Checker {
    fn required<T>(
        &mut self,
        key: &str,
        value: Option<String>,
        check: impl FnOnce(&str) -> Option<T>,
        problem: &str,
    ) -> Option<T> {
        let Some(value) = value else {
            self.problems.push(format!("{key}: missing"));
            return None;
        };
        let checked = check(&value);
        if checked.is_none() {
            self.problems.push(format!("{key}: {problem}"));
        }
        checked
    }

    fn optional<T>(&mut self, key: &str, value: Option<String>, problem: &str) -> Option<T>
    where
        T: Default + std::str::FromStr,
    {
        match value {
            None => Some(T::default()),
            Some(value) => {
                let parsed = value.parse().ok();
                if parsed.is_none() {
                    self.problems.push(format!("{key}: {problem}"));
                }
                parsed
            }
        }
    }
}

impl ProjectConfig {
    /// Parse and validate YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ProjectConfigError> {
        if content.trim().is_empty() {
            return Err(ProjectConfigError::Invalid {
                problems: vec!["document is empty, expected a mapping of keys".to_string()],
            });
        }

        let raw: RawProjectConfig = serde_saphyr::from_str(content)?;
        Self::validate(raw)
    }

    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self, ProjectConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProjectConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        debug!(
            path = %path.display(),
            package = %config.package_name,
            mode = config.test_mode.as_str(),
            "Loaded project config"
        );
        Ok(config)
    }

    fn validate(raw: RawProjectConfig) -> Result<Self, ProjectConfigError> {
        let mut checker = Checker {
            problems: Vec::new(),
        };

        let package_name = checker.required(
            "package_name",
            raw.package_name,
            |v| is_package_name(v).then(|| v.to_string()),
            "allowed characters are A-Z a-z 0-9 . _ -",
        );
        let repo = checker.required(
            "repo",
            raw.repo,
            |v| (!v.trim().is_empty()).then(|| v.trim().to_string()),
            "empty",
        );
        let test_mode = checker.required(
            "test_mode",
            raw.test_mode,
            |v| v.parse::<SourceMode>().ok(),
            "expected 'real' or 'test'",
        );
        let version = checker.required(
            "version",
            raw.version,
            |v| is_version(v).then(|| v.to_string()),
            "invalid format",
        );
        let graph_image_file = checker.required(
            "graph_image_file",
            raw.graph_image_file,
            |v| is_bare_file_name(v).then(|| v.to_string()),
            "expected a file name with an extension and no directories",
        );
        let traversal = checker.optional::<TraversalOrder>(
            "traversal",
            raw.traversal,
            "expected 'depth-first' or 'breadth-first'",
        );
        let on_lookup_failure = checker.optional::<FailurePolicy>(
            "on_lookup_failure",
            raw.on_lookup_failure,
            "expected 'warn' or 'fail'",
        );

        match (
            package_name,
            repo,
            test_mode,
            version,
            graph_image_file,
            traversal,
            on_lookup_failure,
        ) {
            (
                Some(package_name),
                Some(repo),
                Some(test_mode),
                Some(version),
                Some(graph_image_file),
                Some(traversal),
                Some(on_lookup_failure),
            ) => Ok(Self {
                package_name,
                repo,
                test_mode,
                version,
                graph_image_file,
                traversal,
                on_lookup_failure,
            }),
            _ => Err(ProjectConfigError::Invalid {
                problems: checker.problems,
            }),
        }
    }

    /// Apply command-line policy overrides
    pub fn with_overrides(
        mut self,
        traversal: Option<TraversalOrder>,
        on_lookup_failure: Option<FailurePolicy>,
    ) -> Self {
        if let Some(traversal) = traversal {
            self.traversal = traversal;
        }
        if let Some(policy) = on_lookup_failure {
            self.on_lookup_failure = policy;
        }
        self
    }

    /// `(key, value)` pairs in file order, for display
    pub fn entries(&self) -> [(&'static str, String); 7] {
        [
            ("package_name", self.package_name.clone()),
            ("repo", self.repo.clone()),
            ("test_mode", self.test_mode.as_str().to_string()),
            ("version", self.version.clone()),
            ("graph_image_file", self.graph_image_file.clone()),
            ("traversal", self.traversal.as_str().to_string()),
            ("on_lookup_failure", self.on_lookup_failure.as_str().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    include!("project.test.rs");
}
