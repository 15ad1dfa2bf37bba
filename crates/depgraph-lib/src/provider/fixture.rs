//! Static fixture provider
//!
//! Reads a dependency table from text of the form:
//!
//! ```text
//! # comment
//! App: Lib1 Lib2
//! Lib1: Core
//! Core:
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Any other line
//! without a `:` separator is a format error and rejects the whole fixture.

use super::{Dependency, DependencyProvider, LookupError, Resolved};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors loading or parsing a fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed fixture line {line_number}: '{line}' (expected 'name: dep1 dep2 ...')")]
    MissingSeparator { line_number: usize, line: String },

    #[error("Malformed fixture line {line_number}: '{line}' (package name is empty)")]
    EmptyName { line_number: usize, line: String },
}

/// Dependency table backed by a parsed fixture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureProvider {
    entries: BTreeMap<String, Vec<String>>,
}

impl FixtureProvider {
    /// Parse fixture text
    pub fn parse(content: &str) -> Result<Self, FixtureError> {
        let mut entries = BTreeMap::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, deps) = line
                .split_once(':')
                .ok_or_else(|| FixtureError::MissingSeparator {
                    line_number: index + 1,
                    line: line.to_string(),
                })?;

            let name = name.trim();
            if name.is_empty() {
                return Err(FixtureError::EmptyName {
                    line_number: index + 1,
                    line: line.to_string(),
                });
            }

            let deps: Vec<String> = deps.split_whitespace().map(str::to_string).collect();
            trace!(package = name, dependencies = deps.len(), "Fixture entry");

            // Later lines for the same package replace earlier ones
            entries.insert(name.to_string(), deps);
        }

        debug!(packages = entries.len(), "Parsed dependency fixture");
        Ok(Self { entries })
    }

    /// Read and parse a fixture file
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Declared dependencies for a package, exact name first then ignoring case
    pub fn get(&self, id: &str) -> Option<&[String]> {
        self.entry(id).map(|(_, deps)| deps)
    }

    /// Entry name as written in the fixture, with its dependencies
    fn entry(&self, id: &str) -> Option<(&str, &[String])> {
        self.entries
            .get_key_value(id)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(id))
            })
            .map(|(name, deps)| (name.as_str(), deps.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for FixtureProvider {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl DependencyProvider for FixtureProvider {
    fn lookup(&self, id: &str, version: &str) -> Result<Vec<Dependency>, LookupError> {
        Ok(self.resolve(id, version)?.dependencies)
    }

    fn resolve(&self, id: &str, _version: &str) -> Result<Resolved, LookupError> {
        // Packages the fixture never mentions are leaves with no spelling of their own
        let Some((name, deps)) = self.entry(id) else {
            return Ok(Resolved::default());
        };
        Ok(Resolved {
            canonical: Some(name.to_string()),
            dependencies: deps.iter().map(Dependency::unversioned).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    include!("fixture.test.rs");
}
