//! # Dependency Providers
//!
//! A provider answers one question: given a package identifier and a version
//! hint, what are its direct dependencies? The graph builder only ever talks
//! to the [`DependencyProvider`] trait, so a static fixture and a live
//! registry are interchangeable.
//!
//! ## Modules
//!
//! - [`fixture`] - Line-oriented `name: dep1 dep2` text source
//! - [`registry`] - NuGet flat-container registry source

use thiserror::Error;

pub mod fixture;
pub mod registry;

pub use fixture::{FixtureError, FixtureProvider};
pub use registry::{PackageManifest, RegistryProvider};

/// One direct dependency as reported by a provider
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Dependency {
    /// Package identifier, casing as declared by the source
    pub id: String,
    /// Version declared for this edge, if the source has one
    pub version: Option<String>,
}

impl Dependency {
    pub fn new(id: impl Into<String>, version: Option<String>) -> Self {
        Self {
            id: id.into(),
            version,
        }
    }

    /// Dependency without a declared version
    pub fn unversioned(id: impl Into<String>) -> Self {
        Self::new(id, None)
    }
}

/// Failure to resolve the direct dependencies of a single node
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Failed to build HTTP client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Package {package} {version} not found in registry")]
    NotFound { package: String, version: String },

    #[error("Invalid package archive for {package}: {source}")]
    Archive {
        package: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("No .nuspec manifest found in package {package}")]
    MissingManifest { package: String },

    #[error("Failed to read manifest of {package}: {source}")]
    ManifestRead {
        package: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed manifest for {package}: {source}")]
    Manifest {
        package: String,
        #[source]
        source: quick_xml::DeError,
    },
}

/// Answer to a lookup: the package's own name, if known, and its dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    /// Name as the source spells it, regardless of the casing asked for
    pub canonical: Option<String>,
    pub dependencies: Vec<Dependency>,
}

/// Source of direct-dependency information
///
/// Implementations must return promptly with either a list or an error;
/// the builder issues lookups one at a time and never retries.
pub trait DependencyProvider {
    /// Direct dependencies of `id` at `version`, in declaration order
    fn lookup(&self, id: &str, version: &str) -> Result<Vec<Dependency>, LookupError>;

    /// Same as [`lookup`](Self::lookup), plus the canonical package name
    ///
    /// Sources that know how a package is really spelled override this so
    /// the graph is keyed the same way whatever casing reached it first.
    fn resolve(&self, id: &str, version: &str) -> Result<Resolved, LookupError> {
        Ok(Resolved {
            canonical: None,
            dependencies: self.lookup(id, version)?,
        })
    }
}

impl<P: DependencyProvider + ?Sized> DependencyProvider for &P {
    fn lookup(&self, id: &str, version: &str) -> Result<Vec<Dependency>, LookupError> {
        (**self).lookup(id, version)
    }

    fn resolve(&self, id: &str, version: &str) -> Result<Resolved, LookupError> {
        (**self).resolve(id, version)
    }
}

impl<P: DependencyProvider + ?Sized> DependencyProvider for Box<P> {
    fn lookup(&self, id: &str, version: &str) -> Result<Vec<Dependency>, LookupError> {
        (**self).lookup(id, version)
    }

    fn resolve(&self, id: &str, version: &str) -> Result<Resolved, LookupError> {
        (**self).resolve(id, version)
    }
}
