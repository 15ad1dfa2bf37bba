//! NuGet flat-container registry provider
//!
//! Resolves a package to `<base>/<id>/<version>/<id>.<version>.nupkg`
//! (identifier and version lower-cased), downloads the archive, and reads the
//! `<dependency>` elements of the `.nuspec` manifest inside it.

use super::{Dependency, DependencyProvider, LookupError, Resolved};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::{Cursor, Read};
use std::time::Duration;
use tracing::{debug, trace};

/// Parsed `.nuspec` document (only the parts the graph needs)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub metadata: ManifestMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestMetadata {
    /// Package name as published
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub dependencies: Option<DependencySet>,
}

/// `<dependencies>` holds either bare `<dependency>` elements or
/// per-framework `<group>` elements
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencySet {
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<ManifestDependency>,
    #[serde(default, rename = "group")]
    pub groups: Vec<DependencyGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyGroup {
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<ManifestDependency>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestDependency {
    #[serde(default, rename = "@id")]
    pub id: Option<String>,
    #[serde(default, rename = "@version")]
    pub version: Option<String>,
}

impl PackageManifest {
    /// Parse manifest XML
    pub fn parse(package: &str, xml: &str) -> Result<Self, LookupError> {
        quick_xml::de::from_str(xml).map_err(|source| LookupError::Manifest {
            package: package.to_string(),
            source,
        })
    }

    /// Published package name, if the manifest declares a non-empty one
    pub fn id(&self) -> Option<&str> {
        self.metadata
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Direct dependencies across all framework groups
    ///
    /// Entries without an `id` are dropped. An id repeated across groups is
    /// reported once, at its first position (compared ignoring case).
    pub fn dependencies(&self) -> Vec<Dependency> {
        let Some(set) = &self.metadata.dependencies else {
            return Vec::new();
        };

        let declared = set
            .dependencies
            .iter()
            .chain(set.groups.iter().flat_map(|group| group.dependencies.iter()));

        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for dep in declared {
            let Some(id) = dep.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) else {
                continue;
            };
            if seen.insert(id.to_ascii_lowercase()) {
                result.push(Dependency::new(
                    id,
                    dep.version.as_deref().and_then(version_floor),
                ));
            }
        }
        result
    }
}

/// Reduce a NuGet version or version range to a concrete version to fetch
///
/// `1.2.0` and `[1.2.0, )` both give `1.2.0`; `(, 2.0]` has no lower bound
/// and gives `None`.
pub fn version_floor(range: &str) -> Option<String> {
    let inner = range
        .trim()
        .trim_start_matches(['[', '('])
        .trim_end_matches([']', ')']);
    let lower = inner.split(',').next().unwrap_or_default().trim();
    (!lower.is_empty()).then(|| lower.to_string())
}

/// Pull the `.nuspec` manifest text out of a `.nupkg` archive
pub fn read_manifest_from_archive(package: &str, bytes: &[u8]) -> Result<String, LookupError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|source| LookupError::Archive {
            package: package.to_string(),
            source,
        })?;

    let name = archive
        .file_names()
        .find(|name| name.to_ascii_lowercase().ends_with(".nuspec"))
        .map(str::to_string)
        .ok_or_else(|| LookupError::MissingManifest {
            package: package.to_string(),
        })?;
    trace!(package, entry = %name, "Found manifest entry");

    let mut entry = archive
        .by_name(&name)
        .map_err(|source| LookupError::Archive {
            package: package.to_string(),
            source,
        })?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|source| LookupError::ManifestRead {
            package: package.to_string(),
            source,
        })?;
    Ok(xml)
}

/// Blocking client for a NuGet v3 flat container
pub struct RegistryProvider {
    client: Client,
    base_url: String,
}

impl RegistryProvider {
    /// Create a provider rooted at `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("depgraph/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| LookupError::Client { source })?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Flat-container download location for a package version
    pub fn package_url(&self, id: &str, version: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let id = id.to_lowercase();
        let version = version.to_lowercase();
        format!("{base}/{id}/{version}/{id}.{version}.nupkg")
    }

    /// Download and parse the manifest of one package version
    pub fn fetch_manifest(&self, id: &str, version: &str) -> Result<PackageManifest, LookupError> {
        let url = self.package_url(id, version);
        debug!(package = id, version, %url, "Fetching package");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| LookupError::Http {
                url: url.clone(),
                source,
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound {
                package: id.to_string(),
                version: version.to_string(),
            });
        }

        let bytes = response
            .error_for_status()
            .and_then(|response| response.bytes())
            .map_err(|source| LookupError::Http {
                url: url.clone(),
                source,
            })?;
        trace!(package = id, size = bytes.len(), "Downloaded package");

        let xml = read_manifest_from_archive(id, &bytes)?;
        PackageManifest::parse(id, &xml)
    }
}

impl DependencyProvider for RegistryProvider {
    fn lookup(&self, id: &str, version: &str) -> Result<Vec<Dependency>, LookupError> {
        Ok(self.resolve(id, version)?.dependencies)
    }

    fn resolve(&self, id: &str, version: &str) -> Result<Resolved, LookupError> {
        let manifest = self.fetch_manifest(id, version)?;
        let dependencies = manifest.dependencies();
        debug!(
            package = id,
            version,
            published = manifest.id().unwrap_or_default(),
            count = dependencies.len(),
            "Resolved direct dependencies"
        );
        Ok(Resolved {
            canonical: manifest.id().map(str::to_string),
            dependencies,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("registry.test.rs");
}
