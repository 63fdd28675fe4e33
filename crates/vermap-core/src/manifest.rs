use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use vermap_util::errors::VermapError;

use crate::dependency::{DeclaredDependency, DependencyConstraint};
use crate::identity::IdentityPath;

/// Default snapshot file name, relative to the manifest directory.
pub const DEFAULT_SNAPSHOT_FILE: &str = "vermap.lock";

/// The parsed representation of a `Publish.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishManifest {
    pub project: ProjectMetadata,

    /// Per-unit overrides of the identity-derived publication coordinates.
    #[serde(default)]
    pub projects: BTreeMap<IdentityPath, PublicationOverride>,

    #[serde(default, rename = "version-mapping")]
    pub version_mapping: Option<VersionMappingConfig>,

    #[serde(default)]
    pub variants: Vec<VariantSpec>,
}

/// Defaults every build unit publishes under, from `[project]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Artifact name of the root unit `:`.
    pub name: String,
    pub group: String,
    pub version: String,
}

/// Any subset of coordinates overriding the defaults for one unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicationOverride {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub artifact: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Settings from `[version-mapping]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionMappingConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_snapshot")]
    pub snapshot: String,
    /// Qualifier appended to declared versions that no mapping covers.
    #[serde(default, rename = "unmapped-qualifier")]
    pub unmapped_qualifier: Option<String>,
}

impl Default for VersionMappingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            snapshot: default_snapshot(),
            unmapped_qualifier: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_snapshot() -> String {
    DEFAULT_SNAPSHOT_FILE.to_string()
}

/// A published variant and the dependencies it declares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantSpec {
    pub name: String,
    #[serde(default)]
    pub dependencies: Vec<DeclaredDependency>,
    #[serde(default)]
    pub constraints: Vec<DependencyConstraint>,
}

impl PublishManifest {
    /// Load and parse a `Publish.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content =
            vermap_util::fs::read_to_string_with(path, |message| VermapError::Manifest { message })?;
        Self::from_str(&content)
    }

    /// Parse a `Publish.toml` from a string and validate it.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        let manifest: Self = toml::from_str(content).map_err(|e| VermapError::Manifest {
            message: format!("Failed to parse Publish.toml: {e}"),
        })?;
        manifest.validate()?;
        tracing::debug!(
            "parsed manifest for {}: {} variants, {} unit overrides",
            manifest.project.name,
            manifest.variants.len(),
            manifest.projects.len()
        );
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), VermapError> {
        let mut seen = BTreeSet::new();
        for variant in &self.variants {
            if variant.name.is_empty() {
                return Err(VermapError::Manifest {
                    message: "variant name must not be empty".to_string(),
                });
            }
            if !seen.insert(variant.name.as_str()) {
                return Err(VermapError::Manifest {
                    message: format!("variant '{}' is declared more than once", variant.name),
                });
            }
        }
        Ok(())
    }

    /// Whether a resolution graph should be consulted at all.
    pub fn mapping_enabled(&self) -> bool {
        self.version_mapping.as_ref().is_some_and(|m| m.enabled)
    }

    /// Location of the graph snapshot, or `None` when mapping is disabled.
    pub fn snapshot_path(&self, manifest_dir: &Path) -> Option<PathBuf> {
        self.version_mapping
            .as_ref()
            .filter(|m| m.enabled)
            .map(|m| manifest_dir.join(&m.snapshot))
    }

    pub fn unmapped_qualifier(&self) -> Option<&str> {
        self.version_mapping
            .as_ref()
            .and_then(|m| m.unmapped_qualifier.as_deref())
            .filter(|q| !q.is_empty())
    }
}
