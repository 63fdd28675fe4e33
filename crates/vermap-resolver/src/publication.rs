//! Default publication identities of build units.

use std::collections::BTreeMap;

use vermap_core::coordinates::ResolvedCoordinates;
use vermap_core::identity::IdentityPath;
use vermap_core::manifest::{ProjectMetadata, PublicationOverride, PublishManifest};

/// Maps a build unit's identity path to the coordinates it publishes under.
///
/// Every well-formed identity path has exactly one such coordinate,
/// independent of any version mapping.
pub trait ProjectPublicationResolver: Send + Sync {
    fn resolve(&self, identity_path: &IdentityPath) -> ResolvedCoordinates;
}

impl<F> ProjectPublicationResolver for F
where
    F: Fn(&IdentityPath) -> ResolvedCoordinates + Send + Sync,
{
    fn resolve(&self, identity_path: &IdentityPath) -> ResolvedCoordinates {
        self(identity_path)
    }
}

/// Publication identities derived from a `Publish.toml`.
///
/// A unit publishes under `[project].group`, the last segment of its path
/// (`[project].name` for the root) and `[project].version`, each replaceable
/// through its `[projects.":path"]` entry.
#[derive(Debug, Clone)]
pub struct ManifestPublications {
    defaults: ProjectMetadata,
    overrides: BTreeMap<IdentityPath, PublicationOverride>,
}

impl ManifestPublications {
    pub fn new(
        defaults: ProjectMetadata,
        overrides: BTreeMap<IdentityPath, PublicationOverride>,
    ) -> Self {
        Self {
            defaults,
            overrides,
        }
    }

    pub fn from_manifest(manifest: &PublishManifest) -> Self {
        Self::new(manifest.project.clone(), manifest.projects.clone())
    }
}

impl ProjectPublicationResolver for ManifestPublications {
    fn resolve(&self, identity_path: &IdentityPath) -> ResolvedCoordinates {
        let over = self.overrides.get(identity_path).cloned().unwrap_or_default();
        let artifact_default = identity_path.name().unwrap_or(&self.defaults.name);
        ResolvedCoordinates::new(
            over.group.unwrap_or_else(|| self.defaults.group.clone()),
            over.artifact.unwrap_or_else(|| artifact_default.to_string()),
            over.version.unwrap_or_else(|| self.defaults.version.clone()),
        )
    }
}
