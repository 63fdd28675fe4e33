//! Resolution of declared dependencies into published coordinates.

use std::fmt;
use std::sync::Arc;

use vermap_core::coordinates::ResolvedCoordinates;
use vermap_core::dependency::{
    Attributes, DeclaredDependency, DependencyConstraint, ProjectReference,
};
use vermap_core::identity::IdentityPath;

use crate::graph::DependencyGraph;
use crate::mapping;
use crate::publication::ProjectPublicationResolver;
use crate::transform::{DeclaredVersionTransformer, IdentityTransformer};
use crate::warnings::WarningCollector;

/// Determines the coordinates a declared dependency is published with.
///
/// The variant-level entry points record declaration features the
/// resolver cannot honor, then fall back to component-level coordinates.
pub trait VariantDependencyResolver {
    fn resolve_variant_coordinates(
        &self,
        dependency: &DeclaredDependency,
        warnings: &mut WarningCollector,
    ) -> ResolvedCoordinates;

    fn resolve_constraint_variant_coordinates(
        &self,
        constraint: &DependencyConstraint,
        warnings: &mut WarningCollector,
    ) -> ResolvedCoordinates;

    fn resolve_component_coordinates(&self, dependency: &DeclaredDependency)
        -> ResolvedCoordinates;

    fn resolve_constraint_coordinates(&self, constraint: &DependencyConstraint)
        -> ResolvedCoordinates;
}

/// Resolves against a resolution graph snapshot, or only against declared
/// and publication coordinates when no graph is configured.
///
/// Cloning is cheap; clones share the graph and collaborators, so one
/// resolver can be handed to a worker per published variant.
#[derive(Clone)]
pub struct VersionMappingResolver {
    publications: Arc<dyn ProjectPublicationResolver>,
    graph: Option<Arc<DependencyGraph>>,
    transformer: Arc<dyn DeclaredVersionTransformer>,
}

impl VersionMappingResolver {
    pub fn new(
        publications: Arc<dyn ProjectPublicationResolver>,
        graph: Option<Arc<DependencyGraph>>,
        transformer: Arc<dyn DeclaredVersionTransformer>,
    ) -> Self {
        Self {
            publications,
            graph,
            transformer,
        }
    }

    /// Resolver that publishes unmapped declared versions unchanged.
    pub fn with_identity_transformer(
        publications: Arc<dyn ProjectPublicationResolver>,
        graph: Option<Arc<DependencyGraph>>,
    ) -> Self {
        Self::new(publications, graph, Arc::new(IdentityTransformer))
    }

    /// Coordinates of a build unit: its publication identity, with the
    /// version mapping applied when the graph knows about it.
    pub fn resolve_project(&self, dependency: &ProjectReference) -> ResolvedCoordinates {
        let path = &dependency.identity_path;
        let coordinates = self.publications.resolve(path);
        self.maybe_resolve_version(&coordinates.group, &coordinates.artifact, Some(path))
            .unwrap_or(coordinates)
    }

    fn resolve_module(&self, group: &str, artifact: &str, declared: &str) -> ResolvedCoordinates {
        self.maybe_resolve_version(group, artifact, None)
            .unwrap_or_else(|| {
                ResolvedCoordinates::new(
                    group,
                    artifact,
                    self.transformer.transform(group, artifact, declared),
                )
            })
    }

    pub fn maybe_resolve_version(
        &self,
        group: &str,
        artifact: &str,
        identity_path: Option<&IdentityPath>,
    ) -> Option<ResolvedCoordinates> {
        let graph = self.graph.as_deref()?;
        mapping::maybe_resolve_version(
            graph,
            self.publications.as_ref(),
            group,
            artifact,
            identity_path,
        )
    }

    /// `group:artifact:version` naming a project in warnings.
    fn describe_project(&self, dependency: &ProjectReference) -> String {
        self.publications
            .resolve(&dependency.identity_path)
            .to_string()
    }
}

impl fmt::Debug for VersionMappingResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionMappingResolver")
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}

fn describe_module(group: &str, artifact: &str, version: &str) -> String {
    format!("{group}:{artifact}:{version}")
}

fn warn_attributes<F>(attributes: &Attributes, describe: F, warnings: &mut WarningCollector)
where
    F: FnOnce() -> String,
{
    if !attributes.is_empty() {
        warnings.add_unsupported(format!("{} declared with attributes", describe()));
    }
}

impl VariantDependencyResolver for VersionMappingResolver {
    fn resolve_variant_coordinates(
        &self,
        dependency: &DeclaredDependency,
        warnings: &mut WarningCollector,
    ) -> ResolvedCoordinates {
        let attributes = dependency.attributes();
        match dependency {
            DeclaredDependency::Module(m) => {
                let describe = describe_module(&m.group, &m.artifact, &m.version);
                warn_attributes(attributes, || describe.clone(), warnings);
                if !m.capabilities.is_empty() {
                    warnings.add_unsupported(format!("{describe} declared with capabilities"));
                }
            }
            DeclaredDependency::Project(p) => {
                warn_attributes(attributes, || self.describe_project(p), warnings);
            }
        }

        // No variant-level precision here; publish component-level coordinates.
        self.resolve_component_coordinates(dependency)
    }

    fn resolve_constraint_variant_coordinates(
        &self,
        constraint: &DependencyConstraint,
        warnings: &mut WarningCollector,
    ) -> ResolvedCoordinates {
        let attributes = constraint.attributes();
        match constraint {
            DependencyConstraint::Module(m) => warn_attributes(
                attributes,
                || describe_module(&m.group, &m.artifact, &m.version),
                warnings,
            ),
            DependencyConstraint::Project(p) => {
                warn_attributes(attributes, || self.describe_project(p), warnings)
            }
        }

        self.resolve_constraint_coordinates(constraint)
    }

    fn resolve_component_coordinates(&self, dependency: &DeclaredDependency) -> ResolvedCoordinates {
        match dependency {
            DeclaredDependency::Project(project) => self.resolve_project(project),
            DeclaredDependency::Module(module) => {
                self.resolve_module(&module.group, &module.artifact, &module.version)
            }
        }
    }

    fn resolve_constraint_coordinates(&self, constraint: &DependencyConstraint) -> ResolvedCoordinates {
        match constraint {
            DependencyConstraint::Project(project) => self.resolve_project(project),
            DependencyConstraint::Module(module) => {
                self.resolve_module(&module.group, &module.artifact, &module.version)
            }
        }
    }
}
