//! Version mapping: look up the resolved coordinates of a requested module
//! or build unit in a resolution graph snapshot.

use tracing::debug;

use vermap_core::coordinates::ResolvedCoordinates;
use vermap_core::identity::IdentityPath;

use crate::graph::{ComponentSelector, DependencyGraph, ResolvedComponent};
use crate::publication::ProjectPublicationResolver;

/// Find the coordinates resolution selected for `group:artifact`.
///
/// Components are scanned first; when the request never became a node
/// (typically because it was substituted before resolution) the resolved
/// edges are scanned for a selector naming it. `identity_path` lets a
/// project selector match when resolving on behalf of a build unit. A match
/// on a build unit yields that unit's publication coordinates, never its
/// internal ones. First match wins in both scans.
///
/// Returns `None` when the graph carries no information about the request.
pub fn maybe_resolve_version(
    graph: &DependencyGraph,
    publications: &dyn ProjectPublicationResolver,
    group: &str,
    artifact: &str,
    identity_path: Option<&IdentityPath>,
) -> Option<ResolvedCoordinates> {
    let by_component = graph.components().find(|component| {
        component
            .module_coordinates
            .as_ref()
            .is_some_and(|coords| coords.is_module(group, artifact))
    });
    if let Some(component) = by_component {
        debug!("{group}:{artifact} resolved to component {component}");
        return publication_coordinates(component, publications);
    }

    let by_edge = graph
        .resolved_dependencies()
        .find(|(requested, _)| selector_matches(requested, group, artifact, identity_path));
    if let Some((requested, selected)) = by_edge {
        debug!("{group}:{artifact} not in graph; edge {requested} selected {selected}");
        return publication_coordinates(selected, publications);
    }

    debug!("no version mapping for {group}:{artifact}");
    None
}

fn selector_matches(
    requested: &ComponentSelector,
    group: &str,
    artifact: &str,
    identity_path: Option<&IdentityPath>,
) -> bool {
    match requested {
        ComponentSelector::Module(m) => m.group == group && m.artifact == artifact,
        ComponentSelector::Project(path) => identity_path == Some(path),
    }
}

fn publication_coordinates(
    component: &ResolvedComponent,
    publications: &dyn ProjectPublicationResolver,
) -> Option<ResolvedCoordinates> {
    match component.project_path() {
        Some(path) => {
            let published = publications.resolve(path);
            debug!("component is build unit {path}; publishing as {published}");
            Some(published)
        }
        None => component.module_coordinates.clone(),
    }
}
