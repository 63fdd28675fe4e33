//! Loading a resolution graph snapshot from a `vermap.lock` file.
//!
//! Ids starting with `:` are build-unit identity paths; anything else is a
//! module coordinate string (`group:artifact:version` for components,
//! `group:artifact[:version]` for requested selectors).

use std::path::Path;

use serde::{Deserialize, Serialize};

use vermap_core::coordinates::ResolvedCoordinates;
use vermap_core::identity::IdentityPath;
use vermap_util::errors::VermapError;

use crate::graph::{ComponentId, ComponentSelector, DependencyGraph, ModuleSelector, ResolvedComponent};

/// On-disk shape of a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub component: Vec<ComponentEntry>,
    #[serde(default)]
    pub dependency: Vec<DependencyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentEntry {
    pub id: String,
    #[serde(default)]
    pub coordinates: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyEntry {
    pub from: String,
    pub requested: String,
    #[serde(default)]
    pub selected: Option<String>,
    #[serde(default)]
    pub failure: Option<String>,
}

/// Load and build a graph from a snapshot file.
pub fn load(path: &Path) -> miette::Result<DependencyGraph> {
    let content =
        vermap_util::fs::read_to_string_with(path, |message| VermapError::Snapshot { message })?;
    parse(&content)
}

/// Parse and build a graph from snapshot text.
pub fn parse(content: &str) -> miette::Result<DependencyGraph> {
    let file: SnapshotFile = toml::from_str(content).map_err(|e| VermapError::Snapshot {
        message: format!("Failed to parse snapshot: {e}"),
    })?;
    Ok(build(&file)?)
}

/// Build a graph from an already-deserialized snapshot.
pub fn build(file: &SnapshotFile) -> Result<DependencyGraph, VermapError> {
    let mut graph = DependencyGraph::new();

    for entry in &file.component {
        let component = parse_component(entry)?;
        if graph.find(&component.id).is_some() {
            return Err(snapshot_error(format!(
                "component '{}' is declared more than once",
                entry.id
            )));
        }
        graph.add_component(component);
    }

    for entry in &file.dependency {
        let from = lookup(&graph, &entry.from)?;
        let requested = parse_selector(&entry.requested)?;
        match (&entry.selected, &entry.failure) {
            (Some(selected), None) => {
                let selected = lookup(&graph, selected)?;
                graph.add_dependency(from, requested, selected);
            }
            (None, Some(failure)) => graph.add_unresolved(from, requested, failure.clone()),
            _ => {
                return Err(snapshot_error(format!(
                    "dependency '{} -> {}' must have exactly one of 'selected' or 'failure'",
                    entry.from, entry.requested
                )))
            }
        }
    }

    for (key, components) in graph.duplicate_modules() {
        tracing::warn!(
            "resolution graph carries {} components for {key}; the first one wins",
            components.len()
        );
    }

    tracing::debug!(
        "loaded snapshot: {} components, {} resolved edges, {} unresolved",
        graph.len(),
        graph.resolved_dependencies().count(),
        graph.unresolved().len()
    );
    Ok(graph)
}

fn parse_component(entry: &ComponentEntry) -> Result<ResolvedComponent, VermapError> {
    let coordinates = entry
        .coordinates
        .as_deref()
        .map(|c| {
            ResolvedCoordinates::parse(c)
                .ok_or_else(|| snapshot_error(format!("invalid coordinates '{c}' for '{}'", entry.id)))
        })
        .transpose()?;

    match parse_component_id(&entry.id)? {
        ComponentId::Project(path) => Ok(ResolvedComponent::project(path, coordinates)),
        ComponentId::Module(id) => Ok(ResolvedComponent {
            module_coordinates: Some(coordinates.unwrap_or_else(|| id.clone())),
            id: ComponentId::Module(id),
        }),
    }
}

fn parse_component_id(s: &str) -> Result<ComponentId, VermapError> {
    if IdentityPath::looks_like(s) {
        let path = s.parse().map_err(|e| snapshot_error(format!("{e}")))?;
        return Ok(ComponentId::Project(path));
    }
    ResolvedCoordinates::parse(s)
        .map(ComponentId::Module)
        .ok_or_else(|| snapshot_error(format!("invalid component id '{s}'")))
}

fn parse_selector(s: &str) -> Result<ComponentSelector, VermapError> {
    if IdentityPath::looks_like(s) {
        let path = s.parse().map_err(|e| snapshot_error(format!("{e}")))?;
        return Ok(ComponentSelector::Project(path));
    }
    ModuleSelector::parse(s)
        .map(ComponentSelector::Module)
        .ok_or_else(|| snapshot_error(format!("invalid requested selector '{s}'")))
}

fn lookup(graph: &DependencyGraph, s: &str) -> Result<petgraph::graph::NodeIndex, VermapError> {
    let id = parse_component_id(s)?;
    graph
        .find(&id)
        .ok_or_else(|| snapshot_error(format!("unknown component '{s}'")))
}

fn snapshot_error(message: String) -> VermapError {
    VermapError::Snapshot { message }
}
