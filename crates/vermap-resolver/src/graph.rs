//! Read-only snapshot of an already-resolved dependency graph.
//!
//! The graph is produced by an upstream resolution engine and consumed here
//! as-is: components are the nodes that resolution selected, and every
//! resolved edge remembers the selector that was originally requested, which
//! may name something other than the component it ended up selecting.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use vermap_core::coordinates::ResolvedCoordinates;
use vermap_core::identity::IdentityPath;

/// Identity of a resolved component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// An external module.
    Module(ResolvedCoordinates),
    /// A build unit of the current project.
    Project(IdentityPath),
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(coords) => write!(f, "{coords}"),
            Self::Project(path) => write!(f, "project {path}"),
        }
    }
}

/// A node in the resolved graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedComponent {
    pub id: ComponentId,
    /// Module coordinates the component carries inside the graph. For a
    /// project these are internal and not necessarily publishable.
    pub module_coordinates: Option<ResolvedCoordinates>,
}

impl ResolvedComponent {
    /// A module component; its coordinates double as module coordinates.
    pub fn module(coordinates: ResolvedCoordinates) -> Self {
        Self {
            module_coordinates: Some(coordinates.clone()),
            id: ComponentId::Module(coordinates),
        }
    }

    pub fn project(path: IdentityPath, module_coordinates: Option<ResolvedCoordinates>) -> Self {
        Self {
            id: ComponentId::Project(path),
            module_coordinates,
        }
    }

    /// Identity path when the component is a build unit.
    pub fn project_path(&self) -> Option<&IdentityPath> {
        match &self.id {
            ComponentId::Project(path) => Some(path),
            ComponentId::Module(_) => None,
        }
    }
}

impl fmt::Display for ResolvedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.id, &self.module_coordinates) {
            (ComponentId::Project(path), Some(coords)) => write!(f, "project {path} ({coords})"),
            (id, _) => write!(f, "{id}"),
        }
    }
}

/// A requested module, optionally with a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleSelector {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl ModuleSelector {
    /// Parse `"group:artifact"` or `"group:artifact:version"`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let (group, artifact, version) = match parts.as_slice() {
            [g, a] => (*g, *a, None),
            [g, a, v] => (*g, *a, Some(v.to_string())),
            _ => return None,
        };
        if group.is_empty() || artifact.is_empty() {
            return None;
        }
        Some(Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version,
        })
    }
}

/// What a dependency edge originally asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentSelector {
    Module(ModuleSelector),
    Project(IdentityPath),
}

impl fmt::Display for ComponentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(m) => match &m.version {
                Some(v) => write!(f, "{}:{}:{v}", m.group, m.artifact),
                None => write!(f, "{}:{}", m.group, m.artifact),
            },
            Self::Project(path) => write!(f, "project {path}"),
        }
    }
}

/// Edge label: the selector that was requested along this edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    pub requested: ComponentSelector,
}

/// A requested dependency that the upstream engine could not resolve.
#[derive(Debug, Clone)]
pub struct UnresolvedDependency {
    pub from: NodeIndex,
    pub requested: ComponentSelector,
    pub failure: String,
}

/// A resolved dependency graph backed by petgraph.
///
/// Iteration over components and edges follows insertion order, so the
/// first-match lookups in [`crate::mapping`] are deterministic for a given
/// snapshot.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<ResolvedComponent, DependencyEdge>,
    index: HashMap<ComponentId, NodeIndex>,
    unresolved: Vec<UnresolvedDependency>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or retrieve a component. If the id already exists, returns the existing index.
    pub fn add_component(&mut self, component: ResolvedComponent) -> NodeIndex {
        if let Some(&idx) = self.index.get(&component.id) {
            return idx;
        }
        let id = component.id.clone();
        let idx = self.graph.add_node(component);
        self.index.insert(id, idx);
        idx
    }

    /// Record that `from` requested `requested` and resolution selected `selected`.
    pub fn add_dependency(
        &mut self,
        from: NodeIndex,
        requested: ComponentSelector,
        selected: NodeIndex,
    ) {
        let duplicate = self
            .graph
            .edges(from)
            .any(|e| e.target() == selected && e.weight().requested == requested);
        if !duplicate {
            self.graph
                .add_edge(from, selected, DependencyEdge { requested });
        }
    }

    /// Record a request that failed to resolve.
    pub fn add_unresolved(
        &mut self,
        from: NodeIndex,
        requested: ComponentSelector,
        failure: impl Into<String>,
    ) {
        self.unresolved.push(UnresolvedDependency {
            from,
            requested,
            failure: failure.into(),
        });
    }

    /// Look up a component by id.
    pub fn find(&self, id: &ComponentId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Get the component data for an index.
    pub fn component(&self, idx: NodeIndex) -> &ResolvedComponent {
        &self.graph[idx]
    }

    /// All resolved components, in insertion order.
    pub fn components(&self) -> impl Iterator<Item = &ResolvedComponent> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Every resolved edge as `(requested, selected)`, in insertion order.
    pub fn resolved_dependencies(
        &self,
    ) -> impl Iterator<Item = (&ComponentSelector, &ResolvedComponent)> {
        self.graph
            .edge_references()
            .map(|e| (&e.weight().requested, &self.graph[e.target()]))
    }

    /// Requests the upstream engine failed to resolve.
    pub fn unresolved(&self) -> &[UnresolvedDependency] {
        &self.unresolved
    }

    /// Direct dependencies of a component.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<(NodeIndex, &DependencyEdge)> {
        let mut deps: Vec<(NodeIndex, &DependencyEdge)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
            .collect();
        // petgraph walks outgoing edges newest first
        deps.reverse();
        deps
    }

    /// Components nothing depends on. When every component sits on a cycle
    /// the first inserted component stands in as the root.
    pub fn roots(&self) -> Vec<NodeIndex> {
        let roots: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect();
        if roots.is_empty() {
            return self.graph.node_indices().take(1).collect();
        }
        roots
    }

    /// `group:artifact` keys carried by more than one component, with the
    /// offending components. A well-formed graph returns an empty map.
    pub fn duplicate_modules(&self) -> BTreeMap<String, Vec<&ResolvedComponent>> {
        let mut by_key: BTreeMap<String, Vec<&ResolvedComponent>> = BTreeMap::new();
        for component in self.components() {
            if let Some(coords) = &component.module_coordinates {
                by_key.entry(coords.key()).or_default().push(component);
            }
        }
        by_key.retain(|_, components| components.len() > 1);
        by_key
    }

    /// Print the graph as a tree from every root.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        let mut visited = HashSet::new();
        for root in self.roots() {
            output.push_str(&format!("{}\n", self.graph[root]));
            visited.insert(root);
            let deps = self.dependencies_of(root);
            let count = deps.len();
            for (i, (child, edge)) in deps.iter().enumerate() {
                let is_last = i == count - 1;
                self.print_subtree(
                    &mut output,
                    *child,
                    edge,
                    "",
                    is_last,
                    1,
                    max_depth,
                    &mut visited,
                );
            }
            visited.remove(&root);
        }
        for failed in &self.unresolved {
            output.push_str(&format!(
                "{} -> {} FAILED: {}\n",
                self.graph[failed.from], failed.requested, failed.failure
            ));
        }
        output
    }

    #[allow(clippy::too_many_arguments)]
    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        edge: &DependencyEdge,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let component = &self.graph[idx];
        if self.selector_names(&edge.requested, component) {
            output.push_str(&format!("{prefix}{connector}{component}\n"));
        } else {
            output.push_str(&format!(
                "{prefix}{connector}{} -> {component}\n",
                edge.requested
            ));
        }

        if let Some(max) = max_depth {
            if depth >= max {
                return;
            }
        }

        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let deps = self.dependencies_of(idx);
        let count = deps.len();
        for (i, (child, child_edge)) in deps.iter().enumerate() {
            let is_last = i == count - 1;
            self.print_subtree(
                output,
                *child,
                child_edge,
                &child_prefix,
                is_last,
                depth + 1,
                max_depth,
                visited,
            );
        }

        visited.remove(&idx);
    }

    /// Whether the selector literally names the selected component.
    fn selector_names(&self, requested: &ComponentSelector, component: &ResolvedComponent) -> bool {
        match (requested, &component.id) {
            (ComponentSelector::Project(path), ComponentId::Project(id)) => path == id,
            (ComponentSelector::Module(m), ComponentId::Module(coords)) => {
                coords.is_module(&m.group, &m.artifact)
                    && m.version.as_deref().map_or(true, |v| v == coords.version)
            }
            _ => false,
        }
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
