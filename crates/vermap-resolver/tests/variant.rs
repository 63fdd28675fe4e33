use std::sync::Arc;

use vermap_core::coordinates::ResolvedCoordinates;
use vermap_core::dependency::{
    DeclaredDependency, DependencyConstraint, ModuleConstraint, ModuleReference, ProjectReference,
};
use vermap_core::identity::IdentityPath;
use vermap_resolver::graph::{
    ComponentSelector, DependencyGraph, ModuleSelector, ResolvedComponent,
};
use vermap_resolver::publication::ProjectPublicationResolver;
use vermap_resolver::transform::QualifierTransformer;
use vermap_resolver::variant::{VariantDependencyResolver, VersionMappingResolver};
use vermap_resolver::warnings::WarningCollector;

fn coords(g: &str, a: &str, v: &str) -> ResolvedCoordinates {
    ResolvedCoordinates::new(g, a, v)
}

fn path(s: &str) -> IdentityPath {
    s.parse().unwrap()
}

fn select(s: &str) -> ComponentSelector {
    ComponentSelector::Module(ModuleSelector::parse(s).unwrap())
}

/// Units publish as `com.acme:<last segment>:1.0.0`.
fn publications() -> Arc<dyn ProjectPublicationResolver> {
    Arc::new(|p: &IdentityPath| coords("com.acme", p.name().unwrap_or("app"), "1.0.0"))
}

fn resolver(graph: Option<DependencyGraph>) -> VersionMappingResolver {
    VersionMappingResolver::with_identity_transformer(publications(), graph.map(Arc::new))
}

fn module(g: &str, a: &str, v: &str) -> DeclaredDependency {
    ModuleReference::new(g, a, v).into()
}

fn project(p: &str) -> DeclaredDependency {
    ProjectReference::new(path(p)).into()
}

#[test]
fn test_unmapped_module_in_empty_graph_keeps_declared_coordinates() {
    let r = resolver(Some(DependencyGraph::new()));
    for (g, a, v) in [("com.acme", "lib", "1.0"), ("org.x", "y", ""), ("a", "b", "[1,2)")] {
        assert_eq!(r.resolve_component_coordinates(&module(g, a, v)), coords(g, a, v));
    }
}

#[test]
fn test_no_graph_keeps_declared_coordinates() {
    let r = resolver(None);
    assert_eq!(
        r.resolve_component_coordinates(&module("com.acme", "lib", "1.0")),
        coords("com.acme", "lib", "1.0")
    );
}

#[test]
fn test_mapped_version_overrides_declared() {
    let mut g = DependencyGraph::new();
    g.add_component(ResolvedComponent::module(coords("com.acme", "lib", "2.3.1")));
    let r = resolver(Some(g));
    for declared in ["1.0", "", "2.3.1", "latest.release"] {
        assert_eq!(
            r.resolve_component_coordinates(&module("com.acme", "lib", declared)),
            coords("com.acme", "lib", "2.3.1")
        );
    }
}

#[test]
fn test_unrelated_components_do_not_affect_declared_module() {
    let mut g = DependencyGraph::new();
    g.add_component(ResolvedComponent::module(coords("com.acme", "other", "5.0")));
    let r = resolver(Some(g));
    assert_eq!(
        r.resolve_component_coordinates(&module("com.acme", "lib", "1.0")),
        coords("com.acme", "lib", "1.0")
    );
}

#[test]
fn test_edge_fallback_follows_substitution() {
    let mut g = DependencyGraph::new();
    let root = g.add_component(ResolvedComponent::project(IdentityPath::root(), None));
    let replacement = g.add_component(ResolvedComponent::module(coords("org.new", "lib2", "4.1")));
    g.add_dependency(root, select("org.old:lib:1.0"), replacement);
    let r = resolver(Some(g));
    assert_eq!(
        r.resolve_component_coordinates(&module("org.old", "lib", "1.0")),
        coords("org.new", "lib2", "4.1")
    );
}

#[test]
fn test_module_substituted_by_project_publishes_project_identity() {
    let mut g = DependencyGraph::new();
    let root = g.add_component(ResolvedComponent::project(IdentityPath::root(), None));
    let util = g.add_component(ResolvedComponent::project(
        path(":libs:util"),
        Some(coords("internal", "util", "unspecified")),
    ));
    g.add_dependency(root, select("org.legacy:util:0.1"), util);
    let r = resolver(Some(g));
    assert_eq!(
        r.resolve_component_coordinates(&module("org.legacy", "util", "0.1")),
        coords("com.acme", "util", "1.0.0")
    );
}

#[test]
fn test_direct_match_on_project_component_publishes_project_identity() {
    let mut g = DependencyGraph::new();
    g.add_component(ResolvedComponent::project(
        path(":core"),
        Some(coords("internal", "core", "unspecified")),
    ));
    let r = resolver(Some(g));
    assert_eq!(
        r.resolve_component_coordinates(&module("internal", "core", "1")),
        coords("com.acme", "core", "1.0.0")
    );
}

#[test]
fn test_project_reference_without_mapping_uses_publication_identity() {
    assert_eq!(
        resolver(None).resolve_component_coordinates(&project(":core")),
        coords("com.acme", "core", "1.0.0")
    );
    assert_eq!(
        resolver(Some(DependencyGraph::new())).resolve_component_coordinates(&project(":core")),
        coords("com.acme", "core", "1.0.0")
    );
}

#[test]
fn test_project_reference_takes_mapped_version() {
    let mut g = DependencyGraph::new();
    g.add_component(ResolvedComponent::module(coords("com.acme", "core", "1.4.0")));
    let r = resolver(Some(g));
    assert_eq!(
        r.resolve_component_coordinates(&project(":core")),
        coords("com.acme", "core", "1.4.0")
    );
}

#[test]
fn test_project_reference_matches_project_selector_edge() {
    let mut g = DependencyGraph::new();
    let root = g.add_component(ResolvedComponent::project(IdentityPath::root(), None));
    let external = g.add_component(ResolvedComponent::module(coords("org.ext", "core", "7.0")));
    g.add_dependency(root, ComponentSelector::Project(path(":core")), external);
    let r = resolver(Some(g));
    assert_eq!(
        r.resolve_component_coordinates(&project(":core")),
        coords("org.ext", "core", "7.0")
    );
}

#[test]
fn test_project_reference_matches_module_selector_for_its_publication() {
    let mut g = DependencyGraph::new();
    let root = g.add_component(ResolvedComponent::project(IdentityPath::root(), None));
    let external = g.add_component(ResolvedComponent::module(coords("org.ext", "core", "7.0")));
    g.add_dependency(root, select("com.acme:core:1.0"), external);
    let r = resolver(Some(g));
    assert_eq!(
        r.resolve_component_coordinates(&project(":core")),
        coords("org.ext", "core", "7.0")
    );
}

#[test]
fn test_unmapped_module_goes_through_transformer() {
    let r = VersionMappingResolver::new(
        publications(),
        None,
        Arc::new(QualifierTransformer::new("SNAPSHOT")),
    );
    assert_eq!(
        r.resolve_component_coordinates(&module("com.acme", "lib", "1.0")),
        coords("com.acme", "lib", "1.0-SNAPSHOT")
    );
}

#[test]
fn test_transformer_not_consulted_when_mapped() {
    let mut g = DependencyGraph::new();
    g.add_component(ResolvedComponent::module(coords("com.acme", "lib", "2.0")));
    let r = VersionMappingResolver::new(
        publications(),
        Some(Arc::new(g)),
        Arc::new(|_: &str, _: &str, _: &str| -> String { panic!("transformer called") }),
    );
    assert_eq!(
        r.resolve_component_coordinates(&module("com.acme", "lib", "1.0")),
        coords("com.acme", "lib", "2.0")
    );
}

#[test]
fn test_attribute_and_capability_produce_two_warnings() {
    let dep: DeclaredDependency = ModuleReference::new("com.acme", "lib", "1.0")
        .with_attribute("category", "platform")
        .with_capability("com.acme:lib-test-fixtures")
        .into();
    let mut warnings = WarningCollector::new();
    let result = resolver(None).resolve_variant_coordinates(&dep, &mut warnings);

    assert_eq!(result, coords("com.acme", "lib", "1.0"));
    assert_eq!(warnings.len(), 2);
    for message in warnings.unsupported() {
        assert!(message.contains("com.acme:lib"), "got: {message}");
    }
    assert_eq!(
        warnings.unsupported(),
        [
            "com.acme:lib:1.0 declared with attributes".to_string(),
            "com.acme:lib:1.0 declared with capabilities".to_string(),
        ]
    );
}

#[test]
fn test_plain_dependency_produces_no_warnings() {
    let mut warnings = WarningCollector::new();
    resolver(None).resolve_variant_coordinates(&module("g", "a", "1"), &mut warnings);
    resolver(None).resolve_variant_coordinates(&project(":core"), &mut warnings);
    assert!(warnings.is_empty());
}

#[test]
fn test_project_attributes_warn_with_publication_coordinates() {
    let dep: DeclaredDependency = ProjectReference::new(path(":core"))
        .with_attribute("category", "platform")
        .into();
    let mut warnings = WarningCollector::new();
    resolver(None).resolve_variant_coordinates(&dep, &mut warnings);
    assert_eq!(
        warnings.unsupported(),
        ["com.acme:core:1.0.0 declared with attributes".to_string()]
    );
}

#[test]
fn test_variant_resolution_matches_component_resolution() {
    let mut g = DependencyGraph::new();
    g.add_component(ResolvedComponent::module(coords("com.acme", "lib", "2.3.1")));
    let r = resolver(Some(g));
    let dep: DeclaredDependency = ModuleReference::new("com.acme", "lib", "1.0")
        .with_attribute("k", "v")
        .into();
    let mut warnings = WarningCollector::new();
    assert_eq!(
        r.resolve_variant_coordinates(&dep, &mut warnings),
        r.resolve_component_coordinates(&dep)
    );
}

#[test]
fn test_constraints_resolve_like_dependencies() {
    let mut g = DependencyGraph::new();
    g.add_component(ResolvedComponent::module(coords("org.slf4j", "slf4j-api", "2.0.9")));
    let r = resolver(Some(g));

    let module_constraint: DependencyConstraint =
        ModuleConstraint::new("org.slf4j", "slf4j-api", "2.0.0").into();
    assert_eq!(
        r.resolve_constraint_coordinates(&module_constraint),
        coords("org.slf4j", "slf4j-api", "2.0.9")
    );

    let project_constraint: DependencyConstraint = ProjectReference::new(path(":util")).into();
    assert_eq!(
        r.resolve_constraint_coordinates(&project_constraint),
        coords("com.acme", "util", "1.0.0")
    );
}

#[test]
fn test_constraint_only_warns_about_attributes() {
    let constraint: DependencyConstraint = ModuleConstraint::new("g", "a", "3")
        .with_attribute("category", "platform")
        .into();
    let mut warnings = WarningCollector::new();
    let result = resolver(None).resolve_constraint_variant_coordinates(&constraint, &mut warnings);
    assert_eq!(result, coords("g", "a", "3"));
    assert_eq!(
        warnings.unsupported(),
        ["g:a:3 declared with attributes".to_string()]
    );
}

#[test]
fn test_end_to_end_mapped_component() {
    let mut g = DependencyGraph::new();
    g.add_component(ResolvedComponent::module(coords("com.acme", "lib", "2.3.1")));
    assert_eq!(
        resolver(Some(g)).resolve_component_coordinates(&module("com.acme", "lib", "1.0")),
        coords("com.acme", "lib", "2.3.1")
    );
}

#[test]
fn test_end_to_end_mapping_disabled() {
    assert_eq!(
        resolver(None).resolve_component_coordinates(&module("com.acme", "lib", "1.0")),
        coords("com.acme", "lib", "1.0")
    );
}

#[test]
fn test_shared_resolver_across_threads() {
    let mut g = DependencyGraph::new();
    g.add_component(ResolvedComponent::module(coords("com.acme", "lib", "2.3.1")));
    let r = resolver(Some(g));

    let results: Vec<(ResolvedCoordinates, usize)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let r = r.clone();
                scope.spawn(move || {
                    let mut warnings = WarningCollector::new();
                    let dep: DeclaredDependency = ModuleReference::new("com.acme", "lib", "1.0")
                        .with_attribute("worker", i.to_string())
                        .into();
                    let c = r.resolve_variant_coordinates(&dep, &mut warnings);
                    (c, warnings.len())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (c, warning_count) in results {
        assert_eq!(c, coords("com.acme", "lib", "2.3.1"));
        assert_eq!(warning_count, 1);
    }
}

#[test]
fn test_debug_output_shows_graph() {
    let r = resolver(None);
    assert_eq!(format!("{r:?}"), "VersionMappingResolver { graph: None, .. }");

    let with_graph = format!("{:?}", resolver(Some(DependencyGraph::new())));
    assert!(with_graph.starts_with("VersionMappingResolver { graph: Some("), "got: {with_graph}");
}
