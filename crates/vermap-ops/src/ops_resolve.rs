//! Operation: resolve the published coordinates of every declared dependency.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;

use vermap_core::coordinates::ResolvedCoordinates;
use vermap_core::manifest::{PublishManifest, VariantSpec};
use vermap_resolver::publication::ManifestPublications;
use vermap_resolver::snapshot;
use vermap_resolver::transform::{DeclaredVersionTransformer, IdentityTransformer, QualifierTransformer};
use vermap_resolver::variant::{VariantDependencyResolver, VersionMappingResolver};
use vermap_resolver::warnings::{PublicationWarnings, WarningCollector};
use vermap_util::errors::VermapError;

/// Options for `vermap resolve`.
#[derive(Default)]
pub struct ResolveOptions {
    /// Print the report as JSON instead of text.
    pub json: bool,
}

/// One declared entry and what it publishes as.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedEntry {
    pub declared: String,
    pub resolved: ResolvedCoordinates,
}

/// Resolution result of one published variant.
#[derive(Debug, Clone, Serialize)]
pub struct VariantResolution {
    pub variant: String,
    pub dependencies: Vec<ResolvedEntry>,
    pub constraints: Vec<ResolvedEntry>,
    #[serde(skip)]
    pub warnings: WarningCollector,
}

/// The output of a resolution pass, variants in declaration order.
#[derive(Debug, Default)]
pub struct ResolutionReport {
    pub variants: Vec<VariantResolution>,
    pub warnings: PublicationWarnings,
}

/// Build the resolver described by a manifest, loading its snapshot when
/// version mapping is enabled.
pub fn build_resolver(
    manifest: &PublishManifest,
    manifest_dir: &Path,
) -> miette::Result<VersionMappingResolver> {
    let graph = match manifest.snapshot_path(manifest_dir) {
        Some(path) => Some(Arc::new(snapshot::load(&path)?)),
        None => {
            tracing::debug!("version mapping disabled; publishing declared coordinates");
            None
        }
    };
    let transformer: Arc<dyn DeclaredVersionTransformer> = match manifest.unmapped_qualifier() {
        Some(qualifier) => Arc::new(QualifierTransformer::new(qualifier)),
        None => Arc::new(IdentityTransformer),
    };
    Ok(VersionMappingResolver::new(
        Arc::new(ManifestPublications::from_manifest(manifest)),
        graph,
        transformer,
    ))
}

/// Resolve one variant. Warnings stay with the variant.
pub fn resolve_variant(resolver: &VersionMappingResolver, spec: &VariantSpec) -> VariantResolution {
    let mut warnings = WarningCollector::new();
    let dependencies = spec
        .dependencies
        .iter()
        .map(|dep| ResolvedEntry {
            declared: dep.to_string(),
            resolved: resolver.resolve_variant_coordinates(dep, &mut warnings),
        })
        .collect();
    let constraints = spec
        .constraints
        .iter()
        .map(|c| ResolvedEntry {
            declared: c.to_string(),
            resolved: resolver.resolve_constraint_variant_coordinates(c, &mut warnings),
        })
        .collect();
    VariantResolution {
        variant: spec.name.clone(),
        dependencies,
        constraints,
        warnings,
    }
}

/// Resolve every variant on its own blocking worker.
pub async fn resolve_variants(
    resolver: VersionMappingResolver,
    variants: Vec<VariantSpec>,
) -> miette::Result<ResolutionReport> {
    let mut join_set = JoinSet::new();
    for (position, spec) in variants.into_iter().enumerate() {
        let resolver = resolver.clone();
        join_set.spawn_blocking(move || (position, resolve_variant(&resolver, &spec)));
    }

    let mut resolved = Vec::with_capacity(join_set.len());
    while let Some(result) = join_set.join_next().await {
        let (position, variant) = result.map_err(|e| VermapError::Generic {
            message: format!("Variant resolution worker failed: {e}"),
        })?;
        resolved.push((position, variant));
    }
    resolved.sort_by_key(|(position, _)| *position);

    let mut report = ResolutionReport::default();
    for (_, variant) in resolved {
        report
            .warnings
            .add(variant.variant.clone(), variant.warnings.clone());
        report.variants.push(variant);
    }
    Ok(report)
}

/// Plain-text rendering: one line per entry, grouped by variant.
pub fn render_text(report: &ResolutionReport) -> String {
    let mut output = String::new();
    for variant in &report.variants {
        output.push_str(&format!("{}\n", variant.variant));
        for entry in &variant.dependencies {
            output.push_str(&format!("  {} -> {}\n", entry.declared, entry.resolved));
        }
        for entry in &variant.constraints {
            output.push_str(&format!("  (constraint) {} -> {}\n", entry.declared, entry.resolved));
        }
    }
    output
}

pub fn render_json(report: &ResolutionReport) -> miette::Result<String> {
    serde_json::to_string_pretty(&report.variants).map_err(|e| {
        VermapError::Generic {
            message: format!("Failed to serialize resolution report: {e}"),
        }
        .into()
    })
}

/// Resolve and print all variants of the manifest at `manifest_path`.
///
/// Warnings are printed after all coordinates.
pub async fn resolve(manifest_path: &Path, opts: &ResolveOptions) -> miette::Result<()> {
    let manifest = PublishManifest::from_path(manifest_path)?;
    let resolver = build_resolver(&manifest, crate::manifest_dir(manifest_path))?;
    let report = resolve_variants(resolver, manifest.variants).await?;

    if opts.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    if !report.warnings.is_empty() {
        tracing::warn!("{} unsupported declaration features", report.warnings.len());
        eprint!("{}", report.warnings);
    }
    Ok(())
}
