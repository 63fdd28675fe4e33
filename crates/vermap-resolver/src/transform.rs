//! Fallback policy for declared versions that no mapping covers.

/// Computes the published version of a module dependency when the
/// resolution graph has no entry for it.
pub trait DeclaredVersionTransformer: Send + Sync {
    fn transform(&self, group: &str, artifact: &str, declared_version: &str) -> String;
}

impl<F> DeclaredVersionTransformer for F
where
    F: Fn(&str, &str, &str) -> String + Send + Sync,
{
    fn transform(&self, group: &str, artifact: &str, declared_version: &str) -> String {
        self(group, artifact, declared_version)
    }
}

/// Publishes the declared version unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl DeclaredVersionTransformer for IdentityTransformer {
    fn transform(&self, _group: &str, _artifact: &str, declared_version: &str) -> String {
        declared_version.to_string()
    }
}

/// Appends `-{qualifier}` to non-empty declared versions.
#[derive(Debug, Clone)]
pub struct QualifierTransformer {
    qualifier: String,
}

impl QualifierTransformer {
    pub fn new(qualifier: impl Into<String>) -> Self {
        Self {
            qualifier: qualifier.into(),
        }
    }
}

impl DeclaredVersionTransformer for QualifierTransformer {
    fn transform(&self, _group: &str, _artifact: &str, declared_version: &str) -> String {
        if declared_version.is_empty() {
            return String::new();
        }
        format!("{declared_version}-{}", self.qualifier)
    }
}
