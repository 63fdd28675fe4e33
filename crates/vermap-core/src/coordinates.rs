use std::fmt;

use serde::{Deserialize, Serialize};

/// The `(group, artifact, version)` triple written into publication metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResolvedCoordinates {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ResolvedCoordinates {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Parse `"group:artifact:version"` into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version] if !group.is_empty() && !artifact.is_empty() => {
                Some(Self::new(*group, *artifact, *version))
            }
            _ => None,
        }
    }

    /// `group:artifact` identifier (without version).
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// Exact match on group and artifact; the version is ignored.
    pub fn is_module(&self, group: &str, artifact: &str) -> bool {
        self.group == group && self.artifact == artifact
    }
}

impl fmt::Display for ResolvedCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty_group() {
        assert!(ResolvedCoordinates::parse(":lib:1.0").is_none());
    }

    #[test]
    fn parse_allows_empty_version() {
        let c = ResolvedCoordinates::parse("com.acme:lib:").unwrap();
        assert_eq!(c.version, "");
    }

    #[test]
    fn is_module_ignores_version() {
        let c = ResolvedCoordinates::new("com.acme", "lib", "2.3.1");
        assert!(c.is_module("com.acme", "lib"));
        assert!(!c.is_module("com.acme", "lib-extra"));
        assert!(!c.is_module("com.Acme", "lib"));
    }
}
