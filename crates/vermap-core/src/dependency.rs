use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::IdentityPath;

/// Attribute constraints attached to a declaration, keyed by attribute name.
pub type Attributes = BTreeMap<String, String>;

/// Requested capabilities in `group:name[:version]` notation.
pub type Capabilities = BTreeSet<String>;

/// A dependency declared by a build unit.
///
/// In `Publish.toml` a module reference is written as
/// `{ group = "...", artifact = "...", version = "..." }` and a project
/// reference as `{ project = ":path" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclaredDependency {
    Project(ProjectReference),
    Module(ModuleReference),
}

/// A version constraint declared by a build unit. Constraints never carry
/// requested capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyConstraint {
    Project(ProjectReference),
    Module(ModuleConstraint),
}

/// A reference to an external module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleReference {
    pub group: String,
    pub artifact: String,
    /// Declared version constraint; empty when the version is managed elsewhere.
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub capabilities: Capabilities,
}

/// A reference to a sibling build unit of the same project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectReference {
    #[serde(rename = "project")]
    pub identity_path: IdentityPath,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

/// A constraint on an external module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConstraint {
    pub group: String,
    pub artifact: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

impl ModuleReference {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            attributes: Attributes::new(),
            capabilities: Capabilities::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }
}

impl ProjectReference {
    pub fn new(identity_path: IdentityPath) -> Self {
        Self {
            identity_path,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl ModuleConstraint {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl DeclaredDependency {
    pub fn attributes(&self) -> &Attributes {
        match self {
            Self::Project(p) => &p.attributes,
            Self::Module(m) => &m.attributes,
        }
    }
}

impl DependencyConstraint {
    pub fn attributes(&self) -> &Attributes {
        match self {
            Self::Project(p) => &p.attributes,
            Self::Module(m) => &m.attributes,
        }
    }
}

impl From<ModuleReference> for DeclaredDependency {
    fn from(value: ModuleReference) -> Self {
        Self::Module(value)
    }
}

impl From<ProjectReference> for DeclaredDependency {
    fn from(value: ProjectReference) -> Self {
        Self::Project(value)
    }
}

impl From<ModuleConstraint> for DependencyConstraint {
    fn from(value: ModuleConstraint) -> Self {
        Self::Module(value)
    }
}

impl From<ProjectReference> for DependencyConstraint {
    fn from(value: ProjectReference) -> Self {
        Self::Project(value)
    }
}

impl fmt::Display for DeclaredDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(p) => write!(f, "project {}", p.identity_path),
            Self::Module(m) => write!(f, "{}:{}:{}", m.group, m.artifact, m.version),
        }
    }
}

impl fmt::Display for DependencyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(p) => write!(f, "project {}", p.identity_path),
            Self::Module(m) => write!(f, "{}:{}:{}", m.group, m.artifact, m.version),
        }
    }
}
