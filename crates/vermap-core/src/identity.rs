//! Identity paths naming build units inside a multi-unit project.
//!
//! A path is `:` for the root unit or a sequence of `:segment` parts, e.g.
//! `:libs:util`. It names a unit structurally and is unrelated to the
//! coordinates the unit publishes under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SEPARATOR: char = ':';

/// Structural path of a build unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityPath {
    segments: Vec<String>,
}

/// Returned when a string is not a well-formed identity path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identity path '{0}': expected ':' or ':segment[:segment...]'")]
pub struct InvalidIdentityPath(pub String);

impl IdentityPath {
    /// The root unit, `:`.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, or `None` for the root path.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Whether `s` is written in identity path syntax (leading `:`).
    pub fn looks_like(s: &str) -> bool {
        s.starts_with(SEPARATOR)
    }
}

impl FromStr for IdentityPath {
    type Err = InvalidIdentityPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ":" {
            return Ok(Self::root());
        }
        let Some(rest) = s.strip_prefix(SEPARATOR) else {
            return Err(InvalidIdentityPath(s.to_string()));
        };
        let segments: Vec<String> = rest.split(SEPARATOR).map(str::to_string).collect();
        if segments.iter().any(|seg| seg.is_empty() || seg.trim() != seg) {
            return Err(InvalidIdentityPath(s.to_string()));
        }
        Ok(Self { segments })
    }
}

impl TryFrom<String> for IdentityPath {
    type Error = InvalidIdentityPath;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IdentityPath> for String {
    fn from(value: IdentityPath) -> Self {
        value.to_string()
    }
}

impl fmt::Display for IdentityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "{SEPARATOR}");
        }
        for seg in &self.segments {
            write!(f, "{SEPARATOR}{seg}")?;
        }
        Ok(())
    }
}
