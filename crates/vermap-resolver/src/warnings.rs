//! Unsupported-feature notices collected during a publication pass.

use std::fmt;

/// Append-only warnings for one published variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningCollector {
    unsupported: Vec<String>,
}

impl WarningCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration feature that cannot be represented.
    pub fn add_unsupported(&mut self, message: impl Into<String>) {
        self.unsupported.push(message.into());
    }

    pub fn unsupported(&self) -> &[String] {
        &self.unsupported
    }

    pub fn is_empty(&self) -> bool {
        self.unsupported.is_empty()
    }

    pub fn len(&self) -> usize {
        self.unsupported.len()
    }
}

/// Warnings of a whole pass, per variant in the order variants were added.
#[derive(Debug, Clone, Default)]
pub struct PublicationWarnings {
    variants: Vec<(String, WarningCollector)>,
}

impl PublicationWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `collector` under `variant`; empty collectors are dropped.
    pub fn add(&mut self, variant: impl Into<String>, collector: WarningCollector) {
        if !collector.is_empty() {
            self.variants.push((variant.into(), collector));
        }
    }

    pub fn variants(&self) -> impl Iterator<Item = (&str, &WarningCollector)> {
        self.variants.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Total number of warnings across variants.
    pub fn len(&self) -> usize {
        self.variants.iter().map(|(_, c)| c.len()).sum()
    }
}

impl fmt::Display for PublicationWarnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variants.is_empty() {
            return write!(f, "No publication warnings.");
        }
        writeln!(f, "Publication warnings ({}):", self.len())?;
        for (variant, collector) in &self.variants {
            writeln!(f, "  Variant {variant}:")?;
            for message in collector.unsupported() {
                writeln!(f, "    - {message}")?;
            }
        }
        Ok(())
    }
}
