//! Publication coordinate resolution.
//!
//! Given a dependency declared by one build unit, determines the
//! `(group, artifact, version)` that belongs in the generated publication
//! metadata. Lookups run against an already-resolved dependency graph
//! snapshot, with a fallback through the graph's edges when the requested
//! module was substituted away, and re-resolve through the project
//! publication identities when a request landed on a sibling build unit.

pub mod graph;
pub mod mapping;
pub mod publication;
pub mod snapshot;
pub mod transform;
pub mod variant;
pub mod warnings;
