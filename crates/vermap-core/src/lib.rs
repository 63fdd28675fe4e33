//! Core data types for vermap.
//!
//! This crate defines the values the publication resolver works with:
//! published coordinates, build-unit identity paths, declared dependencies
//! and constraints, and the `Publish.toml` manifest that describes a
//! multi-unit project's publications.
//!
//! This crate is intentionally free of async code and network I/O.

/// File name of the publication manifest.
pub const MANIFEST_FILE: &str = "Publish.toml";

pub mod coordinates;
pub mod dependency;
pub mod identity;
pub mod manifest;
