//! Shared utilities for vermap.
//!
//! This crate provides the cross-cutting concerns used by the other vermap
//! crates: the unified error type and small filesystem helpers.

pub mod errors;
pub mod fs;
