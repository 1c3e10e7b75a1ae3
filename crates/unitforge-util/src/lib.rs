//! Shared utilities for the unitforge tool: the unified error type,
//! SHA-256 hashing, filesystem helpers, and Cargo-style status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
