//! Core data types for unitforge.
//!
//! This crate defines the pure data model of the dependency and composition
//! resolver: semantic versions and constraints, capability units and their
//! include references, and the lock file with its generate and verify
//! operations.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod lockfile;
pub mod unit;
pub mod verify;
pub mod version;
