//! Resolution engine: picks concrete versions for constraints, walks include
//! graphs with cycle detection, and merges unit content deterministically.

pub mod catalogue;
pub mod compose;
pub mod error;
pub mod graph;
pub mod resolver;
