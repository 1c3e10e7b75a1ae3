//! Composition graph construction and tree rendering.

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use unitforge_core::unit::Unit;

/// A node in the composition graph: one concrete unit version.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct UnitKey {
    pub name: String,
    pub version: String,
}

impl UnitKey {
    pub fn of(unit: &Unit) -> Self {
        Self {
            name: unit.name.clone(),
            version: unit.version.to_string(),
        }
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// The include graph of a composition, backed by petgraph. One node per
/// concrete unit version, deduplicated.
pub struct CompositionGraph {
    graph: DiGraph<UnitKey, ()>,
    index: HashMap<String, NodeIndex>,
    pub root: Option<NodeIndex>,
}

impl Default for CompositionGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            root: None,
        }
    }

    /// Add or retrieve a node. An existing `name@version` returns its index.
    pub fn add_node(&mut self, key: UnitKey) -> NodeIndex {
        let text = key.to_string();
        if let Some(&idx) = self.index.get(&text) {
            return idx;
        }
        let idx = self.graph.add_node(key);
        self.index.insert(text, idx);
        idx
    }

    /// Set the root node (the unit being composed).
    pub fn set_root(&mut self, idx: NodeIndex) {
        self.root = Some(idx);
    }

    /// Add an include edge. Duplicate edges collapse to one.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Look up a node by its `name@version` key.
    pub fn find(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &UnitKey {
        &self.graph[idx]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Direct includes of a node, in insertion order.
    pub fn includes_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut targets: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect();
        // petgraph iterates outgoing edges newest-first; restore insertion order
        targets.reverse();
        targets
    }

    /// Render the include tree rooted at the composition root. A unit
    /// already printed on the current path is shown once and not expanded
    /// again.
    pub fn print_tree(&self) -> String {
        let mut output = String::new();
        let root = match self.root {
            Some(r) => r,
            None => return output,
        };

        output.push_str(&format!("{}\n", self.graph[root]));

        let mut visited = HashSet::new();
        visited.insert(root);

        let children = self.includes_of(root);
        let count = children.len();
        for (i, child) in children.iter().enumerate() {
            let is_last = i == count - 1;
            self.print_subtree(&mut output, *child, "", is_last, &mut visited);
        }
        output
    }

    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{prefix}{connector}{}\n", self.graph[idx]));

        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let children = self.includes_of(idx);
        let count = children.len();
        for (i, child) in children.iter().enumerate() {
            let is_last = i == count - 1;
            self.print_subtree(output, *child, &child_prefix, is_last, visited);
        }

        visited.remove(&idx);
    }
}
