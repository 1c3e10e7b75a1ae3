//! Include graph traversal and deterministic content merging.
//!
//! Traversal is a depth-first walk of the include graph in declared include
//! order. Merge order is post-order of first visit: every include lands
//! before the unit that declared it, a unit reached along several paths
//! lands exactly once, and the root always lands last.

use std::collections::HashSet;

use unitforge_core::unit::Unit;

use crate::catalogue::Catalogue;
use crate::error::ResolveError;
use crate::graph::{CompositionGraph, UnitKey};
use crate::resolver::resolve_version;

/// The merged output of a composition.
#[derive(Debug)]
pub struct ComposedArtifact {
    pub root: UnitKey,
    /// Every unit in the closure, in merge order (root last).
    pub units: Vec<Unit>,
    /// The merged content document.
    pub content: String,
}

/// Traversal bookkeeping: the active DFS path plus everything already
/// merged.
struct ComposeContext {
    in_progress: Vec<UnitKey>,
    visited: HashSet<UnitKey>,
}

impl ComposeContext {
    fn new() -> Self {
        Self {
            in_progress: Vec::new(),
            visited: HashSet::new(),
        }
    }

    fn begin(&mut self, key: UnitKey) {
        self.in_progress.push(key);
    }

    fn finish(&mut self, key: &UnitKey) {
        self.in_progress.pop();
        self.visited.insert(key.clone());
    }

    fn on_stack(&self, key: &UnitKey) -> bool {
        self.in_progress.contains(key)
    }

    /// The cycle as unit names, from the first occurrence of `repeat` on the
    /// active path back around to it: `a -> b -> a`.
    fn cycle_path(&self, repeat: &UnitKey) -> Vec<String> {
        let start = self
            .in_progress
            .iter()
            .position(|k| k == repeat)
            .unwrap_or(0);
        let mut path: Vec<String> = self.in_progress[start..]
            .iter()
            .map(|k| k.name.clone())
            .collect();
        path.push(repeat.name.clone());
        path
    }

    /// The active include chain as `name@version` keys, for error context.
    fn chain(&self) -> Vec<String> {
        self.in_progress.iter().map(UnitKey::to_string).collect()
    }
}

struct Frame {
    key: UnitKey,
    idx: petgraph::graph::NodeIndex,
    unit: Unit,
    next: usize,
}

/// Walk the include graph below `root`, resolving every reference against
/// the catalogue. Returns the graph and the closure in merge order.
pub async fn traverse(
    catalogue: &dyn Catalogue,
    root: &Unit,
) -> Result<(CompositionGraph, Vec<Unit>), ResolveError> {
    let mut graph = CompositionGraph::new();
    let root_key = UnitKey::of(root);
    let root_idx = graph.add_node(root_key.clone());
    graph.set_root(root_idx);

    let mut ctx = ComposeContext::new();
    let mut order: Vec<Unit> = Vec::new();
    let mut stack = vec![Frame {
        key: root_key.clone(),
        idx: root_idx,
        unit: root.clone(),
        next: 0,
    }];
    ctx.begin(root_key);

    while let Some(frame) = stack.last_mut() {
        if frame.next >= frame.unit.includes.len() {
            let frame = match stack.pop() {
                Some(f) => f,
                None => break,
            };
            ctx.finish(&frame.key);
            order.push(frame.unit);
            continue;
        }

        let reference = frame.unit.includes[frame.next].clone();
        frame.next += 1;
        let parent_idx = frame.idx;

        let version = resolve_version(catalogue, &reference)
            .await
            .map_err(|e| e.within(ctx.chain()))?;
        let child_key = UnitKey {
            name: reference.name.clone(),
            version: version.to_string(),
        };

        if ctx.on_stack(&child_key) {
            return Err(ResolveError::CircularDependency {
                cycle: ctx.cycle_path(&child_key),
            });
        }

        let child_idx = graph.add_node(child_key.clone());
        graph.add_edge(parent_idx, child_idx);

        if ctx.visited.contains(&child_key) {
            continue;
        }

        let child = catalogue
            .fetch(&reference.name, &version)
            .await
            .map_err(|e| ResolveError::from(e).within(ctx.chain()))?;
        ctx.begin(child_key.clone());
        stack.push(Frame {
            key: child_key,
            idx: child_idx,
            unit: child,
            next: 0,
        });
    }

    tracing::debug!(
        root = %graph.node(root_idx),
        units = order.len(),
        "include traversal complete"
    );
    Ok((graph, order))
}

/// Compose a unit: traverse its include graph and merge the closure into a
/// single document. The same root against the same catalogue always yields
/// byte-identical output.
pub async fn compose(catalogue: &dyn Catalogue, root: &Unit) -> Result<ComposedArtifact, ResolveError> {
    let (graph, units) = traverse(catalogue, root).await?;
    let root_key = match graph.root {
        Some(idx) => graph.node(idx).clone(),
        None => UnitKey::of(root),
    };

    let sections: Vec<String> = units
        .iter()
        .map(|u| format!("## {}\n\n{}\n", u.key(), u.content.trim_end()))
        .collect();
    let content = sections.join("\n---\n\n");

    Ok(ComposedArtifact {
        root: root_key,
        units,
        content,
    })
}

/// Render the include tree of a unit without merging content.
pub async fn include_tree(catalogue: &dyn Catalogue, root: &Unit) -> Result<String, ResolveError> {
    let (graph, _) = traverse(catalogue, root).await?;
    Ok(graph.print_tree())
}
