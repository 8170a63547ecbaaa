//! Greedy pattern-driven graph rewriting.
//!
//! A `RewritePattern` inspects one candidate node and either rewrites the
//! graph around it or declines. `apply_patterns_greedily` scans all nodes
//! repeatedly until a full sweep produces no rewrite, then the graph has
//! reached a fixed point for the given pattern set.
//!
//! Termination relies on patterns labeling the nodes they create so they
//! never match their own output. A runaway pattern set is caught by an
//! iteration cap rather than looping forever.

use crate::ir::{IrGraph, IrNodeId};
use crate::{Error, Result};

/// A single match-and-rewrite rule.
///
/// Rules mutate the graph in place on a successful match: splice in
/// replacement nodes, redirect consumers with
/// [`IrGraph::replace_all_uses`], and remove the nodes they replaced.
pub trait RewritePattern {
    /// Pattern name, for logging.
    fn name(&self) -> &str;

    /// Attempt to match and rewrite at `node`.
    ///
    /// Returns `Ok(true)` if the graph was rewritten, `Ok(false)` if the
    /// pattern declined. Unmet preconditions are declines, never errors;
    /// errors are reserved for malformed graphs (dangling references).
    fn match_and_rewrite(&self, graph: &mut IrGraph, node: IrNodeId) -> Result<bool>;
}

/// Sweep limit. A pattern set that has not stabilized after this many full
/// scans is rewriting its own output.
const MAX_SWEEPS: usize = 1000;

/// Apply a set of rewrite patterns until the graph reaches a fixed point.
///
/// Each sweep visits every node in topological order and offers it to every
/// pattern. Dead nodes left behind by rewrites are erased after each sweep so
/// later sweeps never match disconnected operations. Returns whether any
/// rewrite was applied.
pub fn apply_patterns_greedily(
    graph: &mut IrGraph,
    patterns: &[&dyn RewritePattern],
) -> Result<bool> {
    let mut changed_any = false;

    for _sweep in 0..MAX_SWEEPS {
        let mut changed_this_sweep = false;

        // Snapshot the node set: rewrites add and remove nodes mid-sweep.
        let candidates = graph.topological_order();
        for node_id in candidates {
            if !graph.contains_node(node_id) {
                continue;
            }
            for pattern in patterns {
                if pattern.match_and_rewrite(graph, node_id)? {
                    tracing::trace!(pattern = pattern.name(), ?node_id, "applied rewrite");
                    changed_this_sweep = true;
                    break;
                }
            }
        }

        graph.erase_dead_nodes()?;

        if !changed_this_sweep {
            return Ok(changed_any);
        }
        changed_any = true;
    }

    Err(Error::RewriteLoop(format!(
        "rewrite did not reach a fixed point after {} sweeps",
        MAX_SWEEPS
    )))
}
