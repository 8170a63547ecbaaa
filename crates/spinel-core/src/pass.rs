//! Optimization pass trait and stage definitions.

use crate::ir::IrGraph;
use crate::Result;

/// Compilation stage for organizing passes.
///
/// Passes are grouped into stages and run in a fixed order. Within each stage,
/// passes run in the order they were registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Shape inference (propagate shapes through the graph).
    Inference,

    /// Constant folding (evaluate operations at compile time).
    Folding,

    /// Graph rewriting and optimization (splitting, dead code elimination).
    Optimization,

    /// Code generation (lower the remaining graph for execution).
    Lowering,
}

/// Trait for implementing compiler passes.
///
/// A pass is a graph transformation that runs during a specific compilation
/// stage, scoped to one graph unit per invocation.
///
/// # Return Value
///
/// The `run()` method returns `Ok(true)` if the pass made changes to the
/// graph, or `Ok(false)` if no changes were made. A run with zero matches is
/// a legal no-op, not an error.
pub trait Pass: Send + Sync {
    /// Get the pass name (used for logging and debugging).
    fn name(&self) -> &str;

    /// Get the compilation stage this pass belongs to.
    fn stage(&self) -> Stage;

    /// Run the pass on the given graph.
    fn run(&self, graph: &mut IrGraph) -> Result<bool>;
}
