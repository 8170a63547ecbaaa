//! Graph optimization pipeline for quantized inference models.
//!
//! This crate hosts the transformation passes that rewrite a
//! [`spinel_core::IrGraph`] before lowering, and the pipeline that runs them
//! in stage order. The flagship pass is [`OpSplitPass`], which bounds the
//! output working set of oversized quantized convolutions by splitting them
//! into balanced width-partitions.
//!
//! # Example
//!
//! ```no_run
//! use spinel_compiler::CompilerPipeline;
//! use spinel_core::IrGraph;
//!
//! let mut graph = IrGraph::new();
//! // ... populate the graph ...
//! let mut pipeline = CompilerPipeline::new();
//! let changed = pipeline.optimize(&mut graph).unwrap();
//! ```

pub mod geometry;
pub mod passes;

pub use passes::{OpSplitPass, DEFAULT_SPLIT_THRESHOLD};

use spinel_core::{IrGraph, Pass, Result};

/// Compiler pipeline with pluggable passes.
///
/// Passes run in fixed stages: Inference → Folding → Optimization →
/// Lowering. Built-in passes are registered in their respective stages, and
/// custom passes can be added via `add_pass()`. Within a stage, passes run
/// in registration order.
pub struct CompilerPipeline {
    /// All passes to run, ordered by (stage, registration order).
    passes: Vec<Box<dyn Pass>>,
}

impl CompilerPipeline {
    /// Create a pipeline with the built-in passes.
    ///
    /// The only built-in pass today is `OpSplitPass` (Optimization stage)
    /// with the default split threshold. Custom passes can be added via
    /// `add_pass()`.
    pub fn new() -> Self {
        let mut pipeline = Self::empty();
        pipeline.add_pass(OpSplitPass::new());
        pipeline
    }

    /// Create a pipeline with no passes registered.
    pub fn empty() -> Self {
        Self { passes: Vec::new() }
    }

    /// Add a custom pass to the pipeline.
    ///
    /// The pass will run in the stage determined by `pass.stage()`. Within a
    /// stage, passes run in the order they were registered.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Run all passes in stage order.
    ///
    /// Returns `Ok(true)` if any pass changed the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if any pass fails.
    #[tracing::instrument(skip_all, fields(num_nodes = graph.node_count(), num_edges = graph.edge_count()))]
    pub fn optimize(&mut self, graph: &mut IrGraph) -> Result<bool> {
        self.passes.sort_by_key(|p| p.stage());

        let mut changed = false;
        for pass in &self.passes {
            let _span =
                tracing::debug_span!("pass", name = pass.name(), stage = ?pass.stage()).entered();
            changed |= pass.run(graph)?;
        }
        Ok(changed)
    }
}

impl Default for CompilerPipeline {
    fn default() -> Self {
        Self::new()
    }
}
