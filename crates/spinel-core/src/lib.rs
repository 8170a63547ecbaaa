//! Core intermediate representation and rewrite machinery for Spinel.
//!
//! This crate provides the foundational abstractions the optimizer passes
//! build on:
//! - Graph-based IR (`IrGraph`, `IrNode`, `IrEdge`) over typed rank-4 tensors
//! - Operation kinds and typed parameter views (`ops`)
//! - `Pass` trait for pipeline stages
//! - Greedy pattern-driven rewriting to fixed point (`rewrite`)

pub mod ir;
pub mod ops;
pub mod pass;
pub mod rewrite;
pub mod types;

// Re-export commonly used types
pub use ir::{EdgeData, IrEdge, IrEdgeId, IrGraph, IrNode, IrNodeId};
pub use pass::{Pass, Stage};
pub use rewrite::{apply_patterns_greedily, RewritePattern};
pub use types::{AttributeValue, DataType, TensorData, TensorShape, TensorValue};

/// Result type using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for spinel-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid graph structure: {0}")]
    InvalidGraph(String),

    #[error("Rewrite did not terminate: {0}")]
    RewriteLoop(String),
}
