//! Graph transformation passes.

mod op_split;

pub use op_split::{OpSplitPass, DEFAULT_SPLIT_THRESHOLD};
