//! Operation kinds and typed parameter views.
//!
//! Nodes carry their kind as a string (mirroring the flatbuffer operator
//! names the graphs originate from) and their parameters as attributes.
//! This module names the kinds and attribute keys the optimizer relies on
//! and provides a typed view over a convolution's geometry.

use crate::ir::{IrGraph, IrNode};
use crate::Result;

/// 2D convolution. Inputs: `[input, filter, bias]`; one output.
/// Filter edge shape is `[out_depth, filter_h, filter_w, in_depth]`.
pub const CONV_2D: &str = "Conv2D";

/// Contiguous sub-region extraction. Inputs: `[input, begin, end, strides]`
/// where begin/end/strides are rank-1 i32 tensors of length 4; one output.
pub const STRIDED_SLICE: &str = "StridedSlice";

/// Concatenation of several tensors along one axis. One output.
pub const CONCATENATION: &str = "Concatenation";

// Attribute keys.
pub const ATTR_PADDING: &str = "padding";
pub const ATTR_STRIDE_H: &str = "stride_h";
pub const ATTR_STRIDE_W: &str = "stride_w";
pub const ATTR_AXIS: &str = "axis";
pub const ATTR_FUSED_ACTIVATION: &str = "fused_activation_function";

/// Axis-mask attribute keys on `StridedSlice` nodes, all zero for slices
/// created by the optimizer and carried through verbatim when a slice is
/// rebuilt.
pub const SLICE_MASK_KEYS: [&str; 5] = [
    "begin_mask",
    "end_mask",
    "ellipsis_mask",
    "new_axis_mask",
    "shrink_axis_mask",
];

/// Padding mode with no implicit input padding.
pub const PADDING_VALID: &str = "VALID";

/// Concatenation with no fused activation.
pub const ACTIVATION_NONE: &str = "NONE";

/// Typed view of a `Conv2D` node's geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvParams {
    /// Padding mode string (e.g., "VALID", "SAME").
    pub padding: String,
    /// Vertical stride.
    pub stride_h: usize,
    /// Horizontal stride.
    pub stride_w: usize,
    /// Filter height (dimension 1 of the filter edge).
    pub filter_h: usize,
    /// Filter width (dimension 2 of the filter edge).
    pub filter_w: usize,
}

impl ConvParams {
    /// Read a convolution's parameters from its attributes and filter edge.
    ///
    /// Returns `Ok(None)` when the node lacks the expected attributes or a
    /// static filter shape; callers treat that as a declined match, not an
    /// error. Errors only on dangling edge references.
    pub fn read(graph: &IrGraph, node: &IrNode) -> Result<Option<ConvParams>> {
        let (Some(padding), Some(stride_h), Some(stride_w)) = (
            node.attr_str(ATTR_PADDING),
            node.attr_i64(ATTR_STRIDE_H),
            node.attr_i64(ATTR_STRIDE_W),
        ) else {
            return Ok(None);
        };
        if stride_h < 1 || stride_w < 1 || node.inputs.len() < 2 {
            return Ok(None);
        }

        let filter = graph.edge(node.inputs[1])?;
        let Some(filter_dims) = filter.static_dims() else {
            return Ok(None);
        };
        if filter_dims.len() != 4 {
            return Ok(None);
        }

        Ok(Some(ConvParams {
            padding: padding.to_string(),
            stride_h: stride_h as usize,
            stride_w: stride_w as usize,
            filter_h: filter_dims[1],
            filter_w: filter_dims[2],
        }))
    }

    /// Whether the filter is square.
    pub fn has_square_filter(&self) -> bool {
        self.filter_h == self.filter_w
    }

    /// Whether this convolution uses valid padding.
    pub fn is_valid_padding(&self) -> bool {
        self.padding == PADDING_VALID
    }
}
