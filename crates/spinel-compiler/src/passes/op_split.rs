//! Convolution output splitting.
//!
//! Splits an oversized quantized convolution into balanced width-partitions
//! to bound the working set of any single operation, in two fixed-point
//! phases:
//!
//! 1. **Split**: conv is replaced by conv → N strided slices → concat, where
//!    each slice selects one contiguous width range of the output.
//! 2. **Hoist**: each slice is raised above the convolution; the convolution
//!    is re-instantiated per partition over only the input region that
//!    partition's output depends on.
//!
//! Phase 2 only runs after phase 1 has stabilized, since it keys off the
//! slices phase 1 creates. Labels on created nodes keep both phases from
//! rematching their own output, which is what makes each fixed point
//! terminate.

use spinel_core::ir::{IrEdge, IrGraph, IrNode, IrNodeId};
use spinel_core::ops::{self, ConvParams};
use spinel_core::types::{AttributeValue, DataType, TensorShape, TensorValue};
use spinel_core::{apply_patterns_greedily, Pass, Result, RewritePattern, Stage};

use crate::geometry;

/// Marks convolutions that have been split and the slices created for them.
const OP_SPLIT_LABEL: &str = "op_split";

/// Marks slices that have already been raised above their convolution.
const HOISTED_LABEL: &str = "hoisted";

/// Default per-partition output size, in elements. Sized for a ~96 KiB
/// working set per partition; workloads with tighter memory budgets should
/// pass their own threshold.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 98304;

fn is_signed_quant8(dtype: DataType) -> bool {
    dtype.is_quantized() && dtype.is_signed() && dtype.storage_bits() == 8
}

fn const_i32_edge(graph: &mut IrGraph, name: String, values: Vec<i32>) -> spinel_core::IrEdgeId {
    graph.add_edge(IrEdge::with_constant(name, TensorValue::vec_i32(values)))
}

// ───────────────────────────── Split rule ────────────────────────────────

/// Rewrites one oversized quantized convolution into
/// conv → slices → concat along the output width.
struct SplitConvPattern {
    /// Per-partition output size threshold, in elements.
    threshold: usize,
}

impl RewritePattern for SplitConvPattern {
    fn name(&self) -> &str {
        "split-conv"
    }

    fn match_and_rewrite(&self, graph: &mut IrGraph, node_id: IrNodeId) -> Result<bool> {
        let conv = graph.node(node_id)?.clone();
        if conv.op_type() != ops::CONV_2D || conv.has_attribute(OP_SPLIT_LABEL) {
            return Ok(false);
        }
        if conv.inputs.is_empty() || conv.outputs.len() != 1 {
            return Ok(false);
        }

        let Some(params) = ConvParams::read(graph, &conv)? else {
            return Ok(false);
        };
        if !params.is_valid_padding() || !params.has_square_filter() {
            return Ok(false);
        }

        let input_dtype = graph.edge(conv.inputs[0])?.dtype;
        let output_id = conv.outputs[0];
        let output_edge = graph.edge(output_id)?;
        if !is_signed_quant8(input_dtype) || !is_signed_quant8(output_edge.dtype) {
            return Ok(false);
        }

        let Some(out_dims) = output_edge.static_dims() else {
            return Ok(false);
        };
        if out_dims.len() != 4 {
            return Ok(false);
        }
        let (out_h, out_w, out_d) = (out_dims[1], out_dims[2], out_dims[3]);

        // Splitting below twice the threshold saves nothing: one partition
        // would carry nearly the whole output.
        let output_size = out_h * out_w * out_d;
        if output_size < 2 * self.threshold {
            return Ok(false);
        }
        let count = geometry::partition_count(output_size, self.threshold);
        if count > out_w {
            // Too narrow to give every partition at least one column.
            return Ok(false);
        }

        let out_dtype = output_edge.dtype;
        let out_name = output_edge.name.clone();
        let out_shape = out_dims.to_vec();

        // The clone becomes the producer feeding the slices. Its label keeps
        // both rules away from it from now on.
        let mut conv_clone = conv.clone();
        conv_clone.set_attribute(OP_SPLIT_LABEL, AttributeValue::Unit);
        let clone_out = graph.add_edge(IrEdge::new(
            format!("{}_presplit", out_name),
            out_dtype,
            TensorShape::Static(out_shape.clone()),
        ));
        conv_clone.outputs = vec![clone_out];
        graph.add_node(conv_clone);

        // One unit-stride vector shared by every slice.
        let strides = const_i32_edge(
            graph,
            format!("{}_slice_strides", out_name),
            vec![1, 1, 1, 1],
        );

        let widths = geometry::partition_widths(out_w, count);
        let offsets = geometry::partition_offsets(&widths);

        let mut slice_outputs = Vec::with_capacity(count);
        for (i, &(start, end)) in offsets.iter().enumerate() {
            let begin = const_i32_edge(
                graph,
                format!("{}_slice{}_begin", out_name, i),
                vec![0, 0, start as i32, 0],
            );
            let end_edge = const_i32_edge(
                graph,
                format!("{}_slice{}_end", out_name, i),
                vec![1, out_h as i32, end as i32, out_d as i32],
            );
            let slice_out = graph.add_edge(IrEdge::new(
                format!("{}_slice{}", out_name, i),
                out_dtype,
                TensorShape::Static(vec![1, out_h, end - start, out_d]),
            ));

            let mut slice = IrNode::new(ops::STRIDED_SLICE.to_string());
            slice.add_input(clone_out);
            slice.add_input(begin);
            slice.add_input(end_edge);
            slice.add_input(strides);
            slice.add_output(slice_out);
            for key in ops::SLICE_MASK_KEYS {
                slice.set_attribute(key, AttributeValue::Int(0));
            }
            slice.set_attribute(OP_SPLIT_LABEL, AttributeValue::Unit);
            graph.add_node(slice);

            slice_outputs.push(slice_out);
        }

        // Concatenating the partitions in offset order along the width axis
        // reconstructs the original output exactly.
        let concat_out = graph.add_edge(IrEdge::new(
            format!("{}_recombined", out_name),
            out_dtype,
            TensorShape::Static(out_shape),
        ));
        let mut concat = IrNode::new(ops::CONCATENATION.to_string());
        for &slice_out in &slice_outputs {
            concat.add_input(slice_out);
        }
        concat.add_output(concat_out);
        concat.set_attribute(ops::ATTR_AXIS, AttributeValue::Int(2));
        concat.set_attribute(
            ops::ATTR_FUSED_ACTIVATION,
            AttributeValue::String(ops::ACTIVATION_NONE.to_string()),
        );
        graph.add_node(concat);

        graph.replace_all_uses(output_id, concat_out)?;
        graph.remove_node(node_id)?;

        tracing::debug!(
            output = %out_name,
            partitions = count,
            output_size,
            "split oversized convolution output"
        );
        Ok(true)
    }
}

// ───────────────────────────── Hoist rule ────────────────────────────────

/// Raises a split-created slice above its producing convolution: the slice
/// moves to the convolution's input, covering exactly the receptive field of
/// its partition, and the convolution is re-instantiated with that narrowed
/// input and output.
struct HoistSlicePattern;

impl RewritePattern for HoistSlicePattern {
    fn name(&self) -> &str {
        "hoist-slice"
    }

    fn match_and_rewrite(&self, graph: &mut IrGraph, node_id: IrNodeId) -> Result<bool> {
        let slice = graph.node(node_id)?.clone();
        if slice.op_type() != ops::STRIDED_SLICE {
            return Ok(false);
        }
        if !slice.has_attribute(OP_SPLIT_LABEL) || slice.has_attribute(HOISTED_LABEL) {
            return Ok(false);
        }
        if slice.inputs.len() != 4 || slice.outputs.len() != 1 {
            return Ok(false);
        }

        let Some(conv_id) = graph.edge_producer(slice.inputs[0]) else {
            return Ok(false);
        };
        let conv = graph.node(conv_id)?.clone();
        if conv.op_type() != ops::CONV_2D || conv.outputs.len() != 1 {
            return Ok(false);
        }
        let Some(params) = ConvParams::read(graph, &conv)? else {
            return Ok(false);
        };

        // The width end bound must be a compile-time constant.
        let end_edge = graph.edge(slice.inputs[2])?;
        let Some(end_values) = end_edge.constant_value().and_then(|v| v.as_i32()) else {
            return Ok(false);
        };
        if end_values.len() != 4 {
            return Ok(false);
        }
        let out_end = end_values[2] as usize;

        let slice_out_id = slice.outputs[0];
        let slice_out_edge = graph.edge(slice_out_id)?;
        let slice_name = slice_out_edge.name.clone();
        let Some(slice_dims) = slice_out_edge.static_dims() else {
            return Ok(false);
        };
        if slice_dims.len() != 4 {
            return Ok(false);
        }
        let partition_width = slice_dims[2];
        // Zero-width slices have no receptive field to hoist, and the region
        // arithmetic below assumes a positive extent.
        if partition_width == 0 || out_end < partition_width {
            return Ok(false);
        }

        let conv_in_edge = graph.edge(conv.inputs[0])?;
        let in_dtype = conv_in_edge.dtype;
        let Some(in_dims) = conv_in_edge.static_dims().map(<[usize]>::to_vec) else {
            return Ok(false);
        };
        let Some(conv_out_dims) = graph
            .edge(conv.outputs[0])?
            .static_dims()
            .map(<[usize]>::to_vec)
        else {
            return Ok(false);
        };
        if in_dims.len() != 4 || conv_out_dims.len() != 4 {
            return Ok(false);
        }
        let out_dtype = graph.edge(conv.outputs[0])?.dtype;

        let (in_start, in_end) = geometry::hoist_input_region(
            out_end - partition_width,
            out_end,
            params.stride_w,
            params.filter_w,
        );
        let in_width = in_end - in_start;

        let begin = const_i32_edge(
            graph,
            format!("{}_hoist_begin", slice_name),
            vec![0, 0, in_start as i32, 0],
        );
        let end = const_i32_edge(
            graph,
            format!("{}_hoist_end", slice_name),
            vec![1, in_dims[1] as i32, in_end as i32, in_dims[3] as i32],
        );

        let hoisted_out = graph.add_edge(IrEdge::new(
            format!("{}_hoisted", slice_name),
            in_dtype,
            TensorShape::Static(vec![in_dims[0], in_dims[1], in_width, in_dims[3]]),
        ));
        let mut hoisted = IrNode::new(ops::STRIDED_SLICE.to_string());
        hoisted.add_input(conv.inputs[0]);
        hoisted.add_input(begin);
        hoisted.add_input(end);
        // Unit strides and axis masks carry over from the matched slice.
        hoisted.add_input(slice.inputs[3]);
        for key in ops::SLICE_MASK_KEYS {
            if let Some(value) = slice.get_attribute(key) {
                hoisted.set_attribute(key, value.clone());
            }
        }
        hoisted.set_attribute(HOISTED_LABEL, AttributeValue::Unit);
        hoisted.add_output(hoisted_out);
        graph.add_node(hoisted);

        // Re-instantiate the convolution over the narrowed input. The clone
        // keeps the split label, so the split rule stays away from it.
        let mut conv_clone = conv.clone();
        conv_clone.inputs[0] = hoisted_out;
        let clone_out = graph.add_edge(IrEdge::new(
            format!("{}_part", slice_name),
            out_dtype,
            TensorShape::Static(vec![
                conv_out_dims[0],
                conv_out_dims[1],
                partition_width,
                conv_out_dims[3],
            ]),
        ));
        conv_clone.outputs = vec![clone_out];
        graph.add_node(conv_clone);

        graph.replace_all_uses(slice_out_id, clone_out)?;
        graph.remove_node(node_id)?;

        tracing::debug!(
            slice = %slice_name,
            in_start,
            in_end,
            partition_width,
            "hoisted slice above convolution"
        );
        Ok(true)
    }
}

// ─────────────────────────────── Driver ──────────────────────────────────

/// Pass that bounds the output working set of quantized convolutions.
///
/// Runs the split rule to fixed point, then the hoist rule to fixed point.
/// The phases never interleave: hoisting analyzes the stable set of slices
/// splitting produced.
pub struct OpSplitPass {
    /// Per-partition output size threshold, in elements.
    threshold: usize,
}

impl OpSplitPass {
    /// Create a pass with the default threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_SPLIT_THRESHOLD)
    }

    /// Create a pass with a custom per-partition output size threshold.
    ///
    /// # Panics
    ///
    /// Panics if `threshold` is zero.
    pub fn with_threshold(threshold: usize) -> Self {
        assert!(threshold > 0, "split threshold must be positive");
        Self { threshold }
    }
}

impl Default for OpSplitPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for OpSplitPass {
    fn name(&self) -> &str {
        "op-split"
    }

    fn stage(&self) -> Stage {
        Stage::Optimization
    }

    fn run(&self, graph: &mut IrGraph) -> Result<bool> {
        let split = SplitConvPattern {
            threshold: self.threshold,
        };
        let mut changed = apply_patterns_greedily(graph, &[&split])?;

        let hoist = HoistSlicePattern;
        changed |= apply_patterns_greedily(graph, &[&hoist])?;

        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinel_core::IrEdgeId;

    /// Build `input -> Conv2D -> output` with the given geometry. The conv
    /// output is the graph output.
    fn conv_graph(
        in_shape: [usize; 4],
        filter_shape: [usize; 4],
        out_shape: [usize; 4],
        stride: usize,
        padding: &str,
        dtype: DataType,
    ) -> (IrGraph, IrNodeId, IrEdgeId) {
        let mut graph = IrGraph::new();

        let input = graph.add_edge(IrEdge::new(
            "input".to_string(),
            dtype,
            TensorShape::Static(in_shape.to_vec()),
        ));
        let filter = graph.add_edge(IrEdge::new(
            "filter".to_string(),
            dtype,
            TensorShape::Static(filter_shape.to_vec()),
        ));
        let bias = graph.add_edge(IrEdge::new(
            "bias".to_string(),
            DataType::I32,
            TensorShape::Static(vec![filter_shape[0]]),
        ));
        let output = graph.add_edge(IrEdge::new(
            "conv_out".to_string(),
            dtype,
            TensorShape::Static(out_shape.to_vec()),
        ));

        let mut conv = IrNode::new(ops::CONV_2D.to_string());
        conv.add_input(input);
        conv.add_input(filter);
        conv.add_input(bias);
        conv.add_output(output);
        conv.set_attribute(
            ops::ATTR_PADDING,
            AttributeValue::String(padding.to_string()),
        );
        conv.set_attribute(ops::ATTR_STRIDE_H, AttributeValue::Int(stride as i64));
        conv.set_attribute(ops::ATTR_STRIDE_W, AttributeValue::Int(stride as i64));
        let conv_id = graph.add_node(conv);

        graph.inputs.push(input);
        graph.outputs.push(output);

        (graph, conv_id, output)
    }

    /// 1x1 filter, unit stride: input width 10 maps to output width 10.
    fn small_quant_graph(dtype: DataType, padding: &str) -> (IrGraph, IrNodeId, IrEdgeId) {
        conv_graph(
            [1, 1, 10, 1],
            [1, 1, 1, 1],
            [1, 1, 10, 1],
            1,
            padding,
            dtype,
        )
    }

    fn run_split(graph: &mut IrGraph, threshold: usize) -> bool {
        let split = SplitConvPattern { threshold };
        apply_patterns_greedily(graph, &[&split]).unwrap()
    }

    #[test]
    fn test_split_creates_slices_and_concat() {
        let (mut graph, conv_id, _) = small_quant_graph(DataType::QI8, ops::PADDING_VALID);

        // Output size 10 >= 2 * 4: split into ceil(10 / 4) = 3 partitions
        assert!(run_split(&mut graph, 4));
        assert!(!graph.contains_node(conv_id));

        // Cloned conv + 3 slices + concat
        assert_eq!(graph.node_count(), 5);

        let concat_id = graph
            .nodes()
            .find(|(_, n)| n.op_type() == ops::CONCATENATION)
            .map(|(id, _)| id)
            .unwrap();
        let concat = graph.node(concat_id).unwrap();
        assert_eq!(concat.inputs.len(), 3);
        assert_eq!(concat.attr_i64(ops::ATTR_AXIS), Some(2));
        assert_eq!(
            concat.attr_str(ops::ATTR_FUSED_ACTIVATION),
            Some(ops::ACTIVATION_NONE)
        );

        // Concat output replaced the conv output in the graph outputs
        assert_eq!(graph.outputs.len(), 1);
        assert_eq!(graph.outputs[0], concat.outputs[0]);
        let concat_out = graph.edge(concat.outputs[0]).unwrap();
        assert_eq!(concat_out.static_dims(), Some(&[1, 1, 10, 1][..]));

        // Slices carry widths 4, 3, 3 in offset order
        let mut widths = Vec::new();
        let mut prev_end = 0i32;
        for &slice_out in &concat.inputs {
            let slice_id = graph.edge_producer(slice_out).unwrap();
            let slice = graph.node(slice_id).unwrap();
            assert_eq!(slice.op_type(), ops::STRIDED_SLICE);
            assert!(slice.has_attribute(OP_SPLIT_LABEL));

            let begin = graph.edge(slice.inputs[1]).unwrap();
            let begin_values = begin.constant_value().unwrap().as_i32().unwrap();
            assert_eq!(begin_values[2], prev_end);

            let end = graph.edge(slice.inputs[2]).unwrap();
            let end_values = end.constant_value().unwrap().as_i32().unwrap();
            prev_end = end_values[2];

            widths.push(graph.edge(slice_out).unwrap().static_dims().unwrap()[2]);
        }
        assert_eq!(widths, vec![4, 3, 3]);
        assert_eq!(prev_end, 10);

        // The surviving conv is labeled and feeds the slices
        let (_, new_conv) = graph
            .nodes()
            .find(|(_, n)| n.op_type() == ops::CONV_2D)
            .unwrap();
        assert!(new_conv.has_attribute(OP_SPLIT_LABEL));
    }

    #[test]
    fn test_split_declines_below_threshold() {
        let (mut graph, conv_id, _) = small_quant_graph(DataType::QI8, ops::PADDING_VALID);

        // Output size 10 < 2 * 6
        assert!(!run_split(&mut graph, 6));
        assert!(graph.contains_node(conv_id));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_split_declines_same_padding() {
        let (mut graph, conv_id, _) = small_quant_graph(DataType::QI8, "SAME");
        assert!(!run_split(&mut graph, 4));
        assert!(graph.contains_node(conv_id));
    }

    #[test]
    fn test_split_declines_unquantized() {
        let (mut graph, conv_id, _) = small_quant_graph(DataType::F32, ops::PADDING_VALID);
        assert!(!run_split(&mut graph, 4));
        assert!(graph.contains_node(conv_id));
    }

    #[test]
    fn test_split_declines_non_square_filter() {
        let (mut graph, conv_id, _) = conv_graph(
            [1, 1, 12, 1],
            [1, 1, 3, 1],
            [1, 1, 10, 1],
            1,
            ops::PADDING_VALID,
            DataType::QI8,
        );
        assert!(!run_split(&mut graph, 4));
        assert!(graph.contains_node(conv_id));
    }

    #[test]
    fn test_split_is_idempotent() {
        let (mut graph, _, _) = small_quant_graph(DataType::QI8, ops::PADDING_VALID);

        assert!(run_split(&mut graph, 4));
        let node_count = graph.node_count();

        assert!(!run_split(&mut graph, 4));
        assert_eq!(graph.node_count(), node_count);
    }

    #[test]
    fn test_full_pass_hoists_slices() {
        // stride 2, filter 3: output width 1024 from input width 2049.
        // Output size 4096 with threshold 2048 gives two 512-wide partitions.
        let (mut graph, _, _) = conv_graph(
            [1, 3, 2049, 4],
            [4, 3, 3, 4],
            [1, 1, 1024, 4],
            2,
            ops::PADDING_VALID,
            DataType::QI8,
        );

        let pass = OpSplitPass::with_threshold(2048);
        assert!(pass.run(&mut graph).unwrap());

        // 2 hoisted slices + 2 per-partition convs + concat; the wide conv
        // is dead and erased.
        assert_eq!(graph.node_count(), 5);

        let convs: Vec<_> = graph
            .nodes()
            .filter(|(_, n)| n.op_type() == ops::CONV_2D)
            .collect();
        assert_eq!(convs.len(), 2);
        for (_, conv) in &convs {
            let out = graph.edge(conv.outputs[0]).unwrap();
            assert_eq!(out.static_dims(), Some(&[1, 1, 512, 4][..]));

            // Each conv reads a hoisted slice of width 512*2 - 2 + 3 = 1025
            let in_edge = graph.edge(conv.inputs[0]).unwrap();
            assert_eq!(in_edge.static_dims(), Some(&[1, 3, 1025, 4][..]));

            let slice_id = graph.edge_producer(conv.inputs[0]).unwrap();
            let slice = graph.node(slice_id).unwrap();
            assert_eq!(slice.op_type(), ops::STRIDED_SLICE);
            assert!(slice.has_attribute(HOISTED_LABEL));
        }

        // Hoisted regions: [0, 1025) and [1024, 2049)
        let mut regions: Vec<(i32, i32)> = graph
            .nodes()
            .filter(|(_, n)| n.op_type() == ops::STRIDED_SLICE)
            .map(|(_, slice)| {
                let begin = graph.edge(slice.inputs[1]).unwrap();
                let end = graph.edge(slice.inputs[2]).unwrap();
                (
                    begin.constant_value().unwrap().as_i32().unwrap()[2],
                    end.constant_value().unwrap().as_i32().unwrap()[2],
                )
            })
            .collect();
        regions.sort();
        assert_eq!(regions, vec![(0, 1025), (1024, 2049)]);

        // Running the pass again changes nothing
        assert!(!pass.run(&mut graph).unwrap());
    }

    #[test]
    fn test_hoist_declines_non_constant_end() {
        let (mut graph, _, _) = small_quant_graph(DataType::QI8, ops::PADDING_VALID);
        assert!(run_split(&mut graph, 4));

        // Replace every slice end bound with a runtime edge
        let slice_ids: Vec<_> = graph
            .nodes()
            .filter(|(_, n)| n.op_type() == ops::STRIDED_SLICE)
            .map(|(id, _)| id)
            .collect();
        for (i, slice_id) in slice_ids.into_iter().enumerate() {
            let runtime_end = graph.add_edge(IrEdge::new(
                format!("runtime_end{}", i),
                DataType::I32,
                TensorShape::Static(vec![4]),
            ));
            graph.node_mut(slice_id).unwrap().inputs[2] = runtime_end;
        }

        let changed = apply_patterns_greedily(&mut graph, &[&HoistSlicePattern]).unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_hoist_declines_zero_width_slice() {
        // stride 2 with a 1x1 filter: the region arithmetic would underflow
        // on a zero-extent partition, so the rule must decline first.
        let (mut graph, conv_id, conv_out) = conv_graph(
            [1, 1, 10, 1],
            [1, 1, 1, 1],
            [1, 1, 5, 1],
            2,
            ops::PADDING_VALID,
            DataType::QI8,
        );

        let begin = const_i32_edge(&mut graph, "zw_begin".to_string(), vec![0, 0, 0, 0]);
        let end = const_i32_edge(&mut graph, "zw_end".to_string(), vec![1, 1, 0, 1]);
        let strides = const_i32_edge(&mut graph, "zw_strides".to_string(), vec![1, 1, 1, 1]);
        let slice_out = graph.add_edge(IrEdge::new(
            "zw_slice".to_string(),
            DataType::QI8,
            TensorShape::Static(vec![1, 1, 0, 1]),
        ));
        let mut slice = IrNode::new(ops::STRIDED_SLICE.to_string());
        slice.add_input(conv_out);
        slice.add_input(begin);
        slice.add_input(end);
        slice.add_input(strides);
        slice.add_output(slice_out);
        slice.set_attribute(OP_SPLIT_LABEL, AttributeValue::Unit);
        let slice_id = graph.add_node(slice);
        graph.outputs.push(slice_out);

        let changed = apply_patterns_greedily(&mut graph, &[&HoistSlicePattern]).unwrap();
        assert!(!changed);
        assert!(graph.contains_node(slice_id));
        assert!(graph.contains_node(conv_id));
    }

    #[test]
    fn test_hoist_declines_non_conv_producer() {
        let mut graph = IrGraph::new();

        let t_in = graph.add_edge(IrEdge::new(
            "t_in".to_string(),
            DataType::QI8,
            TensorShape::Static(vec![1, 1, 10, 1]),
        ));
        let relu_out = graph.add_edge(IrEdge::new(
            "relu_out".to_string(),
            DataType::QI8,
            TensorShape::Static(vec![1, 1, 10, 1]),
        ));
        let mut relu = IrNode::new("Relu".to_string());
        relu.add_input(t_in);
        relu.add_output(relu_out);
        graph.add_node(relu);

        let begin = const_i32_edge(&mut graph, "b".to_string(), vec![0, 0, 0, 0]);
        let end = const_i32_edge(&mut graph, "e".to_string(), vec![1, 1, 5, 1]);
        let strides = const_i32_edge(&mut graph, "s".to_string(), vec![1, 1, 1, 1]);
        let slice_out = graph.add_edge(IrEdge::new(
            "slice_out".to_string(),
            DataType::QI8,
            TensorShape::Static(vec![1, 1, 5, 1]),
        ));
        let mut slice = IrNode::new(ops::STRIDED_SLICE.to_string());
        slice.add_input(relu_out);
        slice.add_input(begin);
        slice.add_input(end);
        slice.add_input(strides);
        slice.add_output(slice_out);
        slice.set_attribute(OP_SPLIT_LABEL, AttributeValue::Unit);
        graph.add_node(slice);
        graph.outputs.push(slice_out);

        let changed = apply_patterns_greedily(&mut graph, &[&HoistSlicePattern]).unwrap();
        assert!(!changed);
    }
}
