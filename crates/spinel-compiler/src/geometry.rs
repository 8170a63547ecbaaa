//! Partition and receptive-field geometry for the op-split pass.
//!
//! Pure functions over output/input extents; no graph types in sight. The
//! split rule uses the partition helpers to cut a convolution's output width
//! into balanced contiguous ranges, and the hoist rule uses
//! [`hoist_input_region`] to invert a valid-padding convolution's
//! output-to-input mapping for one spatial dimension.

/// Number of partitions for an output of `output_size` elements under a
/// per-partition size `threshold`, rounding up.
///
/// `threshold` must be positive. An exact multiple yields
/// `output_size / threshold` partitions.
pub fn partition_count(output_size: usize, threshold: usize) -> usize {
    debug_assert!(threshold > 0, "partition threshold must be positive");
    output_size.div_ceil(threshold)
}

/// Split `output_width` into `count` contiguous widths, differing by at most
/// one: the first `output_width % count` partitions get the extra column.
///
/// The widths always sum to `output_width`; every width is positive as long
/// as `count <= output_width`.
pub fn partition_widths(output_width: usize, count: usize) -> Vec<usize> {
    debug_assert!(count > 0 && count <= output_width);
    let base = output_width / count;
    let remainder = output_width % count;
    (0..count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Convert partition widths into `(start, end)` offset pairs via a running
/// prefix sum starting at zero.
pub fn partition_offsets(widths: &[usize]) -> Vec<(usize, usize)> {
    let mut offsets = Vec::with_capacity(widths.len());
    let mut start = 0;
    for &width in widths {
        offsets.push((start, start + width));
        start += width;
    }
    offsets
}

/// Input region `[in_start, in_end)` that the output range
/// `[out_start, out_end)` of a valid-padding convolution depends on, for the
/// given stride and filter width along that dimension.
pub fn hoist_input_region(
    out_start: usize,
    out_end: usize,
    stride: usize,
    filter_width: usize,
) -> (usize, usize) {
    let in_end = out_end * stride - stride + filter_width;
    let in_width = (out_end - out_start) * stride - stride + filter_width;
    (in_end - in_width, in_end)
}
