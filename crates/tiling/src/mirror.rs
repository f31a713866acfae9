//! Symmetric (mirror) border padding.

use supres_common::{BandStack, SupresError, SupresResult};

/// Pad a stack by `border` pixels on all four sides, mirroring the data at
/// the borders.
///
/// Reflection includes the edge pixel (numpy's `symmetric` mode): a row
/// sequence `a b c` padded by 2 becomes `b a | a b c | c b`. Mirroring
/// instead of zero-filling avoids artificial discontinuities that the
/// inference model would amplify at tile seams.
///
/// `border` must not exceed either window dimension; a single reflection
/// cannot produce more pixels than the window holds.
pub fn pad_symmetric(stack: &BandStack, border: usize) -> SupresResult<BandStack> {
    let height = stack.height();
    let width = stack.width();
    if border > height || border > width {
        return Err(SupresError::grid_alignment(format!(
            "mirror border {border} exceeds window of {width}x{height} pixels"
        )));
    }
    if border == 0 {
        return Ok(stack.clone());
    }

    let row_map = mirror_axis(height, border);
    let col_map = mirror_axis(width, border);

    let out_h = height + 2 * border;
    let out_w = width + 2 * border;
    let mut out = BandStack::zeros(stack.channels(), out_h, out_w);
    for c in 0..stack.channels() {
        for (out_y, &src_y) in row_map.iter().enumerate() {
            let src_row = stack.row(c, src_y);
            let start = (c * out_h + out_y) * out_w;
            let dst = &mut out.data_mut()[start..start + out_w];
            for (dst_v, &src_x) in dst.iter_mut().zip(col_map.iter()) {
                *dst_v = src_row[src_x];
            }
        }
    }
    Ok(out)
}

/// Source index for every padded index along one axis.
fn mirror_axis(len: usize, border: usize) -> Vec<usize> {
    let n = len as i64;
    (0..n + 2 * border as i64)
        .map(|i| {
            let j = i - border as i64;
            let m = if j < 0 {
                -j - 1
            } else if j >= n {
                2 * n - j - 1
            } else {
                j
            };
            m as usize
        })
        .collect()
}
