//! Bilinear patch upsampling.

use supres_common::BandStack;

/// Upsample a patch by an integer factor using bilinear interpolation.
///
/// Destination pixel centers map back to source coordinates with the
/// half-pixel convention `sx = (dx + 0.5) / factor - 0.5`, clamped at the
/// edges. The result is deterministic; the interpolation is lossy by design
/// (the inference model only needs the coarse bands brought up to the FINE
/// patch dimensions, not recovered detail).
pub fn upsample_patch(patch: &BandStack, factor: usize) -> BandStack {
    if factor <= 1 {
        return patch.clone();
    }

    let src_h = patch.height();
    let src_w = patch.width();
    let dst_h = src_h * factor;
    let dst_w = src_w * factor;

    let y_taps = axis_taps(src_h, factor);
    let x_taps = axis_taps(src_w, factor);

    let mut out = BandStack::zeros(patch.channels(), dst_h, dst_w);
    for c in 0..patch.channels() {
        let plane = patch.channel(c);
        for (dy, &(y0, y1, wy)) in y_taps.iter().enumerate() {
            let row0 = &plane[y0 * src_w..y0 * src_w + src_w];
            let row1 = &plane[y1 * src_w..y1 * src_w + src_w];
            let start = (c * dst_h + dy) * dst_w;
            let dst = &mut out.data_mut()[start..start + dst_w];
            for (dst_v, &(x0, x1, wx)) in dst.iter_mut().zip(x_taps.iter()) {
                let top = row0[x0] * (1.0 - wx) + row0[x1] * wx;
                let bottom = row1[x0] * (1.0 - wx) + row1[x1] * wx;
                *dst_v = top * (1.0 - wy) + bottom * wy;
            }
        }
    }
    out
}

/// Precomputed (lower index, upper index, upper weight) for one axis.
fn axis_taps(src_len: usize, factor: usize) -> Vec<(usize, usize, f32)> {
    let last = src_len - 1;
    (0..src_len * factor)
        .map(|d| {
            let s = (d as f64 + 0.5) / factor as f64 - 0.5;
            let s = s.clamp(0.0, last as f64);
            let i0 = s.floor() as usize;
            let i1 = (i0 + 1).min(last);
            (i0, i1, (s - i0 as f64) as f32)
        })
        .collect()
}
