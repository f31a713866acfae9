//! Synthetic raster generators.

use supres_common::{BandStack, ResolutionTier};

/// A stack whose value encodes its own position: `c * 100000 + y * 1000 + x`.
///
/// Any copy, crop or stitch error shows up as a value that does not match
/// its coordinates.
pub fn ramp_stack(channels: usize, height: usize, width: usize) -> BandStack {
    let mut data = Vec::with_capacity(channels * height * width);
    for c in 0..channels {
        for y in 0..height {
            for x in 0..width {
                data.push((c * 100_000 + y * 1_000 + x) as f32);
            }
        }
    }
    BandStack::from_data(data, channels, height, width)
}

/// A reflectance-like checkerboard, alternating between two radiance levels
/// per 8x8 block. Useful when a test needs non-trivial but band-limited
/// content rather than positional encoding.
pub fn checker_stack(channels: usize, height: usize, width: usize) -> BandStack {
    let mut data = Vec::with_capacity(channels * height * width);
    for c in 0..channels {
        let (lo, hi) = (300.0 + c as f32 * 50.0, 1_200.0 + c as f32 * 50.0);
        for y in 0..height {
            for x in 0..width {
                let v = if (y / 8 + x / 8) % 2 == 0 { lo } else { hi };
                data.push(v);
            }
        }
    }
    BandStack::from_data(data, channels, height, width)
}

/// A Fine+Mid scene cut from one pixel box: 4 bands at 10m, 6 bands at 20m.
/// `fine_size` must be divisible by 2.
pub fn two_tier_scene(fine_size: usize) -> Vec<(ResolutionTier, BandStack)> {
    assert_eq!(fine_size % 2, 0, "fine_size must be divisible by 2");
    vec![
        (ResolutionTier::Fine, ramp_stack(4, fine_size, fine_size)),
        (
            ResolutionTier::Mid,
            ramp_stack(6, fine_size / 2, fine_size / 2),
        ),
    ]
}

/// A Fine+Mid+Coarse scene cut from one pixel box: 4 bands at 10m, 6 at 20m,
/// 2 at 60m. `fine_size` must be divisible by 6.
pub fn three_tier_scene(fine_size: usize) -> Vec<(ResolutionTier, BandStack)> {
    assert_eq!(fine_size % 6, 0, "fine_size must be divisible by 6");
    vec![
        (ResolutionTier::Fine, ramp_stack(4, fine_size, fine_size)),
        (
            ResolutionTier::Mid,
            ramp_stack(6, fine_size / 2, fine_size / 2),
        ),
        (
            ResolutionTier::Coarse,
            ramp_stack(2, fine_size / 6, fine_size / 6),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_encodes_position() {
        let s = ramp_stack(2, 4, 5);
        assert_eq!(s.get(0, 0, 0), 0.0);
        assert_eq!(s.get(0, 2, 3), 2_003.0);
        assert_eq!(s.get(1, 1, 4), 101_004.0);
    }

    #[test]
    fn test_three_tier_scene_shapes() {
        let scene = three_tier_scene(120);
        assert_eq!(scene[0].1.height(), 120);
        assert_eq!(scene[1].1.height(), 60);
        assert_eq!(scene[2].1.height(), 20);
    }
}
