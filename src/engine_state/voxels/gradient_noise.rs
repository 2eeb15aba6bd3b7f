//! # Gradient Noise Module
//!
//! Classic improved Perlin noise used to pick terrain surface heights.
//!
//! ## Algorithm
//!
//! 1. The sample point is split into an integer lattice cell (wrapped to 0..256) and a
//!    fractional offset inside that cell.
//! 2. Each fractional component is smoothed with the quintic fade curve.
//! 3. The eight corners of the lattice cube are hashed through the permutation table.
//! 4. Each corner hash selects one of twelve gradient directions, which is dotted with the
//!    offset from that corner.
//! 5. The eight dot products are blended with nested linear interpolation (x, then y, then z).
//!
//! ## Determinism
//!
//! The permutation table is a process-wide constant. `GradientNoise::sample` is a pure
//! function: the same input always produces a bit-identical output.

use noise::NoiseFn;

/// Ken Perlin's reference permutation of 0..=255.
#[rustfmt::skip]
pub static PERMUTATION: [u8; 256] = [
    151, 160, 137,  91,  90,  15, 131,  13, 201,  95,  96,  53, 194, 233,   7, 225,
    140,  36, 103,  30,  69, 142,   8,  99,  37, 240,  21,  10,  23, 190,   6, 148,
    247, 120, 234,  75,   0,  26, 197,  62,  94, 252, 219, 203, 117,  35,  11,  32,
     57, 177,  33,  88, 237, 149,  56,  87, 174,  20, 125, 136, 171, 168,  68, 175,
     74, 165,  71, 134, 139,  48,  27, 166,  77, 146, 158, 231,  83, 111, 229, 122,
     60, 211, 133, 230, 220, 105,  92,  41,  55,  46, 245,  40, 244, 102, 143,  54,
     65,  25,  63, 161,   1, 216,  80,  73, 209,  76, 132, 187, 208,  89,  18, 169,
    200, 196, 135, 130, 116, 188, 159,  86, 164, 100, 109, 198, 173, 186,   3,  64,
     52, 217, 226, 250, 124, 123,   5, 202,  38, 147, 118, 126, 255,  82,  85, 212,
    207, 206,  59, 227,  47,  16,  58,  17, 182, 189,  28,  42, 223, 183, 170, 213,
    119, 248, 152,   2,  44, 154, 163,  70, 221, 153, 101, 155, 167,  43, 172,   9,
    129,  22,  39, 253,  19,  98, 108, 110,  79, 113, 224, 232, 178, 185, 112, 104,
    218, 246,  97, 228, 251,  34, 242, 193, 238, 210, 144,  12, 191, 179, 162, 241,
     81,  51, 145, 235, 249,  14, 239, 107,  49, 192, 214,  31, 181, 199, 106, 157,
    184,  84, 204, 176, 115, 121,  50,  45, 127,   4, 150, 254, 138, 236, 205,  93,
    222, 114,  67,  29,  24,  72, 243, 141, 128, 195,  78,  66, 215,  61, 156, 180,
];

/// Deterministic 3D gradient noise generator.
///
/// The generator carries no state of its own; every instance reads the shared
/// [`PERMUTATION`] table, so it is `Copy` and safe to share between threads.
///
/// # Examples
///
/// ```
/// use voxel_frustum::engine_state::voxels::gradient_noise::GradientNoise;
///
/// let noise = GradientNoise;
/// let value = noise.sample(1.3, 8.5, 2.7);
/// assert!((-1.0..=1.0).contains(&value));
/// assert_eq!(value.to_bits(), noise.sample(1.3, 8.5, 2.7).to_bits());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GradientNoise;

impl GradientNoise {
    /// Samples the noise field at `(x, y, z)`.
    ///
    /// # Returns
    /// A value in `[-1, 1]`. Integer lattice points always return `0.0`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (x_floor, y_floor, z_floor) = (x.floor(), y.floor(), z.floor());

        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;
        let zi = (z_floor as i64 & 255) as usize;

        let xf = x - x_floor;
        let yf = y - y_floor;
        let zf = z - z_floor;

        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let a = hash(xi) + yi;
        let b = hash(xi + 1) + yi;

        let aaa = hash(hash(a) + zi);
        let aba = hash(hash(a + 1) + zi);
        let aab = hash(hash(a) + zi + 1);
        let abb = hash(hash(a + 1) + zi + 1);
        let baa = hash(hash(b) + zi);
        let bba = hash(hash(b + 1) + zi);
        let bab = hash(hash(b) + zi + 1);
        let bbb = hash(hash(b + 1) + zi + 1);

        let near_z = lerp(
            lerp(grad(aaa, xf, yf, zf), grad(baa, xf - 1.0, yf, zf), u),
            lerp(
                grad(aba, xf, yf - 1.0, zf),
                grad(bba, xf - 1.0, yf - 1.0, zf),
                u,
            ),
            v,
        );
        let far_z = lerp(
            lerp(
                grad(aab, xf, yf, zf - 1.0),
                grad(bab, xf - 1.0, yf, zf - 1.0),
                u,
            ),
            lerp(
                grad(abb, xf, yf - 1.0, zf - 1.0),
                grad(bbb, xf - 1.0, yf - 1.0, zf - 1.0),
                u,
            ),
            v,
        );

        lerp(near_z, far_z, w).clamp(-1.0, 1.0)
    }
}

/// Lets the generator plug into the `noise` crate's combinators (`ScalePoint`, `Add`, ...).
impl NoiseFn<f64, 3> for GradientNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample(point[0], point[1], point[2])
    }
}

/// Looks up the permutation table, wrapping the index into 0..256.
#[inline]
fn hash(i: usize) -> usize {
    PERMUTATION[i & 255] as usize
}

/// Quintic smoothing curve `6t^5 - 15t^4 + 10t^3`.
///
/// Has zero first and second derivatives at 0 and 1, which hides the lattice grid.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of `(x, y, z)` with one of twelve gradient directions picked by `hash`.
///
/// The low four bits choose the two contributing axes and their signs, which avoids a
/// gradient vector table.
#[inline]
pub fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };

    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_hits_fixed_points() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
    }

    #[test]
    fn fade_is_monotonic_on_unit_interval() {
        let mut previous = fade(0.0);
        for i in 1..=1000 {
            let current = fade(i as f64 / 1000.0);
            assert!(current >= previous, "fade decreased at t = {}", i as f64 / 1000.0);
            previous = current;
        }
    }

    #[test]
    fn permutation_is_a_permutation() {
        let mut seen = [false; 256];
        for &value in PERMUTATION.iter() {
            assert!(!seen[value as usize], "duplicate entry {}", value);
            seen[value as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn sample_is_deterministic_and_bounded() {
        let noise = GradientNoise;
        for i in 0..40 {
            for j in 0..40 {
                for k in 0..40 {
                    let (x, y, z) = (i as f64 * 0.1, j as f64 * 0.1, k as f64 * 0.1);
                    let first = noise.sample(x, y, z);
                    let second = noise.sample(x, y, z);
                    assert_eq!(first.to_bits(), second.to_bits());
                    assert!(
                        (-1.0..=1.0).contains(&first),
                        "sample({}, {}, {}) = {} out of range",
                        x,
                        y,
                        z,
                        first
                    );
                }
            }
        }
    }

    #[test]
    fn lattice_points_are_zero() {
        let noise = GradientNoise;
        assert_eq!(noise.sample(0.0, 0.0, 0.0), 0.0);
        assert_eq!(noise.sample(3.0, 8.0, 12.0), 0.0);
        assert_eq!(noise.sample(-7.0, 255.0, 256.0), 0.0);
    }

    #[test]
    fn lattice_wraps_every_256_units() {
        let noise = GradientNoise;
        for &(x, y, z) in &[(0.25, 0.5, 0.75), (10.3, 4.6, 200.9), (255.5, 1.5, 3.5)] {
            let base = noise.sample(x, y, z);
            let wrapped = noise.sample(x + 256.0, y, z + 256.0);
            assert!((base - wrapped).abs() < 1e-9, "{} != {}", base, wrapped);
        }
    }

    #[test]
    fn negative_coordinates_are_bounded() {
        let noise = GradientNoise;
        for i in -20..20 {
            let value = noise.sample(i as f64 * 0.37, -3.3, i as f64 * -0.51);
            assert!((-1.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn field_is_not_flat() {
        let noise = GradientNoise;
        let distinct = (0..32)
            .map(|i| noise.sample(i as f64 * 0.13 + 0.05, 8.5, 0.7).to_bits())
            .collect::<std::collections::HashSet<_>>();
        assert!(distinct.len() > 16);
    }

    #[test]
    fn grad_selects_axes_from_hash() {
        assert_eq!(grad(0, 1.0, 2.0, 3.0), 3.0); // x + y
        assert_eq!(grad(3, 1.0, 2.0, 3.0), -3.0); // -x - y
        assert_eq!(grad(4, 1.0, 2.0, 3.0), 4.0); // x + z
        assert_eq!(grad(8, 1.0, 2.0, 3.0), 5.0); // y + z
        assert_eq!(grad(12, 1.0, 2.0, 3.0), 3.0); // y + x
        assert_eq!(grad(14, 1.0, 2.0, 3.0), 1.0); // y - x
    }

    #[test]
    fn noise_fn_matches_sample() {
        let noise = GradientNoise;
        let point = [4.2, 7.7, 1.1];
        assert_eq!(noise.get(point), noise.sample(4.2, 7.7, 1.1));
    }
}
