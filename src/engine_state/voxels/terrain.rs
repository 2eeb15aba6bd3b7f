//! # Terrain Module
//!
//! Picks one surface height per `(x, z)` column from a 3D noise field.
//!
//! ## Scope
//!
//! Terrain is a single-layer height map: each column gets exactly one voxel at its surface
//! height and everything above and below stays empty. Volumetric terrain (caves, overhangs,
//! filled ground) is not generated.

use noise::{NoiseFn, ScalePoint};

use super::chunk::{CHUNK_HEIGHT, MID_HEIGHT};
use super::gradient_noise::GradientNoise;

/// Scaling factor applied to world coordinates when sampling noise.
pub const DEFAULT_NOISE_SCALE: f64 = 0.05;
/// Maximum deviation of the surface from mid height, in voxels.
pub const DEFAULT_TERRAIN_AMPLITUDE: f64 = 6.0;

/// Maps world columns to surface heights using a noise source.
///
/// The source is sampled at `(x, MID_HEIGHT, z) * scale`, so the vertical slice through
/// the noise field is fixed near the middle of the chunk.
pub struct TerrainSampler<N = GradientNoise> {
    source: ScalePoint<N>,
    amplitude: f64,
}

impl TerrainSampler<GradientNoise> {
    /// Creates a sampler over the built-in gradient noise.
    ///
    /// # Arguments
    /// * `scale` - Multiplier from world voxel coordinates to noise space
    /// * `amplitude` - Maximum distance of the surface from mid height, in voxels
    pub fn new(scale: f64, amplitude: f64) -> Self {
        Self::with_source(GradientNoise, scale, amplitude)
    }
}

impl Default for TerrainSampler<GradientNoise> {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SCALE, DEFAULT_TERRAIN_AMPLITUDE)
    }
}

impl<N: NoiseFn<f64, 3>> TerrainSampler<N> {
    /// Creates a sampler over any `noise` crate compatible source.
    pub fn with_source(source: N, scale: f64, amplitude: f64) -> Self {
        TerrainSampler {
            source: ScalePoint::new(source).set_scale(scale),
            amplitude,
        }
    }

    /// Computes the surface height of the column at world coordinates `(world_x, world_z)`.
    ///
    /// # Returns
    /// A local height in `0..CHUNK_HEIGHT`.
    pub fn surface_height(&self, world_x: i32, world_z: i32) -> u8 {
        let sample = self
            .source
            .get([world_x as f64, MID_HEIGHT as f64, world_z as f64]);
        let height = MID_HEIGHT as f64 + (sample * self.amplitude).round();
        height.clamp(0.0, (CHUNK_HEIGHT - 1) as f64) as u8
    }
}
