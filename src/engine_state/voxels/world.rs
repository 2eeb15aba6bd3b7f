//! # World Module
//!
//! This module provides the `World` struct, a directory of every chunk in the scene.
//!
//! ## Architecture
//!
//! The world is fully materialised once at startup from a generation radius and never
//! changes afterwards: there is no chunk streaming, unloading or dynamic radius. Lookup by
//! id and iteration are the only operations.
//!
//! ## Ordering
//!
//! Chunks live in a `HashMap`, so iteration order is unspecified. Anything that needs a
//! reproducible order (debug listings, tests) must go through `sorted_ids`.

use std::collections::HashMap;

use log::{debug, info};
use noise::NoiseFn;
use web_time::Instant;

use super::chunk::{Chunk, ChunkId, CHUNK_LENGTH};
use super::terrain::TerrainSampler;

/// Represents a voxel world composed of chunks on a square grid.
pub struct World {
    /// A mapping from chunk id to chunk data. Keys are unique.
    chunks: HashMap<ChunkId, Chunk>,
}

impl World {
    /// Generates every chunk within `generation_radius` of the origin.
    ///
    /// Grid offsets `(gx, gz)` with `|gx|, |gz| <= generation_radius` each produce one chunk
    /// whose origin is `(gx * CHUNK_LENGTH, gz * CHUNK_LENGTH)`, for `(2r + 1)²` chunks total.
    ///
    /// # Arguments
    /// * `generation_radius` - Half width of the square chunk neighbourhood
    /// * `sampler` - Terrain sampler used to build each chunk
    /// * `rng` - Source for per-chunk debug colours
    ///
    /// # Examples
    ///
    /// ```
    /// use voxel_frustum::engine_state::voxels::{terrain::TerrainSampler, world::World};
    ///
    /// let world = World::generate(1, &TerrainSampler::default(), &mut fastrand::Rng::new());
    /// assert_eq!(world.len(), 9);
    /// assert!(world.get_chunk_at(16, -16).is_some());
    /// ```
    pub fn generate<N: NoiseFn<f64, 3>>(
        generation_radius: u32,
        sampler: &TerrainSampler<N>,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let start = Instant::now();
        let radius = generation_radius as i32;
        let side = 2 * generation_radius as usize + 1;
        let mut chunks = HashMap::with_capacity(side * side);

        for gx in -radius..=radius {
            for gz in -radius..=radius {
                let origin_x = gx * CHUNK_LENGTH as i32;
                let origin_z = gz * CHUNK_LENGTH as i32;
                let chunk = Chunk::generate(origin_x, origin_z, sampler, rng);
                debug!("Generated chunk {}", chunk.id());
                chunks.insert(chunk.id().clone(), chunk);
            }
        }

        info!(
            "Generated {} chunks (radius {}) in {:?}",
            chunks.len(),
            generation_radius,
            start.elapsed()
        );

        World { chunks }
    }

    /// Retrieves the chunk with the given id.
    pub fn get_chunk(&self, id: &ChunkId) -> Option<&Chunk> {
        self.chunks.get(id)
    }

    /// Retrieves the chunk whose world origin is `(origin_x, origin_z)`.
    pub fn get_chunk_at(&self, origin_x: i32, origin_z: i32) -> Option<&Chunk> {
        self.get_chunk(&ChunkId::from_origin(origin_x, origin_z))
    }

    /// Iterates over all chunks in unspecified order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    /// Returns every chunk id sorted lexicographically.
    pub fn sorted_ids(&self) -> Vec<ChunkId> {
        let mut ids = self.chunks.keys().cloned().collect::<Vec<_>>();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
