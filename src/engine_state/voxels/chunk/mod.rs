//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! fixed-size `CHUNK_LENGTH x CHUNK_HEIGHT x CHUNK_LENGTH` grids of voxels.
//!
//! ## Storage
//!
//! Chunks keep their voxels in a flat buffer indexed as `x + z * L + y * L * L`:
//! - `presence`: A bit vector (1 bit per cell) marking which cells hold a voxel
//! - `voxels`: One `Voxel` slot per cell; slots whose presence bit is clear are empty
//!
//! Empty cells are an explicit state of the presence mask, never a shared or dangling
//! reference.
//!
//! ## Lifetime
//!
//! Chunks are stationary. The bounding box is computed once by `ChunkBuilder::finish`
//! and there is no API to change it or the voxel grid afterwards.

use bitvec::vec::BitVec;
use cgmath::Point3;
use serde::{Deserialize, Serialize};

use super::terrain::TerrainSampler;
use super::voxel::{voxel_type::VoxelType, Rgba, Voxel, VoxelInstance};

pub use bounding_box::BoundingBox;
pub use chunk_creation::ChunkBuilder;
pub use chunk_id::{ChunkId, ChunkIdError};

pub mod bounding_box;
mod chunk_creation;
pub mod chunk_id;

/// The width and depth (x and z) of a chunk in voxels.
pub const CHUNK_LENGTH: usize = 16;
/// The height (y) of a chunk in voxels.
pub const CHUNK_HEIGHT: usize = 16;
/// The vertical middle of a chunk, where flat terrain sits.
pub const MID_HEIGHT: usize = CHUNK_HEIGHT / 2;
/// The number of cells in a single horizontal layer of a chunk.
pub const CHUNK_PLANE_SIZE: usize = CHUNK_LENGTH * CHUNK_LENGTH;
/// The total number of cells in a chunk.
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_HEIGHT;

/// Converts a local cell coordinate to its offset in the flat voxel buffer.
#[inline]
pub fn flat_index(x: usize, y: usize, z: usize) -> usize {
    x + z * CHUNK_LENGTH + y * CHUNK_PLANE_SIZE
}

/// Selects where voxel render colours come from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoxelColoring {
    /// Every voxel in a chunk uses the chunk's random debug colour.
    #[default]
    ChunkDebug,
    /// Each voxel uses the palette colour of its type.
    Palette,
}

/// A fixed-size column of voxels anchored at an integer world position.
pub struct Chunk {
    /// Stable id encoding the world origin, e.g. `"16,-32"`
    id: ChunkId,
    /// World-space origin; local cell `(0, 0, 0)` is centred here
    world_position: Point3<f32>,
    /// Box covering every cell of the chunk across its full height
    bounding_box: BoundingBox,
    /// One bit per cell, set when the cell holds a voxel
    presence: BitVec,
    /// One slot per cell, meaningful only where `presence` is set
    voxels: Vec<Voxel>,
    /// Random colour assigned at construction for debug rendering
    debug_color: Rgba,
}

impl Chunk {
    /// Generates the chunk whose origin is `(origin_x, origin_z)`.
    ///
    /// Each of the `CHUNK_LENGTH²` columns receives exactly one grass voxel at the height
    /// chosen by `sampler`. The rest of the column is left empty.
    ///
    /// # Arguments
    /// * `origin_x` - World X of the chunk origin
    /// * `origin_z` - World Z of the chunk origin
    /// * `sampler` - Terrain sampler choosing the surface height per column
    /// * `rng` - Source for the chunk's debug colour
    pub fn generate<N: noise::NoiseFn<f64, 3>>(
        origin_x: i32,
        origin_z: i32,
        sampler: &TerrainSampler<N>,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let mut builder = ChunkBuilder::new(origin_x, origin_z, rng);

        for lx in 0..CHUNK_LENGTH as u8 {
            for lz in 0..CHUNK_LENGTH as u8 {
                let height = sampler.surface_height(origin_x + lx as i32, origin_z + lz as i32);
                builder.place(Point3::new(lx, height, lz), VoxelType::Grass);
            }
        }

        builder.finish()
    }

    pub fn id(&self) -> &ChunkId {
        &self.id
    }

    pub fn world_position(&self) -> Point3<f32> {
        self.world_position
    }

    /// The chunk's precomputed bounding box.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn debug_color(&self) -> Rgba {
        self.debug_color
    }

    /// Checks whether the cell at the given local coordinates holds a voxel.
    ///
    /// # Returns
    /// `false` for empty cells and for coordinates outside the chunk.
    pub fn is_present(&self, x: usize, y: usize, z: usize) -> bool {
        self.voxel_at(x, y, z).is_some()
    }

    /// Gets the voxel at the given local coordinates.
    ///
    /// # Returns
    /// `None` if the cell is empty or the coordinates are outside the chunk.
    pub fn voxel_at(&self, x: usize, y: usize, z: usize) -> Option<&Voxel> {
        if x >= CHUNK_LENGTH || y >= CHUNK_HEIGHT || z >= CHUNK_LENGTH {
            return None;
        }
        let index = flat_index(x, y, z);
        if self.presence[index] {
            Some(&self.voxels[index])
        } else {
            None
        }
    }

    /// Iterates over every present voxel, in flat buffer order.
    pub fn voxels(&self) -> impl Iterator<Item = &Voxel> + '_ {
        self.presence.iter_ones().map(move |index| &self.voxels[index])
    }

    pub fn voxel_count(&self) -> usize {
        self.presence.count_ones()
    }

    /// Builds the render instances for every present voxel.
    ///
    /// # Arguments
    /// * `coloring` - Whether to use the chunk debug colour or the per-type palette
    pub fn render_instances(&self, coloring: VoxelColoring) -> Vec<VoxelInstance> {
        self.voxels()
            .map(|voxel| {
                let color = match coloring {
                    VoxelColoring::ChunkDebug => self.debug_color,
                    VoxelColoring::Palette => voxel.palette_color(),
                };
                VoxelInstance::new(voxel.world_position(self.world_position), color)
            })
            .collect()
    }
}
