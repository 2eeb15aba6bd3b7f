//! # Chunk Creation Module
//!
//! This module provides the builder used to populate a chunk before it is sealed.
//!
//! A chunk's voxel grid and bounding box are only writable through `ChunkBuilder`.
//! Calling `finish` computes the bounding box once and hands back an immutable `Chunk`;
//! nothing can change the chunk after that point.

use bitvec::{bitvec, vec::BitVec};
use bytemuck::Zeroable;
use cgmath::Point3;

use crate::engine_state::voxels::voxel::{voxel_type::VoxelType, Rgba, Voxel};

use super::{
    bounding_box::BoundingBox, chunk_id::ChunkId, flat_index, Chunk, CHUNK_HEIGHT, CHUNK_LENGTH,
    CHUNK_SIZE,
};

/// A builder for creating and populating chunks.
///
/// Cells live in a flat stride-indexed buffer (`x + z * L + y * L * L`). A parallel bit
/// vector marks which cells hold a voxel; unmarked cells are empty and their buffer slot
/// is never read.
pub struct ChunkBuilder {
    /// World-space origin of the chunk on the X axis
    origin_x: i32,
    /// World-space origin of the chunk on the Z axis
    origin_z: i32,
    /// One bit per cell, set when the cell holds a voxel
    presence: BitVec,
    /// Voxel storage for every cell, indexed by `flat_index`
    voxels: Vec<Voxel>,
    /// Colour used when drawing this chunk in debug colouring mode
    debug_color: Rgba,
}

impl ChunkBuilder {
    /// Creates a builder for an empty chunk anchored at `(origin_x, origin_z)`.
    ///
    /// # Arguments
    /// * `origin_x` - World X of the chunk origin, a multiple of `CHUNK_LENGTH`
    /// * `origin_z` - World Z of the chunk origin, a multiple of `CHUNK_LENGTH`
    /// * `rng` - Source for the chunk's random debug colour
    pub fn new(origin_x: i32, origin_z: i32, rng: &mut fastrand::Rng) -> Self {
        ChunkBuilder {
            origin_x,
            origin_z,
            presence: bitvec![0; CHUNK_SIZE],
            voxels: vec![Voxel::zeroed(); CHUNK_SIZE],
            debug_color: [rng.u8(..), rng.u8(..), rng.u8(..), 255],
        }
    }

    /// Places a voxel at a local chunk offset, replacing any voxel already there.
    ///
    /// # Panics
    /// Panics if the offset lies outside the chunk.
    pub fn place(&mut self, local: Point3<u8>, voxel_type: VoxelType) {
        let (x, y, z) = (local.x as usize, local.y as usize, local.z as usize);
        assert!(
            x < CHUNK_LENGTH && y < CHUNK_HEIGHT && z < CHUNK_LENGTH,
            "voxel offset {:?} is outside the chunk",
            local
        );

        let index = flat_index(x, y, z);
        self.voxels[index] = Voxel::new(local, voxel_type);
        self.presence.set(index, true);
    }

    /// Seals the builder into a `Chunk`.
    ///
    /// The bounding box spans the full configured height regardless of which cells are
    /// filled. Voxels are unit cubes centred on integer positions, so the box reaches half
    /// a unit past the outermost cell centres.
    pub fn finish(self) -> Chunk {
        let world_position = Point3::new(self.origin_x as f32, 0.0, self.origin_z as f32);

        let bounding_box = BoundingBox::new(
            Point3::new(world_position.x - 0.5, -0.5, world_position.z - 0.5),
            Point3::new(
                world_position.x + CHUNK_LENGTH as f32 - 0.5,
                CHUNK_HEIGHT as f32 - 0.5,
                world_position.z + CHUNK_LENGTH as f32 - 0.5,
            ),
        );

        Chunk {
            id: ChunkId::from_origin(self.origin_x, self.origin_z),
            world_position,
            bounding_box,
            presence: self.presence,
            voxels: self.voxels,
            debug_color: self.debug_color,
        }
    }
}
