//! # Voxel Type Module
//!
//! This module defines the different kinds of voxels that can be placed in a chunk,
//! and the conversion from the compact storage tag back to the rich enum.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::VoxelTypeSize;

/// Enumerates the voxel kinds the terrain sampler can place.
///
/// The discriminant is the compact tag stored in [`super::Voxel`]. Zero is reserved so an
/// all-zero voxel never masquerades as a real one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum VoxelType {
    /// Grass topped surface voxel. The only type terrain generation currently places.
    Grass = 1,

    /// Plain dirt.
    Dirt = 2,
}

impl VoxelType {
    /// Converts a compact tag to a `VoxelType`.
    ///
    /// # Returns
    /// `None` if the tag does not name a known type.
    pub fn from_tag(tag: VoxelTypeSize) -> Option<Self> {
        FromPrimitive::from_u8(tag)
    }

    /// Returns the compact tag stored for this type.
    pub fn tag(self) -> VoxelTypeSize {
        self as VoxelTypeSize
    }
}
