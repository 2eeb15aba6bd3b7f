//! # Voxel Module
//!
//! This module provides the voxel data structure stored in chunks, the per-type render
//! palette, and the packed instance record handed to the renderer.

use cgmath::{Point3, Vector3};
use phf::phf_map;
use voxel_type::VoxelType;

pub mod voxel_type;

/// The underlying integer type used to represent voxel types in memory.
pub type VoxelTypeSize = u8;

/// An RGBA colour with 8 bits per channel.
pub type Rgba = [u8; 4];

/// Render colour for each voxel type, keyed by the compact type tag.
pub static VOXEL_TYPE_COLORS: phf::Map<VoxelTypeSize, Rgba> = phf_map! {
    1u8 => [86, 160, 52, 255],  // Grass
    2u8 => [121, 85, 58, 255],  // Dirt
};

/// Colour used for unknown tags and for voxel outlines.
pub const VOXEL_OUTLINE_COLOR: Rgba = [0, 0, 0, 255];

/// A single voxel placed in a chunk.
///
/// Voxels are immutable once placed. The position is the local offset within the owning
/// chunk, so it always fits in a byte per axis.
///
/// # Memory Layout
/// `#[repr(C)]` keeps the four bytes tightly packed so whole chunk buffers can be cast
/// with `bytemuck`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Voxel {
    /// Local `[x, y, z]` offset of this voxel inside its chunk.
    pub position: [u8; 3],
    /// The type of this voxel, encoded as a `VoxelTypeSize`.
    pub voxel_type: VoxelTypeSize,
}

impl Voxel {
    /// Creates a new voxel of the given type at a local chunk offset.
    pub fn new(position: Point3<u8>, voxel_type: VoxelType) -> Self {
        Voxel {
            position: [position.x, position.y, position.z],
            voxel_type: voxel_type.tag(),
        }
    }

    /// Gets the local chunk offset as a point.
    pub fn local_position(&self) -> Point3<u8> {
        Point3::new(self.position[0], self.position[1], self.position[2])
    }

    /// Gets the voxel type, if the stored tag is a known one.
    pub fn voxel_type(&self) -> Option<VoxelType> {
        VoxelType::from_tag(self.voxel_type)
    }

    /// Computes the world-space centre of this voxel for a chunk anchored at `origin`.
    pub fn world_position(&self, origin: Point3<f32>) -> Point3<f32> {
        origin
            + Vector3::new(
                self.position[0] as f32,
                self.position[1] as f32,
                self.position[2] as f32,
            )
    }

    /// Looks up the palette colour for this voxel's type.
    pub fn palette_color(&self) -> Rgba {
        VOXEL_TYPE_COLORS
            .get(&self.voxel_type)
            .copied()
            .unwrap_or(VOXEL_OUTLINE_COLOR)
    }
}

/// A voxel ready to be drawn: world-space centre plus colour.
///
/// Laid out for direct upload as a GPU instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VoxelInstance {
    /// World-space centre of the unit cube
    pub position: [f32; 3],
    /// RGBA colour
    pub color: Rgba,
}

impl VoxelInstance {
    pub fn new(position: Point3<f32>, color: Rgba) -> Self {
        VoxelInstance {
            position: position.into(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voxel_is_four_bytes() {
        assert_eq!(std::mem::size_of::<Voxel>(), 4);
        assert_eq!(std::mem::size_of::<VoxelInstance>(), 16);
    }

    #[test]
    fn world_position_offsets_origin() {
        let voxel = Voxel::new(Point3::new(3, 7, 15), VoxelType::Grass);
        let world = voxel.world_position(Point3::new(-16.0, 0.0, 32.0));
        assert_eq!(world, Point3::new(-13.0, 7.0, 47.0));
    }

    #[test]
    fn palette_covers_every_type() {
        for voxel_type in [VoxelType::Grass, VoxelType::Dirt] {
            let voxel = Voxel::new(Point3::new(0, 0, 0), voxel_type);
            assert_ne!(voxel.palette_color(), VOXEL_OUTLINE_COLOR);
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_outline_color() {
        let voxel = Voxel {
            position: [0, 0, 0],
            voxel_type: 99,
        };
        assert_eq!(voxel.voxel_type(), None);
        assert_eq!(voxel.palette_color(), VOXEL_OUTLINE_COLOR);
    }

    #[test]
    fn instances_cast_to_bytes() {
        let instances = [
            VoxelInstance::new(Point3::new(1.0, 2.0, 3.0), [1, 2, 3, 4]),
            VoxelInstance::new(Point3::new(4.0, 5.0, 6.0), [5, 6, 7, 8]),
        ];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[12..16], &[1, 2, 3, 4]);
    }
}
