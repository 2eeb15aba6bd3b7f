//! # Voxel World Model
//!
//! This module contains the voxel data the rest of the engine culls and renders.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Gradient noise**: Deterministic 3D Perlin noise used for terrain height
//! * **Terrain**: Maps world columns to surface heights through the noise field
//! * **Voxel**: Compact per-voxel records and their colours
//! * **Chunk**: Fixed-size columns of voxels with a precomputed bounding box
//! * **World**: The directory of every chunk, keyed by chunk id
//!
//! ## Data Flow
//!
//! 1. `World::generate` walks the chunk grid around the origin
//! 2. Each chunk asks the `TerrainSampler` for the surface height of every column
//! 3. The finished chunk stores its voxels and a bounding box that never changes
//! 4. Each frame the camera state tests those bounding boxes against the frustum
//!
//! All voxel data is immutable after startup.

pub mod chunk;
pub mod gradient_noise;
pub mod terrain;
pub mod voxel;
pub mod world;
