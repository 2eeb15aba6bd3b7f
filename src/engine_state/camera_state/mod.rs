//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera pose tracking (position, target, up, field of view)
//! - Viewport size and aspect ratio tracking
//! - Per-frame frustum extraction
//! - Chunk visibility tests against the current frustum
//!
//! ## Core Components
//! - `Camera`: The look-at camera pose, written by the input layer each frame
//! - `Frustum`: Six world-space planes derived from the camera and viewport
//! - `CameraState`: Owns both and keeps the frustum in step with the pose
//!
//! ## Frame order
//! The input layer finalises the camera pose, then `update_frustum` recomputes the
//! planes, then chunks are tested with `is_viewable`.

use camera::Camera;
use frustum::{Frustum, FrustumSettings};
use log::{debug, warn};

use crate::engine_state::voxels::chunk::BoundingBox;

pub mod camera;
pub mod frustum;

/// Owns the camera, the viewport dimensions and the latest frustum.
///
/// # Fields
/// - `camera`: The current camera pose
/// - `frustum`: Planes computed from the camera at the last `update_frustum`
/// - `settings`: Near/far distances and culling toggle
/// - `viewport`: Width and height of the render target in pixels
pub struct CameraState {
    camera: Camera,
    frustum: Frustum,
    settings: FrustumSettings,
    viewport: (u32, u32),
}

impl CameraState {
    /// Creates a new CameraState and extracts its first frustum.
    ///
    /// # Arguments
    /// * `camera` - Initial camera pose
    /// * `settings` - Frustum extraction settings
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    ///
    /// # Panics
    /// Panics if either viewport dimension is zero.
    pub fn new(camera: Camera, settings: FrustumSettings, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "viewport must be non-empty, got {}x{}",
            width,
            height
        );
        let aspect = width as f32 / height as f32;
        let frustum = Frustum::from_camera(&camera, aspect, &settings);

        CameraState {
            camera,
            frustum,
            settings,
            viewport: (width, height),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access for the input layer to move the camera.
    ///
    /// Changes take effect at the next `update_frustum`.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The frustum computed by the last `update_frustum`.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn settings(&self) -> &FrustumSettings {
        &self.settings
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Viewport width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1 as f32
    }

    /// Records a new viewport size.
    ///
    /// Zero-sized viewports (a minimised window) are ignored so the aspect ratio stays
    /// valid; the previous size is kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            warn!("Ignoring resize to empty viewport {}x{}", width, height);
            return;
        }
        debug!("Viewport resized to {}x{}", width, height);
        self.viewport = (width, height);
    }

    /// Recomputes the frustum from the current camera pose and viewport.
    ///
    /// Call once per frame after the camera pose is final and before culling.
    pub fn update_frustum(&mut self) -> &Frustum {
        self.frustum = Frustum::from_camera(&self.camera, self.aspect_ratio(), &self.settings);
        &self.frustum
    }

    /// Tests a bounding box against the current frustum.
    pub fn is_viewable(&self, bounding_box: &BoundingBox) -> bool {
        self.frustum.viewable(bounding_box)
    }
}
