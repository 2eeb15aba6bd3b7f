//! # Camera Implementation
//!
//! This module contains the look-at camera whose pose drives frustum extraction.
//!
//! The camera is a plain pose: position, look-at target, up vector and vertical field
//! of view. Moving it is the job of the input layer, which writes the public fields
//! directly once per frame.

use cgmath::*;

use crate::engine_state::voxels::chunk::MID_HEIGHT;

/// World-space forward direction used as the zero heading.
pub const WORLD_FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);
/// World-space up direction.
pub const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Below this length a direction vector is considered degenerate.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// The projection model of a camera. Only perspective projection is supported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    Perspective,
}

/// Represents a look-at camera in 3D space.
///
/// # Fields
/// - `position`: The eye position in world space
/// - `target`: The point the camera looks at
/// - `up`: The unit up vector; must never be parallel to the view direction
/// - `fov_y`: Vertical field of view
/// - `projection`: Projection model
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// The eye position in world space
    pub position: Point3<f32>,
    /// The point the camera looks at
    pub target: Point3<f32>,
    /// Unit up vector
    pub up: Vector3<f32>,
    /// Vertical field of view
    pub fov_y: Deg<f32>,
    /// Projection model
    pub projection: Projection,
}

impl Default for Camera {
    /// Ten units above mid terrain height at the origin, looking down toward +Z.
    fn default() -> Self {
        Camera::new(
            Point3::new(0.0, MID_HEIGHT as f32 + 10.0, 0.0),
            Point3::new(0.0, MID_HEIGHT as f32, 10.0),
            Deg(45.0),
        )
    }
}

impl Camera {
    /// Creates a perspective camera with world up.
    ///
    /// # Arguments
    /// * `position` - Eye position in world space
    /// * `target` - Look-at point in world space
    /// * `fov_y` - Vertical field of view, anything convertible to `Deg<f32>`
    pub fn new<F: Into<Deg<f32>>>(position: Point3<f32>, target: Point3<f32>, fov_y: F) -> Self {
        Camera {
            position,
            target,
            up: WORLD_UP,
            fov_y: fov_y.into(),
            projection: Projection::Perspective,
        }
    }

    /// Gets the normalized view direction `target - position`.
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }

    /// Gets the normalized right vector `forward x up`.
    pub fn right(&self) -> Vector3<f32> {
        self.forward().cross(self.up).normalize()
    }

    /// Gets the up vector re-orthogonalised against the view direction.
    ///
    /// Equal to `up` whenever `up` is perpendicular to the view direction.
    pub fn orthonormal_up(&self) -> Vector3<f32> {
        self.right().cross(self.forward())
    }

    /// Checks the caller contract for frustum extraction.
    ///
    /// # Panics
    /// - if `target` coincides with `position`
    /// - if `up` is zero or parallel to the view direction
    /// - if `fov_y` is not strictly between 0 and 180 degrees
    pub fn validate(&self) {
        assert!(
            self.fov_y.0 > 0.0 && self.fov_y.0 < 180.0,
            "camera fov_y must be in (0, 180) degrees, got {:?}",
            self.fov_y
        );

        let view = self.target - self.position;
        assert!(
            view.magnitude() > DEGENERATE_EPSILON,
            "camera target {:?} coincides with position {:?}",
            self.target,
            self.position
        );
        assert!(
            self.up.magnitude() > DEGENERATE_EPSILON,
            "camera up vector is zero"
        );
        assert!(
            view.normalize().cross(self.up.normalize()).magnitude() > DEGENERATE_EPSILON,
            "camera up {:?} is parallel to the view direction {:?}",
            self.up,
            view
        );
    }
}

/// Returns the angle in degrees between the XZ projection of `view` and world forward.
///
/// Vertical view vectors have no heading and return zero.
pub fn horizontal_angle_to_forward(view: Vector3<f32>) -> Deg<f32> {
    let flat = Vector2::new(view.x, view.z);
    if flat.magnitude() <= DEGENERATE_EPSILON {
        return Deg(0.0);
    }
    let forward = Vector2::new(WORLD_FORWARD.x, WORLD_FORWARD.z);
    Deg::from(flat.normalize().angle(forward))
}
