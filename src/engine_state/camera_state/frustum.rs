//! # Frustum Module
//!
//! Extracts the six world-space planes of a perspective camera's view volume and
//! classifies axis-aligned boxes against them.
//!
//! ## Plane convention
//!
//! A plane stores a unit `normal` and a scalar `distance` such that
//! `dot(normal, p) - distance` is the signed distance of `p` from the plane. Every
//! frustum plane's normal points into the view volume, so a point is inside the frustum
//! when its signed distance to all six planes is non-negative.
//!
//! ## Side planes
//!
//! All four side planes pass through the eye. Their normals are found by rotating the
//! view direction by `±(half_angle - 90°)`: about the camera right axis for top and
//! bottom, and about the camera up axis for left and right. The horizontal half angle is
//! `atan(tan(half_fov_y) * aspect)`, so wide viewports get wider side planes.

use cgmath::{Deg, InnerSpace, Matrix3, Point3, Rad, Vector3};
use log::trace;

use crate::engine_state::voxels::chunk::BoundingBox;

use super::camera::Camera;

/// Default distance from the eye to the near plane.
pub const DEFAULT_NEAR_DISTANCE: f32 = 0.1;
/// Default distance from the eye to the far plane.
pub const DEFAULT_FAR_DISTANCE: f32 = 50.0;

/// Result of testing a box against a single plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intersection {
    /// The box lies entirely on the negative (exterior) side.
    Outside,
    /// The box lies entirely on the positive (interior) side.
    Inside,
    /// The box straddles the plane.
    Intersecting,
}

/// A half-space boundary: unit normal plus signed offset from the origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal, pointing toward the positive side
    pub normal: Vector3<f32>,
    /// `dot(normal, p)` for any point `p` on the plane
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vector3<f32>, distance: f32) -> Self {
        Plane { normal, distance }
    }

    /// Builds the plane with the given unit normal passing through `point`.
    pub fn from_point(normal: Vector3<f32>, point: Point3<f32>) -> Self {
        Plane {
            normal,
            distance: normal.dot(point_to_vec(point)),
        }
    }

    /// Signed distance of `point` from the plane, positive on the normal side.
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(point_to_vec(point)) - self.distance
    }

    /// Classifies a bounding box against this plane.
    ///
    /// Projects the box's half extents onto the normal to get its effective radius, then
    /// compares that radius with the signed distance of the box centre.
    pub fn classify(&self, bounding_box: &BoundingBox) -> Intersection {
        let center = bounding_box.center();
        let half = bounding_box.half_extents();

        let radius = (half.x * self.normal.x).abs()
            + (half.y * self.normal.y).abs()
            + (half.z * self.normal.z).abs();
        let signed_distance = self.signed_distance(center);

        if signed_distance - radius > 0.0 {
            Intersection::Inside
        } else if signed_distance + radius < 0.0 {
            Intersection::Outside
        } else {
            Intersection::Intersecting
        }
    }
}

fn point_to_vec(point: Point3<f32>) -> Vector3<f32> {
    Vector3::new(point.x, point.y, point.z)
}

/// Parameters of frustum extraction and culling that do not come from the camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrustumSettings {
    /// Distance from the eye to the near plane
    pub near_distance: f32,
    /// Distance from the eye to the far plane
    pub far_distance: f32,
    /// Whether `Frustum::viewable` also tests the near and far planes
    pub cull_near_far: bool,
}

impl Default for FrustumSettings {
    fn default() -> Self {
        FrustumSettings {
            near_distance: DEFAULT_NEAR_DISTANCE,
            far_distance: DEFAULT_FAR_DISTANCE,
            cull_near_far: false,
        }
    }
}

/// The six inward-facing world-space planes bounding a camera's view volume.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frustum {
    pub near: Plane,
    pub far: Plane,
    pub left: Plane,
    pub right: Plane,
    pub top: Plane,
    pub bottom: Plane,
    /// Copied from the settings used to extract this frustum
    pub cull_near_far: bool,
}

impl Frustum {
    /// Extracts the frustum of `camera` for a viewport with the given aspect ratio.
    ///
    /// # Arguments
    /// * `camera` - The camera pose for this frame
    /// * `aspect_ratio` - Viewport width divided by height
    /// * `settings` - Near/far distances and near/far culling toggle
    ///
    /// # Panics
    /// Panics on a degenerate pose (see `Camera::validate`) or a non-positive aspect ratio.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxel_frustum::engine_state::camera_state::{
    ///     camera::Camera,
    ///     frustum::{Frustum, FrustumSettings},
    /// };
    /// use voxel_frustum::engine_state::voxels::chunk::BoundingBox;
    /// use cgmath::Vector3;
    ///
    /// let camera = Camera::default();
    /// let frustum = Frustum::from_camera(&camera, 800.0 / 600.0, &FrustumSettings::default());
    /// let bb = BoundingBox::from_center(camera.target, Vector3::new(0.5, 0.5, 0.5));
    /// assert!(frustum.viewable(&bb));
    /// ```
    pub fn from_camera(camera: &Camera, aspect_ratio: f32, settings: &FrustumSettings) -> Self {
        camera.validate();
        assert!(
            aspect_ratio.is_finite() && aspect_ratio > 0.0,
            "aspect ratio must be positive, got {}",
            aspect_ratio
        );

        let forward = camera.forward();
        let right = camera.right();
        let up = camera.orthonormal_up();

        let half_fov_y = Rad::from(camera.fov_y) / 2.0;
        let half_fov_x = Rad((half_fov_y.0.tan() * aspect_ratio).atan());
        let quarter_turn = Rad::from(Deg(90.0f32));

        let near_point = camera.position + forward * settings.near_distance;
        let far_point = camera.position + forward * settings.far_distance;

        let rotate = |axis: Vector3<f32>, angle: Rad<f32>| -> Vector3<f32> {
            (Matrix3::from_axis_angle(axis, angle) * forward).normalize()
        };

        let top_normal = rotate(right, half_fov_y - quarter_turn);
        let bottom_normal = rotate(right, quarter_turn - half_fov_y);
        let left_normal = rotate(up, half_fov_x - quarter_turn);
        let right_normal = rotate(up, quarter_turn - half_fov_x);

        let frustum = Frustum {
            near: Plane::new(forward, forward.dot(point_to_vec(near_point))),
            far: Plane::new(-forward, -forward.dot(point_to_vec(far_point))),
            left: Plane::from_point(left_normal, camera.position),
            right: Plane::from_point(right_normal, camera.position),
            top: Plane::from_point(top_normal, camera.position),
            bottom: Plane::from_point(bottom_normal, camera.position),
            cull_near_far: settings.cull_near_far,
        };
        trace!("Extracted frustum {:?}", frustum);
        frustum
    }

    /// The four side planes, in left, right, top, bottom order.
    pub fn side_planes(&self) -> [&Plane; 4] {
        [&self.left, &self.right, &self.top, &self.bottom]
    }

    /// All six planes with their names, for debug output.
    pub fn named_planes(&self) -> [(&'static str, &Plane); 6] {
        [
            ("left", &self.left),
            ("right", &self.right),
            ("near", &self.near),
            ("far", &self.far),
            ("top", &self.top),
            ("bottom", &self.bottom),
        ]
    }

    /// Decides whether any part of `bounding_box` may be visible.
    ///
    /// A box is rejected only when it is entirely outside one of the tested planes, so the
    /// test never hides a box that is actually in view. The near and far planes are only
    /// tested when `cull_near_far` is set.
    pub fn viewable(&self, bounding_box: &BoundingBox) -> bool {
        let outside = |plane: &Plane| plane.classify(bounding_box) == Intersection::Outside;

        if self.side_planes().into_iter().any(outside) {
            return false;
        }
        !(self.cull_near_far && (outside(&self.near) || outside(&self.far)))
    }

    /// Checks whether a point lies inside all planes that `viewable` tests.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        let inside = |plane: &Plane| plane.signed_distance(point) >= 0.0;
        self.side_planes().into_iter().all(inside)
            && (!self.cull_near_far || (inside(&self.near) && inside(&self.far)))
    }
}

#[cfg(test)]
mod tests {
    use cgmath::EuclideanSpace;

    use super::*;

    fn unit_box_at(center: Point3<f32>) -> BoundingBox {
        BoundingBox::from_center(center, Vector3::new(0.5, 0.5, 0.5))
    }

    fn level_camera(fov_y: f32) -> Camera {
        Camera::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 10.0),
            Deg(fov_y),
        )
    }

    fn settings(cull_near_far: bool) -> FrustumSettings {
        FrustumSettings {
            cull_near_far,
            ..FrustumSettings::default()
        }
    }

    #[test]
    fn classify_box_on_normal_side_is_inside() {
        let plane = Plane::new(Vector3::unit_y(), 0.0);
        assert_eq!(
            plane.classify(&unit_box_at(Point3::new(0.0, 2.0, 0.0))),
            Intersection::Inside
        );
    }

    #[test]
    fn classify_box_on_opposite_side_is_outside() {
        let plane = Plane::new(Vector3::unit_y(), 0.0);
        assert_eq!(
            plane.classify(&unit_box_at(Point3::new(3.0, -2.0, 1.0))),
            Intersection::Outside
        );
    }

    #[test]
    fn classify_box_straddling_plane_is_intersecting() {
        let plane = Plane::new(Vector3::unit_y(), 0.0);
        assert_eq!(
            plane.classify(&unit_box_at(Point3::new(0.0, 0.2, 0.0))),
            Intersection::Intersecting
        );
    }

    #[test]
    fn classify_accounts_for_plane_offset() {
        let plane = Plane::new(Vector3::unit_y(), 5.0);
        assert_eq!(
            plane.classify(&unit_box_at(Point3::new(0.0, 2.0, 0.0))),
            Intersection::Outside
        );
        assert_eq!(
            plane.classify(&unit_box_at(Point3::new(0.0, 7.0, 0.0))),
            Intersection::Inside
        );
        assert_eq!(
            plane.classify(&unit_box_at(Point3::new(0.0, 5.3, 0.0))),
            Intersection::Intersecting
        );
    }

    #[test]
    fn classify_uses_projected_radius_for_tilted_planes() {
        let normal = Vector3::new(1.0, 1.0, 0.0).normalize();
        let plane = Plane::new(normal, 0.0);
        // Centre is 0.6 from the plane but the corner reaches 0.707 across it.
        let center = Point3::from_vec(normal * 0.6);
        assert_eq!(plane.classify(&unit_box_at(center)), Intersection::Intersecting);
        let center = Point3::from_vec(normal * 0.8);
        assert_eq!(plane.classify(&unit_box_at(center)), Intersection::Inside);
    }

    #[test]
    fn normals_are_unit_and_point_inward() {
        let camera = Camera::default();
        let frustum = Frustum::from_camera(&camera, 4.0 / 3.0, &settings(true));
        let interior = camera.position + camera.forward() * 10.0;

        for (name, plane) in frustum.named_planes() {
            assert!(
                (plane.normal.magnitude() - 1.0).abs() < 1e-5,
                "{} normal is not unit",
                name
            );
            assert!(
                plane.signed_distance(interior) > 0.0,
                "{} plane faces away from the interior",
                name
            );
        }
    }

    #[test]
    fn side_planes_pass_through_eye() {
        let camera = Camera::default();
        let frustum = Frustum::from_camera(&camera, 1.5, &FrustumSettings::default());
        for plane in frustum.side_planes() {
            assert!(plane.signed_distance(camera.position).abs() < 1e-4);
        }
    }

    #[test]
    fn near_and_far_planes_sit_at_configured_distances() {
        let camera = level_camera(45.0);
        let frustum = Frustum::from_camera(&camera, 1.0, &FrustumSettings::default());
        assert!((frustum.near.distance - DEFAULT_NEAR_DISTANCE).abs() < 1e-6);
        assert!((frustum.far.distance + DEFAULT_FAR_DISTANCE).abs() < 1e-4);
        assert_eq!(frustum.far.normal, -frustum.near.normal);
        assert!(frustum.near.signed_distance(Point3::new(0.0, 0.0, 0.05)) < 0.0);
        assert!(frustum.far.signed_distance(Point3::new(0.0, 0.0, 60.0)) < 0.0);
    }

    #[test]
    fn level_camera_side_normals_match_half_angles() {
        let camera = level_camera(90.0);
        let frustum = Frustum::from_camera(&camera, 1.0, &FrustumSettings::default());
        let s = std::f32::consts::FRAC_1_SQRT_2;

        let expect = |plane: &Plane, normal: Vector3<f32>| {
            assert!(
                (plane.normal - normal).magnitude() < 1e-5,
                "{:?} != {:?}",
                plane.normal,
                normal
            );
        };
        expect(&frustum.top, Vector3::new(0.0, -s, s));
        expect(&frustum.bottom, Vector3::new(0.0, s, s));
        expect(&frustum.left, Vector3::new(-s, 0.0, s));
        expect(&frustum.right, Vector3::new(s, 0.0, s));
    }

    #[test]
    fn box_at_target_is_viewable_under_default_pose() {
        let camera = Camera::default();
        let frustum = Frustum::from_camera(&camera, 800.0 / 600.0, &FrustumSettings::default());
        assert!(frustum.viewable(&unit_box_at(camera.target)));
    }

    #[test]
    fn box_far_to_the_side_is_not_viewable() {
        let camera = Camera::default();
        let frustum = Frustum::from_camera(&camera, 800.0 / 600.0, &FrustumSettings::default());
        let bb = unit_box_at(camera.target);
        assert!(!frustum.viewable(&bb.translated(Vector3::new(10_000.0, 0.0, 0.0))));
        assert!(!frustum.viewable(&bb.translated(Vector3::new(-10_000.0, 0.0, 0.0))));
    }

    #[test]
    fn box_behind_camera_is_not_viewable() {
        let camera = level_camera(45.0);
        let frustum = Frustum::from_camera(&camera, 1.0, &FrustumSettings::default());
        assert!(!frustum.viewable(&unit_box_at(Point3::new(0.0, 0.0, -20.0))));
    }

    #[test]
    fn horizontal_planes_use_aspect_corrected_angle() {
        let camera = level_camera(45.0);
        // 30 degrees to the side: outside a square 45 degree frustum, inside a 2:1 one.
        let (sin, cos) = Rad::from(Deg(30.0f32)).0.sin_cos();
        let point = Point3::from_vec(Vector3::new(sin, 0.0, cos) * 20.0);
        let bb = BoundingBox::from_center(point, Vector3::new(0.01, 0.01, 0.01));

        let square = Frustum::from_camera(&camera, 1.0, &FrustumSettings::default());
        assert!(!square.viewable(&bb));

        let wide = Frustum::from_camera(&camera, 2.0, &FrustumSettings::default());
        assert!(wide.viewable(&bb));

        // The vertical extent does not change with aspect ratio.
        let above = Point3::from_vec(Vector3::new(0.0, sin, cos) * 20.0);
        let bb = BoundingBox::from_center(above, Vector3::new(0.01, 0.01, 0.01));
        assert!(!wide.viewable(&bb));
    }

    #[test]
    fn near_far_culling_is_opt_in() {
        let camera = level_camera(45.0);
        let beyond_far = unit_box_at(Point3::new(0.0, 0.0, 100.0));

        let default = Frustum::from_camera(&camera, 1.0, &FrustumSettings::default());
        assert!(default.viewable(&beyond_far));

        let culling = Frustum::from_camera(&camera, 1.0, &settings(true));
        assert!(!culling.viewable(&beyond_far));
        assert!(culling.viewable(&unit_box_at(Point3::new(0.0, 0.0, 25.0))));
    }

    #[test]
    fn turned_camera_follows_its_heading() {
        let camera = Camera::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Deg(45.0),
        );
        let frustum = Frustum::from_camera(&camera, 1.0, &FrustumSettings::default());
        assert!(frustum.viewable(&unit_box_at(Point3::new(20.0, 0.0, 0.0))));
        assert!(!frustum.viewable(&unit_box_at(Point3::new(-20.0, 0.0, 0.0))));
        assert!(!frustum.viewable(&unit_box_at(Point3::new(0.0, 0.0, 20.0))));
    }

    #[test]
    fn viewable_never_rejects_boxes_around_visible_points() {
        let mut rng = fastrand::Rng::with_seed(42);
        let poses = [
            Camera::default(),
            level_camera(70.0),
            Camera::new(
                Point3::new(5.0, 30.0, -4.0),
                Point3::new(-3.0, 2.0, 12.0),
                Deg(60.0),
            ),
        ];

        for camera in poses.iter() {
            for &aspect in &[0.5f32, 1.0, 16.0 / 9.0] {
                let frustum = Frustum::from_camera(camera, aspect, &settings(true));
                let half_y = Rad::from(camera.fov_y).0 / 2.0;
                let half_x = (half_y.tan() * aspect).atan();
                let (f, r, u) = (camera.forward(), camera.right(), camera.orthonormal_up());

                for _ in 0..500 {
                    let depth = 1.0 + rng.f32() * 45.0;
                    let sx = (rng.f32() * 2.0 - 1.0) * half_x.tan() * 0.99;
                    let sy = (rng.f32() * 2.0 - 1.0) * half_y.tan() * 0.99;
                    let point = camera.position + (f + r * sx + u * sy) * depth;

                    assert!(frustum.contains_point(point), "{:?} should be inside", point);
                    let bb = BoundingBox::from_center(point, Vector3::new(0.25, 3.0, 0.25));
                    assert!(frustum.viewable(&bb), "box around {:?} was culled", point);
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "aspect ratio")]
    fn rejects_zero_aspect_ratio() {
        Frustum::from_camera(&Camera::default(), 0.0, &FrustumSettings::default());
    }
}
