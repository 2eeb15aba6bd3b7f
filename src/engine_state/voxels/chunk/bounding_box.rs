//! # Bounding Box Module
//!
//! Axis-aligned bounding boxes used to test chunks against the view frustum.

use cgmath::{EuclideanSpace, Point3, Vector3};

/// An axis-aligned bounding box defined by its minimum and maximum corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    /// Corner with the smallest coordinate on every axis
    pub min: Point3<f32>,
    /// Corner with the largest coordinate on every axis
    pub max: Point3<f32>,
}

impl BoundingBox {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "bounding box min {:?} exceeds max {:?}",
            min,
            max
        );
        BoundingBox { min, max }
    }

    /// Builds a box from its centre and half extents.
    pub fn from_center(center: Point3<f32>, half_extents: Vector3<f32>) -> Self {
        BoundingBox::new(center - half_extents, center + half_extents)
    }

    pub fn center(&self) -> Point3<f32> {
        Point3::midpoint(self.min, self.max)
    }

    /// Half of the box's size along each axis.
    pub fn half_extents(&self) -> Vector3<f32> {
        (self.max - self.min) / 2.0
    }

    /// Returns a copy of this box moved by `offset`.
    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        BoundingBox {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Checks whether `point` lies inside or on the surface of the box.
    pub fn contains(&self, point: Point3<f32>) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// All eight corners, used by debug drawing and tests.
    pub fn corners(&self) -> [Point3<f32>; 8] {
        let (min, max) = (self.min, self.max);
        [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(min.x, max.y, max.z),
            Point3::new(max.x, max.y, max.z),
        ]
    }
}
