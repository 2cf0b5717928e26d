//! Drawable shape descriptors
//!
//! The actual mesh data lives in the render backend. The scene graph only
//! carries a descriptor with a per-axis size; the reported bounding extent is
//! used for pivot-correction translation (rotating a limb "at the joint"
//! rather than around its center).

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// RGB color, each channel in 0.0..=1.0
pub type Color = [f32; 3];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Cube { size: Vec3 },
    Sphere { size: Vec3 },
    Cone { size: Vec3 },
}

impl Shape {
    /// Bounding extent of the shape along each local axis
    pub fn extent(&self) -> Vec3 {
        match *self {
            Shape::Cube { size } | Shape::Sphere { size } | Shape::Cone { size } => size,
        }
    }

    /// Pivot-correction pair (inner, outer) shifting rotations to the shape's
    /// -z end so a limb swings at the joint instead of its center.
    pub fn limb_pivot(&self) -> (Mat4, Mat4) {
        let z = self.extent().z;
        (
            Mat4::from_translation(Vec3::new(0.0, 0.0, z)),
            Mat4::from_translation(Vec3::new(0.0, 0.0, -z)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_extent_reports_size() {
        let shape = Shape::Cube {
            size: Vec3::new(1.0, 2.0, 3.0),
        };
        assert_eq!(shape.extent(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_limb_pivot_cancels_out() {
        let shape = Shape::Sphere {
            size: Vec3::new(0.5, 0.5, 0.8),
        };
        let (inner, outer) = shape.limb_pivot();
        let p = Vec4::new(0.1, 0.2, 0.3, 1.0);
        let round_trip = outer * inner * p;
        assert!((round_trip - p).length() < 1e-6);
    }
}
