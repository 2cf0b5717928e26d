//! Transform node: local translation, rotation, and scale with a cached
//! world matrix
//!
//! The local matrix composes as
//! `T * post_correction * out_pivot * Ru * Rv * Rw * in_pivot * pre_correction * S`.
//! When an orientation quaternion is set it replaces the three Euler rotation
//! matrices for this node only; descendants keep their own rotation source.

use glam::{Mat4, Quat, Vec3};

use crate::axis::Axis;
use crate::error::SceneError;
use crate::graph::NodeId;
use crate::shape::{Color, Shape};

/// Inclusive `[min, max]` rotation range for one axis, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleExtent {
    pub min: f32,
    pub max: f32,
}

impl AngleExtent {
    pub fn clamp(&self, angle: f32) -> f32 {
        angle.clamp(self.min, self.max)
    }

    /// Whether an angle sits at either bound of the range
    pub fn at_bound(&self, angle: f32) -> bool {
        angle <= self.min || angle >= self.max
    }
}

impl Default for AngleExtent {
    fn default() -> Self {
        AngleExtent {
            min: -360.0,
            max: 360.0,
        }
    }
}

/// A node in the transform tree.
///
/// Every node owns its own axis, angle, and extent state, initialized fresh
/// at construction.
#[derive(Debug, Clone)]
pub struct TransformNode {
    translation: Vec3,
    axes: [Vec3; 3],
    angles: [f32; 3],
    extents: [AngleExtent; 3],
    orientation: Option<Quat>,
    scale: f32,
    pre_correction: Mat4,
    post_correction: Mat4,
    in_pivot: Mat4,
    out_pivot: Mat4,
    shape: Option<Shape>,
    color: Color,
    world: Mat4,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl TransformNode {
    /// Create a node with an initial local translation from its parent
    pub fn new(translation: Vec3) -> Self {
        TransformNode {
            translation,
            axes: [Vec3::X, Vec3::Y, Vec3::Z],
            angles: [0.0; 3],
            extents: [AngleExtent::default(); 3],
            orientation: None,
            scale: 1.0,
            pre_correction: Mat4::IDENTITY,
            post_correction: Mat4::IDENTITY,
            in_pivot: Mat4::IDENTITY,
            out_pivot: Mat4::IDENTITY,
            shape: None,
            color: [1.0, 1.0, 1.0],
            world: Mat4::IDENTITY,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Attach a drawable shape with a color
    pub fn with_shape(mut self, shape: Shape, color: Color) -> Self {
        self.shape = Some(shape);
        self.color = color;
        self
    }

    /// Attach a drawable shape whose rotations pivot at the joint end
    /// rather than the shape center
    pub fn with_limb_shape(mut self, shape: Shape, color: Color) -> Self {
        let (inner, outer) = shape.limb_pivot();
        self.in_pivot = inner;
        self.out_pivot = outer;
        self.shape = Some(shape);
        self.color = color;
        self
    }

    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    pub fn translate_by(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    pub fn angle(&self, axis: Axis) -> f32 {
        self.angles[axis.index()]
    }

    pub fn extent(&self, axis: Axis) -> AngleExtent {
        self.extents[axis.index()]
    }

    /// Set the rotation angle for one axis, clamped to that axis's extent
    pub fn set_angle(&mut self, axis: Axis, degrees: f32) {
        let i = axis.index();
        self.angles[i] = self.extents[i].clamp(degrees);
    }

    /// Add to the rotation angle for one axis, clamped to that axis's extent.
    /// Used by periodic animation drivers.
    pub fn rotate_by(&mut self, axis: Axis, delta_degrees: f32) {
        let i = axis.index();
        self.angles[i] = self.extents[i].clamp(self.angles[i] + delta_degrees);
    }

    /// Whether the angle for one axis sits at either extent bound
    pub fn at_extent(&self, axis: Axis) -> bool {
        let i = axis.index();
        self.extents[i].at_bound(self.angles[i])
    }

    /// Set the rotation range for one axis. The current angle is re-clamped
    /// into the new range.
    pub fn set_extent(&mut self, axis: Axis, min: f32, max: f32) -> Result<(), SceneError> {
        if min > max {
            return Err(SceneError::InvalidExtent { min, max });
        }
        let i = axis.index();
        self.extents[i] = AngleExtent { min, max };
        self.angles[i] = self.extents[i].clamp(self.angles[i]);
        Ok(())
    }

    /// Set all three rotation ranges at once
    pub fn set_extents(
        &mut self,
        u: (f32, f32),
        v: (f32, f32),
        w: (f32, f32),
    ) -> Result<(), SceneError> {
        self.set_extent(Axis::U, u.0, u.1)?;
        self.set_extent(Axis::V, v.0, v.1)?;
        self.set_extent(Axis::W, w.0, w.1)
    }

    /// Replace one local axis direction. The direction is normalized.
    pub fn set_axis(&mut self, axis: Axis, direction: Vec3) {
        self.axes[axis.index()] = direction.normalize_or_zero();
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set a uniform scale factor
    pub fn set_uniform_scale(&mut self, factor: f32) {
        self.scale = factor;
    }

    /// Set scale from a per-axis vector, rejecting non-uniform input and
    /// leaving the prior scale unchanged on failure
    pub fn set_scale(&mut self, scale: Vec3) -> Result<(), SceneError> {
        if scale.x != scale.y || scale.y != scale.z {
            return Err(SceneError::InvalidScale(scale.x, scale.y, scale.z));
        }
        self.scale = scale.x;
        Ok(())
    }

    /// Override the Euler rotation with a quaternion for this node only
    pub fn set_orientation_quat(&mut self, q: Quat) {
        self.orientation = Some(q);
    }

    /// Clear the quaternion override; Euler angles take effect again
    pub fn clear_orientation_quat(&mut self) {
        self.orientation = None;
    }

    pub fn orientation_quat(&self) -> Option<Quat> {
        self.orientation
    }

    /// Fixed correction applied before scaling (e.g. a rest-pose rotation)
    pub fn set_pre_correction(&mut self, m: Mat4) {
        self.pre_correction = m;
    }

    /// Fixed correction applied after rotation (e.g. heading alignment)
    pub fn set_post_correction(&mut self, m: Mat4) {
        self.post_correction = m;
    }

    /// Pivot pair bracketing the rotation matrices
    pub fn set_pivot(&mut self, in_pivot: Mat4, out_pivot: Mat4) {
        self.in_pivot = in_pivot;
        self.out_pivot = out_pivot;
    }

    /// Cached world matrix from the last recompute pass
    pub fn world(&self) -> Mat4 {
        self.world
    }

    pub(crate) fn set_world(&mut self, world: Mat4) {
        self.world = world;
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local transform: pure function of this node's state
    pub fn local_matrix(&self) -> Mat4 {
        let rotation = match self.orientation {
            Some(q) => Mat4::from_quat(q),
            None => {
                Mat4::from_axis_angle(self.axes[0], self.angles[0].to_radians())
                    * Mat4::from_axis_angle(self.axes[1], self.angles[1].to_radians())
                    * Mat4::from_axis_angle(self.axes[2], self.angles[2].to_radians())
            }
        };
        Mat4::from_translation(self.translation)
            * self.post_correction
            * self.out_pivot
            * rotation
            * self.in_pivot
            * self.pre_correction
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_angle_clamps_to_extent() {
        let mut node = TransformNode::new(Vec3::ZERO);
        node.set_extent(Axis::U, -36.0, 36.0).unwrap();
        node.set_angle(Axis::U, 90.0);
        assert_eq!(node.angle(Axis::U), 36.0);
        node.set_angle(Axis::U, -90.0);
        assert_eq!(node.angle(Axis::U), -36.0);
    }

    #[test]
    fn test_rotate_by_accumulates_within_extent() {
        let mut node = TransformNode::new(Vec3::ZERO);
        node.set_extent(Axis::V, -10.0, 10.0).unwrap();
        node.rotate_by(Axis::V, 4.0);
        node.rotate_by(Axis::V, 4.0);
        assert_eq!(node.angle(Axis::V), 8.0);
        node.rotate_by(Axis::V, 4.0);
        assert_eq!(node.angle(Axis::V), 10.0);
        assert!(node.at_extent(Axis::V));
    }

    #[test]
    fn test_invalid_extent_rejected() {
        let mut node = TransformNode::new(Vec3::ZERO);
        assert_eq!(
            node.set_extent(Axis::W, 20.0, -20.0),
            Err(SceneError::InvalidExtent {
                min: 20.0,
                max: -20.0
            })
        );
        // State unchanged
        assert_eq!(node.extent(Axis::W), AngleExtent::default());
    }

    #[test]
    fn test_non_uniform_scale_rejected() {
        let mut node = TransformNode::new(Vec3::ZERO);
        node.set_uniform_scale(2.0);
        let err = node.set_scale(Vec3::new(1.0, 2.0, 1.0));
        assert!(matches!(err, Err(SceneError::InvalidScale(..))));
        // Prior scale unchanged
        assert_eq!(node.scale(), 2.0);
        assert!(node.set_scale(Vec3::splat(3.0)).is_ok());
        assert_eq!(node.scale(), 3.0);
    }

    #[test]
    fn test_quaternion_overrides_euler() {
        let mut node = TransformNode::new(Vec3::ZERO);
        node.set_angle(Axis::U, 45.0);
        let euler_local = node.local_matrix();

        node.set_orientation_quat(Quat::IDENTITY);
        // With an identity quaternion the 45 degree Euler angle is ignored
        assert!(node.local_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));

        node.clear_orientation_quat();
        assert!(node.local_matrix().abs_diff_eq(euler_local, 1e-6));
    }

    #[test]
    fn test_local_matrix_translation_and_scale() {
        let mut node = TransformNode::new(Vec3::new(1.0, 2.0, 3.0));
        node.set_uniform_scale(2.0);
        let m = node.local_matrix();
        let p = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(3.0, 2.0, 3.0)).length() < 1e-6);
    }
}
