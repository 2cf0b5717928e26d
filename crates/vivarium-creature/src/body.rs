//! Articulated body: a transform-node subtree plus behavioral state
//!
//! Boundary radius, boundary center, and speed are always derived from the
//! base values and the current uniform scale factor, never stored scaled.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use vivarium_scene::{Axis, NodeId, SceneError, SceneGraph};

/// Unique identifier for bodies in the habitat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(u64);

static NEXT_BODY_ID: AtomicU64 = AtomicU64::new(1);

impl BodyId {
    /// Generate a new unique body ID
    pub fn new() -> Self {
        BodyId(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for BodyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// One registered joint with its signed per-tick angular speeds, one per axis
#[derive(Debug, Clone)]
pub struct JointDriver {
    pub node: NodeId,
    pub speed: [f32; 3],
}

/// Base (unscaled) behavioral parameters of a body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyParams {
    /// Collision sphere radius before scaling
    pub radius: f32,
    /// Collision sphere center offset before scaling
    pub center: Vec3,
    /// Movement speed per tick before scaling
    pub speed: f32,
    /// Food-chain rank; lower means a more dominant predator
    pub rank: i32,
}

#[derive(Debug)]
pub struct ArticulatedBody {
    id: BodyId,
    root: NodeId,
    position: Vec3,
    params: BodyParams,
    scale: f32,
    /// Current movement direction, unit length
    heading: Vec3,
    /// Rest facing of the model, used as the reference for heading alignment
    facing: Vec3,
    joints: Vec<JointDriver>,
}

impl ArticulatedBody {
    /// Create a body over an existing root node with a random initial heading
    pub fn new(root: NodeId, position: Vec3, params: BodyParams, rng: &mut impl Rng) -> Self {
        ArticulatedBody {
            id: BodyId::new(),
            root,
            position,
            params,
            scale: 1.0,
            heading: random_unit_vector(rng),
            facing: Vec3::Z,
            joints: Vec::new(),
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    pub fn set_heading(&mut self, heading: Vec3) {
        self.heading = heading.normalize_or_zero();
    }

    /// Adopt the direction of an applied velocity as the new heading.
    /// A zero velocity (e.g. food at rest) leaves the heading unchanged.
    pub fn set_heading_from_velocity(&mut self, velocity: Vec3) {
        let direction = velocity.normalize_or_zero();
        if direction != Vec3::ZERO {
            self.heading = direction;
        }
    }

    pub fn rank(&self) -> i32 {
        self.params.rank
    }

    /// Collision sphere radius, derived from base radius and current scale
    pub fn radius(&self) -> f32 {
        self.params.radius * self.scale
    }

    /// Collision sphere center offset, derived from base center and current scale
    pub fn center(&self) -> Vec3 {
        self.params.center * self.scale
    }

    /// Movement speed per tick, derived from base speed and current scale
    pub fn speed(&self) -> f32 {
        self.params.speed * self.scale
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Projected position one tick ahead, used for all boundary and
    /// collision checks before committing movement
    pub fn test_position(&self) -> Vec3 {
        self.position + self.center() + self.heading * self.speed()
    }

    /// Apply a uniform scale to the whole model. Boundary geometry and speed
    /// follow through the derived accessors.
    pub fn set_uniform_scale(&mut self, factor: f32, scene: &mut SceneGraph) {
        self.scale = factor;
        if let Some(node) = scene.node_mut(self.root) {
            node.set_uniform_scale(factor);
        }
    }

    /// Apply a per-axis scale vector, rejecting non-uniform input
    pub fn set_scale(&mut self, scale: Vec3, scene: &mut SceneGraph) -> Result<(), SceneError> {
        scene.get_mut(self.root)?.set_scale(scale)?;
        self.scale = scale.x;
        Ok(())
    }

    /// Register a joint node for periodic animation with per-axis speeds
    /// in degrees per tick
    pub fn register_joint(&mut self, node: NodeId, speed: [f32; 3]) {
        self.joints.push(JointDriver { node, speed });
    }

    pub fn joints(&self) -> &[JointDriver] {
        &self.joints
    }

    /// Advance every registered joint one tick.
    ///
    /// Each axis is applied in the fixed u, v, w order; an axis whose angle
    /// sits at either extent after the step has its speed sign flipped so the
    /// joint bounces between its bounds.
    pub fn animate(&mut self, scene: &mut SceneGraph) {
        for driver in &mut self.joints {
            let Some(node) = scene.node_mut(driver.node) else {
                continue;
            };
            for axis in Axis::ALL {
                node.rotate_by(axis, driver.speed[axis.index()]);
            }
            for axis in Axis::ALL {
                if node.at_extent(axis) {
                    driver.speed[axis.index()] = -driver.speed[axis.index()];
                }
            }
        }
    }

    /// Move the body and its root node by a velocity
    pub fn translate(&mut self, velocity: Vec3, scene: &mut SceneGraph) {
        self.position += velocity;
        if let Some(node) = scene.node_mut(self.root) {
            node.set_translation(self.position);
        }
    }

    /// Rotate the model from its rest facing toward the current heading via
    /// the minimal-rotation quaternion, applied as the root node's
    /// post-correction rather than baked into Euler angles.
    pub fn align_to_heading(&self, scene: &mut SceneGraph) {
        let facing = self.facing.normalize_or_zero();
        let heading = self.heading.normalize_or_zero();
        if facing == Vec3::ZERO || heading == Vec3::ZERO {
            return;
        }
        let q = Quat::from_rotation_arc(facing, heading);
        if let Some(node) = scene.node_mut(self.root) {
            node.set_post_correction(Mat4::from_quat(q));
        }
    }
}

/// Uniform random direction, rejection-sampled from the unit cube
fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-4 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    use vivarium_scene::TransformNode;

    fn test_body(scene: &mut SceneGraph) -> ArticulatedBody {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let root = scene.insert(TransformNode::new(Vec3::ZERO));
        ArticulatedBody::new(
            root,
            Vec3::ZERO,
            BodyParams {
                radius: 1.6,
                center: Vec3::new(0.0, 0.0, -1.2),
                speed: 0.3,
                rank: 200,
            },
            &mut rng,
        )
    }

    #[test]
    fn test_initial_heading_is_unit() {
        let mut scene = SceneGraph::new();
        let body = test_body(&mut scene);
        assert!((body.heading().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_derived_values_track_scale() {
        let mut scene = SceneGraph::new();
        let mut body = test_body(&mut scene);

        body.set_uniform_scale(2.0, &mut scene);
        assert!((body.radius() - 3.2).abs() < 1e-6);
        assert!((body.speed() - 0.6).abs() < 1e-6);
        assert!((body.center() - Vec3::new(0.0, 0.0, -2.4)).length() < 1e-6);
    }

    #[test]
    fn test_non_uniform_scale_rejected_and_state_kept() {
        let mut scene = SceneGraph::new();
        let mut body = test_body(&mut scene);
        body.set_uniform_scale(1.5, &mut scene);

        let err = body.set_scale(Vec3::new(1.0, 2.0, 1.0), &mut scene);
        assert!(matches!(err, Err(SceneError::InvalidScale(..))));
        assert!((body.radius() - 1.6 * 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_joint_bounces_between_extents() {
        let mut scene = SceneGraph::new();
        let mut body = test_body(&mut scene);

        let joint = scene.insert(TransformNode::new(Vec3::ZERO));
        scene
            .node_mut(joint)
            .unwrap()
            .set_extent(Axis::V, -36.0, 36.0)
            .unwrap();
        body.register_joint(joint, [0.0, 5.0, 0.0]);

        let mut max_seen = f32::MIN;
        let mut reversed = false;
        for _ in 0..20 {
            body.animate(&mut scene);
            let angle = scene.node(joint).unwrap().angle(Axis::V);
            assert!(angle <= 36.0 && angle >= -36.0);
            max_seen = max_seen.max(angle);
            if body.joints()[0].speed[1] < 0.0 {
                reversed = true;
            }
        }
        assert_eq!(max_seen, 36.0);
        assert!(reversed);
    }

    #[test]
    fn test_zero_velocity_keeps_heading() {
        let mut scene = SceneGraph::new();
        let mut body = test_body(&mut scene);
        let before = body.heading();
        body.set_heading_from_velocity(Vec3::ZERO);
        assert_eq!(body.heading(), before);
    }

    #[test]
    fn test_align_to_heading_sets_post_correction() {
        let mut scene = SceneGraph::new();
        let mut body = test_body(&mut scene);
        body.set_heading(Vec3::X);
        body.align_to_heading(&mut scene);

        scene.recompute_world(body.root(), Mat4::IDENTITY);
        let world = scene.node(body.root()).unwrap().world();
        // The model's rest facing (+z) now points along the heading (+x)
        let mapped = world.transform_vector3(Vec3::Z);
        assert!((mapped - Vec3::X).length() < 1e-5);
    }
}
