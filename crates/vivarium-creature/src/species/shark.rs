//! Shark: the apex predator
//!
//! Body with a three-segment tapering tail chain, caudal fins, a neck and
//! head with an animated mouth, paired pectoral fins, and a dorsal fin.

use glam::Vec3;
use rand::Rng;

use vivarium_scene::{Axis, NodeId, SceneError, SceneGraph, Shape, TransformNode};

use crate::body::{ArticulatedBody, BodyParams};
use crate::traits::Steerable;

use super::{create_eye, create_fin, SHARK_GREY, SHARK_LIGHTGREY};

pub struct Shark {
    body: ArticulatedBody,
}

impl Shark {
    pub const RANK: i32 = 100;
    pub const BASE_RADIUS: f32 = 1.8;

    /// Assemble a shark model rooted at `position`
    pub fn build(
        scene: &mut SceneGraph,
        position: Vec3,
        rng: &mut impl Rng,
    ) -> Result<Self, SceneError> {
        let root = scene.insert(TransformNode::new(position));
        let mut body = ArticulatedBody::new(
            root,
            position,
            BodyParams {
                radius: Self::BASE_RADIUS,
                center: Vec3::ZERO,
                speed: 0.05,
                rank: Self::RANK,
            },
            rng,
        );

        let trunk_size = Vec3::new(0.9, 1.1, 1.4);
        let trunk = cube(scene, Vec3::ZERO, trunk_size, SHARK_GREY);
        scene.get_mut(trunk)?.set_extents((0.0, 0.0), (-8.0, 8.0), (0.0, 0.0))?;
        scene.add_child(root, trunk)?;
        body.register_joint(trunk, [0.0, 0.2, 0.0]);

        let conn_size = Vec3::splat(0.01);

        // Tapering tail chain: three segments, each on its own swing joint
        let mut cur_size = trunk_size;
        let mut cur_parent = trunk;
        for _ in 0..3 {
            let new_size = cur_size * Vec3::new(0.8, 0.7, 0.6);
            let conn_pos = cur_size * Vec3::new(0.0, 0.05, -0.75);

            let conn = cube(scene, conn_pos, conn_size, SHARK_GREY);
            scene.get_mut(conn)?.set_extents((0.0, 0.0), (-20.0, 20.0), (0.0, 0.0))?;
            scene.add_child(cur_parent, conn)?;
            body.register_joint(conn, [0.0, -0.5, 0.0]);

            let segment = cube(scene, Vec3::ZERO, new_size, SHARK_GREY);
            scene.add_child(conn, segment)?;

            cur_parent = segment;
            cur_size = new_size;
        }

        // Tail tip carrying the caudal fins
        let tip_size = cur_size * Vec3::new(0.7, 0.7, 1.5);
        let tip = cube(
            scene,
            cur_size * Vec3::new(0.0, 0.0, -1.25),
            tip_size,
            SHARK_GREY,
        );
        scene.add_child(cur_parent, tip)?;

        let caudal = [
            (tip_size * Vec3::new(0.2, 0.6, 1.1), 30.0, SHARK_GREY),
            (tip_size * Vec3::new(0.2, 0.6, 0.8), -50.0, SHARK_LIGHTGREY),
        ];
        for (size, pitch, color) in caudal {
            let fin = scene.insert(
                TransformNode::new(tip_size * Vec3::new(0.0, 0.0, 0.7))
                    .with_shape(Shape::Cone { size }, color),
            );
            let fin_node = scene.get_mut(fin)?;
            fin_node.set_angle(Axis::V, 180.0);
            fin_node.set_angle(Axis::U, pitch);
            scene.add_child(tip, fin)?;
        }

        // Neck, head, and jaw
        let neck_size = trunk_size * Vec3::new(0.8, 0.7, 0.5);
        let neck = cube(
            scene,
            trunk_size * Vec3::new(0.0, 0.05, 0.7),
            neck_size,
            SHARK_GREY,
        );
        scene.add_child(trunk, neck)?;

        let head_size = neck_size * Vec3::new(0.8, 0.6, 1.0);
        let head = cube(
            scene,
            neck_size * Vec3::new(0.0, 0.1, 0.95),
            head_size,
            SHARK_GREY,
        );
        scene.add_child(neck, head)?;

        let mouth = cube(
            scene,
            neck_size * Vec3::new(0.0, -0.25, 0.8),
            neck_size * Vec3::new(0.65, 0.15, 0.7),
            SHARK_LIGHTGREY,
        );
        scene.get_mut(mouth)?.set_extents((0.0, 30.0), (0.0, 0.0), (0.0, 0.0))?;
        scene.add_child(neck, mouth)?;
        body.register_joint(mouth, [0.4, 0.0, 0.0]);

        // First dorsal fin, rigid
        let dorsal = create_fin(scene, 12, Vec3::new(1.0, 1.2, 1.2), SHARK_LIGHTGREY)?;
        scene.get_mut(dorsal)?.set_translation(Vec3::new(0.0, 0.4, 0.0));
        scene.add_child(trunk, dorsal)?;

        // Pectoral fins sweep on their w axes
        for side in [1.0f32, -1.0] {
            let fin = create_fin(scene, 12, Vec3::new(1.0, 1.0, 0.6), SHARK_LIGHTGREY)?;
            let fin_node = scene.get_mut(fin)?;
            fin_node.set_translation(Vec3::new(
                side * (trunk_size.x - 0.1) / 2.0,
                -(trunk_size.y - 0.1) / 2.0,
                0.0,
            ));
            fin_node.set_extent(Axis::W, side * 140.0 - 20.0, side * 140.0 + 20.0)?;
            fin_node.set_angle(Axis::W, side * 140.0);
            scene.add_child(trunk, fin)?;
            body.register_joint(fin, [0.0, 0.0, side * 0.4]);
        }

        // Eyes
        for side in [1.0f32, -1.0] {
            let eye = create_eye(
                scene,
                Vec3::new(side * head_size.x / 2.0, 0.0, 0.0),
                0.15,
                super::EYE_WHITE,
                super::EYE_BLACK,
            )?;
            scene.get_mut(eye)?.set_angle(Axis::V, side * 90.0);
            scene.add_child(head, eye)?;
        }

        log::debug!("assembled shark {} with {} joints", body.id(), body.joints().len());
        Ok(Shark { body })
    }
}

impl Steerable for Shark {
    fn body(&self) -> &ArticulatedBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut ArticulatedBody {
        &mut self.body
    }
}

fn cube(scene: &mut SceneGraph, position: Vec3, size: Vec3, color: [f32; 3]) -> NodeId {
    scene.insert(TransformNode::new(position).with_shape(Shape::Cube { size }, color))
}
