//! Cod: a mid-chain schooling fish
//!
//! Head with a nodding neck joint, boxy body, paired pectoral fins, dorsal
//! and anal fins, and a two-lobed tail on a fast oscillating joint.

use glam::Vec3;
use rand::Rng;

use vivarium_scene::{Axis, NodeId, SceneError, SceneGraph, Shape, TransformNode};

use crate::body::{ArticulatedBody, BodyParams};
use crate::traits::Steerable;

use super::{create_eye, create_fin};

pub struct Cod {
    body: ArticulatedBody,
}

impl Cod {
    pub const RANK: i32 = 200;
    pub const BASE_RADIUS: f32 = 1.6;

    /// Assemble a cod model rooted at `position`
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
                center: Vec3::new(0.0, 0.0, -1.2),
                speed: 0.3,
                rank: Self::RANK,
            },
            rng,
        );

        let head_size = Vec3::new(0.6, 0.9, 0.8);
        let head = cube(scene, Vec3::ZERO, head_size, super::COD_HEAD);
        scene.get_mut(head)?.set_extents((0.0, 0.0), (-8.0, 8.0), (0.0, 0.0))?;
        scene.add_child(root, head)?;
        body.register_joint(head, [0.0, 0.6, 0.0]);

        // Body hangs off a tiny connector so the neck joint bends between
        // head and trunk
        let conn_size = Vec3::splat(0.01);
        let neck = cube(
            scene,
            Vec3::new(0.0, 0.0, -head_size.z / 2.0),
            conn_size,
            super::COD_HEAD,
        );
        scene.get_mut(neck)?.set_extents((0.0, 0.0), (-4.0, 4.0), (0.0, 0.0))?;
        scene.add_child(head, neck)?;
        body.register_joint(neck, [0.0, 0.2, 0.0]);

        let trunk_size = Vec3::new(0.6, 1.0, 1.9);
        let trunk = cube(
            scene,
            Vec3::new(0.0, -0.05, -trunk_size.z / 2.0),
            trunk_size,
            super::COD_BODY,
        );
        scene.add_child(neck, trunk)?;

        // Eyes, angled outward on their v axes
        let eye_x = (head_size.x - 0.15) / 2.0;
        for side in [1.0f32, -1.0] {
            let eye = create_eye(
                scene,
                Vec3::new(side * eye_x, 0.0, 0.0),
                0.22,
                super::EYE_WHITE,
                super::EYE_BLACK,
            )?;
            scene.get_mut(eye)?.set_angle(Axis::V, side * 90.0);
            scene.add_child(head, eye)?;
        }

        // Pectoral fins sweep on their w axes
        for side in [1.0f32, -1.0] {
            let fin = create_fin(scene, 12, Vec3::new(1.0, 0.4, 0.4), super::COD_FIN2)?;
            let fin_node = scene.get_mut(fin)?;
            fin_node.set_translation(Vec3::new(
                side * trunk_size.x / 2.0,
                -0.2,
                (trunk_size.z - 0.4) / 2.0,
            ));
            fin_node.set_extent(Axis::W, side * 135.0 - 15.0, side * 135.0 + 15.0)?;
            fin_node.set_angle(Axis::W, side * 135.0);
            scene.add_child(trunk, fin)?;
            body.register_joint(fin, [0.0, 0.0, side]);
        }

        // Dorsal and anal fins are rigid
        let dorsal1 = cube(
            scene,
            Vec3::new(0.0, trunk_size.y / 2.0, -0.1),
            Vec3::new(0.06, 0.45, 0.7),
            super::COD_FIN1,
        );
        scene.add_child(trunk, dorsal1)?;
        let dorsal2 = cube(
            scene,
            Vec3::new(0.0, trunk_size.y / 2.0, (trunk_size.z - 0.4) / 2.0),
            Vec3::new(0.06, 0.45, 0.4),
            super::COD_FIN1,
        );
        scene.add_child(trunk, dorsal2)?;
        let anal = cube(
            scene,
            Vec3::new(0.0, -trunk_size.y / 2.0, -0.1),
            Vec3::new(0.06, 0.45, 0.4),
            super::COD_FIN1,
        );
        scene.add_child(trunk, anal)?;

        // Tail: fast oscillating connector carrying two splayed lobes
        let tail_conn = cube(
            scene,
            Vec3::new(0.0, 0.0, -trunk_size.z / 2.0),
            conn_size,
            super::COD_BODY,
        );
        scene.get_mut(tail_conn)?.set_extents((0.0, 0.0), (-36.0, 36.0), (0.0, 0.0))?;
        scene.add_child(trunk, tail_conn)?;
        body.register_joint(tail_conn, [0.0, -2.7, 0.0]);

        let lobe_sizes = [
            Vec3::new(0.072, 0.25, 0.855),
            Vec3::new(0.06, 0.25, 0.855),
        ];
        let lobe_colors = [super::COD_TAIL1, super::COD_TAIL2];
        for (i, splay) in [24.0f32, -24.0].into_iter().enumerate() {
            let lobe_conn = scene.insert(TransformNode::new(Vec3::ZERO).with_limb_shape(
                Shape::Sphere { size: conn_size },
                super::COD_TAIL1,
            ));
            scene.get_mut(lobe_conn)?.set_angle(Axis::U, splay);
            scene.add_child(tail_conn, lobe_conn)?;

            let lobe = cube(
                scene,
                Vec3::new(0.0, 0.0, -lobe_sizes[i].z / 2.0),
                lobe_sizes[i],
                lobe_colors[i],
            );
            scene.add_child(lobe_conn, lobe)?;
        }

        log::debug!("assembled cod {} with {} joints", body.id(), body.joints().len());
        Ok(Cod { body })
    }
}

impl Steerable for Cod {
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
