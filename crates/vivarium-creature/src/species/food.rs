//! Food pellet: the bottom of the food chain
//!
//! A single sphere that sinks straight down and comes to rest just above the
//! tank floor, waiting to be eaten by the first creature that touches it.

use glam::Vec3;
use rand::Rng;

use vivarium_scene::{SceneError, SceneGraph, Shape, TransformNode};

use crate::body::{ArticulatedBody, BodyParams};
use crate::steering::{SteeringParams, StepProposal};
use crate::traits::Steerable;

use super::FOOD_PALETTE;

pub struct Food {
    body: ArticulatedBody,
}

impl Food {
    pub const RANK: i32 = 1000;

    /// Drop a food pellet at `position`, scaled down to pellet size
    pub fn build(
        scene: &mut SceneGraph,
        position: Vec3,
        scale: f32,
        rng: &mut impl Rng,
    ) -> Result<Self, SceneError> {
        let root = scene.insert(TransformNode::new(position));
        let mut body = ArticulatedBody::new(
            root,
            position,
            BodyParams {
                radius: 1.0,
                center: Vec3::ZERO,
                speed: 0.2,
                rank: Self::RANK,
            },
            rng,
        );
        body.set_uniform_scale(scale, scene);
        // Pellets only ever sink
        body.set_heading(Vec3::NEG_Y);

        let color = FOOD_PALETTE[rng.gen_range(0..FOOD_PALETTE.len())];
        let pellet = scene.insert(TransformNode::new(Vec3::ZERO).with_shape(
            Shape::Sphere {
                size: Vec3::ONE,
            },
            color,
        ));
        scene.add_child(root, pellet)?;

        Ok(Food { body })
    }
}

impl Steerable for Food {
    fn body(&self) -> &ArticulatedBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut ArticulatedBody {
        &mut self.body
    }

    /// Sink until just above the tank floor, then rest in place
    fn compute_step(
        &self,
        _peers: &[&ArticulatedBody],
        tank_dimensions: Vec3,
        params: &SteeringParams,
    ) -> StepProposal {
        let test_pos = self.body.test_position();
        let floor = -tank_dimensions.y / params.wall_margin_divisor + self.body.radius();
        let velocity = if test_pos.y < floor {
            Vec3::ZERO
        } else {
            self.body.heading() * self.body.speed()
        };
        StepProposal {
            velocity,
            kills: Some(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_food_sinks_then_rests() {
        let mut scene = SceneGraph::new();
        let mut rng = Xoshiro256StarStar::seed_from_u64(13);
        let mut food = Food::build(&mut scene, Vec3::new(0.0, 1.5, 0.0), 0.1, &mut rng).unwrap();

        let tank = Vec3::splat(4.0);
        let params = SteeringParams::default();
        let mut rested = false;
        for _ in 0..300 {
            let step = food.compute_step(&[], tank, &params);
            if step.velocity == Vec3::ZERO {
                rested = true;
                break;
            }
            assert!(step.velocity.y < 0.0);
            food.body_mut().translate(step.velocity, &mut scene);
        }
        assert!(rested);
        // Resting just above the floor, still inside the tank
        assert!(food.body().position().y > -tank.y / 2.0);
    }
}
