//! The capability trait the habitat drives occupants through
//!
//! Tree/transform state lives in the scene graph; behavior lives here. The
//! habitat depends only on this trait, never on concrete species.

use glam::Vec3;

use vivarium_scene::SceneGraph;

use crate::body::ArticulatedBody;
use crate::steering::{self, SteeringParams, StepProposal};

pub trait Steerable {
    fn body(&self) -> &ArticulatedBody;

    fn body_mut(&mut self) -> &mut ArticulatedBody;

    /// Propose a velocity for this tick against the current, unmutated peer
    /// set. Must not mutate any occupant; the habitat applies the proposal
    /// in its own apply phase.
    fn compute_step(
        &self,
        peers: &[&ArticulatedBody],
        tank_dimensions: Vec3,
        params: &SteeringParams,
    ) -> StepProposal {
        steering::compute_step(self.body(), peers, tank_dimensions, params)
    }

    /// Advance periodic joint animation by one tick
    fn animate(&mut self, scene: &mut SceneGraph) {
        self.body_mut().animate(scene);
    }
}
