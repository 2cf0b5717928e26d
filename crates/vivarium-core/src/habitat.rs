//! The habitat: a bounded tank full of occupants
//!
//! Drives the two-phase simulation tick. Phase 1 computes every steering
//! proposal against the same unmutated snapshot; phase 2 applies removals,
//! joint animation, movement, and heading alignment, then recomputes world
//! transforms once from the root. Nothing one creature does in a tick can
//! affect another creature's decision within that tick.

use std::collections::HashSet;

use glam::{Mat4, Vec3};

use vivarium_creature::{ArticulatedBody, BodyId, Steerable, SteeringParams};
use vivarium_scene::{
    Color, DrawBackend, DrawCommand, NodeId, SceneError, SceneGraph, Shape, TransformNode,
};

use crate::occupant::Occupant;

const TANK_COLOR: Color = [1.0, 0.75, 0.8];

pub struct Habitat {
    scene: SceneGraph,
    root: NodeId,
    tank_node: NodeId,
    tank_dimensions: Vec3,
    params: SteeringParams,
    /// Kept sorted by food-chain rank ascending; statics sort last. The
    /// order decides which creature claims a kill first within a tick.
    occupants: Vec<Occupant>,
}

impl Habitat {
    pub fn new(tank_dimensions: Vec3, params: SteeringParams) -> Self {
        let mut scene = SceneGraph::new();
        let root = scene.insert(TransformNode::new(Vec3::ZERO));
        let tank_node = scene.insert(TransformNode::new(Vec3::ZERO).with_shape(
            Shape::Cube {
                size: tank_dimensions,
            },
            TANK_COLOR,
        ));
        scene
            .add_child(root, tank_node)
            .expect("fresh graph cannot reject the tank");
        scene.recompute_world(root, Mat4::IDENTITY);

        Habitat {
            scene,
            root,
            tank_node,
            tank_dimensions,
            params,
            occupants: vec![Occupant::Static(tank_node)],
        }
    }

    pub fn tank_dimensions(&self) -> Vec3 {
        self.tank_dimensions
    }

    pub fn params(&self) -> &SteeringParams {
        &self.params
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    /// Number of occupants including statics
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// Number of creature-capable occupants
    pub fn steerable_count(&self) -> usize {
        self.occupants
            .iter()
            .filter(|o| o.as_steerable().is_some())
            .count()
    }

    pub fn steerable(&self, id: BodyId) -> Option<&dyn Steerable> {
        self.occupants
            .iter()
            .find(|o| o.id() == Some(id))
            .and_then(|o| o.as_steerable())
    }

    pub fn steerable_mut(&mut self, id: BodyId) -> Option<&mut dyn Steerable> {
        self.occupants
            .iter_mut()
            .find(|o| o.id() == Some(id))
            .and_then(|o| o.as_steerable_mut())
    }

    /// Add a creature-capable occupant: its subtree is attached under the
    /// tank node and the occupant list is re-sorted by rank.
    pub fn spawn(&mut self, occupant: Box<dyn Steerable>) -> Result<BodyId, SceneError> {
        let body = occupant.body();
        let id = body.id();
        let root = body.root();
        log::info!(
            "spawning {} (rank {}) at ({:.2}, {:.2}, {:.2})",
            id,
            body.rank(),
            body.position().x,
            body.position().y,
            body.position().z,
        );
        self.scene.add_child(self.tank_node, root)?;
        self.occupants.push(Occupant::Steerable(occupant));
        self.sort_occupants();
        self.scene.recompute_world(self.root, Mat4::IDENTITY);
        Ok(id)
    }

    /// Remove an occupant: detached from the occupant list and its node
    /// subtree destroyed. Returns false if the id is not present.
    pub fn remove(&mut self, id: BodyId) -> bool {
        let Some(index) = self.occupants.iter().position(|o| o.id() == Some(id)) else {
            return false;
        };
        let root = self.occupants[index].root();
        self.scene.remove_subtree(root);
        self.occupants.remove(index);
        log::debug!("removed {} from the tank", id);
        true
    }

    /// Advance the simulation one frame
    pub fn tick(&mut self) {
        // Phase 1: compute proposals against a consistent snapshot
        let mut proposals: Vec<(BodyId, Vec3)> = Vec::new();
        let mut doomed: HashSet<BodyId> = HashSet::new();
        {
            let bodies: Vec<&ArticulatedBody> = self
                .occupants
                .iter()
                .filter_map(|o| o.as_steerable().map(|s| s.body()))
                .collect();
            for occupant in &self.occupants {
                let Some(steerable) = occupant.as_steerable() else {
                    continue;
                };
                let step =
                    steerable.compute_step(&bodies, self.tank_dimensions, &self.params);
                if let Some(kills) = step.kills {
                    doomed.extend(kills);
                }
                proposals.push((steerable.body().id(), step.velocity));
            }
        }

        // Phase 2: apply
        for (id, velocity) in proposals {
            if doomed.contains(&id) {
                log::info!("{} was eaten", id);
                self.remove(id);
                continue;
            }
            let Some(occupant) = self.occupants.iter_mut().find(|o| o.id() == Some(id)) else {
                continue;
            };
            let Some(steerable) = occupant.as_steerable_mut() else {
                continue;
            };
            steerable.animate(&mut self.scene);
            let body = steerable.body_mut();
            body.translate(velocity, &mut self.scene);
            body.set_heading_from_velocity(velocity);
            body.align_to_heading(&mut self.scene);
        }

        self.scene.recompute_world(self.root, Mat4::IDENTITY);
    }

    /// Read-only render query over the whole tree
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::new();
        self.scene.collect_draw_commands(self.root, &mut commands);
        commands
    }

    /// Push the whole tree to a render backend
    pub fn draw(&self, backend: &mut dyn DrawBackend) {
        self.scene.draw(self.root, backend);
    }

    fn sort_occupants(&mut self) {
        self.occupants.sort_by_key(|o| match o.rank() {
            Some(rank) => (0, rank),
            None => (1, 0),
        });
    }
}
