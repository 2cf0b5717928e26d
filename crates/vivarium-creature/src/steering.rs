//! Per-tick steering: potential fields, collision bounces, predation
//!
//! `compute_step` is pure over the current tick: it reads every peer's state
//! and mutates nothing. The habitat applies the returned proposal in its own
//! apply phase.
//!
//! Two closed-form potential shapes drive the forces: an exponential barrier
//! derivative that blows up as a test position approaches a wall from inside,
//! and a Gaussian derivative `-2x * exp(-x^2)` that peaks at a tunable offset
//! and decays to zero in the far field.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::body::{ArticulatedBody, BodyId};

/// Tunable steering weights and potential constants.
///
/// The defaults reproduce the original hand-tuned values; none of the
/// constants carry a derivation, so they are configuration, not semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteeringParams {
    /// Weight of the soft wall-repulsion correction
    pub wall_weight: f32,
    /// Base of the exponential wall barrier
    pub barrier_base: f32,
    /// Natural log of `barrier_base`, precomputed
    pub barrier_log: f32,
    /// Walls for the soft barrier sit at tank extent divided by this,
    /// slightly inside the hard-bounce planes
    pub wall_margin_divisor: f32,
    /// Weight of the same-rank collision reflection
    pub bounce_weight: f32,
    /// Weight of the same-rank gravitation pull
    pub flock_weight: f32,
    /// The gravitation pull crosses zero at this multiple of the boundary radius
    pub flock_radius_factor: f32,
    /// Far-field limit of the gravitation pull
    pub flock_limit: f32,
    /// Weight of the chase force toward the most junior prey
    pub chase_weight: f32,
    /// Weight of the escape force away from a more dominant predator
    pub flee_weight: f32,
}

impl Default for SteeringParams {
    fn default() -> Self {
        SteeringParams {
            wall_weight: 0.09,
            barrier_base: 30.0,
            barrier_log: 3.4012,
            wall_margin_divisor: 2.162,
            bounce_weight: 0.3,
            flock_weight: 0.01,
            flock_radius_factor: 1.5,
            flock_limit: 0.5,
            chase_weight: 0.05,
            flee_weight: 0.04,
        }
    }
}

/// Result of one steering computation
#[derive(Debug, Clone)]
pub struct StepProposal {
    /// Velocity to apply in the habitat's apply phase
    pub velocity: Vec3,
    /// Peers this body claims as kills. `None` only when the hard wall
    /// bounce fired and short-circuited the tick.
    pub kills: Option<Vec<BodyId>>,
}

/// Compute a body's velocity proposal against the current, unmutated peer set.
///
/// Priority order: hard wall containment (short-circuits), soft wall
/// repulsion, pairwise collision/predation and behavioral forces, then
/// heading renormalization.
pub fn compute_step(
    body: &ArticulatedBody,
    peers: &[&ArticulatedBody],
    tank_dimensions: Vec3,
    params: &SteeringParams,
) -> StepProposal {
    let speed = body.speed();
    let radius = body.radius();
    let mut heading = body.heading();
    let test_pos = body.test_position();

    // Hard containment: reflect off any wall the test position crosses.
    // Highest priority; if any axis triggered, no further forces this tick.
    let mut hit = false;
    for dim in 0..3 {
        let limit = tank_dimensions[dim] / 2.0 - radius;
        if test_pos[dim] > limit || test_pos[dim] < -limit {
            heading[dim] = -heading[dim];
            hit = true;
        }
    }
    if hit {
        return StepProposal {
            velocity: heading * speed,
            kills: None,
        };
    }

    let mut force = Vec3::ZERO;

    // Soft wall repulsion: exponential barrier against all six walls,
    // evaluated slightly inside the hard-bounce planes.
    let margin = tank_dimensions / params.wall_margin_divisor;
    let barrier = barrier_upper(params.barrier_base, params.barrier_log, test_pos - margin)
        + barrier_lower(params.barrier_base, params.barrier_log, test_pos + margin);
    force -= barrier * params.wall_weight;

    // The most junior rank present gates predation and chasing: only the
    // weakest tier currently in the tank is eligible prey.
    let most_junior = peers
        .iter()
        .filter(|p| p.id() != body.id())
        .map(|p| p.rank())
        .max();

    let mut kills = Vec::new();
    for peer in peers {
        if peer.id() == body.id() {
            continue;
        }
        let peer_test = peer.test_position();
        let to_peer = peer_test - test_pos;

        // Collision between boundary spheres
        if to_peer.length() < radius + peer.radius() {
            if body.rank() == peer.rank() {
                // Same species bounce apart: reflect own heading about the
                // separation normal
                force += reflect(heading, to_peer.normalize_or_zero()) * params.bounce_weight;
            } else if body.rank() < peer.rank()
                && Some(peer.rank()) == most_junior
                && kills.is_empty()
            {
                // One kill credited per tick
                kills.push(peer.id());
            }
        }

        // Behavioral forces apply whether or not the spheres touch
        let offset = test_pos - peer_test;
        if body.rank() == peer.rank() {
            // Loose flocking: capped inverse-distance gravitation
            force -= gravity_pull(
                params.flock_radius_factor * radius,
                params.flock_limit,
                offset,
            ) * params.flock_weight;
        } else if body.rank() < peer.rank() {
            if Some(peer.rank()) == most_junior {
                // Chase the eligible prey
                force += gaussian_pull(offset) * params.chase_weight;
            }
        } else {
            // Escape the more dominant predator
            force -= gaussian_pull(offset) * params.flee_weight;
        }
    }

    heading += force;
    heading = normalize_or_keep(heading, body.heading());

    StepProposal {
        velocity: heading * speed,
        kills: Some(kills),
    }
}

/// Reflection of `v` about the plane with unit normal `n`
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Renormalize a heading; transient numeric degeneracy (a near-zero norm)
/// falls back to the previous heading instead of failing.
fn normalize_or_keep(v: Vec3, fallback: Vec3) -> Vec3 {
    let len = v.length();
    if len > 1e-6 {
        v / len
    } else {
        fallback
    }
}

/// Derivative of the exponential barrier `base^x`, growing without bound as
/// `x` approaches zero from below
fn barrier_upper(base: f32, log_base: f32, x: Vec3) -> Vec3 {
    log_base * Vec3::new(base.powf(x.x), base.powf(x.y), base.powf(x.z))
}

/// Derivative of the mirrored barrier `base^(-x)`
fn barrier_lower(base: f32, log_base: f32, x: Vec3) -> Vec3 {
    -log_base * Vec3::new(base.powf(-x.x), base.powf(-x.y), base.powf(-x.z))
}

/// Capped inverse-distance pull mimicking gravity for flocking:
/// `sign(x) * (b - a / |x|)` per component, crossing zero at `|x| = a / b`
fn gravity_pull(a: f32, b: f32, x: Vec3) -> Vec3 {
    let component = |c: f32| {
        if c.abs() < 1e-9 {
            0.0
        } else {
            c.signum() * (b - a / c.abs())
        }
    };
    Vec3::new(component(x.x), component(x.y), component(x.z))
}

/// Gaussian derivative `-2x * exp(-x^2)` per component: peaks near the
/// origin offset, decays to zero in the far field
fn gaussian_pull(x: Vec3) -> Vec3 {
    let component = |c: f32| -2.0 * c * (-c * c).exp();
    Vec3::new(component(x.x), component(x.y), component(x.z))
}
