//! Articulated creatures for Vivarium
//!
//! This crate implements:
//! - Articulated bodies: transform-node subtrees with periodic joint drivers
//! - The steering engine: per-tick velocity proposals from potential fields,
//!   collision bounces, and rank-gated predation
//! - The `Steerable` trait the habitat drives occupants through
//! - Concrete species models (cod, shark, food pellets)

pub mod body;
pub mod species;
pub mod steering;
pub mod traits;

// Re-export main types for convenience
pub use body::{ArticulatedBody, BodyId, BodyParams, JointDriver};
pub use species::{Cod, Food, Shark};
pub use steering::{SteeringParams, StepProposal};
pub use traits::Steerable;
