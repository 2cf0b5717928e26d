//! Habitat orchestration for Vivarium
//!
//! Owns the occupant list and the scene graph, and drives the two-phase
//! simulation tick: compute all steering proposals against a consistent
//! snapshot, then apply movement, animation, and removals.

pub mod habitat;
pub mod occupant;

// Re-export main types for convenience
pub use habitat::Habitat;
pub use occupant::Occupant;
