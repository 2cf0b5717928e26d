//! Scene graph error taxonomy
//!
//! All of these are programmer-error class failures raised at model-assembly
//! time. Steady-state simulation code never produces them.

use thiserror::Error;

use crate::graph::NodeId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    /// A non-uniform scale was requested. Nodes only accept uniform scaling.
    #[error("only uniform scaling is accepted, got ({0}, {1}, {2})")]
    InvalidScale(f32, f32, f32),

    /// A rotation extent was given with its bounds out of order.
    #[error("rotation extent minimum {min} exceeds maximum {max}")]
    InvalidExtent { min: f32, max: f32 },

    /// A node id was used that is not part of this scene graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// A malformed parent/child relationship was requested.
    #[error("invalid child relationship: {0}")]
    InvalidGeometry(&'static str),
}
