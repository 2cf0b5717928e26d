//! Hierarchical transform scene graph for Vivarium
//!
//! This crate implements:
//! - Transform nodes with per-axis Euler rotation extents and an optional
//!   overriding orientation quaternion
//! - An arena-backed node tree with cached world matrices
//! - Shape descriptors and a narrow draw interface for render backends

pub mod axis;
pub mod draw;
pub mod error;
pub mod graph;
pub mod node;
pub mod shape;

// Re-export main types for convenience
pub use axis::Axis;
pub use draw::{DrawBackend, DrawCommand};
pub use error::SceneError;
pub use graph::{NodeId, SceneGraph};
pub use node::{AngleExtent, TransformNode};
pub use shape::{Color, Shape};
