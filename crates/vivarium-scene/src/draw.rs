//! Narrow interface between the scene graph and a render backend

use glam::Mat4;

use crate::shape::{Color, Shape};

/// One drawable node, resolved to its world transform
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand {
    pub world: Mat4,
    pub shape: Shape,
    pub color: Color,
}

/// Push-style render sink. Rendering detail is opaque to the scene graph;
/// it only supplies the world transform and color.
pub trait DrawBackend {
    fn draw(&mut self, world: Mat4, color: Color);
}
