//! Concrete species models
//!
//! Each builder assembles a transform-node subtree for one creature, registers
//! its animated joints, and wraps the result in a `Steerable` occupant. Segment
//! sizes and colors are model data, not simulation semantics.

use glam::Vec3;

use vivarium_scene::{Axis, Color, NodeId, SceneError, SceneGraph, Shape, TransformNode};

mod cod;
mod food;
mod shark;

pub use cod::Cod;
pub use food::Food;
pub use shark::Shark;

// Cod palette
pub const COD_HEAD: Color = [155.0 / 255.0, 140.0 / 255.0, 114.0 / 255.0];
pub const COD_BODY: Color = [129.0 / 255.0, 104.0 / 255.0, 84.0 / 255.0];
pub const COD_FIN1: Color = [84.0 / 255.0, 72.0 / 255.0, 53.0 / 255.0];
pub const COD_FIN2: Color = [165.0 / 255.0, 147.0 / 255.0, 120.0 / 255.0];
pub const COD_TAIL1: Color = [142.0 / 255.0, 126.0 / 255.0, 106.0 / 255.0];
pub const COD_TAIL2: Color = [165.0 / 255.0, 147.0 / 255.0, 120.0 / 255.0];

// Shark palette
pub const SHARK_GREY: Color = [0.243, 0.275, 0.376];
pub const SHARK_LIGHTGREY: Color = [0.302, 0.345, 0.470];

// Food pellet palette, picked from at random per pellet
pub const FOOD_PALETTE: [Color; 4] = [
    [0.95, 0.61, 0.25],
    [0.85, 0.30, 0.22],
    [0.55, 0.76, 0.29],
    [0.93, 0.82, 0.31],
];

pub const EYE_WHITE: Color = [1.0, 1.0, 1.0];
pub const EYE_BLACK: Color = [0.0, 0.0, 0.0];

/// Base segment size of a fin, scaled per axis by the caller
const FIN_SEGMENT: Vec3 = Vec3::new(0.08, 0.12, 0.6);

/// Build a fin as a chain of segments, each bent 10 degrees further along
/// the u axis. Returns the base segment node.
pub(crate) fn create_fin(
    scene: &mut SceneGraph,
    segments: usize,
    size_scale: Vec3,
    color: Color,
) -> Result<NodeId, SceneError> {
    let size = FIN_SEGMENT * size_scale;
    let base = scene.insert(TransformNode::new(Vec3::ZERO).with_shape(Shape::Cube { size }, color));
    let mut parent = base;
    for _ in 1..segments {
        let segment =
            scene.insert(TransformNode::new(Vec3::ZERO).with_shape(Shape::Cube { size }, color));
        scene
            .get_mut(segment)
            .expect("segment just inserted")
            .set_angle(Axis::U, -10.0);
        scene.add_child(parent, segment)?;
        parent = segment;
    }
    Ok(base)
}

/// Build an eye: a flattened sphere with a pupil shifted to the surface.
/// Returns the eye node; the caller angles it outward on its v axis.
pub(crate) fn create_eye(
    scene: &mut SceneGraph,
    position: Vec3,
    radius: f32,
    eye_color: Color,
    pupil_color: Color,
) -> Result<NodeId, SceneError> {
    let thickness = radius * 0.75;
    let eye = scene.insert(TransformNode::new(position).with_shape(
        Shape::Sphere {
            size: Vec3::new(radius, radius, thickness),
        },
        eye_color,
    ));
    let pupil_thickness = thickness / 3.0;
    let pupil = scene.insert(
        TransformNode::new(Vec3::new(0.0, 0.0, thickness - pupil_thickness)).with_shape(
            Shape::Sphere {
                size: Vec3::new(radius * 0.5, radius * 0.5, pupil_thickness),
            },
            pupil_color,
        ),
    );
    scene
        .get_mut(pupil)
        .expect("pupil just inserted")
        .set_extents((-30.0, 54.0), (0.0, 0.0), (-44.0, 47.0))?;
    scene.add_child(eye, pupil)?;
    Ok(eye)
}
