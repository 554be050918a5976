//! Colored, transformable unit-cube renderables
//!
//! [`CubeFactory`] is the one seam between the map core and the renderer:
//! the core requests a cube per placement and never touches graphics state.
//! [`MeshCubeFactory`] is the CPU-side implementation used by tests and
//! tooling; an engine substitutes its own GPU-backed factory.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use crate::scene::{DrawContext, LocalTransform, MeshAsset, MeshNode, Renderable, Vertex};

/// Build the unit cube mesh with a uniform vertex color.
///
/// Eight shared corners, twelve triangles, centered at the origin with edge
/// length 1. Scaling happens in the node transform, not the mesh.
pub fn unit_cube_mesh(name: impl Into<String>, color: Vec4) -> MeshAsset {
    let corner = |x: f32, y: f32, z: f32| Vertex {
        position: Vec3::new(x, y, z),
        normal: Vec3::X,
        color,
        uv: Vec2::ZERO,
    };

    // Top face (y = 0.5):   Bottom face (y = -0.5):
    // 0   1                 4   5
    //
    // 2   3                 6   7
    let vertices = vec![
        corner(-0.5, 0.5, -0.5),
        corner(0.5, 0.5, -0.5),
        corner(-0.5, 0.5, 0.5),
        corner(0.5, 0.5, 0.5),
        corner(-0.5, -0.5, -0.5),
        corner(0.5, -0.5, -0.5),
        corner(-0.5, -0.5, 0.5),
        corner(0.5, -0.5, 0.5),
    ];

    let indices = vec![
        0, 2, 1, 1, 2, 3, // top
        4, 6, 5, 5, 6, 7, // bottom
        0, 4, 1, 1, 4, 5, // back
        2, 6, 3, 3, 6, 7, // front
        0, 4, 2, 2, 4, 6, // left
        3, 7, 1, 1, 7, 5, // right
    ];

    MeshAsset::new(name, vertices, indices)
}

/// A placed cube renderable.
#[derive(Clone, Debug)]
pub struct Cube {
    node: MeshNode,
}

impl Cube {
    pub fn new(
        name: impl Into<String>,
        translate: Vec3,
        rotation: Quat,
        scale: Vec3,
        color: Vec4,
    ) -> Self {
        let mesh = Arc::new(unit_cube_mesh(name, color));
        let node = MeshNode::new(
            mesh,
            LocalTransform {
                position: translate,
                rotation,
                scale,
            },
        );
        Self { node }
    }

    pub fn mesh(&self) -> &Arc<MeshAsset> {
        &self.node.mesh
    }
}

impl Renderable for Cube {
    fn draw(&self, top_matrix: &Mat4, ctx: &mut DrawContext) {
        self.node.draw(top_matrix, ctx);
    }
}

/// Creates a renderable cube for each requested placement.
pub trait CubeFactory {
    type Cube: Renderable;

    fn create_cube(
        &mut self,
        name: &str,
        translate: Vec3,
        rotation: Quat,
        scale: Vec3,
        color: Vec4,
    ) -> Self::Cube;
}

/// CPU-side cube factory. Counts what it hands out.
#[derive(Default)]
pub struct MeshCubeFactory {
    created: usize,
}

impl MeshCubeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cubes created so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl CubeFactory for MeshCubeFactory {
    type Cube = Cube;

    fn create_cube(
        &mut self,
        name: &str,
        translate: Vec3,
        rotation: Quat,
        scale: Vec3,
        color: Vec4,
    ) -> Cube {
        self.created += 1;
        Cube::new(name, translate, rotation, scale, color)
    }
}
