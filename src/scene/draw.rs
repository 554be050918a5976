//! Draw context and mesh data
//!
//! A [`DrawContext`] collects everything to be rendered this frame. Drawing
//! is purely additive: renderables append [`RenderObject`]s and the renderer
//! drains the lists after submitting the frame.

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3, Vec4};

/// A single mesh vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Vec4,
    pub uv: Vec2,
}

/// Axis-aligned bounds with a bounding-sphere radius for culling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub origin: Vec3,
    pub extents: Vec3,
    pub sphere_radius: f32,
}

impl Bounds {
    /// Bounds of a vertex set. Zero-sized at the origin for an empty mesh.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let Some(first) = vertices.first() else {
            return Self {
                origin: Vec3::ZERO,
                extents: Vec3::ZERO,
                sphere_radius: 0.0,
            };
        };

        let mut min_pos = first.position;
        let mut max_pos = first.position;
        for vertex in vertices {
            min_pos = min_pos.min(vertex.position);
            max_pos = max_pos.max(vertex.position);
        }

        let extents = (max_pos - min_pos) / 2.0;
        Self {
            origin: (max_pos + min_pos) / 2.0,
            extents,
            sphere_radius: extents.length(),
        }
    }
}

/// CPU-side mesh: named vertex/index data plus precomputed bounds.
///
/// The external renderer uploads this once and keeps its own GPU handles;
/// the map core only ever shares it through an [`Arc`].
#[derive(Clone, Debug)]
pub struct MeshAsset {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounds: Bounds,
}

impl MeshAsset {
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let bounds = Bounds::from_vertices(&vertices);
        Self {
            name: name.into(),
            vertices,
            indices,
            bounds,
        }
    }
}

/// One surface enqueued for the current frame.
#[derive(Clone, Debug)]
pub struct RenderObject {
    pub transform: Mat4,
    pub mesh: Arc<MeshAsset>,
}

/// Per-frame draw lists.
#[derive(Default)]
pub struct DrawContext {
    pub opaque_surfaces: Vec<RenderObject>,
}

impl DrawContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything queued for this frame.
    pub fn clear(&mut self) {
        self.opaque_surfaces.clear();
    }
}
