//! Renderable nodes
//!
//! Local/world transforms and the leaf mesh node. Anything the renderer can
//! draw exposes the single [`Renderable::draw`] capability.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use super::draw::{DrawContext, MeshAsset, RenderObject};

/// Local transform relative to the parent node.
#[derive(Clone, Debug)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Identity transform (no translation, rotation, or scaling).
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a translation-only transform.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Convert to a 4x4 matrix.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Anything that can enqueue geometry for the current frame.
pub trait Renderable {
    fn draw(&self, top_matrix: &Mat4, ctx: &mut DrawContext);
}

/// A leaf node holding one mesh.
#[derive(Clone, Debug)]
pub struct MeshNode {
    pub local_transform: LocalTransform,
    /// Cached world transform (recomputed during propagation).
    pub world_transform: Mat4,
    pub mesh: Arc<MeshAsset>,
}

impl MeshNode {
    pub fn new(mesh: Arc<MeshAsset>, local_transform: LocalTransform) -> Self {
        let world_transform = local_transform.to_mat4();
        Self {
            local_transform,
            world_transform,
            mesh,
        }
    }

    /// Recompute the cached world transform from a parent matrix.
    pub fn refresh_transform(&mut self, parent_matrix: &Mat4) {
        self.world_transform = *parent_matrix * self.local_transform.to_mat4();
    }
}

impl Renderable for MeshNode {
    fn draw(&self, top_matrix: &Mat4, ctx: &mut DrawContext) {
        ctx.opaque_surfaces.push(RenderObject {
            transform: *top_matrix * self.world_transform,
            mesh: self.mesh.clone(),
        });
    }
}
