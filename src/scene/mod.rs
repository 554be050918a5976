//! CPU-side renderable model
//!
//! The narrow contract between the map core and the external renderer:
//! renderables push [`RenderObject`]s into a [`DrawContext`] each frame; the
//! renderer consumes the context's draw lists. Nothing here owns GPU
//! resources.

pub mod draw;
pub mod node;

pub use draw::{Bounds, DrawContext, MeshAsset, RenderObject, Vertex};
pub use node::{LocalTransform, MeshNode, Renderable};
