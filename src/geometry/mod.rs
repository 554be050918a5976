//! Placeable primitive geometry

pub mod cube;

pub use cube::{unit_cube_mesh, Cube, CubeFactory, MeshCubeFactory};
