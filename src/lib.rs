//! Tdmaze - tower-defense map core for a 3D engine
//!
//! Parses textual map grids, proves they form a single well-formed maze
//! (one core, full connectivity, one-tile-wide entries, no dead ends), and
//! compiles validated layouts into placed renderable cubes. The GPU renderer
//! itself is an external collaborator, reached only through the cube-factory
//! and draw-context contracts in [`geometry`] and [`scene`].

pub mod core;
pub mod geometry;
pub mod map;
pub mod scene;
