//! Map error taxonomy
//!
//! Two families: [`FormatError`] for malformed textual input and
//! [`TopologyError`] for structurally invalid mazes. Both are plain data so
//! callers (tests, tooling, the game loader) can match on the exact failure
//! instead of the process aborting.

use thiserror::Error;

use super::layout::TileCoord;

/// Malformed textual map input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("All lines in map must have the same number of tiles (row {row} has {found}, expected {expected})")]
    InconsistentRowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unsupported tile type {ch:?} at {at}")]
    UnsupportedTile { ch: char, at: TileCoord },

    #[error("Maps can only have one core (first at {first}, second at {second})")]
    MultipleCores { first: TileCoord, second: TileCoord },

    #[error("Map must have a core")]
    MissingCore,
}

/// Structurally invalid maze.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("Graph cannot contain a cycle (between {at} and {neighbor})")]
    Cycle { at: TileCoord, neighbor: TileCoord },

    #[error("Map entry point is wider than one tile ({at} touches {neighbor})")]
    EntryTooWide { at: TileCoord, neighbor: TileCoord },

    #[error("Map has a path with a dead-end (path that does not lead to the edge of the map) at {at}")]
    DeadEnd { at: TileCoord },

    #[error("All paths must be connected to the core ({at} is unreachable)")]
    DisconnectedPath { at: TileCoord },
}

/// Any way a map file can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}
