//! Maze topology validation
//!
//! A breadth-first traversal from the core over 4-connected path tiles.
//! Layered BFS discovery makes the depth labels true distance-from-core
//! layers, so every check here is independent of tie-break order:
//!
//! - a previously discovered neighbor must sit exactly one layer away
//!   (the visited-map invariant; a violation is reported as a cycle),
//! - an edge tile must not touch another edge path tile (entry points are
//!   exactly one tile wide),
//! - an interior path tile must have at least two traversable neighbors
//!   (otherwise the path stops short of the map edge),
//! - after the traversal, every path tile must have been reached.

use std::collections::{HashMap, VecDeque};

use super::error::TopologyError;
use super::layout::{MapLayout, TileCoord};
use super::tile::TileType;

/// Traverse the maze from the core and prove it well-formed.
///
/// Returns the entry points in visitation order.
pub(crate) fn validate(layout: &MapLayout) -> Result<Vec<TileCoord>, TopologyError> {
    let core = layout.core();

    let mut visited: HashMap<TileCoord, u32> = HashMap::new();
    let mut frontier: VecDeque<TileCoord> = VecDeque::new();
    let mut entry_points: Vec<TileCoord> = Vec::new();

    visited.insert(core, 0);
    frontier.push_back(core);

    // First tile of the deepest layer reached, reported when a closed maze
    // has no way out.
    let mut deepest = core;
    let mut max_depth = 0;

    while let Some(current) = frontier.pop_front() {
        let depth = visited[&current];
        if depth > max_depth {
            max_depth = depth;
            deepest = current;
        }

        for neighbor in current.orthogonal() {
            if let Some(&seen) = visited.get(&neighbor) {
                if seen.abs_diff(depth) != 1 {
                    return Err(TopologyError::Cycle {
                        at: current,
                        neighbor,
                    });
                }
            } else if layout.tile(neighbor) == TileType::Path {
                visited.insert(neighbor, depth + 1);
                frontier.push_back(neighbor);
            }
        }

        if layout.is_on_edge(current) {
            // A second path tile along the same stretch of edge would make
            // the entry wider than one tile.
            for neighbor in current.orthogonal() {
                if layout.is_in_bounds(neighbor)
                    && layout.is_on_edge(neighbor)
                    && layout.tile(neighbor) == TileType::Path
                {
                    return Err(TopologyError::EntryTooWide {
                        at: current,
                        neighbor,
                    });
                }
            }
            if layout.tile(current) == TileType::Path {
                entry_points.push(current);
            }
        } else if layout.tile(current) == TileType::Path {
            let onward = current
                .orthogonal()
                .iter()
                .filter(|&&n| layout.tile(n).is_traversable())
                .count();
            if onward < 2 {
                return Err(TopologyError::DeadEnd { at: current });
            }
        }
    }

    for row in 0..layout.num_rows() as i32 {
        for col in 0..layout.num_cols() as i32 {
            let at = TileCoord::new(row, col);
            if layout.tile(at) == TileType::Path && !visited.contains_key(&at) {
                return Err(TopologyError::DisconnectedPath { at });
            }
        }
    }

    // A maze with path tiles but no entry point traps everything inside.
    // Report the tile where the walk ran out of room.
    if entry_points.is_empty() && visited.len() > 1 {
        return Err(TopologyError::DeadEnd { at: deepest });
    }

    Ok(entry_points)
}
