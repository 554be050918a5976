//! Map layout parsing
//!
//! [`MapLayout::from_source`] reads a rectangular character grid, resolves
//! every character through the tile vocabulary, records the unique core, and
//! hands the grid to the topology validator. The grid is immutable once
//! validation succeeds.

use std::fmt;
use std::path::Path;

use super::error::{FormatError, MapError};
use super::tile::TileType;
use super::topology;

/// Grid coordinate (row, col). Rows grow downward, columns to the right.
///
/// Signed so that neighbor probes can step off the grid; out-of-bounds
/// lookups resolve to [`TileType::Invalid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub row: i32,
    pub col: i32,
}

impl TileCoord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The 4-connected neighbors, in the traversal's probe order:
    /// above, below, right, left.
    pub fn orthogonal(self) -> [TileCoord; 4] {
        [
            TileCoord::new(self.row - 1, self.col),
            TileCoord::new(self.row + 1, self.col),
            TileCoord::new(self.row, self.col + 1),
            TileCoord::new(self.row, self.col - 1),
        ]
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.col)
    }
}

/// A parsed and validated map.
#[derive(Debug)]
pub struct MapLayout {
    tiles: Vec<Vec<TileType>>,
    core: TileCoord,
    entry_points: Vec<TileCoord>,
}

impl MapLayout {
    /// Parse and validate a map from text, one line per grid row.
    pub fn from_source(source: &str) -> Result<MapLayout, MapError> {
        let mut layout = Self::parse(source)?;
        layout.entry_points = topology::validate(&layout)?;
        log::debug!(
            "Validated {}x{} map, {} entry point(s)",
            layout.num_rows(),
            layout.num_cols(),
            layout.entry_points.len()
        );
        Ok(layout)
    }

    /// Parse and validate a map file.
    pub fn from_path(path: &Path) -> crate::core::Result<MapLayout> {
        let source = std::fs::read_to_string(path)?;
        log::info!("Loaded map at: {}", path.display());
        Ok(Self::from_source(&source)?)
    }

    /// Parse the grid without validating its topology. The column count is
    /// fixed by the first line; entry points are left for the validator.
    fn parse(source: &str) -> Result<MapLayout, FormatError> {
        let mut tiles: Vec<Vec<TileType>> = Vec::new();
        let mut core: Option<TileCoord> = None;
        let mut num_cols: Option<usize> = None;

        for (row, line) in source.lines().enumerate() {
            let expected = *num_cols.get_or_insert(line.chars().count());
            let found = line.chars().count();
            if found != expected {
                return Err(FormatError::InconsistentRowWidth {
                    row,
                    expected,
                    found,
                });
            }

            let mut tile_row = Vec::with_capacity(expected);
            for (col, c) in line.chars().enumerate() {
                let at = TileCoord::new(row as i32, col as i32);
                let tile = TileType::from_char(c)
                    .ok_or(FormatError::UnsupportedTile { ch: c, at })?;
                if tile == TileType::Core {
                    if let Some(first) = core {
                        return Err(FormatError::MultipleCores { first, second: at });
                    }
                    core = Some(at);
                }
                tile_row.push(tile);
            }
            tiles.push(tile_row);
        }

        let core = core.ok_or(FormatError::MissingCore)?;
        Ok(MapLayout {
            tiles,
            core,
            entry_points: Vec::new(),
        })
    }

    pub fn num_rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn num_cols(&self) -> usize {
        self.tiles.first().map(Vec::len).unwrap_or(0)
    }

    /// Location of the core tile.
    pub fn core(&self) -> TileCoord {
        self.core
    }

    /// Edge-adjacent path tiles, in validation visitation order.
    pub fn entry_points(&self) -> &[TileCoord] {
        &self.entry_points
    }

    /// Tile at `coord`, or [`TileType::Invalid`] out of bounds.
    pub fn tile(&self, coord: TileCoord) -> TileType {
        if !self.is_in_bounds(coord) {
            return TileType::Invalid;
        }
        self.tiles[coord.row as usize][coord.col as usize]
    }

    pub fn is_in_bounds(&self, coord: TileCoord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && coord.row < self.num_rows() as i32
            && coord.col < self.num_cols() as i32
    }

    /// Whether `coord` lies on the grid's outer edge.
    pub fn is_on_edge(&self, coord: TileCoord) -> bool {
        coord.row == 0
            || coord.col == 0
            || coord.row == self.num_rows() as i32 - 1
            || coord.col == self.num_cols() as i32 - 1
    }
}

impl fmt::Display for MapLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            for tile in row {
                write!(f, "{}", tile.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::error::TopologyError;
    use std::io::Write;

    const RING_MAP: &str = "\
#####
#   #
# O #
#   #
## ##";

    #[test]
    fn test_parse_ring_map() {
        let layout = MapLayout::from_source(RING_MAP).unwrap();
        assert_eq!(layout.num_rows(), 5);
        assert_eq!(layout.num_cols(), 5);
        assert_eq!(layout.core(), TileCoord::new(2, 2));
        assert_eq!(layout.tile(TileCoord::new(0, 0)), TileType::Wall);
        assert_eq!(layout.tile(TileCoord::new(1, 1)), TileType::Path);
    }

    #[test]
    fn test_out_of_bounds_is_invalid() {
        let layout = MapLayout::from_source(RING_MAP).unwrap();
        assert_eq!(layout.tile(TileCoord::new(-1, 0)), TileType::Invalid);
        assert_eq!(layout.tile(TileCoord::new(0, 5)), TileType::Invalid);
    }

    #[test]
    fn test_missing_core() {
        let err = MapLayout::from_source("###\n# #\n###").unwrap_err();
        assert_eq!(err, MapError::Format(FormatError::MissingCore));
    }

    #[test]
    fn test_empty_input_is_missing_core() {
        let err = MapLayout::from_source("").unwrap_err();
        assert_eq!(err, MapError::Format(FormatError::MissingCore));
    }

    #[test]
    fn test_multiple_cores() {
        let err = MapLayout::from_source("#####\n#O O#\n#####").unwrap_err();
        assert_eq!(
            err,
            MapError::Format(FormatError::MultipleCores {
                first: TileCoord::new(1, 1),
                second: TileCoord::new(1, 3),
            })
        );
    }

    #[test]
    fn test_inconsistent_row_width() {
        let err = MapLayout::from_source("#####\n##\n#####").unwrap_err();
        assert_eq!(
            err,
            MapError::Format(FormatError::InconsistentRowWidth {
                row: 1,
                expected: 5,
                found: 2,
            })
        );
    }

    #[test]
    fn test_row_width_checked_before_topology() {
        // The second row is both too short and topologically broken; the
        // format error must win.
        let err = MapLayout::from_source("## ##\n# \n#O###").unwrap_err();
        assert!(matches!(err, MapError::Format(_)));
    }

    #[test]
    fn test_unsupported_character() {
        let err = MapLayout::from_source("###\n#x#\n###").unwrap_err();
        assert_eq!(
            err,
            MapError::Format(FormatError::UnsupportedTile {
                ch: 'x',
                at: TileCoord::new(1, 1),
            })
        );
    }

    #[test]
    fn test_display_round_trips() {
        let layout = MapLayout::from_source(RING_MAP).unwrap();
        assert_eq!(layout.to_string().trim_end(), RING_MAP);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{RING_MAP}").unwrap();
        let layout = MapLayout::from_path(file.path()).unwrap();
        assert_eq!(layout.core(), TileCoord::new(2, 2));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = MapLayout::from_path(Path::new("does/not/exist.tdm")).unwrap_err();
        assert!(matches!(err, crate::core::Error::Io(_)));
    }

    #[test]
    fn test_from_path_invalid_map() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#####\n#O  #\n#####").unwrap();
        let err = MapLayout::from_path(file.path()).unwrap_err();
        assert!(matches!(
            err,
            crate::core::Error::Map(MapError::Topology(TopologyError::DeadEnd { .. }))
        ));
    }
}
