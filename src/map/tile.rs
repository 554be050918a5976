//! Tile vocabulary: the closed set of tile types and their text/color forms

use glam::Vec4;

/// One cell of the map grid.
///
/// `Invalid` is a sentinel for out-of-bounds lookups and never appears in a
/// parsed map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileType {
    #[default]
    Invalid,
    Path,
    Wall,
    Core,
}

impl TileType {
    /// Resolve a map-file character. Returns `None` for unsupported characters.
    pub fn from_char(c: char) -> Option<TileType> {
        match c {
            ' ' => Some(TileType::Path),
            '#' => Some(TileType::Wall),
            'O' => Some(TileType::Core),
            _ => None,
        }
    }

    /// The character this tile is written as in a map file.
    ///
    /// Inverse of [`TileType::from_char`] for the three valid variants.
    /// Panics on `Invalid`, which has no textual form.
    pub fn to_char(self) -> char {
        match self {
            TileType::Path => ' ',
            TileType::Wall => '#',
            TileType::Core => 'O',
            TileType::Invalid => panic!("Tile type not supported"),
        }
    }

    /// Display color (RGBA, alpha 1.0). Panics on `Invalid`.
    pub fn color(self) -> Vec4 {
        match self {
            TileType::Path => Vec4::new(60.0 / 255.0, 168.0 / 255.0, 50.0 / 255.0, 1.0),
            TileType::Wall => Vec4::new(64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0, 1.0),
            TileType::Core => Vec4::new(199.0 / 255.0, 40.0 / 255.0, 0.0, 1.0),
            TileType::Invalid => panic!("Tile type not supported"),
        }
    }

    /// Whether a traversal may step onto this tile.
    pub fn is_traversable(self) -> bool {
        matches!(self, TileType::Path | TileType::Core)
    }
}
