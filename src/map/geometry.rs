//! Layout-to-geometry compilation
//!
//! Turns a validated [`MapLayout`] into the full set of cube placements the
//! renderer needs: one block per tile, a marker above the core, a spawn
//! staging pad behind each entry point, wall-colored fills closing the
//! perimeter around the pads, and margin slabs sealing the world boundary.
//! [`compile_layout`] is pure; [`Map::build`] requests one renderable cube
//! per placement through the [`CubeFactory`] seam.

use glam::{Mat4, Quat, Vec3, Vec4};

use crate::geometry::CubeFactory;
use crate::scene::{DrawContext, Renderable};

use super::config::MapConfig;
use super::layout::{MapLayout, TileCoord};
use super::tile::TileType;

/// Position, rotation, scale, and color of one requested cube.
#[derive(Clone, Debug, PartialEq)]
pub struct CubePlacement {
    pub translate: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub color: Vec4,
}

impl CubePlacement {
    fn block(translate: Vec3, scale: Vec3, color: Vec4) -> Self {
        Self {
            translate,
            rotation: Quat::IDENTITY,
            scale,
            color,
        }
    }
}

/// Which side of the grid an entry point opens onto.
///
/// North is row 0 (-Z), west is column 0 (-X).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    North,
    South,
    West,
    East,
}

const EDGES: [Edge; 4] = [Edge::North, Edge::South, Edge::West, Edge::East];

impl Edge {
    fn of_entry(layout: &MapLayout, entry: TileCoord) -> Edge {
        if entry.row == 0 {
            Edge::North
        } else if entry.row == layout.num_rows() as i32 - 1 {
            Edge::South
        } else if entry.col == 0 {
            Edge::West
        } else {
            Edge::East
        }
    }

    /// Unit (row, col) step pointing out of the playfield.
    fn outward(self) -> (f32, f32) {
        match self {
            Edge::North => (-1.0, 0.0),
            Edge::South => (1.0, 0.0),
            Edge::West => (0.0, -1.0),
            Edge::East => (0.0, 1.0),
        }
    }
}

/// Every placement needed to render one map, grouped by role.
///
/// Compiling the same layout with the same config yields an equal value;
/// only the cube handles created from it differ.
#[derive(Clone, Debug, PartialEq)]
pub struct MapGeometry {
    /// One block per grid cell, row-major.
    pub tile_rows: Vec<Vec<CubePlacement>>,
    /// Accent cube floating above the core tile.
    pub core_marker: CubePlacement,
    /// One staging pad per entry point, in entry order.
    pub spawn_pads: Vec<CubePlacement>,
    /// Perimeter fills flanking the pads, per edge north/south/west/east.
    pub occluders: Vec<CubePlacement>,
    /// Boundary slabs, outer corners, and inner corner fills.
    pub margins: Vec<CubePlacement>,
}

impl MapGeometry {
    pub fn placement_count(&self) -> usize {
        let tiles: usize = self.tile_rows.iter().map(Vec::len).sum();
        tiles + self.spawn_pads.len() + self.occluders.len() + self.margins.len() + 1
    }
}

fn spawn_color() -> Vec4 {
    Vec4::new(184.0 / 255.0, 138.0 / 255.0, 43.0 / 255.0, 1.0)
}

fn core_marker_color() -> Vec4 {
    Vec4::new(1.0, 120.0 / 255.0, 40.0 / 255.0, 1.0)
}

/// Compute every cube placement for a validated layout.
pub fn compile_layout(layout: &MapLayout, config: &MapConfig) -> MapGeometry {
    let s = config.cube_scale;
    let rows = layout.num_rows();
    let cols = layout.num_cols();

    let mut tile_rows = Vec::with_capacity(rows);
    for row in 0..rows as i32 {
        let mut line = Vec::with_capacity(cols);
        for col in 0..cols as i32 {
            let tile = layout.tile(TileCoord::new(row, col));
            // Walls sit one level above the path plane.
            let y = if tile == TileType::Wall { s } else { 0.0 };
            line.push(CubePlacement::block(
                Vec3::new(col as f32 * s, y, row as f32 * s),
                Vec3::splat(s),
                tile.color(),
            ));
        }
        tile_rows.push(line);
    }

    let core = layout.core();
    let core_marker = CubePlacement::block(
        Vec3::new(core.col as f32 * s, 0.75 * s, core.row as f32 * s),
        Vec3::splat(0.5 * s),
        core_marker_color(),
    );

    // Playfield extent in world units (tile centers sit on multiples of s).
    let min_x = -0.5 * s;
    let max_x = (cols as f32 - 0.5) * s;
    let min_z = -0.5 * s;
    let max_z = (rows as f32 - 0.5) * s;

    let pad_size = config.spawn_area_size();
    // Tiles from the entry center to the pad center; leaves the pad flush
    // against the outside of the playfield.
    let reach = (config.spawn_area_padding + 1) as f32;

    let mut spawn_pads = Vec::with_capacity(layout.entry_points().len());
    for &entry in layout.entry_points() {
        let (dr, dc) = Edge::of_entry(layout, entry).outward();
        spawn_pads.push(CubePlacement::block(
            Vec3::new(
                (entry.col as f32 + dc * reach) * s,
                0.0,
                (entry.row as f32 + dr * reach) * s,
            ),
            Vec3::new(pad_size, s, pad_size),
            spawn_color(),
        ));
    }

    // Fill the overhang band on each entry-bearing edge, leaving holes only
    // where the pads themselves sit.
    let mut occluders = Vec::new();
    for edge in EDGES {
        let mut pad_centers: Vec<f32> = layout
            .entry_points()
            .iter()
            .filter(|&&entry| Edge::of_entry(layout, entry) == edge)
            .map(|entry| match edge {
                Edge::North | Edge::South => entry.col as f32 * s,
                Edge::West | Edge::East => entry.row as f32 * s,
            })
            .collect();
        if pad_centers.is_empty() {
            continue;
        }
        pad_centers.sort_by(f32::total_cmp);

        let band_center = match edge {
            Edge::North => min_z - pad_size / 2.0,
            Edge::South => max_z + pad_size / 2.0,
            Edge::West => min_x - pad_size / 2.0,
            Edge::East => max_x + pad_size / 2.0,
        };
        let (lat_min, lat_max) = match edge {
            Edge::North | Edge::South => (min_x, max_x),
            Edge::West | Edge::East => (min_z, max_z),
        };

        let mut cursor = lat_min;
        let mut spans = Vec::new();
        for center in pad_centers {
            let pad_start = center - pad_size / 2.0;
            if pad_start - cursor > f32::EPSILON {
                spans.push((cursor, pad_start));
            }
            cursor = center + pad_size / 2.0;
        }
        if lat_max - cursor > f32::EPSILON {
            spans.push((cursor, lat_max));
        }

        for (start, end) in spans {
            let mid = (start + end) / 2.0;
            let width = end - start;
            let (translate, scale) = match edge {
                Edge::North | Edge::South => (
                    Vec3::new(mid, 0.0, band_center),
                    Vec3::new(width, s, pad_size),
                ),
                Edge::West | Edge::East => (
                    Vec3::new(band_center, 0.0, mid),
                    Vec3::new(pad_size, s, width),
                ),
            };
            occluders.push(CubePlacement::block(translate, scale, TileType::Wall.color()));
        }
    }

    // Bounding box of playfield plus spawn overhangs, sealed with margin
    // slabs, outer corners, and fills where two overhangs meet.
    let overhang = |edge: Edge| {
        let present = layout
            .entry_points()
            .iter()
            .any(|&entry| Edge::of_entry(layout, entry) == edge);
        if present { pad_size } else { 0.0 }
    };
    let o_north = overhang(Edge::North);
    let o_south = overhang(Edge::South);
    let o_west = overhang(Edge::West);
    let o_east = overhang(Edge::East);

    let bx0 = min_x - o_west;
    let bx1 = max_x + o_east;
    let bz0 = min_z - o_north;
    let bz1 = max_z + o_south;
    let m = config.margin_size();
    let wall = TileType::Wall.color();

    let mut margins = vec![
        CubePlacement::block(
            Vec3::new((bx0 + bx1) / 2.0, 0.0, bz0 - m / 2.0),
            Vec3::new(bx1 - bx0, s, m),
            wall,
        ),
        CubePlacement::block(
            Vec3::new((bx0 + bx1) / 2.0, 0.0, bz1 + m / 2.0),
            Vec3::new(bx1 - bx0, s, m),
            wall,
        ),
        CubePlacement::block(
            Vec3::new(bx0 - m / 2.0, 0.0, (bz0 + bz1) / 2.0),
            Vec3::new(m, s, bz1 - bz0),
            wall,
        ),
        CubePlacement::block(
            Vec3::new(bx1 + m / 2.0, 0.0, (bz0 + bz1) / 2.0),
            Vec3::new(m, s, bz1 - bz0),
            wall,
        ),
    ];
    for (corner_x, corner_z) in [
        (bx0 - m / 2.0, bz0 - m / 2.0),
        (bx1 + m / 2.0, bz0 - m / 2.0),
        (bx0 - m / 2.0, bz1 + m / 2.0),
        (bx1 + m / 2.0, bz1 + m / 2.0),
    ] {
        margins.push(CubePlacement::block(
            Vec3::new(corner_x, 0.0, corner_z),
            Vec3::new(m, s, m),
            wall,
        ));
    }
    for (o_x, o_z, center_x, center_z) in [
        (o_west, o_north, min_x - o_west / 2.0, min_z - o_north / 2.0),
        (o_east, o_north, max_x + o_east / 2.0, min_z - o_north / 2.0),
        (o_west, o_south, min_x - o_west / 2.0, max_z + o_south / 2.0),
        (o_east, o_south, max_x + o_east / 2.0, max_z + o_south / 2.0),
    ] {
        if o_x > 0.0 && o_z > 0.0 {
            margins.push(CubePlacement::block(
                Vec3::new(center_x, 0.0, center_z),
                Vec3::new(o_x, s, o_z),
                wall,
            ));
        }
    }

    MapGeometry {
        tile_rows,
        core_marker,
        spawn_pads,
        occluders,
        margins,
    }
}

/// The render-object containers for one built map.
///
/// Owns one cube handle per placement. Ownership of the underlying mesh and
/// GPU resources stays with the factory's renderer.
pub struct Map<C> {
    tile_cubes: Vec<Vec<C>>,
    spawn_cubes: Vec<C>,
    occlusion_cubes: Vec<C>,
    margin_cubes: Vec<C>,
    core_cube: Option<C>,
}

impl<C: Renderable> Map<C> {
    /// Compile `layout` and request one cube per placement.
    pub fn build<F>(layout: &MapLayout, config: &MapConfig, factory: &mut F) -> Map<C>
    where
        F: CubeFactory<Cube = C>,
    {
        Self::from_geometry(&compile_layout(layout, config), factory)
    }

    /// Request cubes for an already-compiled geometry.
    pub fn from_geometry<F>(geometry: &MapGeometry, factory: &mut F) -> Map<C>
    where
        F: CubeFactory<Cube = C>,
    {
        let mut cube = |name: &str, p: &CubePlacement| {
            factory.create_cube(name, p.translate, p.rotation, p.scale, p.color)
        };

        let tile_cubes = geometry
            .tile_rows
            .iter()
            .map(|row| row.iter().map(|p| cube("tile", p)).collect())
            .collect();
        let spawn_cubes = geometry
            .spawn_pads
            .iter()
            .map(|p| cube("spawn_pad", p))
            .collect();
        let occlusion_cubes = geometry
            .occluders
            .iter()
            .map(|p| cube("occluder", p))
            .collect();
        let margin_cubes = geometry
            .margins
            .iter()
            .map(|p| cube("margin", p))
            .collect();
        let core_cube = Some(cube("core_marker", &geometry.core_marker));

        Map {
            tile_cubes,
            spawn_cubes,
            occlusion_cubes,
            margin_cubes,
            core_cube,
        }
    }

    /// Draw every owned cube: tile grid row-major, spawn pads, occluders,
    /// margins, and the core marker last.
    pub fn draw(&self, top_matrix: &Mat4, ctx: &mut DrawContext) {
        for row in &self.tile_cubes {
            for cube in row {
                cube.draw(top_matrix, ctx);
            }
        }
        for cube in &self.spawn_cubes {
            cube.draw(top_matrix, ctx);
        }
        for cube in &self.occlusion_cubes {
            cube.draw(top_matrix, ctx);
        }
        for cube in &self.margin_cubes {
            cube.draw(top_matrix, ctx);
        }
        if let Some(core) = &self.core_cube {
            core.draw(top_matrix, ctx);
        }
    }

    /// Release every owned cube handle. Idempotent.
    pub fn clear(&mut self) {
        self.tile_cubes.clear();
        self.spawn_cubes.clear();
        self.occlusion_cubes.clear();
        self.margin_cubes.clear();
        self.core_cube = None;
    }

    pub fn cube_count(&self) -> usize {
        let tiles: usize = self.tile_cubes.iter().map(Vec::len).sum();
        tiles
            + self.spawn_cubes.len()
            + self.occlusion_cubes.len()
            + self.margin_cubes.len()
            + usize::from(self.core_cube.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MeshCubeFactory;

    const RING_MAP: &str = "\
#####
#   #
# O #
#   #
## ##";

    fn ring_layout() -> MapLayout {
        MapLayout::from_source(RING_MAP).unwrap()
    }

    fn plus_map() -> String {
        let mut source = String::new();
        for row in 0..11 {
            for col in 0..11 {
                source.push(match (row, col) {
                    (5, 5) => 'O',
                    (5, _) | (_, 5) => ' ',
                    _ => '#',
                });
            }
            source.push('\n');
        }
        source
    }

    #[test]
    fn test_ring_map_placement_counts() {
        let geometry = compile_layout(&ring_layout(), &MapConfig::default());
        assert_eq!(geometry.tile_rows.len(), 5);
        assert!(geometry.tile_rows.iter().all(|row| row.len() == 5));
        assert_eq!(geometry.spawn_pads.len(), 1);
        assert_eq!(geometry.occluders.len(), 2);
        // 4 slabs + 4 outer corners, no adjacent overhangs.
        assert_eq!(geometry.margins.len(), 8);
        assert_eq!(geometry.placement_count(), 37);
    }

    #[test]
    fn test_walls_raised_paths_grounded() {
        let geometry = compile_layout(&ring_layout(), &MapConfig::default());
        let wall = &geometry.tile_rows[0][0];
        assert_eq!(wall.translate, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(wall.color, TileType::Wall.color());

        let path = &geometry.tile_rows[1][2];
        assert_eq!(path.translate, Vec3::new(20.0, 0.0, 10.0));
        assert_eq!(path.color, TileType::Path.color());

        let core = &geometry.tile_rows[2][2];
        assert_eq!(core.translate, Vec3::new(20.0, 0.0, 20.0));
        assert_eq!(core.color, TileType::Core.color());
        assert_eq!(core.scale, Vec3::splat(10.0));
    }

    #[test]
    fn test_core_marker_floats_above_core() {
        let geometry = compile_layout(&ring_layout(), &MapConfig::default());
        assert_eq!(geometry.core_marker.translate, Vec3::new(20.0, 7.5, 20.0));
        assert_eq!(geometry.core_marker.scale, Vec3::splat(5.0));
        assert_ne!(geometry.core_marker.color, TileType::Core.color());
    }

    #[test]
    fn test_spawn_pad_flush_with_south_edge() {
        let geometry = compile_layout(&ring_layout(), &MapConfig::default());
        let pad = &geometry.spawn_pads[0];
        // Entry at (4, 2), padding 1: pad center two tiles south of it.
        assert_eq!(pad.translate, Vec3::new(20.0, 0.0, 60.0));
        assert_eq!(pad.scale, Vec3::new(30.0, 10.0, 30.0));
    }

    #[test]
    fn test_occluders_flank_the_pad() {
        let geometry = compile_layout(&ring_layout(), &MapConfig::default());
        let [left, right] = &geometry.occluders[..] else {
            panic!("expected two occluders");
        };
        assert_eq!(left.translate, Vec3::new(0.0, 0.0, 60.0));
        assert_eq!(left.scale, Vec3::new(10.0, 10.0, 30.0));
        assert_eq!(right.translate, Vec3::new(40.0, 0.0, 60.0));
        assert_eq!(right.scale, Vec3::new(10.0, 10.0, 30.0));
        assert_eq!(left.color, TileType::Wall.color());
    }

    #[test]
    fn test_margins_track_spawn_overhang() {
        let geometry = compile_layout(&ring_layout(), &MapConfig::default());
        // Playfield x in [-5, 45], z in [-5, 45]; south overhang 30 deep.
        let north = &geometry.margins[0];
        assert_eq!(north.translate, Vec3::new(20.0, 0.0, -25.0));
        assert_eq!(north.scale, Vec3::new(50.0, 10.0, 40.0));

        let south = &geometry.margins[1];
        assert_eq!(south.translate, Vec3::new(20.0, 0.0, 95.0));

        let west = &geometry.margins[2];
        assert_eq!(west.translate, Vec3::new(-25.0, 0.0, 35.0));
        assert_eq!(west.scale, Vec3::new(40.0, 10.0, 80.0));

        let corner_nw = &geometry.margins[4];
        assert_eq!(corner_nw.translate, Vec3::new(-25.0, 0.0, -25.0));
        assert_eq!(corner_nw.scale, Vec3::new(40.0, 10.0, 40.0));
    }

    #[test]
    fn test_plus_map_fills_every_inner_corner() {
        let layout = MapLayout::from_source(&plus_map()).unwrap();
        let geometry = compile_layout(&layout, &MapConfig::default());
        assert_eq!(geometry.spawn_pads.len(), 4);
        // Two fills per entry-bearing edge.
        assert_eq!(geometry.occluders.len(), 8);
        // 4 slabs + 4 outer corners + 4 inner corner fills.
        assert_eq!(geometry.margins.len(), 12);

        let inner = &geometry.margins[8];
        assert_eq!(inner.scale, Vec3::new(30.0, 10.0, 30.0));
    }

    #[test]
    fn test_compile_is_idempotent() {
        let layout = ring_layout();
        let config = MapConfig::default();
        assert_eq!(
            compile_layout(&layout, &config),
            compile_layout(&layout, &config)
        );
    }

    #[test]
    fn test_build_creates_one_cube_per_placement() {
        let layout = ring_layout();
        let config = MapConfig::default();
        let geometry = compile_layout(&layout, &config);

        let mut factory = MeshCubeFactory::new();
        let map = Map::build(&layout, &config, &mut factory);
        assert_eq!(factory.created(), geometry.placement_count());
        assert_eq!(map.cube_count(), geometry.placement_count());
    }

    #[test]
    fn test_draw_order_ends_with_core_marker() {
        let layout = ring_layout();
        let mut factory = MeshCubeFactory::new();
        let map = Map::build(&layout, &MapConfig::default(), &mut factory);

        let mut ctx = DrawContext::new();
        map.draw(&Mat4::IDENTITY, &mut ctx);
        assert_eq!(ctx.opaque_surfaces.len(), map.cube_count());

        // First surface is tile (0, 0), a raised wall block.
        let first = ctx.opaque_surfaces[0].transform.transform_point3(Vec3::ZERO);
        assert!((first - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-4);

        // The core marker draws last, floating above the core tile.
        let last = ctx
            .opaque_surfaces
            .last()
            .unwrap()
            .transform
            .transform_point3(Vec3::ZERO);
        assert!((last - Vec3::new(20.0, 7.5, 20.0)).length() < 1e-4);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let layout = ring_layout();
        let mut factory = MeshCubeFactory::new();
        let mut map = Map::build(&layout, &MapConfig::default(), &mut factory);

        map.clear();
        assert_eq!(map.cube_count(), 0);
        let mut ctx = DrawContext::new();
        map.draw(&Mat4::IDENTITY, &mut ctx);
        assert!(ctx.opaque_surfaces.is_empty());

        map.clear();
        assert_eq!(map.cube_count(), 0);
    }
}
