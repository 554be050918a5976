use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tdmaze::geometry::MeshCubeFactory;
use tdmaze::map::{compile_layout, Map, MapConfig, MapLayout};

/// Serpentine corridor maze: lanes joined by alternating end connectors,
/// core at the first lane's free end, single exit on the bottom edge.
fn snake_map(rows: usize, cols: usize) -> String {
    let mut grid = vec![vec!['#'; cols]; rows];

    let lanes: Vec<usize> = (1..rows - 1).step_by(2).collect();
    for (i, &r) in lanes.iter().enumerate() {
        for c in 1..cols - 1 {
            grid[r][c] = ' ';
        }
        let connector_col = if i % 2 == 0 { cols - 2 } else { 1 };
        if i + 1 < lanes.len() {
            grid[r + 1][connector_col] = ' ';
        } else {
            for r_exit in r + 1..rows {
                grid[r_exit][connector_col] = ' ';
            }
        }
    }
    grid[lanes[0]][1] = 'O';

    let mut source = String::with_capacity(rows * (cols + 1));
    for row in grid {
        source.extend(row);
        source.push('\n');
    }
    source
}

fn bench_parse_validate_65(c: &mut Criterion) {
    let source = snake_map(65, 65);

    c.bench_function("parse_validate_65", |b| {
        b.iter(|| MapLayout::from_source(black_box(&source)).unwrap());
    });
}

fn bench_parse_validate_257(c: &mut Criterion) {
    let source = snake_map(257, 257);

    c.bench_function("parse_validate_257", |b| {
        b.iter(|| MapLayout::from_source(black_box(&source)).unwrap());
    });
}

fn bench_compile_geometry_65(c: &mut Criterion) {
    let layout = MapLayout::from_source(&snake_map(65, 65)).unwrap();
    let config = MapConfig::default();

    c.bench_function("compile_geometry_65", |b| {
        b.iter(|| compile_layout(black_box(&layout), black_box(&config)));
    });
}

fn bench_build_cubes_65(c: &mut Criterion) {
    let layout = MapLayout::from_source(&snake_map(65, 65)).unwrap();
    let config = MapConfig::default();

    c.bench_function("build_cubes_65", |b| {
        b.iter(|| {
            let mut factory = MeshCubeFactory::new();
            Map::build(black_box(&layout), &config, &mut factory)
        });
    });
}

criterion_group!(
    benches,
    bench_parse_validate_65,
    bench_parse_validate_257,
    bench_compile_geometry_65,
    bench_build_cubes_65
);
criterion_main!(benches);
