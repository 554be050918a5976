//! Map checker binary - parses, validates, and compiles a map file.
//!
//! Usage: cargo run -- [OPTIONS] <MAP>
//!
//! Options:
//!   --config <PATH>    JSON MapConfig file (default: built-in defaults)
//!   --scale <S>        Tile edge length in world units (default: 10.0)
//!   --padding <N>      Spawn pad padding in tiles (default: 1)
//!   --margin <N>       Margin slab depth in tiles (default: 4)
//!   --report <PATH>    Write a JSON summary of the build
//!   --quiet            Skip echoing the parsed grid

use std::path::PathBuf;
use std::process::ExitCode;

use glam::Mat4;
use serde_json::json;

use tdmaze::core::logging;
use tdmaze::geometry::MeshCubeFactory;
use tdmaze::map::{compile_layout, Map, MapConfig, MapLayout};
use tdmaze::scene::DrawContext;

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(map_path) = positional_arg(&args) else {
        eprintln!("Usage: tdmaze [OPTIONS] <MAP>");
        return ExitCode::FAILURE;
    };

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => match load_config(&PathBuf::from(&path)) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Could not load config {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => MapConfig::default(),
    };
    if let Some(scale) = parse_f32_arg(&args, "--scale") {
        config.cube_scale = scale;
    }
    if let Some(padding) = parse_u32_arg(&args, "--padding") {
        config.spawn_area_padding = padding;
    }
    if let Some(margin) = parse_u32_arg(&args, "--margin") {
        config.margin_tiles = margin;
    }

    let layout = match MapLayout::from_path(&PathBuf::from(&map_path)) {
        Ok(layout) => layout,
        Err(err) => {
            log::error!("Map rejected: {err}");
            return ExitCode::FAILURE;
        }
    };

    if !args.iter().any(|a| a == "--quiet") {
        print!("{layout}");
    }

    let geometry = compile_layout(&layout, &config);
    let mut factory = MeshCubeFactory::new();
    let map = Map::build(&layout, &config, &mut factory);

    let mut ctx = DrawContext::new();
    map.draw(&Mat4::IDENTITY, &mut ctx);

    println!();
    println!("Map:     {} ({} x {})", map_path, layout.num_rows(), layout.num_cols());
    println!("Core:    {}", layout.core());
    println!("Entries: {}", layout.entry_points().len());
    println!("Cubes:   {} placed, {} drawn", factory.created(), ctx.opaque_surfaces.len());

    if let Some(report_path) = parse_str_arg(&args, "--report") {
        let report = json!({
            "map": map_path,
            "rows": layout.num_rows(),
            "cols": layout.num_cols(),
            "core": { "row": layout.core().row, "col": layout.core().col },
            "entry_points": layout
                .entry_points()
                .iter()
                .map(|e| json!({ "row": e.row, "col": e.col }))
                .collect::<Vec<_>>(),
            "cubes": {
                "tiles": geometry.tile_rows.iter().map(Vec::len).sum::<usize>(),
                "spawn_pads": geometry.spawn_pads.len(),
                "occluders": geometry.occluders.len(),
                "margins": geometry.margins.len(),
                "total": geometry.placement_count(),
            },
        });
        let text = serde_json::to_string_pretty(&report).expect("report is valid JSON");
        if let Err(err) = std::fs::write(&report_path, text) {
            log::error!("Could not write report {report_path}: {err}");
            return ExitCode::FAILURE;
        }
        log::info!("Report written to {report_path}");
    }

    ExitCode::SUCCESS
}

fn load_config(path: &PathBuf) -> tdmaze::core::Result<MapConfig> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|err| std::io::Error::other(err).into())
}

/// First argument that is neither a flag nor a flag's value.
fn positional_arg(args: &[String]) -> Option<String> {
    let takes_value = ["--config", "--scale", "--padding", "--margin", "--report"];
    let mut skip = false;
    for arg in &args[1..] {
        if skip {
            skip = false;
            continue;
        }
        if takes_value.contains(&arg.as_str()) {
            skip = true;
            continue;
        }
        if !arg.starts_with("--") {
            return Some(arg.clone());
        }
    }
    None
}

fn parse_str_arg(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_f32_arg(args: &[String], name: &str) -> Option<f32> {
    parse_str_arg(args, name).and_then(|v| v.parse().ok())
}

fn parse_u32_arg(args: &[String], name: &str) -> Option<u32> {
    parse_str_arg(args, name).and_then(|v| v.parse().ok())
}
