//! Map build configuration

use serde::{Deserialize, Serialize};

/// Parameters for compiling a validated layout into world geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Edge length of one tile block in world units.
    pub cube_scale: f32,
    /// How far a spawn staging pad reaches beyond its entry point, in tiles.
    /// The pad footprint is `cube_scale * (2 * padding + 1)`.
    pub spawn_area_padding: u32,
    /// Depth of the world-boundary margin slabs, in tiles.
    pub margin_tiles: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            cube_scale: 10.0,
            spawn_area_padding: 1,
            margin_tiles: 4,
        }
    }
}

impl MapConfig {
    /// World-space edge length of a spawn staging pad.
    pub fn spawn_area_size(&self) -> f32 {
        self.cube_scale * (2 * self.spawn_area_padding + 1) as f32
    }

    /// World-space depth of the margin slabs.
    pub fn margin_size(&self) -> f32 {
        self.cube_scale * self.margin_tiles as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MapConfig::default();
        assert_eq!(config.cube_scale, 10.0);
        assert_eq!(config.spawn_area_size(), 30.0);
        assert_eq!(config.margin_size(), 40.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MapConfig = serde_json::from_str(r#"{"cube_scale": 4.0}"#).unwrap();
        assert_eq!(config.cube_scale, 4.0);
        assert_eq!(config.spawn_area_padding, 1);
    }

    #[test]
    fn test_json_round_trip() {
        let config = MapConfig {
            cube_scale: 2.5,
            spawn_area_padding: 2,
            margin_tiles: 6,
        };
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<MapConfig>(&text).unwrap(), config);
    }
}
