use std::path::Path;

use serde::Deserialize;

/// Maze dimensions in screen units. The grid has `width / cell_size` columns
/// and `height / cell_size` rows; any remainder is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            cell_size: 20,
        }
    }
}

impl MazeConfig {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Configuration for exactly `cols × rows` cells of size 1.
    pub fn cells(cols: u32, rows: u32) -> Self {
        Self::new(cols, rows, 1)
    }
}

/// World-space dimensions used when deriving collision boxes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Width and depth of one floor tile.
    pub floor_size: f32,
    pub floor_thickness: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            floor_size: 2.0,
            floor_thickness: 0.1,
            wall_height: 2.0,
            wall_thickness: 0.2,
        }
    }
}

/// Errors from loading settings files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Everything a front end needs to build a maze.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    pub maze: MazeConfig,
    pub geometry: GeometryConfig,
}

impl MazeSettings {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded maze settings");
        Ok(settings)
    }
}
