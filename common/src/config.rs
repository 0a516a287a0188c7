use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Run configuration for a sketch, read from a JSON5 file. Every field has
/// a default so a partial (or absent) file is enough to start.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub window: WindowConfig,
    pub clear_color: [f32; 3],
    pub shaders: ShaderPaths,
    pub textures: TexturePaths,
}

impl SketchConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Input)?;

        let config = json5::from_str(&text).map_err(ConfigError::Format)?;

        Ok(config)
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: [0.2, 0.3, 0.3],
            shaders: ShaderPaths::default(),
            textures: TexturePaths::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "glsketch".to_string(),
        }
    }
}

/// On-disk overrides for the built-in shader sources.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShaderPaths {
    pub vertex: Option<PathBuf>,
    pub fragment: Option<PathBuf>,
}

/// On-disk overrides for the generated demo textures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TexturePaths {
    pub base: Option<PathBuf>,
    pub overlay: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Input(std::io::Error),
    #[error("could not parse config file: {0}")]
    Format(json5::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_stand_alone() {
        let config = SketchConfig::default();

        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3]);
        assert!(config.shaders.vertex.is_none());
        assert!(config.textures.base.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: SketchConfig = json5::from_str(
            r#"{
                window: { width: 1280, height: 720 },
            }"#,
        )
        .unwrap();

        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.window.title, "glsketch");
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3]);
    }

    #[test]
    fn full_file_parses() {
        let config: SketchConfig = json5::from_str(
            r#"{
                window: { width: 640, height: 480, title: "spinny" },
                clear_color: [0.0, 0.0, 0.1],
                shaders: { vertex: "shaders/quad.glsl", fragment: "shaders/blend.glsl" },
                textures: { base: "img/base.png", overlay: "img/overlay.png" },
            }"#,
        )
        .unwrap();

        assert_eq!(config.window.title, "spinny");
        assert_eq!(config.clear_color, [0.0, 0.0, 0.1]);
        assert_eq!(
            config.shaders.fragment.as_deref(),
            Some(Path::new("shaders/blend.glsl"))
        );
        assert_eq!(
            config.textures.overlay.as_deref(),
            Some(Path::new("img/overlay.png"))
        );
    }

    #[test]
    fn malformed_file_is_a_format_error() {
        let result: Result<SketchConfig, _> = json5::from_str("{ window: [ }");

        assert!(result.is_err());
    }
}
