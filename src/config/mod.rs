//! Configuration structures and loading logic.


use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::atlas::AtlasSettings;
use crate::renderer::DEFAULT_FONT_SIZE;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub atlas: AtlasSettings,
    pub render: RenderConfig,
}

/// Font selection and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Pixel height the atlas is baked at. Must be finite and positive.
    pub size: f32,
    /// Explicit font file. Takes precedence over `family`.
    pub path: Option<PathBuf>,
    /// Font file name looked up in the platform font directories,
    /// e.g. `"DejaVuSans.ttf"`.
    pub family: Option<String>,
}

/// Draw-time settings that do not affect the atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Horizontal inset applied to every `draw_string` origin.
    pub padding_x: f32,
    /// Text color as 8-bit RGB.
    pub color: [u8; 3],
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
            path: None,
            family: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding_x: 4.0,
            color: [255, 255, 255],
        }
    }
}

/// Return the platform config directory.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("baked_text");
        }
        PathBuf::from(".").join("baked_text")
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("baked_text");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join("baked_text");
        }
        PathBuf::from(".").join("baked_text")
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl Config {
    /// Load config from the default path. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("config: failed to read {}: {e}", path.display());
                }
                return Self::default();
            }
        };

        match toml::from_str(&data) {
            Ok(cfg) => {
                log::info!("config: loaded from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("config: parse error in {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Try to load config, returning an error message on failure.
    /// Unlike `load_from()`, this preserves the distinction between "file
    /// missing" and "parse error".
    pub fn try_load_from(path: &Path) -> Result<Self, String> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        toml::from_str(&data).map_err(|e| format!("parse error in {}: {e}", path.display()))
    }

    /// Write config to `path`, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("failed to create dir {}: {e}", dir.display()))?;
        }
        let data = toml::to_string_pretty(self).map_err(|e| format!("serialize error: {e}"))?;
        std::fs::write(path, data).map_err(|e| format!("failed to write {}: {e}", path.display()))
    }

    /// Save config to the default path, logging failures.
    pub fn save(&self) {
        let path = config_path();
        match self.save_to(&path) {
            Ok(()) => log::info!("config: saved to {}", path.display()),
            Err(e) => log::error!("config: {e}"),
        }
    }
}
