//! Application config (`keyburst.toml`)

use keyburst_core::toml_util::{toml_f32, toml_usize, toml_vec3};
use keyburst_core::{KeyburstError, Result, Vec3};
use keyburst_particles::EngineConfig;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Debounce and first-value handling for the "press any key" label
#[derive(Debug, Clone, PartialEq)]
pub struct IdleLabelConfig {
    pub debounce_ms: u64,
    pub ignore_first: bool,
}

impl Default for IdleLabelConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 2000,
            ignore_first: true,
        }
    }
}

impl IdleLabelConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 6.0),
            fov: 75.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Keyburst".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

/// Everything read from `keyburst.toml`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub idle_label: IdleLabelConfig,
    pub camera: CameraConfig,
    pub window: WindowConfig,
}

impl AppConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content).map_err(|e| match e {
            KeyburstError::TomlParseError(msg) => {
                KeyburstError::TomlParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(KeyburstError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse and validate config text. Every section and key is optional.
    pub fn parse(content: &str) -> Result<Self> {
        let root: toml::Table = toml::from_str(content)?;

        let mut config = Self {
            engine: EngineConfig::from_toml(&root),
            ..Self::default()
        };

        if let Some(table) = root.get("idle_label").and_then(|v| v.as_table()) {
            if let Some(v) = table.get("debounce_ms") {
                config.idle_label.debounce_ms =
                    toml_usize(v, config.idle_label.debounce_ms as usize) as u64;
            }
            if let Some(v) = table.get("ignore_first").and_then(|v| v.as_bool()) {
                config.idle_label.ignore_first = v;
            }
        }

        if let Some(table) = root.get("camera").and_then(|v| v.as_table()) {
            if let Some(v) = table.get("position") {
                config.camera.position =
                    Vec3::from_array(toml_vec3(v, config.camera.position.to_array()));
            }
            if let Some(v) = table.get("fov") {
                config.camera.fov = toml_f32(v, config.camera.fov);
            }
        }

        if let Some(table) = root.get("window").and_then(|v| v.as_table()) {
            if let Some(v) = table.get("title").and_then(|v| v.as_str()) {
                config.window.title = v.to_string();
            }
            if let Some(v) = table.get("width") {
                config.window.width = toml_usize(v, config.window.width as usize) as u32;
            }
            if let Some(v) = table.get("height") {
                config.window.height = toml_usize(v, config.window.height as usize) as u32;
            }
            if let Some(v) = table.get("fullscreen").and_then(|v| v.as_bool()) {
                config.window.fullscreen = v;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        if !(1.0..180.0).contains(&self.camera.fov) {
            return Err(KeyburstError::ValueOutOfRange {
                field: "camera.fov".into(),
                min: 1.0,
                max: 180.0,
                value: self.camera.fov as f64,
            });
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(KeyburstError::ConfigError(
                "window width and height must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
