/// Viewer configuration loaded from TOML
use persp_core::ControllerSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Observer viewport in virtual pixels
    pub dimensions: (u32, u32),
    pub focal: f32,
    /// Width of a terminal cell divided by its height
    pub cell_aspect: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            dimensions: (400, 400),
            focal: 200.0,
            cell_aspect: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Frames per second the loop is limited to
    pub tps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { tps: 60 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file; the terminal itself is busy drawing
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub app: AppConfig,
    pub ui: ControllerSettings,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = self.screen.dimensions;
        if width == 0 || height == 0 {
            return Err(invalid("screen.dimensions must be non-zero"));
        }
        if !(self.screen.focal.is_finite() && self.screen.focal > 0.0) {
            return Err(invalid("screen.focal must be a positive number"));
        }
        if !(self.screen.cell_aspect.is_finite() && self.screen.cell_aspect > 0.0) {
            return Err(invalid("screen.cell_aspect must be a positive number"));
        }
        if self.app.tps == 0 {
            return Err(invalid("app.tps must be at least 1"));
        }
        for (name, value) in [
            ("ui.pan_speed", self.ui.pan_speed),
            ("ui.rotate_speed", self.ui.rotate_speed),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }
        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "unknown logging.level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}
