//! Persistent draft tuning
//!
//! Carousel, flow, stats and window settings live in
//! `config/draft_settings.json`. Missing fields fall back to defaults, so an
//! old or partial file still loads.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::carousel::CarouselConfig;
use crate::constants::DEFAULT_WINDOW_SIZE;
use crate::error::ConfigurationError;
use crate::flow::FlowConfig;
use crate::stats::StatsViewConfig;

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/draft_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_SIZE.0 as f32,
            height: DEFAULT_WINDOW_SIZE.1 as f32,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftSettings {
    pub carousel: CarouselConfig,
    pub flow: FlowConfig,
    pub stats: StatsViewConfig,
    pub window: WindowSettings,
}

impl DraftSettings {
    /// Load settings from `path`, or return defaults if it is missing or bad
    pub fn load(path: &str) -> Self {
        let file = Path::new(path);
        if !file.exists() {
            info!("No {} found, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(file) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to load {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Load, writing the defaults out first if the file does not exist yet
    pub fn load_or_create(path: &str) -> Self {
        if !Path::new(path).exists() {
            let settings = Self::default();
            if let Err(e) = settings.save(path) {
                warn!("Failed to write default settings: {}", e);
            }
            return settings;
        }
        Self::load(path)
    }

    /// Parse and validate settings JSON
    pub fn parse(content: &str) -> Result<Self, String> {
        let settings: Self = serde_json::from_str(content).map_err(|e| e.to_string())?;
        settings.validate().map_err(|e| e.to_string())?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.carousel.validate()?;
        self.flow.validate()?;
        self.stats.validate()?;
        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved settings to {}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings = DraftSettings::parse(r#"{ "carousel": { "x_offset": 250.0 } }"#).unwrap();
        assert_eq!(settings.carousel.x_offset, 250.0);
        assert_eq!(settings.carousel.side_scale, CarouselConfig::default().side_scale);
        assert_eq!(settings.flow, FlowConfig::default());
        assert!(!settings.flow.review_step);
    }

    #[test]
    fn test_out_of_range_tuning_is_rejected() {
        let result = DraftSettings::parse(r#"{ "flow": { "fade_duration": -1.0 } }"#);
        assert!(result.unwrap_err().contains("fade_duration"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("draft_settings_{}", uuid::Uuid::new_v4()));
        let path = dir.join("draft_settings.json");
        let path = path.to_string_lossy().to_string();

        let mut settings = DraftSettings::default();
        settings.flow.review_step = true;
        settings.stats.max_value = 99.0;
        settings.save(&path).unwrap();

        assert_eq!(DraftSettings::load(&path), settings);
        let _ = fs::remove_dir_all(dir);
    }
}
