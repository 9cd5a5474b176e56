//! Event-log switch shared by the app and the scenario runner.

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEBUG_LOG_SETTINGS_FILE: &str = "config/debug_logging.json";

#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct DebugLogConfig {
    /// Write draft events to an `.evlog` file
    pub enabled: bool,
    pub log_dir: String,
}

impl Default for DebugLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: "logs".to_string(),
        }
    }
}

impl DebugLogConfig {
    pub fn load() -> Self {
        let path = Path::new(DEBUG_LOG_SETTINGS_FILE);
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn enabled_from_args(args: &[String]) -> bool {
        args.iter().any(|arg| arg == "--debug-log")
    }

    pub fn load_with_args(args: &[String]) -> Self {
        let mut config = Self::load();
        if Self::enabled_from_args(args) {
            config.enabled = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_enables_logging() {
        let args = vec!["dynasty-draft".to_string(), "--debug-log".to_string()];
        assert!(DebugLogConfig::enabled_from_args(&args));
        assert!(!DebugLogConfig::enabled_from_args(&args[..1]));
    }
}
