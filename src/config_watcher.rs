//! Settings auto-reload
//!
//! Polls the settings file every 2 seconds and pushes new tuning into the
//! live carousels, flow and stats panels. Invalid files are ignored with a
//! warning and the current tuning is kept.

use bevy::prelude::*;
use std::fs;
use std::time::SystemTime;

use crate::carousel::DraftCarousels;
use crate::flow::FlowController;
use crate::roster::ROSTER_FILE;
use crate::settings::{DraftSettings, SETTINGS_FILE};
use crate::stats::DraftStatsPanels;

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 2.0;

#[derive(Resource)]
pub struct ConfigWatcher {
    pub timer: f32,
    pub settings_path: String,
    pub settings_mtime: Option<SystemTime>,
    pub roster_mtime: Option<SystemTime>,
}

impl Default for ConfigWatcher {
    fn default() -> Self {
        Self::watching(SETTINGS_FILE)
    }
}

impl ConfigWatcher {
    pub fn watching(settings_path: &str) -> Self {
        Self {
            timer: 0.0,
            settings_path: settings_path.to_string(),
            settings_mtime: get_mtime(settings_path),
            roster_mtime: get_mtime(ROSTER_FILE),
        }
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &str) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Push `settings` into every live component, stopping at the first rejection
pub fn apply_settings(
    settings: &DraftSettings,
    carousels: &mut DraftCarousels,
    flow: &mut FlowController,
    panels: &mut DraftStatsPanels,
) -> Result<(), String> {
    carousels.set_config(settings.carousel).map_err(|e| e.to_string())?;
    flow.set_config(settings.flow.clone()).map_err(|e| e.to_string())?;
    panels.set_config(settings.stats).map_err(|e| e.to_string())?;
    Ok(())
}

pub fn check_config_changes(
    time: Res<Time>,
    mut watcher: ResMut<ConfigWatcher>,
    mut settings: ResMut<DraftSettings>,
    mut carousels: ResMut<DraftCarousels>,
    mut flow: ResMut<FlowController>,
    mut panels: ResMut<DraftStatsPanels>,
) {
    watcher.timer += time.delta_secs();

    if watcher.timer < CHECK_INTERVAL {
        return;
    }
    watcher.timer = 0.0;

    let new_roster_mtime = get_mtime(ROSTER_FILE);
    if new_roster_mtime != watcher.roster_mtime {
        watcher.roster_mtime = new_roster_mtime;
        info!("{} changed - restart the draft to use the new roster", ROSTER_FILE);
    }

    let new_settings_mtime = get_mtime(&watcher.settings_path);
    if new_settings_mtime == watcher.settings_mtime {
        return;
    }
    watcher.settings_mtime = new_settings_mtime;

    let content = match fs::read_to_string(&watcher.settings_path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {}: {}", watcher.settings_path, e);
            return;
        }
    };
    let new_settings = match DraftSettings::parse(&content) {
        Ok(new_settings) => new_settings,
        Err(e) => {
            warn!("Ignoring {}: {}", watcher.settings_path, e);
            return;
        }
    };

    if new_settings.flow.review_step != settings.flow.review_step {
        info!("review_step changed - restart the draft to apply");
    }

    match apply_settings(&new_settings, &mut carousels, &mut flow, &mut panels) {
        Ok(()) => {
            *settings = new_settings;
            info!("Auto-reloaded settings from {}", watcher.settings_path);
        }
        Err(e) => warn!("Failed to apply {}: {}", watcher.settings_path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselConfig;
    use crate::flow::{DraftSession, FlowConfig};
    use crate::roster::RosterDatabase;
    use crate::stats::StatsViewConfig;

    #[test]
    fn test_apply_settings_updates_live_tuning() {
        let mut carousels =
            DraftCarousels::from_roster(&RosterDatabase::default_roster(), CarouselConfig::default())
                .unwrap();
        let mut flow = FlowController::standard(FlowConfig::default(), DraftSession::new()).unwrap();
        let mut panels = DraftStatsPanels::new(&carousels, StatsViewConfig::default()).unwrap();

        let mut settings = DraftSettings::default();
        settings.carousel.x_offset = 200.0;
        settings.flow.fade_duration = 0.25;
        apply_settings(&settings, &mut carousels, &mut flow, &mut panels).unwrap();

        assert_eq!(carousels.coach().config().x_offset, 200.0);
        assert_eq!(carousels.coach().slots()[1].position.x, 200.0);
        assert_eq!(flow.config().fade_duration, 0.25);
    }
}
