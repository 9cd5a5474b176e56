//! Dynasty Draft - team-building onboarding flow
//!
//! Main entry point: app setup and system registration.

use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*};
use dynasty_draft::{
    ConfigWatcher, DebugLogConfig, DraftCarousels, DraftInput, DraftSession, DraftSettings,
    DraftStatsPanels, EventBus, EventLogConfig, EventLogger, FlowController, ROSTER_FILE,
    RosterDatabase, SETTINGS_FILE, config_watcher, constants::*, events, flow, input, ui,
};
use std::path::PathBuf;

/// Everything the draft needs before the first frame
fn build_draft(
    settings: &DraftSettings,
    roster: &RosterDatabase,
) -> Result<(DraftCarousels, FlowController, DraftStatsPanels), String> {
    let carousels =
        DraftCarousels::from_roster(roster, settings.carousel).map_err(|e| e.to_string())?;
    let flow = FlowController::standard(settings.flow.clone(), DraftSession::new())
        .map_err(|e| e.to_string())?;
    let panels = DraftStatsPanels::new(&carousels, settings.stats).map_err(|e| e.to_string())?;
    Ok((carousels, flow, panels))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Load persistent tuning and the roster (both create defaults if missing)
    let settings = DraftSettings::load_or_create(SETTINGS_FILE);
    let roster = RosterDatabase::load_or_create(ROSTER_FILE);
    let debug_log = DebugLogConfig::load_with_args(&args);

    let (carousels, flow, panels) = match build_draft(&settings, &roster) {
        Ok(draft) => draft,
        Err(e) => {
            error!("Cannot start the draft: {}", e);
            eprintln!("Cannot start the draft: {}", e);
            std::process::exit(1);
        }
    };

    let logger = EventLogger::new(EventLogConfig {
        log_dir: PathBuf::from(&debug_log.log_dir),
        enabled: debug_log.enabled,
    });

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    // Portrait canvas; the camera keeps the full height visible
                    resolution: bevy::window::WindowResolution::new(
                        settings.window.width as u32,
                        settings.window.height as u32,
                    )
                    .with_scale_factor_override(1.0),
                    title: "Dynasty Draft".into(),
                    ..default()
                }),
                ..default()
            }),
            FrameTimeDiagnosticsPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(settings)
        .insert_resource(roster)
        .insert_resource(debug_log)
        .insert_resource(carousels)
        .insert_resource(flow)
        .insert_resource(panels)
        .insert_resource(logger)
        .insert_resource(EventBus::new())
        .init_resource::<DraftInput>()
        .init_resource::<ConfigWatcher>()
        .add_systems(Startup, (ui::spawn_camera, ui::setup_draft_ui, start_event_log))
        // Device input stops once the draft is handed off
        .add_systems(
            Update,
            (input::capture_input, input::apply_draft_input)
                .chain()
                .run_if(flow::draft_active),
        )
        // Input -> core -> publish, in that order every frame
        .add_systems(
            Update,
            (
                flow::tick_draft,
                events::update_event_bus_time,
                flow::publish_draft_events,
                flow::handle_draft_completion,
            )
                .chain()
                .after(input::apply_draft_input),
        )
        .add_systems(
            Update,
            (
                ui::sync_panels,
                ui::sync_carousel_slots,
                ui::sync_draft_text,
                ui::sync_stats_panels,
            )
                .after(flow::tick_draft),
        )
        .add_systems(Update, config_watcher::check_config_changes)
        .run();
}

/// Open the event log when debug logging is on
fn start_event_log(mut logger: ResMut<EventLogger>, debug_log: Res<DebugLogConfig>) {
    if !debug_log.enabled {
        return;
    }
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    logger.start_session(&timestamp);
    if let Some(path) = logger.path() {
        info!("Logging draft events to {}", path.display());
    }
}
