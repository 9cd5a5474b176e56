//! Scenario execution engine

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::fs;
use std::time::Duration;

use crate::carousel::{CarouselConfig, DraftCarousels};
use crate::events::{EventBus, update_event_bus_time};
use crate::flow::{
    DraftSession, DraftSlot, FlowConfig, FlowController, handle_draft_completion,
    publish_draft_events, tick_draft,
};
use crate::input::{DraftInput, apply_draft_input};
use crate::roster::{Position, RosterDatabase, SelectionItem};
use crate::stats::{DraftStatsPanels, StatsViewConfig};

use super::assertions::{AssertionError, CapturedEvent, WorldState, check_sequence, check_state};
use super::input::ScriptedInputs;
use super::parser::TestDefinition;

/// Fixed frame step so frame numbers map to draft time exactly
const FRAME_SECS: f32 = 1.0 / 60.0;

/// Result of running a scenario
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

/// Resource to track scenario state
#[derive(Resource)]
struct TestControl {
    should_exit: bool,
    current_frame: u64,
    /// Frames at which to check state assertions (sorted)
    state_check_frames: Vec<u64>,
    /// Index of next state check to perform
    next_state_check: usize,
}

/// Resource to capture events during the scenario
#[derive(Resource, Default)]
struct EventCapture {
    events: Vec<CapturedEvent>,
}

/// Resource to store state assertion error (if any)
#[derive(Resource, Default)]
struct StateAssertionResult {
    error: Option<AssertionError>,
}

/// Build the draft resources a scenario starts from
fn build_draft(test: &TestDefinition) -> Result<(FlowController, DraftCarousels, DraftStatsPanels), String> {
    let roster = match &test.setup.roster {
        Some(path) => {
            let content =
                fs::read_to_string(path).map_err(|e| format!("Failed to read roster {}: {}", path, e))?;
            RosterDatabase::parse(&content)?
        }
        None => RosterDatabase::default_roster(),
    };

    let mut carousel_config = CarouselConfig::default();
    if let Some(duration) = test.setup.transition_duration {
        carousel_config.transition_duration = duration;
    }
    let mut flow_config = FlowConfig {
        review_step: test.setup.review_step,
        ..default()
    };
    if let Some(duration) = test.setup.fade_duration {
        flow_config.fade_duration = duration;
    }

    let carousels = DraftCarousels::from_roster(&roster, carousel_config).map_err(|e| e.to_string())?;
    let flow = FlowController::standard(flow_config, DraftSession::new()).map_err(|e| e.to_string())?;
    let panels = DraftStatsPanels::new(&carousels, StatsViewConfig::default()).map_err(|e| e.to_string())?;
    Ok((flow, carousels, panels))
}

/// Run a single scenario and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let (flow, carousels, panels) = match build_draft(test) {
        Ok(draft) => draft,
        Err(message) => return TestResult::Error { message },
    };

    // Create scripted inputs
    let mut scripted_inputs = ScriptedInputs::from_inputs(&test.input);

    // Run through the last state assertion as well
    for state in &test.expect.state {
        scripted_inputs.set_max_frame(state.after_frame);
    }

    // Ensure we run at least some frames
    if scripted_inputs.max_frame == 0 {
        scripted_inputs.max_frame = 60; // Default 1 second
    }

    // Create minimal Bevy app
    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f32(FRAME_SECS))),
    );
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        FRAME_SECS,
    )));

    // Resources
    app.insert_resource(flow);
    app.insert_resource(carousels);
    app.insert_resource(panels);
    app.insert_resource(EventBus::new());
    app.init_resource::<DraftInput>();

    // Collect unique state check frames (sorted)
    let state_check_frames: Vec<u64> = {
        let mut frames: Vec<u64> = test.expect.state.iter().map(|s| s.after_frame).collect();
        frames.sort();
        frames.dedup();
        frames
    };

    app.insert_resource(scripted_inputs);
    app.insert_resource(TestControl {
        should_exit: false,
        current_frame: 0,
        state_check_frames,
        next_state_check: 0,
    });
    app.init_resource::<EventCapture>();
    app.init_resource::<StateAssertionResult>();

    // Store state assertions for inline checking
    let state_assertions = test.expect.state.clone();

    // Same order as the game loop, with scripted input standing in for devices
    app.add_systems(
        Update,
        (
            input_injection,
            apply_draft_input,
            tick_draft,
            update_event_bus_time,
            publish_draft_events,
            handle_draft_completion,
            event_capture,
            test_end_check,
        )
            .chain(),
    );

    // Run with inline state assertion checking
    loop {
        app.update();

        {
            let control = app.world().resource::<TestControl>();
            let current_frame = control.current_frame;
            let next_check = control.state_check_frames.get(control.next_state_check).copied();

            if let Some(check_frame) = next_check
                && current_frame >= check_frame
            {
                let world_state = extract_world_state(app.world());
                for assertion in state_assertions.iter().filter(|a| a.after_frame == check_frame) {
                    if let Err(e) = check_state(assertion, &world_state) {
                        app.world_mut().resource_mut::<StateAssertionResult>().error = Some(e);
                        app.world_mut().resource_mut::<TestControl>().should_exit = true;
                        break;
                    }
                }

                app.world_mut()
                    .resource_mut::<TestControl>()
                    .next_state_check += 1;
            }
        }

        if app.world().resource::<TestControl>().should_exit {
            break;
        }
    }

    if let Some(ref error) = app.world().resource::<StateAssertionResult>().error {
        return TestResult::Fail {
            error: error.clone(),
        };
    }

    let final_frame = app.world().resource::<TestControl>().current_frame;
    let captured_events = app.world().resource::<EventCapture>().events.clone();

    if let Err(e) = check_sequence(&test.expect.sequence, &captured_events) {
        return TestResult::Fail { error: e };
    }

    TestResult::Pass {
        frames: final_frame,
    }
}

/// System to inject scripted inputs
fn input_injection(
    mut scripted: ResMut<ScriptedInputs>,
    mut control: ResMut<TestControl>,
    mut input: ResMut<DraftInput>,
) {
    control.current_frame = scripted.current_frame;

    if !scripted.should_continue() {
        control.should_exit = true;
        *input = DraftInput::default();
        return;
    }

    *input = scripted.advance_frame();
}

/// System to capture everything published this frame
fn event_capture(control: Res<TestControl>, mut capture: ResMut<EventCapture>, mut bus: ResMut<EventBus>) {
    let frame = control.current_frame;
    for event in bus.drain() {
        capture.events.push(CapturedEvent::from_bus_event(frame, &event));
    }
}

/// System to check if the scenario should end
fn test_end_check(scripted: Res<ScriptedInputs>, mut control: ResMut<TestControl>) {
    if !scripted.should_continue() {
        control.should_exit = true;
    }
}

/// Snapshot the draft for state assertions
fn extract_world_state(world: &World) -> WorldState {
    let mut state = WorldState::default();
    let flow = world.resource::<FlowController>();
    let carousels = world.resource::<DraftCarousels>();
    let panels = world.resource::<DraftStatsPanels>();

    state.set("step", flow.current_step());
    state.set("step_index", flow.step_index());
    state.set("transitioning", flow.is_transitioning());
    state.set("complete", flow.is_complete());
    state.set("accepts_input", flow.accepts_input());
    state.set("name_input", flow.name_input());
    state.set("welcome_text", flow.welcome_text());
    state.set("team_name", flow.session().team_name().unwrap_or("none"));
    state.set("missing", flow.session().missing_slots().len());
    state.set("handed_off", world.contains_resource::<DraftSession>());

    for (index, panel) in flow.panels().iter().enumerate() {
        state.set(format!("panel.{}.opacity", index), panel.opacity);
        state.set(format!("panel.{}.interactive", index), panel.interactive);
    }

    for slot in DraftSlot::ALL {
        let center = carousels.current_index(slot);
        state.set(format!("center.{}", slot), center);
        state.set(format!("busy.{}", slot), carousels.is_busy(slot));
        state.set(
            format!("centered.{}", slot),
            carousels.item_name(slot, center).unwrap_or("none"),
        );
        let selection = flow.session().selection(slot).map(|item| match item {
            SelectionItem::Coach(coach) => coach.name.as_str(),
            SelectionItem::Player(player) => player.name.as_str(),
        });
        state.set(format!("selection.{}", slot), selection.unwrap_or("none"));
    }

    for position in Position::ALL {
        for slot_index in 0..panels.view_count(position) {
            let Some(view) = panels.view(position, slot_index) else {
                continue;
            };
            let prefix = format!("stats.{}.{}", position, slot_index);
            state.set(format!("{}.visible", prefix), view.is_visible());
            state.set(format!("{}.revealing", prefix), view.is_revealing());
            state.set(format!("{}.header_alpha", prefix), view.header_alpha());
            for (row, stat) in view.rows().iter().enumerate() {
                state.set(format!("{}.row.{}.fill", prefix, row), stat.fill);
                state.set(format!("{}.row.{}.alpha", prefix, row), stat.alpha);
            }
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_name_entry() {
        let def: TestDefinition = toml::from_str(
            r#"
name = "Inline name entry"

[[input]]
frame = 1
typed = "Comets"

[[input]]
frame = 2
forward = true

[[expect.sequence]]
event = "TeamNamed"
frame_max = 2

[[expect.state]]
after_frame = 10
checks = ["step = Welcome", "team_name = Comets", "panel.1.interactive = false"]
"#,
        )
        .unwrap();

        match run_test(&def) {
            TestResult::Pass { frames } => assert!(frames >= 10),
            other => panic!("scenario did not pass: {:?}", other),
        }
    }

    #[test]
    fn test_failed_check_is_reported() {
        let def: TestDefinition = toml::from_str(
            r#"
name = "Wrong step"

[[expect.state]]
after_frame = 5
checks = ["step = Welcome"]
"#,
        )
        .unwrap();

        assert!(matches!(run_test(&def), TestResult::Fail { .. }));
    }
}
