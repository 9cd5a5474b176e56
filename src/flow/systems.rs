//! Bevy systems that drive the draft core each frame

use bevy::prelude::*;

use super::controller::FlowController;
use crate::carousel::DraftCarousels;
use crate::events::{DraftEvent, EventBus, EventLogger};
use crate::stats::DraftStatsPanels;

/// Inserted once the flow completes, alongside the session resource
#[derive(Resource, Debug, Clone)]
pub struct DraftComplete {
    pub summary: Vec<String>,
}

/// Run condition: flow still in progress
pub fn draft_active(flow: Res<FlowController>) -> bool {
    !flow.is_complete()
}

/// Advance carousels, the flow and stats panels by one frame.
/// Runs after input capture so samples of this frame see last frame's state.
pub fn tick_draft(
    time: Res<Time>,
    mut flow: ResMut<FlowController>,
    mut carousels: ResMut<DraftCarousels>,
    mut panels: ResMut<DraftStatsPanels>,
) {
    let dt = time.delta_secs();
    carousels.tick(dt);
    flow.tick(dt);
    panels.tick(&carousels, dt);
}

/// Move queued core events onto the bus, the log and the event file.
/// Opens a new bus frame first, so unread events from last frame expire.
pub fn publish_draft_events(
    mut flow: ResMut<FlowController>,
    mut carousels: ResMut<DraftCarousels>,
    mut bus: ResMut<EventBus>,
    mut logger: Option<ResMut<EventLogger>>,
) {
    bus.begin_frame();
    let mut events = carousels.drain_events();
    events.extend(flow.drain_events());

    for event in events {
        match &event {
            DraftEvent::SelectionMissing { slot } => warn!("No {} selected, slot left empty", slot),
            DraftEvent::CarouselMoved { slot, center } => debug!("{} carousel centered on {}", slot, center),
            DraftEvent::StepChanged { from, to } => info!("Step {} -> {}", from, to),
            DraftEvent::NavigationRejected { reason } => info!("Navigation rejected: {}", reason),
            DraftEvent::SelectionCommitted { slot, name } => info!("{} pick: {}", slot, name),
            _ => {}
        }

        if let Some(logger) = logger.as_mut() {
            logger.log(bus.elapsed_ms(), &event);
        }
        bus.emit(event);
    }
}

/// Log the drafted team and hand the session to downstream consumers
pub fn handle_draft_completion(
    mut commands: Commands,
    flow: Res<FlowController>,
    done: Option<Res<DraftComplete>>,
    mut logger: Option<ResMut<EventLogger>>,
) {
    if !flow.is_complete() || done.is_some() {
        return;
    }

    let summary = flow.session().summary_lines();
    info!("=== Draft Summary ===");
    for line in &summary {
        info!("{}", line);
    }
    let missing = flow.session().missing_slots();
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(|slot| slot.to_string()).collect();
        warn!("Missing picks: {}", names.join(", "));
    }

    if let Some(logger) = logger.as_mut() {
        logger.end_session();
    }

    commands.insert_resource(flow.session().clone());
    commands.insert_resource(DraftComplete { summary });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselConfig;
    use crate::events::update_event_bus_time;
    use crate::flow::{DraftSession, DraftStep, FlowConfig};
    use crate::input::{DraftInput, apply_draft_input};
    use crate::roster::RosterDatabase;
    use crate::stats::StatsViewConfig;

    /// The game loop's core chain, without devices or rendering
    fn app() -> App {
        let carousels =
            DraftCarousels::from_roster(&RosterDatabase::default_roster(), CarouselConfig::default())
                .unwrap();
        let panels = DraftStatsPanels::new(&carousels, StatsViewConfig::default()).unwrap();

        let mut app = App::new();
        app.init_resource::<Time>();
        app.insert_resource(
            FlowController::standard(FlowConfig::default(), DraftSession::new()).unwrap(),
        );
        app.insert_resource(carousels);
        app.insert_resource(panels);
        app.insert_resource(EventBus::new());
        app.init_resource::<DraftInput>();
        app.add_systems(
            Update,
            (
                apply_draft_input,
                tick_draft,
                update_event_bus_time,
                publish_draft_events,
                handle_draft_completion,
            )
                .chain(),
        );
        app
    }

    #[test]
    fn test_bus_holds_one_frame_of_events() {
        let mut app = app();
        for _ in 0..1000 {
            // Empty team name, so every forward is rejected
            app.world_mut().resource_mut::<DraftInput>().forward = true;
            app.update();
        }

        let bus = app.world().resource::<EventBus>();
        assert_eq!(bus.published(), 1000);
        assert_eq!(bus.pending_count(), 1);
        assert_eq!(
            app.world().resource::<FlowController>().current_step(),
            DraftStep::NameEntry
        );
    }
}
