//! Input module - DraftInput resource, device capture and application
//!
//! `capture_input` turns touches, the mouse and the keyboard into buffered
//! intents; `apply_draft_input` hands them to the flow and carousels. The
//! scenario runner writes the same resource directly.

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::carousel::{Direction, DraftCarousels, MOUSE_POINTER_ID, TouchSample};
use crate::flow::{DraftStep, FlowController};
use crate::ui::{NavAction, NavButton};

/// Longest team name accepted from the keyboard
pub const MAX_TEAM_NAME_CHARS: usize = 24;

/// Buffered intents for one frame
#[derive(Resource, Default, Debug, Clone)]
pub struct DraftInput {
    /// Touch samples in world coordinates, in arrival order
    pub touches: Vec<TouchSample>,
    /// Forward trigger (Enter, Next button)
    pub forward: bool,
    /// Back trigger (Escape, Back button)
    pub back: bool,
    /// Keyboard carousel rotation (arrow keys)
    pub rotate: Option<Direction>,
    /// Characters typed this frame
    pub typed: String,
    /// Backspace presses this frame
    pub backspaces: u32,
}

impl DraftInput {
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
            && !self.forward
            && !self.back
            && self.rotate.is_none()
            && self.typed.is_empty()
            && self.backspaces == 0
    }
}

/// Screen point to world point through the 2D camera
fn to_world(camera: &Camera, camera_transform: &GlobalTransform, screen: Vec2) -> Option<Vec2> {
    camera.viewport_to_world_2d(camera_transform, screen).ok()
}

/// Whether `point` lies inside an axis-aligned box of `size` centered at `center`
pub fn hit_test(point: Vec2, center: Vec2, size: Vec2) -> bool {
    let half = size / 2.0;
    (point.x - center.x).abs() <= half.x && (point.y - center.y).abs() <= half.y
}

/// Nav button of the active panel under `point`, if any
fn pressed_button(
    point: Vec2,
    active_panel: usize,
    buttons: &Query<(&NavButton, &GlobalTransform, &Sprite)>,
) -> Option<NavAction> {
    buttons.iter().find_map(|(button, transform, sprite)| {
        if button.panel != active_panel {
            return None;
        }
        let size = sprite.custom_size?;
        hit_test(point, transform.translation().truncate(), size).then_some(button.action)
    })
}

/// Runs in Update to capture device input before it's cleared.
#[allow(clippy::too_many_arguments)]
pub fn capture_input(
    mut keys: MessageReader<KeyboardInput>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    buttons: Query<(&NavButton, &GlobalTransform, &Sprite)>,
    flow: Res<FlowController>,
    mut input: ResMut<DraftInput>,
) {
    for event in keys.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        match &event.logical_key {
            Key::Enter => input.forward = true,
            Key::Escape => input.back = true,
            Key::ArrowLeft => input.rotate = Some(Direction::Previous),
            Key::ArrowRight => input.rotate = Some(Direction::Next),
            Key::Backspace => input.backspaces += 1,
            Key::Space => input.typed.push(' '),
            Key::Character(text) => {
                input.typed.extend(text.chars().filter(|c| !c.is_control()));
            }
            _ => {}
        }
    }

    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let active_panel = flow.step_index();

    // Touches and the left mouse button share one path: a press on a nav
    // button triggers it, anything else feeds the swipe detector.
    let pointer = |id: u64, screen: Vec2, began: bool, input: &mut DraftInput| {
        let Some(world) = to_world(camera, camera_transform, screen) else {
            return;
        };
        if began {
            match pressed_button(world, active_panel, &buttons) {
                Some(NavAction::Forward) => input.forward = true,
                Some(NavAction::Back) => input.back = true,
                None => input.touches.push(TouchSample::began(id, world.x, world.y)),
            }
        } else {
            input.touches.push(TouchSample::ended(id, world.x, world.y));
        }
    };

    // Only a lone finger swipes
    if touches.iter().count() > 1 {
        input.touches.push(TouchSample::canceled());
    } else {
        for touch in touches.iter_just_pressed() {
            pointer(touch.id(), touch.position(), true, &mut input);
        }
        for touch in touches.iter_just_released() {
            pointer(touch.id(), touch.position(), false, &mut input);
        }
    }

    if let Ok(window) = windows.single()
        && let Some(cursor) = window.cursor_position()
    {
        if mouse.just_pressed(MouseButton::Left) {
            pointer(MOUSE_POINTER_ID, cursor, true, &mut input);
        }
        if mouse.just_released(MouseButton::Left) {
            pointer(MOUSE_POINTER_ID, cursor, false, &mut input);
        }
    }
}

/// Consume buffered intents. Gestures are sampled before flow navigation so
/// a forward press in the same frame commits the freshly centered item.
pub fn apply_draft_input(
    mut input: ResMut<DraftInput>,
    mut flow: ResMut<FlowController>,
    mut carousels: ResMut<DraftCarousels>,
) {
    if input.is_empty() {
        return;
    }
    let input = std::mem::take(&mut *input);
    let step = flow.current_step();

    if step == DraftStep::NameEntry && flow.accepts_input() {
        let name = flow.name_input_mut();
        for _ in 0..input.backspaces {
            name.pop();
        }
        for c in input.typed.chars() {
            if name.chars().count() < MAX_TEAM_NAME_CHARS {
                name.push(c);
            }
        }
    }

    match step.carousel_slot() {
        Some(slot) if flow.accepts_input() => {
            for sample in input.touches {
                carousels.route_touch(slot, sample);
            }
            // Busy and empty rejections are queued as events by the registry
            if let Some(direction) = input.rotate {
                let _ = carousels.advance(slot, direction);
            }
        }
        _ => carousels.reset_gesture(),
    }

    // Rejections are queued as events by the controller
    if input.forward && step.has_nav_triggers() {
        let _ = flow.advance(&*carousels);
        carousels.reset_gesture();
    }
    if input.back && step.has_nav_triggers() {
        let _ = flow.retreat();
        carousels.reset_gesture();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselConfig;
    use crate::flow::{DraftSession, DraftSlot, FlowConfig};
    use crate::roster::RosterDatabase;

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(
            FlowController::standard(FlowConfig::default(), DraftSession::new()).unwrap(),
        );
        app.insert_resource(
            DraftCarousels::from_roster(&RosterDatabase::default_roster(), CarouselConfig::default())
                .unwrap(),
        );
        app.init_resource::<DraftInput>();
        app.add_systems(Update, apply_draft_input);
        app
    }

    #[test]
    fn test_hit_test_bounds() {
        let center = Vec2::new(300.0, -760.0);
        let size = Vec2::new(240.0, 90.0);
        assert!(hit_test(Vec2::new(420.0, -760.0), center, size));
        assert!(!hit_test(Vec2::new(421.0, -760.0), center, size));
        assert!(!hit_test(Vec2::new(300.0, -700.0), center, size));
    }

    #[test]
    fn test_typing_edits_team_name() {
        let mut app = app();
        {
            let mut input = app.world_mut().resource_mut::<DraftInput>();
            input.typed = "Cometz".to_string();
            input.backspaces = 0;
        }
        app.update();
        {
            let mut input = app.world_mut().resource_mut::<DraftInput>();
            input.backspaces = 1;
            input.typed = "s".to_string();
        }
        app.update();

        let flow = app.world().resource::<FlowController>();
        assert_eq!(flow.name_input(), "Comets");
        assert!(app.world().resource::<DraftInput>().is_empty());
    }

    #[test]
    fn test_name_is_capped() {
        let mut app = app();
        app.world_mut().resource_mut::<DraftInput>().typed = "x".repeat(40);
        app.update();
        let flow = app.world().resource::<FlowController>();
        assert_eq!(flow.name_input().chars().count(), MAX_TEAM_NAME_CHARS);
    }

    #[test]
    fn test_touches_ignored_outside_carousel_steps() {
        let mut app = app();
        {
            let mut input = app.world_mut().resource_mut::<DraftInput>();
            input.touches.push(TouchSample::began(0, 500.0, 0.0));
            input.touches.push(TouchSample::ended(0, 300.0, 0.0));
            input.rotate = Some(Direction::Next);
        }
        app.update();
        let carousels = app.world().resource::<DraftCarousels>();
        assert_eq!(carousels.current_index(DraftSlot::Coach), 0);
        assert!(!carousels.is_tracking_touch());
    }

    #[test]
    fn test_forward_with_empty_name_is_rejected() {
        let mut app = app();
        app.world_mut().resource_mut::<DraftInput>().forward = true;
        app.update();
        let mut flow = app.world_mut().resource_mut::<FlowController>();
        assert_eq!(flow.current_step(), DraftStep::NameEntry);
        assert_eq!(flow.drain_events().len(), 1);
    }
}
