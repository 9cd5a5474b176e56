//! Spawns the camera and one world-space panel per flow step

use bevy::camera::ScalingMode;
use bevy::color::Alpha;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::components::*;
use crate::carousel::DraftCarousels;
use crate::constants::*;
use crate::flow::{DraftSlot, DraftStep, FlowController};
use crate::roster::{CarouselItem, Position, StatKind};

/// Camera - orthographic, always shows the full portrait canvas height
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 0.0),
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: CANVAS_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));
}

/// Text bundle that fades with `panel`
fn panel_text(
    text: &str,
    font_size: f32,
    color: Color,
    translation: Vec3,
    panel: usize,
) -> (Text2d, TextFont, TextLayout, TextColor, Transform, PanelFade) {
    (
        Text2d::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Center),
        TextColor(color),
        Transform::from_translation(translation),
        PanelFade::new(panel),
    )
}

/// Name and tag lines for one carousel card
fn card_lines(carousels: &DraftCarousels, slot: DraftSlot, index: usize) -> (String, String) {
    fn lines(item: &dyn CarouselItem) -> (String, String) {
        (item.display_name().to_string(), item.tag().to_string())
    }
    match slot.position() {
        None => carousels.coach().items().get(index).map(|c| lines(c)),
        Some(position) => carousels
            .player(position)
            .and_then(|c| c.items().get(index))
            .map(|p| lines(p)),
    }
    .unwrap_or_default()
}

/// Spawn every panel; only the flow's current panel starts visible
pub fn setup_draft_ui(
    mut commands: Commands,
    flow: Res<FlowController>,
    carousels: Res<DraftCarousels>,
) {
    for (panel, step) in flow.steps().iter().copied().enumerate() {
        let visibility = if panel == flow.step_index() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };

        commands
            .spawn((DraftPanel(panel), Transform::default(), visibility))
            .with_children(|parent| {
                parent.spawn((
                    Sprite::from_color(PANEL_COLOR, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT)),
                    Transform::from_xyz(0.0, 0.0, -1.0),
                    PanelFade::new(panel),
                ));

                match step {
                    DraftStep::NameEntry => {
                        parent.spawn(panel_text(
                            "Name Your Team",
                            64.0,
                            TEXT_PRIMARY,
                            Vec3::new(0.0, TITLE_Y, 1.0),
                            panel,
                        ));
                        parent.spawn((
                            Sprite::from_color(CARD_COLOR, Vec2::new(CANVAS_WIDTH * 0.7, 110.0)),
                            Transform::from_xyz(0.0, 200.0, 0.0),
                            PanelFade::new(panel),
                        ));
                        parent.spawn((
                            panel_text("", 52.0, TEXT_ACCENT, Vec3::new(0.0, 200.0, 1.0), panel),
                            DraftText::TeamName,
                        ));
                    }
                    DraftStep::Welcome => {
                        parent.spawn((
                            panel_text("", 72.0, TEXT_ACCENT, Vec3::new(0.0, 0.0, 1.0), panel),
                            DraftText::Welcome,
                        ));
                    }
                    DraftStep::Select(slot) => {
                        parent.spawn(panel_text(
                            &format!("Select Your {}", slot.title()),
                            60.0,
                            TEXT_PRIMARY,
                            Vec3::new(0.0, TITLE_Y, 1.0),
                            panel,
                        ));
                        spawn_carousel_cards(parent, &carousels, slot, panel);
                        if let Some(position) = slot.position() {
                            for slot_index in 0..carousels.len(slot) {
                                spawn_stats_panel(parent, position, slot_index);
                            }
                        }
                    }
                    DraftStep::Review => {
                        parent.spawn(panel_text(
                            "Your Team",
                            64.0,
                            TEXT_PRIMARY,
                            Vec3::new(0.0, TITLE_Y, 1.0),
                            panel,
                        ));
                        parent.spawn((
                            panel_text("", 40.0, TEXT_SECONDARY, Vec3::new(0.0, 100.0, 1.0), panel),
                            DraftText::Review,
                        ));
                    }
                }

                if step.has_nav_triggers() {
                    let forward = match step {
                        DraftStep::Review => "Confirm",
                        _ => "Next",
                    };
                    spawn_nav_button(parent, panel, NavAction::Forward, forward, BUTTON_X);
                    if step != DraftStep::NameEntry {
                        spawn_nav_button(parent, panel, NavAction::Back, "Back", -BUTTON_X);
                    }
                }
            });
    }
}

fn spawn_carousel_cards(
    parent: &mut ChildSpawnerCommands,
    carousels: &DraftCarousels,
    slot: DraftSlot,
    panel: usize,
) {
    for (index, visual) in carousels.slots(slot).iter().enumerate() {
        let (name, tag) = card_lines(carousels, slot, index);
        parent
            .spawn((
                Sprite::from_color(CARD_COLOR, CARD_SIZE),
                slot_transform(visual.position, visual.scale),
                CarouselSlotView { slot, index },
                PanelFade::new(panel),
            ))
            .with_children(|card| {
                card.spawn(panel_text(&name, 34.0, TEXT_PRIMARY, Vec3::new(0.0, -120.0, 0.1), panel));
                card.spawn(panel_text(&tag, 24.0, TEXT_SECONDARY, Vec3::new(0.0, -160.0, 0.1), panel));
            });
    }
}

fn spawn_stats_panel(parent: &mut ChildSpawnerCommands, position: Position, slot_index: usize) {
    let element = |part| StatsElement {
        position,
        slot_index,
        part,
    };
    let hidden = |color: Color| color.with_alpha(0.0);

    parent.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 36.0,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Center),
        TextColor(hidden(TEXT_ACCENT)),
        Transform::from_xyz(0.0, STATS_PANEL_Y, 1.0),
        element(StatsPart::Header),
    ));

    for row in 0..StatKind::ALL.len() {
        let y = stat_row_y(row);
        parent.spawn((
            Text2d::new(""),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextColor(hidden(TEXT_SECONDARY)),
            Transform::from_xyz(-STAT_BAR_WIDTH / 2.0 - 90.0, y, 1.0),
            element(StatsPart::Label(row)),
        ));
        parent.spawn((
            Sprite::from_color(hidden(BAR_BG_COLOR), Vec2::new(STAT_BAR_WIDTH, STAT_BAR_HEIGHT)),
            Transform::from_xyz(0.0, y, 0.5),
            element(StatsPart::BarBackground(row)),
        ));
        let (width, x) = bar_fill_geometry(0.0);
        parent.spawn((
            Sprite::from_color(hidden(BAR_FILL_COLOR), Vec2::new(width, STAT_BAR_HEIGHT)),
            Transform::from_xyz(x, y, 0.6),
            element(StatsPart::BarFill(row)),
        ));
        parent.spawn((
            Text2d::new(""),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextColor(hidden(TEXT_PRIMARY)),
            Transform::from_xyz(STAT_BAR_WIDTH / 2.0 + 50.0, y, 1.0),
            element(StatsPart::Value(row)),
        ));
    }
}

fn spawn_nav_button(
    parent: &mut ChildSpawnerCommands,
    panel: usize,
    action: NavAction,
    label: &str,
    x: f32,
) {
    parent
        .spawn((
            Sprite::from_color(BUTTON_COLOR, BUTTON_SIZE),
            Transform::from_xyz(x, BUTTON_Y, 0.5),
            NavButton { panel, action },
            PanelFade::new(panel),
        ))
        .with_children(|button| {
            button.spawn(panel_text(label, 36.0, TEXT_PRIMARY, Vec3::new(0.0, 0.0, 0.1), panel));
        });
}

/// Card transform for a visual slot. Larger cards draw in front.
pub fn slot_transform(position: Vec2, scale: f32) -> Transform {
    Transform::from_xyz(position.x, CAROUSEL_Y + position.y, scale).with_scale(Vec3::splat(scale))
}

/// Vertical position of stats row `row`
pub fn stat_row_y(row: usize) -> f32 {
    STATS_PANEL_Y - (row as f32 + 1.0) * STAT_ROW_SPACING
}

/// Width and center x of a left-aligned bar filled to `fill`
pub fn bar_fill_geometry(fill: f32) -> (f32, f32) {
    let width = STAT_BAR_WIDTH * fill.clamp(0.0, 1.0);
    (width, -STAT_BAR_WIDTH / 2.0 + width / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fill_is_left_aligned() {
        let (width, x) = bar_fill_geometry(0.5);
        assert_eq!(width, STAT_BAR_WIDTH / 2.0);
        assert_eq!(x, -STAT_BAR_WIDTH / 4.0);

        let (width, x) = bar_fill_geometry(1.5);
        assert_eq!(width, STAT_BAR_WIDTH);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_center_card_draws_in_front() {
        let center = slot_transform(Vec2::ZERO, 1.0);
        let side = slot_transform(Vec2::new(CAROUSEL_X_OFFSET, 0.0), CAROUSEL_SIDE_SCALE);
        assert!(center.translation.z > side.translation.z);
        assert_eq!(side.scale, Vec3::splat(CAROUSEL_SIDE_SCALE));
        assert_eq!(center.translation.y, CAROUSEL_Y);
    }
}
