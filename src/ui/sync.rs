//! Renderer sync: copies core state onto transforms, colors and text

use bevy::color::Alpha;
use bevy::prelude::*;

use super::components::*;
use super::setup::{bar_fill_geometry, slot_transform};
use crate::carousel::DraftCarousels;
use crate::constants::STAT_BAR_HEIGHT;
use crate::flow::{DraftSlot, DraftStep, FlowController};
use crate::stats::DraftStatsPanels;

/// Panel roots follow `interactive || opacity > 0`; every faded element
/// takes its panel's opacity as alpha.
pub fn sync_panels(
    flow: Res<FlowController>,
    mut roots: Query<(&DraftPanel, &mut Visibility)>,
    mut faded: Query<(&PanelFade, Option<&mut Sprite>, Option<&mut TextColor>)>,
) {
    for (panel, mut visibility) in &mut roots {
        let shown = flow
            .panel(panel.0)
            .is_some_and(|p| p.interactive || p.opacity > 0.0);
        let wanted = if shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }

    for (fade, sprite, text_color) in &mut faded {
        let opacity = flow.panel(fade.panel).map_or(0.0, |p| p.opacity);
        let alpha = fade.base_alpha * opacity;
        if let Some(mut sprite) = sprite {
            sprite.color.set_alpha(alpha);
        }
        if let Some(mut text_color) = text_color {
            text_color.0.set_alpha(alpha);
        }
    }
}

/// Card transforms follow the carousel's visual slots
pub fn sync_carousel_slots(
    carousels: Res<DraftCarousels>,
    mut cards: Query<(&CarouselSlotView, &mut Transform)>,
) {
    for (view, mut transform) in &mut cards {
        let Some(visual) = carousels.slots(view.slot).get(view.index) else {
            continue;
        };
        *transform = slot_transform(visual.position, visual.scale);
    }
}

/// Typewriter, team name field and review summary
pub fn sync_draft_text(flow: Res<FlowController>, mut texts: Query<(&DraftText, &mut Text2d)>) {
    for (kind, mut text) in &mut texts {
        let value = match kind {
            DraftText::Welcome => flow.welcome_text().to_string(),
            DraftText::TeamName => {
                if flow.current_step() == DraftStep::NameEntry && flow.accepts_input() {
                    format!("{}_", flow.name_input())
                } else {
                    flow.name_input().to_string()
                }
            }
            DraftText::Review => flow.session().summary_lines().join("\n"),
        };
        if text.0 != value {
            text.0 = value;
        }
    }
}

/// Stat bars: row alpha from the reveal times the owning panel's opacity
pub fn sync_stats_panels(
    flow: Res<FlowController>,
    panels: Res<DraftStatsPanels>,
    mut elements: Query<(
        &StatsElement,
        Option<&mut Sprite>,
        Option<&mut TextColor>,
        Option<&mut Text2d>,
        &mut Transform,
    )>,
) {
    for (element, sprite, text_color, text, mut transform) in &mut elements {
        let step = DraftStep::Select(DraftSlot::for_position(element.position));
        let panel_opacity = flow
            .steps()
            .iter()
            .position(|s| *s == step)
            .and_then(|index| flow.panel(index))
            .map_or(0.0, |p| p.opacity);

        let view = panels
            .view(element.position, element.slot_index)
            .filter(|view| view.is_visible());

        let (alpha, content) = match (view, element.part) {
            (None, _) => (0.0, None),
            (Some(view), StatsPart::Header) => (
                view.header_alpha(),
                view.item().map(|player| player.name.clone()),
            ),
            (Some(view), StatsPart::Label(row)) => match view.rows().get(row) {
                Some(stat) => (stat.alpha, Some(stat.label.to_string())),
                None => (0.0, None),
            },
            (Some(view), StatsPart::Value(row)) => match view.rows().get(row) {
                Some(stat) => (stat.alpha, Some(stat.value.to_string())),
                None => (0.0, None),
            },
            (Some(view), StatsPart::BarBackground(row)) => {
                (view.rows().get(row).map_or(0.0, |stat| stat.alpha), None)
            }
            (Some(view), StatsPart::BarFill(row)) => match view.rows().get(row) {
                Some(stat) => {
                    let (width, x) = bar_fill_geometry(stat.fill);
                    transform.translation.x = x;
                    if let Some(mut sprite) = sprite {
                        sprite.custom_size = Some(Vec2::new(width, STAT_BAR_HEIGHT));
                        sprite.color.set_alpha(stat.alpha * panel_opacity);
                    }
                    continue;
                }
                None => (0.0, None),
            },
        };

        let alpha = alpha * panel_opacity;
        if let Some(mut sprite) = sprite {
            sprite.color.set_alpha(alpha);
        }
        if let Some(mut text_color) = text_color {
            text_color.0.set_alpha(alpha);
        }
        if let (Some(mut text), Some(content)) = (text, content)
            && text.0 != content
        {
            text.0 = content;
        }
    }
}
