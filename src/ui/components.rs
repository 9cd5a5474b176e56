//! Marker components binding rendered entities to draft state by index

use bevy::prelude::*;

use crate::flow::DraftSlot;
use crate::roster::Position;

/// Root of one flow panel; `0` is the step index
#[derive(Component, Debug, Clone, Copy)]
pub struct DraftPanel(pub usize);

/// Element whose alpha follows its panel's opacity
#[derive(Component, Debug, Clone, Copy)]
pub struct PanelFade {
    pub panel: usize,
    /// Alpha at full panel opacity
    pub base_alpha: f32,
}

impl PanelFade {
    pub fn new(panel: usize) -> Self {
        Self {
            panel,
            base_alpha: 1.0,
        }
    }
}

/// One carousel card, bound to item `index` of the slot's carousel
#[derive(Component, Debug, Clone, Copy)]
pub struct CarouselSlotView {
    pub slot: DraftSlot,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Forward,
    Back,
}

/// Forward/back trigger on a panel
#[derive(Component, Debug, Clone, Copy)]
pub struct NavButton {
    pub panel: usize,
    pub action: NavAction,
}

/// Text driven from flow state each frame
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftText {
    Welcome,
    TeamName,
    Review,
}

/// Part of a stats panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPart {
    /// Player name above the bars
    Header,
    Label(usize),
    Value(usize),
    BarBackground(usize),
    BarFill(usize),
}

/// Element of the stats panel for one player carousel slot
#[derive(Component, Debug, Clone, Copy)]
pub struct StatsElement {
    pub position: Position,
    pub slot_index: usize,
    pub part: StatsPart,
}
