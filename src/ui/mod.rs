//! UI module - world-space panels, carousel cards, stat bars and the
//! systems that keep them in sync with the draft core

mod components;
mod setup;
mod sync;

pub use components::*;
pub use setup::{bar_fill_geometry, setup_draft_ui, slot_transform, spawn_camera, stat_row_y};
pub use sync::{sync_carousel_slots, sync_draft_text, sync_panels, sync_stats_panels};
