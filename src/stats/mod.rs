//! Derived stat bars for centered players

mod panels;
mod view;

pub use panels::DraftStatsPanels;
pub use view::{RevealPhase, StatRow, StatsView, StatsViewConfig};
