//! Roster module - coach/player definitions and the roster database

mod database;
mod types;

pub use database::{ROSTER_FILE, RosterDatabase};
pub use types::{CarouselItem, Coach, Player, Position, SelectionItem, StatKind};
