//! Dynasty Draft - the team-building onboarding flow, built with Bevy
//!
//! The player names a team, watches a welcome message, then picks a head
//! coach and one player per position from swipeable carousels. The draft
//! core (carousels, flow controller, stats panels, session) is plain data
//! ticked by a few systems; `ui` renders it and `input` feeds it.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod debug_logging;
pub mod error;
pub mod events;
pub mod helpers;
pub mod settings;
pub mod testing;

// Draft modules
pub mod carousel;
pub mod flow;
pub mod input;
pub mod roster;
pub mod stats;
pub mod ui;

// Re-export commonly used types for convenience
pub use carousel::{CarouselConfig, CarouselEngine, Direction, DraftCarousels, VisualSlot};
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use debug_logging::DebugLogConfig;
pub use error::{ConfigurationError, DraftError, TransitionRejection};
pub use events::{BusEvent, DraftEvent, EventBus, EventLogConfig, EventLogger, update_event_bus_time};
pub use flow::{
    AdvanceOutcome, DraftComplete, DraftSession, DraftSlot, DraftStep, FlowConfig, FlowController,
    SelectionSource,
};
pub use helpers::*;
pub use input::DraftInput;
pub use roster::{CarouselItem, Coach, Player, Position, ROSTER_FILE, RosterDatabase, SelectionItem, StatKind};
pub use settings::{DraftSettings, SETTINGS_FILE};
pub use stats::{DraftStatsPanels, StatsView, StatsViewConfig};
