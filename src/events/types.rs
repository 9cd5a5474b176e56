//! Event type definitions for the draft event stream

use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::flow::{DraftSlot, DraftStep};

/// Everything the draft publishes for logging and tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DraftEvent {
    /// Logger session opened (one per app launch)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,
    },
    /// The flow's step pointer moved
    StepChanged { from: DraftStep, to: DraftStep },
    /// Team name committed on leaving name entry
    TeamNamed { name: String },
    /// Welcome typewriter began revealing
    WelcomeStarted,
    /// A carousel pick was written into the session
    SelectionCommitted { slot: DraftSlot, name: String },
    /// A step advanced with nothing to commit
    SelectionMissing { slot: DraftSlot },
    /// A navigation request was dropped
    NavigationRejected { reason: String },
    /// A carousel accepted a rotation
    CarouselMoved { slot: DraftSlot, center: usize },
    /// Final step advanced; the session is ready for hand-off
    FlowCompleted { team_name: String, missing: usize },
}

impl DraftEvent {
    /// Short code used by the compact log format
    pub fn type_code(&self) -> &'static str {
        match self {
            DraftEvent::SessionStart { .. } => "SS",
            DraftEvent::StepChanged { .. } => "ST",
            DraftEvent::TeamNamed { .. } => "TN",
            DraftEvent::WelcomeStarted => "WS",
            DraftEvent::SelectionCommitted { .. } => "SC",
            DraftEvent::SelectionMissing { .. } => "SM",
            DraftEvent::NavigationRejected { .. } => "NR",
            DraftEvent::CarouselMoved { .. } => "CM",
            DraftEvent::FlowCompleted { .. } => "FC",
        }
    }

    /// Variant name, as used by scenario expectations
    pub fn name(&self) -> &'static str {
        match self {
            DraftEvent::SessionStart { .. } => "SessionStart",
            DraftEvent::StepChanged { .. } => "StepChanged",
            DraftEvent::TeamNamed { .. } => "TeamNamed",
            DraftEvent::WelcomeStarted => "WelcomeStarted",
            DraftEvent::SelectionCommitted { .. } => "SelectionCommitted",
            DraftEvent::SelectionMissing { .. } => "SelectionMissing",
            DraftEvent::NavigationRejected { .. } => "NavigationRejected",
            DraftEvent::CarouselMoved { .. } => "CarouselMoved",
            DraftEvent::FlowCompleted { .. } => "FlowCompleted",
        }
    }

    /// Slot this event concerns, if any
    pub fn slot(&self) -> Option<DraftSlot> {
        match self {
            DraftEvent::SelectionCommitted { slot, .. }
            | DraftEvent::SelectionMissing { slot }
            | DraftEvent::CarouselMoved { slot, .. } => Some(*slot),
            _ => None,
        }
    }

    pub fn rejected(error: &DraftError) -> Self {
        DraftEvent::NavigationRejected {
            reason: error.to_string(),
        }
    }
}
