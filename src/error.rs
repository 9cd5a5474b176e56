//! Error taxonomy for the draft flow
//!
//! None of these are fatal: configuration errors are returned from
//! constructors, the other two are returned from navigation calls and leave
//! the flow interactable.

use crate::flow::{DraftSlot, DraftStep};

/// Any error the draft core can report
#[derive(Debug, Clone, PartialEq)]
pub enum DraftError {
    /// Construction-time misconfiguration (proceeding would corrupt index math)
    Configuration(ConfigurationError),
    /// A step advanced but its carousel had no item to commit
    OptionalSelection { slot: DraftSlot },
    /// A navigation request was dropped without changing state
    InvalidTransition(TransitionRejection),
}

/// Why a component refused to be built
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    SlotCountMismatch { items: usize, slots: usize },
    EmptyPanelList,
    InvalidValue { field: &'static str, value: f32 },
}

/// Why a navigation request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRejection {
    CarouselBusy,
    EmptyCarousel,
    PanelTransitionInFlight,
    EmptyTeamName,
    AutoAdvanceOnly(DraftStep),
    BelowRetreatFloor(DraftStep),
    FlowComplete,
}

impl DraftError {
    /// True for errors that leave state untouched (dropped requests)
    pub fn is_rejection(&self) -> bool {
        matches!(self, DraftError::InvalidTransition(_))
    }
}

impl From<ConfigurationError> for DraftError {
    fn from(err: ConfigurationError) -> Self {
        DraftError::Configuration(err)
    }
}

impl From<TransitionRejection> for DraftError {
    fn from(reason: TransitionRejection) -> Self {
        DraftError::InvalidTransition(reason)
    }
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::SlotCountMismatch { items, slots } => {
                write!(f, "item count ({}) != slot count ({})", items, slots)
            }
            ConfigurationError::EmptyPanelList => write!(f, "flow has no panels"),
            ConfigurationError::InvalidValue { field, value } => {
                write!(f, "invalid value for {}: {}", field, value)
            }
        }
    }
}

impl std::fmt::Display for TransitionRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionRejection::CarouselBusy => write!(f, "carousel is mid-transition"),
            TransitionRejection::EmptyCarousel => write!(f, "carousel has no items"),
            TransitionRejection::PanelTransitionInFlight => write!(f, "panel cross-fade in progress"),
            TransitionRejection::EmptyTeamName => write!(f, "team name is empty"),
            TransitionRejection::AutoAdvanceOnly(step) => {
                write!(f, "{} advances on its own", step)
            }
            TransitionRejection::BelowRetreatFloor(step) => {
                write!(f, "cannot go back from {}", step)
            }
            TransitionRejection::FlowComplete => write!(f, "draft already complete"),
        }
    }
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::Configuration(err) => write!(f, "configuration error: {}", err),
            DraftError::OptionalSelection { slot } => {
                write!(f, "no selection available for {}", slot)
            }
            DraftError::InvalidTransition(reason) => write!(f, "transition rejected: {}", reason),
        }
    }
}

impl std::error::Error for DraftError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = DraftError::from(ConfigurationError::SlotCountMismatch { items: 6, slots: 5 });
        assert_eq!(err.to_string(), "configuration error: item count (6) != slot count (5)");

        let err = DraftError::from(TransitionRejection::EmptyTeamName);
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "transition rejected: team name is empty");

        let err = DraftError::OptionalSelection { slot: DraftSlot::PG };
        assert!(!err.is_rejection());
        assert!(err.to_string().contains("PG"));
    }
}
