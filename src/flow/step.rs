//! Draft steps and the session slots they fill

use serde::{Deserialize, Serialize};

use crate::roster::Position;

/// One of the six picks recorded in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftSlot {
    Coach,
    PG,
    SG,
    SF,
    PF,
    C,
}

impl DraftSlot {
    /// Draft order
    pub const ALL: [DraftSlot; 6] = [
        DraftSlot::Coach,
        DraftSlot::PG,
        DraftSlot::SG,
        DraftSlot::SF,
        DraftSlot::PF,
        DraftSlot::C,
    ];

    /// Position filled by this slot (None for the coach)
    pub fn position(self) -> Option<Position> {
        match self {
            DraftSlot::Coach => None,
            DraftSlot::PG => Some(Position::PG),
            DraftSlot::SG => Some(Position::SG),
            DraftSlot::SF => Some(Position::SF),
            DraftSlot::PF => Some(Position::PF),
            DraftSlot::C => Some(Position::C),
        }
    }

    pub fn for_position(position: Position) -> Self {
        match position {
            Position::PG => DraftSlot::PG,
            Position::SG => DraftSlot::SG,
            Position::SF => DraftSlot::SF,
            Position::PF => DraftSlot::PF,
            Position::C => DraftSlot::C,
        }
    }

    /// Heading shown on the selection panel
    pub fn title(self) -> &'static str {
        match self.position() {
            Some(position) => position.label(),
            None => "Head Coach",
        }
    }

    /// Parse the short code used in logs and scenario files (case-insensitive)
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        DraftSlot::ALL
            .into_iter()
            .find(|slot| slot.to_string().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for DraftSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position() {
            Some(position) => write!(f, "{}", position),
            None => write!(f, "Coach"),
        }
    }
}

/// One page of the onboarding flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftStep {
    NameEntry,
    /// Typewriter message; advances on its own
    Welcome,
    /// Carousel pick for one slot
    Select(DraftSlot),
    /// Optional summary before hand-off
    Review,
}

impl DraftStep {
    /// Name entry, welcome, then one carousel step per slot
    pub fn standard_sequence() -> Vec<DraftStep> {
        let mut steps = vec![DraftStep::NameEntry, DraftStep::Welcome];
        steps.extend(DraftSlot::ALL.into_iter().map(DraftStep::Select));
        steps
    }

    /// Standard sequence, optionally followed by the review page
    pub fn sequence(review_step: bool) -> Vec<DraftStep> {
        let mut steps = Self::standard_sequence();
        if review_step {
            steps.push(DraftStep::Review);
        }
        steps
    }

    /// Carousel slot bound to this step
    pub fn carousel_slot(self) -> Option<DraftSlot> {
        match self {
            DraftStep::Select(slot) => Some(slot),
            _ => None,
        }
    }

    /// Whether the panel exposes user forward/back triggers
    pub fn has_nav_triggers(self) -> bool {
        !matches!(self, DraftStep::Welcome)
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        match name {
            "NameEntry" => return Some(DraftStep::NameEntry),
            "Welcome" => return Some(DraftStep::Welcome),
            "Review" => return Some(DraftStep::Review),
            _ => {}
        }
        let code = name.strip_suffix("Select")?;
        DraftSlot::parse(code).map(DraftStep::Select)
    }
}

impl std::fmt::Display for DraftStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftStep::NameEntry => write!(f, "NameEntry"),
            DraftStep::Welcome => write!(f, "Welcome"),
            DraftStep::Select(slot) => write!(f, "{}Select", slot),
            DraftStep::Review => write!(f, "Review"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sequence_order() {
        let names: Vec<String> = DraftStep::standard_sequence()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "NameEntry",
                "Welcome",
                "CoachSelect",
                "PGSelect",
                "SGSelect",
                "SFSelect",
                "PFSelect",
                "CSelect"
            ]
        );
        assert_eq!(DraftStep::sequence(true).last(), Some(&DraftStep::Review));
    }

    #[test]
    fn test_parse_matches_display() {
        for step in DraftStep::sequence(true) {
            assert_eq!(DraftStep::parse(&step.to_string()), Some(step));
        }
        assert_eq!(DraftStep::parse("Select"), None);
        assert_eq!(DraftSlot::parse("pg"), Some(DraftSlot::PG));
        assert_eq!(DraftSlot::parse("coach"), Some(DraftSlot::Coach));
        assert_eq!(DraftSlot::parse("QB"), None);
    }

    #[test]
    fn test_slot_positions() {
        assert_eq!(DraftSlot::Coach.position(), None);
        for position in Position::ALL {
            assert_eq!(DraftSlot::for_position(position).position(), Some(position));
        }
        assert_eq!(DraftSlot::C.title(), "Center");
    }
}
