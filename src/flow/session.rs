//! Draft session - team name and the six picks accumulated by the flow

use bevy::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

use super::step::DraftSlot;
use crate::roster::{CarouselItem, Coach, Player, Position, SelectionItem};

/// Result record written by the flow controller across steps.
///
/// Lives for one flow; after completion it is handed to whatever feature
/// consumes the drafted team. Any slot may be empty.
#[derive(Resource, Debug, Clone)]
pub struct DraftSession {
    id: String,
    started_at: String,
    team_name: Option<String>,
    selections: HashMap<DraftSlot, SelectionItem>,
}

impl Default for DraftSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: chrono::Local::now().format("%Y%m%d_%H%M%S").to_string(),
            team_name: None,
            selections: HashMap::new(),
        }
    }

    /// UUID v4 identifying this draft
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Local timestamp (`YYYYMMDD_HHMMSS`) of session creation
    pub fn started_at(&self) -> &str {
        &self.started_at
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref()
    }

    pub fn set_team_name(&mut self, name: &str) {
        self.team_name = Some(name.to_string());
    }

    /// Record a pick, replacing any earlier pick for the same slot
    pub fn commit(&mut self, slot: DraftSlot, item: SelectionItem) {
        self.selections.insert(slot, item);
    }

    pub fn selection(&self, slot: DraftSlot) -> Option<&SelectionItem> {
        self.selections.get(&slot)
    }

    pub fn coach(&self) -> Option<&Coach> {
        self.selection(DraftSlot::Coach).and_then(SelectionItem::as_coach)
    }

    pub fn player(&self, position: Position) -> Option<&Player> {
        self.selection(DraftSlot::for_position(position))
            .and_then(SelectionItem::as_player)
    }

    /// Slots with no pick, in draft order
    pub fn missing_slots(&self) -> Vec<DraftSlot> {
        DraftSlot::ALL
            .into_iter()
            .filter(|slot| !self.selections.contains_key(slot))
            .collect()
    }

    /// Team named and every slot filled
    pub fn is_complete(&self) -> bool {
        self.team_name.is_some() && self.missing_slots().is_empty()
    }

    /// Human-readable roster, one line per slot
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Team: {}", self.team_name().unwrap_or("(unnamed)"))];
        for slot in DraftSlot::ALL {
            let pick = self
                .selection(slot)
                .map(|item| item.display_name().to_string())
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!("{:>5}: {}", slot.to_string(), pick));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = DraftSession::new();
        assert_eq!(session.team_name(), None);
        assert_eq!(session.missing_slots().len(), 6);
        assert!(!session.is_complete());
        assert_eq!(session.id().len(), 36);
    }

    #[test]
    fn test_commit_and_typed_accessors() {
        let mut session = DraftSession::new();
        session.set_team_name("Comets");
        session.commit(DraftSlot::Coach, Coach::new("Hale", "Defensive", "Rebounding").into());
        session.commit(DraftSlot::PG, Player::with_rating("Quick", Position::PG, 70).into());

        assert_eq!(session.coach().map(|c| c.name.as_str()), Some("Hale"));
        assert_eq!(session.player(Position::PG).map(|p| p.name.as_str()), Some("Quick"));
        assert!(session.player(Position::C).is_none());
        assert_eq!(
            session.missing_slots(),
            vec![DraftSlot::SG, DraftSlot::SF, DraftSlot::PF, DraftSlot::C]
        );
    }

    #[test]
    fn test_summary_marks_missing_picks() {
        let mut session = DraftSession::new();
        session.set_team_name("Comets");
        let lines = session.summary_lines();
        assert_eq!(lines[0], "Team: Comets");
        assert_eq!(lines.len(), 7);
        assert!(lines[1].ends_with("Coach: -"));
    }
}
