//! Coach and player data shown in the draft carousels

use serde::{Deserialize, Serialize};

/// Player position on the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    /// Draft order of the five positions
    pub const ALL: [Position; 5] = [
        Position::PG,
        Position::SG,
        Position::SF,
        Position::PF,
        Position::C,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Position::PG => "Point Guard",
            Position::SG => "Shooting Guard",
            Position::SF => "Small Forward",
            Position::PF => "Power Forward",
            Position::C => "Center",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        };
        write!(f, "{}", code)
    }
}

/// Numeric attributes shown as stat bars, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Shooting,
    Dribbling,
    Speed,
    Vertical,
    Steal,
    Stamina,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Shooting,
        StatKind::Dribbling,
        StatKind::Speed,
        StatKind::Vertical,
        StatKind::Steal,
        StatKind::Stamina,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Shooting => "Shooting",
            StatKind::Dribbling => "Dribbling",
            StatKind::Speed => "Speed",
            StatKind::Vertical => "Vertical",
            StatKind::Steal => "Steal",
            StatKind::Stamina => "Stamina",
        }
    }
}

/// Anything a carousel can display and a stats panel can describe
pub trait CarouselItem {
    fn display_name(&self) -> &str;

    /// Asset path of the portrait image
    fn portrait(&self) -> &str;

    /// Short descriptor shown under the name (playstyle)
    fn tag(&self) -> &str;

    /// Numeric attribute, if this item has one
    fn attribute(&self, _stat: StatKind) -> Option<u32> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coach {
    pub name: String,
    #[serde(default)]
    pub portrait: String,
    /// e.g. Defensive, Offensive, Balanced
    pub playstyle: String,
    /// e.g. Rebounding, Shooting, Passing
    #[serde(default)]
    pub focus: String,
}

impl Coach {
    pub fn new(name: &str, playstyle: &str, focus: &str) -> Self {
        Self {
            name: name.to_string(),
            portrait: String::new(),
            playstyle: playstyle.to_string(),
            focus: focus.to_string(),
        }
    }
}

impl CarouselItem for Coach {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn portrait(&self) -> &str {
        &self.portrait
    }

    fn tag(&self) -> &str {
        &self.playstyle
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub shooting: u32,
    pub dribbling: u32,
    pub speed: u32,
    pub vertical: u32,
    pub steal: u32,
    pub stamina: u32,
    /// Height band, 1 (shortest) to 5
    pub height: u8,
    /// Matched against the coach's playstyle
    #[serde(default)]
    pub playstyle: String,
    #[serde(default)]
    pub portrait: String,
}

impl Player {
    /// Player with every stat set to `rating`
    pub fn with_rating(name: &str, position: Position, rating: u32) -> Self {
        Self {
            name: name.to_string(),
            position,
            shooting: rating,
            dribbling: rating,
            speed: rating,
            vertical: rating,
            steal: rating,
            stamina: rating,
            height: 3,
            playstyle: "Balanced".to_string(),
            portrait: String::new(),
        }
    }

    pub fn stat(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Shooting => self.shooting,
            StatKind::Dribbling => self.dribbling,
            StatKind::Speed => self.speed,
            StatKind::Vertical => self.vertical,
            StatKind::Steal => self.steal,
            StatKind::Stamina => self.stamina,
        }
    }

    pub fn stat_mut(&mut self, stat: StatKind) -> &mut u32 {
        match stat {
            StatKind::Shooting => &mut self.shooting,
            StatKind::Dribbling => &mut self.dribbling,
            StatKind::Speed => &mut self.speed,
            StatKind::Vertical => &mut self.vertical,
            StatKind::Steal => &mut self.steal,
            StatKind::Stamina => &mut self.stamina,
        }
    }
}

impl CarouselItem for Player {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn portrait(&self) -> &str {
        &self.portrait
    }

    fn tag(&self) -> &str {
        &self.playstyle
    }

    fn attribute(&self, stat: StatKind) -> Option<u32> {
        Some(self.stat(stat))
    }
}

/// A committed draft pick: either a coach or a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionItem {
    Coach(Coach),
    Player(Player),
}

impl SelectionItem {
    pub fn as_coach(&self) -> Option<&Coach> {
        match self {
            SelectionItem::Coach(coach) => Some(coach),
            SelectionItem::Player(_) => None,
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            SelectionItem::Player(player) => Some(player),
            SelectionItem::Coach(_) => None,
        }
    }
}

impl From<Coach> for SelectionItem {
    fn from(coach: Coach) -> Self {
        SelectionItem::Coach(coach)
    }
}

impl From<Player> for SelectionItem {
    fn from(player: Player) -> Self {
        SelectionItem::Player(player)
    }
}

impl CarouselItem for SelectionItem {
    fn display_name(&self) -> &str {
        match self {
            SelectionItem::Coach(c) => c.display_name(),
            SelectionItem::Player(p) => p.display_name(),
        }
    }

    fn portrait(&self) -> &str {
        match self {
            SelectionItem::Coach(c) => c.portrait(),
            SelectionItem::Player(p) => p.portrait(),
        }
    }

    fn tag(&self) -> &str {
        match self {
            SelectionItem::Coach(c) => c.tag(),
            SelectionItem::Player(p) => p.tag(),
        }
    }

    fn attribute(&self, stat: StatKind) -> Option<u32> {
        match self {
            SelectionItem::Coach(c) => c.attribute(stat),
            SelectionItem::Player(p) => p.attribute(stat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_attributes_follow_stat_order() {
        let mut player = Player::with_rating("Test", Position::SF, 50);
        player.shooting = 80;
        player.stamina = 20;
        let values: Vec<u32> = StatKind::ALL
            .iter()
            .filter_map(|s| player.attribute(*s))
            .collect();
        assert_eq!(values, vec![80, 50, 50, 50, 50, 20]);
    }

    #[test]
    fn test_coach_has_no_numeric_attributes() {
        let coach = Coach::new("Red", "Defensive", "Rebounding");
        assert_eq!(coach.attribute(StatKind::Shooting), None);
        assert_eq!(coach.tag(), "Defensive");
    }

    #[test]
    fn test_selection_item_delegates() {
        let item = SelectionItem::from(Player::with_rating("Guard", Position::PG, 70));
        assert_eq!(item.display_name(), "Guard");
        assert_eq!(item.attribute(StatKind::Speed), Some(70));
        assert!(item.as_coach().is_none());
        assert_eq!(item.as_player().map(|p| p.position), Some(Position::PG));
    }
}
