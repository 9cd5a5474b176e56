//! Roster database - loading, validation, and default file generation

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::types::{Coach, Player, Position, StatKind};
use crate::constants::{HEIGHT_BAND_MAX, HEIGHT_BAND_MIN, STAT_MAX_VALUE, STAT_MIN_VALUE};

/// Path to the roster file
pub const ROSTER_FILE: &str = "assets/roster.json";

/// Every coach and player available in the draft
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterDatabase {
    #[serde(default)]
    pub coaches: Vec<Coach>,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl RosterDatabase {
    /// Load roster from file, creating the default file if it doesn't exist
    pub fn load_or_create(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("Roster file not found, creating default: {}", path);
            let defaults = Self::default_roster();
            if let Err(e) = defaults.write_to_file(path) {
                warn!("Failed to write default roster file: {}", e);
            }
            return defaults;
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(db) => {
                    info!(
                        "Loaded roster from {}: {} coaches, {} players",
                        path,
                        db.coaches.len(),
                        db.players.len()
                    );
                    db
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using default roster", path, e);
                    Self::default_roster()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using default roster", path, e);
                Self::default_roster()
            }
        }
    }

    /// Parse roster JSON and clamp out-of-range values
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut db: RosterDatabase =
            serde_json::from_str(content).map_err(|e| format!("invalid roster json: {}", e))?;
        db.sanitize();
        Ok(db)
    }

    /// Write roster to file as pretty JSON
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)
    }

    /// Clamp stats to 1-100 and height to 1-5, warning for each fix
    pub fn sanitize(&mut self) {
        for player in &mut self.players {
            for stat in StatKind::ALL {
                let value = player.stat(stat);
                let clamped = value.clamp(STAT_MIN_VALUE, STAT_MAX_VALUE);
                if clamped != value {
                    warn!(
                        "{}: {} {} out of range, clamped to {}",
                        player.name,
                        stat.label(),
                        value,
                        clamped
                    );
                    *player.stat_mut(stat) = clamped;
                }
            }
            let height = player.height.clamp(HEIGHT_BAND_MIN, HEIGHT_BAND_MAX);
            if height != player.height {
                warn!(
                    "{}: height band {} out of range, clamped to {}",
                    player.name, player.height, height
                );
                player.height = height;
            }
        }
    }

    /// Players eligible for one position carousel, in file order
    pub fn players_at(&self, position: Position) -> Vec<Player> {
        self.players
            .iter()
            .filter(|p| p.position == position)
            .cloned()
            .collect()
    }

    /// Built-in roster: six coaches and three players per position
    pub fn default_roster() -> Self {
        let coaches = vec![
            Coach::new("Marcus Hale", "Defensive", "Rebounding"),
            Coach::new("Dana Ortiz", "Offensive", "Shooting"),
            Coach::new("Ike Brennan", "Balanced", "Passing"),
            Coach::new("Sofia Lund", "Up-Tempo", "Transition"),
            Coach::new("Walt Kimura", "Grit", "Perimeter Defense"),
            Coach::new("Renee Cole", "Motion", "Ball Movement"),
        ];

        let mut players = Vec::new();
        let mut add = |name: &str, position: Position, stats: [u32; 6], height: u8, style: &str| {
            players.push(Player {
                name: name.to_string(),
                position,
                shooting: stats[0],
                dribbling: stats[1],
                speed: stats[2],
                vertical: stats[3],
                steal: stats[4],
                stamina: stats[5],
                height,
                playstyle: style.to_string(),
                portrait: String::new(),
            });
        };

        add("Jay Whitfield", Position::PG, [72, 91, 88, 60, 78, 84], 1, "Offensive");
        add("Nico Alvarez", Position::PG, [81, 84, 79, 55, 70, 76], 2, "Balanced");
        add("Tre Simmons", Position::PG, [65, 80, 93, 70, 88, 90], 1, "Defensive");

        add("Cal Reyes", Position::SG, [92, 75, 80, 66, 62, 74], 2, "Offensive");
        add("Duke Baptiste", Position::SG, [78, 70, 84, 74, 85, 80], 3, "Defensive");
        add("Owen Park", Position::SG, [85, 82, 76, 62, 68, 71], 2, "Balanced");

        add("Malik Grant", Position::SF, [80, 72, 78, 82, 74, 83], 3, "Balanced");
        add("Theo Varga", Position::SF, [74, 66, 70, 79, 86, 88], 4, "Defensive");
        add("Rico Mendes", Position::SF, [88, 78, 74, 71, 60, 72], 3, "Offensive");

        add("Gus Okafor", Position::PF, [62, 55, 64, 88, 70, 86], 4, "Defensive");
        add("Lenny Shaw", Position::PF, [76, 60, 66, 80, 58, 78], 4, "Offensive");
        add("Ari Novak", Position::PF, [68, 62, 70, 84, 72, 82], 5, "Balanced");

        add("Big Sam Toure", Position::C, [48, 40, 52, 90, 64, 80], 5, "Defensive");
        add("Viktor Hahn", Position::C, [70, 48, 50, 84, 55, 74], 5, "Offensive");
        add("Moses Dube", Position::C, [58, 45, 60, 92, 68, 85], 5, "Balanced");

        Self { coaches, players }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_covers_every_position() {
        let db = RosterDatabase::default_roster();
        assert_eq!(db.coaches.len(), 6);
        for position in Position::ALL {
            assert_eq!(db.players_at(position).len(), 3, "position {}", position);
        }
    }

    #[test]
    fn test_parse_clamps_out_of_range_values() {
        let json = r#"{
            "coaches": [{ "name": "Coach", "playstyle": "Balanced" }],
            "players": [{
                "name": "Rookie", "position": "C",
                "shooting": 150, "dribbling": 0, "speed": 50,
                "vertical": 50, "steal": 50, "stamina": 50,
                "height": 9
            }]
        }"#;
        let db = RosterDatabase::parse(json).unwrap();
        let rookie = &db.players[0];
        assert_eq!(rookie.shooting, 100);
        assert_eq!(rookie.dribbling, 1);
        assert_eq!(rookie.height, 5);
        assert_eq!(db.coaches[0].focus, "");
    }

    #[test]
    fn test_sanitize_only_touches_out_of_range_stats() {
        let mut db = RosterDatabase::default_roster();
        let before = db.players[1].clone();
        *db.players[0].stat_mut(StatKind::Stamina) = 0;
        *db.players[0].stat_mut(StatKind::Steal) = 101;
        let speed = db.players[0].speed;

        db.sanitize();

        assert_eq!(db.players[0].stamina, STAT_MIN_VALUE);
        assert_eq!(db.players[0].steal, STAT_MAX_VALUE);
        assert_eq!(db.players[0].speed, speed);
        assert_eq!(db.players[1], before);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(RosterDatabase::parse("{ not json").is_err());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let db = RosterDatabase::parse("{}").unwrap();
        assert!(db.coaches.is_empty());
        assert!(db.players_at(Position::PG).is_empty());
    }
}
