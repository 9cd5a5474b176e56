//! Stats views for every player carousel

use bevy::prelude::*;
use std::collections::HashMap;

use super::view::{StatsView, StatsViewConfig};
use crate::carousel::DraftCarousels;
use crate::error::ConfigurationError;
use crate::roster::{Player, Position};

/// One stats view per player slot, keyed by position
#[derive(Resource, Debug)]
pub struct DraftStatsPanels {
    views: HashMap<Position, Vec<StatsView<Player>>>,
}

impl DraftStatsPanels {
    /// A view for every slot of every player carousel
    pub fn new(carousels: &DraftCarousels, config: StatsViewConfig) -> Result<Self, ConfigurationError> {
        let mut views = HashMap::new();
        for position in Position::ALL {
            let count = carousels.player(position).map_or(0, |carousel| carousel.len());
            let row = (0..count)
                .map(|slot_index| StatsView::new(slot_index, config))
                .collect::<Result<Vec<_>, _>>()?;
            views.insert(position, row);
        }
        Ok(Self { views })
    }

    pub fn view_count(&self, position: Position) -> usize {
        self.views.get(&position).map_or(0, Vec::len)
    }

    pub fn view(&self, position: Position, slot_index: usize) -> Option<&StatsView<Player>> {
        self.views.get(&position)?.get(slot_index)
    }

    /// Pull each view's carousel state; views whose carousel is missing hide
    pub fn tick(&mut self, carousels: &DraftCarousels, dt: f32) {
        for (position, views) in &mut self.views {
            let Some(carousel) = carousels.player(*position) else {
                views.iter_mut().for_each(StatsView::hide);
                continue;
            };
            for view in views.iter_mut() {
                view.tick(carousel, dt);
            }
        }
    }

    pub fn set_config(&mut self, config: StatsViewConfig) -> Result<(), ConfigurationError> {
        config.validate()?;
        for view in self.views.values_mut().flatten() {
            view.set_config(config)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{CarouselConfig, Direction};
    use crate::flow::DraftSlot;
    use crate::roster::RosterDatabase;

    #[test]
    fn test_only_centered_slot_is_visible() {
        let mut carousels =
            DraftCarousels::from_roster(&RosterDatabase::default_roster(), CarouselConfig::default())
                .unwrap();
        let mut panels = DraftStatsPanels::new(&carousels, StatsViewConfig::default()).unwrap();
        panels.tick(&carousels, 0.0);

        for position in Position::ALL {
            assert!(panels.view(position, 0).unwrap().is_visible());
            assert!(!panels.view(position, 1).unwrap().is_visible());
        }

        carousels.advance(DraftSlot::PF, Direction::Next).unwrap();
        panels.tick(&carousels, 0.0);
        assert!(!panels.view(Position::PF, 0).unwrap().is_visible());
        assert!(!panels.view(Position::PF, 1).unwrap().is_visible());
        assert!(panels.view(Position::PG, 0).unwrap().is_visible());

        carousels.tick(1.0);
        panels.tick(&carousels, 0.0);
        assert!(panels.view(Position::PF, 1).unwrap().is_visible());
    }

    #[test]
    fn test_every_slot_of_a_deep_position_gets_a_view() {
        let mut roster = RosterDatabase::default_roster();
        let mut extra = roster.players_at(Position::PG)[0].clone();
        extra.name = "Fourth Guard".to_string();
        roster.players.push(extra);

        let mut carousels = DraftCarousels::from_roster(&roster, CarouselConfig::default()).unwrap();
        let mut panels = DraftStatsPanels::new(&carousels, StatsViewConfig::default()).unwrap();
        assert_eq!(panels.view_count(Position::PG), 4);
        assert_eq!(panels.view_count(Position::C), 3);

        carousels.advance(DraftSlot::PG, Direction::Previous).unwrap();
        carousels.tick(1.0);
        panels.tick(&carousels, 0.0);
        assert_eq!(carousels.current_index(DraftSlot::PG), 3);
        assert!(panels.view(Position::PG, 3).unwrap().is_visible());
        assert!(!panels.view(Position::PG, 0).unwrap().is_visible());
    }
}
