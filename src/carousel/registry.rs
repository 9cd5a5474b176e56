//! The six draft carousels (one coach, one per position) plus the shared
//! swipe detector.

use bevy::prelude::*;
use std::collections::HashMap;

use super::engine::{CarouselConfig, CarouselEngine, Direction, VisualSlot};
use super::gesture::{SwipeDetector, TouchSample};
use crate::error::{DraftError, TransitionRejection};
use crate::events::DraftEvent;
use crate::flow::{DraftSlot, SelectionSource};
use crate::roster::{Coach, Player, Position, RosterDatabase, SelectionItem};

#[derive(Resource, Debug)]
pub struct DraftCarousels {
    coach: CarouselEngine<Coach>,
    players: HashMap<Position, CarouselEngine<Player>>,
    detector: SwipeDetector,
    events: Vec<DraftEvent>,
}

impl DraftCarousels {
    /// One carousel per slot; position carousels hold only the players
    /// listed at that position.
    pub fn from_roster(roster: &RosterDatabase, config: CarouselConfig) -> Result<Self, DraftError> {
        let coach = CarouselEngine::with_items(roster.coaches.clone(), config)?;
        let mut players = HashMap::new();
        for position in Position::ALL {
            let pool = roster.players_at(position);
            if pool.is_empty() {
                warn!("Roster has no players at {}", position);
            }
            players.insert(position, CarouselEngine::with_items(pool, config)?);
        }

        Ok(Self {
            coach,
            players,
            detector: SwipeDetector::default(),
            events: Vec::new(),
        })
    }

    pub fn coach(&self) -> &CarouselEngine<Coach> {
        &self.coach
    }

    pub fn player(&self, position: Position) -> Option<&CarouselEngine<Player>> {
        self.players.get(&position)
    }

    pub fn is_busy(&self, slot: DraftSlot) -> bool {
        match slot.position() {
            None => self.coach.is_busy(),
            Some(position) => self.players.get(&position).is_some_and(|c| c.is_busy()),
        }
    }

    pub fn current_index(&self, slot: DraftSlot) -> usize {
        match slot.position() {
            None => self.coach.current_index(),
            Some(position) => self.players.get(&position).map_or(0, |c| c.current_index()),
        }
    }

    pub fn len(&self, slot: DraftSlot) -> usize {
        match slot.position() {
            None => self.coach.len(),
            Some(position) => self.players.get(&position).map_or(0, |c| c.len()),
        }
    }

    pub fn slots(&self, slot: DraftSlot) -> &[VisualSlot] {
        match slot.position() {
            None => self.coach.slots(),
            Some(position) => self.players.get(&position).map_or(&[], |c| c.slots()),
        }
    }

    /// Display name of item `index` in a slot's carousel
    pub fn item_name(&self, slot: DraftSlot, index: usize) -> Option<&str> {
        match slot.position() {
            None => self.coach.items().get(index).map(|c| c.name.as_str()),
            Some(position) => self
                .players
                .get(&position)
                .and_then(|c| c.items().get(index))
                .map(|p| p.name.as_str()),
        }
    }

    /// Rotate one carousel. Rejections are queued as events.
    pub fn advance(&mut self, slot: DraftSlot, direction: Direction) -> Result<usize, DraftError> {
        let result = match slot.position() {
            None => self.coach.advance(direction),
            Some(position) => match self.players.get_mut(&position) {
                Some(carousel) => carousel.advance(direction),
                None => Err(TransitionRejection::EmptyCarousel.into()),
            },
        };

        match &result {
            Ok(center) => self.events.push(DraftEvent::CarouselMoved {
                slot,
                center: *center,
            }),
            Err(error) => {
                debug!("Carousel {}: {}", slot, error);
                self.events.push(DraftEvent::rejected(error));
            }
        }
        result
    }

    /// Feed one touch sample to the carousel for `slot`. Samples arriving
    /// while that carousel animates are dropped and forget any pending
    /// begin, so a swipe never spans a transition.
    pub fn route_touch(&mut self, slot: DraftSlot, sample: TouchSample) -> Option<usize> {
        if self.is_busy(slot) {
            self.detector.reset();
            return None;
        }
        let threshold = match slot.position() {
            None => self.coach.config().swipe_threshold,
            Some(position) => self.players.get(&position)?.config().swipe_threshold,
        };
        let direction = self.detector.feed(sample, threshold)?;
        self.advance(slot, direction).ok()
    }

    /// Forget a half-finished swipe (e.g. the step changed mid-touch)
    pub fn reset_gesture(&mut self) {
        self.detector.reset();
    }

    pub fn is_tracking_touch(&self) -> bool {
        self.detector.is_tracking()
    }

    /// Advance every carousel's animation
    pub fn tick(&mut self, dt: f32) {
        self.coach.tick(dt);
        for carousel in self.players.values_mut() {
            carousel.tick(dt);
        }
    }

    /// Apply new tuning to every carousel. Stops at the first invalid value.
    pub fn set_config(&mut self, config: CarouselConfig) -> Result<(), DraftError> {
        config.validate()?;
        self.coach.set_config(config)?;
        for carousel in self.players.values_mut() {
            carousel.set_config(config)?;
        }
        Ok(())
    }

    pub fn drain_events(&mut self) -> Vec<DraftEvent> {
        std::mem::take(&mut self.events)
    }
}

impl SelectionSource for DraftCarousels {
    fn current_selection(&self, slot: DraftSlot) -> Option<SelectionItem> {
        match slot.position() {
            None => self.coach.current_item().cloned().map(SelectionItem::from),
            Some(position) => self
                .players
                .get(&position)?
                .current_item()
                .cloned()
                .map(SelectionItem::from),
        }
    }
}
