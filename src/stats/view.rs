//! Stat bars for whichever item sits in one carousel slot
//!
//! The view pulls from its carousel every tick. It only shows while its
//! slot is centered and the carousel is idle; anything else hides it and
//! drops the cached item, so the next time it settles the bars rebuild and
//! the staggered reveal replays from the header.

use serde::{Deserialize, Serialize};

use crate::carousel::CarouselEngine;
use crate::constants::*;
use crate::error::ConfigurationError;
use crate::helpers::progress;
use crate::roster::{CarouselItem, StatKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsViewConfig {
    /// Value that fills a bar completely
    pub max_value: f32,
    /// Seconds for the header or one row to fade in
    pub bar_fade_duration: f32,
    /// Gap after each row before the next starts
    pub delay_between_bars: f32,
}

impl Default for StatsViewConfig {
    fn default() -> Self {
        Self {
            max_value: STAT_MAX_VALUE as f32,
            bar_fade_duration: BAR_FADE_DURATION,
            delay_between_bars: DELAY_BETWEEN_BARS,
        }
    }
}

impl StatsViewConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.max_value > 0.0 && self.max_value.is_finite()) {
            return Err(ConfigurationError::InvalidValue {
                field: "max_value",
                value: self.max_value,
            });
        }
        if !(self.bar_fade_duration >= 0.0 && self.bar_fade_duration.is_finite()) {
            return Err(ConfigurationError::InvalidValue {
                field: "bar_fade_duration",
                value: self.bar_fade_duration,
            });
        }
        if !(self.delay_between_bars >= 0.0 && self.delay_between_bars.is_finite()) {
            return Err(ConfigurationError::InvalidValue {
                field: "delay_between_bars",
                value: self.delay_between_bars,
            });
        }
        Ok(())
    }

    /// When row `index` starts fading in, measured from the rebuild
    fn row_start(&self, index: usize) -> f32 {
        self.bar_fade_duration + index as f32 * (self.bar_fade_duration + self.delay_between_bars)
    }

    /// Total reveal length for `rows` rows
    pub fn reveal_duration(&self, rows: usize) -> f32 {
        self.row_start(rows)
    }
}

/// One bar: label, raw value and normalized fill
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub stat: StatKind,
    pub label: &'static str,
    pub value: u32,
    /// `value / max_value`, clamped to [0, 1]
    pub fill: f32,
    pub alpha: f32,
}

/// Part of the reveal currently animating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Header,
    Row(usize),
    /// Pause after row `n` finished
    Delay(usize),
    Done,
}

/// In-flight staggered fade. Dropping it cancels the reveal.
#[derive(Debug, Clone, Default)]
struct StatsReveal {
    elapsed: f32,
}

#[derive(Debug, Clone)]
pub struct StatsView<T> {
    slot_index: usize,
    config: StatsViewConfig,
    cached: Option<T>,
    rows: Vec<StatRow>,
    header_alpha: f32,
    visible: bool,
    reveal: Option<StatsReveal>,
}

impl<T: CarouselItem + Clone + PartialEq> StatsView<T> {
    /// View bound to carousel slot `slot_index`
    pub fn new(slot_index: usize, config: StatsViewConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            slot_index,
            config,
            cached: None,
            rows: Vec::new(),
            header_alpha: 0.0,
            visible: false,
            reveal: None,
        })
    }

    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal.is_some()
    }

    pub fn rows(&self) -> &[StatRow] {
        &self.rows
    }

    pub fn header_alpha(&self) -> f32 {
        self.header_alpha
    }

    /// Item the bars currently describe
    pub fn item(&self) -> Option<&T> {
        self.cached.as_ref()
    }

    pub fn config(&self) -> &StatsViewConfig {
        &self.config
    }

    /// New tuning applies from the next rebuild
    pub fn set_config(&mut self, config: StatsViewConfig) -> Result<(), ConfigurationError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn phase(&self) -> RevealPhase {
        let Some(reveal) = &self.reveal else {
            return RevealPhase::Done;
        };
        let fade = self.config.bar_fade_duration;
        if reveal.elapsed < fade {
            return RevealPhase::Header;
        }
        for index in 0..self.rows.len() {
            let start = self.config.row_start(index);
            if reveal.elapsed < start + fade {
                return RevealPhase::Row(index);
            }
            if reveal.elapsed < self.config.row_start(index + 1) {
                return RevealPhase::Delay(index);
            }
        }
        RevealPhase::Done
    }

    /// Hide, clear the cache and abandon any reveal
    pub fn hide(&mut self) {
        self.visible = false;
        self.cached = None;
        self.reveal = None;
        self.header_alpha = 0.0;
        for row in &mut self.rows {
            row.alpha = 0.0;
        }
    }

    /// Rebuild bars for `item` and restart the reveal from the header
    fn rebuild(&mut self, item: &T) {
        let max_value = self.config.max_value;
        self.rows = StatKind::ALL
            .into_iter()
            .filter_map(|stat| {
                let value = item.attribute(stat)?;
                Some(StatRow {
                    stat,
                    label: stat.label(),
                    value,
                    fill: (value as f32 / max_value).clamp(0.0, 1.0),
                    alpha: 0.0,
                })
            })
            .collect();
        self.cached = Some(item.clone());
        self.header_alpha = 0.0;
        self.visible = true;
        self.reveal = Some(StatsReveal::default());
    }

    fn apply_reveal(&mut self) {
        let Some(reveal) = &self.reveal else {
            return;
        };
        let elapsed = reveal.elapsed;
        let fade = self.config.bar_fade_duration;

        self.header_alpha = progress(elapsed, fade);
        for (index, row) in self.rows.iter_mut().enumerate() {
            let start = self.config.row_start(index);
            row.alpha = if elapsed < start {
                0.0
            } else {
                progress(elapsed - start, fade)
            };
        }

        if elapsed >= self.config.reveal_duration(self.rows.len()) {
            self.reveal = None;
        }
    }

    /// Pull the carousel state and advance the reveal by `dt`
    pub fn tick(&mut self, carousel: &CarouselEngine<T>, dt: f32) {
        let centered = !carousel.is_busy() && carousel.current_index() == self.slot_index;
        let item = if centered {
            carousel.items().get(self.slot_index)
        } else {
            None
        };
        let Some(item) = item else {
            if self.visible || self.cached.is_some() {
                self.hide();
            }
            return;
        };

        if self.cached.as_ref() != Some(item) {
            self.rebuild(item);
            return;
        }

        if let Some(reveal) = &mut self.reveal {
            reveal.elapsed += dt;
            self.apply_reveal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{CarouselConfig, Direction};
    use crate::roster::{Player, Position};

    fn player(name: &str, shooting: u32) -> Player {
        let mut player = Player::with_rating(name, Position::SG, 50);
        player.shooting = shooting;
        player
    }

    fn carousel() -> CarouselEngine<Player> {
        let players = vec![player("A", 40), player("B", 80), player("C", 120)];
        CarouselEngine::with_items(players, CarouselConfig::default()).unwrap()
    }

    fn settle(carousel: &mut CarouselEngine<Player>) {
        for _ in 0..1000 {
            if !carousel.is_busy() {
                return;
            }
            carousel.tick(1.0 / 60.0);
        }
        panic!("carousel never settled");
    }

    #[test]
    fn test_centered_slot_builds_rows_with_fill() {
        let mut carousel = carousel();
        carousel.advance(Direction::Next).unwrap();
        settle(&mut carousel);

        let mut view = StatsView::new(1, StatsViewConfig::default()).unwrap();
        view.tick(&carousel, 0.0);

        assert!(view.is_visible());
        assert_eq!(view.rows().len(), 6);
        assert_eq!(view.rows()[0].stat, StatKind::Shooting);
        assert!((view.rows()[0].fill - 0.8).abs() < 1e-6);
        assert_eq!(view.rows()[5].stat, StatKind::Stamina);
        assert_eq!(view.header_alpha(), 0.0);
        assert_eq!(view.phase(), RevealPhase::Header);
    }

    #[test]
    fn test_fill_is_clamped() {
        let mut carousel = carousel();
        carousel.advance(Direction::Previous).unwrap();
        settle(&mut carousel);

        let mut view = StatsView::new(2, StatsViewConfig::default()).unwrap();
        view.tick(&carousel, 0.0);
        assert_eq!(view.rows()[0].value, 120);
        assert_eq!(view.rows()[0].fill, 1.0);
    }

    #[test]
    fn test_hidden_when_not_centered_or_busy() {
        let mut carousel = carousel();
        let mut view = StatsView::new(1, StatsViewConfig::default()).unwrap();
        view.tick(&carousel, 0.1);
        assert!(!view.is_visible());

        carousel.advance(Direction::Next).unwrap();
        carousel.tick(0.1);
        view.tick(&carousel, 0.1);
        assert!(!view.is_visible(), "busy carousel keeps the view hidden");
    }

    #[test]
    fn test_reveal_staggers_rows() {
        let carousel = carousel();
        let config = StatsViewConfig::default();
        let mut view = StatsView::new(0, config).unwrap();
        view.tick(&carousel, 0.0);

        // Header done, first row half way
        view.tick(&carousel, 0.45);
        assert_eq!(view.header_alpha(), 1.0);
        assert!((view.rows()[0].alpha - 0.5).abs() < 1e-4);
        assert_eq!(view.rows()[1].alpha, 0.0);
        assert_eq!(view.phase(), RevealPhase::Row(0));

        // Inside the delay after row 0
        view.tick(&carousel, 0.2);
        assert_eq!(view.rows()[0].alpha, 1.0);
        assert_eq!(view.rows()[1].alpha, 0.0);
        assert_eq!(view.phase(), RevealPhase::Delay(0));

        view.tick(&carousel, config.reveal_duration(6));
        assert!(!view.is_revealing());
        assert!(view.rows().iter().all(|row| row.alpha == 1.0));
    }

    #[test]
    fn test_moving_away_cancels_reveal() {
        let mut carousel = carousel();
        let mut view = StatsView::new(0, StatsViewConfig::default()).unwrap();
        view.tick(&carousel, 0.0);
        view.tick(&carousel, 0.2);
        assert!(view.is_revealing());

        carousel.advance(Direction::Next).unwrap();
        view.tick(&carousel, 0.0);
        assert!(!view.is_visible());
        assert!(!view.is_revealing());
        assert!(view.item().is_none());

        // Coming back replays from the header
        carousel.tick(1.0);
        carousel.advance(Direction::Previous).unwrap();
        settle(&mut carousel);
        view.tick(&carousel, 0.0);
        assert!(view.is_visible());
        assert_eq!(view.phase(), RevealPhase::Header);
        assert_eq!(view.item().map(|p| p.name.as_str()), Some("A"));
    }

    #[test]
    fn test_invalid_max_value_is_rejected() {
        let config = StatsViewConfig {
            max_value: 0.0,
            ..Default::default()
        };
        assert!(StatsView::<Player>::new(0, config).is_err());
    }
}
