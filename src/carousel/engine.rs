//! Cyclic carousel engine
//!
//! Items and visual slots are bound 1:1 by index. The engine tracks which
//! slot is centered, converts navigation requests into index changes, and
//! animates every slot toward its new target over a fixed duration. While an
//! animation runs the carousel is busy and rejects further navigation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ConfigurationError, DraftError, TransitionRejection};
use crate::helpers::{lerp, lerp_vec2, smooth_step};

/// Per-carousel tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Horizontal offset of side previews (px)
    pub x_offset: f32,
    /// Scale of side previews, in (0, 1]
    pub side_scale: f32,
    /// Seconds to animate between positions, > 0
    pub transition_duration: f32,
    /// Minimum horizontal drag (px) to trigger, >= 0
    pub swipe_threshold: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            x_offset: CAROUSEL_X_OFFSET,
            side_scale: CAROUSEL_SIDE_SCALE,
            transition_duration: CAROUSEL_TRANSITION_DURATION,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.x_offset.is_finite() {
            return Err(ConfigurationError::InvalidValue {
                field: "x_offset",
                value: self.x_offset,
            });
        }
        if !(self.side_scale > 0.0 && self.side_scale <= 1.0) {
            return Err(ConfigurationError::InvalidValue {
                field: "side_scale",
                value: self.side_scale,
            });
        }
        if !(self.transition_duration > 0.0 && self.transition_duration.is_finite()) {
            return Err(ConfigurationError::InvalidValue {
                field: "transition_duration",
                value: self.transition_duration,
            });
        }
        if !(self.swipe_threshold >= 0.0) {
            return Err(ConfigurationError::InvalidValue {
                field: "swipe_threshold",
                value: self.swipe_threshold,
            });
        }
        Ok(())
    }
}

/// Presentation state of one slot (offset from the carousel origin + uniform scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualSlot {
    pub position: Vec2,
    pub scale: f32,
}

impl Default for VisualSlot {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn delta(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }
}

/// Display offset of slot `index` relative to the centered slot.
///
/// The raw difference is wrapped by `len` at most once, then clamped to
/// {-1, 0, +1}: only the immediate neighbours get their own side position,
/// everything further out collapses onto a side (3-up layout).
pub fn slot_offset(index: usize, center: usize, len: usize) -> isize {
    let len = len as isize;
    let mut raw = index as isize - center as isize;
    if raw > 1 {
        raw -= len;
    } else if raw < -1 {
        raw += len;
    }
    raw.clamp(-1, 1)
}

/// One slot's animation endpoints
#[derive(Debug, Clone, Copy)]
struct SlotTween {
    from: VisualSlot,
    to: VisualSlot,
}

/// In-flight repositioning of every slot, sharing one clock
#[derive(Debug, Clone)]
struct SlotTransition {
    elapsed: f32,
    tweens: Vec<SlotTween>,
}

/// Cyclic carousel over items of type `T`
#[derive(Debug, Clone)]
pub struct CarouselEngine<T> {
    items: Vec<T>,
    slots: Vec<VisualSlot>,
    center: usize,
    config: CarouselConfig,
    transition: Option<SlotTransition>,
}

impl<T> CarouselEngine<T> {
    /// Bind `items` to `slots` by index. Fails if the counts differ or the
    /// config is out of range. Call [`init`](Self::init) before the first tick.
    pub fn new(
        items: Vec<T>,
        slots: Vec<VisualSlot>,
        config: CarouselConfig,
    ) -> Result<Self, DraftError> {
        if items.len() != slots.len() {
            return Err(ConfigurationError::SlotCountMismatch {
                items: items.len(),
                slots: slots.len(),
            }
            .into());
        }
        config.validate()?;

        Ok(Self {
            items,
            slots,
            center: 0,
            config,
            transition: None,
        })
    }

    /// Build with one fresh slot per item, already placed
    pub fn with_items(items: Vec<T>, config: CarouselConfig) -> Result<Self, DraftError> {
        let slots = vec![VisualSlot::default(); items.len()];
        let mut engine = Self::new(items, slots, config)?;
        engine.init();
        Ok(engine)
    }

    /// Snap every slot to its target for the current center
    pub fn init(&mut self) {
        self.place_instant();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.center
    }

    pub fn current_item(&self) -> Option<&T> {
        self.items.get(self.center)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn slots(&self) -> &[VisualSlot] {
        &self.slots
    }

    pub fn is_busy(&self) -> bool {
        self.transition.is_some()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Swap tuning. Idle carousels re-place immediately; a running animation
    /// is re-aimed at the new targets and keeps its elapsed time.
    pub fn set_config(&mut self, config: CarouselConfig) -> Result<(), DraftError> {
        config.validate()?;
        self.config = config;
        if self.transition.is_none() {
            self.place_instant();
            return Ok(());
        }
        let targets: Vec<VisualSlot> = (0..self.slots.len()).map(|i| self.target_for(i)).collect();
        if let Some(transition) = &mut self.transition {
            for (tween, target) in transition.tweens.iter_mut().zip(targets) {
                tween.to = target;
            }
        }
        Ok(())
    }

    /// Where slot `index` should rest for the current center
    pub fn target_for(&self, index: usize) -> VisualSlot {
        let offset = slot_offset(index, self.center, self.items.len());
        VisualSlot {
            position: Vec2::new(offset as f32 * self.config.x_offset, 0.0),
            scale: if offset == 0 {
                1.0
            } else {
                self.config.side_scale
            },
        }
    }

    /// Move every slot to its target without animating
    pub fn place_instant(&mut self) {
        for index in 0..self.slots.len() {
            self.slots[index] = self.target_for(index);
        }
    }

    /// Request a one-step rotation. Returns the new center index.
    ///
    /// Rejected while a transition is running (the request is dropped, not
    /// queued) and on an empty carousel.
    pub fn advance(&mut self, direction: Direction) -> Result<usize, DraftError> {
        if self.is_busy() {
            return Err(TransitionRejection::CarouselBusy.into());
        }
        if self.items.is_empty() {
            return Err(TransitionRejection::EmptyCarousel.into());
        }

        let len = self.items.len() as isize;
        self.center = (self.center as isize + direction.delta() + len).rem_euclid(len) as usize;

        let tweens = (0..self.slots.len())
            .map(|index| SlotTween {
                from: self.slots[index],
                to: self.target_for(index),
            })
            .collect();
        self.transition = Some(SlotTransition {
            elapsed: 0.0,
            tweens,
        });

        Ok(self.center)
    }

    /// Advance the running animation by `dt` seconds. The final tick snaps
    /// exactly onto the targets and releases the busy flag.
    pub fn tick(&mut self, dt: f32) {
        let Some(transition) = &mut self.transition else {
            return;
        };

        transition.elapsed += dt;
        let duration = self.config.transition_duration;

        if transition.elapsed >= duration {
            for (slot, tween) in self.slots.iter_mut().zip(&transition.tweens) {
                *slot = tween.to;
            }
            self.transition = None;
            return;
        }

        let t = smooth_step(transition.elapsed / duration);
        for (slot, tween) in self.slots.iter_mut().zip(&transition.tweens) {
            slot.position = lerp_vec2(tween.from.position, tween.to.position, t);
            slot.scale = lerp(tween.from.scale, tween.to.scale, t);
        }
    }
}
