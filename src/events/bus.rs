//! Event Bus - the draft events published during the current frame
//!
//! `publish_draft_events` opens a new frame, then moves the events queued by
//! the flow controller and carousels here. Readers later in the same frame
//! (the scenario capture, UI hooks) see them; anything left unread is
//! dropped when the next frame opens, so the bus never outgrows one frame.

use bevy::prelude::*;

use super::types::DraftEvent;

/// Timestamped event for the event bus
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    /// Time in milliseconds since app start
    pub time_ms: u32,
    pub event: DraftEvent,
}

#[derive(Resource, Debug, Default)]
pub struct EventBus {
    /// Events published this frame and not yet drained
    frame: Vec<BusEvent>,
    /// Events published since startup
    published: u64,
    elapsed_ms: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the elapsed time (called each frame)
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    /// Drop whatever the previous frame left unread
    pub fn begin_frame(&mut self) {
        self.frame.clear();
    }

    pub fn emit(&mut self, event: DraftEvent) {
        self.published += 1;
        self.frame.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    pub fn drain(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.frame)
    }

    pub fn pending_count(&self) -> usize {
        self.frame.len()
    }

    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

/// System to update the event bus time each frame
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}
