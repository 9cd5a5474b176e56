//! Scripted input injection for scenarios

use bevy::prelude::*;
use std::collections::HashMap;

use super::parser::{FrameInput, InputSnapshot};
use crate::carousel::{Direction, TouchSample};
use crate::input::DraftInput;

/// Resource holding scripted inputs for a scenario
#[derive(Resource, Default)]
pub struct ScriptedInputs {
    /// Map of frame -> snapshots delivered that frame
    pub frames: HashMap<u64, Vec<InputSnapshot>>,
    /// Current frame number
    pub current_frame: u64,
    /// Maximum frame to run
    pub max_frame: u64,
}

impl ScriptedInputs {
    /// Create from parsed frame inputs
    pub fn from_inputs(inputs: &[FrameInput]) -> Self {
        let mut frames: HashMap<u64, Vec<InputSnapshot>> = HashMap::new();
        let mut max_frame = 0u64;

        for fi in inputs {
            max_frame = max_frame.max(fi.frame);
            frames.entry(fi.frame).or_default().push(fi.actions.clone());
        }

        Self {
            frames,
            current_frame: 0,
            max_frame,
        }
    }

    /// Set max frame (for state assertions)
    pub fn set_max_frame(&mut self, frame: u64) {
        self.max_frame = self.max_frame.max(frame);
    }

    /// Advance to the next frame and return its input
    pub fn advance_frame(&mut self) -> DraftInput {
        let mut input = DraftInput::default();
        if let Some(snapshots) = self.frames.get(&self.current_frame) {
            for snapshot in snapshots {
                apply_snapshot(snapshot, &mut input);
            }
        }
        self.current_frame += 1;
        input
    }

    /// Check if the scenario should continue
    pub fn should_continue(&self) -> bool {
        self.current_frame <= self.max_frame
    }
}

/// Merge one snapshot into the frame's input
fn apply_snapshot(snapshot: &InputSnapshot, input: &mut DraftInput) {
    if let Some(text) = &snapshot.typed {
        input.typed.push_str(text);
    }
    if let Some(count) = snapshot.backspace {
        input.backspaces += count;
    }
    if snapshot.forward.unwrap_or(false) {
        input.forward = true;
    }
    if snapshot.back.unwrap_or(false) {
        input.back = true;
    }
    match snapshot.rotate.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("next") => input.rotate = Some(Direction::Next),
        Some("previous") | Some("prev") => input.rotate = Some(Direction::Previous),
        Some(other) => warn!("Unknown rotate direction '{}'", other),
        None => {}
    }
    let id = snapshot.touch_id.unwrap_or(0);
    if let Some([x, y]) = snapshot.touch_began {
        input.touches.push(TouchSample::began(id, x, y));
    }
    if let Some(dx) = snapshot.swipe {
        input.touches.push(TouchSample::began(0, 0.0, 0.0));
        input.touches.push(TouchSample::ended(0, dx, 0.0));
    }
    if let Some([x, y]) = snapshot.touch_ended {
        input.touches.push(TouchSample::ended(id, x, y));
    }
}
