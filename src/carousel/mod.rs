//! Cyclic selection carousels and swipe input

mod engine;
mod gesture;
mod registry;

pub use engine::{CarouselConfig, CarouselEngine, Direction, VisualSlot, slot_offset};
pub use gesture::{MOUSE_POINTER_ID, SwipeDetector, TouchPhase, TouchSample, swipe_direction};
pub use registry::DraftCarousels;
