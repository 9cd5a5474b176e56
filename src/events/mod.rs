//! Draft event stream
//!
//! Provides a compact text format for logging every draft event, and the
//! EventBus that collects them each frame.

mod bus;
mod format;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use format::{parse_event, serialize_event};
pub use logger::{EventLogConfig, EventLogger};
pub use types::DraftEvent;
