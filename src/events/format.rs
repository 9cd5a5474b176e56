//! Compact text format for draft event serialization
//!
//! Format: `T:NNNNN|CODE|data...`
//! - T:NNNNN = timestamp in milliseconds (5 digits, wraps at 99999)
//! - CODE = 2-char event type code
//! - data = pipe-separated values specific to event type
//!
//! Examples:
//! ```text
//! T:00000|SS|3f2a...|20260101_120000
//! T:01830|TN|Comets
//! T:01830|ST|NameEntry|Welcome
//! T:04120|CM|Coach|1
//! T:04700|SC|Coach|Dana Ortiz
//! T:05210|NR|transition rejected: panel cross-fade in progress
//! ```
//!
//! Free text (names, reasons) always comes last so it may contain `|`.

use super::types::DraftEvent;
use crate::flow::{DraftSlot, DraftStep};

/// Serialize a DraftEvent to compact text format
pub fn serialize_event(time_ms: u32, event: &DraftEvent) -> String {
    let ts = format!("T:{:05}", time_ms % 100000);
    let code = event.type_code();

    let data = match event {
        DraftEvent::SessionStart {
            session_id,
            timestamp,
        } => format!("{}|{}", session_id, timestamp),
        DraftEvent::StepChanged { from, to } => format!("{}|{}", from, to),
        DraftEvent::TeamNamed { name } => name.clone(),
        DraftEvent::WelcomeStarted => String::new(),
        DraftEvent::SelectionCommitted { slot, name } => format!("{}|{}", slot, name),
        DraftEvent::SelectionMissing { slot } => slot.to_string(),
        DraftEvent::NavigationRejected { reason } => reason.clone(),
        DraftEvent::CarouselMoved { slot, center } => format!("{}|{}", slot, center),
        DraftEvent::FlowCompleted { team_name, missing } => format!("{}|{}", missing, team_name),
    };

    format!("{}|{}|{}", ts, code, data)
}

/// Parse a line back into timestamp and event
pub fn parse_event(line: &str) -> Option<(u32, DraftEvent)> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return None;
    }

    let ts_str = parts[0].strip_prefix("T:")?;
    let time_ms: u32 = ts_str.parse().ok()?;

    let code = parts[1];
    let data = &parts[2..];

    let event = match code {
        "SS" if data.len() >= 2 => DraftEvent::SessionStart {
            session_id: data[0].to_string(),
            timestamp: data[1].to_string(),
        },
        "ST" if data.len() >= 2 => DraftEvent::StepChanged {
            from: DraftStep::parse(data[0])?,
            to: DraftStep::parse(data[1])?,
        },
        "TN" => DraftEvent::TeamNamed {
            name: data.join("|"),
        },
        "WS" => DraftEvent::WelcomeStarted,
        "SC" if data.len() >= 2 => DraftEvent::SelectionCommitted {
            slot: DraftSlot::parse(data[0])?,
            name: data[1..].join("|"),
        },
        "SM" => DraftEvent::SelectionMissing {
            slot: DraftSlot::parse(data[0])?,
        },
        "NR" => DraftEvent::NavigationRejected {
            reason: data.join("|"),
        },
        "CM" if data.len() >= 2 => DraftEvent::CarouselMoved {
            slot: DraftSlot::parse(data[0])?,
            center: data[1].parse().ok()?,
        },
        "FC" if data.len() >= 2 => DraftEvent::FlowCompleted {
            missing: data[0].parse().ok()?,
            team_name: data[1..].join("|"),
        },
        _ => return None,
    };

    Some((time_ms, event))
}
