//! Assertion checking for scenario expectations

use std::collections::BTreeMap;

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::{BusEvent, DraftEvent};

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
    pub slot: Option<String>,
    /// Destination step for StepChanged
    pub to: Option<String>,
}

impl CapturedEvent {
    pub fn from_bus_event(frame: u64, event: &BusEvent) -> Self {
        let to = match &event.event {
            DraftEvent::StepChanged { to, .. } => Some(to.to_string()),
            _ => None,
        };
        CapturedEvent {
            frame,
            event_type: event.event.name().to_string(),
            slot: event.event.slot().map(|slot| slot.to_string()),
            to,
        }
    }

    fn matches(&self, expected: &ExpectedEvent) -> bool {
        if self.event_type != expected.event {
            return false;
        }
        if let Some(ref slot) = expected.slot
            && !self.slot.as_ref().is_some_and(|s| s.eq_ignore_ascii_case(slot))
        {
            return false;
        }
        if let Some(ref to) = expected.to
            && self.to.as_ref() != Some(to)
        {
            return false;
        }
        true
    }
}

/// Check that captured events contain the expected sequence, in order
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        // Find matching event starting from current position
        let found = captured[captured_idx..]
            .iter()
            .enumerate()
            .find(|(_, cap)| cap.matches(exp));

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min
                    && cap.frame < min
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                        expected: format!("frame >= {}", min),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                if let Some(max) = exp.frame_max
                    && cap.frame > max
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                        expected: format!("frame <= {}", max),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                captured_idx += offset + 1;
            }
            None => {
                let slot_str = exp.slot.as_ref().map(|s| format!(" (slot: {})", s)).unwrap_or_default();
                return Err(AssertionError {
                    message: format!("Event #{} '{}'{} not found", i + 1, exp.event, slot_str),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!(
                        "events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..].iter().map(|e| &e.event_type).collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Flat snapshot of draft state, keyed by check path
/// (`step`, `center.pg`, `panel.2.opacity`, ...)
#[derive(Debug, Default)]
pub struct WorldState {
    pub values: BTreeMap<String, String>,
}

impl WorldState {
    pub fn set(&mut self, path: impl Into<String>, value: impl ToString) {
        self.values.insert(path.into().to_ascii_lowercase(), value.to_string());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.values.get(&path.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against a snapshot
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'path = value' or 'path > value'".to_string(),
            actual: check.clone(),
        })?;

        let actual = state.get(path).ok_or_else(|| AssertionError {
            message: format!("Unknown state path '{}'", path),
            expected: "one of the snapshot paths".to_string(),
            actual: format!("available: {:?}", state.values.keys().collect::<Vec<_>>()),
        })?;

        match actual.parse::<f32>() {
            Ok(actual) if expected_value.parse::<f32>().is_ok() => {
                check_float_comparison(path, actual, operator, expected_value)?
            }
            _ => check_text(check, actual, operator, expected_value)?,
        }
    }

    Ok(())
}

/// Equality on text values; quotes around the expected value are optional
fn check_text(check: &str, actual: &str, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let expected = expected_str.trim_matches('"');
    let pass = match operator {
        "=" => actual == expected,
        "!=" => actual != expected,
        _ => {
            return Err(AssertionError {
                message: format!("Operator '{}' needs a number: {}", operator, check),
                expected: "number".to_string(),
                actual: actual.to_string(),
            });
        }
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {}", check),
            expected: format!("{} {}", operator, expected),
            actual: actual.to_string(),
        });
    }

    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < 0.01,
        "!=" => (actual - value).abs() >= 0.01,
        _ => true,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.2})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.2}", actual),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{DraftSlot, DraftStep};

    fn expect(event: &str) -> ExpectedEvent {
        ExpectedEvent {
            event: event.to_string(),
            slot: None,
            to: None,
            frame_min: None,
            frame_max: None,
        }
    }

    fn captured(frame: u64, event: DraftEvent) -> CapturedEvent {
        CapturedEvent::from_bus_event(frame, &BusEvent { time_ms: 0, event })
    }

    #[test]
    fn test_sequence_in_order_with_gaps() {
        let events = vec![
            captured(
                3,
                DraftEvent::StepChanged {
                    from: DraftStep::NameEntry,
                    to: DraftStep::Welcome,
                },
            ),
            captured(40, DraftEvent::WelcomeStarted),
            captured(
                200,
                DraftEvent::CarouselMoved {
                    slot: DraftSlot::Coach,
                    center: 1,
                },
            ),
        ];

        let mut moved = expect("CarouselMoved");
        moved.slot = Some("coach".to_string());
        let mut step = expect("StepChanged");
        step.to = Some("Welcome".to_string());
        assert!(check_sequence(&[step, moved], &events).is_ok());

        // Order matters
        let err = check_sequence(&[expect("CarouselMoved"), expect("WelcomeStarted")], &events);
        assert!(err.is_err());
    }

    #[test]
    fn test_sequence_frame_bounds() {
        let events = vec![captured(40, DraftEvent::WelcomeStarted)];
        let mut late = expect("WelcomeStarted");
        late.frame_max = Some(30);
        let err = check_sequence(&[late], &events).unwrap_err();
        assert!(err.message.contains("too late"));
    }

    #[test]
    fn test_state_checks() {
        let mut state = WorldState::default();
        state.set("step", "CoachSelect");
        state.set("center.Coach", 2);
        state.set("panel.2.opacity", 0.95);

        let assertion = StateAssertion {
            after_frame: 10,
            checks: vec![
                "step = \"CoachSelect\"".to_string(),
                "center.coach = 2".to_string(),
                "panel.2.opacity >= 0.9".to_string(),
                "step != Welcome".to_string(),
            ],
        };
        assert!(check_state(&assertion, &state).is_ok());

        let failing = StateAssertion {
            after_frame: 10,
            checks: vec!["center.coach > 2".to_string()],
        };
        assert!(check_state(&failing, &state).is_err());

        let unknown = StateAssertion {
            after_frame: 10,
            checks: vec!["score.left = 1".to_string()],
        };
        assert!(check_state(&unknown, &state).is_err());
    }
}
