//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Complete scenario definition from a TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Scenario setup
#[derive(Debug, Default, Deserialize)]
pub struct TestSetup {
    /// Append the review page
    #[serde(default)]
    pub review_step: bool,
    /// Roster JSON file; built-in roster when absent
    pub roster: Option<String>,
    /// Override panel fade duration (seconds)
    pub fade_duration: Option<f32>,
    /// Override carousel transition duration (seconds)
    pub transition_duration: Option<f32>,
}

/// Inputs delivered on a specific frame
#[derive(Debug, Clone, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    #[serde(flatten)]
    pub actions: InputSnapshot,
}

/// What the user does on one frame. Every field is a one-frame action.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputSnapshot {
    /// Characters typed into the team name field
    #[serde(default)]
    pub typed: Option<String>,
    #[serde(default)]
    pub backspace: Option<u32>,
    /// Press the forward trigger
    #[serde(default)]
    pub forward: Option<bool>,
    /// Press the back trigger
    #[serde(default)]
    pub back: Option<bool>,
    /// "next" or "previous"
    #[serde(default)]
    pub rotate: Option<String>,
    /// Complete swipe within the frame: begin at x = 0, end at x = swipe
    #[serde(default)]
    pub swipe: Option<f32>,
    /// Raw touch begin at [x, y]
    #[serde(default)]
    pub touch_began: Option<[f32; 2]>,
    /// Raw touch end at [x, y]
    #[serde(default)]
    pub touch_ended: Option<[f32; 2]>,
    /// Finger id for `touch_began`/`touch_ended` (default 0)
    #[serde(default)]
    pub touch_id: Option<u64>,
}

/// Expected scenario outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    /// DraftEvent variant name, e.g. "StepChanged"
    pub event: String,
    /// Slot code for slot events ("Coach", "PG", ...)
    pub slot: Option<String>,
    /// For StepChanged: destination step name
    pub to: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after a given frame
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a scenario file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}
