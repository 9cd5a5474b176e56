//! Scenario testing system for deterministic draft testing
//!
//! Runs scripted input against a headless draft and checks the published
//! event sequence and state snapshots.

pub mod assertions;
pub mod input;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, CapturedEvent, WorldState, check_sequence, check_state};
pub use input::ScriptedInputs;
pub use parser::{
    ExpectedEvent, FrameInput, InputSnapshot, StateAssertion, TestDefinition, TestExpectations,
    TestSetup, parse_test_file,
};
pub use runner::{TestResult, run_test};

/// Default path for scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";
