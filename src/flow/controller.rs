//! Stepped flow controller
//!
//! Owns the ordered panels, the current step pointer and the session. Every
//! step change goes through [`FlowController::begin_transition`], which
//! starts a sequential cross-fade; navigation is rejected until it lands.
//! The welcome step runs a typewriter once its panel is in and then
//! advances itself.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::session::DraftSession;
use super::step::{DraftSlot, DraftStep};
use super::transition::{AfterTransition, Panel, PanelTransition};
use super::typewriter::Typewriter;
use crate::constants::*;
use crate::error::{ConfigurationError, DraftError, TransitionRejection};
use crate::events::DraftEvent;
use crate::roster::{CarouselItem, SelectionItem};

/// Flow tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Seconds per panel fade (out and in each take this long)
    pub fade_duration: f32,
    pub welcome_message: String,
    /// Seconds per revealed character
    pub type_speed: f32,
    /// Hold after the message is fully revealed
    pub welcome_pause: f32,
    /// Append a review page after the last carousel
    pub review_step: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            fade_duration: PANEL_FADE_DURATION,
            welcome_message: WELCOME_MESSAGE.to_string(),
            type_speed: TYPE_SPEED,
            welcome_pause: WELCOME_PAUSE,
            review_step: false,
        }
    }
}

impl FlowConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.fade_duration > 0.0 && self.fade_duration.is_finite()) {
            return Err(ConfigurationError::InvalidValue {
                field: "fade_duration",
                value: self.fade_duration,
            });
        }
        if !(self.type_speed >= 0.0 && self.type_speed.is_finite()) {
            return Err(ConfigurationError::InvalidValue {
                field: "type_speed",
                value: self.type_speed,
            });
        }
        if !(self.welcome_pause >= 0.0 && self.welcome_pause.is_finite()) {
            return Err(ConfigurationError::InvalidValue {
                field: "welcome_pause",
                value: self.welcome_pause,
            });
        }
        Ok(())
    }
}

/// Provides the currently centered pick for a carousel step
pub trait SelectionSource {
    fn current_selection(&self, slot: DraftSlot) -> Option<SelectionItem>;
}

/// Result of an accepted `advance`
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceOutcome {
    pub from: DraftStep,
    /// `None` when the flow completed
    pub to: Option<DraftStep>,
    /// Set when the step advanced without a selection to commit
    pub warning: Option<DraftError>,
}

#[derive(Resource, Debug)]
pub struct FlowController {
    steps: Vec<DraftStep>,
    panels: Vec<Panel>,
    step_index: usize,
    session: DraftSession,
    config: FlowConfig,
    name_input: String,
    transition: Option<PanelTransition>,
    welcome: Option<Typewriter>,
    welcome_played: bool,
    complete: bool,
    events: Vec<DraftEvent>,
}

impl FlowController {
    /// Build a flow over `steps` (one panel each). Fails on an empty step
    /// list or out-of-range tuning.
    pub fn new(
        steps: Vec<DraftStep>,
        config: FlowConfig,
        session: DraftSession,
    ) -> Result<Self, DraftError> {
        if steps.is_empty() {
            return Err(ConfigurationError::EmptyPanelList.into());
        }
        config.validate()?;

        let mut flow = Self {
            panels: vec![Panel::hidden(); steps.len()],
            steps,
            step_index: 0,
            session,
            config,
            name_input: String::new(),
            transition: None,
            welcome: None,
            welcome_played: false,
            complete: false,
            events: Vec::new(),
        };
        flow.init();
        Ok(flow)
    }

    /// Standard draft sequence (plus review page if configured)
    pub fn standard(config: FlowConfig, session: DraftSession) -> Result<Self, DraftError> {
        let steps = DraftStep::sequence(config.review_step);
        Self::new(steps, config, session)
    }

    /// Show only the first panel
    fn init(&mut self) {
        for (index, panel) in self.panels.iter_mut().enumerate() {
            *panel = if index == 0 {
                Panel::shown()
            } else {
                Panel::hidden()
            };
        }
    }

    // === Accessors ===

    pub fn steps(&self) -> &[DraftStep] {
        &self.steps
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn current_step(&self) -> DraftStep {
        self.steps[self.step_index]
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn session(&self) -> &DraftSession {
        &self.session
    }

    /// Hand the session to the composer
    pub fn into_session(self) -> DraftSession {
        self.session
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Swap tuning; a running fade or typewriter picks up new durations on
    /// its next tick.
    pub fn set_config(&mut self, config: FlowConfig) -> Result<(), DraftError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether the current step's panel currently accepts input
    pub fn accepts_input(&self) -> bool {
        !self.complete
            && self.transition.is_none()
            && self.panels[self.step_index].interactive
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Replace the text of the team name field
    pub fn set_name_input(&mut self, text: &str) {
        self.name_input = text.to_string();
    }

    /// Mutable access to the name field for keyboard editing
    pub fn name_input_mut(&mut self) -> &mut String {
        &mut self.name_input
    }

    /// Text currently shown on the welcome panel
    pub fn welcome_text(&self) -> &str {
        match &self.welcome {
            Some(typewriter) => typewriter.visible_text(),
            None if self.welcome_played => &self.config.welcome_message,
            None => "",
        }
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<DraftEvent> {
        std::mem::take(&mut self.events)
    }

    fn index_of(&self, step: DraftStep) -> Option<usize> {
        self.steps.iter().position(|s| *s == step)
    }

    /// Lowest step that still allows going back: anything at or below the
    /// first carousel step is final.
    fn retreat_floor(&self) -> usize {
        self.steps
            .iter()
            .position(|s| s.carousel_slot().is_some())
            .unwrap_or(self.steps.len())
    }

    fn reject(&mut self, reason: TransitionRejection) -> DraftError {
        let error = DraftError::from(reason);
        debug!("Flow: {}", error);
        self.events.push(DraftEvent::rejected(&error));
        error
    }

    /// Single entry point for moving the step pointer
    fn begin_transition(&mut self, to: usize, then: AfterTransition) {
        let from = self.step_index;
        self.transition = Some(PanelTransition::new(from, to, then));
        self.step_index = to;
        self.events.push(DraftEvent::StepChanged {
            from: self.steps[from],
            to: self.steps[to],
        });
    }

    fn complete_flow(&mut self) {
        self.complete = true;
        let team_name = self.session.team_name().unwrap_or_default().to_string();
        let missing = self.session.missing_slots().len();
        info!("Draft complete for '{}' ({} missing picks)", team_name, missing);
        self.events.push(DraftEvent::FlowCompleted { team_name, missing });
    }

    /// Move forward one step, committing the current step's input first.
    pub fn advance(&mut self, source: &dyn SelectionSource) -> Result<AdvanceOutcome, DraftError> {
        if self.complete {
            return Err(self.reject(TransitionRejection::FlowComplete));
        }
        if self.transition.is_some() {
            return Err(self.reject(TransitionRejection::PanelTransitionInFlight));
        }

        let from = self.current_step();
        let mut warning = None;

        match from {
            DraftStep::NameEntry => {
                let name = self.name_input.trim().to_string();
                if name.is_empty() {
                    return Err(self.reject(TransitionRejection::EmptyTeamName));
                }
                self.session.set_team_name(&name);
                info!("Team named '{}'", name);
                self.events.push(DraftEvent::TeamNamed { name });
            }
            DraftStep::Welcome => {
                return Err(self.reject(TransitionRejection::AutoAdvanceOnly(from)));
            }
            DraftStep::Select(slot) => match source.current_selection(slot) {
                Some(item) => {
                    let name = item.display_name().to_string();
                    self.session.commit(slot, item);
                    self.events.push(DraftEvent::SelectionCommitted { slot, name });
                }
                None => {
                    let error = DraftError::OptionalSelection { slot };
                    warn!("Flow: {}, leaving slot unset", error);
                    self.events.push(DraftEvent::SelectionMissing { slot });
                    warning = Some(error);
                }
            },
            DraftStep::Review => {}
        }

        let next = self.step_index + 1;
        if next >= self.steps.len() {
            self.complete_flow();
            return Ok(AdvanceOutcome {
                from,
                to: None,
                warning,
            });
        }

        let then = if self.steps[next] == DraftStep::Welcome {
            AfterTransition::StartWelcome
        } else {
            AfterTransition::Nothing
        };
        self.begin_transition(next, then);

        Ok(AdvanceOutcome {
            from,
            to: Some(self.steps[next]),
            warning,
        })
    }

    /// Move back one step. Not available at or below the first carousel step.
    pub fn retreat(&mut self) -> Result<DraftStep, DraftError> {
        if self.complete {
            return Err(self.reject(TransitionRejection::FlowComplete));
        }
        if self.transition.is_some() {
            return Err(self.reject(TransitionRejection::PanelTransitionInFlight));
        }
        if self.step_index <= self.retreat_floor() {
            let step = self.current_step();
            return Err(self.reject(TransitionRejection::BelowRetreatFloor(step)));
        }

        let prev = self.step_index - 1;
        self.begin_transition(prev, AfterTransition::Nothing);
        Ok(self.steps[prev])
    }

    /// Drive the cross-fade, then the welcome typewriter and its auto-advance.
    pub fn tick(&mut self, dt: f32) {
        if let Some(transition) = &mut self.transition {
            if transition.tick(dt, self.config.fade_duration, &mut self.panels) {
                let then = transition.then;
                self.transition = None;
                if then == AfterTransition::StartWelcome {
                    self.welcome = Some(Typewriter::new(
                        &self.config.welcome_message,
                        self.config.type_speed,
                        self.config.welcome_pause,
                    ));
                    self.events.push(DraftEvent::WelcomeStarted);
                }
            }
            return;
        }

        let Some(typewriter) = &mut self.welcome else {
            return;
        };
        typewriter.tick(dt);
        if !typewriter.is_finished() {
            return;
        }

        self.welcome = None;
        self.welcome_played = true;
        let Some(welcome_index) = self.index_of(DraftStep::Welcome) else {
            return;
        };
        if self.step_index != welcome_index {
            return;
        }
        let next = welcome_index + 1;
        if next >= self.steps.len() {
            self.complete_flow();
        } else {
            self.begin_transition(next, AfterTransition::Nothing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Coach, Player, Position};
    use std::collections::HashMap;

    const DT: f32 = 1.0 / 60.0;

    /// Fixed picks per slot; missing keys have no selection
    #[derive(Default)]
    struct FixedPicks(HashMap<DraftSlot, SelectionItem>);

    impl FixedPicks {
        fn full() -> Self {
            let mut picks = HashMap::new();
            picks.insert(DraftSlot::Coach, Coach::new("Hale", "Defensive", "Rebounding").into());
            for position in Position::ALL {
                let name = format!("{} starter", position);
                picks.insert(
                    DraftSlot::for_position(position),
                    Player::with_rating(&name, position, 75).into(),
                );
            }
            Self(picks)
        }
    }

    impl SelectionSource for FixedPicks {
        fn current_selection(&self, slot: DraftSlot) -> Option<SelectionItem> {
            self.0.get(&slot).cloned()
        }
    }

    fn flow() -> FlowController {
        FlowController::standard(FlowConfig::default(), DraftSession::new()).unwrap()
    }

    fn settle(flow: &mut FlowController) {
        for _ in 0..10_000 {
            if !flow.is_transitioning() {
                return;
            }
            flow.tick(DT);
        }
        panic!("flow never settled");
    }

    /// Name the team and let the welcome sequence run into the coach step
    fn to_coach_select(flow: &mut FlowController, picks: &FixedPicks) {
        flow.set_name_input("  Comets ");
        flow.advance(picks).unwrap();
        for _ in 0..10_000 {
            if flow.current_step() == DraftStep::Select(DraftSlot::Coach) && !flow.is_transitioning() {
                return;
            }
            flow.tick(DT);
        }
        panic!("welcome never advanced");
    }

    #[test]
    fn test_empty_step_list_is_configuration_error() {
        let result = FlowController::new(Vec::new(), FlowConfig::default(), DraftSession::new());
        assert_eq!(
            result.unwrap_err(),
            DraftError::Configuration(ConfigurationError::EmptyPanelList)
        );
    }

    #[test]
    fn test_invalid_fade_is_configuration_error() {
        let config = FlowConfig {
            fade_duration: 0.0,
            ..default()
        };
        assert!(FlowController::standard(config, DraftSession::new()).is_err());
    }

    #[test]
    fn test_only_first_panel_shown_initially() {
        let flow = flow();
        assert_eq!(flow.panels()[0], Panel::shown());
        assert!(flow.panels()[1..].iter().all(|p| *p == Panel::hidden()));
        assert!(flow.accepts_input());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut flow = flow();
        flow.set_name_input("   ");
        let result = flow.advance(&FixedPicks::default());
        assert_eq!(
            result.unwrap_err(),
            DraftError::InvalidTransition(TransitionRejection::EmptyTeamName)
        );
        assert_eq!(flow.step_index(), 0);
        assert!(!flow.is_transitioning());
        assert_eq!(flow.session().team_name(), None);
    }

    #[test]
    fn test_name_is_trimmed_and_committed() {
        let mut flow = flow();
        flow.set_name_input("  Comets ");
        let outcome = flow.advance(&FixedPicks::default()).unwrap();
        assert_eq!(outcome.to, Some(DraftStep::Welcome));
        assert_eq!(flow.session().team_name(), Some("Comets"));
        assert_eq!(flow.step_index(), 1);
        let events = flow.drain_events();
        assert!(events.contains(&DraftEvent::TeamNamed { name: "Comets".to_string() }));
    }

    #[test]
    fn test_navigation_rejected_mid_fade() {
        let mut flow = flow();
        flow.set_name_input("Comets");
        flow.advance(&FixedPicks::default()).unwrap();
        flow.tick(DT);
        assert_eq!(
            flow.advance(&FixedPicks::default()).unwrap_err(),
            DraftError::InvalidTransition(TransitionRejection::PanelTransitionInFlight)
        );
        assert_eq!(flow.step_index(), 1);
    }

    #[test]
    fn test_welcome_types_then_auto_advances() {
        let mut flow = flow();
        flow.set_name_input("Comets");
        flow.advance(&FixedPicks::default()).unwrap();
        settle(&mut flow);

        // Typewriter starts once the welcome panel is in
        assert_eq!(flow.welcome_text(), "W");
        assert_eq!(flow.current_step(), DraftStep::Welcome);

        // Users cannot skip it
        assert_eq!(
            flow.advance(&FixedPicks::default()).unwrap_err(),
            DraftError::InvalidTransition(TransitionRejection::AutoAdvanceOnly(DraftStep::Welcome))
        );

        // 20 chars * 0.05 s + 0.5 s hold = 1.5 s
        let mut frames = 0;
        while flow.current_step() == DraftStep::Welcome {
            flow.tick(DT);
            frames += 1;
            assert!(frames < 200, "welcome did not auto-advance");
        }
        assert!(frames >= 89, "advanced too early after {} frames", frames);
        assert_eq!(flow.current_step(), DraftStep::Select(DraftSlot::Coach));
        assert_eq!(flow.welcome_text(), WELCOME_MESSAGE);

        let events = flow.drain_events();
        assert!(events.contains(&DraftEvent::WelcomeStarted));
    }

    #[test]
    fn test_retreat_floor_at_coach_select() {
        let picks = FixedPicks::full();
        let mut flow = flow();
        to_coach_select(&mut flow, &picks);

        assert_eq!(
            flow.retreat().unwrap_err(),
            DraftError::InvalidTransition(TransitionRejection::BelowRetreatFloor(DraftStep::Select(
                DraftSlot::Coach
            )))
        );
        assert_eq!(flow.current_step(), DraftStep::Select(DraftSlot::Coach));
    }

    #[test]
    fn test_retreat_and_advance_are_reversible() {
        let picks = FixedPicks::full();
        let mut flow = flow();
        to_coach_select(&mut flow, &picks);

        // Walk to every step >= PGSelect and check back/forward
        for _ in 0..5 {
            flow.advance(&picks).unwrap();
            settle(&mut flow);
            let here = flow.step_index();

            assert_eq!(flow.retreat().unwrap(), flow.steps()[here - 1]);
            assert_eq!(flow.step_index(), here - 1);
            settle(&mut flow);

            flow.advance(&picks).unwrap();
            settle(&mut flow);
            assert_eq!(flow.step_index(), here);
        }
    }

    #[test]
    fn test_full_draft_commits_every_slot() {
        let picks = FixedPicks::full();
        let mut flow = flow();
        to_coach_select(&mut flow, &picks);

        for _ in 0..5 {
            flow.advance(&picks).unwrap();
            settle(&mut flow);
        }
        assert_eq!(flow.current_step(), DraftStep::Select(DraftSlot::C));

        let outcome = flow.advance(&picks).unwrap();
        assert_eq!(outcome.to, None);
        assert!(flow.is_complete());
        assert!(flow.session().is_complete());
        assert_eq!(
            flow.session().player(Position::C).map(|p| p.name.as_str()),
            Some("C starter")
        );

        // Terminal state rejects further navigation
        assert!(flow.advance(&picks).is_err());
        assert!(flow.retreat().is_err());
    }

    #[test]
    fn test_missing_selection_still_advances() {
        let mut flow = flow();
        to_coach_select(&mut flow, &FixedPicks::default());
        flow.drain_events();

        let outcome = flow.advance(&FixedPicks::default()).unwrap();
        assert_eq!(outcome.to, Some(DraftStep::Select(DraftSlot::PG)));
        assert_eq!(
            outcome.warning,
            Some(DraftError::OptionalSelection { slot: DraftSlot::Coach })
        );
        assert!(flow.session().coach().is_none());
        assert!(flow
            .drain_events()
            .contains(&DraftEvent::SelectionMissing { slot: DraftSlot::Coach }));
    }

    #[test]
    fn test_review_step_allows_back_and_completes() {
        let picks = FixedPicks::full();
        let config = FlowConfig {
            review_step: true,
            ..default()
        };
        let mut flow = FlowController::standard(config, DraftSession::new()).unwrap();
        to_coach_select(&mut flow, &picks);
        for _ in 0..6 {
            flow.advance(&picks).unwrap();
            settle(&mut flow);
        }
        assert_eq!(flow.current_step(), DraftStep::Review);

        assert_eq!(flow.retreat().unwrap(), DraftStep::Select(DraftSlot::C));
        settle(&mut flow);
        flow.advance(&picks).unwrap();
        settle(&mut flow);

        let outcome = flow.advance(&picks).unwrap();
        assert_eq!(outcome.from, DraftStep::Review);
        assert!(flow.is_complete());
    }

    #[test]
    fn test_step_changes_are_published_in_order() {
        let picks = FixedPicks::full();
        let mut flow = flow();
        to_coach_select(&mut flow, &picks);
        let steps: Vec<(DraftStep, DraftStep)> = flow
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                DraftEvent::StepChanged { from, to } => Some((from, to)),
                _ => None,
            })
            .collect();
        assert_eq!(
            steps,
            vec![
                (DraftStep::NameEntry, DraftStep::Welcome),
                (DraftStep::Welcome, DraftStep::Select(DraftSlot::Coach)),
            ]
        );
    }
}
