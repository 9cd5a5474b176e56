//! Sequential panel cross-fade
//!
//! The outgoing panel fades 1 → 0 and is disabled, then the incoming panel
//! fades 0 → 1 and is enabled. The two fades never overlap.

use crate::helpers::{lerp, progress};

/// Presentation state of one flow panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub opacity: f32,
    pub interactive: bool,
}

impl Panel {
    pub fn shown() -> Self {
        Self {
            opacity: 1.0,
            interactive: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            interactive: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    FadingOut,
    FadingIn,
}

/// What the controller does once a transition lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterTransition {
    Nothing,
    StartWelcome,
}

/// One in-flight cross-fade between two panels
#[derive(Debug, Clone)]
pub struct PanelTransition {
    pub from: usize,
    pub to: usize,
    pub then: AfterTransition,
    phase: FadePhase,
    elapsed: f32,
}

impl PanelTransition {
    pub fn new(from: usize, to: usize, then: AfterTransition) -> Self {
        Self {
            from,
            to,
            then,
            phase: FadePhase::FadingOut,
            elapsed: 0.0,
        }
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Step the fade. Returns true on the tick the incoming panel lands.
    pub fn tick(&mut self, dt: f32, duration: f32, panels: &mut [Panel]) -> bool {
        self.elapsed += dt;
        let t = progress(self.elapsed, duration);

        match self.phase {
            FadePhase::FadingOut => {
                if let Some(panel) = panels.get_mut(self.from) {
                    panel.opacity = lerp(1.0, 0.0, t);
                }
                if t >= 1.0 {
                    if let Some(panel) = panels.get_mut(self.from) {
                        panel.opacity = 0.0;
                        panel.interactive = false;
                    }
                    if let Some(panel) = panels.get_mut(self.to) {
                        panel.opacity = 0.0;
                    }
                    self.phase = FadePhase::FadingIn;
                    self.elapsed = 0.0;
                }
                false
            }
            FadePhase::FadingIn => {
                if let Some(panel) = panels.get_mut(self.to) {
                    panel.opacity = lerp(0.0, 1.0, t);
                }
                if t >= 1.0 {
                    if let Some(panel) = panels.get_mut(self.to) {
                        panel.opacity = 1.0;
                        panel.interactive = true;
                    }
                    return true;
                }
                false
            }
        }
    }
}
