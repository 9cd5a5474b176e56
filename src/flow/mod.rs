//! Stepped onboarding flow: steps, session record, panel fades and the
//! welcome typewriter, driven by [`FlowController`].

mod controller;
mod session;
mod step;
mod systems;
mod transition;
mod typewriter;

pub use controller::{AdvanceOutcome, FlowConfig, FlowController, SelectionSource};
pub use session::DraftSession;
pub use step::{DraftSlot, DraftStep};
pub use systems::{
    DraftComplete, draft_active, handle_draft_completion, publish_draft_events,
    tick_draft,
};
pub use transition::{AfterTransition, FadePhase, Panel, PanelTransition};
pub use typewriter::{Typewriter, TypewriterPhase};
