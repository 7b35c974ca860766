//! evis Events - Dispatch simulation
//!
//! Replays event dispatch over a [`DomTree`](evis_dom::DomTree) and records
//! one step per listener invocation: the retargeted target, the current
//! target and the composed path visible at that point.

mod event;
mod narrate;
mod simulator;

pub use event::{EventConfig, EventDispatchingStep, EventPhase};
pub use narrate::{StepNarration, narrate};
pub use simulator::{event_path, simulate};

/// Simulation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("The tree has no dispatch target")]
    NoTarget,
}
