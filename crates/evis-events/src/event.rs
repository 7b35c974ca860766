//! Event configuration and dispatch steps

use evis_dom::NodeId;
use serde::{Deserialize, Serialize};

/// Event init flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventConfig {
    pub bubbles: bool,
    pub composed: bool,
}

impl EventConfig {
    pub fn new(bubbles: bool, composed: bool) -> Self {
        Self { bubbles, composed }
    }
}

impl std::fmt::Display for EventConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "new Event({{ bubbles: {}, composed: {} }})",
            self.bubbles, self.composed
        )
    }
}

/// Dispatch phase of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventPhase {
    /// The current target is the (retargeted) target
    AtTarget,
    Bubbling,
}

/// One listener invocation during dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDispatchingStep {
    /// Target as observed from `current_target`
    pub target: NodeId,
    pub current_target: NodeId,
    /// Visible path, target first
    pub composed_path: Vec<NodeId>,
    pub phase: EventPhase,
}

impl EventDispatchingStep {
    /// Whether `node` is part of the composed path at this step
    pub fn touches(&self, node: NodeId) -> bool {
        self.composed_path.contains(&node)
    }
}
