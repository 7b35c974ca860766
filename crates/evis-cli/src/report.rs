//! Step report for `--format json`

use evis_engine::{DomTree, EventConfig, EventPhase, NodeId, Visualizer};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report {
    pub event: EventConfig,
    pub active_step: usize,
    pub steps: Vec<StepReport>,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub phase: EventPhase,
    pub target: String,
    pub current_target: String,
    pub composed_path: Vec<String>,
    pub narration: String,
}

impl Report {
    pub fn new(visualizer: &Visualizer) -> Self {
        let steps = match visualizer.tree() {
            Some(tree) => visualizer
                .steps()
                .iter()
                .zip(visualizer.narration())
                .map(|(step, narration)| StepReport {
                    phase: step.phase,
                    target: label(tree, step.target),
                    current_target: label(tree, step.current_target),
                    composed_path: step.composed_path.iter().map(|&id| label(tree, id)).collect(),
                    narration: narration.to_string(),
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            event: visualizer.event_config(),
            active_step: visualizer.active_step(),
            steps,
        }
    }
}

fn label(tree: &DomTree, id: NodeId) -> String {
    tree.get(id)
        .map(|node| node.display_label())
        .unwrap_or_else(|| id.to_string())
}
