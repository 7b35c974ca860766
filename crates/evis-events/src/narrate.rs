//! Step narration
//!
//! Plain-text description of each dispatch step, mentioning retargeting and
//! composed path changes only when they happen.

use evis_dom::{DomTree, NodeId};

use crate::{EventConfig, EventDispatchingStep};

/// Description of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNarration {
    pub step: usize,
    /// "Dispatching ..." for the first step, "Event propagates to ..." afterwards
    pub summary: String,
    /// Set when the observed target differs from the previous step
    pub retargeted: Option<String>,
    /// Set when the composed path differs from the previous step
    pub composed_path: Option<String>,
}

impl StepNarration {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.summary.as_str())
            .chain(self.retargeted.as_deref())
            .chain(self.composed_path.as_deref())
    }
}

impl std::fmt::Display for StepNarration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, line) in self.lines().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Describe every step of a simulation run
pub fn narrate(
    tree: &DomTree,
    config: EventConfig,
    steps: &[EventDispatchingStep],
) -> Vec<StepNarration> {
    let label = |id: NodeId| {
        tree.get(id)
            .map(|node| node.display_label())
            .unwrap_or_else(|| format!("#{id}"))
    };

    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let previous = index.checked_sub(1).map(|i| &steps[i]);

            let summary = match previous {
                None => format!("Dispatching {} on {}.", config, label(step.current_target)),
                Some(_) => format!("Event propagates to {}.", label(step.current_target)),
            };

            let retargeted = (previous.map(|p| p.target) != Some(step.target))
                .then(|| format!("Target is set to {}.", label(step.target)));

            let composed_path = (previous.map(|p| &p.composed_path) != Some(&step.composed_path))
                .then(|| {
                    let labels: Vec<String> =
                        step.composed_path.iter().map(|id| label(*id)).collect();
                    format!("Composed path is set to [{}].", labels.join(", "))
                });

            StepNarration {
                step: index,
                summary,
                retargeted,
                composed_path,
            }
        })
        .collect()
}
