//! Dispatch Simulator
//!
//! Computes the event path with the platform's "get the parent" rules and
//! walks it directly; there is no listener registration.
//!
//! - An element assigned to a slot continues at that slot, otherwise at its parent.
//! - A shadow root continues at its host, unless the event is not composed and
//!   the shadow root is the root of the original target.
//!
//! Shadow roots are part of the path but never invoke listeners, so steps are
//! only produced for elements.

use evis_dom::{DomTree, NodeId, NodeKind};

use crate::{EventConfig, EventDispatchingStep, EventPhase, SimulationError};

/// Simulate dispatching an event with `config` on the tree's target
pub fn simulate(
    tree: &DomTree,
    config: EventConfig,
) -> Result<Vec<EventDispatchingStep>, SimulationError> {
    let target = tree.target().ok_or(SimulationError::NoTarget)?;
    let path = event_path(tree, target, config.composed);

    let listeners = path
        .iter()
        .copied()
        .filter(|id| tree.get(*id).is_some_and(|n| n.is_element()));
    let invoked: Vec<NodeId> = if config.bubbles {
        listeners.collect()
    } else {
        listeners.take(1).collect()
    };

    let steps: Vec<EventDispatchingStep> = invoked
        .into_iter()
        .map(|current_target| {
            let retargeted = tree.retarget(target, current_target);
            let composed_path = visible_path(tree, &path, current_target, config.composed);
            let phase = if retargeted == current_target {
                EventPhase::AtTarget
            } else {
                EventPhase::Bubbling
            };

            tracing::trace!(
                "Step at {}: target {}, path of {} nodes",
                current_target,
                retargeted,
                composed_path.len()
            );
            EventDispatchingStep {
                target: retargeted,
                current_target,
                composed_path,
                phase,
            }
        })
        .collect();

    tracing::debug!(
        "Simulated {} with {} steps over a path of {} nodes",
        config,
        steps.len(),
        path.len()
    );
    Ok(steps)
}

/// Event path from `target` outward, target first
pub fn event_path(tree: &DomTree, target: NodeId, composed: bool) -> Vec<NodeId> {
    let target_root = tree.root_of(target);
    let mut path = vec![target];
    let mut current = target;

    while let Some(parent) = parent_in_path(tree, current, composed, target_root) {
        if path.len() > tree.len() {
            tracing::warn!("Event path exceeds the tree size, stopping at node {}", current);
            break;
        }
        path.push(parent);
        current = parent;
    }

    path
}

fn parent_in_path(
    tree: &DomTree,
    node: NodeId,
    composed: bool,
    target_root: NodeId,
) -> Option<NodeId> {
    let tree_node = tree.get(node)?;
    match &tree_node.kind {
        NodeKind::Element(elem) => elem.assigned_slot.or(tree_node.parent),
        NodeKind::ShadowRoot(shadow) => {
            if !composed && node == target_root {
                None
            } else {
                Some(shadow.host)
            }
        }
    }
}

/// Path entries visible from `current_target`. Uncomposed events only expose
/// the current target's own tree.
fn visible_path(
    tree: &DomTree,
    path: &[NodeId],
    current_target: NodeId,
    composed: bool,
) -> Vec<NodeId> {
    if composed {
        return path.to_vec();
    }

    let observer_root = tree.root_of(current_target);
    path.iter()
        .copied()
        .filter(|id| tree.root_of(*id) == observer_root)
        .collect()
}
