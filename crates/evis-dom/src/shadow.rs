//! Shadow DOM
//!
//! Shadow root modes, marker conventions and slot assignment.

use serde::{Deserialize, Serialize};

use crate::{NodeId, TreeError, TreeNode};

/// Boolean attribute flagging a `<template>` as a shadow root declaration
pub const SHADOW_ROOT_MARKER: &str = "shadow-root";

/// Boolean attribute flagging the dispatch target
pub const TARGET_MARKER: &str = "target";

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

impl ShadowRootMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ShadowRootMode::Open => "open",
            ShadowRootMode::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ShadowRootMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShadowRootMode {
    type Err = TreeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(ShadowRootMode::Open),
            "closed" => Ok(ShadowRootMode::Closed),
            other => Err(TreeError::MalformedShadowMarker {
                message: format!(
                    "Invalid mode attribute value. Expected \"open\" or \"closed\" but received \"{other}\""
                ),
            }),
        }
    }
}

/// Assign the light children of every shadow host to the slots of its shadow tree.
///
/// An element requesting slot `n` (no `slot` attribute means `""`) goes to
/// the first `<slot>` in tree order of the host's shadow tree whose name is `n`.
pub(crate) fn assign_slots(nodes: &mut [TreeNode]) {
    let hosts: Vec<(NodeId, NodeId)> = nodes
        .iter()
        .filter_map(|node| {
            let shadow_root = node.as_element()?.shadow_root?;
            Some((node.id, shadow_root))
        })
        .collect();

    for (host, shadow_root) in hosts {
        let slots = slots_in_tree_order(nodes, shadow_root);
        if slots.is_empty() {
            continue;
        }

        let light_children = nodes[host.index()].children.clone();
        for child in light_children {
            let Some(requested) = nodes[child.index()]
                .as_element()
                .map(|e| e.requested_slot().to_string())
            else {
                continue;
            };

            let slot = slots.iter().copied().find(|slot| {
                nodes[slot.index()]
                    .as_element()
                    .is_some_and(|e| e.slot_name() == requested)
            });

            if let Some(slot) = slot {
                if let Some(elem) = nodes[child.index()].as_element_mut() {
                    elem.assigned_slot = Some(slot);
                }
                if let Some(slot_elem) = nodes[slot.index()].as_element_mut() {
                    slot_elem.assigned_nodes.push(child);
                }
                tracing::trace!("Assigned node {} to slot {}", child, slot);
            }
        }
    }
}

/// `<slot>` elements of the tree rooted at `root`, in tree order.
///
/// Nested shadow trees are not entered: they hang off `shadow_root`, not `children`.
fn slots_in_tree_order(nodes: &[TreeNode], root: NodeId) -> Vec<NodeId> {
    let mut slots = Vec::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        let node = &nodes[id.index()];
        if node.as_element().is_some_and(|e| e.is_slot()) {
            slots.push(id);
        }
        stack.extend(node.children.iter().rev().copied());
    }

    slots
}
