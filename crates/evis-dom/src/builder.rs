//! Tree Model Builder
//!
//! Turns a [`MarkupFragment`] into a [`DomTree`] with a depth-first,
//! stack-based traversal. `<template shadow-root mode="...">` markers are
//! materialized as shadow roots attached to their parent element; their
//! content becomes the shadow root's children and the marker itself never
//! shows up in the light tree.

use crate::node::{ElementData, NodeKind, ShadowRootData, TreeNode};
use crate::shadow::{SHADOW_ROOT_MARKER, TARGET_MARKER, assign_slots};
use crate::{DomTree, MarkupElement, MarkupFragment, NodeId, ShadowRootMode, TreeError};

/// How the dispatch target is resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TargetSpec {
    /// Exactly one element carries the `target` attribute
    #[default]
    Marker,
    /// Exactly one element has this `id` attribute
    Label(String),
    /// No target yet, see [`DomTree::with_target`]
    Deferred,
}

/// Tree construction options
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub target: TargetSpec,
}

impl BuildOptions {
    /// Resolve the target by `id` attribute instead of the `target` marker
    pub fn with_target_label(label: impl Into<String>) -> Self {
        Self {
            target: TargetSpec::Label(label.into()),
        }
    }

    /// Build without resolving a target
    pub fn deferred() -> Self {
        Self {
            target: TargetSpec::Deferred,
        }
    }
}

/// Build a tree from pre-parsed markup
pub fn build_tree(fragment: &MarkupFragment, options: &BuildOptions) -> Result<DomTree, TreeError> {
    TreeBuilder::new(options.clone()).build(fragment)
}

/// Pending markup element on the work stack
struct Pending<'a> {
    markup: &'a MarkupElement,
    parent: Option<NodeId>,
    /// Position among the parent's light children (`None` for shadow markers)
    position: Option<usize>,
}

/// Stack-based tree builder
#[derive(Debug, Default)]
pub struct TreeBuilder {
    options: BuildOptions,
    nodes: Vec<TreeNode>,
    /// Light children of each node, filled as children are materialized
    child_slots: Vec<Vec<Option<NodeId>>>,
}

impl TreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            child_slots: Vec::new(),
        }
    }

    /// Build the tree. The builder can be reused afterwards.
    pub fn build(&mut self, fragment: &MarkupFragment) -> Result<DomTree, TreeError> {
        self.nodes.clear();
        self.child_slots.clear();

        let root = fragment.single_root().ok_or(TreeError::MalformedTree {
            found: fragment.elements.len(),
        })?;
        if root.is_shadow_root_marker() {
            return Err(TreeError::MalformedShadowMarker {
                message: "the root element cannot declare a shadow root".to_string(),
            });
        }

        let mut stack = vec![Pending {
            markup: root,
            parent: None,
            position: None,
        }];

        while let Some(pending) = stack.pop() {
            if pending.markup.is_shadow_root_marker() {
                let shadow_root = self.attach_shadow_root(&pending)?;
                self.push_children(&mut stack, &pending.markup.content, shadow_root);
            } else {
                let element = self.create_element(&pending);
                self.push_children(&mut stack, &pending.markup.children, element);
            }
        }

        let mut nodes = std::mem::take(&mut self.nodes);
        for (node, slots) in nodes.iter_mut().zip(self.child_slots.drain(..)) {
            node.children = slots.into_iter().flatten().collect();
        }
        assign_slots(&mut nodes);

        let target = self.resolve_target(&nodes)?;
        let tree = DomTree::from_parts(nodes, NodeId(0), target);

        tracing::debug!(
            "Built tree with {} nodes ({} shadow roots)",
            tree.len(),
            tree.shadow_root_count()
        );
        Ok(tree)
    }

    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    fn push_node(&mut self, node: TreeNode) {
        self.nodes.push(node);
        self.child_slots.push(Vec::new());
    }

    /// Queue `items` under `parent`. Children are pushed in document order and
    /// therefore visited last-to-first.
    fn push_children<'a>(
        &mut self,
        stack: &mut Vec<Pending<'a>>,
        items: &'a [MarkupElement],
        parent: NodeId,
    ) {
        let mut light_count = 0;
        for markup in items {
            let position = if markup.is_shadow_root_marker() {
                None
            } else {
                light_count += 1;
                Some(light_count - 1)
            };
            stack.push(Pending {
                markup,
                parent: Some(parent),
                position,
            });
        }
        self.child_slots[parent.index()] = vec![None; light_count];
    }

    fn create_element(&mut self, pending: &Pending<'_>) -> NodeId {
        let id = self.next_id();
        let markup = pending.markup;

        self.push_node(TreeNode {
            id,
            label: label_of(markup),
            parent: pending.parent,
            children: Vec::new(),
            kind: NodeKind::Element(ElementData::new(
                markup.name.to_ascii_lowercase(),
                markup.attrs.clone(),
            )),
        });

        if let (Some(parent), Some(position)) = (pending.parent, pending.position) {
            self.child_slots[parent.index()][position] = Some(id);
        }
        id
    }

    fn attach_shadow_root(&mut self, pending: &Pending<'_>) -> Result<NodeId, TreeError> {
        let markup = pending.markup;

        let host = pending.parent.ok_or_else(|| TreeError::MalformedShadowMarker {
            message: "shadow root marker has no host element".to_string(),
        })?;
        let mode: ShadowRootMode = markup
            .attr("mode")
            .ok_or_else(|| TreeError::MalformedShadowMarker {
                message: format!("<template {SHADOW_ROOT_MARKER}> is missing the mode attribute"),
            })?
            .parse()?;

        let id = self.next_id();
        let host_elem = self.nodes[host.index()].as_element_mut().ok_or_else(|| {
            TreeError::MalformedShadowMarker {
                message: "a shadow root can only be attached to an element".to_string(),
            }
        })?;
        if host_elem.shadow_root.is_some() {
            return Err(TreeError::ShadowRootAlreadyAttached {
                host: host_elem.name.clone(),
            });
        }
        host_elem.shadow_root = Some(id);

        self.push_node(TreeNode {
            id,
            label: label_of(markup),
            parent: Some(host),
            children: Vec::new(),
            kind: NodeKind::ShadowRoot(ShadowRootData { host, mode }),
        });
        Ok(id)
    }

    fn resolve_target(&self, nodes: &[TreeNode]) -> Result<Option<NodeId>, TreeError> {
        let (selector, candidates): (String, Vec<NodeId>) = match &self.options.target {
            TargetSpec::Deferred => return Ok(None),
            TargetSpec::Marker => (
                format!("[{TARGET_MARKER}]"),
                nodes
                    .iter()
                    .filter(|n| n.as_element().is_some_and(|e| e.has_attr(TARGET_MARKER)))
                    .map(|n| n.id)
                    .collect(),
            ),
            TargetSpec::Label(label) => (
                format!("#{label}"),
                nodes
                    .iter()
                    .filter(|n| n.is_element() && n.label.as_deref() == Some(label.as_str()))
                    .map(|n| n.id)
                    .collect(),
            ),
        };

        match candidates.as_slice() {
            [target] => Ok(Some(*target)),
            _ => Err(TreeError::InvalidTarget {
                selector,
                found: candidates.len(),
            }),
        }
    }
}

fn label_of(markup: &MarkupElement) -> Option<String> {
    markup
        .attr("id")
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
