//! DOM Tree (arena-based allocation)

use std::collections::HashMap;

use crate::{NodeId, TreeError, TreeNode};

/// Immutable logical tree: root, optional dispatch target and a flat node
/// arena in id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
    target: Option<NodeId>,
    /// First node carrying each label
    labels: HashMap<String, NodeId>,
}

impl DomTree {
    pub(crate) fn from_parts(nodes: Vec<TreeNode>, root: NodeId, target: Option<NodeId>) -> Self {
        let mut labels = HashMap::with_capacity(nodes.len());
        for node in &nodes {
            if let Some(label) = &node.label {
                labels.entry(label.clone()).or_insert(node.id);
            }
        }

        Self {
            nodes,
            root,
            target,
            labels,
        }
    }

    /// Same tree with a different dispatch target. Only elements can be targets.
    pub fn with_target(mut self, target: NodeId) -> Result<Self, TreeError> {
        if !self.get(target).is_some_and(TreeNode::is_element) {
            return Err(TreeError::InvalidTarget {
                selector: format!("node {target}"),
                found: 0,
            });
        }
        self.target = Some(target);
        Ok(self)
    }

    /// Root element
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Dispatch target, if resolved
    #[inline]
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// All nodes in id order
    #[inline]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Get a node by ID
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by its label (`id` attribute)
    pub fn find_by_label(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    /// Label of the target when no other element shares it, so that
    /// `TargetSpec::Label` resolves back to the same node
    pub fn target_label(&self) -> Option<&str> {
        let label = self.get(self.target?)?.label.as_deref()?;
        let count = self
            .nodes
            .iter()
            .filter(|n| n.is_element() && n.label.as_deref() == Some(label))
            .count();
        (count == 1).then_some(label)
    }

    pub fn element_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_element()).count()
    }

    pub fn shadow_root_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_shadow_root()).count()
    }

    /// Parent node; a shadow root's parent is its host
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Light-tree children (shadow root content for shadow roots)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Shadow root attached to an element
    pub fn shadow_root(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.as_element()?.shadow_root
    }

    /// Host of a shadow root
    pub fn host(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.as_shadow_root().map(|s| s.host)
    }

    /// Slot an element is assigned to
    pub fn assigned_slot(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.as_element()?.assigned_slot
    }

    /// Elements assigned to a `<slot>`
    pub fn assigned_nodes(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .and_then(TreeNode::as_element)
            .map(|e| e.assigned_nodes.as_slice())
            .unwrap_or(&[])
    }

    /// Root of the node's tree: the enclosing shadow root, or the tree root.
    /// A shadow root is its own root.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        loop {
            let Some(node) = self.get(current) else {
                return current;
            };
            if node.is_shadow_root() {
                return current;
            }
            match node.parent {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    /// Whether `ancestor` is `node` or one of its shadow-including ancestors
    pub fn is_shadow_including_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.shadow_including_ancestors(node).any(|id| id == ancestor)
    }

    /// `node` followed by its parents, crossing from shadow roots to their hosts
    pub fn shadow_including_ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(node).map(|n| n.id), move |id| self.parent(*id))
    }

    /// Retarget `target` against `observer`: climb from `target` to shadow
    /// hosts until its root is visible from `observer`.
    pub fn retarget(&self, target: NodeId, observer: NodeId) -> NodeId {
        let mut current = target;
        loop {
            let root = self.root_of(current);
            let Some(host) = self.host(root) else {
                return current;
            };
            if self.is_shadow_including_inclusive_ancestor(root, observer) {
                return current;
            }
            current = host;
        }
    }

    /// Pre-order walk over the light tree and attached shadow trees.
    /// A host's shadow root is visited before its light children.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        if self.is_empty() {
            return order;
        }

        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
            if let Some(shadow_root) = self.shadow_root(id) {
                stack.push(shadow_root);
            }
        }
        order
    }
}
