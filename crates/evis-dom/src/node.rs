//! Tree node
//!
//! A node is either an element or a shadow root. Kind-specific data lives in
//! [`NodeKind`] so every consumer switches on it exhaustively.

use crate::{Attribute, NodeId, ShadowRootMode};

/// A node of the logical tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: NodeId,
    /// Display label, taken from the `id` attribute of the markup
    pub label: Option<String>,
    /// Parent node. A shadow root's parent is its host; the tree root has none.
    pub parent: Option<NodeId>,
    /// Light-tree children (for a shadow root: its content), in document order
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

/// Node-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(ElementData),
    ShadowRoot(ShadowRootData),
}

/// Element-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name
    pub name: String,
    pub attrs: Vec<Attribute>,
    /// Attached shadow root (not part of `children`)
    pub shadow_root: Option<NodeId>,
    /// Slot this element is rendered through
    pub assigned_slot: Option<NodeId>,
    /// Elements assigned to this `<slot>`, in document order
    pub assigned_nodes: Vec<NodeId>,
}

/// Shadow-root-specific data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowRootData {
    pub host: NodeId,
    pub mode: ShadowRootMode,
}

impl ElementData {
    pub fn new(name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attrs,
            shadow_root: None,
            assigned_slot: None,
            assigned_nodes: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check if an attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    #[inline]
    pub fn is_slot(&self) -> bool {
        self.name == "slot"
    }

    /// Slot name for `<slot>` elements (`""` is the default slot)
    pub fn slot_name(&self) -> &str {
        self.attr("name").unwrap_or("")
    }

    /// Name of the slot this element asks to be assigned to
    pub fn requested_slot(&self) -> &str {
        self.attr("slot").unwrap_or("")
    }
}

impl TreeNode {
    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    /// Check if this is a shadow root
    #[inline]
    pub fn is_shadow_root(&self) -> bool {
        matches!(self.kind, NodeKind::ShadowRoot(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(e) => Some(e),
            NodeKind::ShadowRoot(_) => None,
        }
    }

    #[inline]
    pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(e) => Some(e),
            NodeKind::ShadowRoot(_) => None,
        }
    }

    /// Get shadow root data if this is a shadow root
    #[inline]
    pub fn as_shadow_root(&self) -> Option<&ShadowRootData> {
        match &self.kind {
            NodeKind::ShadowRoot(s) => Some(s),
            NodeKind::Element(_) => None,
        }
    }

    /// Tag name, for elements
    pub fn name(&self) -> Option<&str> {
        self.as_element().map(|e| e.name.as_str())
    }

    /// Shadow root mode, for shadow roots
    pub fn mode(&self) -> Option<ShadowRootMode> {
        self.as_shadow_root().map(|s| s.mode)
    }

    /// Human readable label: `div#a`, `[shadow-root]`, `[shadow-root#s]`
    pub fn display_label(&self) -> String {
        match (&self.kind, &self.label) {
            (NodeKind::Element(e), Some(label)) => format!("{}#{}", e.name, label),
            (NodeKind::Element(e), None) => e.name.clone(),
            (NodeKind::ShadowRoot(_), Some(label)) => format!("[shadow-root#{label}]"),
            (NodeKind::ShadowRoot(_), None) => "[shadow-root]".to_string(),
        }
    }
}

impl std::fmt::Display for TreeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str, label: Option<&str>) -> TreeNode {
        TreeNode {
            id: NodeId(0),
            label: label.map(str::to_string),
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(ElementData::new(name, Vec::new())),
        }
    }

    #[test]
    fn test_display_label() {
        assert_eq!(element("div", Some("a")).display_label(), "div#a");
        assert_eq!(element("slot", None).display_label(), "slot");

        let shadow = TreeNode {
            id: NodeId(1),
            label: None,
            parent: Some(NodeId(0)),
            children: Vec::new(),
            kind: NodeKind::ShadowRoot(ShadowRootData {
                host: NodeId(0),
                mode: ShadowRootMode::Closed,
            }),
        };
        assert_eq!(shadow.display_label(), "[shadow-root]");
        assert_eq!(shadow.mode(), Some(ShadowRootMode::Closed));
        assert!(shadow.name().is_none());
    }

    #[test]
    fn test_slot_names() {
        let slot = ElementData::new("slot", vec![Attribute::new("name", "header")]);
        let default_slot = ElementData::new("slot", Vec::new());
        let slotted = ElementData::new("div", vec![Attribute::new("slot", "header")]);

        assert!(slot.is_slot());
        assert_eq!(slot.slot_name(), "header");
        assert_eq!(default_slot.slot_name(), "");
        assert_eq!(slotted.requested_slot(), "header");
    }
}
