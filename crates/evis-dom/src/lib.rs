//! evis DOM - Logical tree model
//!
//! Owned, immutable tree of elements and shadow roots built from markup.
//! Nodes live in a flat arena addressed by [`NodeId`]; ids are assigned in
//! tree-construction order and are stable for a given input.

mod builder;
mod markup;
mod node;
mod shadow;
mod tree;

pub use builder::{BuildOptions, TargetSpec, TreeBuilder, build_tree};
pub use markup::{Attribute, MarkupElement, MarkupFragment};
pub use node::{ElementData, NodeKind, ShadowRootData, TreeNode};
pub use shadow::{SHADOW_ROOT_MARKER, ShadowRootMode, TARGET_MARKER};
pub use tree::DomTree;

use serde::{Deserialize, Serialize};

/// Node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of the node in [`DomTree::nodes`]
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tree construction error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Invalid tree. Expected 1 root element but found {found}.")]
    MalformedTree { found: usize },

    #[error("Invalid shadow root marker: {message}")]
    MalformedShadowMarker { message: String },

    #[error("Invalid tree. Expected 1 target element but found {found} ({selector}).")]
    InvalidTarget { selector: String, found: usize },

    #[error("Element <{host}> already has a shadow root attached")]
    ShadowRootAlreadyAttached { host: String },
}
