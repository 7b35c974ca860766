//! Graph view-model
//!
//! Flat arena of nodes and edges. Concrete nodes sit at the index of the tree
//! node they mirror; virtual routing nodes only exist while [`layout`](crate::layout)
//! runs and are appended after them.

use evis_dom::NodeId;
use serde::{Deserialize, Serialize};

use crate::{Point, Rect, Size};

/// Graph node identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKey {
    /// Mirrors a tree node
    Tree(NodeId),
    /// Routing node inserted by layout
    Virtual(u32),
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKey::Tree(id) => write!(f, "{id}"),
            NodeKey::Virtual(n) => write!(f, "#{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphNodeKind {
    Element,
    ShadowRoot,
    Virtual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphEdgeKind {
    /// Parent to light-tree child
    Child,
    /// Host to its shadow root
    ShadowRoot,
    /// Slot to an element assigned into it
    AssignedElement,
}

/// Graph node, centered on (`x`, `y`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub key: NodeKey,
    pub kind: GraphNodeKind,
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl GraphNode {
    pub(crate) fn new(key: NodeKey, kind: GraphNodeKind) -> Self {
        Self {
            key,
            kind,
            width: 0.0,
            height: 0.0,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Tree node this graph node mirrors (`None` for virtual nodes)
    pub fn tree_node(&self) -> Option<NodeId> {
        match self.key {
            NodeKey::Tree(id) => Some(id),
            NodeKey::Virtual(_) => None,
        }
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.kind == GraphNodeKind::Virtual
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounding box
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center(), self.size())
    }

    /// Point where outgoing edges leave (bottom center)
    pub fn exit_point(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }

    /// Point where incoming edges enter (top center)
    pub fn entry_point(&self) -> Point {
        Point::new(self.x, self.y - self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub kind: GraphEdgeKind,
    pub from: NodeKey,
    pub to: NodeKey,
    /// Control points from source to destination, filled in by layout
    pub path: Vec<Point>,
}

/// Nodes sharing a topological depth, in drawing order
pub type Layer = Vec<NodeKey>;

/// Directed graph over a tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub(crate) nodes: Vec<GraphNode>,
    pub(crate) edges: Vec<GraphEdge>,
    pub(crate) layers: Vec<Layer>,
    /// Number of nodes mirroring tree nodes; virtual nodes follow them
    pub(crate) concrete: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node mirroring `id`. Tree nodes must be added in id order.
    pub(crate) fn add_tree_node(&mut self, id: NodeId, kind: GraphNodeKind) -> NodeKey {
        debug_assert_eq!(id.index(), self.concrete);
        debug_assert_eq!(self.nodes.len(), self.concrete);
        let key = NodeKey::Tree(id);
        self.nodes.push(GraphNode::new(key, kind));
        self.concrete += 1;
        key
    }

    pub(crate) fn add_virtual_node(&mut self) -> NodeKey {
        let key = NodeKey::Virtual((self.nodes.len() - self.concrete) as u32);
        self.nodes.push(GraphNode::new(key, GraphNodeKind::Virtual));
        key
    }

    pub(crate) fn add_edge(&mut self, from: NodeKey, to: NodeKey, kind: GraphEdgeKind) {
        self.edges.push(GraphEdge {
            kind,
            from,
            to,
            path: Vec::new(),
        });
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Layers from the sources downward; empty until laid out
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arena index of a node
    pub fn index_of(&self, key: NodeKey) -> Option<usize> {
        let index = match key {
            NodeKey::Tree(id) if id.index() < self.concrete => id.index(),
            NodeKey::Tree(_) => return None,
            NodeKey::Virtual(n) => self.concrete + n as usize,
        };
        (index < self.nodes.len()).then_some(index)
    }

    pub fn node(&self, key: NodeKey) -> Option<&GraphNode> {
        self.nodes.get(self.index_of(key)?)
    }

    pub(crate) fn node_mut(&mut self, key: NodeKey) -> Option<&mut GraphNode> {
        let index = self.index_of(key)?;
        self.nodes.get_mut(index)
    }

    /// Node mirroring a tree node
    pub fn tree_node(&self, id: NodeId) -> Option<&GraphNode> {
        self.node(NodeKey::Tree(id))
    }

    pub fn outgoing_edges(&self, key: NodeKey) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.edges.iter().filter(move |e| e.from == key)
    }

    pub fn incoming_edges(&self, key: NodeKey) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.edges.iter().filter(move |e| e.to == key)
    }

    /// Layer containing `key`
    pub fn layer_of(&self, key: NodeKey) -> Option<usize> {
        self.layers.iter().position(|layer| layer.contains(&key))
    }

    /// Whether layout has run: every node is layered and no virtual node is left
    pub fn is_laid_out(&self) -> bool {
        self.nodes.len() == self.concrete
            && self.layers.iter().map(Vec::len).sum::<usize>() == self.nodes.len()
    }

    /// Box enclosing every node and edge point
    pub fn bounds(&self) -> Option<Rect> {
        let node_rects = self.nodes.iter().map(GraphNode::rect);
        let edge_points = self
            .edges
            .iter()
            .flat_map(|e| e.path.iter())
            .map(|p| Rect::new(p.x, p.y, 0.0, 0.0));

        node_rects.chain(edge_points).reduce(|acc, rect| acc.union(&rect))
    }
}
