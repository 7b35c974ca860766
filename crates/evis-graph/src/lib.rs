//! evis Graph - Graph view and layered layout
//!
//! Mirrors a [`DomTree`](evis_dom::DomTree) as a directed acyclic graph
//! (child, shadow root and slot assignment edges) and lays it out in
//! horizontal layers for drawing.

mod builder;
mod geometry;
mod graph;
mod layout;

pub use builder::build_graph;
pub use geometry::{Point, Rect, Size};
pub use graph::{Graph, GraphEdge, GraphEdgeKind, GraphNode, GraphNodeKind, Layer, NodeKey};
pub use layout::{LayoutConfig, layout};
