//! Retained scene
//!
//! Everything needed to draw one tree, in final (padded) coordinates. Items are
//! drawn in field order: shadow tree boxes, nodes, edges, pointers.

use evis_dom::NodeId;
use evis_graph::{GraphEdgeKind, GraphNodeKind, Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::Theme;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub theme: Theme,
    pub label_size: f32,
    pub pointer_size: Size,
    pub shadow_trees: Vec<ShadowTreeShape>,
    /// One shape per tree node, in id order
    pub nodes: Vec<NodeShape>,
    pub edges: Vec<EdgeShape>,
    pub pointers: Vec<PointerShape>,
}

impl Scene {
    pub fn node(&self, id: NodeId) -> Option<&NodeShape> {
        self.nodes.get(id.index())
    }

    pub fn pointer(&self, kind: PointerKind) -> Option<&PointerShape> {
        self.pointers.iter().find(|p| p.kind == kind)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Box drawn behind a shadow root and everything inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowTreeShape {
    pub shadow_root: NodeId,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeShape {
    pub id: NodeId,
    pub kind: GraphNodeKind,
    pub rect: Rect,
    /// Text lines drawn centered in the box
    pub text: Vec<String>,
    /// Badge text from the `id` attribute
    pub label: Option<String>,
    pub in_composed_path: bool,
}

impl NodeShape {
    pub fn center(&self) -> Point {
        self.rect.center()
    }

    pub fn classes(&self) -> String {
        let mut classes = String::from("node");
        classes.push_str(match self.kind {
            GraphNodeKind::ShadowRoot => " node__shadow-root",
            GraphNodeKind::Element | GraphNodeKind::Virtual => " node__element",
        });
        if self.in_composed_path {
            classes.push_str(" node__composed-path");
        }
        classes
    }

    /// Badge square centered on the top right corner
    pub fn label_rect(&self, size: f32) -> Rect {
        Rect::from_center(
            Point::new(self.rect.right(), self.rect.y),
            Size::new(size, size),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeShape {
    pub kind: GraphEdgeKind,
    pub from: NodeId,
    pub to: NodeId,
    pub points: Vec<Point>,
}

impl EdgeShape {
    pub fn class(&self) -> &'static str {
        match self.kind {
            GraphEdgeKind::Child => "edge edge__child",
            GraphEdgeKind::ShadowRoot => "edge edge__shadow-root",
            GraphEdgeKind::AssignedElement => "edge edge__assigned-element",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerKind {
    /// Points at the (retargeted) target
    Target,
    /// Points at the current target
    Event,
}

impl PointerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointerKind::Target => "target",
            PointerKind::Event => "event",
        }
    }
}

/// Arrow-shaped marker pointing right at `anchor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerShape {
    pub kind: PointerKind,
    pub anchor: Point,
    pub visible: bool,
}

impl PointerShape {
    pub(crate) fn hidden(kind: PointerKind) -> Self {
        Self {
            kind,
            anchor: Point::default(),
            visible: false,
        }
    }

    /// Outline of the arrow, ending 5 units right of the anchor
    pub fn polygon(&self, size: Size) -> [Point; 5] {
        let Point { x, y } = self.anchor;
        let half = size.height / 2.0;
        [
            Point::new(x - size.width, y - half),
            Point::new(x, y - half),
            Point::new(x + 5.0, y),
            Point::new(x, y + half),
            Point::new(x - size.width, y + half),
        ]
    }

    pub fn class(&self) -> String {
        format!("pointer pointer__{}", self.kind.as_str())
    }
}
