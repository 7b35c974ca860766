//! Graph Renderer
//!
//! `set_tree` lays the tree out once and composes the scene; `set_step` only
//! restyles nodes and moves the pointers.

use evis_dom::{DomTree, NodeId, NodeKind};
use evis_events::EventDispatchingStep;
use evis_graph::{Graph, LayoutConfig, Point, Rect, Size, build_graph, layout};
use serde::{Deserialize, Serialize};

use crate::{EdgeShape, NodeShape, PointerKind, PointerShape, Scene, ShadowTreeShape, Theme};

/// Drawing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub layout: LayoutConfig,
    /// Margin around the drawing
    pub padding: f32,
    /// Margin between a shadow tree box and its content
    pub shadow_tree_padding: f32,
    pub pointer_size: Size,
    /// Side of the `id` badge
    pub label_size: f32,
    pub theme: Theme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            padding: 20.0,
            shadow_tree_padding: 10.0,
            pointer_size: Size::new(50.0, 20.0),
            label_size: 21.0,
            theme: Theme::default(),
        }
    }
}

/// Retained renderer for one tree at a time
#[derive(Debug, Default)]
pub struct GraphRenderer {
    config: RenderConfig,
    graph: Option<Graph>,
    scene: Scene,
}

impl GraphRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            graph: None,
            scene: Scene::default(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Laid-out graph of the current tree
    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Replace the drawn tree: rebuilds the graph, runs layout and composes
    /// a fresh scene with hidden pointers.
    pub fn set_tree(&mut self, tree: &DomTree) {
        let mut graph = build_graph(tree);
        layout(&mut graph, &self.config.layout);

        self.scene = compose(tree, &graph, &self.config);
        self.graph = Some(graph);

        tracing::debug!(
            "Composed scene {}x{} with {} nodes and {} shadow trees",
            self.scene.width,
            self.scene.height,
            self.scene.nodes.len(),
            self.scene.shadow_trees.len()
        );
    }

    /// Highlight a dispatch step
    pub fn set_step(&mut self, step: &EventDispatchingStep) {
        for node in &mut self.scene.nodes {
            node.in_composed_path = step.touches(node.id);
        }

        let current_target = self.scene.node(step.current_target).map(|n| n.rect);
        let target = self.scene.node(step.target).map(|n| n.rect);
        let (Some(current_target), Some(target)) = (current_target, target) else {
            tracing::warn!("Step refers to nodes outside of the drawn tree");
            self.hide_pointers();
            return;
        };

        // Both pointers on one node are spread apart vertically
        let offset = if step.current_target == step.target {
            current_target.height / 4.0
        } else {
            0.0
        };

        for pointer in &mut self.scene.pointers {
            let (rect, dy) = match pointer.kind {
                PointerKind::Event => (current_target, -offset),
                PointerKind::Target => (target, offset),
            };
            pointer.anchor = Point::new(rect.x, rect.center().y + dy);
            pointer.visible = true;
        }
    }

    /// Remove step highlighting
    pub fn clear_step(&mut self) {
        for node in &mut self.scene.nodes {
            node.in_composed_path = false;
        }
        self.hide_pointers();
    }

    fn hide_pointers(&mut self) {
        for pointer in &mut self.scene.pointers {
            pointer.visible = false;
        }
    }

    /// Current scene as SVG markup
    pub fn to_svg(&self) -> String {
        crate::to_svg(&self.scene)
    }
}

fn compose(tree: &DomTree, graph: &Graph, config: &RenderConfig) -> Scene {
    let shadow_trees = shadow_tree_boxes(tree, graph, config.shadow_tree_padding);

    // Pointers reach left of the leftmost node
    let Some(content) = graph
        .bounds()
        .into_iter()
        .chain(shadow_trees.iter().map(|s| s.rect))
        .reduce(|acc, rect| acc.union(&rect))
    else {
        return Scene {
            width: 2.0 * config.padding,
            height: 2.0 * config.padding,
            theme: config.theme,
            label_size: config.label_size,
            pointer_size: config.pointer_size,
            ..Scene::default()
        };
    };
    let content = Rect {
        x: content.x - config.pointer_size.width,
        width: content.width + config.pointer_size.width,
        ..content
    };
    let (dx, dy) = (config.padding - content.x, config.padding - content.y);

    let nodes = tree
        .nodes()
        .iter()
        .filter_map(|node| {
            let graph_node = graph.tree_node(node.id)?;
            let text = match &node.kind {
                NodeKind::Element(elem) => vec![format!("<{}>", elem.name)],
                NodeKind::ShadowRoot(shadow) => {
                    vec!["Shadow Root".to_string(), format!("({})", shadow.mode)]
                }
            };
            Some(NodeShape {
                id: node.id,
                kind: graph_node.kind,
                rect: graph_node.rect().translate(dx, dy),
                text,
                label: node.label.clone(),
                in_composed_path: false,
            })
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let from = graph.node(edge.from)?.tree_node()?;
            let to = graph.node(edge.to)?.tree_node()?;
            Some(EdgeShape {
                kind: edge.kind,
                from,
                to,
                points: edge.path.iter().map(|p| p.translate(dx, dy)).collect(),
            })
        })
        .collect();

    Scene {
        width: content.width + 2.0 * config.padding,
        height: content.height + 2.0 * config.padding,
        theme: config.theme,
        label_size: config.label_size,
        pointer_size: config.pointer_size,
        shadow_trees: shadow_trees
            .into_iter()
            .map(|s| ShadowTreeShape {
                rect: s.rect.translate(dx, dy),
                ..s
            })
            .collect(),
        nodes,
        edges,
        pointers: vec![
            PointerShape::hidden(PointerKind::Target),
            PointerShape::hidden(PointerKind::Event),
        ],
    }
}

/// One box per shadow root enclosing the shadow root, its content and any
/// nested shadow tree boxes. Returned in id order, so outer boxes come first.
fn shadow_tree_boxes(tree: &DomTree, graph: &Graph, padding: f32) -> Vec<ShadowTreeShape> {
    let nesting = |id: NodeId| {
        tree.shadow_including_ancestors(id)
            .filter(|a| tree.get(*a).is_some_and(|n| n.is_shadow_root()))
            .count()
    };

    // Innermost shadow trees first so enclosing boxes can include them
    let mut roots: Vec<(usize, NodeId)> = tree
        .nodes()
        .iter()
        .filter(|n| n.is_shadow_root())
        .map(|n| (nesting(n.id), n.id))
        .collect();
    roots.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut boxes: Vec<Option<Rect>> = vec![None; tree.len()];
    for (_, root) in roots {
        let Some(mut rect) = graph.tree_node(root).map(|n| n.rect()) else {
            continue;
        };

        for node in tree.nodes() {
            if node.id == root || !tree.is_shadow_including_inclusive_ancestor(root, node.id) {
                continue;
            }
            let contained = if node.is_shadow_root() {
                boxes[node.id.index()]
            } else {
                graph.tree_node(node.id).map(|n| n.rect())
            };
            if let Some(contained) = contained {
                rect = rect.union(&contained);
            }
        }

        boxes[root.index()] = Some(rect.inflate(padding));
    }

    boxes
        .into_iter()
        .enumerate()
        .filter_map(|(index, rect)| {
            let shadow_root = tree.nodes().get(index)?.id;
            Some(ShadowTreeShape {
                shadow_root,
                rect: rect?,
            })
        })
        .collect()
}
