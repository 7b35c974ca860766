//! Comprehensive tests for evis-graph

use std::collections::HashSet;

use evis_graph::{Graph, GraphEdgeKind, LayoutConfig, NodeKey, build_graph, layout};
use evis_html::build_tree;

const PRESETS: &[&str] = &[
    r#"<div id=a><div id=b target></div><div id=c></div></div>"#,
    r#"<div id=a><template shadow-root mode=open><div id=b target></div></template></div>"#,
    r#"
    <div id="a">
      <template shadow-root mode="open">
        <div id="b">
          <template shadow-root mode="closed">
            <div id="c" target></div>
          </template>
        </div>
      </template>
    </div>
    "#,
    r#"
    <div id="a">
      <template shadow-root mode="open">
        <div id="b"><slot></slot></div>
      </template>
      <div id="c" target></div>
    </div>
    "#,
    r#"
    <div id="root">
      <template shadow-root mode="open">
        <header><slot name="title"></slot></header>
        <main><slot></slot></main>
      </template>
      <h1 slot="title">Title</h1>
      <p id="p" target></p>
      <p></p>
    </div>
    "#,
];

fn laid_out(markup: &str) -> Graph {
    let tree = build_tree(markup).unwrap();
    let mut graph = build_graph(&tree);
    layout(&mut graph, &LayoutConfig::default());
    graph
}

#[test]
fn test_every_node_in_exactly_one_layer() {
    for markup in PRESETS {
        let graph = laid_out(markup);
        let mut seen = HashSet::new();
        for key in graph.layers().iter().flatten() {
            assert!(seen.insert(*key), "{key} appears twice");
        }
        assert_eq!(seen.len(), graph.len());
        assert!(graph.is_laid_out());
    }
}

#[test]
fn test_edges_point_downward() {
    for markup in PRESETS {
        let graph = laid_out(markup);
        for edge in graph.edges() {
            let from = graph.layer_of(edge.from).unwrap();
            let to = graph.layer_of(edge.to).unwrap();
            assert!(from < to);
            // One path point per crossed layer boundary plus both ends
            assert_eq!(edge.path.len(), to - from + 1);
        }
    }
}

#[test]
fn test_layers_do_not_overlap() {
    let config = LayoutConfig::default();
    for markup in PRESETS {
        let graph = laid_out(markup);
        for layer in graph.layers() {
            let rects: Vec<_> = layer.iter().map(|k| graph.node(*k).unwrap().rect()).collect();
            for pair in rects.windows(2) {
                assert!(pair[0].right() + config.horizontal_spacing <= pair[1].x + 0.001);
            }
        }
    }
}

#[test]
fn test_edge_paths_touch_node_borders() {
    let graph = laid_out(PRESETS[3]);
    for edge in graph.edges() {
        let from = graph.node(edge.from).unwrap();
        let to = graph.node(edge.to).unwrap();
        assert_eq!(edge.path.first(), Some(&from.exit_point()));
        assert_eq!(edge.path.last(), Some(&to.entry_point()));
    }
}

#[test]
fn test_slotted_content_routes_around_layers() {
    let tree = build_tree(PRESETS[3]).unwrap();
    let mut graph = build_graph(&tree);
    layout(&mut graph, &LayoutConfig::default());

    let a = NodeKey::Tree(tree.find_by_label("a").unwrap());
    let c = NodeKey::Tree(tree.find_by_label("c").unwrap());
    let child_edge = graph
        .edges()
        .iter()
        .find(|e| e.from == a && e.to == c)
        .unwrap();

    // a, shadow root, b, slot then c
    assert_eq!(graph.layer_of(c), Some(4));
    assert_eq!(child_edge.path.len(), 5);
    assert_eq!(
        graph
            .edges()
            .iter()
            .filter(|e| e.kind == GraphEdgeKind::AssignedElement && e.to == c)
            .count(),
        1
    );
}

#[test]
fn test_layout_is_deterministic() {
    for markup in PRESETS {
        let first = laid_out(markup);
        let second = laid_out(markup);
        assert_eq!(first, second);

        let mut again = first.clone();
        layout(&mut again, &LayoutConfig::default());
        assert_eq!(again, first);
    }
}

#[test]
fn test_node_sizes_follow_kind() {
    let config = LayoutConfig::default();
    let tree = build_tree(PRESETS[1]).unwrap();
    let mut graph = build_graph(&tree);
    layout(&mut graph, &config);

    let shadow_root = tree.shadow_root(tree.root()).unwrap();
    assert_eq!(graph.tree_node(shadow_root).unwrap().size(), config.shadow_root_size);
    assert_eq!(graph.tree_node(tree.root()).unwrap().size(), config.element_size);
}

#[test]
fn test_layers_are_stacked_top_to_bottom() {
    let config = LayoutConfig::default();
    let graph = laid_out(PRESETS[2]);

    let ys: Vec<f32> = graph
        .layers()
        .iter()
        .map(|layer| graph.node(layer[0]).unwrap().y)
        .collect();
    assert_eq!(ys[0], config.vertical_spacing + 25.0);
    for pair in ys.windows(2) {
        assert_eq!(pair[1] - pair[0], 50.0 + config.vertical_spacing);
    }
}
