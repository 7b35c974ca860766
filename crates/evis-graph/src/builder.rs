//! Graph construction from a [`DomTree`]

use evis_dom::{DomTree, NodeKind};

use crate::{Graph, GraphEdgeKind, GraphNodeKind, NodeKey};

/// Build the unlaid-out graph of a tree: one node per tree node, with child,
/// shadow root and slot assignment edges.
pub fn build_graph(tree: &DomTree) -> Graph {
    let mut graph = Graph::new();

    for node in tree.nodes() {
        let kind = match node.kind {
            NodeKind::Element(_) => GraphNodeKind::Element,
            NodeKind::ShadowRoot(_) => GraphNodeKind::ShadowRoot,
        };
        graph.add_tree_node(node.id, kind);
    }

    for node in tree.nodes() {
        let key = NodeKey::Tree(node.id);

        for child in &node.children {
            graph.add_edge(key, NodeKey::Tree(*child), GraphEdgeKind::Child);
        }

        match &node.kind {
            NodeKind::Element(elem) => {
                for assigned in &elem.assigned_nodes {
                    graph.add_edge(key, NodeKey::Tree(*assigned), GraphEdgeKind::AssignedElement);
                }
            }
            NodeKind::ShadowRoot(shadow) => {
                graph.add_edge(NodeKey::Tree(shadow.host), key, GraphEdgeKind::ShadowRoot);
            }
        }
    }

    tracing::debug!(
        "Built graph with {} nodes and {} edges",
        graph.len(),
        graph.edges().len()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use evis_dom::{BuildOptions, MarkupElement, build_tree};

    #[test]
    fn test_build_graph_edges() {
        let root = MarkupElement::new("div")
            .with_attr("id", "a")
            .with_child(
                MarkupElement::new("template")
                    .with_attr("shadow-root", "")
                    .with_attr("mode", "open")
                    .with_content(MarkupElement::new("slot")),
            )
            .with_child(MarkupElement::new("div").with_attr("id", "c").with_attr("target", ""));
        let tree = build_tree(&root.into(), &BuildOptions::default()).unwrap();
        let graph = build_graph(&tree);

        let count = |kind| graph.edges().iter().filter(|e| e.kind == kind).count();
        assert_eq!(graph.len(), tree.len());
        assert_eq!(count(GraphEdgeKind::Child), 2);
        assert_eq!(count(GraphEdgeKind::ShadowRoot), 1);
        assert_eq!(count(GraphEdgeKind::AssignedElement), 1);
        assert!(graph.edges().iter().all(|e| e.path.is_empty()));
        assert!(graph.layers().is_empty());

        let shadow_root = tree.shadow_root(tree.root()).unwrap();
        assert_eq!(
            graph.tree_node(shadow_root).map(|n| n.kind),
            Some(GraphNodeKind::ShadowRoot)
        );
    }
}
