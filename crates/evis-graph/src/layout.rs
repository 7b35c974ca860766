//! Layered Layout
//!
//! Simplified Sugiyama drawing, top to bottom:
//!
//! 1. Layer assignment: nodes whose incoming edges all come from placed nodes
//!    form the next layer.
//! 2. Layer filling: an edge skipping layers is split through one virtual node
//!    per skipped layer.
//! 3. Ordering: each layer is sorted by the barycenter of its sources in the
//!    previous layer. Shadow roots lose ties so shadow trees gather on the right.
//! 4. Coordinates: layers are packed left to right, then nodes are pulled
//!    toward their neighbours without overlapping.
//! 5. Cleanup: virtual nodes are dropped and split edges become polylines
//!    through their positions.

use serde::{Deserialize, Serialize};

use crate::{Graph, GraphEdge, GraphNodeKind, NodeKey, Size};

/// Spacing and node sizes used by [`layout`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between neighbouring nodes of a layer
    pub horizontal_spacing: f32,
    /// Gap between layers
    pub vertical_spacing: f32,
    pub element_size: Size,
    pub shadow_root_size: Size,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 70.0,
            vertical_spacing: 50.0,
            element_size: Size::new(50.0, 50.0),
            shadow_root_size: Size::new(110.0, 50.0),
        }
    }
}

impl LayoutConfig {
    /// Size of a node of `kind`. Virtual nodes have no extent.
    pub fn node_size(&self, kind: GraphNodeKind) -> Size {
        match kind {
            GraphNodeKind::Element => self.element_size,
            GraphNodeKind::ShadowRoot => self.shadow_root_size,
            GraphNodeKind::Virtual => Size::default(),
        }
    }
}

/// Tie-breaking weight: heavier nodes go right
fn node_weight(kind: GraphNodeKind) -> u8 {
    match kind {
        GraphNodeKind::Element | GraphNodeKind::Virtual => 0,
        GraphNodeKind::ShadowRoot => 1,
    }
}

/// Lay out `graph` in place: sizes, layers, coordinates and edge paths.
/// Running it twice gives the same result.
pub fn layout(graph: &mut Graph, config: &LayoutConfig) {
    graph.layers.clear();
    graph.nodes.truncate(graph.concrete);
    if graph.is_empty() {
        tracing::debug!("Skipping layout of an empty graph");
        return;
    }

    for node in &mut graph.nodes {
        let size = config.node_size(node.kind);
        node.width = size.width;
        node.height = size.height;
    }

    assign_to_layers(graph);
    fill_layers(graph);
    reorder_layers(graph);
    update_coordinates(graph, config);
    let virtual_count = graph.nodes.len() - graph.concrete;
    cleanup_virtual(graph);

    tracing::debug!(
        "Laid out {} nodes in {} layers ({} virtual nodes removed)",
        graph.len(),
        graph.layers.len(),
        virtual_count
    );
}

/// Arena indices of each layer's nodes, in layer order
fn layer_indices(graph: &Graph) -> Vec<Vec<usize>> {
    graph
        .layers
        .iter()
        .map(|layer| layer.iter().filter_map(|key| graph.index_of(*key)).collect())
        .collect()
}

/// Neighbour indices of every node: (sources, destinations)
fn adjacency(graph: &Graph) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
    let mut incoming = vec![Vec::new(); graph.nodes.len()];
    let mut outgoing = vec![Vec::new(); graph.nodes.len()];
    for edge in &graph.edges {
        if let (Some(from), Some(to)) = (graph.index_of(edge.from), graph.index_of(edge.to)) {
            incoming[to].push(from);
            outgoing[from].push(to);
        }
    }
    (incoming, outgoing)
}

fn assign_to_layers(graph: &mut Graph) {
    let count = graph.nodes.len();
    let (incoming, outgoing) = adjacency(graph);
    let mut pending: Vec<usize> = incoming.iter().map(Vec::len).collect();
    let mut placed = vec![false; count];
    let mut remaining = count;

    let mut current: Vec<usize> = (0..count).filter(|i| pending[*i] == 0).collect();
    while remaining > 0 {
        if current.is_empty() {
            tracing::warn!(
                "Graph is not acyclic, placing the {} remaining nodes in one layer",
                remaining
            );
            current = (0..count).filter(|i| !placed[*i]).collect();
        }

        for &index in &current {
            placed[index] = true;
        }

        let mut next = Vec::new();
        for &index in &current {
            for &to in &outgoing[index] {
                pending[to] = pending[to].saturating_sub(1);
                if pending[to] == 0 && !placed[to] {
                    next.push(to);
                }
            }
        }
        next.sort_unstable();
        next.dedup();

        remaining -= current.len();
        graph
            .layers
            .push(current.iter().map(|i| graph.nodes[*i].key).collect());
        current = next;
    }
}

fn fill_layers(graph: &mut Graph) {
    let mut layer_of = vec![usize::MAX; graph.nodes.len()];
    for (layer_index, layer) in layer_indices(graph).into_iter().enumerate() {
        for index in layer {
            layer_of[index] = layer_index;
        }
    }

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); graph.nodes.len()];
    for (edge_index, edge) in graph.edges.iter().enumerate() {
        if let Some(from) = graph.index_of(edge.from) {
            outgoing[from].push(edge_index);
        }
    }

    // Virtual nodes created while walking layer `i` land in layer `i + 1`,
    // which is walked next, so long edges are split one hop at a time.
    for layer_index in 0..graph.layers.len().saturating_sub(1) {
        let layer = graph.layers[layer_index].clone();
        for key in layer {
            let Some(from) = graph.index_of(key) else {
                continue;
            };

            for edge_index in outgoing[from].clone() {
                let edge = &graph.edges[edge_index];
                let Some(to) = graph.index_of(edge.to) else {
                    continue;
                };
                if layer_of[to] == usize::MAX || layer_of[to] <= layer_index + 1 {
                    continue;
                }

                let (to_key, kind) = (edge.to, edge.kind);
                let virtual_key = graph.add_virtual_node();
                graph.layers[layer_index + 1].push(virtual_key);
                layer_of.push(layer_index + 1);

                outgoing.push(vec![graph.edges.len()]);
                graph.add_edge(virtual_key, to_key, kind);
                graph.edges[edge_index].to = virtual_key;
            }
        }
    }
}

fn reorder_layers(graph: &mut Graph) {
    let (incoming, _) = adjacency(graph);
    let mut position: Vec<Option<usize>> = vec![None; graph.nodes.len()];

    for layer_index in 1..graph.layers.len() {
        position.fill(None);
        for (p, key) in graph.layers[layer_index - 1].iter().enumerate() {
            if let Some(index) = graph.index_of(*key) {
                position[index] = Some(p);
            }
        }

        let mut ordered: Vec<(f32, u8, NodeKey)> = graph.layers[layer_index]
            .iter()
            .enumerate()
            .map(|(current, key)| {
                let Some(index) = graph.index_of(*key) else {
                    return (current as f32, 0, *key);
                };
                let sources: Vec<usize> =
                    incoming[index].iter().filter_map(|s| position[*s]).collect();
                let barycenter = if sources.is_empty() {
                    current as f32
                } else {
                    sources.iter().sum::<usize>() as f32 / sources.len() as f32
                };
                (barycenter, node_weight(graph.nodes[index].kind), *key)
            })
            .collect();

        ordered.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        graph.layers[layer_index] = ordered.into_iter().map(|(_, _, key)| key).collect();
    }
}

fn update_coordinates(graph: &mut Graph, config: &LayoutConfig) {
    let layers = layer_indices(graph);
    let (incoming, outgoing) = adjacency(graph);
    let nodes = &mut graph.nodes;

    // Initial placement, every layer packed on the left
    let mut prev_y = 0.0;
    for layer in &layers {
        let tallest = layer.iter().map(|i| nodes[*i].height).fold(0.0, f32::max);
        let layer_y = prev_y + config.vertical_spacing + tallest / 2.0;

        let mut prev_x = 0.0;
        for &index in layer {
            let node = &mut nodes[index];
            node.x = prev_x + config.horizontal_spacing + node.width / 2.0;
            node.y = layer_y;
            prev_x = node.x + node.width / 2.0;
        }

        prev_y = layer_y + tallest / 2.0;
    }

    // Downward pass over both neighbours, then parents over their children
    for layer in layers.iter().skip(1) {
        for &index in layer {
            let neighbours = incoming[index].iter().chain(&outgoing[index]);
            if let Some(x) = mean_x(nodes, neighbours) {
                nodes[index].x = x;
            }
        }
        separate(nodes, layer, config.horizontal_spacing);
    }
    for layer in layers.iter().rev().skip(1) {
        for &index in layer {
            if let Some(x) = mean_x(nodes, outgoing[index].iter()) {
                nodes[index].x = x;
            }
        }
        separate(nodes, layer, config.horizontal_spacing);
    }
}

fn mean_x<'a>(nodes: &[crate::GraphNode], neighbours: impl Iterator<Item = &'a usize>) -> Option<f32> {
    let (sum, count) = neighbours.fold((0.0, 0usize), |(sum, count), n| (sum + nodes[*n].x, count + 1));
    (count > 0).then(|| sum / count as f32)
}

/// Push nodes right until neighbours are at least `spacing` apart
fn separate(nodes: &mut [crate::GraphNode], layer: &[usize], spacing: f32) {
    for pair in layer.windows(2) {
        let (left, right) = (&nodes[pair[0]], &nodes[pair[1]]);
        let min_x = left.x + left.width / 2.0 + spacing + right.width / 2.0;
        if nodes[pair[1]].x < min_x {
            nodes[pair[1]].x = min_x;
        }
    }
}

fn cleanup_virtual(graph: &mut Graph) {
    let concrete = graph.concrete;

    // Each virtual node has exactly one outgoing edge
    let mut next_edge: Vec<Option<usize>> = vec![None; graph.nodes.len() - concrete];
    for (edge_index, edge) in graph.edges.iter().enumerate() {
        if let Some(index) = graph.index_of(edge.from).filter(|i| *i >= concrete) {
            next_edge[index - concrete] = Some(edge_index);
        }
    }

    let mut edges = Vec::with_capacity(graph.edges.len());
    for edge in &graph.edges {
        let Some(from) = graph.node(edge.from).filter(|n| !n.is_virtual()) else {
            continue;
        };

        let mut path = vec![from.exit_point()];
        let mut to_key = edge.to;
        while let Some(index) = graph.index_of(to_key).filter(|i| *i >= concrete) {
            let node = &graph.nodes[index];
            path.push(node.center());
            match next_edge[index - concrete] {
                Some(next) => to_key = graph.edges[next].to,
                None => break,
            }
        }

        match graph.node(to_key).filter(|n| !n.is_virtual()) {
            Some(to) => {
                path.push(to.entry_point());
                edges.push(GraphEdge {
                    kind: edge.kind,
                    from: edge.from,
                    to: to_key,
                    path,
                });
            }
            None => tracing::warn!("Dropping edge from {} with a dangling route", edge.from),
        }
    }

    graph.edges = edges;
    graph.nodes.truncate(concrete);
    for layer in &mut graph.layers {
        layer.retain(|key| matches!(key, NodeKey::Tree(_)));
    }
}
