//! Deterministic placement for hub-and-satellite diagrams.
//!
//! The hub sits at the origin, inflows on a column to its left, and
//! outflows plus associated entities on a column to its right. Positions
//! are a pure function of the input graph and the layout config.

mod routing;
mod text;
mod types;

pub use routing::{points_to_path, route_connector};
pub use text::{FittedText, fit_text};
pub use types::{ContentBounds, LaidOutGraph, NodeLayout};

use crate::config::LayoutConfig;
use crate::ir::{Graph, Node, NodeCategory};

pub fn compute_layout(graph: &Graph, config: &LayoutConfig) -> LaidOutGraph {
    let columns = Columns::partition(graph);
    let spacing = config.vertical_spacing;
    let column_x = config.horizontal_spacing;

    let mut nodes = Vec::with_capacity(graph.nodes.len());
    let mut hub = None;

    if let Some(node) = columns.hub {
        hub = Some(nodes.len());
        nodes.push(place(node, 0.0, 0.0));
    }

    for (node, y) in columns.inflows.iter().zip(centered_offsets(columns.inflows.len(), spacing)) {
        nodes.push(place(node, -column_x, y));
    }

    match (columns.outflows.is_empty(), columns.associated.is_empty()) {
        (false, false) => {
            let anchor = config.hub_height / 4.0;
            let outflow_center = -anchor - span(columns.outflows.len(), spacing) / 2.0;
            let associated_center = anchor + span(columns.associated.len(), spacing) / 2.0;
            for (node, y) in columns
                .outflows
                .iter()
                .zip(centered_offsets(columns.outflows.len(), spacing))
            {
                nodes.push(place(node, column_x, outflow_center + y));
            }
            for (node, y) in columns
                .associated
                .iter()
                .zip(centered_offsets(columns.associated.len(), spacing))
            {
                nodes.push(place(node, column_x, associated_center + y));
            }
        }
        (false, true) | (true, false) => {
            let only = if columns.outflows.is_empty() {
                &columns.associated
            } else {
                &columns.outflows
            };
            for (node, y) in only.iter().zip(centered_offsets(only.len(), spacing)) {
                nodes.push(place(node, column_x, y));
            }
        }
        (true, true) => {}
    }

    let bounds = content_bounds(&nodes, config);
    tracing::debug!(
        hub = hub.is_some(),
        inflows = columns.inflows.len(),
        outflows = columns.outflows.len(),
        associated = columns.associated.len(),
        min_x = bounds.min_x,
        min_y = bounds.min_y,
        max_x = bounds.max_x,
        max_y = bounds.max_y,
        "layout pass"
    );

    LaidOutGraph::new(nodes, graph.links.clone(), bounds, hub)
}

struct Columns<'a> {
    hub: Option<&'a Node>,
    inflows: Vec<&'a Node>,
    outflows: Vec<&'a Node>,
    associated: Vec<&'a Node>,
}

impl<'a> Columns<'a> {
    /// Splits nodes by category in input order. Only the first hub is kept.
    fn partition(graph: &'a Graph) -> Self {
        let mut columns = Columns {
            hub: None,
            inflows: Vec::new(),
            outflows: Vec::new(),
            associated: Vec::new(),
        };
        for node in &graph.nodes {
            match node.category {
                NodeCategory::Hub => {
                    if columns.hub.is_none() {
                        columns.hub = Some(node);
                    }
                }
                NodeCategory::Inflow => columns.inflows.push(node),
                NodeCategory::Outflow => columns.outflows.push(node),
                NodeCategory::Associated => columns.associated.push(node),
            }
        }
        columns
    }
}

fn place(node: &Node, x: f32, y: f32) -> NodeLayout {
    NodeLayout {
        id: node.id.clone(),
        label: node.label.clone(),
        category: node.category,
        x,
        y,
    }
}

fn span(count: usize, spacing: f32) -> f32 {
    count.saturating_sub(1) as f32 * spacing
}

/// Offsets of `count` evenly spaced items centered on zero.
fn centered_offsets(count: usize, spacing: f32) -> impl Iterator<Item = f32> {
    let start = -span(count, spacing) / 2.0;
    (0..count).map(move |idx| start + idx as f32 * spacing)
}

fn content_bounds(nodes: &[NodeLayout], config: &LayoutConfig) -> ContentBounds {
    let mut bounds = ContentBounds::around_point(0.0, 0.0);
    if let Some((first, rest)) = nodes.split_first() {
        bounds = ContentBounds::around_point(first.x, first.y);
        for node in rest {
            bounds.include_point(node.x, node.y);
        }
    }
    let pad = config.content_padding;
    bounds.expand(pad, pad, pad + config.legend_margin, pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(inflows: usize, outflows: usize, associated: usize) -> Graph {
        let mut graph = Graph::new();
        graph.push_node("hub_1", "Acme", NodeCategory::Hub);
        for idx in 0..inflows {
            graph.push_node(&format!("inflow_1_{idx}"), "in", NodeCategory::Inflow);
        }
        for idx in 0..outflows {
            graph.push_node(&format!("outflow_1_{idx}"), "out", NodeCategory::Outflow);
        }
        for idx in 0..associated {
            graph.push_node(&format!("associated_1_{idx}"), "assoc", NodeCategory::Associated);
        }
        graph
    }

    fn ys(layout: &LaidOutGraph, category: NodeCategory) -> Vec<f32> {
        layout
            .nodes()
            .iter()
            .filter(|node| node.category == category)
            .map(|node| node.y)
            .collect()
    }

    #[test]
    fn hub_sits_at_origin() {
        let layout = compute_layout(&graph(0, 0, 0), &LayoutConfig::default());
        let hub = layout.hub_node().unwrap();
        assert_eq!(hub.position(), (0.0, 0.0));
    }

    #[test]
    fn inflows_are_centered_in_input_order() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&graph(3, 0, 0), &config);
        assert_eq!(ys(&layout, NodeCategory::Inflow), vec![-80.0, 0.0, 80.0]);
        assert!(
            layout
                .nodes()
                .iter()
                .filter(|node| node.category == NodeCategory::Inflow)
                .all(|node| node.x == -config.horizontal_spacing)
        );
        assert_eq!(layout.node("inflow_1_0").unwrap().y, -80.0);
    }

    #[test]
    fn single_column_list_is_centered() {
        let layout = compute_layout(&graph(0, 0, 2), &LayoutConfig::default());
        assert_eq!(ys(&layout, NodeCategory::Associated), vec![-40.0, 40.0]);
    }

    #[test]
    fn split_column_keeps_outflows_above_associated() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&graph(0, 4, 1), &config);
        let out = ys(&layout, NodeCategory::Outflow);
        let assoc = ys(&layout, NodeCategory::Associated);
        let anchor = config.hub_height / 4.0;
        assert_eq!(*out.last().unwrap(), -anchor);
        assert_eq!(assoc, vec![anchor]);
        assert!(out.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn extra_hubs_are_left_unplaced() {
        let mut input = graph(1, 0, 0);
        input.push_node("hub_2", "Other", NodeCategory::Hub);
        let layout = compute_layout(&input, &LayoutConfig::default());
        assert_eq!(layout.nodes().len(), 2);
        assert!(layout.node("hub_2").is_none());
        assert_eq!(layout.hub_node().unwrap().id, "hub_1");
    }

    #[test]
    fn missing_hub_still_places_satellites() {
        let mut input = Graph::new();
        input.push_node("a", "A", NodeCategory::Outflow);
        let layout = compute_layout(&input, &LayoutConfig::default());
        assert!(layout.hub_node().is_none());
        assert_eq!(layout.node("a").unwrap().position(), (300.0, 0.0));
    }

    #[test]
    fn lookups_agree_with_placed_nodes() {
        let mut input = graph(2, 2, 1);
        input.push_node("inflow_1_0", "dup", NodeCategory::Inflow);
        let layout = compute_layout(&input, &LayoutConfig::default());
        assert_eq!(layout.nodes().len(), 7);
        let mut seen = std::collections::HashSet::new();
        for node in layout.nodes() {
            if seen.insert(node.id.as_str()) {
                assert_eq!(layout.node(&node.id), Some(node));
            }
        }
        assert_eq!(layout.node("inflow_1_0").unwrap().label, "in");
        assert_eq!(layout.hub_node(), layout.nodes().first());
    }

    #[test]
    fn empty_graph_has_finite_bounds() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&Graph::new(), &config);
        assert!(layout.is_empty());
        let b = layout.bounds;
        for value in [b.min_x, b.min_y, b.max_x, b.max_y] {
            assert!(value.is_finite());
        }
        assert_eq!(b.width(), config.content_padding * 2.0 + config.legend_margin);
    }

    #[test]
    fn input_graph_is_untouched() {
        let input = graph(2, 1, 1);
        let before = input.clone();
        let _ = compute_layout(&input, &LayoutConfig::default());
        assert_eq!(input, before);
    }
}
