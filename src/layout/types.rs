use std::collections::HashMap;

use serde::Serialize;

use crate::ir::{Link, NodeCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub id: String,
    pub label: String,
    pub category: NodeCategory,
    pub x: f32,
    pub y: f32,
}

impl NodeLayout {
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl ContentBounds {
    pub fn around_point(x: f32, y: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    pub fn include_point(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn include_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.include_point(x, y);
        self.include_point(x + width, y + height);
    }

    pub fn expand(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min_x: self.min_x - left,
            min_y: self.min_y - top,
            max_x: self.max_x + right,
            max_y: self.max_y + bottom,
        }
    }

    pub fn width(&self) -> f32 {
        (self.max_x - self.min_x).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.max_y - self.min_y).max(0.0)
    }
}

/// Result of one layout pass. Built by value from the input graph and
/// replaced wholesale whenever the graph changes.
#[derive(Debug, Clone)]
pub struct LaidOutGraph {
    pub links: Vec<Link>,
    pub bounds: ContentBounds,
    nodes: Vec<NodeLayout>,
    /// Index of the anchoring hub in `nodes`.
    hub: Option<usize>,
    index: HashMap<String, usize>,
}

impl LaidOutGraph {
    pub(crate) fn new(
        nodes: Vec<NodeLayout>,
        links: Vec<Link>,
        bounds: ContentBounds,
        hub: Option<usize>,
    ) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            index.entry(node.id.clone()).or_insert(idx);
        }
        Self {
            nodes,
            links,
            bounds,
            hub,
            index,
        }
    }

    /// Placed nodes in input order.
    pub fn nodes(&self) -> &[NodeLayout] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.index.get(id).map(|idx| &self.nodes[*idx])
    }

    pub fn hub_node(&self) -> Option<&NodeLayout> {
        self.hub.map(|idx| &self.nodes[idx])
    }

    /// Links whose endpoints both resolve, paired with their nodes.
    pub fn resolved_links(&self) -> impl Iterator<Item = (&Link, &NodeLayout, &NodeLayout)> {
        self.links.iter().filter_map(|link| {
            let source = self.node(&link.source)?;
            let target = self.node(&link.target)?;
            Some((link, source, target))
        })
    }

    /// Largest y among placed nodes, hub included.
    pub fn lowest_node_y(&self) -> Option<f32> {
        self.nodes.iter().map(|node| node.y).reduce(f32::max)
    }

    pub fn rightmost_node_x(&self) -> Option<f32> {
        self.nodes.iter().map(|node| node.x).reduce(f32::max)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
