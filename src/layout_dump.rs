use crate::config::LayoutConfig;
use crate::ir::NodeCategory;
use crate::layout::{ContentBounds, LaidOutGraph, route_connector};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub hub: Option<String>,
    pub bounds: ContentBounds,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub label: String,
    pub category: NodeCategory,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Serialize)]
pub struct LinkDump {
    pub source: String,
    pub target: String,
    /// `None` when either endpoint is missing from the layout.
    pub points: Option<Vec<[f32; 2]>>,
}

impl LayoutDump {
    pub fn from_layout(layout: &LaidOutGraph, config: &LayoutConfig) -> Self {
        let nodes = layout
            .nodes()
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                label: node.label.clone(),
                category: node.category,
                x: node.x,
                y: node.y,
            })
            .collect();

        let links = layout
            .links
            .iter()
            .map(|link| {
                let points = match (layout.node(&link.source), layout.node(&link.target)) {
                    (Some(source), Some(target)) => Some(
                        route_connector(source, target, config)
                            .into_iter()
                            .map(|(x, y)| [x, y])
                            .collect(),
                    ),
                    _ => None,
                };
                LinkDump {
                    source: link.source.clone(),
                    target: link.target.clone(),
                    points,
                }
            })
            .collect();

        LayoutDump {
            hub: layout.hub_node().map(|hub| hub.id.clone()),
            bounds: layout.bounds,
            nodes,
            links,
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    layout: &LaidOutGraph,
    config: &LayoutConfig,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Graph;
    use crate::layout::compute_layout;

    #[test]
    fn dump_marks_dangling_links() {
        let mut graph = Graph::new();
        graph.push_node("hub_1", "Acme", NodeCategory::Hub);
        graph.push_node("outflow_1_0", "Retail", NodeCategory::Outflow);
        graph.push_link("hub_1", "outflow_1_0");
        graph.push_link("ghost", "hub_1");
        let config = LayoutConfig::default();
        let dump = LayoutDump::from_layout(&compute_layout(&graph, &config), &config);
        assert_eq!(dump.hub.as_deref(), Some("hub_1"));
        assert_eq!(dump.links[0].points.as_ref().map(Vec::len), Some(4));
        assert!(dump.links[1].points.is_none());

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["nodes"][1]["category"], "outflow");
    }
}
