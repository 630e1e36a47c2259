use crate::config::LayoutConfig;
use crate::ir::NodeCategory;

use super::NodeLayout;

/// Elbow connector between two placed nodes: horizontal, vertical, then
/// horizontal again. Always four points; zero-length segments are kept.
pub fn route_connector(
    source: &NodeLayout,
    target: &NodeLayout,
    config: &LayoutConfig,
) -> Vec<(f32, f32)> {
    let start = connector_start(source, target.category, config);
    let end = target.position();
    let mid_x = (start.0 + end.0) / 2.0;
    vec![start, (mid_x, start.1), (mid_x, end.1), end]
}

/// Hub connectors leave from the top or bottom half of the hub glyph
/// depending on which right-hand group they feed.
fn connector_start(
    source: &NodeLayout,
    target_category: NodeCategory,
    config: &LayoutConfig,
) -> (f32, f32) {
    if source.category != NodeCategory::Hub {
        return source.position();
    }
    let offset = config.hub_height / 4.0;
    match target_category {
        NodeCategory::Outflow => (source.x, source.y - offset),
        NodeCategory::Associated => (source.x, source.y + offset),
        _ => source.position(),
    }
}

pub fn points_to_path(points: &[(f32, f32)]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    let mut d = format!("M {:.2} {:.2}", first.0, first.1);
    for point in rest {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}
