//! Turns a laid-out graph into drawable primitives.

use crate::config::{LayoutConfig, TextFitConfig};
use crate::ir::NodeCategory;
use crate::layout::{ContentBounds, LaidOutGraph, NodeLayout, fit_text, route_connector};
use crate::text_metrics::TextMeasure;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        corner_radius: f32,
        fill: String,
        stroke: Option<String>,
        stroke_width: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: String,
        stroke: Option<String>,
        stroke_width: f32,
    },
    Path {
        points: Vec<(f32, f32)>,
        stroke: String,
        stroke_width: f32,
        dasharray: Option<String>,
    },
    /// Multi-line text; `y` is the vertical center of the block.
    Text {
        x: f32,
        y: f32,
        lines: Vec<String>,
        font_size: f32,
        line_height: f32,
        anchor: TextAnchor,
        fill: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneRole {
    Link { source: String, target: String },
    Node(String),
    Legend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub role: SceneRole,
    pub primitive: Primitive,
}

#[derive(Debug, Clone)]
pub struct Scene {
    /// Content bounds united with the legend box.
    pub canvas: ContentBounds,
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn paths(&self) -> impl Iterator<Item = &SceneItem> {
        self.items
            .iter()
            .filter(|item| matches!(item.primitive, Primitive::Path { .. }))
    }

    pub fn items_for<'a>(&'a self, role: &'a SceneRole) -> impl Iterator<Item = &'a SceneItem> {
        self.items.iter().filter(move |item| &item.role == role)
    }
}

pub fn build_scene(
    layout: &LaidOutGraph,
    theme: &Theme,
    config: &LayoutConfig,
    fit: &TextFitConfig,
    measure: &dyn TextMeasure,
) -> Scene {
    let mut items = Vec::new();

    for (link, source, target) in layout.resolved_links() {
        let color = theme
            .palette
            .connector_color(source.category, target.category);
        items.push(SceneItem {
            role: SceneRole::Link {
                source: link.source.clone(),
                target: link.target.clone(),
            },
            primitive: Primitive::Path {
                points: route_connector(source, target, config),
                stroke: color.to_string(),
                stroke_width: theme.connector_width,
                dasharray: Some(theme.connector_dasharray.clone()),
            },
        });
    }
    let link_count = items.len();

    for node in layout.nodes() {
        let role = SceneRole::Node(node.id.clone());
        let primitives = match node.category {
            NodeCategory::Hub => hub_glyph(node, theme, config, fit, measure),
            _ => satellite_glyph(node, theme, config),
        };
        items.extend(primitives.into_iter().map(|primitive| SceneItem {
            role: role.clone(),
            primitive,
        }));
    }

    let legend_origin = legend_origin(layout, config);
    let legend = legend_block(legend_origin, theme, config);
    let mut canvas = layout.bounds;
    if let Some(Primitive::Rect {
        x,
        y,
        width,
        height,
        ..
    }) = legend.first()
    {
        let pad = config.legend_padding;
        canvas.include_rect(*x - pad, *y - pad, *width + pad * 2.0, *height + pad * 2.0);
    }
    items.extend(legend.into_iter().map(|primitive| SceneItem {
        role: SceneRole::Legend,
        primitive,
    }));

    tracing::debug!(
        links = link_count,
        skipped_links = layout.links.len() - link_count,
        items = items.len(),
        "scene built"
    );

    Scene { canvas, items }
}

fn hub_glyph(
    node: &NodeLayout,
    theme: &Theme,
    config: &LayoutConfig,
    fit: &TextFitConfig,
    measure: &dyn TextMeasure,
) -> Vec<Primitive> {
    let inner_width = (config.hub_width - config.hub_text_padding * 2.0).max(1.0);
    let inner_height = (config.hub_height - config.hub_text_padding * 2.0).max(1.0);
    let fitted = fit_text(&node.label, inner_width, inner_height, measure, fit);
    vec![
        Primitive::Rect {
            x: node.x - config.hub_width / 2.0,
            y: node.y - config.hub_height / 2.0,
            width: config.hub_width,
            height: config.hub_height,
            corner_radius: config.hub_corner_radius,
            fill: theme.palette.hub.clone(),
            stroke: Some(theme.node_stroke.clone()),
            stroke_width: 1.4,
        },
        Primitive::Text {
            x: node.x,
            y: node.y,
            lines: fitted.lines,
            font_size: fitted.font_size,
            line_height: fit.line_height,
            anchor: TextAnchor::Middle,
            fill: theme.hub_text_color.clone(),
        },
    ]
}

fn satellite_glyph(node: &NodeLayout, theme: &Theme, config: &LayoutConfig) -> Vec<Primitive> {
    let label_offset = config.node_radius + config.label_gap;
    // Labels face away from the hub.
    let (label_x, anchor) = if node.category == NodeCategory::Inflow {
        (node.x - label_offset, TextAnchor::End)
    } else {
        (node.x + label_offset, TextAnchor::Start)
    };
    vec![
        Primitive::Circle {
            cx: node.x,
            cy: node.y,
            r: config.node_radius,
            fill: theme.palette.color(node.category).to_string(),
            stroke: Some(theme.node_stroke.clone()),
            stroke_width: 1.2,
        },
        Primitive::Text {
            x: label_x,
            y: node.y,
            lines: vec![node.label.clone()],
            font_size: theme.label_font_size,
            line_height: 1.2,
            anchor,
            fill: theme.text_color.clone(),
        },
    ]
}

fn legend_origin(layout: &LaidOutGraph, config: &LayoutConfig) -> (f32, f32) {
    let x = layout.rightmost_node_x().unwrap_or(0.0) + config.legend_offset_x;
    let y = layout.lowest_node_y().unwrap_or(0.0) + config.legend_offset_y;
    (x, y)
}

/// Legend box followed by one swatch and label per category, in canonical
/// order. The first primitive is always the enclosing box.
fn legend_block(origin: (f32, f32), theme: &Theme, config: &LayoutConfig) -> Vec<Primitive> {
    let (x, y) = origin;
    let pad = config.legend_padding;
    let row = config.legend_row_height;
    let swatch = config.legend_swatch_size;
    let height = pad * 2.0 + row * NodeCategory::ALL.len() as f32;

    let mut primitives = vec![Primitive::Rect {
        x,
        y,
        width: config.legend_width,
        height,
        corner_radius: 6.0,
        fill: theme.legend_background.clone(),
        stroke: Some(theme.legend_border.clone()),
        stroke_width: 1.0,
    }];

    for (idx, category) in NodeCategory::ALL.iter().enumerate() {
        let row_center = y + pad + row * idx as f32 + row / 2.0;
        let color = theme.palette.color(*category).to_string();
        let swatch_primitive = if *category == NodeCategory::Hub {
            Primitive::Rect {
                x: x + pad,
                y: row_center - swatch / 2.0,
                width: swatch,
                height: swatch,
                corner_radius: 2.0,
                fill: color,
                stroke: None,
                stroke_width: 0.0,
            }
        } else {
            Primitive::Circle {
                cx: x + pad + swatch / 2.0,
                cy: row_center,
                r: swatch / 2.0,
                fill: color,
                stroke: None,
                stroke_width: 0.0,
            }
        };
        primitives.push(swatch_primitive);
        primitives.push(Primitive::Text {
            x: x + pad + swatch + 8.0,
            y: row_center,
            lines: vec![theme.legend_labels.label(*category).to_string()],
            font_size: theme.legend_font_size,
            line_height: 1.2,
            anchor: TextAnchor::Start,
            fill: theme.text_color.clone(),
        });
    }
    primitives
}
