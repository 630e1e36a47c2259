use std::collections::HashSet;
use std::path::Path;

use hubflow::{
    ApproxTextMeasure, Config, DiagramSession, Graph, LayoutConfig, NodeCategory, Primitive,
    SceneRole, TextFitConfig, Theme, build_scene, compute_layout, load_catalog, parse_diagram,
    render_svg,
};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn catalog_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("catalog.json5")
}

fn graph(inflows: usize, outflows: usize, associated: usize) -> Graph {
    let mut graph = Graph::new();
    graph.push_node("hub_1", "Acme", NodeCategory::Hub);
    for (category, count) in [
        (NodeCategory::Inflow, inflows),
        (NodeCategory::Outflow, outflows),
        (NodeCategory::Associated, associated),
    ] {
        for idx in 0..count {
            let id = format!("{}_1_{idx}", category.as_str());
            graph.push_node(&id, &format!("{} {idx}", category.as_str()), category);
            if category == NodeCategory::Inflow {
                graph.push_link(&id, "hub_1");
            } else {
                graph.push_link("hub_1", &id);
            }
        }
    }
    graph
}

#[test]
fn render_all_catalog_diagrams() {
    let catalog = load_catalog(&catalog_path()).expect("catalog should load");
    let ids: Vec<String> = catalog.entries().map(|(id, _)| id.to_string()).collect();
    assert_eq!(ids.len(), 4);

    let mut config = Config::default();
    config.render.fast_text_metrics = true;
    let mut session = DiagramSession::new(catalog, config);
    for id in ids {
        session.select(&id).expect("catalog id should select");
        let svg = session.render_svg().expect("selected diagram renders");
        assert_valid_svg(&svg, &id);
    }
}

#[test]
fn mixed_columns_scenario() {
    let layout = compute_layout(&graph(3, 2, 3), &LayoutConfig::default());
    assert_eq!(layout.nodes().len(), 9);

    let positions: HashSet<(u32, u32)> = layout
        .nodes()
        .iter()
        .map(|node| (node.x.to_bits(), node.y.to_bits()))
        .collect();
    assert_eq!(positions.len(), 9, "two nodes share coordinates");

    let lowest_outflow = layout
        .nodes()
        .iter()
        .filter(|node| node.category == NodeCategory::Outflow)
        .map(|node| node.y)
        .fold(f32::MIN, f32::max);
    let highest_associated = layout
        .nodes()
        .iter()
        .filter(|node| node.category == NodeCategory::Associated)
        .map(|node| node.y)
        .fold(f32::MAX, f32::min);
    assert!(lowest_outflow < highest_associated);
}

#[test]
fn ghost_link_emits_no_path() {
    let mut input = graph(1, 0, 0);
    input.push_link("ghost", "hub_1");
    let config = LayoutConfig::default();
    let layout = compute_layout(&input, &config);
    let scene = build_scene(
        &layout,
        &Theme::classic(),
        &config,
        &TextFitConfig::default(),
        &ApproxTextMeasure,
    );
    let ghost = SceneRole::Link {
        source: "ghost".to_string(),
        target: "hub_1".to_string(),
    };
    assert_eq!(scene.items_for(&ghost).count(), 0);
    assert_eq!(scene.paths().count(), 1);
}

#[test]
fn lone_hub_scenario() {
    let config = LayoutConfig::default();
    let layout = compute_layout(&graph(0, 0, 0), &config);
    assert_eq!(layout.nodes().len(), 1);
    assert_eq!(layout.nodes()[0].position(), (0.0, 0.0));

    let pad = config.content_padding;
    assert_eq!(layout.bounds.min_x, -pad);
    assert_eq!(layout.bounds.min_y, -pad);
    assert_eq!(layout.bounds.max_x, pad + config.legend_margin);
    assert_eq!(layout.bounds.max_y, pad);

    let scene = build_scene(
        &layout,
        &Theme::classic(),
        &config,
        &TextFitConfig::default(),
        &ApproxTextMeasure,
    );
    let legend_rows = scene
        .items_for(&SceneRole::Legend)
        .filter(|item| matches!(item.primitive, Primitive::Text { .. }))
        .count();
    assert_eq!(legend_rows, 4);
    assert_eq!(scene.paths().count(), 0);
}

#[test]
fn empty_graph_renders_an_empty_scene() {
    let config = LayoutConfig::default();
    let layout = compute_layout(&Graph::new(), &config);
    let scene = build_scene(
        &layout,
        &Theme::modern(),
        &config,
        &TextFitConfig::default(),
        &ApproxTextMeasure,
    );
    assert!(
        scene
            .items
            .iter()
            .all(|item| item.role == SceneRole::Legend)
    );
    let svg = render_svg(&scene, &Theme::modern(), None);
    assert_valid_svg(&svg, "empty");
    assert!(!svg.contains("NaN"));
}

#[test]
fn layout_is_deterministic() {
    let catalog = load_catalog(&catalog_path()).unwrap();
    let source = catalog.find("1").unwrap();
    let config = LayoutConfig::default();
    let first = compute_layout(&parse_diagram(source), &config);
    let second = compute_layout(&parse_diagram(source), &config);
    assert_eq!(first.nodes(), second.nodes());
    assert_eq!(first.bounds, second.bounds);
}
