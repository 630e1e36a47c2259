#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod scene;
pub mod session;
pub mod text_metrics;
pub mod theme;
pub mod viewport;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, TextFitConfig, ViewportConfig, load_config};
pub use ir::{Graph, Link, Node, NodeCategory};
pub use layout::{ContentBounds, LaidOutGraph, NodeLayout, compute_layout, fit_text, route_connector};
pub use parser::{Catalog, CatalogError, DiagramSource, load_catalog, parse_catalog, parse_diagram};
pub use render::render_svg;
pub use scene::{Primitive, Scene, SceneRole, build_scene};
pub use session::DiagramSession;
pub use text_metrics::{ApproxTextMeasure, FontTextMeasure, TextMeasure};
pub use theme::Theme;
pub use viewport::{ViewportController, ViewportTransform};

/// Parses, lays out and renders one diagram with the given config.
pub fn render_diagram_svg(source: &DiagramSource, config: &Config) -> String {
    let graph = parse_diagram(source);
    let layout = compute_layout(&graph, &config.layout);
    let measure = text_metrics::measurer(&config.theme.font_family, config.render.fast_text_metrics);
    let scene = build_scene(
        &layout,
        &config.theme,
        &config.layout,
        &config.fit,
        measure.as_ref(),
    );
    let viewport = ViewportController::new(&config.viewport);
    render_svg(&scene, &config.theme, Some(&viewport.transform()))
}
