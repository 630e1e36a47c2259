use crate::config::Config;
use crate::layout::{LaidOutGraph, compute_layout};
use crate::parser::{Catalog, CatalogError, parse_diagram};
use crate::render::render_svg;
use crate::scene::{Scene, build_scene};
use crate::text_metrics::{TextMeasure, measurer};
use crate::viewport::ViewportController;

struct Rendered {
    identifier: String,
    layout: LaidOutGraph,
    scene: Scene,
}

/// Tracks which catalog diagram is shown. Selecting a diagram rebuilds the
/// graph, layout and scene from scratch and resets the viewport.
pub struct DiagramSession {
    catalog: Catalog,
    config: Config,
    measure: Box<dyn TextMeasure>,
    viewport: ViewportController,
    current: Option<Rendered>,
}

impl DiagramSession {
    pub fn new(catalog: Catalog, config: Config) -> Self {
        let measure = measurer(&config.theme.font_family, config.render.fast_text_metrics);
        Self::with_measure(catalog, config, measure)
    }

    pub fn with_measure(catalog: Catalog, config: Config, measure: Box<dyn TextMeasure>) -> Self {
        let viewport = ViewportController::new(&config.viewport);
        Self {
            catalog,
            config,
            measure,
            viewport,
            current: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn select(&mut self, identifier: &str) -> Result<&Scene, CatalogError> {
        let source = self.catalog.find(identifier)?;
        let graph = parse_diagram(source);
        let layout = compute_layout(&graph, &self.config.layout);
        let scene = build_scene(
            &layout,
            &self.config.theme,
            &self.config.layout,
            &self.config.fit,
            self.measure.as_ref(),
        );
        tracing::debug!(identifier, nodes = layout.nodes().len(), "diagram selected");
        self.viewport.reset();
        let rendered = self.current.insert(Rendered {
            identifier: identifier.to_string(),
            layout,
            scene,
        });
        Ok(&rendered.scene)
    }

    pub fn selected(&self) -> Option<&str> {
        self.current.as_ref().map(|r| r.identifier.as_str())
    }

    pub fn layout(&self) -> Option<&LaidOutGraph> {
        self.current.as_ref().map(|r| &r.layout)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.current.as_ref().map(|r| &r.scene)
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    /// SVG of the current scene under the current viewport transform.
    pub fn render_svg(&self) -> Option<String> {
        let transform = self.viewport.transform();
        self.scene()
            .map(|scene| render_svg(scene, &self.config.theme, Some(&transform)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_catalog;
    use crate::text_metrics::ApproxTextMeasure;

    fn session() -> DiagramSession {
        let catalog = parse_catalog(
            r#"[
                { identifier: "1", displayName: "Acme", inflows: "a, b", outflows: "c" },
                { identifier: "2", displayName: "Globex", associated: "d" },
            ]"#,
        )
        .unwrap();
        DiagramSession::with_measure(catalog, Config::default(), Box::new(ApproxTextMeasure))
    }

    #[test]
    fn selecting_replaces_layout_and_resets_viewport() {
        let mut session = session();
        session.select("1").unwrap();
        assert_eq!(session.layout().unwrap().nodes().len(), 4);
        session.viewport_mut().zoom_in();
        session.viewport_mut().pan_by(10.0, 10.0);

        session.select("2").unwrap();
        assert_eq!(session.selected(), Some("2"));
        assert_eq!(session.layout().unwrap().nodes().len(), 2);
        assert!(session.layout().unwrap().node("inflow_1_0").is_none());
        assert_eq!(session.viewport().scale(), 0.8);
        assert_eq!(session.viewport().transform().translate_x, 0.0);
    }

    #[test]
    fn unknown_selection_keeps_previous_scene() {
        let mut session = session();
        session.select("1").unwrap();
        assert!(session.select("404").is_err());
        assert_eq!(session.selected(), Some("1"));
        assert!(session.render_svg().unwrap().contains("Acme"));
    }

    #[test]
    fn nothing_selected_renders_nothing() {
        assert!(session().render_svg().is_none());
    }
}
