use hubflow::{Config, Theme, parse_catalog, render_diagram_svg};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HubflowRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    label_font_size: Option<f32>,
    initial_scale: Option<f32>,
}

fn build_config(options: HubflowRenderOptions) -> Config {
    let mut config = Config::default();
    if let Some(theme) = options.theme.as_deref().and_then(Theme::from_name) {
        config.theme = theme;
    }
    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(font_size) = options.label_font_size {
        config.theme.label_font_size = font_size;
    }
    if let Some(scale) = options.initial_scale {
        config.viewport.initial_scale = scale;
    }
    // No system fonts inside the browser sandbox.
    config.render.fast_text_metrics = true;
    config
}

fn render(catalog_json: &str, diagram_id: &str, options: HubflowRenderOptions) -> Result<String, String> {
    let catalog = parse_catalog(catalog_json).map_err(|error| error.to_string())?;
    let source = catalog.find(diagram_id).map_err(|error| error.to_string())?;
    Ok(render_diagram_svg(source, &build_config(options)))
}

#[wasm_bindgen]
pub fn render_hubflow_svg(
    catalog_json: &str,
    diagram_id: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<HubflowRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        HubflowRenderOptions::default()
    };
    render(catalog_json, diagram_id, options).map_err(|error| JsValue::from_str(&error))
}
