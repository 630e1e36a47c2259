use crate::ir::NodeCategory;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Distance from the hub to each satellite column.
    pub horizontal_spacing: f32,
    /// Distance between consecutive nodes of one column group.
    pub vertical_spacing: f32,
    pub hub_width: f32,
    pub hub_height: f32,
    pub hub_corner_radius: f32,
    pub hub_text_padding: f32,
    pub node_radius: f32,
    pub label_gap: f32,
    pub content_padding: f32,
    /// Extra room on the right edge of the content bounds for the legend.
    pub legend_margin: f32,
    pub legend_offset_x: f32,
    pub legend_offset_y: f32,
    pub legend_width: f32,
    pub legend_padding: f32,
    pub legend_row_height: f32,
    pub legend_swatch_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 300.0,
            vertical_spacing: 80.0,
            hub_width: 200.0,
            hub_height: 110.0,
            hub_corner_radius: 12.0,
            hub_text_padding: 12.0,
            node_radius: 14.0,
            label_gap: 8.0,
            content_padding: 80.0,
            legend_margin: 200.0,
            legend_offset_x: 40.0,
            legend_offset_y: 60.0,
            legend_width: 180.0,
            legend_padding: 10.0,
            legend_row_height: 22.0,
            legend_swatch_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextFitConfig {
    pub max_font_size: f32,
    pub min_font_size: f32,
    pub font_size_step: f32,
    pub line_height: f32,
}

impl Default for TextFitConfig {
    fn default() -> Self {
        Self {
            max_font_size: 20.0,
            min_font_size: 8.0,
            font_size_step: 1.0,
            line_height: 1.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub initial_scale: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    /// Scale change per wheel delta unit, applied exponentially.
    pub wheel_sensitivity: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            initial_scale: 0.8,
            min_scale: 0.3,
            max_scale: 3.0,
            zoom_in_factor: 1.3,
            zoom_out_factor: 1.0 / 1.3,
            wheel_sensitivity: 0.0015,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    /// Skip system font lookup and use per-character width estimates.
    pub fast_text_metrics: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            fast_text_metrics: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub fit: TextFitConfig,
    pub viewport: ViewportConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            fit: TextFitConfig::default(),
            viewport: ViewportConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    label_font_size: Option<f32>,
    legend_font_size: Option<f32>,
    text_color: Option<String>,
    hub_text_color: Option<String>,
    node_stroke: Option<String>,
    legend_background: Option<String>,
    legend_border: Option<String>,
    connector_dasharray: Option<String>,
    connector_width: Option<f32>,
    background: Option<String>,
    hub_color: Option<String>,
    inflow_color: Option<String>,
    outflow_color: Option<String>,
    associated_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    horizontal_spacing: Option<f32>,
    vertical_spacing: Option<f32>,
    hub_width: Option<f32>,
    hub_height: Option<f32>,
    node_radius: Option<f32>,
    content_padding: Option<f32>,
    legend_margin: Option<f32>,
    legend_offset_x: Option<f32>,
    legend_offset_y: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextFitConfigFile {
    max_font_size: Option<f32>,
    min_font_size: Option<f32>,
    font_size_step: Option<f32>,
    line_height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewportConfigFile {
    initial_scale: Option<f32>,
    min_scale: Option<f32>,
    max_scale: Option<f32>,
    zoom_in_factor: Option<f32>,
    zoom_out_factor: Option<f32>,
    wheel_sensitivity: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    fast_text_metrics: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    text_fit: Option<TextFitConfigFile>,
    viewport: Option<ViewportConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::from_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme '{theme_name}'"))?;
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config, vars);
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        override_f32(&mut target.horizontal_spacing, layout.horizontal_spacing);
        override_f32(&mut target.vertical_spacing, layout.vertical_spacing);
        override_f32(&mut target.hub_width, layout.hub_width);
        override_f32(&mut target.hub_height, layout.hub_height);
        override_f32(&mut target.node_radius, layout.node_radius);
        override_f32(&mut target.content_padding, layout.content_padding);
        override_f32(&mut target.legend_margin, layout.legend_margin);
        override_f32(&mut target.legend_offset_x, layout.legend_offset_x);
        override_f32(&mut target.legend_offset_y, layout.legend_offset_y);
    }

    if let Some(fit) = parsed.text_fit {
        let target = &mut config.fit;
        override_f32(&mut target.max_font_size, fit.max_font_size);
        override_f32(&mut target.min_font_size, fit.min_font_size);
        override_f32(&mut target.font_size_step, fit.font_size_step);
        override_f32(&mut target.line_height, fit.line_height);
    }

    if let Some(viewport) = parsed.viewport {
        let target = &mut config.viewport;
        override_f32(&mut target.initial_scale, viewport.initial_scale);
        override_f32(&mut target.min_scale, viewport.min_scale);
        override_f32(&mut target.max_scale, viewport.max_scale);
        override_f32(&mut target.zoom_in_factor, viewport.zoom_in_factor);
        override_f32(&mut target.zoom_out_factor, viewport.zoom_out_factor);
        override_f32(&mut target.wheel_sensitivity, viewport.wheel_sensitivity);
    }

    if let Some(render) = parsed.render {
        override_f32(&mut config.render.width, render.width);
        override_f32(&mut config.render.height, render.height);
        if let Some(v) = render.fast_text_metrics {
            config.render.fast_text_metrics = v;
        }
    }

    Ok(config)
}

fn apply_theme_variables(config: &mut Config, vars: ThemeVariables) {
    let theme = &mut config.theme;
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    override_f32(&mut theme.label_font_size, vars.label_font_size);
    override_f32(&mut theme.legend_font_size, vars.legend_font_size);
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
    if let Some(v) = vars.hub_text_color {
        theme.hub_text_color = v;
    }
    if let Some(v) = vars.node_stroke {
        theme.node_stroke = v;
    }
    if let Some(v) = vars.legend_background {
        theme.legend_background = v;
    }
    if let Some(v) = vars.legend_border {
        theme.legend_border = v;
    }
    if let Some(v) = vars.connector_dasharray {
        theme.connector_dasharray = v;
    }
    override_f32(&mut theme.connector_width, vars.connector_width);
    if let Some(v) = vars.background {
        theme.background = v;
    }
    let colors = [
        (NodeCategory::Hub, vars.hub_color),
        (NodeCategory::Inflow, vars.inflow_color),
        (NodeCategory::Outflow, vars.outflow_color),
        (NodeCategory::Associated, vars.associated_color),
    ];
    for (category, color) in colors {
        if let Some(color) = color {
            config.theme.palette.set(category, color);
        }
    }
}

fn override_f32(target: &mut f32, value: Option<f32>) {
    if let Some(value) = value
        && value.is_finite()
    {
        *target = value;
    }
}
