use serde::{Deserialize, Serialize};

use crate::ir::NodeCategory;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPalette {
    pub hub: String,
    pub inflow: String,
    pub outflow: String,
    pub associated: String,
}

impl CategoryPalette {
    pub fn color(&self, category: NodeCategory) -> &str {
        match category {
            NodeCategory::Hub => &self.hub,
            NodeCategory::Inflow => &self.inflow,
            NodeCategory::Outflow => &self.outflow,
            NodeCategory::Associated => &self.associated,
        }
    }

    /// Connector color communicates the flow type: links are colored by
    /// their target, except links into the hub which take the source color.
    pub fn connector_color(&self, source: NodeCategory, target: NodeCategory) -> &str {
        if target == NodeCategory::Hub {
            self.color(source)
        } else {
            self.color(target)
        }
    }

    pub fn set(&mut self, category: NodeCategory, color: String) {
        match category {
            NodeCategory::Hub => self.hub = color,
            NodeCategory::Inflow => self.inflow = color,
            NodeCategory::Outflow => self.outflow = color,
            NodeCategory::Associated => self.associated = color,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendLabels {
    pub hub: String,
    pub inflow: String,
    pub outflow: String,
    pub associated: String,
}

impl LegendLabels {
    pub fn label(&self, category: NodeCategory) -> &str {
        match category {
            NodeCategory::Hub => &self.hub,
            NodeCategory::Inflow => &self.inflow,
            NodeCategory::Outflow => &self.outflow,
            NodeCategory::Associated => &self.associated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub label_font_size: f32,
    pub legend_font_size: f32,
    pub text_color: String,
    pub hub_text_color: String,
    pub node_stroke: String,
    pub legend_background: String,
    pub legend_border: String,
    pub connector_dasharray: String,
    pub connector_width: f32,
    pub background: String,
    pub palette: CategoryPalette,
    pub legend_labels: LegendLabels,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            label_font_size: 14.0,
            legend_font_size: 13.0,
            text_color: "#333333".to_string(),
            hub_text_color: "#FFFFFF".to_string(),
            node_stroke: "#333333".to_string(),
            legend_background: "#FFFFFF".to_string(),
            legend_border: "#AAAAAA".to_string(),
            connector_dasharray: "6 4".to_string(),
            connector_width: 1.6,
            background: "#FFFFFF".to_string(),
            palette: CategoryPalette {
                hub: "#3F51B5".to_string(),
                inflow: "#2E7D32".to_string(),
                outflow: "#C62828".to_string(),
                associated: "#EF6C00".to_string(),
            },
            legend_labels: default_legend_labels(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            label_font_size: 13.0,
            legend_font_size: 12.0,
            text_color: "#1C2430".to_string(),
            hub_text_color: "#FFFFFF".to_string(),
            node_stroke: "#FFFFFF".to_string(),
            legend_background: "#F7FAFF".to_string(),
            legend_border: "#D7E0F0".to_string(),
            connector_dasharray: "5 4".to_string(),
            connector_width: 1.4,
            background: "#FFFFFF".to_string(),
            palette: CategoryPalette {
                hub: "#334155".to_string(),
                inflow: "#0EA5E9".to_string(),
                outflow: "#F43F5E".to_string(),
                associated: "#A855F7".to_string(),
            },
            legend_labels: default_legend_labels(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "classic" | "default" | "base" => Some(Self::classic()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

fn default_legend_labels() -> LegendLabels {
    LegendLabels {
        hub: "Primary entity".to_string(),
        inflow: "Inflows".to_string(),
        outflow: "Outflows".to_string(),
        associated: "Associated entities".to_string(),
    }
}
