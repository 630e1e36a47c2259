use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Hub,
    Inflow,
    Outflow,
    Associated,
}

impl NodeCategory {
    /// Canonical order used by the legend.
    pub const ALL: [NodeCategory; 4] = [
        NodeCategory::Hub,
        NodeCategory::Inflow,
        NodeCategory::Outflow,
        NodeCategory::Associated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Hub => "hub",
            NodeCategory::Inflow => "inflow",
            NodeCategory::Outflow => "outflow",
            NodeCategory::Associated => "associated",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "hub" => Some(Self::Hub),
            "inflow" | "inflows" => Some(Self::Inflow),
            "outflow" | "outflows" => Some(Self::Outflow),
            "associated" => Some(Self::Associated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub category: NodeCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_node(&mut self, id: &str, label: &str, category: NodeCategory) {
        self.nodes.push(Node {
            id: id.to_string(),
            label: label.to_string(),
            category,
        });
    }

    pub fn push_link(&mut self, source: &str, target: &str) {
        self.links.push(Link {
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    pub fn nodes_in(&self, category: NodeCategory) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.category == category)
    }
}
