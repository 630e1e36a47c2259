use crate::ir::{Graph, NodeCategory};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

static LIST_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid separator regex"));

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog: {0}")]
    Syntax(#[from] json5::Error),
    #[error("duplicate diagram identifier '{0}'")]
    DuplicateIdentifier(String),
    #[error("unknown diagram identifier '{0}'")]
    UnknownIdentifier(String),
}

/// One diagram as authored: a primary entity and three comma-separated
/// lists of satellites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramSource {
    pub identifier: String,
    pub display_name: String,
    #[serde(default, alias = "commaSeparatedInflows")]
    pub inflows: String,
    #[serde(default, alias = "commaSeparatedOutflows")]
    pub outflows: String,
    #[serde(default, alias = "commaSeparatedAssociated")]
    pub associated: String,
}

impl DiagramSource {
    pub fn hub_id(&self) -> String {
        format!("hub_{}", self.identifier)
    }
}

pub fn split_list(field: &str) -> Vec<&str> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    LIST_SEPARATOR
        .split(trimmed)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Builds the hub graph: inflows point at the hub, the hub points at every
/// outflow and associated entity.
pub fn parse_diagram(source: &DiagramSource) -> Graph {
    let mut graph = Graph::new();
    let hub_id = source.hub_id();
    graph.push_node(&hub_id, &source.display_name, NodeCategory::Hub);

    let fields = [
        (NodeCategory::Inflow, source.inflows.as_str()),
        (NodeCategory::Outflow, source.outflows.as_str()),
        (NodeCategory::Associated, source.associated.as_str()),
    ];
    for (category, field) in fields {
        for (idx, label) in split_list(field).into_iter().enumerate() {
            let id = format!("{}_{}_{}", category.as_str(), source.identifier, idx);
            graph.push_node(&id, label, category);
            if category == NodeCategory::Inflow {
                graph.push_link(&id, &hub_id);
            } else {
                graph.push_link(&hub_id, &id);
            }
        }
    }
    graph
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub diagrams: Vec<DiagramSource>,
}

impl Catalog {
    pub fn new(diagrams: Vec<DiagramSource>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for diagram in &diagrams {
            if !seen.insert(diagram.identifier.as_str()) {
                return Err(CatalogError::DuplicateIdentifier(diagram.identifier.clone()));
            }
        }
        Ok(Self { diagrams })
    }

    pub fn find(&self, identifier: &str) -> Result<&DiagramSource, CatalogError> {
        self.diagrams
            .iter()
            .find(|diagram| diagram.identifier == identifier)
            .ok_or_else(|| CatalogError::UnknownIdentifier(identifier.to_string()))
    }

    /// `(identifier, display name)` pairs for a selector.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.diagrams
            .iter()
            .map(|diagram| (diagram.identifier.as_str(), diagram.display_name.as_str()))
    }

    pub fn first(&self) -> Option<&DiagramSource> {
        self.diagrams.first()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { diagrams: Vec<DiagramSource> },
    Bare(Vec<DiagramSource>),
}

/// Accepts either `{ "diagrams": [...] }` or a bare array, in JSON5.
pub fn parse_catalog(input: &str) -> Result<Catalog, CatalogError> {
    let diagrams = match json5::from_str::<CatalogFile>(input)? {
        CatalogFile::Wrapped { diagrams } => diagrams,
        CatalogFile::Bare(diagrams) => diagrams,
    };
    Catalog::new(diagrams)
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    parse_catalog(&contents)
}
