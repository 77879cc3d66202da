use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::archetype::{Archetype, DEFAULT_NODE_COLOR};

/// Canonical identifier for the `n`th player: `P` plus at least three digits.
#[must_use]
pub fn format_node_id(number: u32) -> String {
    format!("P{number:03}")
}

/// One player in the ecosystem graph.
///
/// Field order is the serialized order consumed by the front end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub segment: String,
    pub archetype: Vec<Archetype>,
    pub color: String,
    pub description: String,
    pub market_size: String,
    pub business_model: String,
    /// Authored references to other players.
    pub outbound: Vec<String>,
    /// Derived from every other node's `outbound`; never authored.
    pub inbound: Vec<String>,
}

impl Node {
    /// A node with every attribute at its default.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            segment: String::new(),
            archetype: Vec::new(),
            color: DEFAULT_NODE_COLOR.to_string(),
            description: String::new(),
            market_size: String::new(),
            business_model: String::new(),
            outbound: Vec::new(),
            inbound: Vec::new(),
        }
    }

    /// Replace the archetype list and recolor from the first match.
    ///
    /// An empty match list leaves the current color untouched.
    pub fn set_archetypes(&mut self, archetypes: Vec<Archetype>) {
        if let Some(first) = archetypes.first() {
            self.color = first.color().to_string();
        }
        self.archetype = archetypes;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    #[default]
    Outbound,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
}

impl Link {
    #[must_use]
    pub fn outbound(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: LinkKind::Outbound,
        }
    }
}

/// The `{nodes, links}` document handed to the force-directed view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl GraphDocument {
    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Pretty-printed JSON using `indent` spaces per level, without a trailing newline.
    pub fn to_pretty_json(&self, indent: usize) -> Result<Vec<u8>, serde_json::Error> {
        let indent = " ".repeat(indent);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        Ok(buffer)
    }
}
