use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

mod load;

pub use load::{demo_graph, load_graph_file, parse_graph_json};

/// Stable node identifier. Not a position in the node list.
pub type NodeId = usize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub index: NodeId,
    pub label: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LinkType {
    Join,
    #[default]
    Other,
}

impl LinkType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Other => "other",
        }
    }
}

impl From<String> for LinkType {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("join") {
            Self::Join
        } else {
            Self::Other
        }
    }
}

impl From<LinkType> for String {
    fn from(value: LinkType) -> Self {
        value.as_str().to_owned()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, alias = "type")]
    pub link_type: LinkType,
    #[serde(default)]
    pub count: u64,
}

impl Edge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source, self.target)
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }

    /// The endpoint opposite `id`, if `id` is one of the endpoints.
    pub fn other_end(&self, id: NodeId) -> Option<NodeId> {
        if self.source == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Unordered identity of an edge: `(a, b)` and `(b, a)` produce the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn endpoints(self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }
}

impl Display for EdgeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default, alias = "links")]
    pub edges: Vec<Edge>,
}

impl GraphData {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        find_node(&self.nodes, id)
    }

    pub fn dangling_edge_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|edge| self.node(edge.source).is_none() || self.node(edge.target).is_none())
            .count()
    }
}

pub fn find_node(nodes: &[Node], id: NodeId) -> Option<&Node> {
    nodes.iter().find(|node| node.index == id)
}

pub fn contains_node(nodes: &[Node], id: NodeId) -> bool {
    find_node(nodes, id).is_some()
}

/// First edge joining `a` and `b` in either direction.
pub fn edge_between(edges: &[Edge], a: NodeId, b: NodeId) -> Option<&Edge> {
    let key = EdgeKey::new(a, b);
    edges.iter().find(|edge| edge.key() == key)
}

pub fn edges_between(edges: &[Edge], a: NodeId, b: NodeId) -> impl Iterator<Item = &Edge> {
    let key = EdgeKey::new(a, b);
    edges.iter().filter(move |edge| edge.key() == key)
}
