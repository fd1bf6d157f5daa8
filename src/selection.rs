use serde::Serialize;

use crate::graph::{Edge, Node, NodeId, contains_node, edge_between};

/// Zero, one or two selected endpoints. Each variant carries exactly as many
/// ids as its level, so the level and the ids can never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    One {
        first: NodeId,
    },
    Two {
        first: NodeId,
        second: NodeId,
    },
}

impl Selection {
    /// Builds a state from two optional ids. A lone id becomes `first`
    /// whichever slot it came from; the same id twice selects it once.
    pub fn from_ids(first: Option<NodeId>, second: Option<NodeId>) -> Self {
        match (first, second) {
            (None, None) => Self::Empty,
            (Some(first), None) | (None, Some(first)) => Self::One { first },
            (Some(first), Some(second)) if first == second => Self::One { first },
            (Some(first), Some(second)) => Self::Two { first, second },
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::One { .. } => 1,
            Self::Two { .. } => 2,
        }
    }

    pub fn first(&self) -> Option<NodeId> {
        match *self {
            Self::Empty => None,
            Self::One { first } | Self::Two { first, .. } => Some(first),
        }
    }

    pub fn second(&self) -> Option<NodeId> {
        match *self {
            Self::Two { second, .. } => Some(second),
            Self::Empty | Self::One { .. } => None,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.first() == Some(id) || self.second() == Some(id)
    }

    pub fn click_node(self, id: NodeId) -> Self {
        match self {
            Self::Empty => Self::One { first: id },
            Self::One { first } if first == id => Self::Empty,
            Self::One { first } => Self::Two { first, second: id },
            // Deselecting the first endpoint promotes the second.
            Self::Two { first, second } if first == id => Self::One { first: second },
            Self::Two { first, second } if second == id => Self::One { first },
            Self::Two { .. } => Self::One { first: id },
        }
    }

    pub fn click_edge(self, edge: &Edge) -> Self {
        match self {
            Self::One { first } if edge.touches(first) => {
                Self::from_ids(Some(first), edge.other_end(first))
            }
            _ => Self::from_ids(Some(edge.source), Some(edge.target)),
        }
    }

    /// Rebuilds the state from externally supplied ids, dropping any id that
    /// does not name a node in `nodes`.
    pub fn from_external(first: Option<NodeId>, second: Option<NodeId>, nodes: &[Node]) -> Self {
        let valid = |id: Option<NodeId>| id.filter(|&id| contains_node(nodes, id));
        Self::from_ids(valid(first), valid(second))
    }
}

/// Turns free-form external input into an id. Anything other than a
/// non-negative integer is treated as no selection.
pub fn parse_external_id(raw: &str) -> Option<NodeId> {
    raw.trim().parse::<NodeId>().ok()
}

/// Notification sent after every click-driven transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SelectionChange {
    pub first: Option<NodeId>,
    pub second: Option<NodeId>,
    pub level: u8,
    pub has_edge: bool,
    pub link_count: u64,
}

impl SelectionChange {
    pub fn describe(selection: &Selection, edges: &[Edge]) -> Self {
        let link = match *selection {
            Selection::Two { first, second } => edge_between(edges, first, second),
            Selection::Empty | Selection::One { .. } => None,
        };

        Self {
            first: selection.first(),
            second: selection.second(),
            level: selection.level(),
            has_edge: link.is_some(),
            link_count: link.map_or(0, |edge| edge.count),
        }
    }
}
