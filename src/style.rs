use std::collections::{HashMap, HashSet};

use eframe::egui::Color32;

use crate::connectivity::find_connections;
use crate::graph::{Edge, EdgeKey, Node, NodeId, edge_between};
use crate::selection::Selection;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub node_default: Color32,
    pub node_selected: Color32,
    pub node_connected: Color32,
    pub node_disconnected: Color32,
    pub edge_default: Color32,
    pub edge_selected: Color32,
    pub edge_connected: Color32,
    pub connector: Color32,
    pub label: Color32,
    pub outline: Color32,
    pub background: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            node_default: Color32::from_rgb(77, 125, 158),
            node_selected: Color32::from_rgb(245, 206, 93),
            node_connected: Color32::from_rgb(241, 146, 94),
            node_disconnected: Color32::from_rgb(80, 90, 104),
            edge_default: Color32::from_rgb(142, 160, 184),
            edge_selected: Color32::from_rgb(246, 206, 104),
            edge_connected: Color32::from_rgb(241, 146, 94),
            connector: Color32::from_rgb(96, 104, 116),
            label: Color32::from_gray(238),
            outline: Color32::BLACK,
            background: Color32::from_rgb(19, 23, 29),
        }
    }
}

/// Colour overrides for the current selection. Anything absent is drawn with
/// the palette default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleMap {
    pub nodes: HashMap<NodeId, Color32>,
    pub edges: HashMap<EdgeKey, Color32>,
}

impl StyleMap {
    pub fn node_color(&self, id: NodeId) -> Option<Color32> {
        self.nodes.get(&id).copied()
    }

    pub fn edge_color(&self, edge: &Edge) -> Option<Color32> {
        self.edges.get(&edge.key()).copied()
    }
}

pub fn resolve_styles(
    selection: &Selection,
    nodes: &[Node],
    edges: &[Edge],
    palette: &Palette,
) -> StyleMap {
    let mut styles = StyleMap::default();

    match *selection {
        Selection::Empty => {}
        Selection::One { first } => {
            let reachable = find_connections(first, edges)
                .reachable()
                .collect::<HashSet<_>>();
            for node in nodes {
                let color = if node.index == first {
                    palette.node_selected
                } else if reachable.contains(&node.index) {
                    palette.node_connected
                } else {
                    palette.node_disconnected
                };
                styles.nodes.insert(node.index, color);
            }
            for edge in edges.iter().filter(|edge| edge.touches(first)) {
                styles.edges.insert(edge.key(), palette.edge_connected);
            }
        }
        Selection::Two { first, second } => {
            styles.nodes.insert(first, palette.node_selected);
            styles.nodes.insert(second, palette.node_selected);
            if let Some(edge) = edge_between(edges, first, second) {
                styles.edges.insert(edge.key(), palette.edge_selected);
            }
        }
    }

    styles
}
