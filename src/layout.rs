use std::f32::consts::TAU;

use eframe::egui::{Pos2, Vec2, pos2, vec2};

use crate::graph::{Node, NodeId};

/// Horizontal text alignment of a label relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelAlign {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePosition {
    pub pos: Pos2,
    pub id: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    pub pos: Pos2,
    pub id: NodeId,
    pub align: LabelAlign,
}

/// Nodes evenly spaced on a circle, labels stacked in two columns either side
/// of it. Rebuilt from scratch whenever the node list or the surface size
/// changes.
#[derive(Clone, Debug, PartialEq)]
pub struct RingLayout {
    pub size: Vec2,
    pub center: Pos2,
    pub radius: f32,
    pub marker_radius: f32,
    pub positions: Vec<NodePosition>,
    pub labels: Vec<LabelPlacement>,
}

impl RingLayout {
    pub fn compute(nodes: &[Node], size: Vec2) -> Self {
        let center = pos2(size.x / 2.0, size.y / 2.0);
        let radius = size.y / 3.0;
        let marker_radius = size.y / 30.0;

        let n = nodes.len();
        let positions = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let angle = TAU * i as f32 / n as f32;
                NodePosition {
                    pos: center + vec2(angle.cos(), angle.sin()) * radius,
                    id: node.index,
                }
            })
            .collect::<Vec<_>>();

        let labels = place_labels(&positions, center, radius, size.y);

        Self {
            size,
            center,
            radius,
            marker_radius,
            positions,
            labels,
        }
    }

    pub fn position_of(&self, id: NodeId) -> Option<Pos2> {
        self.positions
            .iter()
            .find(|position| position.id == id)
            .map(|position| position.pos)
    }

    pub fn label_of(&self, id: NodeId) -> Option<&LabelPlacement> {
        self.labels.iter().find(|label| label.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn place_labels(
    positions: &[NodePosition],
    center: Pos2,
    radius: f32,
    height: f32,
) -> Vec<LabelPlacement> {
    let (mut left, mut right): (Vec<NodePosition>, Vec<NodePosition>) = positions
        .iter()
        .copied()
        .partition(|position| position.pos.x < center.x);

    // Lowest node first, so it takes the slot nearest the bottom edge.
    left.sort_by(|a, b| b.pos.y.total_cmp(&a.pos.y));
    right.sort_by(|a, b| b.pos.y.total_cmp(&a.pos.y));

    let mut labels = Vec::with_capacity(positions.len());
    stack_column(&left, center.x - radius, LabelAlign::Right, height, &mut labels);
    stack_column(&right, center.x + radius, LabelAlign::Left, height, &mut labels);
    labels
}

fn stack_column(
    column: &[NodePosition],
    x: f32,
    align: LabelAlign,
    height: f32,
    labels: &mut Vec<LabelPlacement>,
) {
    let slots = column.len() as f32 + 1.0;
    for (k, position) in column.iter().enumerate() {
        let y = height - ((k as f32 + 1.0) / slots) * height;
        labels.push(LabelPlacement {
            pos: pos2(x, y),
            id: position.id,
            align,
        });
    }
}
