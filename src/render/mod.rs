//! Turns a layout and a style map into drawing calls.
//!
//! Draw order matters: edges, then label connectors, then label text, then
//! node markers, so markers sit on top of everything that meets them.

use eframe::egui::{Color32, Pos2, Stroke, Vec2, pos2};

use crate::graph::{Edge, LinkType, Node, find_node};
use crate::layout::{LabelAlign, RingLayout};
use crate::style::{Palette, StyleMap};

mod recording;

pub use recording::{DrawOp, RecordingSurface};

pub const EDGE_WIDTH: f32 = 2.0;
pub const HIGHLIGHTED_EDGE_WIDTH: f32 = 3.0;
pub const CONNECTOR_WIDTH: f32 = 1.0;
pub const OUTLINE_WIDTH: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Drawing primitives supplied by the host.
pub trait Surface {
    /// Starts a new frame; everything drawn before is discarded.
    fn clear(&mut self, size: Vec2, background: Color32);
    fn polyline(&mut self, points: &[Pos2], stroke: Stroke, style: LineStyle);
    /// `pos` is the anchor; text is vertically centred on it.
    fn text(&mut self, pos: Pos2, align: LabelAlign, text: &str, color: Color32);
    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, outline: Stroke);
}

pub struct FrameInput<'a> {
    pub layout: &'a RingLayout,
    pub nodes: &'a [Node],
    pub edges: &'a [Edge],
    pub styles: &'a StyleMap,
    pub palette: &'a Palette,
}

pub fn render_frame<S: Surface + ?Sized>(surface: &mut S, frame: &FrameInput<'_>) {
    surface.clear(frame.layout.size, frame.palette.background);
    if frame.layout.is_empty() {
        return;
    }

    draw_edges(surface, frame);
    draw_label_connectors(surface, frame);
    draw_label_text(surface, frame);
    draw_markers(surface, frame);
}

fn draw_edges<S: Surface + ?Sized>(surface: &mut S, frame: &FrameInput<'_>) {
    for edge in frame.edges {
        let (Some(start), Some(end)) = (
            frame.layout.position_of(edge.source),
            frame.layout.position_of(edge.target),
        ) else {
            continue;
        };

        let stroke = match frame.styles.edge_color(edge) {
            Some(color) => Stroke::new(HIGHLIGHTED_EDGE_WIDTH, color),
            None => Stroke::new(EDGE_WIDTH, frame.palette.edge_default),
        };
        let style = match edge.link_type {
            LinkType::Join => LineStyle::Dashed,
            LinkType::Other => LineStyle::Solid,
        };
        surface.polyline(&[start, end], stroke, style);
    }
}

fn draw_label_connectors<S: Surface + ?Sized>(surface: &mut S, frame: &FrameInput<'_>) {
    let stroke = Stroke::new(CONNECTOR_WIDTH, frame.palette.connector);
    for label in &frame.layout.labels {
        let Some(node) = frame.layout.position_of(label.id) else {
            continue;
        };
        let elbow = pos2((label.pos.x + node.x) / 2.0, label.pos.y);
        surface.polyline(&[label.pos, elbow, node], stroke, LineStyle::Solid);
    }
}

fn draw_label_text<S: Surface + ?Sized>(surface: &mut S, frame: &FrameInput<'_>) {
    for label in &frame.layout.labels {
        let Some(node) = find_node(frame.nodes, label.id) else {
            continue;
        };
        surface.text(label.pos, label.align, &node.label, frame.palette.label);
    }
}

fn draw_markers<S: Surface + ?Sized>(surface: &mut S, frame: &FrameInput<'_>) {
    let outline = Stroke::new(OUTLINE_WIDTH, frame.palette.outline);
    for position in &frame.layout.positions {
        let fill = frame
            .styles
            .node_color(position.id)
            .unwrap_or(frame.palette.node_default);
        surface.circle(position.pos, frame.layout.marker_radius, fill, outline);
    }
}
