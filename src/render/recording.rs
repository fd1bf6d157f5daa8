use eframe::egui::{Color32, Pos2, Stroke, Vec2};

use super::{LineStyle, Surface};
use crate::layout::LabelAlign;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear {
        size: Vec2,
        background: Color32,
    },
    Line {
        points: Vec<Pos2>,
        stroke: Stroke,
        style: LineStyle,
    },
    Text {
        pos: Pos2,
        align: LabelAlign,
        text: String,
        color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        fill: Color32,
        outline: Stroke,
    },
}

/// Keeps the calls of the latest frame as plain values, so frames can be
/// compared or inspected without a real drawing backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    pub frames: usize,
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: Vec2, background: Color32) {
        self.ops.clear();
        self.frames += 1;
        self.ops.push(DrawOp::Clear { size, background });
    }

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke, style: LineStyle) {
        self.ops.push(DrawOp::Line {
            points: points.to_vec(),
            stroke,
            style,
        });
    }

    fn text(&mut self, pos: Pos2, align: LabelAlign, text: &str, color: Color32) {
        self.ops.push(DrawOp::Text {
            pos,
            align,
            text: text.to_owned(),
            color,
        });
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, outline: Stroke) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            fill,
            outline,
        });
    }
}
