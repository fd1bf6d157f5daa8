use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use link_ring::layout::LabelAlign;
use link_ring::render::{LineStyle, Surface};

const LABEL_FONT_SIZE: f32 = 12.0;
const DASH_LENGTH: f32 = 6.0;
const GAP_LENGTH: f32 = 4.0;

/// Collects one frame of shapes in canvas-local coordinates and hands them to
/// an egui painter on [`PainterSurface::finish`]. Clearing drops whatever an
/// earlier render in the same frame produced.
pub(super) struct PainterSurface<'p> {
    painter: &'p Painter,
    origin: Pos2,
    shapes: Vec<Shape>,
}

impl<'p> PainterSurface<'p> {
    pub(super) fn new(painter: &'p Painter, origin: Pos2) -> Self {
        Self {
            painter,
            origin,
            shapes: Vec::new(),
        }
    }

    pub(super) fn finish(self) {
        self.painter.extend(self.shapes);
    }

    fn to_screen(&self, local: Pos2) -> Pos2 {
        self.origin + local.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, size: Vec2, background: Color32) {
        self.shapes.clear();
        self.shapes.push(Shape::rect_filled(
            Rect::from_min_size(self.origin, size),
            0.0,
            background,
        ));
    }

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke, style: LineStyle) {
        let points = points
            .iter()
            .map(|&point| self.to_screen(point))
            .collect::<Vec<_>>();

        match style {
            LineStyle::Dashed => {
                self.shapes
                    .extend(Shape::dashed_line(&points, stroke, DASH_LENGTH, GAP_LENGTH));
            }
            LineStyle::Solid => self.shapes.push(Shape::line(points, stroke)),
        }
    }

    fn text(&mut self, pos: Pos2, align: LabelAlign, text: &str, color: Color32) {
        let anchor = match align {
            LabelAlign::Left => Align2::LEFT_CENTER,
            LabelAlign::Right => Align2::RIGHT_CENTER,
        };
        let galley = self.painter.layout_no_wrap(
            text.to_owned(),
            FontId::proportional(LABEL_FONT_SIZE),
            color,
        );
        let rect = anchor.anchor_size(self.to_screen(pos), galley.size());
        self.shapes.push(Shape::galley(rect.min, galley, color));
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, outline: Stroke) {
        let center = self.to_screen(center);
        self.shapes.push(Shape::circle_filled(center, radius, fill));
        self.shapes.push(Shape::circle_stroke(center, radius, outline));
    }
}
