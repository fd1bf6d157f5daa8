use eframe::egui::{self, Align2, Color32, FontId, Sense, Ui, vec2};

use super::super::ViewModel;
use super::super::painter::PainterSurface;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        let mut surface = PainterSurface::new(&painter, rect.min);

        let mut events = Vec::new();
        events.extend(self.resize_event(rect));
        events.extend(self.pending.drain(..));
        events.extend(self.pointer_events(rect, &response));

        let rendered = self.apply_events(events, &mut surface);

        // egui repaints every frame, so an idle frame still needs the picture.
        if !rendered {
            self.graph.render(&mut surface);
        }
        surface.finish();

        if self.graph.nodes().is_empty() {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                "No datasets to show.",
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if self.graph.hover().is_active() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
    }
}
