use eframe::egui::{self, Pos2, Rect};
use link_ring::widget::GraphEvent;

use super::super::ViewModel;

/// Canvas-local coordinates, with the canvas rect's top-left corner at zero.
fn to_local(rect: Rect, screen: Pos2) -> Pos2 {
    (screen - rect.min).to_pos2()
}

impl ViewModel {
    pub(in crate::app) fn resize_event(&self, rect: Rect) -> Option<GraphEvent> {
        (rect.size() != self.graph.layout().size).then(|| GraphEvent::Resized(rect.size()))
    }

    pub(in crate::app) fn pointer_events(
        &self,
        rect: Rect,
        response: &egui::Response,
    ) -> Vec<GraphEvent> {
        let mut events = Vec::new();

        match response.hover_pos() {
            Some(pointer) => events.push(GraphEvent::PointerMoved(to_local(rect, pointer))),
            None if self.graph.hover().is_active() => events.push(GraphEvent::PointerLeft),
            None => {}
        }

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            events.push(GraphEvent::Clicked(to_local(rect, pointer)));
        }

        events
    }
}
