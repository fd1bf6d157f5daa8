use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout, vec2};
use link_ring::graph::{GraphData, LinkType};
use link_ring::render::Surface;
use link_ring::selection::SelectionChange;
use link_ring::widget::{GraphEvent, LinkGraph};
use tracing::{info, warn};

use super::super::{AppConfig, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(data: GraphData, config: &AppConfig) -> Self {
        // Resized on the first frame once the canvas rect is known.
        let mut graph = LinkGraph::new(data, vec2(0.0, 0.0));
        if config.print_selection {
            graph.set_listener(print_selection_change);
        }

        let mut pending = VecDeque::new();
        if config.first.is_some() || config.second.is_some() {
            pending.push_back(GraphEvent::ExternalSelection {
                first: config.first,
                second: config.second,
            });
        }

        Self {
            graph,
            pending,
            first_search: String::new(),
            second_search: String::new(),
            last_change: None,
            new_link_type: LinkType::Join,
            new_link_count: 1,
            selected_link: None,
        }
    }

    /// Swaps in freshly loaded data through the node and edge change events,
    /// so selected datasets that still exist stay selected.
    pub(in crate::app) fn replace_graph(&mut self, data: GraphData) {
        info!(
            nodes = data.nodes.len(),
            edges = data.edges.len(),
            "graph reloaded"
        );
        self.selected_link = None;
        self.pending.push_back(GraphEvent::NodesChanged(data.nodes));
        self.pending.push_back(GraphEvent::EdgesChanged(data.edges));
    }

    /// Feeds `events` to the graph. Returns whether any of them drew a frame.
    pub(in crate::app) fn apply_events<S: Surface + ?Sized>(
        &mut self,
        events: impl IntoIterator<Item = GraphEvent>,
        surface: &mut S,
    ) -> bool {
        let mut rendered = false;
        for event in events {
            let outcome = self.graph.apply(event, surface);
            rendered |= outcome.rendered;
            if let Some(change) = outcome.change {
                self.last_change = Some(change);
            }
        }
        rendered
    }

    #[cfg(test)]
    pub(in crate::app) fn flush_pending<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let events = self.pending.drain(..).collect::<Vec<_>>();
        self.apply_events(events, surface)
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("link-ring");
                    ui.separator();
                    ui.label(format!("source: {source}"));
                    ui.label(format!("datasets: {}", self.graph.nodes().len()));
                    ui.label(format!("links: {}", self.graph.edges().len()));
                    let reload_button = ui.add_enabled(!is_loading, egui::Button::new("Reload"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(text) = self.last_change_text() {
                            ui.label(text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading dataset graph...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }

    pub(in crate::app) fn queue_selection(&mut self, event: GraphEvent) {
        self.pending.push_back(event);
    }

    fn last_change_text(&self) -> Option<String> {
        let change = self.last_change?;
        let text = match (change.first, change.second) {
            (None, _) => "last click: cleared".to_owned(),
            (Some(first), None) => format!("last click: {first}"),
            (Some(first), Some(second)) if change.has_edge => {
                format!("last click: {first} - {second} ({} links)", change.link_count)
            }
            (Some(first), Some(second)) => format!("last click: {first} - {second} (unlinked)"),
        };
        Some(text)
    }
}

fn print_selection_change(change: &SelectionChange) {
    match serde_json::to_string(change) {
        Ok(line) => println!("{line}"),
        Err(error) => warn!(%error, "failed to encode selection change"),
    }
}

#[cfg(test)]
mod tests {
    use link_ring::graph::{GraphData, demo_graph};
    use link_ring::render::RecordingSurface;
    use link_ring::selection::Selection;
    use link_ring::widget::GraphEvent;

    use super::super::super::{AppConfig, ViewModel};

    fn config() -> AppConfig {
        AppConfig {
            graph_path: None,
            first: None,
            second: None,
            print_selection: false,
        }
    }

    fn model_with_pair(first: usize, second: usize) -> (ViewModel, RecordingSurface) {
        let mut model = ViewModel::new(demo_graph(), &config());
        let mut surface = RecordingSurface::default();
        model.queue_selection(GraphEvent::ExternalSelection {
            first: Some(first),
            second: Some(second),
        });
        model.flush_pending(&mut surface);
        (model, surface)
    }

    #[test]
    fn startup_ids_are_applied_on_the_first_frame() {
        let config = AppConfig {
            first: Some(2),
            second: Some(40),
            ..config()
        };
        let mut model = ViewModel::new(demo_graph(), &config);
        let mut surface = RecordingSurface::default();

        assert!(model.flush_pending(&mut surface));
        assert_eq!(model.graph.selection(), Selection::One { first: 2 });
    }

    #[test]
    fn reload_with_same_data_keeps_the_selection() {
        let (mut model, mut surface) = model_with_pair(1, 3);

        model.replace_graph(demo_graph());
        assert!(model.flush_pending(&mut surface));

        assert_eq!(model.graph.selection(), Selection::Two { first: 1, second: 3 });
        assert_eq!(model.graph.nodes().len(), demo_graph().nodes.len());
    }

    #[test]
    fn reload_drops_datasets_that_vanished() {
        let (mut model, mut surface) = model_with_pair(1, 3);

        let mut data = demo_graph();
        data.nodes.retain(|node| node.index != 3);
        data.edges.retain(|edge| !edge.touches(3));
        let remaining_edges = data.edges.len();
        model.replace_graph(data);
        model.flush_pending(&mut surface);

        assert_eq!(model.graph.selection(), Selection::One { first: 1 });
        assert_eq!(model.graph.edges().len(), remaining_edges);
        assert!(model.graph.layout().position_of(3).is_none());
    }

    #[test]
    fn reload_to_an_empty_graph_clears_everything() {
        let (mut model, mut surface) = model_with_pair(0, 1);

        model.replace_graph(GraphData::default());
        model.flush_pending(&mut surface);

        assert_eq!(model.graph.selection(), Selection::Empty);
        assert!(model.graph.layout().is_empty());
    }
}
