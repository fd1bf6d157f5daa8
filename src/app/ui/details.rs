use eframe::egui::{self, RichText, Ui};
use link_ring::graph::{Edge, EdgeKey, LinkType, NodeId, find_node};
use link_ring::selection::Selection;
use link_ring::widget::GraphEvent;
use tracing::info;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let selection = self.graph.selection();
        let summary = self.graph.describe_selection();
        ui.label(format!("Level: {}", summary.level));

        match selection {
            Selection::Empty => {
                ui.label("Click a dataset or a link in the graph, or pick one on the left.");
            }
            Selection::One { first } => {
                ui.label(RichText::new(self.node_label(first)).strong());
                ui.separator();
                self.draw_connections(ui);
            }
            Selection::Two { first, second } => {
                ui.label(RichText::new(self.node_label(first)).strong());
                ui.label(RichText::new(self.node_label(second)).strong());
                ui.separator();

                if summary.has_edge {
                    ui.label(format!("Linked ({} links)", summary.link_count));
                } else {
                    ui.label("Not linked");
                }

                ui.add_space(4.0);
                self.draw_links(ui, first, second);
            }
        }
    }

    fn draw_connections(&self, ui: &mut Ui) {
        let Some(connections) = self.graph.anchor_connections() else {
            return;
        };
        if connections.is_empty() {
            ui.label("No connected datasets.");
            return;
        }

        ui.label(RichText::new(format!("Direct ({})", connections.direct.len())).strong());
        for &id in &connections.direct {
            ui.label(format!("- {}", self.node_label(id)));
        }

        ui.add_space(4.0);
        ui.label(RichText::new(format!("Indirect ({})", connections.indirect.len())).strong());
        for &id in &connections.indirect {
            ui.label(format!("- {}", self.node_label(id)));
        }
    }

    fn draw_links(&mut self, ui: &mut Ui, first: NodeId, second: NodeId) {
        let links = self.links_between(first, second);
        let mut picked = None;

        ui.label(RichText::new("Links").strong());
        if links.is_empty() {
            ui.label("No links between these datasets.");
        }
        for &index in &links {
            let Some(edge) = self.graph.edges().get(index) else {
                continue;
            };
            let text = format!(
                "{} -> {}  [{}, count {}]",
                self.node_label(edge.source),
                self.node_label(edge.target),
                edge.link_type.as_str(),
                edge.count
            );
            if ui
                .selectable_label(self.selected_link == Some(index), text)
                .clicked()
            {
                picked = Some(index);
            }
        }
        if picked.is_some() {
            self.selected_link = picked;
        }

        let selected = self.selected_link.filter(|index| links.contains(index));
        let remove = ui
            .add_enabled(selected.is_some(), egui::Button::new("Remove link"))
            .on_hover_text("Delete the link picked above.");
        if remove.clicked()
            && let Some(index) = selected
        {
            self.remove_link(index);
        }

        ui.separator();
        ui.label(RichText::new("New link").strong());
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.new_link_type, LinkType::Join, "join");
            ui.selectable_value(&mut self.new_link_type, LinkType::Other, "other");
        });
        ui.horizontal(|ui| {
            ui.label("Count");
            ui.add(egui::DragValue::new(&mut self.new_link_count));
        });
        if ui.button("Add link").clicked() {
            self.add_link(first, second);
        }
    }

    /// Positions in the edge list of every link joining the pair.
    fn links_between(&self, first: NodeId, second: NodeId) -> Vec<usize> {
        let key = EdgeKey::new(first, second);
        self.graph
            .edges()
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.key() == key)
            .map(|(index, _)| index)
            .collect()
    }

    /// Edges as they will be once queued edits are applied.
    fn latest_edges(&self) -> Vec<Edge> {
        self.pending
            .iter()
            .rev()
            .find_map(|event| match event {
                GraphEvent::EdgesChanged(edges) => Some(edges.clone()),
                _ => None,
            })
            .unwrap_or_else(|| self.graph.edges().to_vec())
    }

    pub(in crate::app) fn add_link(&mut self, source: NodeId, target: NodeId) {
        let mut edges = self.latest_edges();
        edges.push(Edge {
            source,
            target,
            link_type: self.new_link_type,
            count: self.new_link_count,
        });
        self.selected_link = Some(edges.len() - 1);

        info!(
            source,
            target,
            link_type = self.new_link_type.as_str(),
            count = self.new_link_count,
            "link added"
        );
        self.pending.push_back(GraphEvent::EdgesChanged(edges));
    }

    pub(in crate::app) fn remove_link(&mut self, index: usize) {
        let mut edges = self.latest_edges();
        if index >= edges.len() {
            return;
        }
        let removed = edges.remove(index);
        self.selected_link = None;

        info!(link = %removed.key(), "link removed");
        self.pending.push_back(GraphEvent::EdgesChanged(edges));
    }

    fn node_label(&self, id: NodeId) -> String {
        find_node(self.graph.nodes(), id).map_or_else(|| format!("#{id}"), |node| node.label.clone())
    }
}
