use eframe::egui::{self, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use link_ring::graph::{Node, NodeId};
use link_ring::widget::GraphEvent;

use super::super::ViewModel;

#[derive(Clone, Copy)]
enum Slot {
    First,
    Second,
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Nodes matching `query`, best match first. An empty query keeps every node
/// in its original order.
fn ranked_nodes<'a>(nodes: &'a [Node], query: &str) -> Vec<&'a Node> {
    let query = query.trim();
    if query.is_empty() {
        return nodes.iter().collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = nodes
        .iter()
        .filter_map(|node| fuzzy_match_score(&matcher, &node.label, query).map(|score| (score, node)))
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.label.cmp(&b.1.label)));
    scored.into_iter().map(|(_, node)| node).collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Datasets");
        ui.separator();
        ui.add_space(4.0);

        let selection = self.graph.selection();
        let mut picked = None;

        ui.label("Dataset 1")
            .on_hover_text("First endpoint of the link. Also set by clicking the graph.");
        ui.text_edit_singleline(&mut self.first_search);
        if let Some(id) = self.draw_picker(ui, Slot::First, selection.first()) {
            picked = Some((Slot::First, id));
        }

        ui.add_space(8.0);
        ui.label("Dataset 2")
            .on_hover_text("Second endpoint of the link. Also set by clicking the graph.");
        ui.text_edit_singleline(&mut self.second_search);
        if let Some(id) = self.draw_picker(ui, Slot::Second, selection.second()) {
            picked = Some((Slot::Second, id));
        }

        ui.add_space(8.0);
        if ui.button("Clear").clicked() {
            self.queue_selection(GraphEvent::ExternalSelection {
                first: None,
                second: None,
            });
        }

        if let Some((slot, id)) = picked {
            let (first, second) = match slot {
                Slot::First => (Some(id), selection.second()),
                Slot::Second => (selection.first(), Some(id)),
            };
            self.queue_selection(GraphEvent::ExternalSelection { first, second });
        }
    }

    fn draw_picker(&self, ui: &mut Ui, slot: Slot, current: Option<NodeId>) -> Option<NodeId> {
        let (query, scroll_id) = match slot {
            Slot::First => (self.first_search.as_str(), "dataset_1_picker"),
            Slot::Second => (self.second_search.as_str(), "dataset_2_picker"),
        };
        let rows = ranked_nodes(self.graph.nodes(), query);
        let mut picked = None;

        egui::ScrollArea::vertical()
            .id_salt(scroll_id)
            .max_height(180.0)
            .auto_shrink([false, true])
            .show_rows(ui, 22.0, rows.len(), |ui, row_range| {
                for index in row_range {
                    let Some(node) = rows.get(index) else {
                        continue;
                    };
                    let is_selected = current == Some(node.index);
                    if ui.selectable_label(is_selected, node.label.as_str()).clicked() {
                        picked = Some(node.index);
                    }
                }
            });

        picked
    }
}
