use eframe::egui::{Pos2, Vec2};
use tracing::{debug, info};

use crate::connectivity::{Connections, find_connections};
use crate::graph::{Edge, EdgeKey, GraphData, Node, NodeId};
use crate::hit_test::{Hit, resolve_hit};
use crate::layout::RingLayout;
use crate::render::{FrameInput, Surface, render_frame};
use crate::selection::{Selection, SelectionChange};
use crate::style::{Palette, StyleMap, resolve_styles};

/// Input changes the widget reacts to. Each maps to one state transition.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
    /// Relayouts and re-checks the selection. Selected ids missing from the
    /// new list are dropped without a [`SelectionChange`]; read
    /// [`LinkGraph::selection`] afterwards to see the result.
    NodesChanged(Vec<Node>),
    EdgesChanged(Vec<Edge>),
    Resized(Vec2),
    PointerMoved(Pos2),
    PointerLeft,
    Clicked(Pos2),
    ExternalSelection {
        first: Option<NodeId>,
        second: Option<NodeId>,
    },
}

/// What the pointer is over. Does not influence colours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    pub node: Option<NodeId>,
    pub edge: Option<EdgeKey>,
}

impl HoverState {
    fn from_hit(hit: Option<Hit<'_>>) -> Self {
        match hit {
            Some(Hit::Node(id)) => Self {
                node: Some(id),
                edge: None,
            },
            Some(Hit::Edge(edge)) => Self {
                node: None,
                edge: Some(edge.key()),
            },
            None => Self::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.node.is_some() || self.edge.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub rendered: bool,
    /// Set only for clicks, after the new state has been drawn.
    pub change: Option<SelectionChange>,
}

impl ApplyOutcome {
    fn rendered() -> Self {
        Self {
            rendered: true,
            change: None,
        }
    }
}

pub type SelectionListener = Box<dyn FnMut(&SelectionChange)>;

/// Owns the graph data and the three derived records (layout, selection,
/// hover), keeping them consistent across [`GraphEvent`]s.
pub struct LinkGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    layout: RingLayout,
    selection: Selection,
    hover: HoverState,
    palette: Palette,
    listener: Option<SelectionListener>,
}

impl LinkGraph {
    pub fn new(graph: GraphData, size: Vec2) -> Self {
        let layout = RingLayout::compute(&graph.nodes, size);
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
            layout,
            selection: Selection::Empty,
            hover: HoverState::default(),
            palette: Palette::default(),
            listener: None,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Called after every click, once the resulting frame has been drawn.
    pub fn set_listener(&mut self, listener: impl FnMut(&SelectionChange) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn styles(&self) -> StyleMap {
        resolve_styles(&self.selection, &self.nodes, &self.edges, &self.palette)
    }

    pub fn describe_selection(&self) -> SelectionChange {
        SelectionChange::describe(&self.selection, &self.edges)
    }

    /// Connections of the anchor when exactly one node is selected.
    pub fn anchor_connections(&self) -> Option<Connections> {
        match self.selection {
            Selection::One { first } => Some(find_connections(first, &self.edges)),
            Selection::Empty | Selection::Two { .. } => None,
        }
    }

    pub fn apply<S: Surface + ?Sized>(&mut self, event: GraphEvent, surface: &mut S) -> ApplyOutcome {
        match event {
            GraphEvent::NodesChanged(nodes) => {
                self.nodes = nodes;
                self.relayout(self.layout.size);
                self.revalidate_selection();
                self.render(surface);
                ApplyOutcome::rendered()
            }
            GraphEvent::EdgesChanged(edges) => {
                debug!(edges = edges.len(), "edges replaced");
                self.edges = edges;
                self.render(surface);
                ApplyOutcome::rendered()
            }
            GraphEvent::Resized(size) => {
                self.relayout(size);
                self.render(surface);
                ApplyOutcome::rendered()
            }
            GraphEvent::PointerMoved(point) => {
                self.hover = HoverState::from_hit(resolve_hit(&self.layout, &self.edges, point));
                ApplyOutcome::default()
            }
            GraphEvent::PointerLeft => {
                self.hover = HoverState::default();
                ApplyOutcome::default()
            }
            GraphEvent::Clicked(point) => {
                let change = self.click(point, surface);
                ApplyOutcome {
                    rendered: true,
                    change: Some(change),
                }
            }
            GraphEvent::ExternalSelection { first, second } => {
                let next = Selection::from_external(first, second, &self.nodes);
                debug!(?first, ?second, ?next, "external selection");
                self.selection = next;
                self.render(surface);
                ApplyOutcome::rendered()
            }
        }
    }

    /// Draws the current state. Safe to call any number of times.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let styles = self.styles();
        render_frame(
            surface,
            &FrameInput {
                layout: &self.layout,
                nodes: &self.nodes,
                edges: &self.edges,
                styles: &styles,
                palette: &self.palette,
            },
        );
    }

    fn click<S: Surface + ?Sized>(&mut self, point: Pos2, surface: &mut S) -> SelectionChange {
        let previous = self.selection;
        self.selection = match resolve_hit(&self.layout, &self.edges, point) {
            Some(Hit::Node(id)) => {
                debug!(node = id, "click hit node");
                previous.click_node(id)
            }
            Some(Hit::Edge(edge)) => {
                debug!(edge = %edge.key(), "click hit edge");
                previous.click_edge(edge)
            }
            None => Selection::Empty,
        };
        debug!(?previous, next = ?self.selection, "selection changed");

        self.render(surface);

        let change = self.describe_selection();
        if let Some(listener) = self.listener.as_mut() {
            listener(&change);
        }
        change
    }

    fn relayout(&mut self, size: Vec2) {
        self.layout = RingLayout::compute(&self.nodes, size);
        self.hover = HoverState::default();
        info!(
            nodes = self.nodes.len(),
            width = size.x,
            height = size.y,
            "layout recomputed"
        );
    }

    fn revalidate_selection(&mut self) {
        let next = Selection::from_external(
            self.selection.first(),
            self.selection.second(),
            &self.nodes,
        );
        if next != self.selection {
            debug!(previous = ?self.selection, ?next, "selection dropped missing nodes");
        }
        self.selection = next;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use eframe::egui::{Color32, Pos2, Stroke, Vec2, pos2, vec2};

    use super::{GraphEvent, HoverState, LinkGraph};
    use crate::graph::{Edge, EdgeKey, GraphData, LinkType, Node};
    use crate::layout::LabelAlign;
    use crate::render::{LineStyle, RecordingSurface, Surface};
    use crate::selection::Selection;

    fn graph(node_ids: &[usize], pairs: &[(usize, usize, u64)]) -> GraphData {
        GraphData {
            nodes: node_ids
                .iter()
                .map(|&index| Node {
                    index,
                    label: format!("set {index}"),
                })
                .collect(),
            edges: pairs
                .iter()
                .map(|&(source, target, count)| Edge {
                    source,
                    target,
                    link_type: LinkType::Join,
                    count,
                })
                .collect(),
        }
    }

    fn widget(node_ids: &[usize], pairs: &[(usize, usize, u64)]) -> LinkGraph {
        LinkGraph::new(graph(node_ids, pairs), vec2(800.0, 600.0))
    }

    fn node_pos(widget: &LinkGraph, id: usize) -> Pos2 {
        widget.layout().position_of(id).expect("node is laid out")
    }

    /// Logs frame starts into a log shared with a selection listener.
    struct LoggingSurface(Rc<RefCell<Vec<&'static str>>>);

    impl Surface for LoggingSurface {
        fn clear(&mut self, _size: Vec2, _background: Color32) {
            self.0.borrow_mut().push("frame");
        }
        fn polyline(&mut self, _points: &[Pos2], _stroke: Stroke, _style: LineStyle) {}
        fn text(&mut self, _pos: Pos2, _align: LabelAlign, _text: &str, _color: Color32) {}
        fn circle(&mut self, _center: Pos2, _radius: f32, _fill: Color32, _outline: Stroke) {}
    }

    #[test]
    fn click_renders_before_notifying() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut widget = widget(&[0, 1, 2], &[(0, 1, 2)]);
        let listener_log = Rc::clone(&log);
        widget.set_listener(move |_| listener_log.borrow_mut().push("notify"));

        let mut surface = LoggingSurface(Rc::clone(&log));
        let point = node_pos(&widget, 1);
        let outcome = widget.apply(GraphEvent::Clicked(point), &mut surface);

        assert!(outcome.rendered);
        assert_eq!(*log.borrow(), vec!["frame", "notify"]);
    }

    #[test]
    fn clicks_report_link_details() {
        let mut widget = widget(&[0, 1, 2], &[(0, 1, 2)]);
        let mut surface = RecordingSurface::default();

        let first = widget.apply(GraphEvent::Clicked(node_pos(&widget, 0)), &mut surface);
        let change = first.change.expect("click notifies");
        assert_eq!((change.level, change.first, change.second), (1, Some(0), None));

        let second = widget.apply(GraphEvent::Clicked(node_pos(&widget, 1)), &mut surface);
        let change = second.change.expect("click notifies");
        assert_eq!(change.level, 2);
        assert!(change.has_edge);
        assert_eq!(change.link_count, 2);
    }

    #[test]
    fn click_on_empty_space_clears() {
        let mut widget = widget(&[0, 1], &[]);
        let mut surface = RecordingSurface::default();
        widget.apply(GraphEvent::Clicked(node_pos(&widget, 0)), &mut surface);
        assert_eq!(widget.selection().level(), 1);

        let outcome = widget.apply(GraphEvent::Clicked(pos2(1.0, 1.0)), &mut surface);
        assert_eq!(widget.selection(), Selection::Empty);
        assert_eq!(outcome.change.map(|change| change.level), Some(0));
    }

    #[test]
    fn pointer_moves_update_hover_without_rendering() {
        let mut widget = widget(&[0, 1], &[(0, 1, 1)]);
        let mut surface = RecordingSurface::default();

        let outcome = widget.apply(GraphEvent::PointerMoved(node_pos(&widget, 1)), &mut surface);
        assert!(!outcome.rendered);
        assert_eq!(surface.frames, 0);
        assert_eq!(widget.hover().node, Some(1));

        let center = widget.layout().center;
        widget.apply(GraphEvent::PointerMoved(center), &mut surface);
        assert_eq!(
            widget.hover(),
            HoverState {
                node: None,
                edge: Some(EdgeKey::new(0, 1))
            }
        );

        widget.apply(GraphEvent::PointerLeft, &mut surface);
        assert!(!widget.hover().is_active());
        assert_eq!(surface.frames, 0);
    }

    #[test]
    fn external_selection_renders_without_notifying() {
        let notified = Rc::new(RefCell::new(0));
        let mut widget = widget(&[4, 9], &[]);
        let counter = Rc::clone(&notified);
        widget.set_listener(move |_| *counter.borrow_mut() += 1);

        let mut surface = RecordingSurface::default();
        let outcome = widget.apply(
            GraphEvent::ExternalSelection {
                first: Some(4),
                second: Some(9),
            },
            &mut surface,
        );

        assert!(outcome.rendered);
        assert!(outcome.change.is_none());
        assert_eq!(*notified.borrow(), 0);
        assert_eq!(widget.selection(), Selection::Two { first: 4, second: 9 });
    }

    #[test]
    fn node_changes_drop_vanished_selection_ids() {
        let mut widget = widget(&[0, 1, 2], &[]);
        let mut surface = RecordingSurface::default();
        widget.apply(
            GraphEvent::ExternalSelection {
                first: Some(0),
                second: Some(2),
            },
            &mut surface,
        );

        let remaining = graph(&[1, 2], &[]).nodes;
        let outcome = widget.apply(GraphEvent::NodesChanged(remaining), &mut surface);

        assert!(outcome.rendered);
        assert!(outcome.change.is_none());
        assert_eq!(widget.selection(), Selection::One { first: 2 });
        assert_eq!(widget.layout().positions.len(), 2);
    }

    #[test]
    fn edge_changes_keep_the_layout() {
        let mut widget = widget(&[0, 1, 2], &[]);
        let mut surface = RecordingSurface::default();
        let before = widget.layout().clone();

        let edges = graph(&[], &[(0, 2, 5)]).edges;
        let outcome = widget.apply(GraphEvent::EdgesChanged(edges), &mut surface);

        assert!(outcome.rendered);
        assert_eq!(widget.layout(), &before);
        assert_eq!(widget.edges().len(), 1);
    }

    #[test]
    fn resize_recomputes_the_layout() {
        let mut widget = widget(&[0, 1, 2], &[]);
        let mut surface = RecordingSurface::default();

        widget.apply(GraphEvent::Resized(vec2(400.0, 300.0)), &mut surface);

        assert_eq!(widget.layout().radius, 100.0);
        assert_eq!(widget.layout().center, pos2(200.0, 150.0));
        assert_eq!(surface.frames, 1);
    }

    #[test]
    fn anchor_connections_only_at_level_one() {
        let mut widget = widget(&[0, 1, 2, 3], &[(0, 1, 1), (1, 2, 1)]);
        let mut surface = RecordingSurface::default();
        assert!(widget.anchor_connections().is_none());

        widget.apply(GraphEvent::Clicked(node_pos(&widget, 0)), &mut surface);
        let connections = widget.anchor_connections().expect("one node selected");
        assert_eq!(connections.direct, vec![1]);
        assert_eq!(connections.indirect, vec![2]);
    }
}
