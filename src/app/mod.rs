use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use link_ring::graph::{GraphData, LinkType, NodeId, demo_graph, load_graph_file};
use link_ring::selection::SelectionChange;
use link_ring::widget::{GraphEvent, LinkGraph};
use tracing::warn;

mod graph;
mod painter;
mod ui;

type LoadResult = Result<GraphData, String>;

/// Start-up options collected from the command line.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub graph_path: Option<PathBuf>,
    pub first: Option<NodeId>,
    pub second: Option<NodeId>,
    pub print_selection: bool,
}

pub struct LinkRingApp {
    config: AppConfig,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: LinkGraph,
    /// Events waiting for the next frame's drawing surface.
    pending: VecDeque<GraphEvent>,
    first_search: String,
    second_search: String,
    last_change: Option<SelectionChange>,
    new_link_type: LinkType,
    new_link_count: u64,
    /// Index into the graph's edges of the link picked in the details panel.
    selected_link: Option<usize>,
}

impl LinkRingApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let state = Self::start_load(config.graph_path.clone());
        Self {
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(path: Option<PathBuf>) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = match path {
                Some(path) => load_graph_file(&path).map_err(|error| format!("{error:#}")),
                None => Ok(demo_graph()),
            };
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(path: Option<PathBuf>) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(path),
        }
    }

    fn source_label(&self) -> String {
        self.config
            .graph_path
            .as_ref()
            .map_or_else(|| "demo graph".to_owned(), |path| path.display().to_string())
    }

    /// State after the first load. Reloads of a ready view go through
    /// [`ViewModel::replace_graph`] instead, so the selection survives.
    fn ready_state(&self, result: LoadResult) -> AppState {
        match result {
            Ok(data) => AppState::Ready(Box::new(ViewModel::new(data, &self.config))),
            Err(error) => {
                warn!(%error, "graph load failed");
                AppState::Error(error)
            }
        }
    }
}

impl eframe::App for LinkRingApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let source = self.source_label();

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(result),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading dataset graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the dataset graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
                if retry {
                    self.state = Self::start_load(self.config.graph_path.clone());
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &source, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.config.graph_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(data)) => {
                            model.replace_graph(data);
                            ctx.request_repaint();
                        }
                        Ok(Err(error)) => transition = Some(Err(error)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = self.ready_state(result);
        }
    }
}
