mod app;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use link_ring::selection::parse_external_id;
use tracing_subscriber::EnvFilter;

use crate::app::{AppConfig, LinkRingApp};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with `nodes` and `edges`. A demo graph is shown without it.
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Node index selected first on start-up.
    #[arg(long)]
    first: Option<String>,

    /// Node index selected second on start-up.
    #[arg(long)]
    second: Option<String>,

    /// Print every selection change as a JSON line on stdout.
    #[arg(long)]
    print_selection: bool,
}

fn main() -> Result<()> {
    init_tracing()?;

    let args = Args::parse();
    let config = AppConfig {
        graph_path: args.graph,
        first: args.first.as_deref().and_then(parse_external_id),
        second: args.second.as_deref().and_then(parse_external_id),
        print_selection: args.print_selection,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "link-ring",
        options,
        Box::new(move |cc| Ok(Box::new(LinkRingApp::new(cc, config)))),
    )
    .map_err(|error| anyhow::anyhow!("failed to run the graph window: {error}"))
}

fn init_tracing() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,link_ring=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
