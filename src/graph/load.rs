use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::{info, warn};

use super::{Edge, GraphData, LinkType, Node};

pub fn load_graph_file(path: &Path) -> Result<GraphData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file {}", path.display()))?;
    let graph = parse_graph_json(&raw)
        .with_context(|| format!("failed to parse graph file {}", path.display()))?;

    info!(
        path = %path.display(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "loaded graph file"
    );
    Ok(graph)
}

pub fn parse_graph_json(raw: &str) -> Result<GraphData> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in graph file")?;
    if !parsed.is_object() {
        return Err(anyhow!(
            "graph file must contain a JSON object with `nodes` and `edges`"
        ));
    }

    let graph: GraphData = serde_json::from_value(parsed)
        .context("graph file does not match the node/edge schema")?;

    let dangling = graph.dangling_edge_count();
    if dangling > 0 {
        warn!(
            dangling,
            "graph has edges that reference unknown nodes; they will not be drawn"
        );
    }

    Ok(graph)
}

/// Small graph shown when no file is given on the command line.
pub fn demo_graph() -> GraphData {
    let labels = [
        "w5_psc",
        "w5_catalog",
        "w5_image",
        "spectra",
        "redshifts",
        "galaxy_sizes",
        "standalone",
    ];
    let nodes = labels
        .iter()
        .enumerate()
        .map(|(index, label)| Node {
            index,
            label: (*label).to_owned(),
        })
        .collect();

    let link = |source, target, link_type, count| Edge {
        source,
        target,
        link_type,
        count,
    };
    let edges = vec![
        link(0, 1, LinkType::Other, 2),
        link(1, 2, LinkType::Other, 2),
        link(1, 3, LinkType::Join, 1),
        link(3, 4, LinkType::Other, 3),
        link(4, 5, LinkType::Join, 1),
    ];

    GraphData { nodes, edges }
}
