//! Serialize command handler
//!
//! Emits the `network.json` document for a graph without building a site.

use super::title_or_file_stem;
use logger::{error, info};
use netsite::config::Config;
use netsite::core::graph::load_graph;
use netsite::core::serializer::GraphDocument;
use netsite::core::site::{format_date, Clock, SiteMetadata, SystemClock};
use std::fs;
use std::path::Path;

/// Run the serialize command.
///
/// # Errors
/// Returns a printable message when loading, serializing or writing fails
pub fn run(
    graph_file: &Path,
    title: Option<&str>,
    description: &str,
    scale: Option<u32>,
    output: Option<&Path>,
    pretty: bool,
    config: &Config,
) -> Result<(), String> {
    let graph = load_graph(graph_file).map_err(|e| {
        error!("Failed to load {}: {e}", graph_file.display());
        format!("✗ Failed to load {}: {e}", graph_file.display())
    })?;

    let meta = SiteMetadata::new(title_or_file_stem(title, graph_file), description)
        .with_scale(scale.unwrap_or_else(|| config.scale()));
    let date = format_date(SystemClock.now_epoch_seconds());

    let document = GraphDocument::from_accessor(&graph, &meta, &date)
        .map_err(|e| format!("✗ Failed to read graph: {e}"))?;
    let json = if pretty {
        document.to_json_pretty()
    } else {
        document.to_json()
    }
    .map_err(|e| format!("✗ Failed to serialize graph: {e}"))?;

    match output {
        Some(path) => {
            fs::write(path, &json)
                .map_err(|e| format!("✗ Failed to write {}: {e}", path.display()))?;
            info!("Document written to {}", path.display());
            println!("✓ Document written: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
