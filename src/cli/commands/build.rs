//! Build command handler
//!
//! Loads a graph file and publishes it as a new site under `sites_dir`.

use super::title_or_file_stem;
use logger::{error, info, verbose};
use netsite::config::Config;
use netsite::core::graph::load_graph;
use netsite::core::site::{SiteBuilder, SiteMetadata, SitePublisher};
use std::path::{Path, PathBuf};

/// Run the build command.
///
/// # Arguments
/// * `graph_file` - Path to a `.json` or `.csv` graph
/// * `title` - Optional title; defaults to the file stem
/// * `description` - Description shown by the viewer
/// * `scale` - Optional scale override
/// * `config` - Configuration with output and template directories
///
/// # Errors
/// Returns a printable message when loading or publishing fails
pub fn run(
    graph_file: &Path,
    title: Option<&str>,
    description: &str,
    scale: Option<u32>,
    config: &Config,
) -> Result<(), String> {
    let graph = load_graph(graph_file).map_err(|e| {
        error!("Failed to load {}: {e}", graph_file.display());
        format!("✗ Failed to load {}: {e}", graph_file.display())
    })?;
    info!(
        "Graph loaded: {} ({} vertices, {} edges)",
        graph_file.display(),
        graph.vertex_count(),
        graph.edge_count()
    );

    let sites_dir = PathBuf::from(&config.paths.sites_dir);
    if !sites_dir.is_dir() {
        return Err(format!(
            "✗ Output directory {} does not exist; create it or pass --out-dir",
            sites_dir.display()
        ));
    }

    let meta = SiteMetadata::new(title_or_file_stem(title, graph_file), description)
        .with_scale(scale.unwrap_or_else(|| config.scale()));
    verbose!("Building site '{}' in {}", meta.title, sites_dir.display());

    let publisher = SitePublisher::new(SiteBuilder::new(sites_dir, config.asset_source()));
    let paths = publisher.publish(&graph, &meta).map_err(|e| {
        error!("Site generation failed for {}: {e}", graph_file.display());
        format!("✗ Failed to build site: {e}")
    })?;

    println!("✓ Site generated: {}", paths.site_dir.display());
    println!("  Open: {}", paths.index_html.display());
    Ok(())
}
