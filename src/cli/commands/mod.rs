//! CLI command handlers for `netsite`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod build;
pub mod config;
pub mod serialize;
pub mod templates;

use std::path::Path;

/// Title used when none is given on the command line: the graph file stem
pub fn title_or_file_stem(title: Option<&str>, graph: &Path) -> String {
    title.map_or_else(
        || {
            graph
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("graph")
                .to_string()
        },
        ToString::to_string,
    )
}
