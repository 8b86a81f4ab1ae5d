//! Templates command handler

use crate::args::TemplatesSubcommand;
use netsite::config::Config;
use netsite::core::site::templates;
use std::path::{Path, PathBuf};

/// Dispatch templates subcommands
///
/// # Errors
/// Returns a printable message when installation fails or assets are missing
pub fn run(subcommand: TemplatesSubcommand, config: &Config) -> Result<(), String> {
    match subcommand {
        TemplatesSubcommand::Init { dir, force } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.paths.templates_dir));
            handle_init(&dir, force)
        }
        TemplatesSubcommand::Check => handle_check(config),
    }
}

fn handle_init(dir: &Path, force: bool) -> Result<(), String> {
    let written = templates::install(dir, force).map_err(|e| format!("✗ {e}"))?;
    for path in &written {
        println!("✓ Wrote {}", path.display());
    }
    if written.is_empty() {
        println!("✓ Templates already present in {}", dir.display());
    }
    if !dir.join(templates::D3_BUNDLE).is_file() {
        println!(
            "ℹ Place {} in {} before building sites.",
            templates::D3_BUNDLE,
            dir.display()
        );
    }
    Ok(())
}

fn handle_check(config: &Config) -> Result<(), String> {
    let source = config.asset_source();
    let mut missing = 0;
    for file in &source.files {
        let path = source.dir.join(file);
        if path.is_file() {
            println!("✓ {}", path.display());
        } else {
            println!("✗ {}", path.display());
            missing += 1;
        }
    }
    if missing == 0 {
        Ok(())
    } else {
        Err(format!("✗ {missing} viewer asset(s) missing"))
    }
}
