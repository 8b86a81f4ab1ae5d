//! Viewer assets bundled into the binary
//!
//! The markup, stylesheet and matrix script ship with `netsite` and can be
//! installed into a template directory. The d3 v3 bundle is third-party code
//! and is not bundled; it has to be placed next to them by hand.

use crate::core::error::{Error, Result};
use logger::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Asset list every site gets unless configured otherwise
pub const DEFAULT_ASSETS: [&str; 4] = ["index.html", "matrix.js", "matrix.css", "d3.v3.min.js"];

/// Third-party rendering library expected in the template directory
pub const D3_BUNDLE: &str = "d3.v3.min.js";

/// Bundled viewer files as `(file name, contents)`
pub const BUNDLED_ASSETS: [(&str, &str); 3] = [
    ("index.html", include_str!("templates/index.html")),
    ("matrix.js", include_str!("templates/matrix.js")),
    ("matrix.css", include_str!("templates/matrix.css")),
];

/// Default asset list as owned strings, for configuration
#[must_use]
pub fn default_asset_list() -> Vec<String> {
    DEFAULT_ASSETS.iter().map(ToString::to_string).collect()
}

/// Write the bundled assets into `dir`, creating it if needed
///
/// Existing files are left alone unless `overwrite` is set. Returns the paths
/// that were written.
///
/// # Errors
/// Returns [`Error::Write`] if the directory or a file cannot be written
pub fn install(dir: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| Error::write(dir, e))?;

    let mut written = Vec::new();
    for (name, contents) in BUNDLED_ASSETS {
        let path = dir.join(name);
        if path.exists() && !overwrite {
            debug!("Keeping existing template {}", path.display());
            continue;
        }
        fs::write(&path, contents).map_err(|e| Error::write(&path, e))?;
        written.push(path);
    }

    if !dir.join(D3_BUNDLE).is_file() {
        warn!(
            "{} not found in {}; download d3 v3 there before building sites",
            D3_BUNDLE,
            dir.display()
        );
    }
    Ok(written)
}
