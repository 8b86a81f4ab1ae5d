//! Site directory assembly
//!
//! A site is written exactly once: the directory is created with exclusive
//! semantics, `network.json` is written, and the viewer assets are copied in
//! byte for byte. Existing paths are never overwritten or merged into.

use super::{SitePaths, INDEX_HTML, NETWORK_JSON};
use crate::core::error::{Error, Result};
use logger::{debug, info};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Where the viewer assets come from and which files make up the viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSource {
    /// Template directory holding the asset files
    pub dir: PathBuf,
    /// File names copied into every site, in order
    pub files: Vec<String>,
}

impl AssetSource {
    /// Create an asset source
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, files: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    /// Name an asset gets inside the site directory
    fn site_file_name(file: &str) -> &OsStr {
        Path::new(file)
            .file_name()
            .unwrap_or_else(|| OsStr::new(file))
    }

    /// Every asset must exist and land on its own file name in `site_dir`,
    /// distinct from `network.json`
    fn check(&self, site_dir: &Path) -> Result<()> {
        let mut taken: HashSet<&OsStr> = HashSet::from([OsStr::new(NETWORK_JSON)]);
        for file in &self.files {
            let path = self.dir.join(file);
            if !path.is_file() {
                return Err(Error::AssetMissing(path));
            }
            let name = Self::site_file_name(file);
            if !taken.insert(name) {
                let target = site_dir.join(name);
                return Err(Error::write(
                    &target,
                    io::Error::new(
                        ErrorKind::AlreadyExists,
                        format!("asset {file} collides with another site file"),
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Writes site directories under a fixed output root
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    output_root: PathBuf,
    assets: AssetSource,
}

impl SiteBuilder {
    /// Create a builder. `output_root` must already exist; it is never created.
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>, assets: AssetSource) -> Self {
        Self {
            output_root: output_root.into(),
            assets,
        }
    }

    /// Directory new sites are created under
    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Assets copied into each site
    #[must_use]
    pub const fn assets(&self) -> &AssetSource {
        &self.assets
    }

    /// Create `output_root/site_name`, write `network.json` and copy the assets
    ///
    /// Assets are checked before anything is created, so a missing template
    /// or an asset list whose file names clash leaves no directory behind.
    /// Failures after creation leave whatever was already written in place.
    ///
    /// # Errors
    /// - [`Error::AssetMissing`] if a template file is absent
    /// - [`Error::DirectoryExists`] if the site path already exists
    /// - [`Error::Write`] if two assets (or an asset and `network.json`) share
    ///   a file name, or the directory or any file cannot be written
    pub fn build(&self, document_json: &str, site_name: &str) -> Result<SitePaths> {
        let site_dir = self.output_root.join(site_name);

        self.assets.check(&site_dir)?;

        fs::create_dir(&site_dir).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => Error::DirectoryExists(site_dir.clone()),
            _ => Error::write(&site_dir, e),
        })?;
        debug!("Created site directory {}", site_dir.display());

        let json_path = site_dir.join(NETWORK_JSON);
        write_new_file(&json_path, document_json.as_bytes())?;
        debug!("Wrote {} ({} bytes)", json_path.display(), document_json.len());

        for file in &self.assets.files {
            let from = self.assets.dir.join(file);
            let to = site_dir.join(AssetSource::site_file_name(file));
            copy_new_file(&from, &to)?;
        }

        info!(
            "Site {site_name} written with {} viewer assets",
            self.assets.files.len()
        );

        let index_html = site_dir.join(INDEX_HTML);
        Ok(SitePaths::new(site_dir, index_html))
    }
}

fn write_new_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| Error::write(path, e))?;
    file.write_all(contents).map_err(|e| Error::write(path, e))?;
    file.flush().map_err(|e| Error::write(path, e))
}

/// Byte copy into a file that must not exist yet
fn copy_new_file(from: &Path, to: &Path) -> Result<()> {
    let mut source = File::open(from).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::AssetMissing(from.to_path_buf()),
        _ => Error::write(to, e),
    })?;
    let mut target = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(to)
        .map_err(|e| Error::write(to, e))?;
    io::copy(&mut source, &mut target).map_err(|e| Error::write(to, e))?;
    target.flush().map_err(|e| Error::write(to, e))
}
