//! Site generation: naming, assembly and the end-to-end publish step
//!
//! A site is one directory holding `network.json` plus the viewer assets,
//! ready to be opened in a browser or embedded in a notebook frame.

pub mod builder;
pub mod naming;
pub mod templates;

use crate::core::error::Result;
use crate::core::graph::GraphAccessor;
use crate::core::serializer::GraphDocument;
use logger::info;
use std::path::PathBuf;

pub use builder::{AssetSource, SiteBuilder};
pub use naming::{format_date, legalize, site_name, Clock, FixedClock, SystemClock};

/// Name of the graph document inside every site
pub const NETWORK_JSON: &str = "network.json";

/// Entry point the viewer is opened from
pub const INDEX_HTML: &str = "index.html";

/// Default pixel size hint handed to the viewer
pub const DEFAULT_SCALE: u32 = 400;

/// Human metadata attached to a generated site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMetadata {
    /// Title shown by the viewer and used to name the directory
    pub title: String,
    /// Description shown under the title
    pub description: String,
    /// Pixel size hint for the viewer
    pub scale: u32,
}

impl SiteMetadata {
    /// Metadata with the default scale
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            scale: DEFAULT_SCALE,
        }
    }

    /// Override the scale hint
    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }
}

/// Paths handed back to the caller after a site is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    /// The created site directory
    pub site_dir: PathBuf,
    /// Expected viewer entry point inside `site_dir`
    pub index_html: PathBuf,
}

impl SitePaths {
    /// Bundle the two paths
    #[must_use]
    pub const fn new(site_dir: PathBuf, index_html: PathBuf) -> Self {
        Self {
            site_dir,
            index_html,
        }
    }
}

/// Runs the whole pipeline: clock, name, serialize, build
#[derive(Debug, Clone)]
pub struct SitePublisher<C: Clock = SystemClock> {
    builder: SiteBuilder,
    clock: C,
}

impl SitePublisher<SystemClock> {
    /// Publisher using wall-clock time
    #[must_use]
    pub const fn new(builder: SiteBuilder) -> Self {
        Self::with_clock(builder, SystemClock)
    }
}

impl<C: Clock> SitePublisher<C> {
    /// Publisher using an injected clock
    #[must_use]
    pub const fn with_clock(builder: SiteBuilder, clock: C) -> Self {
        Self { builder, clock }
    }

    /// The underlying builder
    #[must_use]
    pub const fn builder(&self) -> &SiteBuilder {
        &self.builder
    }

    /// Serialize `graph` and write it as a new site
    ///
    /// The clock is read once; the directory suffix and the document `date`
    /// come from the same instant.
    ///
    /// # Errors
    /// Any error from the accessor, the serializer or [`SiteBuilder::build`]
    pub fn publish<G: GraphAccessor>(&self, graph: &G, meta: &SiteMetadata) -> Result<SitePaths> {
        let now = self.clock.now_epoch_seconds();
        let name = site_name(&meta.title, now);

        let document = GraphDocument::from_accessor(graph, meta, &format_date(now))?;
        let json = document.to_json()?;

        let paths = self.builder.build(&json, &name)?;
        info!(
            "Published '{}' ({} nodes, {} edges) to {}",
            meta.title,
            document.nodes.len(),
            document.edges.len(),
            paths.site_dir.display()
        );
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults_scale() {
        let meta = SiteMetadata::new("T", "D");
        assert_eq!(meta.scale, 400);
        assert_eq!(meta.with_scale(800).scale, 800);
    }
}
