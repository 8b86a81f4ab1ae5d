//! Graph serialization and site assembly

pub mod error;
pub mod graph;
pub mod serializer;
pub mod site;

pub use error::{Error, Result};
pub use graph::{Edge, Graph, GraphAccessor, Vertex};
pub use serializer::{serialize, GraphDocument};
pub use site::{SiteBuilder, SiteMetadata, SitePaths, SitePublisher};

/// Returns the current version of the `netsite` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
