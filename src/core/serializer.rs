//! Graph-to-JSON serialization for the browser viewer
//!
//! Produces the `network.json` document:
//!
//! ```text
//! {
//!   "nodes": [ { "id": <int>, ...attrs }, ... ],
//!   "edges": [ { "source": <int>, "target": <int>, ...attrs }, ... ],
//!   "title": "<string>",
//!   "description": "<string>",
//!   "scale": <int>,
//!   "date": "<string>"
//! }
//! ```
//!
//! Node and edge order is the graph's enumeration order. The viewer indexes
//! nodes by position, so nothing here sorts or deduplicates.

use crate::core::error::Result;
use crate::core::graph::{Attributes, Edge, GraphAccessor, Vertex};
use crate::core::site::SiteMetadata;
use logger::debug;
use serde::Serialize;
use serde_json::{Map, Value};

/// The canonical document consumed by the viewer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDocument {
    /// One object per vertex: `id` followed by the vertex attributes
    pub nodes: Vec<Map<String, Value>>,
    /// One object per edge: `source`, `target` followed by the edge attributes
    pub edges: Vec<Map<String, Value>>,
    /// Human title shown by the viewer
    pub title: String,
    /// Free-form description shown under the title
    pub description: String,
    /// Pixel size hint for the viewer canvas
    pub scale: u32,
    /// Human-readable generation timestamp
    pub date: String,
}

impl GraphDocument {
    /// Assemble a document from already-enumerated vertices and edges
    #[must_use]
    pub fn new(
        vertices: &[Vertex],
        edges: &[Edge],
        title: &str,
        description: &str,
        scale: u32,
        date: &str,
    ) -> Self {
        Self {
            nodes: vertices.iter().map(vertex_object).collect(),
            edges: edges.iter().map(edge_object).collect(),
            title: title.to_string(),
            description: description.to_string(),
            scale,
            date: date.to_string(),
        }
    }

    /// Enumerate `graph` and assemble its document
    ///
    /// # Errors
    /// Propagates [`Error::InvalidGraph`](crate::core::error::Error::InvalidGraph)
    /// from the accessor
    pub fn from_accessor<G: GraphAccessor>(
        graph: &G,
        meta: &SiteMetadata,
        date: &str,
    ) -> Result<Self> {
        let vertices = graph.vertices()?;
        let edges = graph.edges()?;
        Ok(Self::new(
            &vertices,
            &edges,
            &meta.title,
            &meta.description,
            meta.scale,
            date,
        ))
    }

    /// Compact JSON text
    ///
    /// # Errors
    /// Returns [`Error::Serialization`](crate::core::error::Error::Serialization)
    /// if serde_json rejects the document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON text, for humans
    ///
    /// # Errors
    /// Same as [`GraphDocument::to_json`]
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serialize vertices, edges and metadata into `network.json` text
///
/// Pure: the same inputs always produce byte-identical output.
///
/// # Errors
/// Returns [`Error::Serialization`](crate::core::error::Error::Serialization)
/// if the document cannot be written as JSON
pub fn serialize(
    vertices: &[Vertex],
    edges: &[Edge],
    title: &str,
    description: &str,
    scale: u32,
    date: &str,
) -> Result<String> {
    GraphDocument::new(vertices, edges, title, description, scale, date).to_json()
}

fn vertex_object(vertex: &Vertex) -> Map<String, Value> {
    let mut node = Map::new();
    node.insert("id".to_string(), Value::from(vertex.id));
    overlay(&mut node, &vertex.attributes);
    node
}

fn edge_object(edge: &Edge) -> Map<String, Value> {
    let mut object = Map::new();
    object.insert("source".to_string(), Value::from(edge.source));
    object.insert("target".to_string(), Value::from(edge.target));
    overlay(&mut object, &edge.attributes);
    object
}

/// Attributes win over the positional keys already in `object`.
///
/// Redeclaring a reserved key is a caller error; it is kept as-is, not rejected.
fn overlay(object: &mut Map<String, Value>, attributes: &Attributes) {
    for (key, value) in attributes {
        if object.contains_key(key) {
            debug!("attribute '{key}' overrides a reserved key");
        }
        object.insert(key.clone(), value.clone());
    }
}
