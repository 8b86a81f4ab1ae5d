//! Attributed graph model and the accessor seam used by the serializer
//!
//! The serializer never touches a concrete graph type. It only needs ordered
//! vertex and edge enumeration, which any graph representation can provide by
//! implementing [`GraphAccessor`].

pub mod loader;

use crate::core::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

pub use loader::{load_graph, parse_edge_list_csv, parse_node_link_json};

/// Attribute bag attached to vertices and edges.
///
/// Keys keep their insertion order so emitted objects are stable.
pub type Attributes = Map<String, Value>;

/// A vertex as seen through a [`GraphAccessor`]
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Zero-based position in the graph's vertex enumeration
    pub id: usize,
    /// Attributes merged into the emitted node object (`id` is reserved)
    pub attributes: Attributes,
}

/// An edge as seen through a [`GraphAccessor`]
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Id of the source vertex
    pub source: usize,
    /// Id of the target vertex
    pub target: usize,
    /// Attributes merged into the emitted edge object (`source`/`target` are reserved)
    pub attributes: Attributes,
}

/// Read-only view over a graph structure.
///
/// Implementations must enumerate vertices in a stable order and report each
/// vertex's position in that order as its id. Neither method may mutate the
/// underlying graph.
pub trait GraphAccessor {
    /// Vertices in enumeration order; `vertices()[i].id == i`
    ///
    /// # Errors
    /// Returns [`Error::InvalidGraph`] if the graph cannot be read
    fn vertices(&self) -> Result<Vec<Vertex>>;

    /// Edges in enumeration order
    ///
    /// # Errors
    /// Returns [`Error::InvalidGraph`] if the graph cannot be read
    fn edges(&self) -> Result<Vec<Edge>>;
}

impl<G: GraphAccessor + ?Sized> GraphAccessor for &G {
    fn vertices(&self) -> Result<Vec<Vertex>> {
        (**self).vertices()
    }

    fn edges(&self) -> Result<Vec<Edge>> {
        (**self).edges()
    }
}

/// In-memory attributed graph.
///
/// Vertices are addressed by insertion position. Edges are kept in insertion
/// order and may be parallel or self-loops; only their endpoints are checked.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Attributes>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex and return its id
    pub fn add_vertex(&mut self, attributes: Attributes) -> usize {
        self.vertices.push(attributes);
        self.vertices.len() - 1
    }

    /// Append an edge between two existing vertices
    ///
    /// # Errors
    /// Returns [`Error::InvalidGraph`] if either endpoint is not a vertex id
    pub fn add_edge(&mut self, source: usize, target: usize, attributes: Attributes) -> Result<()> {
        for endpoint in [source, target] {
            if endpoint >= self.vertices.len() {
                return Err(Error::InvalidGraph(format!(
                    "edge endpoint {endpoint} does not exist ({} vertices)",
                    self.vertices.len()
                )));
            }
        }
        self.edges.push(Edge {
            source,
            target,
            attributes,
        });
        Ok(())
    }

    /// Set one attribute on a vertex from any serializable value
    ///
    /// # Errors
    /// - [`Error::InvalidGraph`] if `vertex` does not exist
    /// - [`Error::Serialization`] if `value` has no JSON representation
    pub fn set_vertex_attribute<T: Serialize + ?Sized>(
        &mut self,
        vertex: usize,
        key: &str,
        value: &T,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let attributes = self
            .vertices
            .get_mut(vertex)
            .ok_or_else(|| Error::InvalidGraph(format!("vertex {vertex} does not exist")))?;
        attributes.insert(key.to_string(), value);
        Ok(())
    }

    /// Set one attribute on an edge (by insertion index) from any serializable value
    ///
    /// # Errors
    /// - [`Error::InvalidGraph`] if `edge` does not exist
    /// - [`Error::Serialization`] if `value` has no JSON representation
    pub fn set_edge_attribute<T: Serialize + ?Sized>(
        &mut self,
        edge: usize,
        key: &str,
        value: &T,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let edge = self
            .edges
            .get_mut(edge)
            .ok_or_else(|| Error::InvalidGraph(format!("edge {edge} does not exist")))?;
        edge.attributes.insert(key.to_string(), value);
        Ok(())
    }

    /// Number of vertices
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl GraphAccessor for Graph {
    fn vertices(&self) -> Result<Vec<Vertex>> {
        Ok(self
            .vertices
            .iter()
            .enumerate()
            .map(|(id, attributes)| Vertex {
                id,
                attributes: attributes.clone(),
            })
            .collect())
    }

    fn edges(&self) -> Result<Vec<Edge>> {
        Ok(self.edges.clone())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Graph ({} vertices, {} edges):",
            self.vertices.len(),
            self.edges.len()
        )?;
        for edge in &self.edges {
            writeln!(f, "  {} → {}", edge.source, edge.target)?;
        }
        Ok(())
    }
}

/// Build an [`Attributes`] bag from `(key, value)` pairs
pub fn attributes<K, I>(pairs: I) -> Attributes
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
