//! Graph file loaders
//!
//! Two input formats are understood:
//! - node-link JSON (`.json`): `{"nodes": [...], "edges": [...]}`, the same
//!   shape the viewer consumes, so a `network.json` can be loaded back in
//! - edge-list CSV (`.csv`): a `source,target[,attr...]` header followed by one
//!   edge per row, vertices created in first-appearance order

use super::{Attributes, Graph};
use crate::core::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Load a graph from a file, choosing the format from its extension
///
/// # Errors
/// Returns [`Error::InvalidGraph`] if the file cannot be read, has an unknown
/// extension, or is malformed
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::InvalidGraph(format!("cannot read {}: {e}", path.display())))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => parse_node_link_json(&content),
        Some("csv") => parse_edge_list_csv(&content),
        _ => Err(Error::InvalidGraph(format!(
            "unsupported graph file {} (expected .json or .csv)",
            path.display()
        ))),
    }
}

/// Parse a node-link JSON document into a [`Graph`]
///
/// Node positions become vertex ids; a node's own `id` key is dropped from its
/// attributes but is used to resolve edges. When every node carries an `id`,
/// edge endpoints refer to those ids (numeric or string), as in networkx
/// `node_link_data` output and in `network.json`. Otherwise integer endpoints
/// are node positions and string endpoints match a node's `id` or `name`.
/// `links` is accepted as an alias for `edges`.
///
/// # Errors
/// Returns [`Error::InvalidGraph`] for malformed JSON, non-object entries, or
/// unresolved edge endpoints
pub fn parse_node_link_json(content: &str) -> Result<Graph> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| Error::InvalidGraph(format!("malformed JSON: {e}")))?;
    let Value::Object(mut document) = document else {
        return Err(Error::InvalidGraph("top level must be an object".into()));
    };

    let nodes = match document.remove("nodes") {
        Some(Value::Array(nodes)) => nodes,
        Some(_) => return Err(Error::InvalidGraph("'nodes' must be an array".into())),
        None => return Err(Error::InvalidGraph("missing 'nodes' array".into())),
    };
    let edges = match document.remove("edges").or_else(|| document.remove("links")) {
        Some(Value::Array(edges)) => edges,
        Some(_) => return Err(Error::InvalidGraph("'edges' must be an array".into())),
        None => Vec::new(),
    };

    let mut graph = Graph::new();
    let mut labels = NodeLabels::default();
    let mut all_have_ids = true;

    for (position, node) in nodes.into_iter().enumerate() {
        let Value::Object(mut attributes) = node else {
            return Err(Error::InvalidGraph(format!("node {position} is not an object")));
        };
        let own_id = attributes.shift_remove("id");
        let id = graph.add_vertex(attributes.clone());

        match own_id.as_ref().and_then(label_of) {
            Some(label) => {
                labels.ids.entry(label).or_insert(id);
            }
            None => all_have_ids = false,
        }
        if let Some(name) = attributes.get("name").and_then(label_of) {
            labels.names.entry(name).or_insert(id);
        }
    }
    labels.numbers_are_ids = all_have_ids;

    for (position, edge) in edges.into_iter().enumerate() {
        let Value::Object(mut attributes) = edge else {
            return Err(Error::InvalidGraph(format!("edge {position} is not an object")));
        };
        let source = labels.resolve(attributes.shift_remove("source"), position)?;
        let target = labels.resolve(attributes.shift_remove("target"), position)?;
        graph.add_edge(source, target, attributes)?;
    }

    Ok(graph)
}

fn label_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Lookup tables from node labels to vertex positions
#[derive(Default)]
struct NodeLabels {
    ids: HashMap<String, usize>,
    names: HashMap<String, usize>,
    /// Every node had an `id`, so numeric endpoints are ids, not positions
    numbers_are_ids: bool,
}

impl NodeLabels {
    fn resolve(&self, endpoint: Option<Value>, edge: usize) -> Result<usize> {
        match endpoint {
            Some(Value::Number(n)) if self.numbers_are_ids => self
                .ids
                .get(&n.to_string())
                .copied()
                .ok_or_else(|| Error::InvalidGraph(format!("edge {edge}: unknown node id {n}"))),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| Error::InvalidGraph(format!("edge {edge}: bad endpoint {n}"))),
            Some(Value::String(label)) => self
                .ids
                .get(&label)
                .or_else(|| self.names.get(&label))
                .copied()
                .ok_or_else(|| Error::InvalidGraph(format!("edge {edge}: unknown node '{label}'"))),
            Some(other) => Err(Error::InvalidGraph(format!(
                "edge {edge}: endpoint must be an integer or a node label, got {other}"
            ))),
            None => Err(Error::InvalidGraph(format!(
                "edge {edge}: missing source or target"
            ))),
        }
    }
}

/// Parse an edge-list CSV into a [`Graph`]
///
/// The first non-empty line is the header and must start with `source,target`
/// (case-insensitive). Each distinct endpoint label becomes a vertex with a
/// `name` attribute, in order of first appearance. Remaining columns become
/// edge attributes: numbers and booleans are typed, empty cells are skipped,
/// everything else is kept as a string.
///
/// # Errors
/// Returns [`Error::InvalidGraph`] for a missing/invalid header or a row
/// without both endpoints
pub fn parse_edge_list_csv(content: &str) -> Result<Graph> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines
        .next()
        .ok_or_else(|| Error::InvalidGraph("empty edge list".into()))?;
    let headers = parse_csv_line(header_line);
    if headers.len() < 2
        || !headers[0].eq_ignore_ascii_case("source")
        || !headers[1].eq_ignore_ascii_case("target")
    {
        return Err(Error::InvalidGraph(
            "edge list header must start with 'source,target'".into(),
        ));
    }

    let mut graph = Graph::new();
    let mut vertex_by_label: HashMap<String, usize> = HashMap::new();

    for (index, line) in lines {
        let fields = parse_csv_line(line);
        let (Some(source), Some(target)) = (fields.first(), fields.get(1)) else {
            return Err(Error::InvalidGraph(format!(
                "line {}: expected source and target",
                index + 1
            )));
        };
        if source.is_empty() || target.is_empty() {
            return Err(Error::InvalidGraph(format!(
                "line {}: empty source or target",
                index + 1
            )));
        }

        let source = vertex_for(&mut graph, &mut vertex_by_label, source);
        let target = vertex_for(&mut graph, &mut vertex_by_label, target);

        let mut attributes = Attributes::new();
        for (key, raw) in headers.iter().zip(fields.iter()).skip(2) {
            if !raw.is_empty() {
                attributes.insert(key.clone(), typed_cell(raw));
            }
        }
        graph.add_edge(source, target, attributes)?;
    }

    Ok(graph)
}

fn vertex_for(graph: &mut Graph, known: &mut HashMap<String, usize>, label: &str) -> usize {
    if let Some(&id) = known.get(label) {
        return id;
    }
    let mut attributes = Attributes::new();
    attributes.insert("name".to_string(), Value::String(label.to_string()));
    let id = graph.add_vertex(attributes);
    known.insert(label.to_string(), id);
    id
}

/// Numbers and booleans keep their JSON type; anything else is a string
fn typed_cell(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::Bool(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

/// Split a CSV line on commas, honoring double-quoted fields and `""` escapes
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::GraphAccessor;
    use serde_json::json;

    #[test]
    fn test_parse_csv_line_quotes() {
        let fields = parse_csv_line(r#"a, "b, c" ,"say ""hi""",4"#);
        assert_eq!(fields, vec!["a", "b, c", r#"say "hi""#, "4"]);
    }

    #[test]
    fn test_typed_cell() {
        assert_eq!(typed_cell("3"), json!(3));
        assert_eq!(typed_cell("2.5"), json!(2.5));
        assert_eq!(typed_cell("true"), json!(true));
        assert_eq!(typed_cell("null"), json!("null"));
        assert_eq!(typed_cell("heavy"), json!("heavy"));
    }

    #[test]
    fn test_edge_list_vertices_in_first_appearance_order() {
        let csv = "source,target,weight\nb,a,1\na,c,2\n";
        let graph = parse_edge_list_csv(csv).unwrap();

        let names: Vec<Value> = graph
            .vertices()
            .unwrap()
            .into_iter()
            .map(|v| v.attributes["name"].clone())
            .collect();
        assert_eq!(names, vec![json!("b"), json!("a"), json!("c")]);

        let edges = graph.edges().unwrap();
        assert_eq!((edges[0].source, edges[0].target), (0, 1));
        assert_eq!((edges[1].source, edges[1].target), (1, 2));
        assert_eq!(edges[1].attributes["weight"], json!(2));
    }

    #[test]
    fn test_edge_list_requires_header() {
        let err = parse_edge_list_csv("a,b\n").unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(_)));
    }

    #[test]
    fn test_node_link_string_endpoints() {
        let doc = r#"{"nodes":[{"id":"x"},{"name":"y"}],"links":[{"source":"x","target":"y","w":1}]}"#;
        let graph = parse_node_link_json(doc).unwrap();

        let vertices = graph.vertices().unwrap();
        assert!(!vertices[0].attributes.contains_key("id"));
        let edges = graph.edges().unwrap();
        assert_eq!((edges[0].source, edges[0].target), (0, 1));
        assert_eq!(edges[0].attributes["w"], json!(1));
        assert!(!edges[0].attributes.contains_key("source"));
    }

    #[test]
    fn test_node_link_rejects_unknown_label() {
        let doc = r#"{"nodes":[{"id":"x"}],"edges":[{"source":"x","target":"nope"}]}"#;
        let err = parse_node_link_json(doc).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(_)));
    }

    #[test]
    fn test_node_link_rejects_out_of_range_position() {
        let doc = r#"{"nodes":[{}],"edges":[{"source":0,"target":5}]}"#;
        assert!(parse_node_link_json(doc).is_err());
    }

    #[test]
    fn test_node_link_numeric_ids_are_not_positions() {
        let doc = r#"{"nodes":[{"id":1},{"id":2},{"id":3}],"links":[{"source":1,"target":2}]}"#;
        let graph = parse_node_link_json(doc).unwrap();

        let edges = graph.edges().unwrap();
        assert_eq!((edges[0].source, edges[0].target), (0, 1));
    }

    #[test]
    fn test_node_link_sparse_numeric_ids() {
        let doc = r#"{"nodes":[{"id":10},{"id":20},{"id":30}],"links":[{"source":30,"target":10}]}"#;
        let graph = parse_node_link_json(doc).unwrap();

        let edges = graph.edges().unwrap();
        assert_eq!((edges[0].source, edges[0].target), (2, 0));
    }

    #[test]
    fn test_node_link_unknown_numeric_id() {
        let doc = r#"{"nodes":[{"id":10},{"id":20}],"links":[{"source":10,"target":0}]}"#;
        let err = parse_node_link_json(doc).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(msg) if msg.contains("unknown node id 0")));
    }

    #[test]
    fn test_node_link_positions_without_ids() {
        let doc = r#"{"nodes":[{"name":"a"},{"name":"b"}],"edges":[{"source":1,"target":0}]}"#;
        let graph = parse_node_link_json(doc).unwrap();

        let edges = graph.edges().unwrap();
        assert_eq!((edges[0].source, edges[0].target), (1, 0));
    }
}
