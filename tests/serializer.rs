//! Integration tests for the `network.json` serialization contract

use netsite::core::graph::{attributes, Attributes, Graph, GraphAccessor};
use netsite::core::serializer::{serialize, GraphDocument};
use netsite::core::site::SiteMetadata;
use serde_json::{json, Value};
use std::collections::HashSet;

/// Three vertices with `group`, edges 0→1 and 1→2 with `weight`
fn sample_graph() -> Graph {
    let mut graph = Graph::new();
    for group in [1, 2, 2] {
        graph.add_vertex(attributes([("group", json!(group))]));
    }
    graph
        .add_edge(0, 1, attributes([("weight", json!(1))]))
        .unwrap();
    graph
        .add_edge(1, 2, attributes([("weight", json!(3))]))
        .unwrap();
    graph
}

fn serialize_graph(graph: &Graph, date: &str) -> String {
    serialize(
        &graph.vertices().unwrap(),
        &graph.edges().unwrap(),
        "T",
        "D",
        400,
        date,
    )
    .unwrap()
}

#[test]
fn test_three_vertex_scenario() {
    let json = serialize_graph(&sample_graph(), "2024-01-01");
    let parsed: Value = serde_json::from_str(&json).expect("output must be valid JSON");

    assert_eq!(
        parsed,
        json!({
            "nodes": [
                {"id": 0, "group": 1},
                {"id": 1, "group": 2},
                {"id": 2, "group": 2}
            ],
            "edges": [
                {"source": 0, "target": 1, "weight": 1},
                {"source": 1, "target": 2, "weight": 3}
            ],
            "title": "T",
            "description": "D",
            "scale": 400,
            "date": "2024-01-01"
        })
    );
}

#[test]
fn test_exact_bytes_and_key_order() {
    let json = serialize_graph(&sample_graph(), "2024-01-01");
    assert_eq!(
        json,
        concat!(
            r#"{"nodes":[{"id":0,"group":1},{"id":1,"group":2},{"id":2,"group":2}],"#,
            r#""edges":[{"source":0,"target":1,"weight":1},{"source":1,"target":2,"weight":3}],"#,
            r#""title":"T","description":"D","scale":400,"date":"2024-01-01"}"#
        )
    );
}

#[test]
fn test_counts_match_graph() {
    let mut graph = Graph::new();
    for _ in 0..25 {
        graph.add_vertex(Attributes::new());
    }
    for i in 0..24 {
        graph.add_edge(i, i + 1, Attributes::new()).unwrap();
        graph.add_edge(i + 1, i, Attributes::new()).unwrap();
    }

    let parsed: Value = serde_json::from_str(&serialize_graph(&graph, "d")).unwrap();
    assert_eq!(parsed["nodes"].as_array().unwrap().len(), graph.vertex_count());
    assert_eq!(parsed["edges"].as_array().unwrap().len(), graph.edge_count());
}

#[test]
fn test_ids_are_contiguous_and_edges_reference_them() {
    let parsed: Value = serde_json::from_str(&serialize_graph(&sample_graph(), "d")).unwrap();

    let ids: Vec<u64> = parsed["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, (0..3).collect::<Vec<u64>>());

    let known: HashSet<u64> = ids.into_iter().collect();
    for edge in parsed["edges"].as_array().unwrap() {
        assert!(known.contains(&edge["source"].as_u64().unwrap()));
        assert!(known.contains(&edge["target"].as_u64().unwrap()));
    }
}

#[test]
fn test_deterministic_output() {
    let graph = sample_graph();
    assert_eq!(serialize_graph(&graph, "x"), serialize_graph(&graph, "x"));
}

#[test]
fn test_round_trip_preserves_attribute_values() {
    let mut graph = Graph::new();
    graph.add_vertex(attributes([
        ("label", json!("alpha")),
        ("size", json!(2.5)),
        ("active", json!(true)),
        ("missing", Value::Null),
        ("tags", json!(["x", "y"])),
        ("meta", json!({"nested": {"depth": 2}})),
    ]));
    graph.add_vertex(attributes([("label", json!("beta"))]));
    graph
        .add_edge(1, 0, attributes([("kind", json!("back")), ("weight", json!(-1))]))
        .unwrap();

    let parsed: Value = serde_json::from_str(&serialize_graph(&graph, "d")).unwrap();
    let nodes = parsed["nodes"].as_array().unwrap();
    let vertices = graph.vertices().unwrap();

    for (node, vertex) in nodes.iter().zip(&vertices) {
        for (key, value) in &vertex.attributes {
            assert_eq!(&node[key], value, "attribute {key} must survive");
        }
    }
    assert_eq!(parsed["edges"][0]["source"], json!(1));
    assert_eq!(parsed["edges"][0]["target"], json!(0));
    assert_eq!(parsed["edges"][0]["kind"], json!("back"));
}

#[test]
fn test_non_ascii_text_is_utf8() {
    let mut graph = Graph::new();
    graph.add_vertex(attributes([("label", json!("Zürich → 東京"))]));

    let json = serialize_graph(&graph, "d");
    assert!(json.contains("Zürich → 東京"));
}

#[test]
fn test_document_from_accessor_uses_metadata() {
    let meta = SiteMetadata::new("Title", "Description").with_scale(640);
    let document = GraphDocument::from_accessor(&sample_graph(), &meta, "today").unwrap();

    assert_eq!(document.nodes.len(), 3);
    assert_eq!(document.edges.len(), 2);
    assert_eq!(document.title, "Title");
    assert_eq!(document.description, "Description");
    assert_eq!(document.scale, 640);
    assert_eq!(document.date, "today");

    let pretty: Value = serde_json::from_str(&document.to_json_pretty().unwrap()).unwrap();
    let compact: Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
    assert_eq!(pretty, compact);
}
