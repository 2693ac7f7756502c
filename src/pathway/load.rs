use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::graph::{PathwayEdge, PathwayGraph, PathwayVertex};

#[derive(Clone, Debug, Deserialize)]
struct RawPathway {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    vertices: Vec<PathwayVertex>,
    #[serde(default)]
    edges: Vec<PathwayEdge>,
}

pub fn parse_pathway(raw: &str) -> Result<PathwayGraph> {
    let raw: RawPathway = serde_json::from_str(raw).context("invalid pathway JSON")?;
    let id = raw.id.clone();
    PathwayGraph::new(raw.id, raw.title, raw.vertices, raw.edges)
        .with_context(|| format!("pathway {id} is malformed"))
}

pub fn load_pathway(path: &Path) -> Result<PathwayGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read pathway file {}", path.display()))?;
    parse_pathway(&raw).with_context(|| format!("failed to load pathway from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathway::{VertexId, VertexKind};

    #[test]
    fn parses_typed_vertices_and_edges() {
        let graph = parse_pathway(
            r#"{
                "id": "hsa00010",
                "title": "Glycolysis",
                "vertices": [
                    { "id": "hk1", "kind": "gene", "label": "HK1" },
                    { "id": "glc", "kind": "compound" },
                    { "id": "complex", "kind": "group" }
                ],
                "edges": [ { "source": "glc", "target": "hk1" } ]
            }"#,
        )
        .unwrap();

        assert_eq!(graph.title(), "Glycolysis");
        assert_eq!(graph.vertices().len(), 3);
        assert_eq!(
            graph.vertex(&VertexId::from("complex")).map(|vertex| vertex.kind),
            Some(VertexKind::Group)
        );
        assert_eq!(graph.edges(), &[PathwayEdge::new("glc", "hk1")]);
    }

    #[test]
    fn reports_unknown_edge_endpoints() {
        let error = parse_pathway(
            r#"{ "id": "p", "vertices": [ { "id": "a", "kind": "gene" } ],
                 "edges": [ { "source": "a", "target": "b" } ] }"#,
        )
        .unwrap_err();

        let chain = format!("{error:#}");
        assert!(chain.contains("pathway p is malformed"));
        assert!(chain.contains("`b`"));
    }

    #[test]
    fn rejects_unknown_vertex_kinds() {
        assert!(
            parse_pathway(r#"{ "id": "p", "vertices": [ { "id": "a", "kind": "enzyme" } ] }"#)
                .is_err()
        );
    }
}
