use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::error::PathwayError;

use super::graph::{PathwayEdge, PathwayGraph, PathwayVertex, VertexId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

impl NodeHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Contribution {
    Focus {
        pathway: String,
    },
    Context {
        pathway: String,
        anchor: Option<VertexId>,
        summary: MergeSummary,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub added_vertices: usize,
    pub added_edges: usize,
}

/// Vertices and edges keep insertion order so every rebuild sees the same
/// sequence.
#[derive(Debug, Default)]
pub struct GraphModel {
    focus_set: bool,
    vertices: Vec<PathwayVertex>,
    vertex_index: HashMap<VertexId, usize>,
    edges: Vec<PathwayEdge>,
    edge_keys: HashSet<PathwayEdge>,
    contributions: Vec<Contribution>,
    node_by_vertex: HashMap<VertexId, NodeHandle>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focus_graph_set(&self) -> bool {
        self.focus_set
    }

    pub fn set_focus_graph(&mut self, graph: &PathwayGraph) -> Result<(), PathwayError> {
        if self.focus_set {
            return Err(PathwayError::invalid_merge(format!(
                "focus pathway already set, refusing to replace it with {}",
                graph.id()
            )));
        }

        let summary = self.union(graph, None);
        self.focus_set = true;
        self.contributions.push(Contribution::Focus {
            pathway: graph.id().to_owned(),
        });

        info!(
            pathway = graph.id(),
            vertices = summary.added_vertices,
            edges = summary.added_edges,
            "focus pathway set"
        );
        Ok(())
    }

    /// With an anchor, only the part of `graph` connected to it is merged.
    pub fn merge_context_graph(
        &mut self,
        graph: &PathwayGraph,
        anchor: Option<&VertexId>,
    ) -> Result<MergeSummary, PathwayError> {
        if !self.focus_set {
            return Err(PathwayError::invalid_merge(format!(
                "context pathway {} merged before a focus pathway was set",
                graph.id()
            )));
        }

        let included = match anchor {
            Some(anchor) => {
                if !self.contains_vertex(anchor) {
                    return Err(PathwayError::dangling(anchor));
                }
                if graph.vertex(anchor).is_none() {
                    return Err(PathwayError::invalid_merge(format!(
                        "anchor {anchor} does not occur in context pathway {}",
                        graph.id()
                    )));
                }
                Some(graph.component_of(anchor))
            }
            None => None,
        };

        let summary = self.union(graph, included.as_ref());
        self.contributions.push(Contribution::Context {
            pathway: graph.id().to_owned(),
            anchor: anchor.cloned(),
            summary,
        });

        info!(
            pathway = graph.id(),
            anchor = anchor.map(VertexId::as_str),
            added_vertices = summary.added_vertices,
            added_edges = summary.added_edges,
            "context pathway merged"
        );
        Ok(summary)
    }

    fn union(
        &mut self,
        graph: &PathwayGraph,
        included: Option<&HashSet<VertexId>>,
    ) -> MergeSummary {
        let keep = |id: &VertexId| included.is_none_or(|set| set.contains(id));
        let mut summary = MergeSummary::default();

        for vertex in graph.vertices() {
            if !keep(&vertex.id) || self.vertex_index.contains_key(&vertex.id) {
                continue;
            }
            self.vertex_index
                .insert(vertex.id.clone(), self.vertices.len());
            self.vertices.push(vertex.clone());
            summary.added_vertices += 1;
        }

        for edge in graph.edges() {
            if !keep(&edge.source) || !keep(&edge.target) {
                continue;
            }
            if self.edge_keys.insert(edge.clone()) {
                self.edges.push(edge.clone());
                summary.added_edges += 1;
            }
        }

        self.node_by_vertex.clear();
        summary
    }

    pub fn combined_vertices(&self) -> &[PathwayVertex] {
        &self.vertices
    }

    pub fn combined_edges(&self) -> &[PathwayEdge] {
        &self.edges
    }

    pub fn contains_vertex(&self, vertex: &VertexId) -> bool {
        self.vertex_index.contains_key(vertex)
    }

    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    pub fn node_for(&self, vertex: &VertexId) -> Result<NodeHandle, PathwayError> {
        self.node_by_vertex
            .get(vertex)
            .copied()
            .ok_or_else(|| PathwayError::dangling(vertex))
    }

    pub fn register_node(
        &mut self,
        vertex: &VertexId,
        node: NodeHandle,
    ) -> Result<(), PathwayError> {
        if !self.contains_vertex(vertex) {
            return Err(PathwayError::dangling(vertex));
        }
        self.node_by_vertex.insert(vertex.clone(), node);
        Ok(())
    }

    pub fn clear_node_map(&mut self) {
        self.node_by_vertex.clear();
    }

    pub fn reset(&mut self) {
        debug!(
            contributions = self.contributions.len(),
            "combined graph reset"
        );
        *self = Self::default();
    }
}
