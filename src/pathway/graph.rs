use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PathwayError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(String);

impl VertexId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VertexId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexKind {
    Gene,
    Compound,
    Group,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayVertex {
    pub id: VertexId,
    pub kind: VertexKind,
    #[serde(default)]
    pub label: String,
}

impl PathwayVertex {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, kind: VertexKind) -> Self {
        Self {
            id: VertexId::new(id),
            kind,
            label: String::new(),
        }
    }

    #[cfg(test)]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            self.id.as_str()
        } else {
            &self.label
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathwayEdge {
    pub source: VertexId,
    pub target: VertexId,
}

impl PathwayEdge {
    #[cfg(test)]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: VertexId::new(source),
            target: VertexId::new(target),
        }
    }
}

/// A read-only source pathway. Vertex ids are unique and every edge
/// endpoint names one of the vertices.
#[derive(Clone, Debug)]
pub struct PathwayGraph {
    id: String,
    title: String,
    vertices: Vec<PathwayVertex>,
    edges: Vec<PathwayEdge>,
    index_by_id: HashMap<VertexId, usize>,
}

impl PathwayGraph {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        vertices: Vec<PathwayVertex>,
        edges: Vec<PathwayEdge>,
    ) -> Result<Self, PathwayError> {
        let id = id.into();

        let mut index_by_id = HashMap::with_capacity(vertices.len());
        for (index, vertex) in vertices.iter().enumerate() {
            if index_by_id.insert(vertex.id.clone(), index).is_some() {
                return Err(PathwayError::DuplicateVertex {
                    pathway: id,
                    vertex: vertex.id.clone(),
                });
            }
        }

        for edge in &edges {
            for endpoint in [&edge.source, &edge.target] {
                if !index_by_id.contains_key(endpoint) {
                    return Err(PathwayError::dangling(endpoint));
                }
            }
        }

        Ok(Self {
            id,
            title: title.into(),
            vertices,
            edges,
            index_by_id,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    pub fn vertices(&self) -> &[PathwayVertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[PathwayEdge] {
        &self.edges
    }

    pub fn vertex(&self, id: &VertexId) -> Option<&PathwayVertex> {
        self.index_by_id.get(id).map(|&index| &self.vertices[index])
    }

    pub fn contains(&self, id: &VertexId) -> bool {
        self.index_by_id.contains_key(id)
    }

    /// Vertices reachable from `start` when edge direction is ignored.
    pub fn component_of(&self, start: &VertexId) -> HashSet<VertexId> {
        let mut visited = HashSet::new();
        if !self.contains(start) {
            return visited;
        }

        let mut neighbors: HashMap<&VertexId, Vec<&VertexId>> = HashMap::new();
        for edge in &self.edges {
            neighbors.entry(&edge.source).or_default().push(&edge.target);
            neighbors.entry(&edge.target).or_default().push(&edge.source);
        }

        let mut queue = VecDeque::from([start]);
        visited.insert(start.clone());

        while let Some(current) = queue.pop_front() {
            let Some(next) = neighbors.get(current) else {
                continue;
            };

            for &vertex in next {
                if visited.insert(vertex.clone()) {
                    queue.push_back(vertex);
                }
            }
        }

        visited
    }
}
