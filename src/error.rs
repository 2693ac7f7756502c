use thiserror::Error;

use crate::pathway::VertexId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PathwayError {
    #[error("invalid merge state: {reason}")]
    InvalidMergeState { reason: String },

    #[error("dangling reference to vertex `{vertex}`")]
    DanglingReference { vertex: VertexId },

    #[error("pathway `{pathway}` declares vertex `{vertex}` more than once")]
    DuplicateVertex { pathway: String, vertex: VertexId },
}

impl PathwayError {
    pub fn invalid_merge(reason: impl Into<String>) -> Self {
        Self::InvalidMergeState {
            reason: reason.into(),
        }
    }

    pub fn dangling(vertex: &VertexId) -> Self {
        Self::DanglingReference {
            vertex: vertex.clone(),
        }
    }
}
