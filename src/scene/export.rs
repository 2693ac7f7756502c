use serde::Serialize;

use crate::layout::LayoutOutcome;
use crate::pathway::Contribution;

use super::{NodeVariant, PathwayListFilter, PathwayScene};

#[derive(Debug, Serialize)]
pub struct SceneSnapshot {
    pub width: f32,
    pub height: f32,
    pub pathways: Vec<PathwaySnapshot>,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    pub selected: Option<String>,
    pub layout: Option<LayoutOutcome>,
}

#[derive(Debug, Serialize)]
pub struct PathwaySnapshot {
    pub id: String,
    pub role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub kind: NodeVariant,
    pub label: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeSnapshot {
    pub source: String,
    pub target: String,
}

impl SceneSnapshot {
    pub(super) fn capture<L: PathwayListFilter>(scene: &PathwayScene<L>) -> Self {
        let size = scene.min_size();

        let pathways = scene
            .model()
            .contributions()
            .iter()
            .map(|contribution| match contribution {
                Contribution::Focus { pathway } => PathwaySnapshot {
                    id: pathway.clone(),
                    role: "focus",
                    anchor: None,
                },
                Contribution::Context {
                    pathway, anchor, ..
                } => PathwaySnapshot {
                    id: pathway.clone(),
                    role: "context",
                    anchor: anchor.as_ref().map(ToString::to_string),
                },
            })
            .collect();

        let nodes = scene
            .nodes()
            .iter()
            .map(|node| NodeSnapshot {
                id: node.vertex().to_string(),
                kind: node.variant(),
                label: node.label().to_owned(),
                x: node.position().x,
                y: node.position().y,
            })
            .collect();

        let edges = scene
            .edges()
            .iter()
            .map(|edge| EdgeSnapshot {
                source: edge.edge().source.to_string(),
                target: edge.edge().target.to_string(),
            })
            .collect();

        Self {
            width: size.x,
            height: size.y,
            pathways,
            nodes,
            edges,
            selected: scene.selected_vertex().map(ToString::to_string),
            layout: scene.last_layout(),
        }
    }
}
