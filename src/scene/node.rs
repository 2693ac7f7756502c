use eframe::egui::{Vec2, vec2};
use serde::Serialize;

use crate::pathway::{NodeHandle, PathwayEdge, PathwayVertex, VertexId, VertexKind};

/// Outline a node is painted with, in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeShape {
    Rect { size: Vec2 },
    Circle { radius: f32 },
    RoundedRect { size: Vec2, rounding: f32 },
}

impl NodeShape {
    pub fn half_extent(self) -> Vec2 {
        match self {
            Self::Rect { size } | Self::RoundedRect { size, .. } => size * 0.5,
            Self::Circle { radius } => vec2(radius, radius),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeVariant {
    Gene,
    Compound,
    Group,
}

impl NodeVariant {
    pub fn for_kind(kind: VertexKind) -> Self {
        match kind {
            VertexKind::Compound => Self::Compound,
            VertexKind::Group => Self::Group,
            VertexKind::Gene => Self::Gene,
        }
    }

    pub fn shape(self) -> NodeShape {
        match self {
            Self::Gene => NodeShape::Rect {
                size: vec2(9.0, 4.0),
            },
            Self::Compound => NodeShape::Circle { radius: 1.5 },
            Self::Group => NodeShape::RoundedRect {
                size: vec2(12.0, 6.0),
                rounding: 1.5,
            },
        }
    }

    pub fn shows_label(self) -> bool {
        !matches!(self, Self::Group)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
    vertex: VertexId,
    label: String,
    variant: NodeVariant,
    position: Vec2,
    selected: bool,
}

impl LayoutNode {
    pub fn from_vertex(vertex: &PathwayVertex, position: Vec2) -> Self {
        Self {
            vertex: vertex.id.clone(),
            label: vertex.display_label().to_owned(),
            variant: NodeVariant::for_kind(vertex.kind),
            position,
            selected: false,
        }
    }

    pub fn vertex(&self) -> &VertexId {
        &self.vertex
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn variant(&self) -> NodeVariant {
        self.variant
    }

    pub fn shape(&self) -> NodeShape {
        self.variant.shape()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(super) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutEdge {
    edge: PathwayEdge,
    source: NodeHandle,
    target: NodeHandle,
}

impl LayoutEdge {
    pub fn new(edge: PathwayEdge, source: NodeHandle, target: NodeHandle) -> Self {
        Self {
            edge,
            source,
            target,
        }
    }

    pub fn edge(&self) -> &PathwayEdge {
        &self.edge
    }

    pub fn source(&self) -> NodeHandle {
        self.source
    }

    pub fn target(&self) -> NodeHandle {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(VertexKind::Gene, NodeVariant::Gene)]
    #[case(VertexKind::Compound, NodeVariant::Compound)]
    #[case(VertexKind::Group, NodeVariant::Group)]
    fn vertex_kind_picks_the_node_variant(#[case] kind: VertexKind, #[case] expected: NodeVariant) {
        let vertex = PathwayVertex::new("v", kind).with_label("V");
        let node = LayoutNode::from_vertex(&vertex, vec2(3.0, 4.0));

        assert_eq!(node.variant(), expected);
        assert_eq!(node.vertex(), &vertex.id);
        assert_eq!(node.label(), "V");
        assert_eq!(node.position(), vec2(3.0, 4.0));
        assert!(!node.is_selected());
    }

    #[test]
    fn compound_shape_is_round() {
        assert_eq!(
            NodeVariant::Compound.shape().half_extent(),
            vec2(1.5, 1.5)
        );
        assert_eq!(NodeVariant::Gene.shape().half_extent(), vec2(4.5, 2.0));
    }
}
