mod export;
mod node;
mod selection;

use eframe::egui::{Vec2, vec2};
use tracing::info;

use crate::error::PathwayError;
use crate::layout::{ForceLayout, LayoutConfig, LayoutGraph, LayoutOutcome, MIN_LAYOUT_SIZE};
use crate::pathway::{GraphModel, NodeHandle, PathwayGraph, VertexId};
use crate::util::seed_position;

pub use export::SceneSnapshot;
pub use node::{LayoutEdge, LayoutNode, NodeShape, NodeVariant};
pub use selection::{
    PathwayListFilter, SelectionChange, SelectionController, SelectionHook, SelectionState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathwayRole {
    Focus,
    Context,
}

pub struct PathwayScene<L> {
    model: GraphModel,
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
    selection: SelectionController<L>,
    layout: LayoutConfig,
    last_layout: Option<LayoutOutcome>,
}

impl<L: PathwayListFilter> PathwayScene<L> {
    pub fn new(list: L, layout: LayoutConfig, hook: Option<SelectionHook>) -> Self {
        Self {
            model: GraphModel::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            selection: SelectionController::new(list, hook),
            layout,
            last_layout: None,
        }
    }

    /// With a node selected, merges the part of `graph` around it as a
    /// context pathway and clears the selection. Otherwise `graph` replaces
    /// the focus pathway along with every earlier context.
    pub fn add_pathway(&mut self, graph: &PathwayGraph) -> Result<PathwayRole, PathwayError> {
        let role = match self.selected_vertex().cloned() {
            Some(anchor) if self.model.is_focus_graph_set() => {
                self.model.merge_context_graph(graph, Some(&anchor))?;
                self.selection.clear(&mut self.nodes);
                PathwayRole::Context
            }
            _ => {
                let mut model = GraphModel::new();
                model.set_focus_graph(graph)?;
                self.selection.clear(&mut self.nodes);
                self.model = model;
                PathwayRole::Focus
            }
        };

        self.rebuild()?;
        Ok(role)
    }

    fn rebuild(&mut self) -> Result<(), PathwayError> {
        let frame = self.layout.frame();
        self.model.clear_node_map();

        let nodes = self
            .model
            .combined_vertices()
            .iter()
            .map(|vertex| LayoutNode::from_vertex(vertex, seed_position(vertex.id.as_str(), frame)))
            .collect::<Vec<_>>();

        for (index, node) in nodes.iter().enumerate() {
            self.model.register_node(node.vertex(), NodeHandle::new(index))?;
        }

        let edges = self
            .model
            .combined_edges()
            .iter()
            .map(|edge| {
                let source = self.model.node_for(&edge.source)?;
                let target = self.model.node_for(&edge.target)?;
                Ok(LayoutEdge::new(edge.clone(), source, target))
            })
            .collect::<Result<Vec<_>, PathwayError>>()?;

        self.nodes = nodes;
        self.edges = edges;
        self.last_layout = None;

        info!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "scene rebuilt"
        );
        Ok(())
    }

    pub fn run_layout(&mut self) -> LayoutOutcome {
        let outcome = ForceLayout::new(self.layout).run(self);
        self.last_layout = Some(outcome);
        outcome
    }

    pub fn select(&mut self, vertex: &VertexId) -> Result<SelectionState, PathwayError> {
        let node = self.model.node_for(vertex)?;
        self.selection.select(node, &mut self.nodes);
        Ok(self.selection.state())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.nodes);
    }

    pub fn reset(&mut self) {
        self.selection.clear(&mut self.nodes);
        self.model.reset();
        self.nodes.clear();
        self.edges.clear();
        self.last_layout = None;
    }

    pub fn node_for(&self, vertex: &VertexId) -> Result<&LayoutNode, PathwayError> {
        let handle = self.model.node_for(vertex)?;
        self.nodes
            .get(handle.index())
            .ok_or_else(|| PathwayError::dangling(vertex))
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&LayoutNode> {
        self.nodes.get(handle.index())
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn selected_vertex(&self) -> Option<&VertexId> {
        self.selection
            .state()
            .selected()
            .and_then(|handle| self.node(handle))
            .map(LayoutNode::vertex)
    }

    pub fn list(&self) -> &L {
        self.selection.list()
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn last_layout(&self) -> Option<LayoutOutcome> {
        self.last_layout
    }

    pub fn min_size(&self) -> Vec2 {
        let frame = self.layout.frame();
        vec2(frame.x.max(MIN_LAYOUT_SIZE.x), frame.y.max(MIN_LAYOUT_SIZE.y))
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(self)
    }
}

impl<L> LayoutGraph for PathwayScene<L> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_position(&self, index: usize) -> Vec2 {
        self.nodes[index].position()
    }

    fn set_node_position(&mut self, index: usize, position: Vec2) {
        self.nodes[index].set_position(position);
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edge_endpoints(&self, index: usize) -> (usize, usize) {
        let edge = &self.edges[index];
        (edge.source().index(), edge.target().index())
    }
}
