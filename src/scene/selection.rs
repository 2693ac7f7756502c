use tracing::debug;

use crate::pathway::{NodeHandle, VertexId};

use super::node::LayoutNode;

/// The pathway list next to the diagram. Selection narrows it to pathways
/// containing the selected vertex.
pub trait PathwayListFilter {
    fn filter_list(&mut self, vertex: &VertexId);
    fn unfilter_list(&mut self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(NodeHandle),
}

impl SelectionState {
    pub fn selected(self) -> Option<NodeHandle> {
        match self {
            Self::Unselected => None,
            Self::Selected(node) => Some(node),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEffect {
    Filter {
        deselect: Option<NodeHandle>,
        select: NodeHandle,
    },
    Unfilter {
        deselect: NodeHandle,
    },
}

pub fn transition(state: SelectionState, node: NodeHandle) -> (SelectionState, SelectionEffect) {
    match state {
        SelectionState::Unselected => (
            SelectionState::Selected(node),
            SelectionEffect::Filter {
                deselect: None,
                select: node,
            },
        ),
        SelectionState::Selected(current) if current == node => (
            SelectionState::Unselected,
            SelectionEffect::Unfilter { deselect: current },
        ),
        SelectionState::Selected(current) => (
            SelectionState::Selected(node),
            SelectionEffect::Filter {
                deselect: Some(current),
                select: node,
            },
        ),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<VertexId>,
    pub current: Option<VertexId>,
}

pub type SelectionHook = Box<dyn FnMut(&SelectionChange)>;

pub struct SelectionController<L> {
    state: SelectionState,
    list: L,
    hook: Option<SelectionHook>,
}

impl<L: PathwayListFilter> SelectionController<L> {
    pub fn new(list: L, hook: Option<SelectionHook>) -> Self {
        Self {
            state: SelectionState::Unselected,
            list,
            hook,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    /// Applies one transition. `node` must index into `nodes`.
    pub fn select(&mut self, node: NodeHandle, nodes: &mut [LayoutNode]) {
        let previous = self.selected_vertex(nodes);
        let (next, effect) = transition(self.state, node);

        match effect {
            SelectionEffect::Filter { deselect, select } => {
                if let Some(old) = deselect.and_then(|handle| nodes.get_mut(handle.index())) {
                    old.set_selected(false);
                }
                if let Some(new) = nodes.get_mut(select.index()) {
                    new.set_selected(true);
                    self.list.filter_list(new.vertex());
                }
            }
            SelectionEffect::Unfilter { deselect } => {
                if let Some(old) = nodes.get_mut(deselect.index()) {
                    old.set_selected(false);
                }
                self.list.unfilter_list();
            }
        }

        self.state = next;
        let current = self.selected_vertex(nodes);
        debug!(?previous, ?current, "selection changed");
        self.notify(SelectionChange { previous, current });
    }

    pub fn clear(&mut self, nodes: &mut [LayoutNode]) {
        let SelectionState::Selected(node) = self.state else {
            return;
        };

        let previous = self.selected_vertex(nodes);
        if let Some(old) = nodes.get_mut(node.index()) {
            old.set_selected(false);
        }
        self.state = SelectionState::Unselected;
        self.list.unfilter_list();

        debug!(?previous, "selection cleared");
        self.notify(SelectionChange {
            previous,
            current: None,
        });
    }

    fn selected_vertex(&self, nodes: &[LayoutNode]) -> Option<VertexId> {
        self.state
            .selected()
            .and_then(|handle| nodes.get(handle.index()))
            .map(|node| node.vertex().clone())
    }

    fn notify(&mut self, change: SelectionChange) {
        if let Some(hook) = self.hook.as_mut() {
            hook(&change);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use eframe::egui::Vec2;

    use super::*;
    use crate::pathway::{PathwayVertex, VertexKind};

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub(crate) enum ListCall {
        Filter(VertexId),
        Unfilter,
    }

    #[derive(Default)]
    pub(crate) struct RecordingList {
        pub(crate) calls: Vec<ListCall>,
    }

    impl PathwayListFilter for RecordingList {
        fn filter_list(&mut self, vertex: &VertexId) {
            self.calls.push(ListCall::Filter(vertex.clone()));
        }

        fn unfilter_list(&mut self) {
            self.calls.push(ListCall::Unfilter);
        }
    }

    fn nodes(ids: &[&str]) -> Vec<LayoutNode> {
        ids.iter()
            .map(|id| LayoutNode::from_vertex(&PathwayVertex::new(*id, VertexKind::Gene), Vec2::ZERO))
            .collect()
    }

    fn selected_count(nodes: &[LayoutNode]) -> usize {
        nodes.iter().filter(|node| node.is_selected()).count()
    }

    #[test]
    fn transition_covers_all_three_cases() {
        let a = NodeHandle::new(0);
        let b = NodeHandle::new(1);

        assert_eq!(
            transition(SelectionState::Unselected, a),
            (
                SelectionState::Selected(a),
                SelectionEffect::Filter {
                    deselect: None,
                    select: a
                }
            )
        );
        assert_eq!(
            transition(SelectionState::Selected(a), a),
            (
                SelectionState::Unselected,
                SelectionEffect::Unfilter { deselect: a }
            )
        );
        assert_eq!(
            transition(SelectionState::Selected(a), b),
            (
                SelectionState::Selected(b),
                SelectionEffect::Filter {
                    deselect: Some(a),
                    select: b
                }
            )
        );
    }

    #[test]
    fn select_then_reselect_toggles_off() {
        let mut nodes = nodes(&["A", "B"]);
        let mut controller = SelectionController::new(RecordingList::default(), None);

        controller.select(NodeHandle::new(0), &mut nodes);
        assert_eq!(selected_count(&nodes), 1);
        assert_eq!(
            controller.list().calls,
            [ListCall::Filter(VertexId::from("A"))]
        );

        controller.select(NodeHandle::new(0), &mut nodes);
        assert_eq!(selected_count(&nodes), 0);
        assert_eq!(controller.state(), SelectionState::Unselected);
        assert_eq!(controller.list().calls.last(), Some(&ListCall::Unfilter));
        assert_eq!(controller.list().calls.len(), 2);
    }

    #[test]
    fn selecting_another_node_moves_the_selection() {
        let mut nodes = nodes(&["A", "B"]);
        let mut controller = SelectionController::new(RecordingList::default(), None);

        controller.select(NodeHandle::new(0), &mut nodes);
        controller.select(NodeHandle::new(1), &mut nodes);

        assert_eq!(selected_count(&nodes), 1);
        assert!(nodes[1].is_selected());
        assert_eq!(
            controller.list().calls,
            [
                ListCall::Filter(VertexId::from("A")),
                ListCall::Filter(VertexId::from("B"))
            ]
        );
    }

    #[test]
    fn hook_sees_every_change() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let hook: SelectionHook = Box::new(move |change| sink.borrow_mut().push(change.clone()));
        let mut nodes = nodes(&["A", "B"]);
        let mut controller = SelectionController::new(RecordingList::default(), Some(hook));

        controller.select(NodeHandle::new(0), &mut nodes);
        controller.select(NodeHandle::new(1), &mut nodes);
        controller.clear(&mut nodes);
        controller.clear(&mut nodes);

        let a = Some(VertexId::from("A"));
        let b = Some(VertexId::from("B"));
        assert_eq!(
            *changes.borrow(),
            [
                SelectionChange {
                    previous: None,
                    current: a.clone()
                },
                SelectionChange {
                    previous: a,
                    current: b.clone()
                },
                SelectionChange {
                    previous: b,
                    current: None
                },
            ]
        );
        assert_eq!(controller.list().calls.last(), Some(&ListCall::Unfilter));
        assert_eq!(selected_count(&nodes), 0);
    }
}
