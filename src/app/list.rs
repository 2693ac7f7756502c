use std::collections::HashSet;

use tracing::debug;

use crate::pathway::{PathwayGraph, VertexId};
use crate::scene::PathwayListFilter;

pub struct PathwayListEntry {
    pub title: String,
    vertices: HashSet<VertexId>,
}

/// Pathways on offer next to the diagram. While a vertex is selected only
/// pathways containing it are listed.
#[derive(Default)]
pub struct PathwayList {
    entries: Vec<PathwayListEntry>,
    filter: Option<VertexId>,
}

impl PathwayList {
    pub fn new<'a>(pathways: impl IntoIterator<Item = &'a PathwayGraph>) -> Self {
        let entries = pathways
            .into_iter()
            .map(|pathway| PathwayListEntry {
                title: pathway.title().to_owned(),
                vertices: pathway
                    .vertices()
                    .iter()
                    .map(|vertex| vertex.id.clone())
                    .collect(),
            })
            .collect();

        Self {
            entries,
            filter: None,
        }
    }

    pub fn filter(&self) -> Option<&VertexId> {
        self.filter.as_ref()
    }

    pub fn visible(&self) -> impl Iterator<Item = (usize, &PathwayListEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                self.filter
                    .as_ref()
                    .is_none_or(|vertex| entry.vertices.contains(vertex))
            })
    }
}

impl PathwayListFilter for PathwayList {
    fn filter_list(&mut self, vertex: &VertexId) {
        debug!(%vertex, "pathway list filtered");
        self.filter = Some(vertex.clone());
    }

    fn unfilter_list(&mut self) {
        debug!("pathway list unfiltered");
        self.filter = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathway::{PathwayVertex, VertexKind};

    fn pathway(id: &str, vertices: &[&str]) -> PathwayGraph {
        PathwayGraph::new(
            id,
            id.to_uppercase(),
            vertices
                .iter()
                .map(|vertex| PathwayVertex::new(*vertex, VertexKind::Gene))
                .collect(),
            Vec::new(),
        )
        .unwrap()
    }

    fn visible_titles(list: &PathwayList) -> Vec<&str> {
        list.visible().map(|(_, entry)| entry.title.as_str()).collect()
    }

    #[test]
    fn filter_keeps_pathways_with_the_vertex() {
        let pathways = [pathway("p1", &["A", "B"]), pathway("p2", &["C"]), pathway("p3", &["A"])];
        let mut list = PathwayList::new(&pathways);
        assert_eq!(visible_titles(&list), ["P1", "P2", "P3"]);

        list.filter_list(&VertexId::from("A"));
        assert_eq!(visible_titles(&list), ["P1", "P3"]);
        assert_eq!(list.visible().map(|(index, _)| index).collect::<Vec<_>>(), [0, 2]);

        list.unfilter_list();
        assert_eq!(visible_titles(&list), ["P1", "P2", "P3"]);
        assert!(list.filter().is_none());
    }
}
