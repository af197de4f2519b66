//! Graph analytics over the prerequisite graph.
//!
//! Cycle detection uses Tarjan's strongly connected components; any component
//! with more than one member, or a node listing itself as a prerequisite, is
//! a cycle.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::ld::Document;

use super::index::LayoutIndex;

/// Prerequisite cycles among the Concept and Goal nodes of `document`.
///
/// Each cycle lists its members' local ids sorted; cycles are sorted too.
pub fn prerequisite_cycles(document: &Document) -> Vec<Vec<String>> {
    cycles_in(&LayoutIndex::build(document))
}

/// Build a petgraph view of the index with edges prerequisite → dependent.
pub fn prerequisite_graph(index: &LayoutIndex) -> DiGraph<usize, ()> {
    let mut graph = DiGraph::with_capacity(index.len(), index.len());
    let nodes: Vec<NodeIndex> = (0..index.len()).map(|i| graph.add_node(i)).collect();
    for (i, meta) in index.entries().iter().enumerate() {
        for prereq in &meta.prerequisites {
            if let Some(p) = index.position(prereq) {
                graph.update_edge(nodes[p], nodes[i], ());
            }
        }
    }
    graph
}

pub(crate) fn cycles_in(index: &LayoutIndex) -> Vec<Vec<String>> {
    let graph = prerequisite_graph(index);
    let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|&n| graph.find_edge(n, n).is_some())
        })
        .map(|component| {
            let mut members: Vec<String> = component
                .iter()
                .map(|&n| index.entries()[graph[n]].local_id.clone())
                .collect();
            members.sort();
            members
        })
        .collect();
    cycles.sort();
    cycles
}
