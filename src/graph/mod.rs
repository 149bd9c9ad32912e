//! Dependency graphs over assembled packages.
//!
//! [`PackageGraph`] holds every package reachable from a root, each once.
//! [`TargetGraph`] links the targets of those packages through their
//! references and yields the order the build tool has to build them in.

mod package_graph;
mod target_graph;

pub use package_graph::PackageGraph;
pub use target_graph::TargetGraph;

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

/// Labels of the nodes on one cycle of `graph`, the first node repeated at
/// the end. Empty if the graph is acyclic.
fn find_cycle<N, E>(graph: &DiGraph<N, E>, label: impl Fn(&N) -> String) -> Vec<String> {
    let Some(component) = tarjan_scc(graph)
        .into_iter()
        .find(|scc| scc.len() > 1 || scc.iter().any(|&n| graph.contains_edge(n, n)))
    else {
        return Vec::new();
    };

    let members: HashSet<NodeIndex> = component.iter().copied().collect();
    let start = component[0];

    // Shortest walk start -> ... -> start inside the component.
    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        for next in graph.neighbors(node) {
            if !members.contains(&next) || parent.contains_key(&next) {
                continue;
            }
            parent.insert(next, node);
            if next == start {
                queue.clear();
                break;
            }
            queue.push_back(next);
        }
    }

    let mut path = vec![start];
    let mut current = start;
    while let Some(&prev) = parent.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.push(start);
    path.reverse();

    path.into_iter().map(|n| label(&graph[n])).collect()
}
