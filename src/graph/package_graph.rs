//! PackageGraph - every package reachable from a root, each exactly once.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::core::{Package, PackageError, PackageResult};

use super::find_cycle;

/// The package dependency graph. An edge `a -> b` means `a` lists `b` as
/// a dependency package.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    graph: DiGraph<Arc<Package>, ()>,
    by_name: HashMap<String, NodeIndex>,
    root: NodeIndex,
}

impl PackageGraph {
    /// Collect `root` and all packages it depends on, transitively.
    ///
    /// Packages are deduplicated by name. Two descriptors sharing a name must
    /// be the same descriptor (or at least equal).
    pub fn build(root: &Arc<Package>) -> PackageResult<Self> {
        let mut graph = DiGraph::new();
        let mut by_name = HashMap::new();

        let root_node = graph.add_node(Arc::clone(root));
        by_name.insert(root.name().to_string(), root_node);

        let mut stack = vec![root_node];
        while let Some(node) = stack.pop() {
            let pkg = Arc::clone(&graph[node]);
            for dep in pkg.packages() {
                let dep_node = match by_name.get(dep.name()) {
                    Some(&existing) => {
                        let known: &Arc<Package> = &graph[existing];
                        if !Arc::ptr_eq(known, dep) && **known != **dep {
                            return Err(PackageError::ConflictingPackage {
                                package: dep.name().to_string(),
                            });
                        }
                        existing
                    }
                    None => {
                        let added = graph.add_node(Arc::clone(dep));
                        by_name.insert(dep.name().to_string(), added);
                        stack.push(added);
                        added
                    }
                };
                graph.update_edge(node, dep_node, ());
            }
        }

        tracing::debug!(
            "package graph for {}: {} packages",
            root.name(),
            graph.node_count()
        );

        let pkg_graph = PackageGraph {
            graph,
            by_name,
            root: root_node,
        };
        // Reject cycles up front so topological_order() cannot fail later.
        pkg_graph.check_acyclic()?;
        Ok(pkg_graph)
    }

    fn check_acyclic(&self) -> PackageResult<()> {
        if toposort(&self.graph, None).is_err() {
            return Err(PackageError::CycleDetected {
                path: find_cycle(&self.graph, |p| p.name().to_string()),
            });
        }
        Ok(())
    }

    /// The root package.
    pub fn root(&self) -> &Arc<Package> {
        &self.graph[self.root]
    }

    /// Get a package by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Package>> {
        self.by_name.get(name).map(|&n| &self.graph[n])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of distinct packages.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterate over all packages, root first.
    pub fn packages(&self) -> impl Iterator<Item = &Arc<Package>> {
        self.graph.node_indices().map(|n| &self.graph[n])
    }

    /// Direct dependency packages, in declaration order.
    pub fn deps(&self, name: &str) -> Vec<&Arc<Package>> {
        self.get(name)
            .map(|pkg| {
                pkg.packages()
                    .iter()
                    .filter_map(|dep| self.get(dep.name()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Packages that list `name` as a dependency, sorted by name.
    pub fn dependents(&self, name: &str) -> Vec<&Arc<Package>> {
        let Some(&node) = self.by_name.get(name) else {
            return Vec::new();
        };

        let mut dependents: Vec<&Arc<Package>> = self
            .graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|n| &self.graph[n])
            .collect();
        dependents.sort_by(|a, b| a.name().cmp(b.name()));
        dependents
    }

    /// Packages in build order: dependencies before dependents.
    pub fn topological_order(&self) -> Vec<&Arc<Package>> {
        let mut order: Vec<&Arc<Package>> = toposort(&self.graph, None)
            .unwrap_or_default()
            .into_iter()
            .map(|n| &self.graph[n])
            .collect();

        // An edge a -> b means "a depends on b", so reverse to put b first.
        order.reverse();
        order
    }

    /// Names of all packages `name` depends on, directly or not.
    pub fn transitive_deps(&self, name: &str) -> HashSet<String> {
        let mut visited = HashSet::new();
        let mut stack: Vec<&str> = vec![name];

        while let Some(current) = stack.pop() {
            if visited.insert(current.to_string()) {
                for dep in self.deps(current) {
                    stack.push(dep.name());
                }
            }
        }

        visited.remove(name);
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PackageCatalog;
    use crate::packages::{cunittest, REPO_PATH};

    fn framegraph_graph() -> PackageGraph {
        let mut catalog = PackageCatalog::builtin();
        let root = catalog.get("cframegraph").unwrap();
        PackageGraph::build(&root).unwrap()
    }

    #[test]
    fn test_shared_dependency_appears_once() {
        let graph = framegraph_graph();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.root().name(), "cframegraph");
        let names: Vec<&str> = graph.dependents("cunittest").iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["callocator", "cbase", "cframegraph"]);
    }

    #[test]
    fn test_deps_keep_declaration_order() {
        let graph = framegraph_graph();
        let names: Vec<&str> = graph.deps("cframegraph").iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["cunittest", "cbase", "callocator"]);
        assert!(graph.deps("unknown").is_empty());
    }

    #[test]
    fn test_topological_order() {
        let graph = framegraph_graph();
        let order: Vec<&str> = graph.topological_order().iter().map(|p| p.name()).collect();

        let pos = |name| order.iter().position(|&n| n == name).unwrap();
        assert!(pos("cunittest") < pos("cbase"));
        assert!(pos("cbase") < pos("callocator"));
        assert!(pos("callocator") < pos("cframegraph"));
    }

    #[test]
    fn test_transitive_deps() {
        let graph = framegraph_graph();

        let deps = graph.transitive_deps("callocator");
        assert_eq!(deps.len(), 2);
        assert!(deps.contains("cbase"));
        assert!(deps.contains("cunittest"));
        assert!(graph.transitive_deps("cunittest").is_empty());
    }

    #[test]
    fn test_conflicting_descriptors_rejected() {
        let unittest = Arc::new(cunittest::package().unwrap());
        let impostor = Arc::new(Package::new(REPO_PATH, "cunittest").unwrap());

        let mut middle = Package::new(REPO_PATH, "cmiddle").unwrap();
        middle.add_package(impostor).unwrap();

        let mut root = Package::new(REPO_PATH, "croot").unwrap();
        root.add_package(unittest).unwrap();
        root.add_package(Arc::new(middle)).unwrap();

        let err = PackageGraph::build(&Arc::new(root)).unwrap_err();
        assert_eq!(
            err,
            PackageError::ConflictingPackage {
                package: "cunittest".into()
            }
        );
    }

    #[test]
    fn test_equal_descriptors_merge() {
        let mut root = Package::new(REPO_PATH, "croot").unwrap();
        let mut middle = Package::new(REPO_PATH, "cmiddle").unwrap();
        middle
            .add_package(Arc::new(cunittest::package().unwrap()))
            .unwrap();
        root.add_package(Arc::new(cunittest::package().unwrap()))
            .unwrap();
        root.add_package(Arc::new(middle)).unwrap();

        let graph = PackageGraph::build(&Arc::new(root)).unwrap();
        assert_eq!(graph.len(), 3);
    }
}
