//! TargetGraph - targets linked through their dependency references.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::{PackageError, PackageResult, TargetRef};

use super::{find_cycle, PackageGraph};

/// The target dependency graph. An edge `a -> b` means target `a` depends
/// on target `b`.
#[derive(Debug, Clone)]
pub struct TargetGraph {
    graph: DiGraph<TargetRef, ()>,
    by_ref: HashMap<(String, String), NodeIndex>,
}

impl TargetGraph {
    /// Link every target of every package in `packages`.
    ///
    /// Each reference must name a package of the graph and a target that
    /// package exposes, with the kind the reference claims.
    pub fn build(packages: &PackageGraph) -> PackageResult<Self> {
        let mut graph = DiGraph::new();
        let mut by_ref = HashMap::new();

        let ordered = packages.topological_order();
        for pkg in &ordered {
            for target in pkg.targets() {
                let node = graph.add_node(target.to_ref());
                by_ref.insert(
                    (pkg.name().to_string(), target.name().to_string()),
                    node,
                );
            }
        }

        for pkg in &ordered {
            for target in pkg.targets() {
                let from = by_ref[&(pkg.name().to_string(), target.name().to_string())];
                for dep in target.dependencies() {
                    let to = by_ref
                        .get(&(dep.package.clone(), dep.target.clone()))
                        .copied()
                        .filter(|&n| graph[n] == *dep)
                        .ok_or_else(|| PackageError::DanglingReference {
                            from: target.to_ref().to_string(),
                            package: dep.package.clone(),
                            target: dep.target.clone(),
                        })?;
                    graph.update_edge(from, to, ());
                }
            }
        }

        if toposort(&graph, None).is_err() {
            return Err(PackageError::CycleDetected {
                path: find_cycle(&graph, |t| t.to_string()),
            });
        }

        Ok(TargetGraph { graph, by_ref })
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, package: &str, target: &str) -> bool {
        self.by_ref
            .contains_key(&(package.to_string(), target.to_string()))
    }

    /// Direct dependencies of a target.
    pub fn deps(&self, package: &str, target: &str) -> Vec<&TargetRef> {
        let Some(&node) = self.by_ref.get(&(package.to_string(), target.to_string())) else {
            return Vec::new();
        };
        let mut deps: Vec<&TargetRef> = self.graph.neighbors(node).map(|n| &self.graph[n]).collect();
        deps.sort();
        deps
    }

    /// Targets in build order: every target after the targets it depends on.
    pub fn build_order(&self) -> Vec<&TargetRef> {
        let mut order: Vec<&TargetRef> = toposort(&self.graph, None)
            .unwrap_or_default()
            .into_iter()
            .map(|n| &self.graph[n])
            .collect();
        order.reverse();
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::catalog::PackageCatalog;
    use crate::core::{Package, TargetKind};
    use crate::packages::REPO_PATH;

    fn framegraph_targets() -> TargetGraph {
        let mut catalog = PackageCatalog::builtin();
        let root = catalog.get("cframegraph").unwrap();
        TargetGraph::build(&PackageGraph::build(&root).unwrap()).unwrap()
    }

    #[test]
    fn test_all_targets_present() {
        let targets = framegraph_targets();

        // cunittest exposes two targets, the others three each.
        assert_eq!(targets.len(), 11);
        assert!(targets.contains("cframegraph", "cframegraph_unittest"));
        assert!(!targets.contains("cframegraph", "cframegraph_bench"));
    }

    #[test]
    fn test_build_order_respects_edges() {
        let targets = framegraph_targets();
        let order: Vec<String> = targets.build_order().iter().map(|t| t.to_string()).collect();
        let pos = |name: &str| order.iter().position(|n| n == name).unwrap();

        assert!(pos("cbase/cbase") < pos("callocator/callocator"));
        assert!(pos("callocator/callocator") < pos("cframegraph/cframegraph"));
        assert!(pos("cframegraph/cframegraph_test") < pos("cframegraph/cframegraph_unittest"));
        assert!(pos("cunittest/cunittest") < pos("cframegraph/cframegraph_unittest"));
    }

    #[test]
    fn test_deps() {
        let targets = framegraph_targets();
        let deps: Vec<String> = targets
            .deps("cframegraph", "cframegraph")
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(deps, vec!["callocator/callocator", "cbase/cbase"]);
    }

    #[test]
    fn test_dangling_reference() {
        let mut pkg = Package::new(REPO_PATH, "clonely").unwrap();
        let mut lib = pkg.new_library().unwrap();
        lib.add_dependency(TargetRef::new("cmissing", "cmissing", TargetKind::Library))
            .unwrap();
        pkg.set_main_lib(lib).unwrap();

        let graph = PackageGraph::build(&Arc::new(pkg)).unwrap();
        let err = TargetGraph::build(&graph).unwrap_err();
        assert_eq!(
            err,
            PackageError::DanglingReference {
                from: "clonely/clonely".into(),
                package: "cmissing".into(),
                target: "cmissing".into(),
            }
        );
    }

    #[test]
    fn test_kind_mismatch_is_dangling() {
        let mut pkg = Package::new(REPO_PATH, "cmixed").unwrap();
        let lib = pkg.new_library().unwrap();
        let mut unittest = pkg.new_unittest().unwrap();
        unittest
            .add_dependency(TargetRef::new("cmixed", "cmixed", TargetKind::TestLibrary))
            .unwrap();
        pkg.set_main_lib(lib).unwrap();
        pkg.set_unittest(unittest).unwrap();

        let graph = PackageGraph::build(&Arc::new(pkg)).unwrap();
        assert!(matches!(
            TargetGraph::build(&graph),
            Err(PackageError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_target_cycle_detected() {
        let mut pkg = Package::new(REPO_PATH, "cloop").unwrap();
        let mut lib = pkg.new_library().unwrap();
        let mut test_lib = pkg.new_test_library().unwrap();
        lib.depend_on(&test_lib).unwrap();
        test_lib.depend_on(&lib).unwrap();
        pkg.set_main_lib(lib).unwrap();
        pkg.set_test_lib(test_lib).unwrap();

        let graph = PackageGraph::build(&Arc::new(pkg)).unwrap();
        match TargetGraph::build(&graph).unwrap_err() {
            PackageError::CycleDetected { path } => {
                assert_eq!(path.len(), 3);
                assert_eq!(path.first(), path.last());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
