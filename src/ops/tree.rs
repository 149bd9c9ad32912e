//! `denv tree` - render the package dependency tree.

use std::collections::HashSet;

use crate::graph::PackageGraph;

/// Render the dependency tree of the graph's root.
///
/// Packages already shown higher up are marked `(*)` and not expanded
/// again. `max_depth` limits how many levels below the root are shown.
pub fn tree(graph: &PackageGraph, max_depth: Option<usize>) -> String {
    let mut out = String::new();
    let root = graph.root();
    out.push_str(&format!("{} ({})\n", root.name(), root.repo_path()));

    let mut seen = HashSet::new();
    seen.insert(root.name().to_string());
    render_children(
        graph,
        root.name(),
        "",
        1,
        max_depth.unwrap_or(usize::MAX),
        &mut seen,
        &mut out,
    );
    out
}

fn render_children(
    graph: &PackageGraph,
    name: &str,
    indent: &str,
    depth: usize,
    max_depth: usize,
    seen: &mut HashSet<String>,
    out: &mut String,
) {
    if depth > max_depth {
        return;
    }

    let deps = graph.deps(name);
    for (i, dep) in deps.iter().enumerate() {
        let last = i + 1 == deps.len();
        let branch = if last { "└── " } else { "├── " };

        let is_duplicate = !seen.insert(dep.name().to_string());
        let marker = if is_duplicate { " (*)" } else { "" };
        out.push_str(&format!("{}{}{}{}\n", indent, branch, dep.name(), marker));

        if !is_duplicate {
            let child_indent = format!("{}{}", indent, if last { "    " } else { "│   " });
            render_children(graph, dep.name(), &child_indent, depth + 1, max_depth, seen, out);
        }
    }
}
