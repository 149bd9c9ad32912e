//! Descriptor fingerprints.
//!
//! Two assemblies of the same package yield the same fingerprint; any change
//! to a name, path, target or edge, here or in a dependency package, changes
//! it.

use std::collections::HashSet;

use crate::core::{Package, Target};
use crate::util::hash::Fingerprint;

/// SHA-256 fingerprint of a package and all packages it depends on.
///
/// Each package is hashed once, dependencies before dependents, however many
/// paths lead to it.
pub fn fingerprint(package: &Package) -> String {
    let mut fp = Fingerprint::new();
    for pkg in dependency_order(package) {
        update_package(&mut fp, pkg);
    }
    fp.finish()
}

/// `package` and its transitive dependencies, each name once, in post-order
/// of declaration.
fn dependency_order(package: &Package) -> Vec<&Package> {
    fn visit<'a>(pkg: &'a Package, seen: &mut HashSet<&'a str>, out: &mut Vec<&'a Package>) {
        if !seen.insert(pkg.name()) {
            return;
        }
        for dep in pkg.packages() {
            visit(dep, seen, out);
        }
        out.push(pkg);
    }

    let mut out = Vec::new();
    visit(package, &mut HashSet::new(), &mut out);
    out
}

fn update_package(fp: &mut Fingerprint, package: &Package) {
    fp.field(package.name())
        .field(package.repo_path().to_string())
        .list(package.packages().iter().map(|p| p.name()));

    for target in [package.main_lib(), package.test_lib(), package.unittest()] {
        update_target(fp, target);
    }
}

fn update_target(fp: &mut Fingerprint, target: Option<&Target>) {
    fp.optional(target.map(Target::name));
    let Some(target) = target else {
        return;
    };

    fp.field(target.kind().slot())
        .field(target.path().to_string())
        .list(
            target
                .dependencies()
                .iter()
                .map(|d| format!("{}:{}", d, d.kind.slot())),
        );
}
