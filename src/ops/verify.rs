//! Structural verification of a package descriptor.
//!
//! `denv verify` checks the wiring rules the build tool relies on:
//!
//! 1. Every edge points at the package itself or a declared dependency
//!    package, and at a target that package really exposes.
//! 2. The main library links main libraries only; test libraries link
//!    test libraries.
//! 3. The unit test links one of the package's own libraries.
//!
//! Unique dependency packages and target names are enforced while the
//! package is built.

use crate::core::{Package, Target, TargetKind, TargetRef};
use crate::util::diagnostic::Diagnostic;

/// Result of verifying one package.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub package: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl VerifyReport {
    pub fn errors(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warnings(&self) -> usize {
        self.diagnostics.len() - self.errors()
    }

    pub fn is_ok(&self) -> bool {
        self.errors() == 0
    }
}

/// Verify the wiring of `package`. Dependency packages are not descended
/// into; verify them separately.
pub fn verify(package: &Package) -> VerifyReport {
    let mut diagnostics = Vec::new();

    if package.main_lib().is_none() {
        diagnostics.push(
            Diagnostic::warning("package has no main library")
                .with_subject(package.name())
                .with_context("dependent packages cannot link against it"),
        );
    }

    for target in package.targets() {
        for dep in target.dependencies() {
            check_edge(package, target, dep, &mut diagnostics);
        }
    }

    if let Some(unittest) = package.unittest() {
        check_unittest(package, unittest, &mut diagnostics);
    }

    tracing::debug!(
        "verified {}: {} finding(s)",
        package.name(),
        diagnostics.len()
    );

    VerifyReport {
        package: package.name().to_string(),
        diagnostics,
    }
}

fn check_edge(package: &Package, target: &Target, dep: &TargetRef, out: &mut Vec<Diagnostic>) {
    let subject = target.to_ref().to_string();
    let edge = format!("{} -> {}", subject, dep);

    let exposed = if dep.package == package.name() {
        package.target(&dep.target)
    } else {
        match package.package(&dep.package) {
            Some(dep_pkg) => dep_pkg.target(&dep.target),
            None => {
                out.push(
                    Diagnostic::error(format!(
                        "`{}` is not a dependency package of `{}`",
                        dep.package,
                        package.name()
                    ))
                    .with_subject(&subject)
                    .with_context(edge)
                    .with_suggestion(format!("declare `{}` with `add_package`", dep.package)),
                );
                return;
            }
        }
    };

    match exposed {
        None => out.push(
            Diagnostic::error(format!("`{}` does not expose `{}`", dep.package, dep.target))
                .with_subject(&subject)
                .with_context(edge),
        ),
        Some(t) if t.kind() != dep.kind => out.push(
            Diagnostic::error(format!(
                "`{}` is a {}, but the edge expects a {}",
                dep,
                t.kind(),
                dep.kind
            ))
            .with_subject(&subject)
            .with_context(edge),
        ),
        Some(_) => {}
    }

    match (target.kind(), dep.kind) {
        (TargetKind::Library, kind) if kind != TargetKind::Library => out.push(
            Diagnostic::error(format!("main library depends on a {}", kind))
                .with_subject(&subject)
                .with_context(format!("{} -> {}", subject, dep))
                .with_suggestion(format!(
                    "depend on `{}.main_lib_outputs()` instead",
                    dep.package
                )),
        ),
        (TargetKind::TestLibrary, TargetKind::Library) => out.push(
            Diagnostic::warning("test library depends on a main library")
                .with_subject(&subject)
                .with_context(format!("{} -> {}", subject, dep))
                .with_suggestion(format!(
                    "depend on `{}.test_lib_outputs()` instead",
                    dep.package
                )),
        ),
        (_, TargetKind::Unittest) => out.push(
            Diagnostic::error("unit-test executables cannot be linked against")
                .with_subject(&subject)
                .with_context(format!("{} -> {}", subject, dep)),
        ),
        _ => {}
    }
}

fn check_unittest(package: &Package, unittest: &Target, out: &mut Vec<Diagnostic>) {
    let subject = unittest.to_ref().to_string();
    let own: Vec<&TargetRef> = unittest
        .dependencies()
        .iter()
        .filter(|d| d.package == package.name())
        .collect();

    if own.is_empty() {
        out.push(
            Diagnostic::error("unit test does not link the package it tests")
                .with_subject(&subject)
                .with_suggestion("add the test library with `depend_on`"),
        );
    } else if package.test_lib().is_some()
        && !own.iter().any(|d| d.kind == TargetKind::TestLibrary)
    {
        out.push(
            Diagnostic::warning("unit test links the main library instead of the test library")
                .with_subject(&subject),
        );
    }
}
