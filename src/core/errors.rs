//! Errors raised while assembling and linking package descriptors.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while building, registering or linking package descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum PackageError {
    #[error("invalid package name `{name}`: {reason}")]
    #[diagnostic(code(denv::package::invalid_name))]
    InvalidName { name: String, reason: &'static str },

    #[error("invalid repository path `{path}`: {reason}")]
    #[diagnostic(code(denv::package::invalid_repo_path))]
    InvalidRepoPath { path: String, reason: &'static str },

    #[error("target `{target}` cannot depend on itself")]
    #[diagnostic(code(denv::target::self_dependency))]
    SelfDependency { target: String },

    #[error("package `{package}` already has a {slot}")]
    #[diagnostic(
        code(denv::package::duplicate_target),
        help("A package exposes at most one target per slot")
    )]
    DuplicateTarget {
        package: String,
        slot: &'static str,
    },

    #[error("package `{package}` already has a target named `{target}`")]
    #[diagnostic(
        code(denv::package::duplicate_target_name),
        help("Target names identify targets within a package and must differ per slot")
    )]
    DuplicateTargetName { package: String, target: String },

    #[error("target `{target}` belongs to `{owner}`, not to `{package}`")]
    #[diagnostic(code(denv::package::foreign_target))]
    ForeignTarget {
        package: String,
        target: String,
        owner: String,
    },

    #[error("package `{package}` already contains `{dependency}`")]
    #[diagnostic(code(denv::package::duplicate_package))]
    DuplicatePackage { package: String, dependency: String },

    #[error("package `{package}` does not expose a {slot}")]
    #[diagnostic(code(denv::package::missing_target))]
    MissingTarget {
        package: String,
        slot: &'static str,
    },

    #[error("package not found: `{package}`")]
    #[diagnostic(code(denv::catalog::not_found))]
    PackageNotFound {
        package: String,
        suggestions: Vec<String>,
    },

    #[error("two different descriptors are named `{package}`")]
    #[diagnostic(
        code(denv::graph::conflicting_package),
        help("Share one descriptor between all packages that depend on it")
    )]
    ConflictingPackage { package: String },

    #[error("`{from}` depends on `{package}/{target}`, which does not exist")]
    #[diagnostic(code(denv::graph::dangling_reference))]
    DanglingReference {
        from: String,
        package: String,
        target: String,
    },

    #[error("cycle detected: {}", .path.join(" -> "))]
    #[diagnostic(code(denv::graph::cycle))]
    CycleDetected { path: Vec<String> },
}

impl PackageError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            PackageError::PackageNotFound {
                suggestions: names,
                ..
            } => {
                let mut diag = diag;
                if !names.is_empty() {
                    diag = diag.with_context(format!("did you mean: {}", names.join(", ")));
                }
                diag.with_suggestion(suggestions::PACKAGE_NOT_FOUND)
            }
            PackageError::DanglingReference { .. } => {
                diag.with_suggestion(suggestions::DANGLING_REFERENCE)
            }
            PackageError::CycleDetected { .. } => diag.with_suggestion(suggestions::CYCLE),
            _ => diag,
        }
    }
}

pub type PackageResult<T> = std::result::Result<T, PackageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_path() {
        let err = PackageError::CycleDetected {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "cycle detected: a -> b -> a");
    }

    #[test]
    fn test_not_found_diagnostic_mentions_suggestions() {
        let err = PackageError::PackageNotFound {
            package: "cbse".into(),
            suggestions: vec!["cbase".into()],
        };
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("package not found: `cbse`"));
        assert!(output.contains("did you mean: cbase"));
        assert!(output.contains("denv tree"));
    }
}
