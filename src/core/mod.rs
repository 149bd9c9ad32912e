//! Core data structures for denv.
//!
//! This module contains the descriptor model handed to the build tool:
//! - Repository paths (RepoPath)
//! - Packages and their dependency packages
//! - Targets and the references between them

pub mod errors;
pub mod package;
pub mod repo_path;
pub mod target;

pub use errors::{PackageError, PackageResult};
pub use package::Package;
pub use repo_path::{RepoPath, Separator};
pub use target::{SourceLayout, Target, TargetKind, TargetRef};
