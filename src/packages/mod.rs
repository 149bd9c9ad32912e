//! Built-in package declarations.
//!
//! Each module declares one package. Dependency packages are passed in by
//! the caller (usually [`PackageCatalog`](crate::catalog::PackageCatalog)),
//! so assembling a package never reaches for global state.

pub mod callocator;
pub mod cbase;
pub mod cframegraph;
pub mod cunittest;

/// Repository path shared by all built-in packages.
pub const REPO_PATH: &str = "github.com\\jurgen-kluft";
