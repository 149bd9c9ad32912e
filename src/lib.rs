//! denv - package descriptors for the cframegraph C++ library
//!
//! This crate assembles the descriptors a build orchestrator consumes:
//! packages, their dependency packages, and the library and unit-test
//! targets wired between them.

pub mod catalog;
pub mod core;
pub mod graph;
pub mod ops;
pub mod packages;
pub mod util;

pub use catalog::{PackageCatalog, PackageDescriptor};
pub use core::{Package, PackageError, RepoPath, Target, TargetKind, TargetRef};
pub use graph::{PackageGraph, TargetGraph};
pub use util::context::GlobalContext;
