//! `cunittest` - the unit-test framework every other package tests with.

use crate::core::{Package, PackageResult};
use crate::packages::REPO_PATH;

pub const NAME: &str = "cunittest";

/// Assemble the `cunittest` descriptor. It has no dependencies.
pub fn package() -> PackageResult<Package> {
    let mut pkg = Package::new(REPO_PATH, NAME)?;

    let mainlib = pkg.new_library()?;
    let testlib = pkg.new_test_library()?;

    pkg.set_main_lib(mainlib)?;
    pkg.set_test_lib(testlib)?;
    Ok(pkg)
}
