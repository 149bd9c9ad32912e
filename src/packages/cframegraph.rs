//! `cframegraph` - the frame-graph library.
//!
//! Layout of the assembled descriptor:
//!
//! - packages: `cunittest`, `cbase`, `callocator`
//! - `cframegraph` (library): `cbase`, `callocator`
//! - `cframegraph_test` (test library): `cbase_test`, `callocator_test`, `cunittest_test`
//! - `cframegraph_unittest`: `cunittest`, `cframegraph_test`

use std::sync::Arc;

use crate::core::{Package, PackageResult};
use crate::packages::REPO_PATH;

pub const NAME: &str = "cframegraph";

/// Assemble the `cframegraph` descriptor from its three dependencies.
pub fn package(
    unittest: Arc<Package>,
    base: Arc<Package>,
    allocator: Arc<Package>,
) -> PackageResult<Package> {
    tracing::debug!(
        "assembling {} with {}, {}, {}",
        NAME,
        unittest.name(),
        base.name(),
        allocator.name()
    );

    let mut pkg = Package::new(REPO_PATH, NAME)?;
    pkg.add_package(Arc::clone(&unittest))?;
    pkg.add_package(Arc::clone(&base))?;
    pkg.add_package(Arc::clone(&allocator))?;

    let mut mainlib = pkg.new_library()?;
    mainlib.add_dependencies(base.main_lib_outputs()?)?;
    mainlib.add_dependencies(allocator.main_lib_outputs()?)?;

    let mut testlib = pkg.new_test_library()?;
    testlib.add_dependencies(base.test_lib_outputs()?)?;
    testlib.add_dependencies(allocator.test_lib_outputs()?)?;
    testlib.add_dependencies(unittest.test_lib_outputs()?)?;

    let mut maintest = pkg.new_unittest()?;
    maintest.add_dependencies(unittest.main_lib_outputs()?)?;
    maintest.depend_on(&testlib)?;

    pkg.set_main_lib(mainlib)?;
    pkg.set_test_lib(testlib)?;
    pkg.set_unittest(maintest)?;
    Ok(pkg)
}
