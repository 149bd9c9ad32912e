//! `callocator` - allocator implementations built on `cbase`.

use std::sync::Arc;

use crate::core::{Package, PackageResult};
use crate::packages::REPO_PATH;

pub const NAME: &str = "callocator";

/// Assemble the `callocator` descriptor.
pub fn package(unittest: Arc<Package>, base: Arc<Package>) -> PackageResult<Package> {
    let mut pkg = Package::new(REPO_PATH, NAME)?;
    pkg.add_package(Arc::clone(&unittest))?;
    pkg.add_package(Arc::clone(&base))?;

    let mut mainlib = pkg.new_library()?;
    mainlib.add_dependencies(base.main_lib_outputs()?)?;

    let mut testlib = pkg.new_test_library()?;
    testlib.add_dependencies(base.test_lib_outputs()?)?;
    testlib.add_dependencies(unittest.test_lib_outputs()?)?;

    let mut maintest = pkg.new_unittest()?;
    maintest.add_dependencies(unittest.main_lib_outputs()?)?;
    maintest.depend_on(&testlib)?;

    pkg.set_main_lib(mainlib)?;
    pkg.set_test_lib(testlib)?;
    pkg.set_unittest(maintest)?;
    Ok(pkg)
}
