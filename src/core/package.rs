//! Package - a named descriptor with its dependency packages and targets.
//!
//! A Package is assembled once per invocation and then shared read-only
//! (`Arc<Package>`) with every package that lists it as a dependency.

use std::fmt;
use std::sync::Arc;

use crate::core::errors::{PackageError, PackageResult};
use crate::core::repo_path::RepoPath;
use crate::core::target::{validate_name, Target, TargetKind, TargetRef};

/// A package descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Package name, also the name of its main library
    name: String,

    /// Repository path the package lives under (without the package name)
    repo_path: RepoPath,

    /// Dependency packages, in declaration order
    packages: Vec<Arc<Package>>,

    main_lib: Option<Target>,
    test_lib: Option<Target>,
    unittest: Option<Target>,
}

impl Package {
    /// Create an empty package descriptor.
    pub fn new(repo_path: &str, name: impl Into<String>) -> PackageResult<Self> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Package {
            repo_path: RepoPath::parse(repo_path)?,
            name,
            packages: Vec::new(),
            main_lib: None,
            test_lib: None,
            unittest: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repo_path(&self) -> &RepoPath {
        &self.repo_path
    }

    /// The project path of this package's targets (`<repo path>/<name>`).
    pub fn project_path(&self) -> PackageResult<RepoPath> {
        self.repo_path.join(&self.name)
    }

    /// Dependency packages in declaration order.
    pub fn packages(&self) -> &[Arc<Package>] {
        &self.packages
    }

    /// Look up a direct dependency package by name.
    pub fn package(&self, name: &str) -> Option<&Arc<Package>> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Declare a dependency package.
    pub fn add_package(&mut self, package: Arc<Package>) -> PackageResult<()> {
        if package.name == self.name || self.package(&package.name).is_some() {
            return Err(PackageError::DuplicatePackage {
                package: self.name.clone(),
                dependency: package.name.clone(),
            });
        }

        tracing::debug!("{}: add package {}", self.name, package.name);
        self.packages.push(package);
        Ok(())
    }

    /// Create a main library target for this package.
    pub fn new_library(&self) -> PackageResult<Target> {
        Target::library(&self.name, &self.repo_path)
    }

    /// Create a test library target for this package.
    pub fn new_test_library(&self) -> PackageResult<Target> {
        Target::test_library(&self.name, &self.repo_path)
    }

    /// Create a unit-test target for this package.
    pub fn new_unittest(&self) -> PackageResult<Target> {
        Target::unittest(&self.name, &self.repo_path)
    }

    pub fn main_lib(&self) -> Option<&Target> {
        self.main_lib.as_ref()
    }

    pub fn test_lib(&self) -> Option<&Target> {
        self.test_lib.as_ref()
    }

    pub fn unittest(&self) -> Option<&Target> {
        self.unittest.as_ref()
    }

    /// Attach the main library. A package has at most one.
    pub fn set_main_lib(&mut self, target: Target) -> PackageResult<()> {
        let slot = self.claim_slot(&target, TargetKind::Library)?;
        *slot = Some(target);
        Ok(())
    }

    /// Attach the test library.
    pub fn set_test_lib(&mut self, target: Target) -> PackageResult<()> {
        let slot = self.claim_slot(&target, TargetKind::TestLibrary)?;
        *slot = Some(target);
        Ok(())
    }

    /// Attach the unit-test executable.
    pub fn set_unittest(&mut self, target: Target) -> PackageResult<()> {
        let slot = self.claim_slot(&target, TargetKind::Unittest)?;
        *slot = Some(target);
        Ok(())
    }

    fn claim_slot(
        &mut self,
        target: &Target,
        kind: TargetKind,
    ) -> PackageResult<&mut Option<Target>> {
        if target.package() != self.name || target.kind() != kind {
            return Err(PackageError::ForeignTarget {
                package: self.name.clone(),
                target: target.name().to_string(),
                owner: format!("{} ({})", target.package(), target.kind()),
            });
        }

        let taken = match kind {
            TargetKind::Library => &self.main_lib,
            TargetKind::TestLibrary => &self.test_lib,
            TargetKind::Unittest => &self.unittest,
        };
        if taken.is_some() {
            return Err(PackageError::DuplicateTarget {
                package: self.name.clone(),
                slot: kind.slot(),
            });
        }
        if self.target(target.name()).is_some() {
            return Err(PackageError::DuplicateTargetName {
                package: self.name.clone(),
                target: target.name().to_string(),
            });
        }

        let slot = match kind {
            TargetKind::Library => &mut self.main_lib,
            TargetKind::TestLibrary => &mut self.test_lib,
            TargetKind::Unittest => &mut self.unittest,
        };
        Ok(slot)
    }

    /// The outputs other targets link against to use this package.
    pub fn main_lib_outputs(&self) -> PackageResult<Vec<TargetRef>> {
        self.outputs(self.main_lib.as_ref(), TargetKind::Library)
    }

    /// The outputs test targets link against to use this package.
    pub fn test_lib_outputs(&self) -> PackageResult<Vec<TargetRef>> {
        self.outputs(self.test_lib.as_ref(), TargetKind::TestLibrary)
    }

    fn outputs(&self, target: Option<&Target>, kind: TargetKind) -> PackageResult<Vec<TargetRef>> {
        target
            .map(|t| vec![t.to_ref()])
            .ok_or_else(|| PackageError::MissingTarget {
                package: self.name.clone(),
                slot: kind.slot(),
            })
    }

    /// All attached targets: main library, test library, unit test.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        [&self.main_lib, &self.test_lib, &self.unittest]
            .into_iter()
            .flatten()
    }

    /// Look up an attached target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets().find(|t| t.name() == name)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.repo_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO: &str = "github.com\\jurgen-kluft";

    fn leaf(name: &str) -> Arc<Package> {
        let mut pkg = Package::new(REPO, name).unwrap();
        let lib = pkg.new_library().unwrap();
        let test_lib = pkg.new_test_library().unwrap();
        pkg.set_main_lib(lib).unwrap();
        pkg.set_test_lib(test_lib).unwrap();
        Arc::new(pkg)
    }

    #[test]
    fn test_package_new() {
        let pkg = Package::new(REPO, "cframegraph").unwrap();
        assert_eq!(pkg.name(), "cframegraph");
        assert_eq!(pkg.repo_path().to_string(), "github.com/jurgen-kluft");
        assert_eq!(
            pkg.project_path().unwrap().to_string(),
            "github.com/jurgen-kluft/cframegraph"
        );
        assert_eq!(pkg.targets().count(), 0);
    }

    #[test]
    fn test_add_package_rejects_duplicates() {
        let mut pkg = Package::new(REPO, "cframegraph").unwrap();
        pkg.add_package(leaf("cbase")).unwrap();

        let err = pkg.add_package(leaf("cbase")).unwrap_err();
        assert!(matches!(err, PackageError::DuplicatePackage { .. }));
        assert_eq!(pkg.packages().len(), 1);
    }

    #[test]
    fn test_main_lib_is_unique() {
        let mut pkg = Package::new(REPO, "cbase").unwrap();
        pkg.set_main_lib(pkg.new_library().unwrap()).unwrap();

        let err = pkg.set_main_lib(pkg.new_library().unwrap()).unwrap_err();
        assert_eq!(
            err,
            PackageError::DuplicateTarget {
                package: "cbase".into(),
                slot: "main library",
            }
        );
    }

    #[test]
    fn test_target_name_taken_by_other_slot() {
        let mut pkg = Package::new(REPO, "cdup").unwrap();
        pkg.set_main_lib(pkg.new_library().unwrap()).unwrap();

        let clash = Target::new("cdup", pkg.repo_path(), "cdup", TargetKind::TestLibrary).unwrap();
        let err = pkg.set_test_lib(clash).unwrap_err();
        assert_eq!(
            err,
            PackageError::DuplicateTargetName {
                package: "cdup".into(),
                target: "cdup".into(),
            }
        );
        assert!(pkg.test_lib().is_none());
    }

    #[test]
    fn test_foreign_target_rejected() {
        let mut pkg = Package::new(REPO, "cbase").unwrap();
        let other = Package::new(REPO, "callocator").unwrap();

        assert!(pkg.set_main_lib(other.new_library().unwrap()).is_err());
        assert!(pkg.set_main_lib(pkg.new_test_library().unwrap()).is_err());
    }

    #[test]
    fn test_outputs() {
        let base = leaf("cbase");
        assert_eq!(
            base.main_lib_outputs().unwrap(),
            vec![TargetRef::new("cbase", "cbase", TargetKind::Library)]
        );
        assert_eq!(
            base.test_lib_outputs().unwrap(),
            vec![TargetRef::new("cbase", "cbase_test", TargetKind::TestLibrary)]
        );

        let empty = Package::new(REPO, "empty").unwrap();
        assert!(matches!(
            empty.main_lib_outputs(),
            Err(PackageError::MissingTarget { .. })
        ));
    }

    #[test]
    fn test_target_lookup() {
        let base = leaf("cbase");
        assert_eq!(base.targets().count(), 2);
        assert!(base.target("cbase_test").is_some());
        assert!(base.target("cbase_unittest").is_none());
    }
}
