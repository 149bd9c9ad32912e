//! Descriptor files - the serialized form of a package.
//!
//! A descriptor flattens a [`Package`] into plain data: dependency packages
//! become names and targets keep their references. `denv describe` prints
//! descriptors; `--descriptors <DIR>` reads them back so packages outside
//! the built-in set can join the graph.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Package, PackageResult, Separator, Target, TargetKind, TargetRef};

/// A package descriptor as stored in a `.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub package: PackageSection,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_lib: Option<TargetDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_lib: Option<TargetDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unittest: Option<TargetDescriptor>,
}

/// The `[package]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSection {
    pub name: String,

    /// Either separator style is accepted when reading.
    pub repo_path: String,

    /// Names of the dependency packages, in declaration order
    #[serde(default)]
    pub packages: Vec<String>,
}

/// One target table.
///
/// `path` and the layout fields are derived from the package when it is
/// rebuilt; they are written out for the build tool and ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub name: String,

    pub kind: TargetKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_dirs: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_dirs: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defines: Vec<String>,

    #[serde(default)]
    pub dependencies: Vec<TargetRef>,
}

impl TargetDescriptor {
    fn from_target(target: &Target, separator: Separator) -> Self {
        let layout = target.layout();
        TargetDescriptor {
            name: target.name().to_string(),
            kind: target.kind(),
            path: Some(target.path().to_native(separator)),
            source_dirs: layout.source_dirs.clone(),
            include_dirs: layout.include_dirs.clone(),
            defines: layout.defines.clone(),
            dependencies: target.dependencies().to_vec(),
        }
    }

    fn to_target(&self, package: &Package) -> PackageResult<Target> {
        let mut target = Target::new(package.name(), package.repo_path(), &self.name, self.kind)?;
        target.add_dependencies(self.dependencies.iter().cloned())?;
        Ok(target)
    }
}

impl PackageDescriptor {
    /// Flatten a package, rendering paths with `separator`.
    pub fn from_package(package: &Package, separator: Separator) -> Self {
        let target = |t: Option<&Target>| t.map(|t| TargetDescriptor::from_target(t, separator));

        PackageDescriptor {
            package: PackageSection {
                name: package.name().to_string(),
                repo_path: package.repo_path().to_native(separator),
                packages: package
                    .packages()
                    .iter()
                    .map(|p| p.name().to_string())
                    .collect(),
            },
            main_lib: target(package.main_lib()),
            test_lib: target(package.test_lib()),
            unittest: target(package.unittest()),
        }
    }

    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// Names of the packages this descriptor depends on.
    pub fn dependencies(&self) -> &[String] {
        &self.package.packages
    }

    /// Rebuild the package. `resolve` supplies each dependency package.
    pub fn to_package<F>(&self, mut resolve: F) -> PackageResult<Package>
    where
        F: FnMut(&str) -> PackageResult<Arc<Package>>,
    {
        let mut pkg = Package::new(&self.package.repo_path, &self.package.name)?;
        for name in &self.package.packages {
            pkg.add_package(resolve(name)?)?;
        }

        if let Some(ref td) = self.main_lib {
            let target = td.to_target(&pkg)?;
            pkg.set_main_lib(target)?;
        }
        if let Some(ref td) = self.test_lib {
            let target = td.to_target(&pkg)?;
            pkg.set_test_lib(target)?;
        }
        if let Some(ref td) = self.unittest {
            let target = td.to_target(&pkg)?;
            pkg.set_unittest(target)?;
        }
        Ok(pkg)
    }

    /// Parse a descriptor from TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse package descriptor")
    }

    /// Load a descriptor file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read descriptor: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse descriptor: {}", path.display()))
    }

    /// TOML text with short arrays kept on one line.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("failed to serialize package descriptor")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize package descriptor")
    }
}

impl Package {
    /// The descriptor of this package, with `/` separators.
    pub fn to_descriptor(&self) -> PackageDescriptor {
        PackageDescriptor::from_package(self, Separator::Slash)
    }
}
