//! Package catalog - where packages come from.
//!
//! The catalog knows how to assemble every package it can hand out, either
//! through a built-in declaration or from a descriptor file, and caches each
//! assembled package. Asking for the same name twice returns the same
//! `Arc<Package>`, so a dependency shared by several packages appears once in
//! the graph.

pub mod descriptor;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use strsim::levenshtein;

use crate::core::{Package, PackageError, PackageResult};
use crate::packages::{callocator, cbase, cframegraph, cunittest};

pub use descriptor::{PackageDescriptor, PackageSection, TargetDescriptor};

/// Maximum edit distance, as a percentage of the name length, for a known
/// package to be suggested for an unknown one.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

type AssembleFn = fn(&mut PackageCatalog) -> PackageResult<Package>;

/// How a package is produced on first request.
#[derive(Clone)]
enum Recipe {
    Builtin(AssembleFn),
    Descriptor(PackageDescriptor),
}

/// A cache of assembled packages keyed by name.
#[derive(Default)]
pub struct PackageCatalog {
    recipes: BTreeMap<String, Recipe>,
    packages: HashMap<String, Arc<Package>>,
    /// Packages currently being assembled, outermost first
    assembling: Vec<String>,
    /// Descriptor file each descriptor recipe was loaded from
    origins: HashMap<String, PathBuf>,
}

impl PackageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog that knows the built-in packages.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.add_recipe(cunittest::NAME, Recipe::Builtin(|_| cunittest::package()));
        catalog.add_recipe(
            cbase::NAME,
            Recipe::Builtin(|c| cbase::package(c.get(cunittest::NAME)?)),
        );
        catalog.add_recipe(
            callocator::NAME,
            Recipe::Builtin(|c| {
                let unittest = c.get(cunittest::NAME)?;
                let base = c.get(cbase::NAME)?;
                callocator::package(unittest, base)
            }),
        );
        catalog.add_recipe(
            cframegraph::NAME,
            Recipe::Builtin(|c| {
                let unittest = c.get(cunittest::NAME)?;
                let base = c.get(cbase::NAME)?;
                let allocator = c.get(callocator::NAME)?;
                cframegraph::package(unittest, base, allocator)
            }),
        );
        catalog
    }

    fn add_recipe(&mut self, name: &str, recipe: Recipe) {
        self.recipes.insert(name.to_string(), recipe);
    }

    /// Get a package by name, assembling it on first request.
    pub fn get(&mut self, name: &str) -> PackageResult<Arc<Package>> {
        if let Some(pkg) = self.packages.get(name) {
            return Ok(Arc::clone(pkg));
        }

        if let Some(pos) = self.assembling.iter().position(|n| n == name) {
            let mut path = self.assembling[pos..].to_vec();
            path.push(name.to_string());
            return Err(PackageError::CycleDetected { path });
        }

        let recipe = self
            .recipes
            .get(name)
            .cloned()
            .ok_or_else(|| PackageError::PackageNotFound {
                package: name.to_string(),
                suggestions: self.similar_names(name),
            })?;

        tracing::debug!("assembling package {}", name);
        self.assembling.push(name.to_string());
        let result = match recipe {
            Recipe::Builtin(assemble) => assemble(self),
            Recipe::Descriptor(desc) => desc.to_package(|dep| self.get(dep)),
        };
        self.assembling.pop();

        let pkg = Arc::new(result?);
        self.packages.insert(name.to_string(), Arc::clone(&pkg));
        Ok(pkg)
    }

    /// Register an already assembled package.
    pub fn insert(&mut self, package: Package) -> PackageResult<Arc<Package>> {
        let name = package.name().to_string();
        if self.packages.contains_key(&name) {
            return Err(PackageError::ConflictingPackage { package: name });
        }

        let pkg = Arc::new(package);
        self.packages.insert(name, Arc::clone(&pkg));
        Ok(pkg)
    }

    /// Register a descriptor. It replaces a built-in declaration of the same
    /// name unless that package has already been assembled. A name can be
    /// declared by one descriptor only.
    pub fn add_descriptor(&mut self, descriptor: PackageDescriptor) -> PackageResult<()> {
        let name = descriptor.name().to_string();
        if self.packages.contains_key(&name)
            || matches!(self.recipes.get(&name), Some(Recipe::Descriptor(_)))
        {
            return Err(PackageError::ConflictingPackage { package: name });
        }

        if self.recipes.contains_key(&name) {
            tracing::debug!("descriptor for {} replaces the built-in declaration", name);
        }
        self.add_recipe(&name, Recipe::Descriptor(descriptor));
        Ok(())
    }

    /// Register every `*.toml` descriptor in a directory. Returns the
    /// registered package names in file-name order.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("failed to read descriptor directory: {}", dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut names = Vec::with_capacity(paths.len());
        for path in paths {
            let desc = PackageDescriptor::load(&path)?;
            let name = desc.name().to_string();

            if let Err(e) = self.add_descriptor(desc) {
                let err = anyhow::Error::new(e);
                return Err(match self.origins.get(&name) {
                    Some(first) => err.context(format!(
                        "{} and {} both declare `{}`",
                        first.display(),
                        path.display(),
                        name
                    )),
                    None => err.context(format!("failed to register {}", path.display())),
                });
            }
            self.origins.insert(name.clone(), path);
            names.push(name);
        }

        tracing::debug!("loaded {} descriptors from {}", names.len(), dir.display());
        Ok(names)
    }

    /// Check if the catalog can produce a package.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name) || self.recipes.contains_key(name)
    }

    /// All package names the catalog can produce, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .recipes
            .keys()
            .chain(self.packages.keys())
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Known names close to `name`, closest first.
    fn similar_names(&self, name: &str) -> Vec<String> {
        let mut scored: Vec<_> = self
            .names()
            .into_iter()
            .map(|known| {
                let distance = levenshtein(name, &known);
                (known, distance)
            })
            .collect();
        scored.sort_by_key(|(_, dist)| *dist);

        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= name.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(known, _)| known)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_names() {
        let catalog = PackageCatalog::builtin();
        assert_eq!(
            catalog.names(),
            vec!["callocator", "cbase", "cframegraph", "cunittest"]
        );
    }

    #[test]
    fn test_get_shares_dependencies() {
        let mut catalog = PackageCatalog::builtin();
        let framegraph = catalog.get("cframegraph").unwrap();
        let unittest = catalog.get("cunittest").unwrap();
        let allocator = catalog.get("callocator").unwrap();

        assert!(Arc::ptr_eq(framegraph.package("cunittest").unwrap(), &unittest));
        assert!(Arc::ptr_eq(allocator.package("cunittest").unwrap(), &unittest));
        assert!(Arc::ptr_eq(&catalog.get("cframegraph").unwrap(), &framegraph));
    }

    #[test]
    fn test_unknown_package_suggests() {
        let mut catalog = PackageCatalog::builtin();
        let err = catalog.get("cbse").unwrap_err();

        match err {
            PackageError::PackageNotFound { suggestions, .. } => {
                assert_eq!(suggestions.first().map(String::as_str), Some("cbase"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_insert_rejects_second_package() {
        let mut catalog = PackageCatalog::new();
        catalog.insert(cunittest::package().unwrap()).unwrap();

        let err = catalog.insert(cunittest::package().unwrap()).unwrap_err();
        assert!(matches!(err, PackageError::ConflictingPackage { .. }));
    }

    #[test]
    fn test_descriptor_cycle_detected() {
        let mut catalog = PackageCatalog::new();
        for (name, dep) in [("ca", "cb"), ("cb", "ca")] {
            let text = format!(
                "[package]\nname = \"{name}\"\nrepo_path = \"github.com/x\"\npackages = [\"{dep}\"]\n"
            );
            catalog
                .add_descriptor(PackageDescriptor::from_toml(&text).unwrap())
                .unwrap();
        }

        let err = catalog.get("ca").unwrap_err();
        assert_eq!(
            err,
            PackageError::CycleDetected {
                path: vec!["ca".into(), "cb".into(), "ca".into()]
            }
        );
        // Nothing half-built is cached.
        assert!(catalog.get("cb").is_err());
    }

    #[test]
    fn test_load_dir() {
        let tmp = TempDir::new().unwrap();
        let mut catalog = PackageCatalog::builtin();

        let base = catalog.get("cbase").unwrap();
        let mut text = base.to_descriptor().to_toml().unwrap();
        text = text.replace("cbase", "cextra");
        std::fs::write(tmp.path().join("cextra.toml"), text).unwrap();
        std::fs::write(tmp.path().join("README.md"), "not a descriptor").unwrap();

        let names = catalog.load_dir(tmp.path()).unwrap();
        assert_eq!(names, vec!["cextra"]);

        let extra = catalog.get("cextra").unwrap();
        assert_eq!(extra.unittest().unwrap().name(), "cextra_unittest");
        assert!(Arc::ptr_eq(
            extra.package("cunittest").unwrap(),
            &catalog.get("cunittest").unwrap()
        ));
    }

    #[test]
    fn test_load_dir_rejects_same_name_twice() {
        let tmp = TempDir::new().unwrap();
        for (file, repo) in [("a.toml", "github.com/first"), ("b.toml", "github.com/second")] {
            std::fs::write(
                tmp.path().join(file),
                format!("[package]\nname = \"cx\"\nrepo_path = \"{repo}\"\n"),
            )
            .unwrap();
        }

        let mut catalog = PackageCatalog::new();
        let err = catalog.load_dir(tmp.path()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("a.toml and "), "{message}");
        assert!(message.contains("b.toml both declare `cx`"), "{message}");
        assert!(matches!(
            err.downcast_ref::<PackageError>(),
            Some(PackageError::ConflictingPackage { .. })
        ));

        let cx = catalog.get("cx").unwrap();
        assert_eq!(cx.repo_path().to_string(), "github.com/first");
    }

    #[test]
    fn test_second_directory_cannot_redeclare() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        for dir in [&first, &second] {
            std::fs::write(
                dir.path().join("cx.toml"),
                "[package]\nname = \"cx\"\nrepo_path = \"github.com/x\"\n",
            )
            .unwrap();
        }

        let mut catalog = PackageCatalog::builtin();
        assert_eq!(catalog.load_dir(first.path()).unwrap(), vec!["cx"]);
        assert!(catalog.load_dir(second.path()).is_err());
    }

    #[test]
    fn test_descriptor_replaces_builtin() {
        let mut catalog = PackageCatalog::builtin();
        let text = "[package]\nname = \"cunittest\"\nrepo_path = \"github.com/fork\"\n";
        catalog
            .add_descriptor(PackageDescriptor::from_toml(text).unwrap())
            .unwrap();

        let unittest = catalog.get("cunittest").unwrap();
        assert_eq!(unittest.repo_path().to_string(), "github.com/fork");
    }

    #[test]
    fn test_descriptor_after_assembly_conflicts() {
        let mut catalog = PackageCatalog::builtin();
        let unittest = catalog.get("cunittest").unwrap();

        let err = catalog.add_descriptor(unittest.to_descriptor()).unwrap_err();
        assert!(matches!(err, PackageError::ConflictingPackage { .. }));
    }
}
