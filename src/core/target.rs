//! Target definitions - what gets built.
//!
//! A Target is one build project of a package: the main library, the
//! test-flavoured library, or the unit-test executable. Targets reference
//! the targets of other packages through [`TargetRef`]s; the external build
//! tool turns those references into compile and link edges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::{PackageError, PackageResult};
use crate::core::repo_path::RepoPath;

/// The kind of target being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Static library with the package's main sources
    #[serde(alias = "lib")]
    Library,

    /// The same sources compiled with test settings, linked by unit tests
    #[serde(alias = "testlib")]
    TestLibrary,

    /// Unit-test executable
    #[serde(alias = "test")]
    Unittest,
}

impl TargetKind {
    /// The slot this kind occupies on a package, used in messages.
    pub fn slot(&self) -> &'static str {
        match self {
            TargetKind::Library => "main library",
            TargetKind::TestLibrary => "test library",
            TargetKind::Unittest => "unit test",
        }
    }

    /// Suffix appended to the package name to form the target name.
    pub fn name_suffix(&self) -> &'static str {
        match self {
            TargetKind::Library => "",
            TargetKind::TestLibrary => "_test",
            TargetKind::Unittest => "_unittest",
        }
    }

    /// Check if this is a library (plain or test-flavoured).
    pub fn is_library(&self) -> bool {
        matches!(self, TargetKind::Library | TargetKind::TestLibrary)
    }

    /// Check if this is built with test settings.
    pub fn is_test(&self) -> bool {
        matches!(self, TargetKind::TestLibrary | TargetKind::Unittest)
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slot())
    }
}

/// Source layout of a target, relative to its project path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLayout {
    pub source_dirs: Vec<String>,
    pub include_dirs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defines: Vec<String>,
}

impl SourceLayout {
    /// The conventional layout for a target kind.
    pub fn for_kind(kind: TargetKind) -> Self {
        let dirs = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        let defines = if kind.is_test() {
            vec!["TARGET_TEST".to_string()]
        } else {
            Vec::new()
        };

        match kind {
            TargetKind::Library | TargetKind::TestLibrary => SourceLayout {
                source_dirs: dirs(&["source/main/cpp"]),
                include_dirs: dirs(&["source/main/include"]),
                defines,
            },
            TargetKind::Unittest => SourceLayout {
                source_dirs: dirs(&["source/test/cpp"]),
                include_dirs: dirs(&["source/test/include", "source/main/include"]),
                defines,
            },
        }
    }
}

/// A reference to a target exposed by some package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetRef {
    /// Package that exposes the target
    pub package: String,

    /// Target name within that package
    pub target: String,

    /// Kind of the referenced target
    pub kind: TargetKind,
}

impl TargetRef {
    pub fn new(package: impl Into<String>, target: impl Into<String>, kind: TargetKind) -> Self {
        TargetRef {
            package: package.into(),
            target: target.into(),
            kind,
        }
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.target)
    }
}

/// A build target with its dependency edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: String,
    kind: TargetKind,
    package: String,
    path: RepoPath,
    layout: SourceLayout,
    dependencies: Vec<TargetRef>,
}

impl Target {
    /// Create a new target owned by `package`, located at `repo_path/package`.
    pub fn new(
        package: &str,
        repo_path: &RepoPath,
        name: impl Into<String>,
        kind: TargetKind,
    ) -> PackageResult<Self> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Target {
            path: repo_path.join(package)?,
            layout: SourceLayout::for_kind(kind),
            name,
            kind,
            package: package.to_string(),
            dependencies: Vec::new(),
        })
    }

    /// Create the main library target of a package (named after the package).
    pub fn library(package: &str, repo_path: &RepoPath) -> PackageResult<Self> {
        Self::new(package, repo_path, package, TargetKind::Library)
    }

    /// Create the test-flavoured library target (`<package>_test`).
    pub fn test_library(package: &str, repo_path: &RepoPath) -> PackageResult<Self> {
        let name = format!("{}{}", package, TargetKind::TestLibrary.name_suffix());
        Self::new(package, repo_path, name, TargetKind::TestLibrary)
    }

    /// Create the unit-test executable target (`<package>_unittest`).
    pub fn unittest(package: &str, repo_path: &RepoPath) -> PackageResult<Self> {
        let name = format!("{}{}", package, TargetKind::Unittest.name_suffix());
        Self::new(package, repo_path, name, TargetKind::Unittest)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Name of the package owning this target.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Project path of the target (`<repo path>/<package>`).
    pub fn path(&self) -> &RepoPath {
        &self.path
    }

    pub fn layout(&self) -> &SourceLayout {
        &self.layout
    }

    pub fn dependencies(&self) -> &[TargetRef] {
        &self.dependencies
    }

    /// A reference other targets can depend on.
    pub fn to_ref(&self) -> TargetRef {
        TargetRef::new(&self.package, &self.name, self.kind)
    }

    /// Add a dependency edge. Repeated edges are ignored.
    pub fn add_dependency(&mut self, dep: TargetRef) -> PackageResult<()> {
        if dep.package == self.package && dep.target == self.name {
            return Err(PackageError::SelfDependency {
                target: self.to_ref().to_string(),
            });
        }

        if !self.dependencies.contains(&dep) {
            tracing::trace!("{}/{} -> {}", self.package, self.name, dep);
            self.dependencies.push(dep);
        }
        Ok(())
    }

    /// Add several dependency edges, preserving their order.
    pub fn add_dependencies(
        &mut self,
        deps: impl IntoIterator<Item = TargetRef>,
    ) -> PackageResult<()> {
        for dep in deps {
            self.add_dependency(dep)?;
        }
        Ok(())
    }

    /// Depend on another target of the same package.
    pub fn depend_on(&mut self, other: &Target) -> PackageResult<()> {
        self.add_dependency(other.to_ref())
    }
}

/// Check that a package or target name is usable as a directory and
/// project name.
pub fn validate_name(name: &str) -> PackageResult<()> {
    let invalid = |reason| PackageError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let first = name.chars().next().ok_or_else(|| invalid("name is empty"))?;
    if !first.is_ascii_alphabetic() {
        return Err(invalid("name must start with an ASCII letter"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid(
            "only ASCII letters, digits, `_` and `-` are allowed",
        ));
    }
    Ok(())
}
