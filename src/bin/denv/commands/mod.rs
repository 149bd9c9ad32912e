//! Command implementations

pub mod completions;
pub mod describe;
pub mod fingerprint;
pub mod targets;
pub mod tree;
pub mod verify;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use denv::catalog::PackageCatalog;
use denv::core::{Package, PackageError};
use denv::util::diagnostic::suggestions;
use denv::util::GlobalContext;

/// State shared by the commands that work on packages.
pub struct Session {
    pub ctx: GlobalContext,
    pub catalog: PackageCatalog,
}

impl Session {
    pub fn new(verbose: bool, no_color: bool, descriptors: Option<&Path>) -> Result<Self> {
        let mut ctx = GlobalContext::new()?;
        ctx.set_verbose(verbose);
        if no_color {
            ctx.disable_color();
        }

        let catalog = ctx.catalog(descriptors)?;
        Ok(Session { ctx, catalog })
    }

    /// Look up a package, turning an unknown name into an actionable error.
    pub fn package(&mut self, name: &str) -> Result<Arc<Package>> {
        self.catalog.get(name).map_err(|e| match e {
            PackageError::PackageNotFound {
                ref suggestions, ..
            } if !suggestions.is_empty() => anyhow::anyhow!(
                "{}\nhelp: did you mean `{}`?",
                e,
                suggestions.join("`, `")
            ),
            PackageError::PackageNotFound { .. } => {
                anyhow::anyhow!("{}\nhelp: {}", e, suggestions::PACKAGE_NOT_FOUND)
            }
            other => anyhow::Error::new(other),
        })
    }
}
