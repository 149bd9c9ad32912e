//! Global context for denv operations.
//!
//! Provides centralized access to configuration, paths, and the package
//! catalog every command starts from.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::catalog::PackageCatalog;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Merged global and project configuration
    config: Config,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a GlobalContext for the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let global = global_config_path();
        let config = load_config(global.as_deref(), &project_config_path(&cwd));

        GlobalContext {
            cwd,
            config,
            verbose: false,
        }
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Force colored output off.
    pub fn disable_color(&mut self) {
        self.config.output.color = Some(false);
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the project-local denv directory.
    pub fn project_denv_dir(&self) -> PathBuf {
        self.cwd.join(".denv")
    }

    /// Directory whose descriptors are loaded automatically, if present.
    pub fn project_descriptors_dir(&self) -> PathBuf {
        self.project_denv_dir().join("packages")
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.config.color()
    }

    /// Build the package catalog: the built-in packages, then the project's
    /// `.denv/packages` descriptors, then the descriptors in `extra`.
    pub fn catalog(&self, extra: Option<&Path>) -> Result<PackageCatalog> {
        let mut catalog = PackageCatalog::builtin();

        let project_dir = self.project_descriptors_dir();
        if project_dir.is_dir() {
            catalog.load_dir(&project_dir)?;
        }

        if let Some(dir) = extra {
            let dir = self.cwd.join(dir);
            catalog.load_dir(&dir)?;
        }

        Ok(catalog)
    }
}
