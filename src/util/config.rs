//! Configuration file support for denv.
//!
//! denv reads `config.toml` from two locations:
//! - Global: `~/.denv/config.toml` - User-wide defaults
//! - Project: `.denv/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.
//!
//! ```toml
//! [repo]
//! separator = "backslash"
//!
//! [output]
//! format = "json"
//! color = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::Separator;
use crate::ops::OutputFormat;

/// denv configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository path settings
    pub repo: RepoConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Repository path settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Separator used when rendering repository and project paths
    pub separator: Option<Separator>,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default format for `denv describe`
    pub format: Option<OutputFormat>,

    /// Colored diagnostics
    pub color: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.repo.separator.is_some() {
            self.repo.separator = other.repo.separator;
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.output.color.is_some() {
            self.output.color = other.output.color;
        }
    }

    /// Separator for rendered paths.
    pub fn separator(&self) -> Separator {
        self.repo.separator.unwrap_or_default()
    }

    /// Format for `denv describe`.
    pub fn format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }

    /// Whether diagnostics are colored.
    pub fn color(&self) -> bool {
        self.output.color.unwrap_or(true)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.denv/config.toml)
/// 2. Global config (~/.denv/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global denv config directory (~/.denv).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".denv"))
}

/// Get the global config path (~/.denv/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.denv/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".denv").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.separator(), Separator::Slash);
        assert_eq!(config.format(), OutputFormat::Toml);
        assert!(config.color());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[repo]
separator = "backslash"

[output]
format = "json"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.separator(), Separator::Backslash);
        assert_eq!(config.format(), OutputFormat::Json);
        assert_eq!(config.output.color, None);
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.repo.separator = Some(Separator::Backslash);
        base.output.color = Some(false);

        let mut project = Config::default();
        project.output.color = Some(true);

        base.merge(project);
        assert_eq!(base.separator(), Separator::Backslash);
        assert!(base.color());
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());

        std::fs::write(&global, "[output]\nformat = \"json\"\ncolor = false\n").unwrap();
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[output]\nformat = \"toml\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.format(), OutputFormat::Toml);
        assert!(!config.color());
    }

    #[test]
    fn test_broken_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[repo]\nseparator = \"pipe\"\n").unwrap();

        assert_eq!(Config::load_or_default(&path), Config::default());
    }
}
