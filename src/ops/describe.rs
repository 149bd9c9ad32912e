//! `denv describe` - render a package descriptor.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::PackageDescriptor;
use crate::core::{Package, Separator};

/// Output format for descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// TOML, readable back with `--descriptors` (default)
    #[default]
    Toml,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(OutputFormat::Toml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(OutputFormatParseError(s.to_string())),
        }
    }
}

/// Error parsing output format option.
#[derive(Debug, Clone)]
pub struct OutputFormatParseError(pub String);

impl fmt::Display for OutputFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid output format '{}', valid values: toml, json",
            self.0
        )
    }
}

impl std::error::Error for OutputFormatParseError {}

/// Render the descriptor of `package`.
pub fn describe(package: &Package, format: OutputFormat, separator: Separator) -> Result<String> {
    let descriptor = PackageDescriptor::from_package(package, separator);
    match format {
        OutputFormat::Toml => descriptor.to_toml(),
        OutputFormat::Json => descriptor.to_json(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PackageCatalog;

    #[test]
    fn test_describe_toml() {
        let mut catalog = PackageCatalog::builtin();
        let pkg = catalog.get("cframegraph").unwrap();

        let out = describe(&pkg, OutputFormat::Toml, Separator::Slash).unwrap();
        assert!(out.contains("name = \"cframegraph\""));
        assert!(out.contains("repo_path = \"github.com/jurgen-kluft\""));
        assert!(out.contains("[main_lib]"));
        assert!(out.contains("cframegraph_unittest"));
    }

    #[test]
    fn test_describe_json_backslash() {
        let mut catalog = PackageCatalog::builtin();
        let pkg = catalog.get("cframegraph").unwrap();

        let out = describe(&pkg, OutputFormat::Json, Separator::Backslash).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["package"]["repo_path"], "github.com\\jurgen-kluft");
        assert_eq!(
            value["package"]["packages"],
            serde_json::json!(["cunittest", "cbase", "callocator"])
        );
        assert_eq!(value["unittest"]["dependencies"][1]["target"], "cframegraph_test");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
