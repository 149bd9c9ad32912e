//! Repository paths - WHERE a package lives.
//!
//! Package declarations spell repository paths with either separator
//! (`github.com\jurgen-kluft` on Windows-minded hosts, `github.com/jurgen-kluft`
//! elsewhere). A RepoPath stores the segments, so both spellings compare equal
//! and render in whichever style the caller asks for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::errors::{PackageError, PackageResult};

/// Separator style used when rendering a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// `/`
    #[default]
    Slash,
    /// `\`
    Backslash,
}

impl Separator {
    pub fn as_char(&self) -> char {
        match self {
            Separator::Slash => '/',
            Separator::Backslash => '\\',
        }
    }
}

impl FromStr for Separator {
    type Err = SeparatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slash" | "/" | "unix" => Ok(Separator::Slash),
            "backslash" | "\\" | "windows" => Ok(Separator::Backslash),
            _ => Err(SeparatorParseError(s.to_string())),
        }
    }
}

/// Error parsing a separator option.
#[derive(Debug, Clone)]
pub struct SeparatorParseError(pub String);

impl fmt::Display for SeparatorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid separator '{}', valid values: slash, backslash",
            self.0
        )
    }
}

impl std::error::Error for SeparatorParseError {}

/// A normalized repository path such as `github.com/jurgen-kluft`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoPath {
    segments: Vec<String>,
}

impl RepoPath {
    /// Parse a repository path written with `/` or `\` separators.
    pub fn parse(raw: &str) -> PackageResult<Self> {
        let invalid = |reason| PackageError::InvalidRepoPath {
            path: raw.to_string(),
            reason,
        };

        let segments: Vec<String> = raw
            .split(['/', '\\'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            return Err(invalid("path is empty"));
        }
        if segments.iter().any(|s| s == "." || s == "..") {
            return Err(invalid("relative segments are not allowed"));
        }

        Ok(RepoPath { segments })
    }

    /// Append one segment, e.g. the package name to get its project path.
    pub fn join(&self, segment: &str) -> PackageResult<Self> {
        let mut joined = self.clone();
        joined.segments.extend(RepoPath::parse(segment)?.segments);
        Ok(joined)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment (the repository or organisation name).
    pub fn last(&self) -> &str {
        // parse() guarantees at least one segment
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Render the path with the given separator.
    pub fn to_native(&self, separator: Separator) -> String {
        self.segments.join(&separator.as_char().to_string())
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_native(Separator::Slash))
    }
}

impl FromStr for RepoPath {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepoPath::parse(s)
    }
}

impl Serialize for RepoPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RepoPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RepoPath::parse(&s).map_err(serde::de::Error::custom)
    }
}
