//! User-friendly diagnostic messages.
//!
//! Every finding reported by `denv verify` and every error hint printed by
//! the CLI goes through [`Diagnostic`]: a message, the context lines that
//! explain it, and the suggested fixes.

use std::fmt::{self, Write};

/// Fix hints shared by several errors.
pub mod suggestions {
    pub const PACKAGE_NOT_FOUND: &str = "run `denv tree` to see the packages a descriptor pulls in";

    pub const DANGLING_REFERENCE: &str =
        "add the package with `add_package` before depending on its targets";

    pub const CYCLE: &str = "remove one of the `packages` entries that closes the cycle";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// ANSI SGR sequence used for the label.
    fn style(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// The package or target the finding is about
    pub subject: Option<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            subject: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, message)
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Attach the package or target this diagnostic is about.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render for the terminal.
    ///
    /// ```text
    /// error: main library depends on a test library
    ///   --> cframegraph/cframegraph
    ///    | cframegraph/cframegraph -> cbase/cbase_test
    ///    = help: depend on `cbase.main_lib_outputs()` instead
    /// ```
    pub fn format(&self, color: bool) -> String {
        let paint = |style: &str, text: &str| {
            if color {
                format!("\x1b[{style}m{text}\x1b[0m")
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {}",
            paint(self.severity.style(), self.severity.label()),
            self.message
        );
        if let Some(subject) = &self.subject {
            let _ = writeln!(out, "  {} {}", paint("1;34", "-->"), subject);
        }
        for line in &self.context {
            let _ = writeln!(out, "   | {}", line);
        }
        for suggestion in &self.suggestions {
            let _ = writeln!(out, "   = {}: {}", paint("1;32", "help"), suggestion);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("main library depends on a test library")
            .with_subject("cframegraph/cframegraph")
            .with_context("cframegraph -> cbase/cbase_test")
            .with_suggestion("depend on `cbase.main_lib_outputs()` instead");

        let output = diag.format(false);
        assert!(output.contains("error: main library depends on a test library"));
        assert!(output.contains("  --> cframegraph/cframegraph\n"));
        assert!(output.contains("   | cframegraph -> cbase/cbase_test\n"));
        assert!(output.ends_with("   = help: depend on `cbase.main_lib_outputs()` instead\n"));
    }

    #[test]
    fn test_colored_output_wraps_severity() {
        let diag = Diagnostic::warning("unit test has no dependencies");
        assert!(diag.format(true).starts_with("\x1b[1;33mwarning"));
        assert!(!diag.is_error());
    }
}
