//! Compiler diagnostics
//!
//! A [`Diagnostic`] is one error record reported by the LaTeX compiler. A
//! [`CompileFailure`] bundles every record of a failed build so that all of
//! them can be fixed in one pass.
//!
//! # Example
//!
//! ```
//! use brief_core::Diagnostic;
//!
//! let diag = Diagnostic::new("letter.tex", Some(12), "Undefined control sequence.")
//!     .with_context(["letter.tex:12: Undefined control sequence.", "l.12 \\Foo"]);
//!
//! assert_eq!(
//!     diag.to_string(),
//!     "Error in letter.tex, line 12: Undefined control sequence.\n    l.12 \\Foo"
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A compiler error record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// File the compiler attributes the error to
    pub source: String,

    /// Line number (1-indexed), if the compiler reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// The error message
    pub message: String,

    /// Log lines starting at the error line itself
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
}

impl Diagnostic {
    /// Create a new diagnostic without context
    pub fn new(source: impl Into<String>, line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            line,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Set the surrounding log lines
    pub fn with_context<I, S>(mut self, context: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context = context.into_iter().map(Into::into).collect();
        self
    }

    /// The single line shown beneath the error
    ///
    /// The first context line repeats the error itself, so the one after it
    /// is preferred.
    pub fn context_line(&self) -> Option<&str> {
        self.context
            .get(1)
            .or_else(|| self.context.first())
            .map(String::as_str)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in {}, line ", self.source)?;
        match self.line {
            Some(line) => write!(f, "{}", line)?,
            None => write!(f, "?")?,
        }
        write!(f, ": {}", self.message)?;
        if let Some(context) = self.context_line() {
            write!(f, "\n    {}", context)?;
        }
        Ok(())
    }
}

/// A build rejected by the compiler
///
/// Always holds at least one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    diagnostics: Vec<Diagnostic>,
}

impl CompileFailure {
    /// Wrap the diagnostics of a failed build
    ///
    /// An empty list is replaced by a single generic diagnostic.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            return Self {
                diagnostics: vec![Diagnostic::new(
                    "<compiler>",
                    None,
                    "compilation failed without reporting a diagnostic",
                )],
            };
        }
        Self { diagnostics }
    }

    /// Every diagnostic, in the order the compiler reported them
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Always false, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl fmt::Display for CompileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{}", diag)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileFailure {}

impl IntoIterator for CompileFailure {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display_uses_second_context_line() {
        let diag = Diagnostic::new("./letter.tex", Some(40), "Missing \\begin{document}.")
            .with_context([
                "./letter.tex:40: LaTeX Error: Missing \\begin{document}.",
                "l.40 \\Name{J",
                "             ohn Doe}",
            ]);

        assert_eq!(
            diag.to_string(),
            "Error in ./letter.tex, line 40: Missing \\begin{document}.\n    l.40 \\Name{J"
        );
    }

    #[test]
    fn test_diagnostic_display_without_line_or_context() {
        let diag = Diagnostic::new("letter.tex", None, "Emergency stop.");
        assert_eq!(diag.to_string(), "Error in letter.tex, line ?: Emergency stop.");
    }

    #[test]
    fn test_context_line_falls_back_to_first() {
        let diag = Diagnostic::new("a.tex", Some(1), "x").with_context(["only line"]);
        assert_eq!(diag.context_line(), Some("only line"));
    }

    #[test]
    fn test_compile_failure_never_empty() {
        let failure = CompileFailure::new(Vec::new());
        assert_eq!(failure.len(), 1);
        assert!(!failure.is_empty());
        assert_eq!(failure.diagnostics()[0].source, "<compiler>");
    }

    #[test]
    fn test_compile_failure_lists_every_diagnostic() {
        let failure = CompileFailure::new(vec![
            Diagnostic::new("a.tex", Some(1), "first"),
            Diagnostic::new("a.tex", Some(7), "second"),
        ]);

        let report = failure.to_string();
        assert!(report.contains("line 1: first"));
        assert!(report.contains("line 7: second"));
        assert_eq!(failure.into_iter().count(), 2);
    }

    #[test]
    fn test_diagnostic_serialize() {
        let diag = Diagnostic::new("letter.tex", Some(3), "Undefined control sequence.")
            .with_context(["l.3 \\Foo"]);

        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"line\":3"));
        assert!(json.contains("\"context\":[\"l.3 \\\\Foo\"]"));

        let restored: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, diag);
    }
}
