#![forbid(unsafe_code)]

mod archetype;
mod document;

pub use archetype::{Archetype, DEFAULT_NODE_COLOR};
pub use document::{GraphDocument, Link, LinkKind, Node, format_node_id};

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_INPUT_PATH: &str = "raw_data.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "src/data.json";
pub const DEFAULT_INDENT: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span covering a whole 1-based source line.
    #[must_use]
    pub fn at_line(line: usize, line_len: usize) -> Self {
        let start = Position { line, col: 1 };
        let end = Position {
            line,
            col: line_len.max(1),
        };
        Self::new(start, end)
    }
}

/// Where the converter reads from and writes to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Spaces per nesting level in the emitted JSON.
    pub indent: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            indent: DEFAULT_INDENT,
        }
    }
}

/// Fatal conversion failures. Everything else is reported as a [`Diagnostic`].
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read catalogue {}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write graph document {}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize graph document")]
    Serialize(#[from] serde_json::Error),
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum DiagnosticSeverity {
    /// Input that was ignored without affecting the graph
    Hint,
    #[default]
    Info,
    /// Data that was dropped so the run could continue
    Warning,
}

/// Category of diagnostic for filtering and grouping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DiagnosticCategory {
    /// Line recognition and attribute dispatch
    #[default]
    Parser,
    /// Graph-level consistency (dangling references, empty ranges)
    Semantic,
}

impl DiagnosticCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parser => "parser",
            Self::Semantic => "semantic",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub category: DiagnosticCategory,
    pub message: String,
    /// Source line that triggered the diagnostic, when known
    pub span: Option<Span>,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Info, message)
    }

    #[must_use]
    pub fn hint(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Hint, message)
    }

    #[must_use]
    pub fn with_category(mut self, category: DiagnosticCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self.severity, DiagnosticSeverity::Warning)
    }

    /// Source line number, if the diagnostic carries a span.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.span.map(|span| span.start.line)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line() {
            Some(line) => write!(f, "line {line}: {}", self.message)?,
            None => f.write_str(&self.message)?,
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

/// Counts of diagnostics by severity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounts {
    pub hints: usize,
    pub infos: usize,
    pub warnings: usize,
}

impl DiagnosticCounts {
    #[must_use]
    pub fn tally<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Self {
        let mut counts = Self::default();
        for diagnostic in diagnostics {
            match diagnostic.severity {
                DiagnosticSeverity::Hint => counts.hints += 1,
                DiagnosticSeverity::Info => counts.infos += 1,
                DiagnosticSeverity::Warning => counts.warnings += 1,
            }
        }
        counts
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.hints + self.infos + self.warnings
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::{
        ConvertConfig, ConvertError, Diagnostic, DiagnosticCategory, DiagnosticCounts,
        DiagnosticSeverity, Span,
    };

    #[test]
    fn default_config_points_at_catalogue_and_bundle_paths() {
        let config = ConvertConfig::default();
        assert_eq!(config.input, PathBuf::from("raw_data.txt"));
        assert_eq!(config.output, PathBuf::from("src/data.json"));
        assert_eq!(config.indent, 2);
    }

    #[test]
    fn diagnostic_builder_sets_fields() {
        let diag = Diagnostic::warning("dangling reference")
            .with_category(DiagnosticCategory::Semantic)
            .with_span(Span::at_line(12, 40))
            .with_suggestion("declare the target player");

        assert!(diag.is_warning());
        assert_eq!(diag.category, DiagnosticCategory::Semantic);
        assert_eq!(diag.line(), Some(12));
        assert_eq!(
            diag.to_string(),
            "line 12: dangling reference (declare the target player)"
        );
    }

    #[test]
    fn diagnostic_without_span_displays_bare_message() {
        assert_eq!(Diagnostic::info("done").to_string(), "done");
    }

    #[test]
    fn counts_tally_by_severity() {
        let diagnostics = [
            Diagnostic::hint("a"),
            Diagnostic::warning("b"),
            Diagnostic::warning("c"),
            Diagnostic::new(DiagnosticSeverity::Info, "d"),
        ];
        let counts = DiagnosticCounts::tally(&diagnostics);
        assert_eq!(counts.hints, 1);
        assert_eq!(counts.infos, 1);
        assert_eq!(counts.warnings, 2);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn category_names_are_lowercase() {
        assert_eq!(DiagnosticCategory::Parser.as_str(), "parser");
        assert_eq!(DiagnosticCategory::Semantic.as_str(), "semantic");
    }

    #[test]
    fn span_at_line_never_has_zero_width() {
        let span = Span::at_line(3, 0);
        assert_eq!(span.start.line, 3);
        assert_eq!(span.end.col, 1);
    }

    #[test]
    fn read_error_names_the_path() {
        let error = ConvertError::ReadInput {
            path: PathBuf::from("raw_data.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(error.to_string(), "failed to read catalogue raw_data.txt");
    }
}
