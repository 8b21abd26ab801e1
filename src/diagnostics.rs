//! Diagnostic collection shared by the lexer and the parser
//!
//! Non-fatal problems never unwind: they are pushed onto an [`ErrorReporter`]
//! in the order they are discovered, and the caller decides from
//! [`ErrorReporter::error_count`] whether later phases may run.

use crate::parser::position::SourcePosition;
use std::fmt;

/// Which phase produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Ill-formed character or operator; scanning continued.
    Lexical,
    /// Lookahead token did not fit the production being parsed.
    Syntactic,
    /// Unrecoverable; nothing reported after it is kept.
    Fatal,
    /// Problem with the input itself (missing path, bad extension, I/O).
    Input,
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub spelling: Option<String>,
    pub position: Option<SourcePosition>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            spelling: None,
            position: None,
        }
    }

    pub fn with_spelling(mut self, spelling: impl Into<String>) -> Self {
        self.spelling = Some(spelling.into());
        self
    }

    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(spelling) = &self.spelling {
            write!(f, " '{}'", spelling)?;
        }
        if let Some(position) = &self.position {
            write!(f, " {}", position)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Ordered collection of diagnostics plus an error count.
#[derive(Debug, Default, Clone)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    aborted: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic. Ignored once a fatal diagnostic has been seen.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if self.aborted {
            log::debug!("dropping diagnostic after abort: {}", diagnostic);
            return;
        }
        if diagnostic.kind == DiagnosticKind::Fatal {
            self.aborted = true;
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn report_fatal(&mut self, message: impl Into<String>, position: SourcePosition) {
        self.report(Diagnostic::new(DiagnosticKind::Fatal, message).at(position));
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// True after a fatal diagnostic.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display_shape() {
        let diag = Diagnostic::new(DiagnosticKind::Syntactic, "';' expected, instead of")
            .with_spelling("}")
            .at(SourcePosition::on_line(1, 18, 19));
        assert_eq!(diag.to_string(), "';' expected, instead of '}' line 1 (18, 19)");

        let bare = Diagnostic::new(DiagnosticKind::Input, "no input file");
        assert_eq!(bare.to_string(), "no input file");
    }

    #[test]
    fn test_reports_keep_order_and_count() {
        let mut reporter = ErrorReporter::new();
        assert!(!reporter.has_errors());

        reporter.report(Diagnostic::new(DiagnosticKind::Lexical, "first"));
        reporter.report(Diagnostic::new(DiagnosticKind::Syntactic, "second"));

        assert_eq!(reporter.error_count(), 2);
        let messages: Vec<_> = reporter.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);

        let owned = reporter.into_diagnostics();
        assert_eq!(owned.len(), 2);
        assert_eq!(owned[1].kind, DiagnosticKind::Syntactic);
    }

    #[test]
    fn test_reports_after_fatal_are_dropped() {
        let mut reporter = ErrorReporter::new();
        reporter.report_fatal("unterminated comment", SourcePosition::default());
        reporter.report(Diagnostic::new(DiagnosticKind::Syntactic, "cascade"));

        assert!(reporter.is_aborted());
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.diagnostics()[0].kind, DiagnosticKind::Fatal);
    }
}
