//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and the primitives every
//! production is built from: one token of lookahead, `accept`/`accept_it`,
//! span computation and error recovery.
//!
//! # Parser Architecture
//!
//! The Parser is a predictive recursive descent parser. It pulls tokens from
//! the [`Lexer`] one at a time, only when a production consumes the current
//! one; there is no token buffer and no backtracking.
//! - This module: Parser struct, lookahead state, helpers, `parse()` entry point
//! - `declarations`: classes, fields, methods, types, parameters
//! - `statements`: statements, including the identifier-led ones
//! - `expressions`: precedence levels, primaries, references, `new`
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! # Errors
//!
//! Syntax errors never abort parsing. They are reported to the parser's
//! [`ErrorReporter`] and the production returns a best-effort node
//! ([`Expression::Error`], [`BaseTypeKind::Error`], an empty identifier).
//! `accept` does not consume a mismatched token; the list loops
//! (classes, members, statements) skip ahead with [`Parser::synchronize`].
//!
//! Statements, parenthesised expressions and unary operators recurse. Past
//! [`MAX_NESTING`] levels the innermost phrase is reported and skipped with
//! its brackets balanced, so hostile input cannot exhaust the stack.

use crate::diagnostics::{Diagnostic, DiagnosticKind, ErrorReporter};
use crate::parser::ast::*;
use crate::parser::first_sets::Production;
use crate::parser::lexer::Lexer;
use crate::parser::position::SourcePosition;
use crate::parser::token::{Token, TokenKind};
use crate::source::{CharSource, StrSource};
use log::{debug, trace};

/// Deepest nesting of statements and expressions the parser descends into.
pub const MAX_NESTING: usize = 100;

/// Lookahead state of one parser instance.
#[derive(Debug, Clone)]
pub struct ParserState {
    /// The next unconsumed token.
    pub current: Token,
    /// Position of the last consumed token.
    pub previous: SourcePosition,
    /// Number of tokens consumed so far.
    pub consumed: usize,
    /// Current nesting of recursive productions.
    pub depth: usize,
}

/// Recursive descent parser
pub struct Parser<'k, S> {
    lexer: Lexer<'k, S>,
    pub(crate) reporter: ErrorReporter,
    pub(crate) state: ParserState,
}

impl<'a> Parser<'static, StrSource<'a>> {
    /// Parser over a string, using the standard reserved-word table.
    pub fn new(source: &'a str) -> Self {
        Parser::from_lexer(Lexer::new(source))
    }
}

impl<'k, S: CharSource> Parser<'k, S> {
    pub fn from_lexer(mut lexer: Lexer<'k, S>) -> Self {
        let mut reporter = ErrorReporter::new();
        let current = Self::scan_significant(&mut lexer, &mut reporter);
        let previous = SourcePosition::on_line(current.position.line_start, 0, 0);

        Self {
            lexer,
            reporter,
            state: ParserState {
                current,
                previous,
                consumed: 0,
                depth: 0,
            },
        }
    }

    /// Parse the entire input.
    ///
    /// Program ::= ClassDecl* EOT
    pub fn parse(&mut self) -> Program {
        let mut classes = Vec::new();

        while !self.check(TokenKind::Eot) {
            if self.starts(Production::ClassDecl) {
                classes.push(self.parse_class_declaration());
            } else {
                self.expected("'class'");
                self.synchronize(&[TokenKind::Class]);
            }
        }

        let end = self.state.current.position;
        debug!(
            "parsed {} classes with {} errors",
            classes.len(),
            self.reporter.error_count()
        );
        Program::new(classes, SourcePosition::new(0, end.finish, 1, end.line_finish))
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    pub fn into_reporter(self) -> ErrorReporter {
        self.reporter
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    // ===== Lookahead =====

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.state.current.kind
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.state.current.kind == kind
    }

    pub(crate) fn starts(&self, production: Production) -> bool {
        production.starts_with(self.current_kind())
    }

    /// Consume the current token if it is `expected`; otherwise report it and
    /// leave it in place.
    pub(crate) fn accept(&mut self, expected: TokenKind) -> bool {
        if self.check(expected) {
            self.accept_it();
            true
        } else {
            self.expected(&expected.to_string());
            false
        }
    }

    /// Consume the current token unconditionally and return it.
    pub(crate) fn accept_it(&mut self) -> Token {
        let next = Self::scan_significant(&mut self.lexer, &mut self.reporter);
        let token = std::mem::replace(&mut self.state.current, next);
        trace!("accept {} at {}", token, token.position);

        self.state.previous = token.position;
        self.state.consumed += 1;
        token
    }

    pub(crate) fn accept_identifier(&mut self) -> Identifier {
        if self.check(TokenKind::Identifier) {
            let token = self.accept_it();
            Identifier::new(token.spelling, token.position)
        } else {
            self.expected("identifier");
            Identifier::new("", self.empty_here())
        }
    }

    pub(crate) fn accept_operator(&mut self) -> Operator {
        debug_assert!(
            self.current_kind().is_binary_operator() || self.current_kind().is_unary_operator()
        );
        let token = self.accept_it();
        Operator {
            kind: token.kind,
            position: token.position,
        }
    }

    /// Error tokens were already reported by the lexer.
    fn scan_significant(lexer: &mut Lexer<'k, S>, reporter: &mut ErrorReporter) -> Token {
        loop {
            let token = lexer.scan(reporter);
            if !token.is(TokenKind::Error) {
                return token;
            }
            trace!("skipping error token {:?}", token.spelling);
        }
    }

    // ===== Positions =====

    /// Position of the first token of the phrase about to be parsed.
    pub(crate) fn start(&self) -> SourcePosition {
        self.state.current.position
    }

    /// Span from `start` to the last consumed token.
    pub(crate) fn finish(&self, start: SourcePosition) -> SourcePosition {
        SourcePosition::span(start, self.state.previous)
    }

    pub(crate) fn empty_here(&self) -> SourcePosition {
        let here = self.state.current.position;
        SourcePosition::on_line(here.line_start, here.start, here.start)
    }

    // ===== Errors =====

    /// Report "`what` expected, instead of '<current>'".
    pub(crate) fn expected(&mut self, what: &str) {
        let current = &self.state.current;
        let diagnostic = if current.is(TokenKind::Eot) {
            Diagnostic::new(
                DiagnosticKind::Syntactic,
                format!("{} expected, instead of end of input", what),
            )
        } else {
            Diagnostic::new(
                DiagnosticKind::Syntactic,
                format!("{} expected, instead of", what),
            )
            .with_spelling(current.spelling.clone())
        };
        self.reporter.report(diagnostic.at(current.position));
    }

    pub(crate) fn syntax_error(&mut self, message: &str) {
        let current = &self.state.current;
        let diagnostic = Diagnostic::new(DiagnosticKind::Syntactic, message)
            .with_spelling(current.spelling.clone())
            .at(current.position);
        self.reporter.report(diagnostic);
    }

    /// Run `parse` one nesting level deeper. At [`MAX_NESTING`] the phrase is
    /// skipped instead and `too_deep` builds the stand-in from its span.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> T,
        too_deep: impl FnOnce(&mut Self, SourcePosition) -> T,
    ) -> T {
        if self.state.depth >= MAX_NESTING {
            let skipped = self.skip_too_deep();
            return too_deep(self, skipped);
        }

        self.state.depth += 1;
        let node = parse(self);
        self.state.depth -= 1;
        node
    }

    /// Report the current phrase and skip it, stopping before an unmatched
    /// closing bracket, or a `;` or `,` outside brackets.
    fn skip_too_deep(&mut self) -> SourcePosition {
        self.syntax_error(&format!("Nesting deeper than {} levels at", MAX_NESTING));

        let start = self.start();
        let mut open = 0usize;
        loop {
            match self.current_kind() {
                TokenKind::Eot | TokenKind::Class => break,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LCurly => open += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RCurly => {
                    if open == 0 {
                        break;
                    }
                    open -= 1;
                }
                TokenKind::Semicolon | TokenKind::Comma if open == 0 => break,
                _ => {}
            }
            self.accept_it();
        }

        debug!("skipped over-nested phrase, resuming at {}", self.state.current);
        self.finish(start)
    }

    /// Skip the offending token, then everything up to a safe point.
    ///
    /// Stops after a `;`, or before `}`, end of input, or any kind in `stop`.
    pub(crate) fn synchronize(&mut self, stop: &[TokenKind]) {
        let mut skipped = 0;
        if !self.check(TokenKind::Eot) {
            self.accept_it();
            skipped += 1;
        }

        loop {
            match self.current_kind() {
                TokenKind::Semicolon => {
                    self.accept_it();
                    skipped += 1;
                    break;
                }
                TokenKind::RCurly | TokenKind::Eot => break,
                kind if stop.contains(&kind) => break,
                _ => {
                    self.accept_it();
                    skipped += 1;
                }
            }
        }

        debug!(
            "recovered after skipping {} tokens, resuming at {}",
            skipped, self.state.current
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_class() {
        let source = "class Test { int x; boolean m() { return true; } }";
        let mut parser = Parser::new(source);
        let program = parser.parse();

        assert!(!parser.reporter().has_errors());
        assert_eq!(program.classes.len(), 1);

        let class = &program.classes[0];
        assert_eq!(class.name.spelling, "Test");
        assert_eq!(class.fields.len(), 1);
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name(), "m");
    }

    #[test]
    fn test_accept_mismatch_does_not_consume() {
        let mut parser = Parser::new("x ;");
        assert!(!parser.accept(TokenKind::Semicolon));
        assert!(parser.check(TokenKind::Identifier));
        assert_eq!(parser.state().consumed, 0);
        assert_eq!(parser.reporter().error_count(), 1);
    }

    #[test]
    fn test_accept_records_previous_position() {
        let mut parser = Parser::new("ab cd");
        assert!(parser.accept(TokenKind::Identifier));
        assert_eq!(parser.state().previous, SourcePosition::on_line(1, 0, 2));
        assert_eq!(parser.state().current.spelling, "cd");
    }

    #[test]
    fn test_error_tokens_are_skipped() {
        let mut parser = Parser::new("# class");
        assert!(parser.check(TokenKind::Class));
        // One lexical diagnostic for '#', nothing more.
        assert_eq!(parser.reporter().error_count(), 1);
    }

    #[test]
    fn test_junk_before_class_is_skipped() {
        let mut parser = Parser::new("int x ; class A { }");
        let program = parser.parse();

        assert_eq!(program.classes.len(), 1);
        assert_eq!(parser.reporter().error_count(), 1);
    }

    #[test]
    fn test_nesting_limit_skips_balanced_phrase() {
        let source = format!("{}1{} ; x", "(".repeat(MAX_NESTING + 5), ")".repeat(MAX_NESTING + 5));
        let mut parser = Parser::new(&source);
        let e = parser.parse_expression();

        assert!(e.is_error());
        assert_eq!(parser.reporter().error_count(), 1);
        assert!(parser.check(TokenKind::Semicolon));
        assert_eq!(parser.state().depth, 0);
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let depth = MAX_NESTING - 1;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let mut parser = Parser::new(&source);
        let e = parser.parse_expression();

        assert!(!parser.reporter().has_errors());
        assert!(matches!(e, Expression::Literal { .. }));
        assert!(parser.check(TokenKind::Eot));
    }

    #[test]
    fn test_empty_input() {
        let mut parser = Parser::new("   // nothing here\n");
        let program = parser.parse();

        assert!(program.classes.is_empty());
        assert!(!parser.reporter().has_errors());
        assert_eq!(program.position.finish, 19);
    }
}
