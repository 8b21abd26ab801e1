//! Lexer (scanner)
//!
//! Pulls characters from a [`CharSource`] on demand and hands out one
//! [`Token`] per call to [`Lexer::scan`]. Whitespace and comments are skipped
//! before every token. Lexical problems are pushed onto the caller's
//! [`ErrorReporter`]:
//!
//! - an unrecognised character, or a lone `&`/`|`, yields an
//!   [`TokenKind::Error`] token and scanning continues after it;
//! - an unterminated block comment is fatal: it is reported once and every
//!   later call returns the end token.

use super::position::SourcePosition;
use super::token::{ReservedWords, Token, TokenKind};
use crate::diagnostics::{Diagnostic, DiagnosticKind, ErrorReporter};
use crate::source::{CharSource, StrSource};

/// Offset and line of a character that has not been consumed yet.
#[derive(Debug, Clone, Copy)]
struct Mark {
    offset: usize,
    line: usize,
}

/// Scanner over a character source
pub struct Lexer<'k, S> {
    source: S,
    current: Option<char>,
    offset: usize,
    line: usize,
    reserved: &'k ReservedWords,
    aborted: bool,
}

impl<'a> Lexer<'static, StrSource<'a>> {
    /// Lexer over a string, using the standard reserved-word table.
    pub fn new(input: &'a str) -> Self {
        Lexer::from_source(StrSource::new(input))
    }
}

impl<S: CharSource> Lexer<'static, S> {
    pub fn from_source(source: S) -> Self {
        Lexer::with_reserved_words(source, ReservedWords::standard())
    }
}

impl<'k, S: CharSource> Lexer<'k, S> {
    pub fn with_reserved_words(mut source: S, reserved: &'k ReservedWords) -> Self {
        let current = source.next_char();
        Self {
            source,
            current,
            offset: 0,
            line: 1,
            reserved,
            aborted: false,
        }
    }

    /// Scan the next token.
    ///
    /// Once the source is exhausted every call returns an end token.
    pub fn scan(&mut self, reporter: &mut ErrorReporter) -> Token {
        if self.aborted {
            return Token::eot(self.empty_position());
        }

        loop {
            self.skip_whitespace();

            if self.current != Some('/') {
                break;
            }

            // '/' starts a comment or is the division operator
            let start = self.mark();
            self.advance();
            match self.current {
                Some('/') => self.skip_line_comment(),
                Some('*') => {
                    if !self.skip_block_comment(start, reporter) {
                        return Token::eot(self.empty_position());
                    }
                }
                _ => return self.make_token(TokenKind::Div, "/".to_string(), start),
            }
        }

        match self.current {
            None => Token::eot(self.empty_position()),
            Some(_) => self.next_token(reporter),
        }
    }

    /// Scan the whole input, up to and including the end token.
    pub fn tokenize(&mut self, reporter: &mut ErrorReporter) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan(reporter);
            let done = token.is(TokenKind::Eot);
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }

    /// Scan one token starting at the (non-blank) current character.
    fn next_token(&mut self, reporter: &mut ErrorReporter) -> Token {
        let start = self.mark();
        let Some(ch) = self.advance() else {
            return Token::eot(self.empty_position());
        };

        let kind = match ch {
            'a'..='z' | 'A'..='Z' => return self.identifier(ch, start),
            '0'..='9' => return self.number(ch, start),

            '>' => self.either('=', TokenKind::GreaterEq, TokenKind::Greater),
            '<' => self.either('=', TokenKind::LessEq, TokenKind::Less),
            '=' => self.either('=', TokenKind::Equal, TokenKind::Assign),
            '!' => self.either('=', TokenKind::NotEqual, TokenKind::Not),
            '&' => {
                if self.eat('&') {
                    TokenKind::And
                } else {
                    return self.malformed_operator(ch, "&&", start, reporter);
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::Or
                } else {
                    return self.malformed_operator(ch, "||", start, reporter);
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Times,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LCurly,
            '}' => TokenKind::RCurly,

            _ => {
                let token = self.make_token(TokenKind::Error, ch.to_string(), start);
                reporter.report(
                    Diagnostic::new(DiagnosticKind::Lexical, "Unexpected character")
                        .with_spelling(ch)
                        .at(token.position),
                );
                return token;
            }
        };

        self.make_token(kind, kind.spelling().to_string(), start)
    }

    /// Letters, digits and underscores after an initial letter
    fn identifier(&mut self, first: char, start: Mark) -> Token {
        let mut spelling = String::new();
        spelling.push(first);

        while let Some(ch) = self.current {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                spelling.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        self.make_token(TokenKind::Identifier, spelling, start)
    }

    /// Unsigned decimal integer
    fn number(&mut self, first: char, start: Mark) -> Token {
        let mut spelling = String::new();
        spelling.push(first);

        while let Some(ch) = self.current {
            if ch.is_ascii_digit() {
                spelling.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        self.make_token(TokenKind::IntLiteral, spelling, start)
    }

    fn malformed_operator(
        &mut self,
        ch: char,
        expected: &str,
        start: Mark,
        reporter: &mut ErrorReporter,
    ) -> Token {
        let token = self.make_token(TokenKind::Error, ch.to_string(), start);
        reporter.report(
            Diagnostic::new(
                DiagnosticKind::Lexical,
                format!("Malformed operator, '{}' expected, instead of", expected),
            )
            .with_spelling(ch)
            .at(token.position),
        );
        token
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    /// Skip to the end of the line. The leading '/' is already consumed.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.current {
            self.advance();
            if ch == '\n' || ch == '\r' {
                break;
            }
        }
    }

    /// Skip past the closing `*/`. The leading '/' is already consumed.
    ///
    /// Returns false if the input ended first; the lexer is then aborted.
    fn skip_block_comment(&mut self, start: Mark, reporter: &mut ErrorReporter) -> bool {
        self.advance(); // '*'

        loop {
            match self.advance() {
                Some('*') => {
                    if self.eat('/') {
                        return true;
                    }
                }
                Some(_) => {}
                None => {
                    let position =
                        SourcePosition::new(start.offset, self.offset, start.line, self.line);
                    reporter.report_fatal("Unterminated block comment", position);
                    self.aborted = true;
                    return false;
                }
            }
        }
    }

    /// Consume the current character if it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.current == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn either(&mut self, second: char, pair: TokenKind, single: TokenKind) -> TokenKind {
        if self.eat(second) {
            pair
        } else {
            single
        }
    }

    /// Consume the current character and pull the next one from the source.
    fn advance(&mut self) -> Option<char> {
        let ch = self.current?;
        self.offset += 1;
        if ch == '\n' {
            self.line += 1;
        }
        self.current = self.source.next_char();
        Some(ch)
    }

    fn mark(&self) -> Mark {
        Mark {
            offset: self.offset,
            line: self.line,
        }
    }

    fn empty_position(&self) -> SourcePosition {
        SourcePosition::on_line(self.line, self.offset, self.offset)
    }

    fn make_token(&self, kind: TokenKind, spelling: String, start: Mark) -> Token {
        let position = SourcePosition::on_line(start.line, start.offset, self.offset);
        Token::new(kind, spelling, position, self.reserved)
    }
}
