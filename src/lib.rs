//! # Introduction
//!
//! A front end for a small class-based language in the Java family. It
//! reads source text, splits it into tokens and builds a typed syntax tree,
//! collecting every lexical and syntax error it finds along the way.
//!
//! ## Pipeline
//!
//! ```text
//! CharSource → Lexer → Parser → Program
//!                 ↘       ↙
//!              ErrorReporter
//! ```
//!
//! 1. [`source`]: in-memory strings and `.java`/`.mjava` files.
//! 2. [`parser`]: the lexer, the recursive descent parser and the AST.
//! 3. [`diagnostics`]: the ordered diagnostic list shared by lexer and parser.
//!
//! Parsing never stops at the first error. The returned [`Program`] is
//! always complete; failed phrases are filled with placeholder nodes.
//!
//! ```
//! let (program, reporter) = minijava_front::parse_source("class A { int x; }");
//! assert!(!reporter.has_errors());
//! assert_eq!(program.classes[0].fields[0].name.spelling, "x");
//! ```
//!
//! [`Program`]: parser::ast::Program

pub mod diagnostics;
pub mod parser;
pub mod source;

use diagnostics::ErrorReporter;
use parser::ast::Program;
use parser::parse::Parser;

/// Process status when the input parsed without errors.
pub const EXIT_SUCCESS: i32 = 0;
/// Process status when any diagnostic was reported.
pub const EXIT_FAILURE: i32 = 4;

/// Parse `source` with the standard reserved words.
pub fn parse_source(source: &str) -> (Program, ErrorReporter) {
    let mut parser = Parser::new(source);
    let program = parser.parse();
    (program, parser.into_reporter())
}

/// Exit status for a finished run.
pub fn exit_status(reporter: &ErrorReporter) -> i32 {
    if reporter.has_errors() {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}
