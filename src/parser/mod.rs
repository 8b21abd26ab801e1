//! Class-language source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (characters → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`token`], [`position`]: token model and source spans
//! - [`first_sets`]: the lookahead table every production dispatches on
//!
//! # Supported Language
//!
//! - Classes with fields and methods, no inheritance
//! - Types: `int`, `boolean`, `void`, class names, `int[]`, `Name[]`
//! - Statements: blocks, local declarations, assignments, calls, `if`/`else`, `while`
//! - A single optional `return` at the end of a method body
//! - Expressions: arithmetic, comparison, logical, `new`, field and array access
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod first_sets;
pub mod lexer;
pub mod parse;
pub mod position;
mod statements;
pub mod token;
