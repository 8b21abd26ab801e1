//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Blocks: `{ ... }`
//! - Local variable declarations: `int x = 1;`, `Foo f = new Foo();`, `Foo[] a = ...;`
//! - Assignments: `x = e;`, `a[i].f = e;`, `this.x = e;`
//! - Calls: `m(a, b);`, `this.o.m();`
//! - `if`/`else` and `while`
//!
//! # Grammar
//!
//! ```text
//! Statement ::= "{" Statement* "}"
//!             | Type ID "=" Expr ";"
//!             | Reference "=" Expr ";"
//!             | Reference "(" ArgList? ")" ";"
//!             | "if" "(" Expr ")" Statement ("else" Statement)?
//!             | "while" "(" Expr ")" Statement
//! ```
//!
//! # Statements starting with an identifier
//!
//! `ID` can begin a class-typed declaration (`ID ID`, `ID [ ] ID`), an
//! assignment or a call. After consuming the identifier, the next token
//! decides:
//!
//! | after `ID`  | production                                   |
//! |-------------|----------------------------------------------|
//! | `ID`        | declaration of class type                    |
//! | `[` `]`     | declaration of class array type              |
//! | `[` expr    | indexed reference, then tail and `=` or `(`  |
//! | `.`         | qualified reference, then `=` or `(`         |
//! | `=` / `(`   | assignment / call on a plain identifier      |

use crate::parser::ast::*;
use crate::parser::first_sets::Production;
use crate::parser::parse::Parser;
use crate::parser::position::SourcePosition;
use crate::parser::token::TokenKind;
use crate::source::CharSource;

/// Keywords that reliably begin a statement (identifiers are too ambiguous).
const STATEMENT_RECOVERY: &[TokenKind] = &[
    TokenKind::LCurly,
    TokenKind::Int,
    TokenKind::Boolean,
    TokenKind::Void,
    TokenKind::This,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Return,
    TokenKind::Class,
];

impl<S: CharSource> Parser<'_, S> {
    /// Parse statements until one of `terminators`, the next class, or end
    /// of input. The terminator itself is not consumed.
    pub(crate) fn parse_statement_list(&mut self, terminators: &[TokenKind]) -> Vec<Statement> {
        let mut statements = Vec::new();

        while !terminators.contains(&self.current_kind())
            && !self.check(TokenKind::Eot)
            && !self.check(TokenKind::Class)
        {
            if !self.starts(Production::Statement) {
                self.syntax_error("Malformed statement, unexpected");
                self.synchronize(STATEMENT_RECOVERY);
                continue;
            }

            let before = self.state.consumed;
            statements.push(self.parse_statement());
            if self.state.consumed == before {
                self.synchronize(STATEMENT_RECOVERY);
            }
        }

        statements
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Statement {
        self.nested(Self::parse_statement_inner, |parser, position| {
            if parser.check(TokenKind::Semicolon) {
                parser.accept_it();
            }
            Statement::Block {
                statements: Vec::new(),
                position,
            }
        })
    }

    fn parse_statement_inner(&mut self) -> Statement {
        let start = self.start();

        match self.current_kind() {
            TokenKind::LCurly => {
                self.accept_it();
                let statements = self.parse_statement_list(&[TokenKind::RCurly]);
                self.accept(TokenKind::RCurly);
                Statement::Block {
                    statements,
                    position: self.finish(start),
                }
            }
            TokenKind::Int | TokenKind::Boolean | TokenKind::Void => {
                let ty = self.parse_type();
                self.parse_var_decl_rest(ty, start)
            }
            TokenKind::Identifier => self.parse_identifier_statement(start),
            TokenKind::This => {
                let reference = self.parse_reference();
                self.parse_reference_statement(reference, start)
            }
            TokenKind::If => self.parse_if_statement(start),
            TokenKind::While => self.parse_while_statement(start),
            _ => {
                // Empty block stands in for the missing statement.
                self.syntax_error("Malformed statement, unexpected");
                Statement::Block {
                    statements: Vec::new(),
                    position: self.empty_here(),
                }
            }
        }
    }

    /// Resolve the four identifier-led productions. The current token is `ID`.
    fn parse_identifier_statement(&mut self, start: SourcePosition) -> Statement {
        let first = self.accept_identifier();

        match self.current_kind() {
            // Foo f = ...;
            TokenKind::Identifier => {
                let ty = Type::class(first, start);
                self.parse_var_decl_rest(ty, start)
            }
            TokenKind::LBracket => {
                self.accept_it();

                // Foo[] f = ...;
                if self.check(TokenKind::RBracket) {
                    self.accept_it();
                    let element = Type::class(first, start);
                    let ty = Type::array(element, self.finish(start));
                    return self.parse_var_decl_rest(ty, start);
                }

                // a[i]... = ...;  or  a[i]...(...);
                let base = Reference::Id {
                    id: first,
                    position: start,
                };
                let index = self.parse_expression();
                self.accept(TokenKind::RBracket);
                let indexed = Reference::Indexed {
                    base: Box::new(base),
                    index: Box::new(index),
                    position: self.finish(start),
                };
                let reference = self.parse_reference_tail(indexed, start);
                self.parse_reference_statement(reference, start)
            }
            // a = ...;  a(...);  a.b... = ...;  a.b...(...);
            _ => {
                let base = Reference::Id {
                    id: first,
                    position: start,
                };
                let reference = self.parse_reference_tail(base, start);
                self.parse_reference_statement(reference, start)
            }
        }
    }

    /// Parse `ID = Expr ;` after the declared type.
    fn parse_var_decl_rest(&mut self, ty: Type, start: SourcePosition) -> Statement {
        let name = self.accept_identifier();
        let decl = VarDecl {
            ty,
            name,
            position: self.finish(start),
        };

        self.accept(TokenKind::Assign);
        let init = self.parse_expression();
        self.accept(TokenKind::Semicolon);

        Statement::VarDecl {
            decl,
            init,
            position: self.finish(start),
        }
    }

    /// Parse `= Expr ;` or `( ArgList? ) ;` after a reference.
    fn parse_reference_statement(&mut self, reference: Reference, start: SourcePosition) -> Statement {
        match self.current_kind() {
            TokenKind::Assign => {
                self.accept_it();
                let value = self.parse_expression();
                self.accept(TokenKind::Semicolon);
                Statement::Assign {
                    target: reference,
                    value,
                    position: self.finish(start),
                }
            }
            TokenKind::LParen => {
                self.accept_it();
                let args = self.parse_optional_arguments();
                self.accept(TokenKind::RParen);
                self.accept(TokenKind::Semicolon);
                Statement::Call {
                    method: reference,
                    args,
                    position: self.finish(start),
                }
            }
            _ => {
                self.expected("'=' or '('");
                if self.check(TokenKind::Semicolon) {
                    self.accept_it();
                }
                Statement::Assign {
                    target: reference,
                    value: Expression::Error {
                        position: self.empty_here(),
                    },
                    position: self.finish(start),
                }
            }
        }
    }

    /// Parse if statement. The current token is `if`.
    fn parse_if_statement(&mut self, start: SourcePosition) -> Statement {
        self.accept_it();
        self.accept(TokenKind::LParen);
        let condition = self.parse_expression();
        self.accept(TokenKind::RParen);

        let then_branch = Box::new(self.parse_statement());

        let else_branch = if self.check(TokenKind::Else) {
            self.accept_it();
            Some(Box::new(self.parse_statement()))
        } else {
            None
        };

        Statement::If {
            condition,
            then_branch,
            else_branch,
            position: self.finish(start),
        }
    }

    /// Parse while statement. The current token is `while`.
    fn parse_while_statement(&mut self, start: SourcePosition) -> Statement {
        self.accept_it();
        self.accept(TokenKind::LParen);
        let condition = self.parse_expression();
        self.accept(TokenKind::RParen);

        let body = Box::new(self.parse_statement());

        Statement::While {
            condition,
            body,
            position: self.finish(start),
        }
    }
}
