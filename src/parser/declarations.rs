//! Declaration parsing implementation
//!
//! This module handles class declarations and everything that can appear in
//! a class body:
//!
//! - Class declarations: `class Name { ... }`
//! - Fields: `private static int count;`
//! - Methods: `public int get(int i) { ... return x; }`
//! - Types: `int`, `boolean`, `void`, `Name`, `int[]`, `Name[]`
//! - Parameter lists
//!
//! # Grammar
//!
//! ```text
//! ClassDecl  ::= "class" ID "{" Declarator* "}"
//! Declarator ::= ("public" | "private")? "static"? Type ID ( MethodTail | ";" )
//! MethodTail ::= "(" ParamList? ")" "{" Statement* ("return" Expr ";")? "}"
//! Type       ::= "int" ("[" "]")? | "boolean" | "void" | ID ("[" "]")?
//! ParamList  ::= Type ID ("," Type ID)*
//! ```
//!
//! Fields and methods share the declarator prefix; only the token after the
//! name decides which one is being parsed.

use crate::parser::ast::*;
use crate::parser::first_sets::Production;
use crate::parser::parse::Parser;
use crate::parser::position::SourcePosition;
use crate::parser::token::TokenKind;
use crate::source::CharSource;
use log::debug;

/// Tokens that can begin the next class member, or the next class.
const MEMBER_RECOVERY: &[TokenKind] = &[
    TokenKind::Public,
    TokenKind::Private,
    TokenKind::Static,
    TokenKind::Int,
    TokenKind::Boolean,
    TokenKind::Void,
    TokenKind::Class,
];

enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
}

impl<S: CharSource> Parser<'_, S> {
    /// Parse a class declaration. The current token is `class`.
    pub(crate) fn parse_class_declaration(&mut self) -> ClassDecl {
        let start = self.start();
        self.accept(TokenKind::Class);
        let name = self.accept_identifier();
        debug!("class {} at {}", name.spelling, start);

        self.accept(TokenKind::LCurly);

        let mut fields = Vec::new();
        let mut methods = Vec::new();

        while !self.check(TokenKind::RCurly)
            && !self.check(TokenKind::Eot)
            && !self.check(TokenKind::Class)
        {
            if !self.starts(Production::Declarator) {
                self.syntax_error("Field or method declaration expected, instead of");
                self.synchronize(MEMBER_RECOVERY);
                continue;
            }

            let before = self.state.consumed;
            match self.parse_member() {
                Member::Field(field) => fields.push(field),
                Member::Method(method) => methods.push(method),
            }
            if self.state.consumed == before {
                self.synchronize(MEMBER_RECOVERY);
            }
        }

        self.accept(TokenKind::RCurly);

        ClassDecl {
            name,
            fields,
            methods,
            position: self.finish(start),
        }
    }

    /// Parse the shared declarator, then branch on `(` or `;`.
    fn parse_member(&mut self) -> Member {
        let start = self.start();

        let visibility = match self.current_kind() {
            TokenKind::Private => {
                self.accept_it();
                Visibility::Private
            }
            TokenKind::Public => {
                self.accept_it();
                Visibility::Public
            }
            _ => Visibility::Public,
        };

        let is_static = if self.check(TokenKind::Static) {
            self.accept_it();
            true
        } else {
            false
        };

        let ty = self.parse_type();
        let name = self.accept_identifier();
        let member = FieldDecl {
            visibility,
            is_static,
            ty,
            name,
            position: self.finish(start),
        };

        match self.current_kind() {
            TokenKind::LParen => Member::Method(self.parse_method_tail(member, start)),
            TokenKind::Semicolon => {
                self.accept_it();
                Member::Field(FieldDecl {
                    position: self.finish(start),
                    ..member
                })
            }
            _ => {
                // Keep the field; the missing ';' has been reported.
                self.expected("'(' or ';'");
                Member::Field(member)
            }
        }
    }

    /// Parse `( params ) { body }` after a declarator. The current token is `(`.
    fn parse_method_tail(
        &mut self,
        member: FieldDecl,
        start: SourcePosition,
    ) -> MethodDecl {
        debug!("method {} at {}", member.name.spelling, start);
        self.accept(TokenKind::LParen);

        let parameters = if self.starts(Production::ParameterList) {
            self.parse_parameter_list()
        } else {
            Vec::new()
        };

        self.accept(TokenKind::RParen);
        self.accept(TokenKind::LCurly);

        let statements = self.parse_statement_list(&[TokenKind::RCurly, TokenKind::Return]);

        let return_expr = if self.check(TokenKind::Return) {
            self.accept_it();
            let expr = self.parse_expression();
            self.accept(TokenKind::Semicolon);
            Some(expr)
        } else {
            None
        };

        self.accept(TokenKind::RCurly);

        MethodDecl {
            member,
            parameters,
            statements,
            return_expr,
            position: self.finish(start),
        }
    }

    /// Parse parameter list: Type ID ("," Type ID)*
    pub(crate) fn parse_parameter_list(&mut self) -> Vec<ParameterDecl> {
        let mut parameters = vec![self.parse_parameter()];

        while self.check(TokenKind::Comma) {
            self.accept_it();
            parameters.push(self.parse_parameter());
        }

        parameters
    }

    fn parse_parameter(&mut self) -> ParameterDecl {
        let start = self.start();
        let ty = self.parse_type();
        let name = self.accept_identifier();

        ParameterDecl {
            ty,
            name,
            position: self.finish(start),
        }
    }

    /// Parse type: int | int[] | boolean | void | ID | ID[]
    pub(crate) fn parse_type(&mut self) -> Type {
        let start = self.start();

        match self.current_kind() {
            TokenKind::Int => {
                self.accept_it();
                let int = Type::base(BaseTypeKind::Int, start);
                self.parse_array_suffix(int, start)
            }
            TokenKind::Boolean => {
                self.accept_it();
                Type::base(BaseTypeKind::Boolean, start)
            }
            TokenKind::Void => {
                self.accept_it();
                Type::base(BaseTypeKind::Void, start)
            }
            TokenKind::Identifier => {
                let name = self.accept_identifier();
                let class = Type::class(name, start);
                self.parse_array_suffix(class, start)
            }
            _ => {
                self.expected("Type");
                Type::base(BaseTypeKind::Error, self.empty_here())
            }
        }
    }

    /// Wrap `element` in an array type if `[ ]` follows.
    pub(crate) fn parse_array_suffix(
        &mut self,
        element: Type,
        start: SourcePosition,
    ) -> Type {
        if !self.check(TokenKind::LBracket) {
            return element;
        }

        self.accept_it();
        self.accept(TokenKind::RBracket);
        Type::array(element, self.finish(start))
    }
}
