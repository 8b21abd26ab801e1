//! Expression parsing implementation
//!
//! This module handles parsing of expressions using precedence climbing
//! for binary operators and recursive descent for other expression forms.
//!
//! # Supported Expressions
//!
//! - Literals: integers, `true`, `false`
//! - References: `this`, `x`, `a[i]`, `a.b[i].c`
//! - Calls: `r(args)`
//! - Binary operators: arithmetic, comparison, logical
//! - Unary operators: `-`, `!`
//! - Object and array creation: `new C()`, `new int[n]`, `new C[n]`
//!
//! # Precedence
//!
//! Six levels, lowest first. Every level is left-associative.
//!
//! ```text
//! ||
//! &&
//! ==  !=
//! <   <=  >  >=
//! +   -
//! *   /
//! ```
//!
//! Unary `-` and `!` take a unary operand, so they bind tighter than any
//! binary operator: `-a * b` is `(-a) * b`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::first_sets::Production;
use crate::parser::parse::Parser;
use crate::parser::position::SourcePosition;
use crate::parser::token::TokenKind;
use crate::source::CharSource;

const DISJUNCTION: &[TokenKind] = &[TokenKind::Or];
const CONJUNCTION: &[TokenKind] = &[TokenKind::And];
const EQUALITY: &[TokenKind] = &[TokenKind::Equal, TokenKind::NotEqual];
const RELATIONAL: &[TokenKind] = &[
    TokenKind::Less,
    TokenKind::LessEq,
    TokenKind::Greater,
    TokenKind::GreaterEq,
];
const ADDITIVE: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE: &[TokenKind] = &[TokenKind::Times, TokenKind::Div];

impl<S: CharSource> Parser<'_, S> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Expression {
        self.nested(Self::parse_disjunction, |_, position| Expression::Error { position })
    }

    /// Parse logical OR (||)
    fn parse_disjunction(&mut self) -> Expression {
        self.parse_binary_level(DISJUNCTION, Self::parse_conjunction)
    }

    /// Parse logical AND (&&)
    fn parse_conjunction(&mut self) -> Expression {
        self.parse_binary_level(CONJUNCTION, Self::parse_equality)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Expression {
        self.parse_binary_level(EQUALITY, Self::parse_relational)
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Expression {
        self.parse_binary_level(RELATIONAL, Self::parse_additive)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Expression {
        self.parse_binary_level(ADDITIVE, Self::parse_multiplicative)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Expression {
        self.parse_binary_level(MULTIPLICATIVE, Self::parse_unary)
    }

    /// One precedence level: an operand, then `(op operand)*` folded to the left.
    fn parse_binary_level(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> Expression,
    ) -> Expression {
        let start = self.start();
        let mut left = operand(self);

        while operators.contains(&self.current_kind()) {
            let op = self.accept_operator();
            let right = operand(self);
            left = Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position: self.finish(start),
            };
        }

        left
    }

    /// Parse unary: ('-' | '!') Unary | Primary
    fn parse_unary(&mut self) -> Expression {
        if !self.current_kind().is_unary_operator() {
            return self.parse_primary();
        }

        let start = self.start();
        let op = self.accept_operator();
        let operand = self.nested(Self::parse_unary, |_, position| Expression::Error { position });

        Expression::Unary {
            op,
            operand: Box::new(operand),
            position: self.finish(start),
        }
    }

    /// Parse primary expressions (references, calls, literals, parentheses, `new`)
    fn parse_primary(&mut self) -> Expression {
        let start = self.start();

        match self.current_kind() {
            TokenKind::This | TokenKind::Identifier => {
                let reference = self.parse_reference();

                if self.check(TokenKind::LParen) {
                    self.accept_it();
                    let args = self.parse_optional_arguments();
                    self.accept(TokenKind::RParen);
                    Expression::Call {
                        method: reference,
                        args,
                        position: self.finish(start),
                    }
                } else {
                    Expression::Ref {
                        position: reference.position(),
                        reference,
                    }
                }
            }
            TokenKind::LParen => {
                self.accept_it();
                let inner = self.parse_expression();
                self.accept(TokenKind::RParen);
                inner
            }
            TokenKind::IntLiteral => {
                let token = self.accept_it();
                Expression::Literal {
                    literal: Literal::Int(IntLiteral {
                        spelling: token.spelling,
                        position: token.position,
                    }),
                    position: token.position,
                }
            }
            TokenKind::True | TokenKind::False => {
                let token = self.accept_it();
                Expression::Literal {
                    literal: Literal::Boolean(BooleanLiteral {
                        spelling: token.spelling,
                        position: token.position,
                    }),
                    position: token.position,
                }
            }
            TokenKind::New => {
                self.accept_it();
                self.parse_new(start)
            }
            _ => {
                self.expected("Expression");
                Expression::Error {
                    position: self.empty_here(),
                }
            }
        }
    }

    /// Parse the rest of a `new` expression. `new` has been consumed.
    ///
    /// ```text
    /// NewExpr ::= "int" "[" Expr "]" | ID "(" ")" | ID "[" Expr "]"
    /// ```
    fn parse_new(&mut self, start: SourcePosition) -> Expression {
        match self.current_kind() {
            TokenKind::Int => {
                let element = Type::base(BaseTypeKind::Int, self.start());
                self.accept_it();
                let size = self.parse_index();
                Expression::NewArray {
                    element,
                    size: Box::new(size),
                    position: self.finish(start),
                }
            }
            TokenKind::Identifier => {
                let name = self.accept_identifier();
                let class_type = ClassType {
                    position: name.position,
                    name,
                };

                match self.current_kind() {
                    TokenKind::LParen => {
                        self.accept_it();
                        self.accept(TokenKind::RParen);
                        Expression::NewObject {
                            class_type,
                            position: self.finish(start),
                        }
                    }
                    TokenKind::LBracket => {
                        let size = self.parse_index();
                        Expression::NewArray {
                            element: Type::Class(class_type),
                            size: Box::new(size),
                            position: self.finish(start),
                        }
                    }
                    _ => {
                        self.expected("'(' or '['");
                        Expression::Error {
                            position: self.finish(start),
                        }
                    }
                }
            }
            _ => {
                self.expected("'int' or class name");
                Expression::Error {
                    position: self.finish(start),
                }
            }
        }
    }

    /// Parse `[ Expr ]` and return the inner expression. The current token is `[`.
    fn parse_index(&mut self) -> Expression {
        self.accept(TokenKind::LBracket);
        let index = self.parse_expression();
        self.accept(TokenKind::RBracket);
        index
    }

    /// Parse a reference chain.
    ///
    /// ```text
    /// Reference ::= ("this" | ID ("[" Expr "]")?) ("." ID ("[" Expr "]")?)*
    /// ```
    pub(crate) fn parse_reference(&mut self) -> Reference {
        let start = self.start();

        let base = match self.current_kind() {
            TokenKind::This => {
                self.accept_it();
                Reference::This {
                    position: self.finish(start),
                }
            }
            _ => {
                let id = self.accept_identifier();
                let id_ref = Reference::Id {
                    position: id.position,
                    id,
                };
                self.parse_optional_index(id_ref, start)
            }
        };

        self.parse_reference_tail(base, start)
    }

    /// Extend `base` with `.ID` and `.ID[Expr]` links.
    pub(crate) fn parse_reference_tail(
        &mut self,
        mut base: Reference,
        start: SourcePosition,
    ) -> Reference {
        while self.starts(Production::RefTail) {
            self.accept_it();

            if !self.check(TokenKind::Identifier) {
                self.expected("identifier");
                break;
            }

            let member = self.accept_identifier();
            let qualified = Reference::Qualified {
                base: Box::new(base),
                member,
                position: self.finish(start),
            };
            base = self.parse_optional_index(qualified, start);
        }

        base
    }

    fn parse_optional_index(&mut self, base: Reference, start: SourcePosition) -> Reference {
        if !self.starts(Production::RefArrayIndex) {
            return base;
        }

        let index = self.parse_index();
        Reference::Indexed {
            base: Box::new(base),
            index: Box::new(index),
            position: self.finish(start),
        }
    }

    /// Parse an argument list if one starts here: Expr ("," Expr)*
    pub(crate) fn parse_optional_arguments(&mut self) -> Vec<Expression> {
        if !self.starts(Production::ArgumentList) {
            return Vec::new();
        }

        let mut args = vec![self.parse_expression()];
        while self.check(TokenKind::Comma) {
            self.accept_it();
            args.push(self.parse_expression());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::Parser;
    use crate::parser::token::TokenKind;

    fn expr(source: &str) -> Expression {
        let mut parser = Parser::new(source);
        let expression = parser.parse_expression();
        assert!(
            !parser.reporter().has_errors(),
            "unexpected errors: {:?}",
            parser.reporter().diagnostics()
        );
        assert!(parser.check(TokenKind::Eot), "input not fully consumed");
        expression
    }

    fn binary(expression: &Expression) -> (TokenKind, &Expression, &Expression) {
        match expression {
            Expression::Binary {
                op, left, right, ..
            } => (op.kind, left.as_ref(), right.as_ref()),
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    fn ref_name(expression: &Expression) -> &str {
        match expression {
            Expression::Ref {
                reference: Reference::Id { id, .. },
                ..
            } => &id.spelling,
            other => panic!("expected identifier reference, got {:?}", other),
        }
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let e = expr("a - b - c");
        let (op, left, right) = binary(&e);
        assert_eq!(op, TokenKind::Minus);
        assert_eq!(ref_name(right), "c");

        let (inner_op, a, b) = binary(left);
        assert_eq!(inner_op, TokenKind::Minus);
        assert_eq!(ref_name(a), "a");
        assert_eq!(ref_name(b), "b");
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let e = expr("a + b * c");
        let (op, left, right) = binary(&e);
        assert_eq!(op, TokenKind::Plus);
        assert_eq!(ref_name(left), "a");
        assert_eq!(binary(right).0, TokenKind::Times);
    }

    #[test]
    fn test_parentheses_reset_precedence() {
        let e = expr("a + b * (c - d)");
        let (op, _, right) = binary(&e);
        assert_eq!(op, TokenKind::Plus);

        let (mul, b, group) = binary(right);
        assert_eq!(mul, TokenKind::Times);
        assert_eq!(ref_name(b), "b");
        assert_eq!(binary(group).0, TokenKind::Minus);
    }

    #[test]
    fn test_level_order() {
        // || < && < == < relational < additive
        let e = expr("a || b && c == d < e + f");
        let (or, _, rhs) = binary(&e);
        assert_eq!(or, TokenKind::Or);
        let (and, _, rhs) = binary(rhs);
        assert_eq!(and, TokenKind::And);
        let (eq, _, rhs) = binary(rhs);
        assert_eq!(eq, TokenKind::Equal);
        let (lt, _, rhs) = binary(rhs);
        assert_eq!(lt, TokenKind::Less);
        assert_eq!(binary(rhs).0, TokenKind::Plus);
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        let e = expr("-a * b");
        let (op, left, _) = binary(&e);
        assert_eq!(op, TokenKind::Times);
        assert!(matches!(
            left,
            Expression::Unary { op, .. } if op.kind == TokenKind::Minus
        ));

        let e = expr("!a && b");
        let (op, left, _) = binary(&e);
        assert_eq!(op, TokenKind::And);
        assert!(matches!(left, Expression::Unary { .. }));
    }

    #[test]
    fn test_nested_unary() {
        match &expr("- -a") {
            Expression::Unary { operand, .. } => {
                assert!(matches!(**operand, Expression::Unary { .. }))
            }
            other => panic!("expected unary, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_chain_shape() {
        // a.b[i].c  =>  Qualified(Indexed(Qualified(Id a, b), i), c)
        let e = expr("a.b[i].c");
        let reference = match &e {
            Expression::Ref { reference, .. } => reference,
            other => panic!("expected reference, got {:?}", other),
        };
        assert_eq!(reference.depth(), 4);

        let Reference::Qualified { base, member, .. } = reference else {
            panic!("expected qualified reference");
        };
        assert_eq!(member.spelling, "c");

        let Reference::Indexed { base, index, .. } = &**base else {
            panic!("expected indexed reference");
        };
        assert_eq!(ref_name(index), "i");

        let Reference::Qualified { base, member, .. } = &**base else {
            panic!("expected qualified reference");
        };
        assert_eq!(member.spelling, "b");
        assert!(matches!(&**base, Reference::Id { id, .. } if id.spelling == "a"));
    }

    #[test]
    fn test_call_expression() {
        match &expr("this.o.m(1, x + 2)") {
            Expression::Call { method, args, .. } => {
                assert_eq!(args.len(), 2);
                assert_eq!(method.depth(), 3);
                assert!(matches!(args[1], Expression::Binary { .. }));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_new_expressions() {
        assert!(matches!(
            &expr("new Foo()"),
            Expression::NewObject { class_type, .. } if class_type.name.spelling == "Foo"
        ));

        match &expr("new int[n + 1]") {
            Expression::NewArray { element, size, .. } => {
                assert!(matches!(
                    element,
                    Type::Base(BaseType { kind: BaseTypeKind::Int, .. })
                ));
                assert!(matches!(**size, Expression::Binary { .. }));
            }
            other => panic!("expected new int[], got {:?}", other),
        }

        match &expr("new Foo[3]") {
            Expression::NewArray { element, .. } => {
                assert!(matches!(element, Type::Class(c) if c.name.spelling == "Foo"))
            }
            other => panic!("expected new Foo[], got {:?}", other),
        }
    }

    #[test]
    fn test_literals() {
        match &expr("42") {
            Expression::Literal {
                literal: Literal::Int(int),
                ..
            } => assert_eq!(int.value(), Some(42)),
            other => panic!("expected int literal, got {:?}", other),
        }
        assert!(matches!(
            &expr("false"),
            Expression::Literal {
                literal: Literal::Boolean(b),
                ..
            } if !b.value()
        ));
    }

    #[test]
    fn test_binary_position_spans_operands() {
        let source = "(a + b) * c";
        let e = expr(source);
        let pos = e.position();
        assert_eq!(&source[pos.start..pos.finish], source);

        let (_, group, _) = binary(&e);
        let inner = group.position();
        assert_eq!(&source[inner.start..inner.finish], "a + b");
    }

    #[test]
    fn test_missing_operand_yields_error_node() {
        let mut parser = Parser::new("a + ;");
        let e = parser.parse_expression();

        assert_eq!(parser.reporter().error_count(), 1);
        let (_, _, right) = binary(&e);
        assert!(right.is_error());
        assert!(parser.check(TokenKind::Semicolon));
    }

    #[test]
    fn test_bad_new_is_reported() {
        let mut parser = Parser::new("new boolean[3]");
        let e = parser.parse_expression();
        assert!(e.is_error());
        assert_eq!(parser.reporter().error_count(), 1);
    }
}
