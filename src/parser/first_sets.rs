//! FIRST sets of the grammar's productions
//!
//! The parser never guesses: before entering a production it checks the
//! lookahead against that production's FIRST set. Keeping the sets in one
//! table lets tests iterate over them.

use super::token::TokenKind;

/// Grammar productions whose choice is driven by one token of lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    ClassDecl,
    Declarator,
    Type,
    ParameterList,
    Statement,
    Reference,
    Expression,
    ArgumentList,
    RefTail,
    RefArrayIndex,
    NewExpr,
}

const TYPE: &[TokenKind] = &[
    TokenKind::Int,
    TokenKind::Boolean,
    TokenKind::Void,
    TokenKind::Identifier,
];

const DECLARATOR: &[TokenKind] = &[
    TokenKind::Public,
    TokenKind::Private,
    TokenKind::Static,
    TokenKind::Int,
    TokenKind::Boolean,
    TokenKind::Void,
    TokenKind::Identifier,
];

const STATEMENT: &[TokenKind] = &[
    TokenKind::LCurly,
    TokenKind::Int,
    TokenKind::Boolean,
    TokenKind::Void,
    TokenKind::Identifier,
    TokenKind::This,
    TokenKind::If,
    TokenKind::While,
];

const REFERENCE: &[TokenKind] = &[TokenKind::This, TokenKind::Identifier];

const EXPRESSION: &[TokenKind] = &[
    TokenKind::This,
    TokenKind::Identifier,
    TokenKind::Minus,
    TokenKind::Not,
    TokenKind::LParen,
    TokenKind::IntLiteral,
    TokenKind::True,
    TokenKind::False,
    TokenKind::New,
];

const NEW_EXPR: &[TokenKind] = &[TokenKind::Int, TokenKind::Identifier];

impl Production {
    pub const ALL: [Production; 11] = [
        Production::ClassDecl,
        Production::Declarator,
        Production::Type,
        Production::ParameterList,
        Production::Statement,
        Production::Reference,
        Production::Expression,
        Production::ArgumentList,
        Production::RefTail,
        Production::RefArrayIndex,
        Production::NewExpr,
    ];

    /// Token kinds that can begin this production.
    pub fn first_set(self) -> &'static [TokenKind] {
        match self {
            Production::ClassDecl => &[TokenKind::Class],
            Production::Declarator => DECLARATOR,
            Production::Type | Production::ParameterList => TYPE,
            Production::Statement => STATEMENT,
            Production::Reference => REFERENCE,
            Production::Expression | Production::ArgumentList => EXPRESSION,
            Production::RefTail => &[TokenKind::Dot],
            Production::RefArrayIndex => &[TokenKind::LBracket],
            Production::NewExpr => NEW_EXPR,
        }
    }

    pub fn starts_with(self, kind: TokenKind) -> bool {
        self.first_set().contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sets_are_non_empty_and_exclude_eot() {
        for production in Production::ALL {
            let set = production.first_set();
            assert!(!set.is_empty(), "{:?} has an empty FIRST set", production);
            assert!(!set.contains(&TokenKind::Eot));
            assert!(!set.contains(&TokenKind::Error));
        }
    }

    #[test]
    fn test_statement_and_expression_disjoint_where_expected() {
        // A statement never starts with a literal or an operator.
        assert!(!Production::Statement.starts_with(TokenKind::IntLiteral));
        assert!(!Production::Statement.starts_with(TokenKind::Minus));
        // The return statement is not part of Statement.
        assert!(!Production::Statement.starts_with(TokenKind::Return));
    }

    #[test]
    fn test_type_is_subset_of_declarator() {
        for kind in Production::Type.first_set() {
            assert!(Production::Declarator.starts_with(*kind));
        }
    }
}
