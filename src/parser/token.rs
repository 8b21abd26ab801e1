//! Token model
//!
//! A [`Token`] is a `{kind, spelling, position}` triple. Reserved words are
//! never scanned separately: the lexer produces an identifier and
//! [`Token::new`] reclassifies it against a [`ReservedWords`] table, so the
//! parser only ever looks at [`TokenKind`].

use super::position::SourcePosition;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    IntLiteral,
    Identifier,

    // Operators
    Greater,   // >
    Less,      // <
    Equal,     // ==
    LessEq,    // <=
    GreaterEq, // >=
    NotEqual,  // !=
    And,       // &&
    Or,        // ||
    Not,       // !
    Plus,      // +
    Minus,     // -
    Times,     // *
    Div,       // /
    Assign,    // =

    // Reserved words
    Class,
    Return,
    Public,
    Private,
    Static,
    Int,
    Boolean,
    Void,
    This,
    If,
    Else,
    While,
    True,
    False,
    New,

    // Punctuation
    Dot,       // .
    Comma,     // ,
    Semicolon, // ;
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LCurly,    // {
    RCurly,    // }

    Eot,
    Error,
}

impl TokenKind {
    /// Every reserved word kind, in table order.
    pub const RESERVED: [TokenKind; 15] = [
        TokenKind::Class,
        TokenKind::Return,
        TokenKind::Public,
        TokenKind::Private,
        TokenKind::Static,
        TokenKind::Int,
        TokenKind::Boolean,
        TokenKind::Void,
        TokenKind::This,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::While,
        TokenKind::True,
        TokenKind::False,
        TokenKind::New,
    ];

    /// Canonical spelling, used in diagnostics.
    pub fn spelling(self) -> &'static str {
        match self {
            TokenKind::IntLiteral => "<int>",
            TokenKind::Identifier => "<identifier>",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::Equal => "==",
            TokenKind::LessEq => "<=",
            TokenKind::GreaterEq => ">=",
            TokenKind::NotEqual => "!=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Not => "!",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Times => "*",
            TokenKind::Div => "/",
            TokenKind::Assign => "=",
            TokenKind::Class => "class",
            TokenKind::Return => "return",
            TokenKind::Public => "public",
            TokenKind::Private => "private",
            TokenKind::Static => "static",
            TokenKind::Int => "int",
            TokenKind::Boolean => "boolean",
            TokenKind::Void => "void",
            TokenKind::This => "this",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::New => "new",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LCurly => "{",
            TokenKind::RCurly => "}",
            TokenKind::Eot => "<end of input>",
            TokenKind::Error => "<error>",
        }
    }

    pub fn is_reserved(self) -> bool {
        Self::RESERVED.contains(&self)
    }

    /// Operators that may appear between two operands.
    pub fn is_binary_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Greater
                | TokenKind::Less
                | TokenKind::Equal
                | TokenKind::LessEq
                | TokenKind::GreaterEq
                | TokenKind::NotEqual
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Times
                | TokenKind::Div
        )
    }

    pub fn is_unary_operator(self) -> bool {
        matches!(self, TokenKind::Minus | TokenKind::Not)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.spelling())
    }
}

/// Spelling → reserved kind mapping.
///
/// Built once and handed to the lexer; nothing reads it as ambient state.
#[derive(Debug, Clone)]
pub struct ReservedWords {
    words: FxHashMap<&'static str, TokenKind>,
}

static STANDARD_WORDS: Lazy<ReservedWords> = Lazy::new(|| {
    ReservedWords::from_kinds(TokenKind::RESERVED.iter().copied())
});

impl ReservedWords {
    /// The language's fixed reserved-word table.
    pub fn standard() -> &'static ReservedWords {
        &STANDARD_WORDS
    }

    pub fn from_kinds(kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        let words = kinds
            .into_iter()
            .filter(|kind| kind.is_reserved())
            .map(|kind| (kind.spelling(), kind))
            .collect();
        Self { words }
    }

    pub fn lookup(&self, spelling: &str) -> Option<TokenKind> {
        self.words.get(spelling).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub spelling: String,
    pub position: SourcePosition,
}

impl Token {
    /// Builds a token, promoting identifiers whose spelling is reserved.
    pub fn new(
        kind: TokenKind,
        spelling: String,
        position: SourcePosition,
        reserved: &ReservedWords,
    ) -> Self {
        let kind = match kind {
            TokenKind::Identifier => reserved.lookup(&spelling).unwrap_or(kind),
            other => other,
        };
        Self {
            kind,
            spelling,
            position,
        }
    }

    /// End-of-input token at the given offset.
    pub fn eot(position: SourcePosition) -> Self {
        Self {
            kind: TokenKind::Eot,
            spelling: String::new(),
            position,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::IntLiteral => write!(f, "int literal {}", self.spelling),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.spelling),
            TokenKind::Eot => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.spelling),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(spelling: &str) -> Token {
        Token::new(
            TokenKind::Identifier,
            spelling.to_string(),
            SourcePosition::default(),
            ReservedWords::standard(),
        )
    }

    #[test]
    fn test_reserved_words_are_promoted() {
        for kind in TokenKind::RESERVED {
            assert_eq!(ident(kind.spelling()).kind, kind);
        }
    }

    #[test]
    fn test_plain_identifiers_stay_identifiers() {
        assert_eq!(ident("classy").kind, TokenKind::Identifier);
        assert_eq!(ident("Class").kind, TokenKind::Identifier);
        assert_eq!(ident("x_1").kind, TokenKind::Identifier);
    }

    #[test]
    fn test_non_identifier_kinds_are_not_reclassified() {
        let token = Token::new(
            TokenKind::IntLiteral,
            "class".to_string(),
            SourcePosition::default(),
            ReservedWords::standard(),
        );
        assert_eq!(token.kind, TokenKind::IntLiteral);
    }

    #[test]
    fn test_injected_table() {
        let words = ReservedWords::from_kinds([TokenKind::While, TokenKind::Plus]);
        assert_eq!(words.len(), 1);
        assert!(ReservedWords::from_kinds([TokenKind::Plus]).is_empty());

        let token = Token::new(
            TokenKind::Identifier,
            "class".to_string(),
            SourcePosition::default(),
            &words,
        );
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(words.lookup("while"), Some(TokenKind::While));
    }

    #[test]
    fn test_standard_table_size() {
        assert_eq!(ReservedWords::standard().len(), 15);
        assert!(!ReservedWords::standard().is_empty());
    }
}
