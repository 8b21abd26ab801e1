// AST (Abstract Syntax Tree) definitions for the class-based language

use super::position::SourcePosition;
use super::token::TokenKind;

/// Root of the tree: every class declaration in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub classes: Vec<ClassDecl>,
    pub position: SourcePosition,
}

impl Program {
    pub fn new(classes: Vec<ClassDecl>, position: SourcePosition) -> Self {
        Self { classes, position }
    }

    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|class| class.name.spelling == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Identifier,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Field declaration. Also the `(visibility, static, type) name` prefix of a
/// method, see [`MethodDecl::member`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub visibility: Visibility,
    pub is_static: bool,
    pub ty: Type,
    pub name: Identifier,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// Visibility, static flag, return type and name.
    pub member: FieldDecl,
    pub parameters: Vec<ParameterDecl>,
    pub statements: Vec<Statement>,
    pub return_expr: Option<Expression>,
    pub position: SourcePosition,
}

impl MethodDecl {
    pub fn name(&self) -> &str {
        &self.member.name.spelling
    }

    pub fn return_type(&self) -> &Type {
        &self.member.ty
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub ty: Type,
    pub name: Identifier,
    pub position: SourcePosition,
}

/// Local variable declaration, the left half of a [`Statement::VarDecl`].
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: Type,
    pub name: Identifier,
    pub position: SourcePosition,
}

// ===== Types =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseTypeKind {
    Int,
    Boolean,
    Void,
    /// Placeholder when no type could be parsed.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseType {
    pub kind: BaseTypeKind,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassType {
    pub name: Identifier,
    pub position: SourcePosition,
}

/// `int[]` or `Name[]`; the parser never nests arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub element: Box<Type>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Base(BaseType),
    Class(ClassType),
    Array(ArrayType),
}

impl Type {
    pub fn base(kind: BaseTypeKind, position: SourcePosition) -> Self {
        Type::Base(BaseType { kind, position })
    }

    pub fn class(name: Identifier, position: SourcePosition) -> Self {
        Type::Class(ClassType { name, position })
    }

    pub fn array(element: Type, position: SourcePosition) -> Self {
        Type::Array(ArrayType {
            element: Box::new(element),
            position,
        })
    }

    pub fn position(&self) -> SourcePosition {
        match self {
            Type::Base(t) => t.position,
            Type::Class(t) => t.position,
            Type::Array(t) => t.position,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Base(BaseType { kind: BaseTypeKind::Error, .. }))
    }
}

// ===== Statements =====

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block {
        statements: Vec<Statement>,
        position: SourcePosition,
    },
    VarDecl {
        decl: VarDecl,
        init: Expression,
        position: SourcePosition,
    },
    Assign {
        target: Reference,
        value: Expression,
        position: SourcePosition,
    },
    Call {
        method: Reference,
        args: Vec<Expression>,
        position: SourcePosition,
    },
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
        position: SourcePosition,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
        position: SourcePosition,
    },
}

impl Statement {
    pub fn position(&self) -> SourcePosition {
        match self {
            Statement::Block { position, .. }
            | Statement::VarDecl { position, .. }
            | Statement::Assign { position, .. }
            | Statement::Call { position, .. }
            | Statement::If { position, .. }
            | Statement::While { position, .. } => *position,
        }
    }
}

// ===== Expressions =====

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(IntLiteral),
    Boolean(BooleanLiteral),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Ref {
        reference: Reference,
        position: SourcePosition,
    },
    Call {
        method: Reference,
        args: Vec<Expression>,
        position: SourcePosition,
    },
    Literal {
        literal: Literal,
        position: SourcePosition,
    },
    Unary {
        op: Operator,
        operand: Box<Expression>,
        position: SourcePosition,
    },
    Binary {
        op: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
        position: SourcePosition,
    },
    NewObject {
        class_type: ClassType,
        position: SourcePosition,
    },
    NewArray {
        element: Type,
        size: Box<Expression>,
        position: SourcePosition,
    },
    /// Stand-in for an expression that failed to parse; always accompanied
    /// by a reported diagnostic.
    Error { position: SourcePosition },
}

impl Expression {
    pub fn position(&self) -> SourcePosition {
        match self {
            Expression::Ref { position, .. }
            | Expression::Call { position, .. }
            | Expression::Literal { position, .. }
            | Expression::Unary { position, .. }
            | Expression::Binary { position, .. }
            | Expression::NewObject { position, .. }
            | Expression::NewArray { position, .. }
            | Expression::Error { position } => *position,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Expression::Error { .. })
    }

    /// Detach the left operand of a binary node, leaving an error node behind.
    fn take_left(&mut self) -> Option<Box<Expression>> {
        match self {
            Expression::Binary { left, .. } => Some(std::mem::replace(
                left,
                Box::new(Expression::Error {
                    position: SourcePosition::default(),
                }),
            )),
            _ => None,
        }
    }
}

// Left-folded operator chains have no depth limit, so the left spine is
// released in a loop instead of recursively.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut next = self.take_left();
        while let Some(mut left) = next {
            next = left.take_left();
        }
    }
}

// ===== References =====

#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    This {
        position: SourcePosition,
    },
    Id {
        id: Identifier,
        position: SourcePosition,
    },
    Qualified {
        base: Box<Reference>,
        member: Identifier,
        position: SourcePosition,
    },
    Indexed {
        base: Box<Reference>,
        index: Box<Expression>,
        position: SourcePosition,
    },
}

impl Reference {
    pub fn position(&self) -> SourcePosition {
        match self {
            Reference::This { position }
            | Reference::Id { position, .. }
            | Reference::Qualified { position, .. }
            | Reference::Indexed { position, .. } => *position,
        }
    }

    /// Number of links in the chain, `this`/`x` counting as one.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self;
        while let Reference::Qualified { base, .. } | Reference::Indexed { base, .. } = current {
            depth += 1;
            current = &**base;
        }
        depth
    }

    fn take_base(&mut self) -> Option<Box<Reference>> {
        match self {
            Reference::Qualified { base, .. } | Reference::Indexed { base, .. } => {
                let this = Reference::This {
                    position: SourcePosition::default(),
                };
                Some(std::mem::replace(base, Box::new(this)))
            }
            Reference::This { .. } | Reference::Id { .. } => None,
        }
    }
}

// Same for `a.b[i].c...` chains.
impl Drop for Reference {
    fn drop(&mut self) {
        let mut next = self.take_base();
        while let Some(mut base) = next {
            next = base.take_base();
        }
    }
}

// ===== Leaves =====

#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub kind: TokenKind,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub spelling: String,
    pub position: SourcePosition,
}

impl Identifier {
    pub fn new(spelling: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            spelling: spelling.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntLiteral {
    pub spelling: String,
    pub position: SourcePosition,
}

impl IntLiteral {
    /// Numeric value, if it fits in an `i32`.
    pub fn value(&self) -> Option<i32> {
        self.spelling.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanLiteral {
    pub spelling: String,
    pub position: SourcePosition,
}

impl BooleanLiteral {
    pub fn value(&self) -> bool {
        self.spelling == "true"
    }
}
