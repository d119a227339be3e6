// Copyright 2025-2026 Neil Henderson
//
//! The `ast` module defines the VSL AST that the front end produces and the code
//! generator consumes.
//!
//! The tree is fully resolved: every identifier carries a back-reference into the
//! symbol table, and every string literal has been interned into the program's
//! string table.

use crate::symbols::SymbolRef;

/// An expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A 64-bit signed integer literal.
    Number(i64),

    /// A reference to a variable or parameter.
    Identifier(SymbolRef),

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// A call to another VSL function. Arity is checked against the callee's
    /// declaration during code generation.
    Call {
        callee: SymbolRef,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Creates a unary expression.
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary { op, operand: Box::new(operand) }
    }

    /// Creates a binary expression.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    /// Creates a function call expression.
    pub fn call(callee: SymbolRef, args: Vec<Expr>) -> Self {
        Expr::Call { callee, args }
    }

    /// Creates an identifier expression.
    pub fn ident(symbol: &SymbolRef) -> Self {
        Expr::Identifier(symbol.clone())
    }
}

/// A unary operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UnaryOp {
    Negate,
    BitNot,
}

/// A binary operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BinaryOp {
    Or,
    Xor,
    And,
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// The arithmetic operator of a compound assignment (`+=`, `-=`, `*=`, `/=`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// A relational operator, valid only in `if` and `while` conditions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RelationOp {
    Equal,
    Greater,
    Less,
}

/// A comparison between two expressions, controlling an `if` or `while`.
#[derive(Debug, Clone)]
pub struct Relation {
    pub op: RelationOp,
    pub lhs: Expr,
    pub rhs: Expr,
}

impl Relation {
    /// Creates a relation.
    pub fn new(op: RelationOp, lhs: Expr, rhs: Expr) -> Self {
        Self { op, lhs, rhs }
    }
}

/// One item of a `print` statement.
#[derive(Debug, Clone)]
pub enum PrintItem {
    /// An interned string literal, identified by its string-table index.
    StringLiteral(usize),

    /// A variable or parameter, printed as a signed integer.
    Identifier(SymbolRef),

    /// An arbitrary expression, printed as a signed integer.
    Expr(Expr),
}

/// A statement.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// A nested statement list.
    Block(Block),

    Assign {
        target: SymbolRef,
        value: Expr,
    },

    /// A compound assignment: `target op= value`.
    Compound {
        op: ArithmeticOp,
        target: SymbolRef,
        value: Expr,
    },

    Print(Vec<PrintItem>),

    Return(Expr),

    If {
        condition: Relation,
        then_body: Box<Stmt>,
        else_body: Option<Box<Stmt>>,
    },

    While {
        condition: Relation,
        body: Box<Stmt>,
    },

    /// `continue`: jump to the innermost enclosing loop's condition check.
    Continue,
}

/// A block is an ordered list of declarations and statements.
#[derive(Debug, Clone)]
pub struct Block(pub Vec<BlockItem>);

/// An item in a block.
///
/// Declarations introduce local variables but generate no code of their own; storage for
/// every local is reserved once in the function prologue, so the code generator walks
/// past them.
#[derive(Debug, Clone)]
pub enum BlockItem {
    Declaration(SymbolRef),
    Statement(Stmt),
}
