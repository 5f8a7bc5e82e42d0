//! Statement and declaration nodes.

use crate::ast::expr::{Expr, Ident, Param, RegionModifier};
use crate::ast::types::{ParamMode, Type};
use crate::common::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    pub body: Vec<Stmt>,
    pub modifier: RegionModifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Ident,
    /// Declared type; filled in by the analyzer when inferred
    pub ty: Option<Type>,
    pub initializer: Option<Expr>,
    pub mode: ParamMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expr(Expr),
    VarDecl(VarDecl),
    Function(FunctionDecl),
    Return(Option<Expr>),
    Block {
        statements: Vec<Stmt>,
        modifier: RegionModifier,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Box<Stmt>,
    },
    ForEach {
        variable: Ident,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Break,
    Continue,
    Import(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Stmt {
        Stmt { kind, span }
    }

    pub fn expr(expr: Expr) -> Stmt {
        let span = expr.span;
        Stmt::new(StmtKind::Expr(expr), span)
    }

    pub fn var_decl(name: Ident, ty: Option<Type>, initializer: Option<Expr>) -> Stmt {
        let span = name.span;
        Stmt::new(
            StmtKind::VarDecl(VarDecl { name, ty, initializer, mode: ParamMode::Default }),
            span,
        )
    }

    pub fn block(statements: Vec<Stmt>, modifier: RegionModifier, span: Span) -> Stmt {
        Stmt::new(StmtKind::Block { statements, modifier }, span)
    }

    pub fn ret(value: Option<Expr>, span: Span) -> Stmt {
        Stmt::new(StmtKind::Return(value), span)
    }
}

/// A parsed source file: top-level statements in order
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub statements: Vec<Stmt>,
}

impl Module {
    pub fn new(statements: Vec<Stmt>) -> Module {
        Module { statements }
    }
}
