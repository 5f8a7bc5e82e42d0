//! Expression nodes.
//!
//! Every expression carries a `ty` slot the analyzer fills on success;
//! a populated slot is reused verbatim by later passes.

use crate::ast::stmt::Stmt;
use crate::ast::types::{ParamMode, Type};
use crate::common::Span;

/// An identifier with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub text: String,
    pub span: Span,
}

impl Ident {
    pub fn new(text: impl Into<String>, span: Span) -> Ident {
        Ident { text: text.into(), span }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Long(i64),
    Double(f64),
    Char(char),
    Str(String),
    Bool(bool),
    Byte(u8),
    Nil,
}

/// Whether a function or block participates in the enclosing allocation
/// region (`shared`) or owns a region of its own (`private`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionModifier {
    #[default]
    Default,
    Shared,
    Private,
}

/// A declared parameter; the type may be absent on lambdas pending
/// contextual inference.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: Option<Type>,
    pub mode: ParamMode,
}

impl Param {
    pub fn new(name: Ident, ty: Option<Type>) -> Param {
        Param { name, ty, mode: ParamMode::Default }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    pub body: LambdaBody,
    pub modifier: RegionModifier,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(LiteralValue),
    Variable(Ident),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Assign {
        name: Ident,
        value: Box<Expr>,
    },
    IndexAssign {
        target: Box<Expr>,
        index: Box<Expr>,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    StaticCall {
        namespace: Ident,
        method: Ident,
        args: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        member: Ident,
    },
    ArrayLiteral(Vec<Expr>),
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        array: Box<Expr>,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },
    Range {
        start: Box<Expr>,
        end: Box<Expr>,
    },
    Spread(Box<Expr>),
    Increment(Box<Expr>),
    Decrement(Box<Expr>),
    /// `str` interpolation: literal and embedded-expression parts in order
    Interpolated(Vec<Expr>),
    Lambda(LambdaExpr),
    /// `T[n]` or `T[n: default]` allocation
    SizedArrayAlloc {
        element_type: Type,
        size: Box<Expr>,
        default: Option<Box<Expr>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Resolved type, cached by the analyzer on success only
    pub ty: Option<Type>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Expr {
        Expr { kind, span, ty: None }
    }

    pub fn literal(value: LiteralValue, span: Span) -> Expr {
        Expr::new(ExprKind::Literal(value), span)
    }

    pub fn variable(name: Ident) -> Expr {
        let span = name.span;
        Expr::new(ExprKind::Variable(name), span)
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        let span = left.span.merge(right.span);
        Expr::new(
            ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) },
            span,
        )
    }

    pub fn unary(op: UnaryOp, operand: Expr, span: Span) -> Expr {
        Expr::new(ExprKind::Unary { op, operand: Box::new(operand) }, span)
    }

    pub fn assign(name: Ident, value: Expr) -> Expr {
        let span = name.span.merge(value.span);
        Expr::new(ExprKind::Assign { name, value: Box::new(value) }, span)
    }

    pub fn call(callee: Expr, args: Vec<Expr>, span: Span) -> Expr {
        Expr::new(ExprKind::Call { callee: Box::new(callee), args }, span)
    }

    pub fn static_call(namespace: Ident, method: Ident, args: Vec<Expr>, span: Span) -> Expr {
        Expr::new(ExprKind::StaticCall { namespace, method, args }, span)
    }

    pub fn member(object: Expr, member: Ident) -> Expr {
        let span = object.span.merge(member.span);
        Expr::new(ExprKind::Member { object: Box::new(object), member }, span)
    }

    pub fn array_literal(elements: Vec<Expr>, span: Span) -> Expr {
        Expr::new(ExprKind::ArrayLiteral(elements), span)
    }

    pub fn array_access(array: Expr, index: Expr) -> Expr {
        let span = array.span.merge(index.span);
        Expr::new(
            ExprKind::ArrayAccess { array: Box::new(array), index: Box::new(index) },
            span,
        )
    }

    /// Name a callee expression reads as in diagnostics
    pub fn callee_name(&self) -> &str {
        match &self.kind {
            ExprKind::Variable(name) => &name.text,
            ExprKind::Member { member, .. } => &member.text,
            _ => "<anonymous>",
        }
    }
}
