//! Abstract syntax tree for Sable sources

mod expr;
mod stmt;
mod types;

pub use expr::{
    BinaryOp, Expr, ExprKind, Ident, LambdaBody, LambdaExpr, LiteralValue, Param, RegionModifier,
    UnaryOp,
};
pub use stmt::{FunctionDecl, Module, Stmt, StmtKind, VarDecl};
pub use types::{promote, types_equal, FunctionType, ParamMode, PrimitiveKind, Type};
