//! Type checker and semantic analyzer for the Sable language.
//!
//! The crate takes a parsed [`ast::Module`], resolves every expression
//! type, enforces the region-escape rules, and accumulates diagnostics
//! for batch reporting:
//!
//! ```
//! use sable_sema::ast::{Expr, Ident, LiteralValue, Module, Stmt, Type};
//! use sable_sema::sema::Analyzer;
//! use sable_sema::Span;
//!
//! let name = Ident::new("x", Span::default());
//! let init = Expr::literal(LiteralValue::Int(42), Span::default());
//! let mut module = Module::new(vec![Stmt::var_decl(name, Some(Type::int()), Some(init))]);
//!
//! let mut analyzer = Analyzer::new();
//! assert!(analyzer.check_module(&mut module).is_ok());
//! ```
//!
//! Parsing and code generation live in sibling crates; the analyzer
//! only consumes the tree they share.

pub mod ast;
pub mod common;
pub mod sema;

pub use common::{DiagnosticReporter, SemaError, Span};
pub use sema::{Analyzer, Diagnostics, TypeDiagnostic};
