//! Semantic analysis for Sable modules.
//!
//! [`Analyzer`] is a single-run session: it owns the scope chain, the
//! region-depth counter, and the diagnostic accumulator. Checking walks
//! the tree top-down, resolves every expression type, caches results on
//! the nodes, and keeps going past errors so one pass reports as much
//! as possible. Not shareable across concurrent checks of different
//! modules.

pub mod diagnostics;
mod expr;
pub mod members;
mod scope;
pub mod statics;
mod stmt;

pub use diagnostics::{Diagnostics, TypeDiagnostic};
pub use scope::{Symbol, SymbolKind, SymbolTable};

use crate::ast::Module;
use crate::common::SemaError;

pub struct Analyzer {
    pub(crate) table: SymbolTable,
    pub(crate) diags: Diagnostics,
}

impl Analyzer {
    pub fn new() -> Analyzer {
        Analyzer { table: SymbolTable::new(), diags: Diagnostics::new() }
    }

    /// Check a whole module. The session is reset first, so a single
    /// analyzer can check independent modules one after another.
    ///
    /// # Errors
    ///
    /// Returns [`SemaError::CheckFailed`] when any diagnostic was
    /// reported; the individual entries stay available through
    /// [`Analyzer::diagnostics`].
    pub fn check_module(&mut self, module: &mut Module) -> Result<(), SemaError> {
        self.diags.reset();
        self.table = SymbolTable::new();
        log::debug!("checking module ({} top-level statements)", module.statements.len());
        for stmt in &mut module.statements {
            self.check_stmt(stmt, None);
        }
        if self.diags.had_error() {
            return Err(SemaError::CheckFailed { count: self.diags.count() });
        }
        Ok(())
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diags
    }

    /// Symbols registered so far; module-level bindings survive the run
    pub fn symbols(&self) -> &SymbolTable {
        &self.table
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        BinaryOp, Expr, ExprKind, Ident, LambdaBody, LambdaExpr, LiteralValue, Module, Param,
        RegionModifier, Stmt, StmtKind, Type,
    };
    use crate::common::Span;
    use pretty_assertions::assert_eq;

    fn ident(name: &str) -> Ident {
        Ident::new(name, Span::default())
    }

    fn int_lit(value: i64) -> Expr {
        Expr::literal(LiteralValue::Int(value), Span::default())
    }

    fn str_lit(value: &str) -> Expr {
        Expr::literal(LiteralValue::Str(value.to_string()), Span::default())
    }

    fn double_lit(value: f64) -> Expr {
        Expr::literal(LiteralValue::Double(value), Span::default())
    }

    fn var(name: &str) -> Expr {
        Expr::variable(ident(name))
    }

    fn messages(analyzer: &Analyzer) -> Vec<String> {
        analyzer.diagnostics().entries().iter().map(TypeDiagnostic::render).collect()
    }

    #[test]
    fn test_annotated_declaration_registers_symbol() {
        let mut module =
            Module::new(vec![Stmt::var_decl(ident("x"), Some(Type::int()), Some(int_lit(42)))]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        assert_eq!(analyzer.symbols().lookup("x").map(|s| s.ty.clone()), Some(Type::int()));
    }

    #[test]
    fn test_inference_then_mismatched_reassignment() {
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("y"), None, Some(double_lit(3.14))),
            Stmt::expr(Expr::assign(ident("y"), str_lit("oops"))),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        // the declaration inferred double before the assignment failed
        match &module.statements[0].kind {
            StmtKind::VarDecl(decl) => assert_eq!(decl.ty, Some(Type::double())),
            other => panic!("expected var decl, got {other:?}"),
        }
        // the failed assignment's type stays absent
        match &module.statements[1].kind {
            StmtKind::Expr(expr) => assert_eq!(expr.ty, None),
            other => panic!("expected expression statement, got {other:?}"),
        }
        assert_eq!(
            messages(&analyzer),
            vec!["Cannot assign value of type 'str' to 'y' of type 'double'"]
        );
    }

    fn add_function() -> Stmt {
        let body = Expr::binary(var("a"), BinaryOp::Add, var("b"));
        Stmt::new(
            StmtKind::Function(crate::ast::FunctionDecl {
                name: ident("add"),
                params: vec![
                    Param::new(ident("a"), Some(Type::int())),
                    Param::new(ident("b"), Some(Type::int())),
                ],
                return_type: Some(Type::int()),
                body: vec![Stmt::ret(Some(body), Span::default())],
                modifier: RegionModifier::Default,
            }),
            Span::default(),
        )
    }

    #[test]
    fn test_function_declaration_and_call() {
        let call = Expr::call(var("add"), vec![int_lit(1), int_lit(2)], Span::default());
        let mut module = Module::new(vec![add_function(), Stmt::expr(call)]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        assert_eq!(
            analyzer.symbols().lookup("add").map(|s| s.ty.to_string()),
            Some("function(int, int) -> int".to_string())
        );
        match &module.statements[1].kind {
            StmtKind::Expr(expr) => assert_eq!(expr.ty, Some(Type::int())),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_call_arity_error_names_callable() {
        let call = Expr::call(var("add"), vec![int_lit(1)], Span::default());
        let mut module = Module::new(vec![add_function(), Stmt::expr(call)]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(messages(&analyzer), vec!["function 'add' expects 2 argument(s), got 1"]);
    }

    #[test]
    fn test_argument_type_error_is_one_based() {
        let call = Expr::call(var("add"), vec![int_lit(1), str_lit("two")], Span::default());
        let mut module = Module::new(vec![add_function(), Stmt::expr(call)]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(
            messages(&analyzer),
            vec!["argument 2 of 'add': expected 'int', got 'str'"]
        );
    }

    #[test]
    fn test_array_method_call_through_member() {
        let push = Expr::call(
            Expr::member(var("arr"), ident("push")),
            vec![int_lit(5)],
            Span::default(),
        );
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("arr"), Some(Type::array_of(Type::int())), None),
            Stmt::expr(push),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        match &module.statements[1].kind {
            StmtKind::Expr(expr) => {
                assert_eq!(expr.ty, Some(Type::void()));
                match &expr.kind {
                    ExprKind::Call { callee, .. } => assert_eq!(
                        callee.ty.as_ref().map(ToString::to_string),
                        Some("function(int) -> void".to_string())
                    ),
                    other => panic!("expected call, got {other:?}"),
                }
            }
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_undefined_variable_suggestion() {
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("total"), Some(Type::int()), Some(int_lit(0))),
            Stmt::expr(var("totel")),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(
            messages(&analyzer),
            vec!["Undefined variable 'totel': did you mean 'total'?"]
        );
    }

    #[test]
    fn test_undefined_assignment_target() {
        let mut module =
            Module::new(vec![Stmt::expr(Expr::assign(ident("missing"), int_lit(1)))]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(messages(&analyzer), vec!["Cannot assign to undefined variable 'missing'"]);
    }

    #[test]
    fn test_escape_rule_blocks_non_primitives() {
        let literal = Expr::array_literal(vec![str_lit("x")], Span::default());
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("data"), Some(Type::array_of(Type::str_())), None),
            Stmt::block(
                vec![Stmt::expr(Expr::assign(ident("data"), literal))],
                RegionModifier::Private,
                Span::default(),
            ),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(
            messages(&analyzer),
            vec!["Cannot assign non-primitive type to variable declared outside private block"]
        );
    }

    #[test]
    fn test_escape_rule_allows_primitives() {
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("n"), Some(Type::int()), Some(int_lit(0))),
            Stmt::block(
                vec![Stmt::expr(Expr::assign(ident("n"), int_lit(5)))],
                RegionModifier::Private,
                Span::default(),
            ),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
    }

    #[test]
    fn test_same_depth_non_primitive_assignment_is_fine() {
        let literal = Expr::array_literal(vec![str_lit("x")], Span::default());
        let mut module = Module::new(vec![
            Stmt::block(
                vec![
                    Stmt::var_decl(ident("data"), Some(Type::array_of(Type::str_())), None),
                    Stmt::expr(Expr::assign(ident("data"), literal)),
                ],
                RegionModifier::Private,
                Span::default(),
            ),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
    }

    #[test]
    fn test_success_is_memoized() {
        let mut expr = Expr::binary(int_lit(1), BinaryOp::Add, int_lit(2));
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.check_expr(&mut expr), Some(Type::int()));
        // corrupt a child: the cached result must win over recomputation
        if let ExprKind::Binary { left, .. } = &mut expr.kind {
            left.kind = ExprKind::Literal(LiteralValue::Str("not an int".to_string()));
            left.ty = None;
        }
        assert_eq!(analyzer.check_expr(&mut expr), Some(Type::int()));
        assert!(!analyzer.diagnostics().had_error());
    }

    #[test]
    fn test_failure_is_recomputed_and_rereported() {
        let mut expr = Expr::binary(int_lit(1), BinaryOp::Sub, str_lit("x"));
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.check_expr(&mut expr), None);
        assert_eq!(analyzer.check_expr(&mut expr), None);
        assert_eq!(analyzer.diagnostics().count(), 2);
    }

    #[test]
    fn test_lambda_types_inferred_from_declaration() {
        let body = Expr::binary(var("x"), BinaryOp::Add, int_lit(1));
        let lambda = Expr::new(
            ExprKind::Lambda(LambdaExpr {
                params: vec![Param::new(ident("x"), None)],
                return_type: None,
                body: LambdaBody::Expr(Box::new(body)),
                modifier: RegionModifier::Default,
            }),
            Span::default(),
        );
        let declared = Type::function(Some(Type::int()), vec![Some(Type::int())]);
        let mut module =
            Module::new(vec![Stmt::var_decl(ident("f"), Some(declared.clone()), Some(lambda))]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        match &module.statements[0].kind {
            StmtKind::VarDecl(decl) => {
                let init = decl.initializer.as_ref().unwrap();
                assert_eq!(init.ty, Some(declared));
            }
            other => panic!("expected var decl, got {other:?}"),
        }
    }

    #[test]
    fn test_lambda_without_context_is_an_error() {
        let lambda = Expr::new(
            ExprKind::Lambda(LambdaExpr {
                params: vec![Param::new(ident("x"), None)],
                return_type: None,
                body: LambdaBody::Expr(Box::new(var("x"))),
                modifier: RegionModifier::Default,
            }),
            Span::default(),
        );
        let mut module = Module::new(vec![Stmt::expr(lambda)]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(
            messages(&analyzer),
            vec![
                "Cannot infer type of lambda parameter 'x'",
                "Cannot infer lambda return type"
            ]
        );
    }

    #[test]
    fn test_static_call_surface() {
        let open = Expr::static_call(
            ident("TextFile"),
            ident("open"),
            vec![str_lit("log.txt")],
            Span::default(),
        );
        let mut module = Module::new(vec![Stmt::var_decl(ident("f"), None, Some(open))]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        assert_eq!(
            analyzer.symbols().lookup("f").map(|s| s.ty.clone()),
            Some(Type::primitive(crate::ast::PrimitiveKind::TextFile))
        );
    }

    #[test]
    fn test_static_call_errors() {
        let bad_ns = Expr::static_call(ident("Network"), ident("open"), vec![], Span::default());
        let bad_method =
            Expr::static_call(ident("Time"), ident("tomorrow"), vec![], Span::default());
        let short_join = Expr::static_call(
            ident("Path"),
            ident("join"),
            vec![str_lit("a")],
            Span::default(),
        );
        let mut module = Module::new(vec![
            Stmt::expr(bad_ns),
            Stmt::expr(bad_method),
            Stmt::expr(short_join),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(
            messages(&analyzer),
            vec![
                "Unknown static namespace 'Network'",
                "Unknown Time static method 'tomorrow'",
                "function 'Path.join' expects at least 2 argument(s), got 1"
            ]
        );
    }

    #[test]
    fn test_heterogeneous_array_literal_fails_fast() {
        let literal = Expr::array_literal(
            vec![int_lit(1), str_lit("two"), double_lit(3.0)],
            Span::default(),
        );
        let mut module = Module::new(vec![Stmt::expr(literal)]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        // only the first mismatch reports
        assert_eq!(
            messages(&analyzer),
            vec!["Array literal has mixed element types: 'int' and 'str'"]
        );
    }

    #[test]
    fn test_empty_literal_adopts_declared_array_type() {
        let empty = Expr::array_literal(vec![], Span::default());
        let mut module = Module::new(vec![Stmt::var_decl(
            ident("xs"),
            Some(Type::array_of(Type::int())),
            Some(empty),
        )]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        match &module.statements[0].kind {
            StmtKind::VarDecl(decl) => assert_eq!(
                decl.initializer.as_ref().and_then(|e| e.ty.clone()),
                Some(Type::array_of(Type::int()))
            ),
            other => panic!("expected var decl, got {other:?}"),
        }
    }

    #[test]
    fn test_session_resets_between_runs() {
        let mut bad = Module::new(vec![Stmt::expr(var("nope"))]);
        let mut good =
            Module::new(vec![Stmt::var_decl(ident("x"), Some(Type::int()), Some(int_lit(1)))]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut bad).is_err());
        assert!(analyzer.check_module(&mut good).is_ok());
        assert!(!analyzer.diagnostics().had_error());
    }

    #[test]
    fn test_foreach_binds_element_type() {
        let body = Stmt::expr(Expr::binary(var("item"), BinaryOp::Add, int_lit(1)));
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("xs"), Some(Type::array_of(Type::int())), None),
            Stmt::new(
                StmtKind::ForEach {
                    variable: ident("item"),
                    iterable: var("xs"),
                    body: Box::new(Stmt::block(
                        vec![body],
                        RegionModifier::Default,
                        Span::default(),
                    )),
                },
                Span::default(),
            ),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
    }

    #[test]
    fn test_len_builtin() {
        let ok = Expr::call(var("len"), vec![str_lit("abc")], Span::default());
        let bad = Expr::call(var("len"), vec![int_lit(1)], Span::default());
        let mut module = Module::new(vec![Stmt::expr(ok), Stmt::expr(bad)]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(messages(&analyzer), vec!["len() expects an array or str, got 'int'"]);
        match &module.statements[0].kind {
            StmtKind::Expr(expr) => assert_eq!(expr.ty, Some(Type::int())),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_return_type_mismatch() {
        let mut func = add_function();
        if let StmtKind::Function(decl) = &mut func.kind {
            decl.body = vec![Stmt::ret(Some(str_lit("nope")), Span::default())];
        }
        let mut module = Module::new(vec![func]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(
            messages(&analyzer),
            vec!["Return type 'str' does not match function return type 'int'"]
        );
    }

    #[test]
    fn test_member_suggestion_from_category_list() {
        let member = Expr::member(var("xs"), ident("pussh"));
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("xs"), Some(Type::array_of(Type::int())), None),
            Stmt::expr(member),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(
            messages(&analyzer),
            vec!["Type 'array' has no member 'pussh': did you mean 'push'?"]
        );
    }

    fn sized_alloc(element_type: Type, size: Expr, default: Option<Expr>) -> Expr {
        Expr::new(
            ExprKind::SizedArrayAlloc {
                element_type,
                size: Box::new(size),
                default: default.map(Box::new),
            },
            Span::default(),
        )
    }

    #[test]
    fn test_sized_allocation_default_promotes_to_element() {
        let alloc = sized_alloc(Type::double(), int_lit(8), Some(int_lit(0)));
        let mut module = Module::new(vec![Stmt::var_decl(ident("xs"), None, Some(alloc))]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        assert_eq!(
            analyzer.symbols().lookup("xs").map(|s| s.ty.clone()),
            Some(Type::array_of(Type::double()))
        );
    }

    #[test]
    fn test_sized_allocation_errors() {
        let bad_size = sized_alloc(Type::int(), str_lit("eight"), None);
        let bad_default = sized_alloc(Type::int(), int_lit(8), Some(str_lit("zero")));
        let mut module = Module::new(vec![Stmt::expr(bad_size), Stmt::expr(bad_default)]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(
            messages(&analyzer),
            vec![
                "Array size must be 'int' or 'long', got 'str'",
                "Array default value of type 'str' does not match element type 'int'"
            ]
        );
    }

    #[test]
    fn test_index_assignment_requires_int_index() {
        let assign = Expr::new(
            ExprKind::IndexAssign {
                target: Box::new(var("xs")),
                index: Box::new(double_lit(1.0)),
                value: Box::new(int_lit(9)),
            },
            Span::default(),
        );
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("xs"), Some(Type::array_of(Type::int())), None),
            Stmt::expr(assign),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(messages(&analyzer), vec!["Array index must be 'int', got 'double'"]);
    }

    #[test]
    fn test_array_access_accepts_any_numeric_index() {
        // reads are looser than writes: any numeric index works here
        let access = Expr::array_access(var("xs"), double_lit(0.0));
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("xs"), Some(Type::array_of(Type::int())), None),
            Stmt::expr(access),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        match &module.statements[1].kind {
            StmtKind::Expr(expr) => assert_eq!(expr.ty, Some(Type::int())),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_byte_array_literal_adoption() {
        let literal = Expr::array_literal(vec![int_lit(1), int_lit(2)], Span::default());
        let mut module = Module::new(vec![Stmt::var_decl(
            ident("bs"),
            Some(Type::array_of(Type::byte())),
            Some(literal),
        )]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        match &module.statements[0].kind {
            StmtKind::VarDecl(decl) => assert_eq!(
                decl.initializer.as_ref().and_then(|e| e.ty.clone()),
                Some(Type::array_of(Type::byte()))
            ),
            other => panic!("expected var decl, got {other:?}"),
        }
    }

    #[test]
    fn test_slice_and_range_bounds_must_be_numeric() {
        let slice = Expr::new(
            ExprKind::Slice {
                array: Box::new(var("xs")),
                start: Some(Box::new(str_lit("a"))),
                end: None,
            },
            Span::default(),
        );
        let range = Expr::new(
            ExprKind::Range { start: Box::new(int_lit(0)), end: Box::new(str_lit("b")) },
            Span::default(),
        );
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("xs"), Some(Type::array_of(Type::int())), None),
            Stmt::expr(slice),
            Stmt::expr(range),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(
            messages(&analyzer),
            vec![
                "Slice bound must be numeric, got 'str'",
                "Range bound must be numeric, got 'str'"
            ]
        );
    }

    #[test]
    fn test_slice_preserves_array_type() {
        let slice = Expr::new(
            ExprKind::Slice {
                array: Box::new(var("xs")),
                start: Some(Box::new(int_lit(1))),
                end: Some(Box::new(int_lit(3))),
            },
            Span::default(),
        );
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("xs"), Some(Type::array_of(Type::str_())), None),
            Stmt::expr(slice),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        match &module.statements[1].kind {
            StmtKind::Expr(expr) => {
                assert_eq!(expr.ty, Some(Type::array_of(Type::str_())));
            }
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_array_literal_unwraps_ranges_and_spreads() {
        let range = Expr::new(
            ExprKind::Range { start: Box::new(int_lit(1)), end: Box::new(int_lit(3)) },
            Span::default(),
        );
        let spread = Expr::new(ExprKind::Spread(Box::new(var("xs"))), Span::default());
        let literal = Expr::array_literal(vec![range, spread, int_lit(7)], Span::default());
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("xs"), Some(Type::array_of(Type::int())), None),
            Stmt::var_decl(ident("ys"), None, Some(literal)),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_ok());
        assert_eq!(
            analyzer.symbols().lookup("ys").map(|s| s.ty.clone()),
            Some(Type::array_of(Type::int()))
        );
    }

    #[test]
    fn test_interpolation_requires_printable_parts() {
        let bad = Expr::new(
            ExprKind::Interpolated(vec![str_lit("f = "), var("f")]),
            Span::default(),
        );
        let ok = Expr::new(
            ExprKind::Interpolated(vec![str_lit("n = "), int_lit(3)]),
            Span::default(),
        );
        let declared = Type::function(Some(Type::int()), vec![Some(Type::int())]);
        let mut module = Module::new(vec![
            Stmt::var_decl(ident("f"), Some(declared), None),
            Stmt::expr(bad),
            Stmt::expr(ok),
        ]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(messages(&analyzer), vec!["Cannot interpolate value of type 'function'"]);
        match &module.statements[2].kind {
            StmtKind::Expr(expr) => assert_eq!(expr.ty, Some(Type::str_())),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_initializer_still_checks_declaration() {
        // an initializer whose own check fails outright
        let bad_init = Expr::binary(int_lit(1), BinaryOp::Sub, str_lit("x"));
        let mut decl = Stmt::var_decl(ident("handle"), Some(Type::str_()), Some(bad_init));
        if let StmtKind::VarDecl(inner) = &mut decl.kind {
            inner.mode = crate::ast::ParamMode::ByRef;
        }
        let mut module = Module::new(vec![decl]);
        let mut analyzer = Analyzer::new();
        assert!(analyzer.check_module(&mut module).is_err());
        assert_eq!(
            messages(&analyzer),
            vec![
                "Invalid operands to '-': 'int' and 'str'",
                "'as ref' can only be used with primitive types"
            ]
        );
        // the symbol is registered with the declared type regardless
        assert_eq!(
            analyzer.symbols().lookup("handle").map(|s| s.ty.clone()),
            Some(Type::str_())
        );
    }

    #[test]
    fn test_undefined_read_reports_once_and_caches_nil() {
        let mut expr = var("ghost");
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.check_expr(&mut expr), Some(Type::nil()));
        // the nil fallback is cached, so a revisit neither recomputes
        // nor re-reports
        assert_eq!(analyzer.check_expr(&mut expr), Some(Type::nil()));
        assert_eq!(analyzer.diagnostics().count(), 1);
    }
}
