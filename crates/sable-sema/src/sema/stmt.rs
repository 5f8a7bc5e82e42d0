//! Statement checking: declarations, control flow, and the scope and
//! region discipline around them.

use crate::ast::{
    types_equal, Expr, ExprKind, FunctionDecl, FunctionType, ParamMode, RegionModifier, Stmt,
    StmtKind, Type, VarDecl,
};
use crate::common::Span;
use crate::sema::expr::infer_lambda_types;
use crate::sema::scope::SymbolKind;
use crate::sema::Analyzer;

impl Analyzer {
    /// Check one statement. `return_type` is the enclosing function's
    /// declared return type, absent at module level.
    pub fn check_stmt(&mut self, stmt: &mut Stmt, return_type: Option<&Type>) {
        let span = stmt.span;
        match &mut stmt.kind {
            StmtKind::Expr(expr) => {
                self.check_expr(expr);
            }
            StmtKind::VarDecl(decl) => self.check_var_decl(decl, span),
            StmtKind::Function(func) => self.check_function(func, span),
            StmtKind::Return(value) => self.check_return(value.as_mut(), return_type, span),
            StmtKind::Block { statements, modifier } => {
                let private = *modifier == RegionModifier::Private;
                if private {
                    self.table.enter_region();
                }
                self.table.push_scope();
                for stmt in statements {
                    self.check_stmt(stmt, return_type);
                }
                self.table.pop_scope();
                if private {
                    self.table.exit_region();
                }
            }
            StmtKind::If { condition, then_branch, else_branch } => {
                self.check_condition(condition, "If");
                self.check_stmt(then_branch, return_type);
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch, return_type);
                }
            }
            StmtKind::While { condition, body } => {
                self.check_condition(condition, "While");
                self.check_stmt(body, return_type);
            }
            StmtKind::For { init, condition, increment, body } => {
                self.table.push_scope();
                if let Some(init) = init {
                    self.check_stmt(init, return_type);
                }
                if let Some(condition) = condition {
                    self.check_condition(condition, "For");
                }
                if let Some(increment) = increment {
                    self.check_expr(increment);
                }
                self.check_stmt(body, return_type);
                self.table.pop_scope();
            }
            StmtKind::ForEach { variable, iterable, body } => {
                let element = match self.check_expr(iterable) {
                    Some(Type::Array(element)) => {
                        element.as_deref().cloned().unwrap_or(Type::nil())
                    }
                    Some(other) => {
                        self.diags.error(
                            iterable.span,
                            format!("Cannot iterate over non-array type '{}'", other.name()),
                        );
                        Type::nil()
                    }
                    None => Type::nil(),
                };
                self.table.push_scope();
                // the loop variable aliases an element, never owns one
                self.table.define(&variable.text, element, SymbolKind::Param);
                self.check_stmt(body, return_type);
                self.table.pop_scope();
            }
            // loop-context validation is left to a later pass
            StmtKind::Break | StmtKind::Continue => {}
            StmtKind::Import(module) => {
                log::debug!("import '{}' deferred to module resolution", module.text);
            }
        }
    }

    fn check_condition(&mut self, condition: &mut Expr, construct: &str) {
        if let Some(ty) = self.check_expr(condition) {
            if ty != Type::bool_() {
                self.diags.error(
                    condition.span,
                    format!("{construct} condition must be 'bool', got '{}'", ty.name()),
                );
            }
        }
    }

    fn check_var_decl(&mut self, decl: &mut VarDecl, span: Span) {
        if let (Some(Type::Function(target)), Some(init)) = (&decl.ty, decl.initializer.as_mut())
        {
            if let ExprKind::Lambda(lambda) = &mut init.kind {
                infer_lambda_types(lambda, target);
            }
        }

        let mut init_ty = None;
        if let Some(init) = decl.initializer.as_mut() {
            init_ty = self.check_expr(init);
            if init_ty.is_none() {
                // the initializer already reported its own error; the
                // declaration itself is still checked and registered so
                // later uses resolve
                let fallback = decl.ty.clone().unwrap_or(Type::nil());
                decl.ty = Some(fallback.clone());
                if decl.mode == ParamMode::ByRef && !fallback.is_primitive() {
                    self.diags.error(
                        decl.name.span,
                        "'as ref' can only be used with primitive types",
                    );
                }
                self.table.define(&decl.name.text, fallback, SymbolKind::Local);
                return;
            }
        }

        if let (Some(declared), Some(init)) = (&decl.ty, decl.initializer.as_mut()) {
            // an empty literal resolved to the array-of-nil placeholder
            // adopts the declared array type
            if declared.is_array() && init_ty == Some(Type::array_of(Type::nil())) {
                init.ty = Some(declared.clone());
                init_ty = Some(declared.clone());
            }
            // a literal of small ints initializing a byte[] adopts it too
            if *declared == Type::array_of(Type::byte())
                && init_ty == Some(Type::array_of(Type::int()))
                && matches!(init.kind, ExprKind::ArrayLiteral(_))
            {
                init.ty = Some(declared.clone());
                init_ty = Some(declared.clone());
            }
        }

        match (&decl.ty, &init_ty) {
            (None, Some(inferred)) => decl.ty = Some(inferred.clone()),
            (None, None) => {
                self.diags.error(
                    decl.name.span,
                    format!("Cannot infer type of '{}' without initializer", decl.name.text),
                );
                decl.ty = Some(Type::nil());
            }
            _ => {}
        }

        let declared = decl.ty.clone().unwrap_or(Type::nil());
        if decl.mode == ParamMode::ByRef && !declared.is_primitive() {
            self.diags.error(
                decl.name.span,
                "'as ref' can only be used with primitive types",
            );
        }
        self.table.define(&decl.name.text, declared.clone(), SymbolKind::Local);

        if let Some(init_ty) = &init_ty {
            if *init_ty != declared {
                self.diags.error(
                    span,
                    format!(
                        "Initializer type '{}' does not match declared type '{}' for '{}'",
                        init_ty.name(),
                        declared.name(),
                        decl.name.text
                    ),
                );
            }
        }
    }

    fn check_function(&mut self, func: &mut FunctionDecl, span: Span) {
        let mut params: Vec<Option<Type>> = Vec::with_capacity(func.params.len());
        for param in &func.params {
            match &param.ty {
                Some(ty) => {
                    self.check_param_mode(param.mode, ty, param.name.span);
                    params.push(Some(ty.clone()));
                }
                None => {
                    self.diags.error(
                        param.name.span,
                        format!("Parameter '{}' is missing a type", param.name.text),
                    );
                    params.push(Some(Type::nil()));
                }
            }
        }
        if func.modifier == RegionModifier::Private {
            if let Some(ret) = &func.return_type {
                if !ret.is_primitive() {
                    self.diags.error(span, "Private function can only return primitive types");
                }
            }
        }

        let modes: Vec<ParamMode> = func.params.iter().map(|p| p.mode).collect();
        let fn_ty = Type::Function(FunctionType {
            return_type: func.return_type.clone().map(Box::new),
            params,
            param_modes: modes.iter().any(|m| *m != ParamMode::Default).then_some(modes),
        });
        // bound in the enclosing scope so recursive and sibling calls resolve
        self.table.define(&func.name.text, fn_ty, SymbolKind::Local);
        log::debug!("checking function '{}'", func.name.text);

        let private = func.modifier == RegionModifier::Private;
        if private {
            self.table.enter_region();
        }
        self.table.push_scope();
        for param in &func.params {
            let ty = param.ty.clone().unwrap_or(Type::nil());
            self.table.define(&param.name.text, ty, SymbolKind::Param);
        }
        let return_type = func.return_type.clone();
        for stmt in &mut func.body {
            self.check_stmt(stmt, return_type.as_ref());
        }
        self.table.pop_scope();
        if private {
            self.table.exit_region();
        }
    }

    fn check_return(
        &mut self,
        value: Option<&mut Expr>,
        return_type: Option<&Type>,
        span: Span,
    ) {
        let value_ty = match value {
            Some(expr) => match self.check_expr(expr) {
                Some(ty) => ty,
                None => return,
            },
            None => Type::void(),
        };
        if !types_equal(Some(&value_ty), return_type) {
            self.diags.error(
                span,
                format!(
                    "Return type '{}' does not match function return type '{}'",
                    value_ty.name(),
                    Type::name_of(return_type)
                ),
            );
        }
    }
}
