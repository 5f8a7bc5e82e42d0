//! Expression type checking.
//!
//! `check_expr` dispatches by kind and caches the resolved type on the
//! node. Only successes are cached; a failed subtree stays uncached and
//! is re-analyzed (and may re-report) if visited again. Absence
//! (`None`) is the uniform failure signal; diagnostics accumulate in
//! the session instead of unwinding.

use crate::ast::{
    promote, types_equal, BinaryOp, Expr, ExprKind, FunctionType, Ident, LambdaBody, LambdaExpr,
    LiteralValue, ParamMode, PrimitiveKind, RegionModifier, Type, UnaryOp,
};
use crate::common::Span;
use crate::sema::diagnostics::find_similar;
use crate::sema::scope::SymbolKind;
use crate::sema::statics::StaticMethod;
use crate::sema::{members, statics, Analyzer};

/// Copy missing parameter/return types into a lambda literal from the
/// function type context expects it to have. Arity must match; already
/// written types are never overwritten.
pub(crate) fn infer_lambda_types(lambda: &mut LambdaExpr, target: &FunctionType) {
    if lambda.params.len() != target.params.len() {
        return;
    }
    for (param, ty) in lambda.params.iter_mut().zip(&target.params) {
        if param.ty.is_none() {
            param.ty = ty.clone();
        }
    }
    if lambda.return_type.is_none() {
        lambda.return_type = target.return_type.as_deref().cloned();
    }
}

fn literal_type(value: &LiteralValue) -> Type {
    match value {
        LiteralValue::Int(_) => Type::int(),
        LiteralValue::Long(_) => Type::long(),
        LiteralValue::Double(_) => Type::double(),
        LiteralValue::Char(_) => Type::char_(),
        LiteralValue::Str(_) => Type::str_(),
        LiteralValue::Bool(_) => Type::bool_(),
        LiteralValue::Byte(_) => Type::byte(),
        LiteralValue::Nil => Type::nil(),
    }
}

impl Analyzer {
    /// Resolve an expression's type, reporting any errors found
    pub fn check_expr(&mut self, expr: &mut Expr) -> Option<Type> {
        if let Some(ty) = &expr.ty {
            return Some(ty.clone());
        }
        let span = expr.span;
        let ty = match &mut expr.kind {
            ExprKind::Literal(value) => Some(literal_type(value)),
            ExprKind::Variable(name) => self.check_variable(name),
            ExprKind::Binary { op, left, right } => self.check_binary(*op, left, right, span),
            ExprKind::Unary { op, operand } => self.check_unary(*op, operand, span),
            ExprKind::Assign { name, value } => self.check_assign(name, value, span),
            ExprKind::IndexAssign { target, index, value } => {
                self.check_index_assign(target, index, value)
            }
            ExprKind::Call { callee, args } => self.check_call(callee, args, span),
            ExprKind::StaticCall { namespace, method, args } => {
                self.check_static_call(namespace, method, args, span)
            }
            ExprKind::Member { object, member } => self.check_member(object, member),
            ExprKind::ArrayLiteral(elements) => self.check_array_literal(elements),
            ExprKind::ArrayAccess { array, index } => self.check_array_access(array, index),
            ExprKind::Slice { array, start, end } => self.check_slice(array, start, end),
            ExprKind::Range { start, end } => self.check_range(start, end),
            ExprKind::Spread(operand) => self.check_spread(operand, span),
            ExprKind::Increment(operand) | ExprKind::Decrement(operand) => {
                self.check_step(operand, span)
            }
            ExprKind::Interpolated(parts) => self.check_interpolated(parts),
            ExprKind::Lambda(lambda) => self.check_lambda(lambda, span),
            ExprKind::SizedArrayAlloc { element_type, size, default } => {
                self.check_sized_alloc(element_type, size, default.as_deref_mut())
            }
        };
        if let Some(ty) = &ty {
            expr.ty = Some(ty.clone());
        }
        ty
    }

    fn check_variable(&mut self, name: &Ident) -> Option<Type> {
        if let Some(sym) = self.table.lookup(&name.text) {
            return Some(sym.ty.clone());
        }
        let suggestion =
            find_similar(self.table.visible_names(), &name.text).map(str::to_string);
        self.diags.error_with_suggestion(
            name.span,
            format!("Undefined variable '{}'", name.text),
            suggestion,
        );
        // Fall back to nil so downstream checks keep producing diagnostics
        Some(Type::nil())
    }

    fn check_binary(
        &mut self,
        op: BinaryOp,
        left: &mut Expr,
        right: &mut Expr,
        span: Span,
    ) -> Option<Type> {
        let left_ty = self.check_expr(left);
        let right_ty = self.check_expr(right);
        let (left_ty, right_ty) = (left_ty?, right_ty?);

        if op.is_logical() {
            if left_ty == Type::bool_() && right_ty == Type::bool_() {
                return Some(Type::bool_());
            }
            self.diags.error(
                span,
                format!(
                    "Operator '{}' requires boolean operands, got '{}' and '{}'",
                    op.symbol(),
                    left_ty.name(),
                    right_ty.name()
                ),
            );
            return None;
        }
        if op.is_comparison() {
            if left_ty == right_ty || (left_ty.is_numeric() && right_ty.is_numeric()) {
                return Some(Type::bool_());
            }
            self.diags.error(
                span,
                format!("Cannot compare '{}' with '{}'", left_ty.name(), right_ty.name()),
            );
            return None;
        }
        if left_ty.is_numeric() && right_ty.is_numeric() {
            return promote(&left_ty, &right_ty);
        }
        if op == BinaryOp::Add {
            let str_ty = Type::str_();
            if (left_ty == str_ty && right_ty.is_printable())
                || (right_ty == str_ty && left_ty.is_printable())
            {
                return Some(str_ty);
            }
        }
        self.diags.error(
            span,
            format!(
                "Invalid operands to '{}': '{}' and '{}'",
                op.symbol(),
                left_ty.name(),
                right_ty.name()
            ),
        );
        None
    }

    fn check_unary(&mut self, op: UnaryOp, operand: &mut Expr, span: Span) -> Option<Type> {
        let ty = self.check_expr(operand)?;
        match op {
            UnaryOp::Neg => {
                if ty.is_numeric() {
                    return Some(ty);
                }
                self.diags.error(
                    span,
                    format!("Unary '-' requires a numeric operand, got '{}'", ty.name()),
                );
            }
            UnaryOp::Not => {
                if ty == Type::bool_() {
                    return Some(ty);
                }
                self.diags.error(
                    span,
                    format!("Unary 'not' requires a boolean operand, got '{}'", ty.name()),
                );
            }
        }
        None
    }

    fn check_assign(&mut self, name: &Ident, value: &mut Expr, span: Span) -> Option<Type> {
        let Some(sym) = self.table.lookup(&name.text) else {
            let suggestion =
                find_similar(self.table.visible_names(), &name.text).map(str::to_string);
            self.diags.error_with_suggestion(
                name.span,
                format!("Cannot assign to undefined variable '{}'", name.text),
                suggestion,
            );
            return None;
        };
        let target_ty = sym.ty.clone();
        let target_depth = sym.region_depth;

        if let (ExprKind::Lambda(lambda), Type::Function(target)) =
            (&mut value.kind, &target_ty)
        {
            infer_lambda_types(lambda, target);
        }
        let value_ty = self.check_expr(value)?;
        if value_ty != target_ty {
            self.diags.error(
                span,
                format!(
                    "Cannot assign value of type '{}' to '{}' of type '{}'",
                    value_ty.name(),
                    name.text,
                    target_ty.name()
                ),
            );
            return None;
        }
        // Escape rule: region-owned values may not outlive their region
        if self.table.region_depth() > target_depth && !value_ty.is_primitive() {
            self.diags.error(
                span,
                "Cannot assign non-primitive type to variable declared outside private block",
            );
            return None;
        }
        Some(target_ty)
    }

    fn check_index_assign(
        &mut self,
        target: &mut Expr,
        index: &mut Expr,
        value: &mut Expr,
    ) -> Option<Type> {
        let target_ty = self.check_expr(target);
        let index_ty = self.check_expr(index);
        let value_ty = self.check_expr(value);

        let target_ty = target_ty?;
        let Type::Array(element) = &target_ty else {
            self.diags.error(
                target.span,
                format!("Cannot index into non-array type '{}'", target_ty.name()),
            );
            return None;
        };
        let element = element.as_deref().cloned()?;
        let index_ty = index_ty?;
        if index_ty != Type::int() {
            self.diags.error(
                index.span,
                format!("Array index must be 'int', got '{}'", index_ty.name()),
            );
            return None;
        }
        let value_ty = value_ty?;
        if value_ty != element {
            self.diags.error(
                value.span,
                format!(
                    "Cannot assign value of type '{}' to element of type '{}'",
                    value_ty.name(),
                    element.name()
                ),
            );
            return None;
        }
        Some(element)
    }

    fn check_call(&mut self, callee: &mut Expr, args: &mut [Expr], span: Span) -> Option<Type> {
        if let ExprKind::Variable(name) = &callee.kind {
            if name.text == "len" {
                return self.check_len(args, span);
            }
        }
        let name = callee.callee_name().to_string();
        let callee_ty = self.check_expr(callee)?;
        let func = match callee_ty {
            Type::Function(func) => func,
            other => {
                self.diags.error(
                    span,
                    format!("'{}' is of type '{}', cannot call non-function", name, other.name()),
                );
                return None;
            }
        };
        if args.len() != func.params.len() {
            self.diags.error(
                span,
                format!(
                    "function '{}' expects {} argument(s), got {}",
                    name,
                    func.params.len(),
                    args.len()
                ),
            );
            return None;
        }
        let mut ok = true;
        for (i, (arg, param)) in args.iter_mut().zip(&func.params).enumerate() {
            if let (ExprKind::Lambda(lambda), Some(Type::Function(target))) =
                (&mut arg.kind, param.as_ref())
            {
                infer_lambda_types(lambda, target);
            }
            let Some(arg_ty) = self.check_expr(arg) else {
                ok = false;
                continue;
            };
            if matches!(param, Some(Type::Primitive(PrimitiveKind::Any))) {
                if !arg_ty.is_printable() {
                    self.diags.error(
                        arg.span,
                        format!(
                            "argument {} of '{}': expected 'any', got '{}'",
                            i + 1,
                            name,
                            arg_ty.name()
                        ),
                    );
                    ok = false;
                }
            } else if !types_equal(Some(&arg_ty), param.as_ref()) {
                self.diags.error(
                    arg.span,
                    format!(
                        "argument {} of '{}': expected '{}', got '{}'",
                        i + 1,
                        name,
                        Type::name_of(param.as_ref()),
                        arg_ty.name()
                    ),
                );
                ok = false;
            }
        }
        if !ok {
            return None;
        }
        func.return_type.map(|ret| *ret)
    }

    /// `len(x)` is a built-in, not a symbol: array or str to int
    fn check_len(&mut self, args: &mut [Expr], span: Span) -> Option<Type> {
        if args.len() != 1 {
            self.diags.error(
                span,
                format!("function 'len' expects 1 argument(s), got {}", args.len()),
            );
            return None;
        }
        let ty = self.check_expr(&mut args[0])?;
        if ty.is_array() || ty == Type::str_() {
            return Some(Type::int());
        }
        self.diags.error(
            args[0].span,
            format!("len() expects an array or str, got '{}'", ty.name()),
        );
        None
    }

    fn check_static_call(
        &mut self,
        namespace: &Ident,
        method: &Ident,
        args: &mut [Expr],
        span: Span,
    ) -> Option<Type> {
        let mut arg_types = Vec::with_capacity(args.len());
        let mut ok = true;
        for arg in args.iter_mut() {
            let ty = self.check_expr(arg);
            ok &= ty.is_some();
            arg_types.push(ty);
        }
        if !statics::namespace_exists(&namespace.text) {
            self.diags.error(
                namespace.span,
                format!("Unknown static namespace '{}'", namespace.text),
            );
            return None;
        }
        let Some(sig) = statics::resolve(&namespace.text, &method.text) else {
            self.diags.error(
                method.span,
                format!("Unknown {} static method '{}'", namespace.text, method.text),
            );
            return None;
        };
        log::trace!("static call {}.{} resolved", namespace.text, method.text);
        let name = format!("{}.{}", namespace.text, method.text);
        match sig {
            StaticMethod::Fixed { params, ret } => {
                if args.len() != params.len() {
                    self.diags.error(
                        span,
                        format!(
                            "function '{}' expects {} argument(s), got {}",
                            name,
                            params.len(),
                            args.len()
                        ),
                    );
                    return None;
                }
                for (i, (arg_ty, param)) in arg_types.iter().zip(&params).enumerate() {
                    if let Some(arg_ty) = arg_ty {
                        if arg_ty != param {
                            self.diags.error(
                                args[i].span,
                                format!(
                                    "argument {} of '{}': expected '{}', got '{}'",
                                    i + 1,
                                    name,
                                    param.name(),
                                    arg_ty.name()
                                ),
                            );
                            ok = false;
                        }
                    }
                }
                if ok {
                    Some(ret)
                } else {
                    None
                }
            }
            StaticMethod::VariadicStr { min, ret } => {
                if args.len() < min {
                    self.diags.error(
                        span,
                        format!(
                            "function '{}' expects at least {} argument(s), got {}",
                            name,
                            min,
                            args.len()
                        ),
                    );
                    return None;
                }
                for (i, arg_ty) in arg_types.iter().enumerate() {
                    if let Some(arg_ty) = arg_ty {
                        if *arg_ty != Type::str_() {
                            self.diags.error(
                                args[i].span,
                                format!(
                                    "argument {} of '{}': expected 'str', got '{}'",
                                    i + 1,
                                    name,
                                    arg_ty.name()
                                ),
                            );
                            ok = false;
                        }
                    }
                }
                if ok {
                    Some(ret)
                } else {
                    None
                }
            }
        }
    }

    fn check_member(&mut self, object: &mut Expr, member: &Ident) -> Option<Type> {
        // A failed receiver already reported; do not pile on
        let object_ty = self.check_expr(object)?;
        if let Some(ty) = members::resolve(&object_ty, &member.text) {
            log::trace!("member {}.{} resolved to {}", object_ty.name(), member.text, ty);
            return Some(ty);
        }
        let suggestion = members::category_of(&object_ty)
            .and_then(|cat| find_similar(members::known_members(cat).iter().copied(), &member.text))
            .map(str::to_string);
        self.diags.error_with_suggestion(
            member.span,
            format!("Type '{}' has no member '{}'", object_ty.name(), member.text),
            suggestion,
        );
        None
    }

    fn check_array_literal(&mut self, elements: &mut [Expr]) -> Option<Type> {
        if elements.is_empty() {
            // placeholder reconciled against a declared type at the use site
            return Some(Type::array_of(Type::nil()));
        }
        let mut element_ty: Option<Type> = None;
        for element in elements.iter_mut() {
            let span = element.span;
            let effective = self.effective_element_type(element)?;
            match &element_ty {
                None => element_ty = Some(effective),
                Some(expected) => {
                    if *expected != effective {
                        self.diags.error(
                            span,
                            format!(
                                "Array literal has mixed element types: '{}' and '{}'",
                                expected.name(),
                                effective.name()
                            ),
                        );
                        return None;
                    }
                }
            }
        }
        Some(Type::array(element_ty))
    }

    /// What an array-literal element contributes to the element type:
    /// ranges and spreads contribute their unwrapped element type.
    fn effective_element_type(&mut self, element: &mut Expr) -> Option<Type> {
        let ty = self.check_expr(element)?;
        match &element.kind {
            ExprKind::Range { .. } => ty.element().cloned(),
            _ => Some(ty),
        }
    }

    fn check_array_access(&mut self, array: &mut Expr, index: &mut Expr) -> Option<Type> {
        let array_ty = self.check_expr(array);
        let index_ty = self.check_expr(index);
        let array_ty = array_ty?;
        let Type::Array(element) = &array_ty else {
            self.diags.error(
                array.span,
                format!("Cannot index into non-array type '{}'", array_ty.name()),
            );
            return None;
        };
        let element = element.as_deref().cloned()?;
        let index_ty = index_ty?;
        if !index_ty.is_numeric() {
            self.diags.error(
                index.span,
                format!("Array index must be numeric, got '{}'", index_ty.name()),
            );
            return None;
        }
        Some(element)
    }

    fn check_slice(
        &mut self,
        array: &mut Expr,
        start: &mut Option<Box<Expr>>,
        end: &mut Option<Box<Expr>>,
    ) -> Option<Type> {
        let array_ty = self.check_expr(array)?;
        if !array_ty.is_array() {
            self.diags.error(
                array.span,
                format!("Cannot slice non-array type '{}'", array_ty.name()),
            );
            return None;
        }
        let mut ok = true;
        for bound in [start.as_deref_mut(), end.as_deref_mut()].into_iter().flatten() {
            let Some(bound_ty) = self.check_expr(bound) else {
                ok = false;
                continue;
            };
            if !bound_ty.is_numeric() {
                self.diags.error(
                    bound.span,
                    format!("Slice bound must be numeric, got '{}'", bound_ty.name()),
                );
                ok = false;
            }
        }
        if ok {
            Some(array_ty)
        } else {
            None
        }
    }

    fn check_range(&mut self, start: &mut Expr, end: &mut Expr) -> Option<Type> {
        let start_ty = self.check_expr(start);
        let end_ty = self.check_expr(end);
        let mut ok = true;
        for (bound_ty, span) in [(start_ty, start.span), (end_ty, end.span)] {
            let Some(bound_ty) = bound_ty else {
                ok = false;
                continue;
            };
            if !bound_ty.is_numeric() {
                self.diags.error(
                    span,
                    format!("Range bound must be numeric, got '{}'", bound_ty.name()),
                );
                ok = false;
            }
        }
        if ok {
            Some(Type::array_of(Type::int()))
        } else {
            None
        }
    }

    fn check_spread(&mut self, operand: &mut Expr, span: Span) -> Option<Type> {
        let ty = self.check_expr(operand)?;
        let Type::Array(element) = &ty else {
            self.diags.error(
                span,
                format!("Spread operator requires an array, got '{}'", ty.name()),
            );
            return None;
        };
        element.as_deref().cloned()
    }

    fn check_step(&mut self, operand: &mut Expr, span: Span) -> Option<Type> {
        let ty = self.check_expr(operand)?;
        if ty.is_numeric() {
            return Some(ty);
        }
        self.diags.error(
            span,
            format!("Increment/decrement requires a numeric operand, got '{}'", ty.name()),
        );
        None
    }

    fn check_interpolated(&mut self, parts: &mut [Expr]) -> Option<Type> {
        let mut ok = true;
        for part in parts.iter_mut() {
            let Some(ty) = self.check_expr(part) else {
                ok = false;
                continue;
            };
            if !ty.is_printable() {
                self.diags.error(
                    part.span,
                    format!("Cannot interpolate value of type '{}'", ty.name()),
                );
                ok = false;
            }
        }
        if ok {
            Some(Type::str_())
        } else {
            None
        }
    }

    pub(crate) fn check_lambda(&mut self, lambda: &mut LambdaExpr, span: Span) -> Option<Type> {
        let mut ok = true;
        for param in &lambda.params {
            match &param.ty {
                None => {
                    self.diags.error(
                        param.name.span,
                        format!("Cannot infer type of lambda parameter '{}'", param.name.text),
                    );
                    ok = false;
                }
                Some(ty) => ok &= self.check_param_mode(param.mode, ty, param.name.span),
            }
        }
        if lambda.return_type.is_none() {
            self.diags.error(span, "Cannot infer lambda return type");
            ok = false;
        }
        if lambda.modifier == RegionModifier::Private {
            if let Some(ret) = &lambda.return_type {
                if !ret.is_primitive() {
                    self.diags.error(span, "Private lambda can only return primitive types");
                    ok = false;
                }
            }
        }
        if !ok {
            return None;
        }

        let private = lambda.modifier == RegionModifier::Private;
        if private {
            self.table.enter_region();
        }
        self.table.push_scope();
        for param in &lambda.params {
            if let Some(ty) = &param.ty {
                self.table.define(&param.name.text, ty.clone(), SymbolKind::Param);
            }
        }
        let return_type = lambda.return_type.clone();
        match &mut lambda.body {
            LambdaBody::Expr(body) => {
                if let Some(body_ty) = self.check_expr(body) {
                    if !types_equal(Some(&body_ty), return_type.as_ref()) {
                        self.diags.error(
                            body.span,
                            format!(
                                "Lambda body type '{}' does not match declared return type '{}'",
                                body_ty.name(),
                                Type::name_of(return_type.as_ref())
                            ),
                        );
                        ok = false;
                    }
                } else {
                    ok = false;
                }
            }
            LambdaBody::Block(statements) => {
                for stmt in statements {
                    self.check_stmt(stmt, return_type.as_ref());
                }
            }
        }
        self.table.pop_scope();
        if private {
            self.table.exit_region();
        }
        if !ok {
            return None;
        }

        let modes: Vec<ParamMode> = lambda.params.iter().map(|p| p.mode).collect();
        Some(Type::Function(FunctionType {
            return_type: return_type.map(Box::new),
            params: lambda.params.iter().map(|p| p.ty.clone()).collect(),
            param_modes: modes.iter().any(|m| *m != ParamMode::Default).then_some(modes),
        }))
    }

    /// `as ref` needs a heap cell, so it is primitive-only; `as val`
    /// forces a copy, which primitives already get.
    pub(crate) fn check_param_mode(&mut self, mode: ParamMode, ty: &Type, span: Span) -> bool {
        match mode {
            ParamMode::ByRef if !ty.is_primitive() => {
                self.diags.error(span, "'as ref' can only be used with primitive types");
                false
            }
            ParamMode::ByValue if ty.is_primitive() => {
                self.diags.error(span, "'as val' cannot be used with primitive types");
                false
            }
            _ => true,
        }
    }

    fn check_sized_alloc(
        &mut self,
        element_type: &Type,
        size: &mut Expr,
        default: Option<&mut Expr>,
    ) -> Option<Type> {
        let size_ty = self.check_expr(size)?;
        if size_ty != Type::int() && size_ty != Type::long() {
            self.diags.error(
                size.span,
                format!("Array size must be 'int' or 'long', got '{}'", size_ty.name()),
            );
            return None;
        }
        if let Some(default) = default {
            let default_ty = self.check_expr(default)?;
            if promote(&default_ty, element_type) != Some(element_type.clone()) {
                self.diags.error(
                    default.span,
                    format!(
                        "Array default value of type '{}' does not match element type '{}'",
                        default_ty.name(),
                        element_type.name()
                    ),
                );
                return None;
            }
        }
        Some(Type::array_of(element_type.clone()))
    }
}
