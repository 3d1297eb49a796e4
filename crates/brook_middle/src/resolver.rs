use std::collections::HashMap;

use brook_frontend::ast::*;
use brook_session::diagnostics::{Diagnostic, IntoDiagnostic};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("undeclared identifier `{0}`")]
    Undeclared(String),

    #[error("`{0}` is already declared in this scope")]
    Duplicate(String),

    #[error("`{0}` is not a function and cannot be invoked")]
    NotInvocable(String),

    #[error("function `{0}` cannot be used as a value")]
    NotAValue(String),

    #[error("function `{ident}` expects {expected} arguments, found {found}")]
    ArityMismatch {
        ident: String,
        expected: usize,
        found: usize,
    },

    #[error("argument {index} of `{ident}` expects type {expected}, found {found}")]
    ArgumentType {
        ident: String,
        index: usize,
        expected: Type,
        found: Type,
    },

    #[error("operator `{op}` requires matching operand types, found {lhs} and {rhs}")]
    OperandMismatch { op: BinOp, lhs: Type, rhs: Type },

    #[error("operator `{op}` cannot be applied to type {ty}")]
    InvalidBinary { op: BinOp, ty: Type },

    #[error("unary `{op}` cannot be applied to type {ty}")]
    InvalidUnary { op: UnOp, ty: Type },

    #[error("function `{ident}` returns type {found}, expected {expected}")]
    ReturnType {
        ident: String,
        expected: Type,
        found: Type,
    },

    #[error("a function cannot return a declaration")]
    ReturnsDeclaration { ident: String },

    #[error("function `{ident}` has no value to return")]
    MissingFinalValue { ident: String },
}

impl IntoDiagnostic for ResolveError {
    fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error().with_message(self.to_string())
    }
}

#[derive(Clone)]
enum Symbol {
    Func { params: Vec<Type>, ret: Type },
    Var { ty: Type },
}

/// Walks the module twice: first to register every module-scope symbol,
/// then to check each function body in its own child scope. Checking
/// keeps going after a failure so one run reports every independent
/// violation.
pub struct Resolver {
    scopes: Vec<HashMap<String, Symbol>>,
    errors: Vec<ResolveError>,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
            errors: vec![],
        }
    }

    pub fn run(mut self, module: &mut Module) -> Vec<ResolveError> {
        // function signatures first, so bodies and module-level variables
        // may reference them regardless of textual order
        for item in &module.items {
            if let Item::Decl(Decl::Func(func)) | Item::Export(Decl::Func(func)) = item {
                self.declare(
                    func.ident.clone(),
                    Symbol::Func {
                        params: func.params.iter().map(|param| param.ty).collect(),
                        ret: func.ret_ty,
                    },
                );
            }
        }

        // module-level variables, in declaration order
        for item in &mut module.items {
            if let Item::Decl(Decl::Var(var)) | Item::Export(Decl::Var(var)) = item {
                self.check_var_decl(var);
            }
        }

        // function bodies and surviving top-level expressions
        for item in &mut module.items {
            match item {
                Item::Decl(Decl::Func(func)) | Item::Export(Decl::Func(func)) => {
                    self.check_func_decl(func);
                }
                Item::Expr(expr) => {
                    self.check_expr(expr);
                }
                _ => {}
            }
        }

        self.errors
    }

    fn check_func_decl(&mut self, func: &mut FuncDecl) {
        self.scopes.push(HashMap::new());

        for param in &func.params {
            self.declare(param.ident.clone(), Symbol::Var { ty: param.ty });
        }

        for stmt in &mut func.body {
            match stmt {
                Stmt::Var(var) => self.check_var_decl(var),
                Stmt::Expr(expr) => {
                    self.check_expr(expr);
                }
            }
        }

        match func.body.last() {
            None => self.errors.push(ResolveError::MissingFinalValue {
                ident: func.ident.clone(),
            }),

            Some(Stmt::Var(_)) => self.errors.push(ResolveError::ReturnsDeclaration {
                ident: func.ident.clone(),
            }),

            Some(Stmt::Expr(expr)) => {
                if let Some(found) = expr.ty {
                    if found != func.ret_ty {
                        self.errors.push(ResolveError::ReturnType {
                            ident: func.ident.clone(),
                            expected: func.ret_ty,
                            found,
                        });
                    }
                }
            }
        }

        self.scopes.pop();
    }

    fn check_var_decl(&mut self, var: &mut VarDecl) {
        let ty = self.check_expr(&mut var.expr);
        var.ty = ty;

        // an unresolved initializer was already reported; leaving the name
        // undeclared avoids cascading errors in the same frame
        if let Some(ty) = ty {
            self.declare(var.ident.clone(), Symbol::Var { ty });
        }
    }

    fn check_expr(&mut self, expr: &mut Expr) -> Option<Type> {
        let ty = match &mut expr.kind {
            ExprKind::Int(_) => Some(Type::Int),
            ExprKind::Float(_) => Some(Type::Float),
            ExprKind::Bool(_) => Some(Type::Bool),

            ExprKind::Accessor(ident) => {
                let ident = ident.clone();
                match self.lookup(&ident).cloned() {
                    Some(Symbol::Var { ty }) => Some(ty),
                    Some(Symbol::Func { .. }) => {
                        self.errors.push(ResolveError::NotAValue(ident));
                        None
                    }
                    None => {
                        self.errors.push(ResolveError::Undeclared(ident));
                        None
                    }
                }
            }

            ExprKind::Grouping(inner) => self.check_expr(inner),

            ExprKind::Unary { op, expr } => {
                let op = *op;
                let ty = self.check_expr(expr);
                self.check_unary(op, ty)
            }

            ExprKind::Binary { op, lhs, rhs } => {
                let op = *op;
                // check both operands before bailing, for complete reporting
                let lhs_ty = self.check_expr(lhs);
                let rhs_ty = self.check_expr(rhs);
                self.check_binary(op, lhs_ty, rhs_ty)
            }

            ExprKind::Invocation { invoked, args } => self.check_invocation(invoked, args),
        };

        expr.ty = ty;
        ty
    }

    fn check_unary(&mut self, op: UnOp, ty: Option<Type>) -> Option<Type> {
        let ty = ty?;
        match op {
            UnOp::Neg | UnOp::Pos if ty.is_numeric() => Some(ty),
            UnOp::Not if ty == Type::Bool => Some(ty),
            _ => {
                self.errors.push(ResolveError::InvalidUnary { op, ty });
                None
            }
        }
    }

    fn check_binary(&mut self, op: BinOp, lhs: Option<Type>, rhs: Option<Type>) -> Option<Type> {
        let (lhs, rhs) = (lhs?, rhs?);

        if lhs != rhs {
            self.errors
                .push(ResolveError::OperandMismatch { op, lhs, rhs });
            return None;
        }

        // booleans only support the comparison subset
        if lhs == Type::Bool && !op.is_comparison() {
            self.errors.push(ResolveError::InvalidBinary { op, ty: lhs });
            return None;
        }

        Some(if op.is_comparison() { Type::Bool } else { lhs })
    }

    fn check_invocation(&mut self, invoked: &mut Expr, args: &mut [Expr]) -> Option<Type> {
        let arg_tys: Vec<Option<Type>> = args.iter_mut().map(|arg| self.check_expr(arg)).collect();

        let ExprKind::Accessor(ident) = &invoked.kind else {
            self.errors
                .push(ResolveError::NotInvocable("<expression>".to_owned()));
            return None;
        };
        let ident = ident.clone();

        match self.lookup(&ident).cloned() {
            None => {
                self.errors.push(ResolveError::Undeclared(ident));
                None
            }

            Some(Symbol::Var { .. }) => {
                self.errors.push(ResolveError::NotInvocable(ident));
                None
            }

            Some(Symbol::Func { params, ret }) => {
                if params.len() != args.len() {
                    self.errors.push(ResolveError::ArityMismatch {
                        ident: ident.clone(),
                        expected: params.len(),
                        found: args.len(),
                    });
                }

                for (index, (param, arg_ty)) in params.iter().zip(&arg_tys).enumerate() {
                    if let Some(found) = arg_ty {
                        if found != param {
                            self.errors.push(ResolveError::ArgumentType {
                                ident: ident.clone(),
                                index: index + 1,
                                expected: *param,
                                found: *found,
                            });
                        }
                    }
                }

                // the declared return type stands in even when arguments
                // were wrong, to avoid cascading errors at the call site
                Some(ret)
            }
        }
    }

    fn declare(&mut self, ident: String, symbol: Symbol) {
        let Some(frame) = self.scopes.last_mut() else {
            return;
        };

        if frame.contains_key(&ident) {
            self.errors.push(ResolveError::Duplicate(ident));
        } else {
            frame.insert(ident, symbol);
        }
    }

    /// Innermost frame wins; lexical shadowing falls out of the scan order.
    fn lookup(&self, ident: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|frame| frame.get(ident))
    }
}
