use std::collections::{HashMap, HashSet};

use brook_frontend::ast::*;

use crate::{GenError, GenResult};

/// Work queued for the start routine, in source order.
enum InitStep<'a> {
    SetGlobal(&'a VarDecl),
    Discard(&'a Expr),
}

pub(crate) struct WatGen {
    out: String,
    indent: usize,

    funcs: HashSet<String>,
    globals: HashMap<String, Type>,
    locals: HashMap<String, Type>,
}

impl WatGen {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,

            funcs: HashSet::new(),
            globals: HashMap::new(),
            locals: HashMap::new(),
        }
    }

    pub fn run(mut self, module: &Module) -> GenResult<String> {
        // all module-scope symbols up front, since bodies and initializers
        // may reference them out of textual order
        for item in &module.items {
            match item {
                Item::Decl(Decl::Func(func)) | Item::Export(Decl::Func(func)) => {
                    self.funcs.insert(func.ident.clone());
                }
                Item::Decl(Decl::Var(var)) | Item::Export(Decl::Var(var)) => {
                    let ty = var.ty.ok_or(GenError::MissingType)?;
                    self.globals.insert(var.ident.clone(), ty);
                }
                Item::Expr(_) => {}
            }
        }

        self.line("(module");
        self.indent += 1;

        // globals with literal initializers are emitted as constants; the
        // rest become mutable zeroed globals assigned by the start routine
        let mut init_steps = vec![];

        for item in &module.items {
            match item {
                Item::Decl(Decl::Var(var)) | Item::Export(Decl::Var(var)) => {
                    if self.gen_global(var)? {
                        init_steps.push(InitStep::SetGlobal(var));
                    }
                }
                Item::Expr(expr) => init_steps.push(InitStep::Discard(expr)),
                _ => {}
            }
        }

        if !init_steps.is_empty() {
            self.gen_init(&init_steps)?;
        }

        for item in &module.items {
            if let Item::Decl(Decl::Func(func)) | Item::Export(Decl::Func(func)) = item {
                self.gen_func(func)?;
            }
        }

        for item in &module.items {
            if let Item::Export(decl) = item {
                let kind = match decl {
                    Decl::Func(_) => "func",
                    Decl::Var(_) => "global",
                };
                let ident = decl.ident();
                self.line(&format!("(export \"{ident}\" ({kind} ${ident}))"));
            }
        }

        self.indent -= 1;
        self.line(")");

        Ok(self.out)
    }

    /// Emits the global definition. Returns `true` if the initializer has
    /// to run in the start routine.
    fn gen_global(&mut self, var: &VarDecl) -> GenResult<bool> {
        let ident = &var.ident;
        let ty = val_type(var.ty.ok_or(GenError::MissingType)?);

        let late = match var.expr.kind {
            ExprKind::Int(value) => {
                self.line(&format!("(global ${ident} {ty} ({ty}.const {value}))"));
                false
            }
            ExprKind::Float(value) => {
                self.line(&format!("(global ${ident} {ty} ({ty}.const {value:?}))"));
                false
            }
            ExprKind::Bool(value) => {
                let value = i32::from(value);
                self.line(&format!("(global ${ident} {ty} ({ty}.const {value}))"));
                false
            }
            _ => {
                self.line(&format!("(global ${ident} (mut {ty}) ({ty}.const 0))"));
                true
            }
        };

        Ok(late)
    }

    /// The start routine evaluates non-constant global initializers and
    /// surviving top-level expressions, in source order.
    fn gen_init(&mut self, steps: &[InitStep]) -> GenResult<()> {
        self.locals.clear();

        self.line("(func $.init");
        self.indent += 1;

        for step in steps {
            match step {
                InitStep::SetGlobal(var) => {
                    self.gen_expr(&var.expr)?;
                    self.line(&format!("global.set ${}", var.ident));
                }
                InitStep::Discard(expr) => {
                    self.gen_expr(expr)?;
                    self.line("drop");
                }
            }
        }

        self.indent -= 1;
        self.line(")");
        self.line("(start $.init)");

        Ok(())
    }

    fn gen_func(&mut self, func: &FuncDecl) -> GenResult<()> {
        self.locals.clear();

        let mut header = format!("(func ${}", func.ident);
        for param in &func.params {
            header.push_str(&format!(" (param ${} {})", param.ident, val_type(param.ty)));
            self.locals.insert(param.ident.clone(), param.ty);
        }
        header.push_str(&format!(" (result {})", val_type(func.ret_ty)));
        self.line(&header);
        self.indent += 1;

        // WAT wants all locals declared before the first instruction
        for stmt in &func.body {
            if let Stmt::Var(var) = stmt {
                let ty = var.ty.ok_or(GenError::MissingType)?;
                self.line(&format!("(local ${} {})", var.ident, val_type(ty)));
                self.locals.insert(var.ident.clone(), ty);
            }
        }

        let last = func.body.len().saturating_sub(1);
        for (index, stmt) in func.body.iter().enumerate() {
            match stmt {
                Stmt::Var(var) => {
                    self.gen_expr(&var.expr)?;
                    self.line(&format!("local.set ${}", var.ident));
                }
                Stmt::Expr(expr) => {
                    self.gen_expr(expr)?;
                    if index != last {
                        self.line("drop");
                    }
                }
            }
        }

        self.indent -= 1;
        self.line(")");

        Ok(())
    }

    fn gen_expr(&mut self, expr: &Expr) -> GenResult<()> {
        match &expr.kind {
            ExprKind::Int(value) => self.line(&format!("i32.const {value}")),
            ExprKind::Float(value) => self.line(&format!("f64.const {value:?}")),
            ExprKind::Bool(value) => self.line(&format!("i32.const {}", i32::from(*value))),

            ExprKind::Accessor(ident) => {
                if self.locals.contains_key(ident) {
                    self.line(&format!("local.get ${ident}"));
                } else if self.globals.contains_key(ident) {
                    self.line(&format!("global.get ${ident}"));
                } else {
                    return Err(GenError::UnresolvedSymbol(ident.clone()));
                }
            }

            ExprKind::Grouping(inner) => self.gen_expr(inner)?,

            ExprKind::Invocation { invoked, args } => {
                for arg in args {
                    self.gen_expr(arg)?;
                }

                let ExprKind::Accessor(ident) = &invoked.kind else {
                    return Err(GenError::NotAFunction("<expression>".to_owned()));
                };
                if !self.funcs.contains(ident) {
                    return Err(GenError::NotAFunction(ident.clone()));
                }
                self.line(&format!("call ${ident}"));
            }

            ExprKind::Unary { op, expr } => {
                let ty = expr_ty(expr)?;
                match (op, ty) {
                    // i32 has no neg instruction
                    (UnOp::Neg, Type::Int) => {
                        self.line("i32.const 0");
                        self.gen_expr(expr)?;
                        self.line("i32.sub");
                    }
                    (UnOp::Neg, _) => {
                        self.gen_expr(expr)?;
                        self.line("f64.neg");
                    }
                    (UnOp::Not, _) => {
                        self.gen_expr(expr)?;
                        self.line("i32.eqz");
                    }
                    (UnOp::Pos, _) => self.gen_expr(expr)?,
                }
            }

            ExprKind::Binary { op, lhs, rhs } => {
                let ty = expr_ty(lhs)?;
                self.gen_expr(lhs)?;
                self.gen_expr(rhs)?;
                self.line(bin_instr(*op, ty));
            }
        }

        Ok(())
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}

fn val_type(ty: Type) -> &'static str {
    match ty {
        Type::Int | Type::Bool => "i32",
        Type::Float => "f64",
    }
}

fn expr_ty(expr: &Expr) -> GenResult<Type> {
    expr.ty.ok_or(GenError::MissingType)
}

fn bin_instr(op: BinOp, ty: Type) -> &'static str {
    match ty {
        Type::Int | Type::Bool => match op {
            BinOp::Add => "i32.add",
            BinOp::Sub => "i32.sub",
            BinOp::Mul => "i32.mul",
            BinOp::Div => "i32.div_s",
            BinOp::Eq => "i32.eq",
            BinOp::NotEq => "i32.ne",
            BinOp::Gt => "i32.gt_s",
            BinOp::GtEq => "i32.ge_s",
            BinOp::Lt => "i32.lt_s",
            BinOp::LtEq => "i32.le_s",
        },
        Type::Float => match op {
            BinOp::Add => "f64.add",
            BinOp::Sub => "f64.sub",
            BinOp::Mul => "f64.mul",
            BinOp::Div => "f64.div",
            BinOp::Eq => "f64.eq",
            BinOp::NotEq => "f64.ne",
            BinOp::Gt => "f64.gt",
            BinOp::GtEq => "f64.ge",
            BinOp::Lt => "f64.lt",
            BinOp::LtEq => "f64.le",
        },
    }
}
