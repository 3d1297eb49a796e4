//! The syntax tree: a closed set of declaration, statement and expression
//! variants. Expression and variable nodes carry a `ty` slot that stays
//! empty until the resolver fills it.

use std::fmt;

use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Module {
    pub items: Vec<Item>,
}

#[derive(Node!)]
pub enum Item {
    Export(Decl),
    Decl(Decl),
    Expr(Expr),
}

#[derive(Node!)]
pub enum Decl {
    Func(FuncDecl),
    Var(VarDecl),
}

impl Decl {
    pub fn ident(&self) -> &str {
        match self {
            Decl::Func(func) => &func.ident,
            Decl::Var(var) => &var.ident,
        }
    }
}

#[derive(Node!)]
pub struct FuncDecl {
    pub ident: String,
    pub params: Vec<Param>,
    pub ret_ty: Type,
    pub body: Vec<Stmt>,
}

#[derive(Node!)]
pub struct Param {
    pub ident: String,
    pub ty: Type,
}

#[derive(Node!)]
pub struct VarDecl {
    pub ident: String,
    pub expr: Expr,
    pub ty: Option<Type>,
}

#[derive(Node!)]
pub enum Stmt {
    Var(VarDecl),
    Expr(Expr),
}

#[derive(Node!)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Option<Type>,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self { kind, ty: None }
    }

    /// Placeholder inserted where an item or statement failed to parse, so
    /// that the module keeps its shape for later passes.
    pub fn placeholder() -> Self {
        Self::new(ExprKind::Accessor(String::new()))
    }
}

#[derive(Node!)]
pub enum ExprKind {
    Int(i32),
    Float(f64),
    Bool(bool),

    Accessor(String),

    Grouping(Box<Expr>),

    Invocation {
        invoked: Box<Expr>,
        args: Vec<Expr>,
    },

    Unary {
        op: UnOp,
        expr: Box<Expr>,
    },

    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(NodeCopy!)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,

    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
}

impl BinOp {
    /// Comparison and equality operators produce `bool`; the rest preserve
    /// their operand type.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::NotEq | BinOp::Gt | BinOp::GtEq | BinOp::Lt | BinOp::LtEq
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Gt => ">",
            BinOp::GtEq => ">=",
            BinOp::Lt => "<",
            BinOp::LtEq => "<=",
        };
        f.write_str(s)
    }
}

#[derive(NodeCopy!)]
pub enum UnOp {
    Neg,
    Pos,
    Not,
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnOp::Neg => "-",
            UnOp::Pos => "+",
            UnOp::Not => "!",
        };
        f.write_str(s)
    }
}

#[derive(NodeCopy!)]
pub enum Type {
    Int,
    Float,
    Bool,
}

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Bool => "bool",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
