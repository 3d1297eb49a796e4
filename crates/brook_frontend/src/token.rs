use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source substring that produced this token.
    pub lexeme: String,
    /// 1-based line of the token's first character.
    pub line: u32,
    /// Payload for the literal-bearing kinds, `None` for everything else.
    pub literal: Option<Literal>,
}

#[derive(Node!)]
pub enum Literal {
    Ident(String),
    Int(i32),
    Float(f64),
    Bool(bool),
}

#[derive(NodeCopy!)]
pub enum TokenKind {
    LParen,
    RParen,
    LBrace,
    RBrace,

    Comma,
    Colon,
    Semi,

    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    Assign,

    EqEq,
    BangEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Arrow,

    Let,
    Export,
    KwInt,
    KwFloat,
    KwBool,

    Ident,
    Int,
    Float,
    Bool,

    Eof,
}

impl TokenKind {
    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semi => "`;`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Bang => "`!`",
            TokenKind::Assign => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::BangEq => "`!=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Arrow => "`->`",
            TokenKind::Let => "keyword `let`",
            TokenKind::Export => "keyword `export`",
            TokenKind::KwInt => "keyword `int`",
            TokenKind::KwFloat => "keyword `float`",
            TokenKind::KwBool => "keyword `bool`",
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Bool => "boolean",
            TokenKind::Eof => "end of input",
        }
    }
}
