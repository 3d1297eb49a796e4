
use brook_session::diagnostics::{Diagnostic, IntoDiagnostic};

use crate::source::SourceCursor;
use crate::token::{Literal, Token, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: u32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("malformed integer literal `{0}`")]
    MalformedInt(String),

    #[error("malformed float literal `{0}`")]
    MalformedFloat(String),
}

impl IntoDiagnostic for LexError {
    fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error()
            .with_message(self.kind.to_string())
            .with_line(self.line)
    }
}

pub struct Lexer<'a> {
    cursor: SourceCursor<'a>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: SourceCursor::new(source),
            errors: vec![],
        }
    }

    /// Tokenizes the whole source. Unrecognized characters and malformed
    /// literals are reported and skipped so one run surfaces every
    /// lexical error; the caller fails the stage if any were collected.
    pub fn lex(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = vec![];

        while !self.cursor.at_end() {
            self.cursor.pin();
            let line = self.cursor.line();

            let ch = self.cursor.read();
            let (kind, literal) = match ch {
                ch if ch.is_ascii_whitespace() => continue,

                // comment
                '/' if self.cursor.eat('/') => {
                    self.cursor.advance_while(|ch| ch != '\n');
                    continue;
                }

                '(' => (TokenKind::LParen, None),
                ')' => (TokenKind::RParen, None),
                '{' => (TokenKind::LBrace, None),
                '}' => (TokenKind::RBrace, None),

                ',' => (TokenKind::Comma, None),
                ':' => (TokenKind::Colon, None),
                ';' => (TokenKind::Semi, None),

                '+' => (TokenKind::Plus, None),
                '-' if self.cursor.eat('>') => (TokenKind::Arrow, None),
                '-' => (TokenKind::Minus, None),
                '*' => (TokenKind::Star, None),
                '/' => (TokenKind::Slash, None),

                '=' if self.cursor.eat('=') => (TokenKind::EqEq, None),
                '=' => (TokenKind::Assign, None),
                '!' if self.cursor.eat('=') => (TokenKind::BangEq, None),
                '!' => (TokenKind::Bang, None),
                '>' if self.cursor.eat('=') => (TokenKind::GtEq, None),
                '>' => (TokenKind::Gt, None),
                '<' if self.cursor.eat('=') => (TokenKind::LtEq, None),
                '<' => (TokenKind::Lt, None),

                ch if ch.is_ascii_digit() => match self.lex_number() {
                    Ok(token) => token,
                    Err(kind) => {
                        self.report(kind, line);
                        continue;
                    }
                },

                ch if is_ident_start(ch) => self.lex_alpha(),

                ch => {
                    self.report(LexErrorKind::UnexpectedChar(ch), line);
                    continue;
                }
            };

            tokens.push(Token {
                kind,
                lexeme: self.cursor.pinned().to_owned(),
                line,
                literal,
            });
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line: self.cursor.line(),
            literal: None,
        });

        (tokens, self.errors)
    }

    fn lex_number(&mut self) -> Result<(TokenKind, Option<Literal>), LexErrorKind> {
        self.cursor.advance_while(|ch| ch.is_ascii_digit());

        // a fractional part only counts if a digit follows the dot
        let is_float = self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|ch| ch.is_ascii_digit());

        if is_float {
            self.cursor.read();
            self.cursor.advance_while(|ch| ch.is_ascii_digit());
        }

        let lexeme = self.cursor.pinned();
        if is_float {
            let value = lexeme
                .parse::<f64>()
                .map_err(|_| LexErrorKind::MalformedFloat(lexeme.to_owned()))?;
            Ok((TokenKind::Float, Some(Literal::Float(value))))
        } else {
            // int is a wasm i32; anything wider would assemble to an
            // out-of-range constant
            let value = lexeme
                .parse::<i32>()
                .map_err(|_| LexErrorKind::MalformedInt(lexeme.to_owned()))?;
            Ok((TokenKind::Int, Some(Literal::Int(value))))
        }
    }

    fn lex_alpha(&mut self) -> (TokenKind, Option<Literal>) {
        self.cursor.advance_while(is_ident);

        match self.cursor.pinned() {
            "true" => (TokenKind::Bool, Some(Literal::Bool(true))),
            "false" => (TokenKind::Bool, Some(Literal::Bool(false))),
            "let" => (TokenKind::Let, None),
            "export" => (TokenKind::Export, None),
            "int" => (TokenKind::KwInt, None),
            "float" => (TokenKind::KwFloat, None),
            "bool" => (TokenKind::KwBool, None),
            ident => (TokenKind::Ident, Some(Literal::Ident(ident.to_owned()))),
        }
    }

    fn report(&mut self, kind: LexErrorKind, line: u32) {
        self.errors.push(LexError { kind, line });
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
