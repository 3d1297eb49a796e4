
mod expr;

use brook_session::diagnostics::{Diagnostic, IntoDiagnostic};

use crate::ast::*;
use crate::cursor::TokenCursor;
use crate::token::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub expected: String,
    pub found: String,
    pub line: u32,
}

impl IntoDiagnostic for ParseError {
    fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error()
            .with_message(format!("expected {}, found {}", self.expected, self.found))
            .with_line(self.line)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser {
    tokens: TokenCursor,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(tokens: TokenCursor) -> Self {
        Self {
            tokens,
            errors: vec![],
        }
    }

    pub fn parse(mut self) -> (Module, Vec<ParseError>) {
        let module = self.parse_module();
        (module, self.errors)
    }

    fn parse_module(&mut self) -> Module {
        let mut items = vec![];

        while !self.tokens.at_end() {
            let item = self.parse_or_recover(Self::parse_item, |parser| {
                parser.recover_item();
                Item::Expr(Expr::placeholder())
            });
            items.push(item);
        }

        Module { items }
    }

    fn parse_item(&mut self) -> ParseResult<Item> {
        if self.tokens.consume(&[TokenKind::Export]).is_some() {
            let decl = self.parse_decl()?;
            Ok(Item::Export(decl))
        } else if self.tokens.current_is(&[TokenKind::Let]) || self.assign_ahead() {
            let decl = self.parse_decl()?;
            Ok(Item::Decl(decl))
        } else {
            let expr = self.parse_expr()?;
            if !self.tokens.at_end() {
                self.expect(TokenKind::Semi)?;
            }
            Ok(Item::Expr(expr))
        }
    }

    /// A declaration is `let? IDENT "=" (functionLiteral | expression)`.
    /// Function declarations take no trailing terminator, everything else
    /// does.
    fn parse_decl(&mut self) -> ParseResult<Decl> {
        self.tokens.consume(&[TokenKind::Let]);

        let ident = self.parse_ident()?;
        self.expect(TokenKind::Assign)?;

        if self.function_literal_ahead() {
            let func = self.parse_func_decl(ident)?;
            Ok(Decl::Func(func))
        } else {
            let expr = self.parse_expr()?;
            self.expect(TokenKind::Semi)?;
            Ok(Decl::Var(VarDecl {
                ident,
                expr,
                ty: None,
            }))
        }
    }

    /// Distinguishes `x = (a: int) -> int { .. }` from `x = (a + b);` by
    /// scanning for an arrow before the next terminator.
    fn function_literal_ahead(&self) -> bool {
        self.tokens.current_is(&[TokenKind::LParen])
            && self
                .tokens
                .lookahead_until(TokenKind::Arrow, |kind| kind == TokenKind::Semi)
    }

    fn assign_ahead(&self) -> bool {
        self.tokens.current_is(&[TokenKind::Ident])
            && self
                .tokens
                .lookahead_until(TokenKind::Assign, |kind| kind == TokenKind::Semi)
    }

    fn parse_func_decl(&mut self, ident: String) -> ParseResult<FuncDecl> {
        self.expect(TokenKind::LParen)?;

        let mut params = vec![];
        if !self.tokens.current_is(&[TokenKind::RParen]) {
            loop {
                let ident = self.parse_ident()?;
                self.expect(TokenKind::Colon)?;
                let ty = self.parse_type()?;
                params.push(Param { ident, ty });

                if self.tokens.consume(&[TokenKind::Comma]).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::Arrow)?;
        let ret_ty = self.parse_type()?;

        self.expect(TokenKind::LBrace)?;

        let mut body = vec![];
        while !self.tokens.at_end() && !self.tokens.current_is(&[TokenKind::RBrace]) {
            let stmt = self.parse_or_recover(Self::parse_statement, |parser| {
                parser.recover_statement();
                Stmt::Expr(Expr::placeholder())
            });
            body.push(stmt);
        }

        self.expect(TokenKind::RBrace)?;

        Ok(FuncDecl {
            ident,
            params,
            ret_ty,
            body,
        })
    }

    fn parse_type(&mut self) -> ParseResult<Type> {
        let token = self.tokens.consume(&[
            TokenKind::KwInt,
            TokenKind::KwFloat,
            TokenKind::KwBool,
        ]);

        match token.map(|token| token.kind) {
            Some(TokenKind::KwInt) => Ok(Type::Int),
            Some(TokenKind::KwFloat) => Ok(Type::Float),
            Some(TokenKind::KwBool) => Ok(Type::Bool),
            _ => Err(self.error_expected("a type")),
        }
    }

    /// Whether a body line is a variable declaration or an expression
    /// statement is decided by a bounded lookahead for `=` before the next
    /// terminator.
    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        if self.tokens.current_is(&[TokenKind::Let]) || self.assign_ahead() {
            self.tokens.consume(&[TokenKind::Let]);

            let ident = self.parse_ident()?;
            self.expect(TokenKind::Assign)?;
            let expr = self.parse_expr()?;
            self.expect(TokenKind::Semi)?;

            Ok(Stmt::Var(VarDecl {
                ident,
                expr,
                ty: None,
            }))
        } else {
            let expr = self.parse_expr()?;

            // the final statement is the function's value and may omit the
            // terminator
            if !self.tokens.current_is(&[TokenKind::RBrace]) {
                self.expect(TokenKind::Semi)?;
            }

            Ok(Stmt::Expr(expr))
        }
    }

    fn parse_ident(&mut self) -> ParseResult<String> {
        match self.tokens.consume(&[TokenKind::Ident]) {
            Some(token) => Ok(token.lexeme),
            None => Err(self.error_expected("an identifier")),
        }
    }

    fn parse_or_recover<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
        recover: impl FnOnce(&mut Self) -> T,
    ) -> T {
        match parse(self) {
            Ok(node) => node,
            Err(error) => {
                self.report(error);
                recover(self)
            }
        }
    }

    /// Panic-mode resynchronization for a failed top-level item: skip to
    /// the next terminator, or past the closing brace of a function body.
    fn recover_item(&mut self) {
        let mut brace_depth = 0usize;

        while let Some(token) = self.tokens.current() {
            match token.kind {
                TokenKind::Semi if brace_depth == 0 => {
                    self.tokens.advance();
                    return;
                }
                TokenKind::LBrace => {
                    brace_depth += 1;
                    self.tokens.advance();
                }
                TokenKind::RBrace => {
                    self.tokens.advance();
                    if brace_depth <= 1 {
                        return;
                    }
                    brace_depth -= 1;
                }
                TokenKind::Eof => return,
                _ => {
                    self.tokens.advance();
                }
            }
        }
    }

    /// Statement recovery stops short of the body's closing brace so the
    /// enclosing function can still be finished.
    fn recover_statement(&mut self) {
        while let Some(token) = self.tokens.current() {
            match token.kind {
                TokenKind::Semi => {
                    self.tokens.advance();
                    return;
                }
                TokenKind::RBrace | TokenKind::Eof => return,
                _ => {
                    self.tokens.advance();
                }
            }
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.tokens.consume(&[kind]).is_some() {
            Ok(())
        } else {
            Err(self.error_expected(kind.token_name()))
        }
    }

    fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    fn error_expected(&self, expected: impl Into<String>) -> ParseError {
        let (found, line) = match self.tokens.current() {
            Some(token) => (token.kind.token_name().to_owned(), token.line),
            None => ("end of input".to_owned(), 0),
        };

        ParseError {
            expected: expected.into(),
            found,
            line,
        }
    }
}
