use super::{ParseResult, Parser};
use crate::ast::*;
use crate::token::{Literal, Token, TokenKind};

/// Precedence levels, low to high. Each binary level builds a
/// left-associative chain.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Lowest,

    Equality,
    Comparison,

    Term,
    Factor,

    Unary,
}

fn binop_prec(op: BinOp) -> Prec {
    match op {
        BinOp::Eq | BinOp::NotEq => Prec::Equality,
        BinOp::Gt | BinOp::GtEq | BinOp::Lt | BinOp::LtEq => Prec::Comparison,
        BinOp::Add | BinOp::Sub => Prec::Term,
        BinOp::Mul | BinOp::Div => Prec::Factor,
    }
}

impl Parser {
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_prec(Prec::Lowest)
    }

    fn parse_prec(&mut self, in_prec: Prec) -> ParseResult<Expr> {
        let mut expr = self.parse_lhs()?;

        while let Some(op) = self.peek_bin_op(in_prec) {
            self.tokens.advance();

            let rhs = self.parse_prec(binop_prec(op))?;
            expr = Expr::new(ExprKind::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
            });
        }

        Ok(expr)
    }

    fn parse_lhs(&mut self) -> ParseResult<Expr> {
        match self.tokens.current() {
            Some(Token {
                kind: TokenKind::Int,
                literal: Some(Literal::Int(value)),
                ..
            }) => {
                let value = *value;
                self.tokens.advance();
                Ok(Expr::new(ExprKind::Int(value)))
            }

            Some(Token {
                kind: TokenKind::Float,
                literal: Some(Literal::Float(value)),
                ..
            }) => {
                let value = *value;
                self.tokens.advance();
                Ok(Expr::new(ExprKind::Float(value)))
            }

            Some(Token {
                kind: TokenKind::Bool,
                literal: Some(Literal::Bool(value)),
                ..
            }) => {
                let value = *value;
                self.tokens.advance();
                Ok(Expr::new(ExprKind::Bool(value)))
            }

            Some(token) if token.kind == TokenKind::Ident => {
                let ident = token.lexeme.clone();
                self.tokens.advance();

                if self.tokens.consume(&[TokenKind::LParen]).is_some() {
                    let args = self.parse_args()?;
                    Ok(Expr::new(ExprKind::Invocation {
                        invoked: Box::new(Expr::new(ExprKind::Accessor(ident))),
                        args,
                    }))
                } else {
                    Ok(Expr::new(ExprKind::Accessor(ident)))
                }
            }

            Some(token) if token.kind == TokenKind::Minus => {
                self.tokens.advance();
                self.parse_unary(UnOp::Neg)
            }
            Some(token) if token.kind == TokenKind::Plus => {
                self.tokens.advance();
                self.parse_unary(UnOp::Pos)
            }
            Some(token) if token.kind == TokenKind::Bang => {
                self.tokens.advance();
                self.parse_unary(UnOp::Not)
            }

            Some(token) if token.kind == TokenKind::LParen => {
                self.tokens.advance();

                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;

                Ok(Expr::new(ExprKind::Grouping(Box::new(expr))))
            }

            _ => Err(self.error_expected("an expression")),
        }
    }

    fn parse_unary(&mut self, op: UnOp) -> ParseResult<Expr> {
        let expr = self.parse_prec(Prec::Unary)?;
        Ok(Expr::new(ExprKind::Unary {
            op,
            expr: Box::new(expr),
        }))
    }

    fn parse_args(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = vec![];

        if !self.tokens.current_is(&[TokenKind::RParen]) {
            loop {
                args.push(self.parse_expr()?);
                if self.tokens.consume(&[TokenKind::Comma]).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        Ok(args)
    }

    fn peek_bin_op(&self, in_prec: Prec) -> Option<BinOp> {
        let op = match self.tokens.current().map(|token| token.kind)? {
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::BangEq => BinOp::NotEq,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::GtEq => BinOp::GtEq,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::LtEq => BinOp::LtEq,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,

            _ => return None,
        };

        // all binary operators are left-associative
        (binop_prec(op) > in_prec).then_some(op)
    }
}
