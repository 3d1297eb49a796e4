//! Cursor over the token sequence, with lookahead and conditional
//! consumption for the parser.

use crate::token::{Token, TokenKind};

pub struct TokenCursor {
    tokens: Vec<Token>,
    index: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned()?;
        self.index += 1;
        Some(token)
    }

    /// Returns the current token and advances, but only if its kind is one
    /// of `kinds`.
    pub fn consume(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if self.current_is(kinds) {
            self.advance()
        } else {
            None
        }
    }

    pub fn current_is(&self, kinds: &[TokenKind]) -> bool {
        self.current()
            .is_some_and(|token| kinds.contains(&token.kind))
    }

    /// Bounded forward scan: does `target` appear before `stop` matches or
    /// the tokens run out? Used to disambiguate statement forms without
    /// consuming anything.
    pub fn lookahead_until(&self, target: TokenKind, stop: impl Fn(TokenKind) -> bool) -> bool {
        for token in &self.tokens[self.index..] {
            if token.kind == target {
                return true;
            }
            if token.kind == TokenKind::Eof || stop(token.kind) {
                return false;
            }
        }
        false
    }

    pub fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
            || self
                .current()
                .is_some_and(|token| token.kind == TokenKind::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn cursor(source: &str) -> TokenCursor {
        let (tokens, errors) = Lexer::new(source).lex();
        assert!(errors.is_empty());
        TokenCursor::new(tokens)
    }

    #[test]
    fn consume_only_on_kind_match() {
        let mut tokens = cursor("x = 1");
        assert!(tokens.consume(&[TokenKind::Int]).is_none());
        assert!(tokens.consume(&[TokenKind::Ident]).is_some());
        assert!(tokens.consume(&[TokenKind::Assign, TokenKind::Colon]).is_some());
    }

    #[test]
    fn at_end_on_eof_marker() {
        let mut tokens = cursor("1");
        assert!(!tokens.at_end());
        tokens.advance();
        assert!(tokens.at_end());
    }

    #[test]
    fn lookahead_stops_at_terminator() {
        let tokens = cursor("x = 1; y");
        assert!(tokens.lookahead_until(TokenKind::Assign, |kind| kind == TokenKind::Semi));
        assert!(!tokens.lookahead_until(TokenKind::Gt, |kind| kind == TokenKind::Semi));

        let tokens = cursor("x; y = 1");
        assert!(!tokens.lookahead_until(TokenKind::Assign, |kind| kind == TokenKind::Semi));
    }
}
