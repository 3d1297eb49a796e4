//! The brook frontend: source text in, optimized syntax tree out.

#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;
mod shake;

pub mod ast;
pub mod cursor;
pub mod source;
pub mod token;

pub use lexer::{LexError, LexErrorKind};
pub use parser::ParseError;
pub use shake::shake;

use ast::Module;
use cursor::TokenCursor;
use lexer::Lexer;
use parser::Parser;
use token::Token;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)];
}

pub fn lex(source: &str) -> (Vec<Token>, Vec<LexError>) {
    Lexer::new(source).lex()
}

/// Parses a token sequence into a module, with the dead-code pass already
/// applied. Any returned error means the module must not be handed to the
/// resolver.
pub fn parse(tokens: Vec<Token>) -> (Module, Vec<ParseError>) {
    let (module, errors) = Parser::new(TokenCursor::new(tokens)).parse();
    (shake(module), errors)
}
