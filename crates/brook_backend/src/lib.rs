//! WebAssembly text emission.

mod codegen;

pub mod bindings;

#[cfg(test)]
mod tests;

use brook_frontend::ast::Module;

use codegen::WatGen;

/// Errors here are internal: a resolved module never triggers them.
#[derive(thiserror::Error, Debug)]
pub enum GenError {
    #[error("unresolved symbol `{0}`")]
    UnresolvedSymbol(String),

    #[error("`{0}` is not a function")]
    NotAFunction(String),

    #[error("expression reached the backend without a type")]
    MissingType,
}

pub type GenResult<T> = Result<T, GenError>;

/// Lowers a resolved module to WebAssembly text.
pub fn generate(module: &Module) -> GenResult<String> {
    WatGen::new().run(module)
}
