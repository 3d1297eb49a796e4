//! Static type resolution over the syntax tree.

mod resolver;


pub use resolver::ResolveError;

use brook_frontend::ast::Module;
use resolver::Resolver;

/// Annotates every expression and declaration with its resolved type, in
/// place. A non-empty error list means the module must not reach code
/// generation.
pub fn resolve(module: &mut Module) -> Vec<ResolveError> {
    Resolver::new().run(module)
}
