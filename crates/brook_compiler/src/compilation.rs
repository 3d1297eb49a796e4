use brook_session::diagnostics::DiagnosticEmitter;
use brook_session::Session;

use crate::{CompilerError, CompilerResult};

pub struct Artifacts {
    pub wat: String,
    pub loader: String,
}

/// Runs one source through every stage. Lex and parse errors are reported
/// together before failing, so a single run surfaces as many independent
/// problems as possible.
pub fn compile<D: DiagnosticEmitter>(
    session: &mut Session<D>,
    module_name: &str,
    source: &str,
) -> CompilerResult<Artifacts> {
    let (tokens, lex_errors) = brook_frontend::lex(source);
    let (mut module, parse_errors) = brook_frontend::parse(tokens);

    let mut had_errors = false;
    had_errors |= session.report_all(lex_errors).is_err();
    had_errors |= session.report_all(parse_errors).is_err();

    if had_errors {
        return Err(CompilerError::HadErrors);
    }

    let resolve_errors = brook_middle::resolve(&mut module);
    session.report_all(resolve_errors)?;

    let wat = brook_backend::generate(&module)?;
    let loader = brook_backend::bindings::loader(&module, module_name);

    Ok(Artifacts { wat, loader })
}
