pub mod diagnostics;

use diagnostics::{DiagnosticEmitter, IntoDiagnostic, Severity};

/// Marker error returned once a stage's diagnostics have been emitted.
/// The diagnostics themselves carry the details; this only signals that
/// compilation must not continue to the next stage.
#[derive(Debug, Clone, Copy)]
pub struct ErrorsEmitted;

/// State shared across the stages of one compilation.
pub struct Session<D: DiagnosticEmitter> {
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Session<D> {
    pub fn new(diagnostics: D) -> Self {
        Self { diagnostics }
    }

    pub fn report(&mut self, diagnostic: impl IntoDiagnostic) -> Result<(), ErrorsEmitted> {
        let diagnostic = diagnostic.into_diagnostic();
        let severity = diagnostic.severity;

        self.diagnostics.emit_diagnostic(diagnostic);

        if severity < Severity::Error {
            Ok(())
        } else {
            Err(ErrorsEmitted)
        }
    }

    /// Emits every diagnostic in the iterator, failing if any of them was
    /// an error. Stages call this once they have finished collecting, so
    /// that one run reports as many independent problems as possible.
    pub fn report_all<I>(&mut self, diagnostics: I) -> Result<(), ErrorsEmitted>
    where
        I: IntoIterator,
        I::Item: IntoDiagnostic,
    {
        let mut had_error = false;

        for diagnostic in diagnostics {
            let diagnostic = diagnostic.into_diagnostic();
            had_error |= diagnostic.severity >= Severity::Error;
            self.diagnostics.emit_diagnostic(diagnostic);
        }

        if !had_error {
            Ok(())
        } else {
            Err(ErrorsEmitted)
        }
    }
}
