use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A rendered diagnostic: a severity, a message, and the 1-based source
/// line it refers to when one is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub line: Option<u32>,
}

impl Diagnostic {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            message: String::new(),
            line: None,
        }
    }

    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    pub fn warning() -> Self {
        Self::new(Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

pub trait IntoDiagnostic {
    fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
    fn into_diagnostic(self) -> Diagnostic {
        self
    }
}

pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Writes colorized diagnostics to stderr and keeps a running error count
/// for the final summary line.
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    errors: usize,
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self {
            stream: StandardStream::stderr(ColorChoice::Auto),
            errors: 0,
        }
    }
}

impl PrettyDiagnosticEmitter {
    pub fn error_count(&self) -> usize {
        self.errors
    }

    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) -> std::io::Result<()> {
        let (color, label) = match diagnostic.severity {
            Severity::Warning => (Color::Yellow, "warning"),
            Severity::Error => (Color::Red, "error"),
        };

        self.stream
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(self.stream, "{label}")?;
        self.stream.reset()?;

        match diagnostic.line {
            Some(line) => writeln!(self.stream, " (line {line}): {}", diagnostic.message),
            None => writeln!(self.stream, ": {}", diagnostic.message),
        }
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity >= Severity::Error {
            self.errors += 1;
        }

        self.write_diagnostic(&diagnostic)
            .expect("failed to emit diagnostic");
    }
}
