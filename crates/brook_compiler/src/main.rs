mod cli;
mod compilation;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use brook_session::diagnostics::PrettyDiagnosticEmitter;
use brook_session::{ErrorsEmitted, Session};
use clap::Parser as _;

use crate::cli::{Cli, Command};

#[derive(thiserror::Error, Debug)]
enum CompilerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("error during codegen: {0}")]
    Codegen(#[from] brook_backend::GenError),

    #[error("error assembling module: {0}")]
    Assemble(#[from] wat::Error),

    #[error("errors while compiling")]
    HadErrors,
}

impl From<ErrorsEmitted> for CompilerError {
    fn from(_: ErrorsEmitted) -> Self {
        Self::HadErrors
    }
}

type CompilerResult<T> = Result<T, CompilerError>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CompilerResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            input,
            source,
            output,
            emit_wat,
        } => {
            let (name, source) = if source {
                ("module".to_owned(), input)
            } else {
                let source = std::fs::read_to_string(&input)?;
                (module_name(&input), source)
            };

            let mut session = Session::new(PrettyDiagnosticEmitter::default());
            let artifacts = compilation::compile(&mut session, &name, &source)?;

            if emit_wat {
                print!("{}", artifacts.wat);
                return Ok(());
            }

            let output = output.unwrap_or_else(|| PathBuf::from(format!("{name}.wasm")));

            let binary = wat::parse_str(&artifacts.wat)?;
            std::fs::write(&output, binary)?;
            std::fs::write(output.with_extension("js"), artifacts.loader)?;

            Ok(())
        }
    }
}

/// File stem of the input path, used to name the module and its outputs.
fn module_name(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "module".to_owned())
}
