use brook_session::diagnostics::Diagnostic;
use brook_session::Session;
use indoc::indoc;
use pretty_assertions::assert_eq;

use crate::compilation;
use crate::CompilerError;

fn try_compile(source: &str) -> (Result<String, CompilerError>, Vec<Diagnostic>) {
    let mut session = Session::new(Vec::new());
    let result = compilation::compile(&mut session, "test", source);
    (result.map(|artifacts| artifacts.wat), session.diagnostics)
}

fn compile_ok(source: &str) -> String {
    let (result, diagnostics) = try_compile(source);
    assert_eq!(diagnostics, vec![]);
    result.unwrap()
}

#[test]
fn compiles_a_whole_program() {
    let wat_text = compile_ok(indoc! {"
        // circle area, with the radius fixed at build time
        radius = 2.0;
        pi = 3.14159;

        export area = () -> float {
            scaled = radius * radius;
            scaled * pi
        }

        export zero = 0;
    "});

    wat::parse_str(&wat_text).unwrap();
    assert!(wat_text.contains("(export \"area\" (func $area))"));
    assert!(wat_text.contains("(export \"zero\" (global $zero))"));
}

#[test]
fn lex_and_parse_errors_are_reported_together() {
    let (result, diagnostics) = try_compile("x = 1 $");
    assert!(matches!(result, Err(CompilerError::HadErrors)));
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn resolve_errors_surface_as_diagnostics() {
    let (result, diagnostics) = try_compile("x = y;");
    assert!(matches!(result, Err(CompilerError::HadErrors)));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "undeclared identifier `y`");
}

#[test]
fn overrange_int_literal_is_rejected_before_emission() {
    let (result, diagnostics) = try_compile("x = 5000000000;");
    assert!(matches!(result, Err(CompilerError::HadErrors)));
    assert!(diagnostics
        .iter()
        .any(|diagnostic| diagnostic.message == "malformed integer literal `5000000000`"));
}

#[test]
fn parse_diagnostics_carry_line_numbers() {
    let (_, diagnostics) = try_compile("x = 1;\ny = ;");
    assert_eq!(diagnostics[0].line, Some(2));
}

#[test]
fn recovery_reports_errors_from_separate_items() {
    let (result, diagnostics) = try_compile("x = ;\ny = 2;\nz = ;");
    assert!(result.is_err());
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn loader_is_named_after_the_module() {
    let mut session = Session::new(Vec::<Diagnostic>::new());
    let artifacts = compilation::compile(&mut session, "demo", "x = 1;").unwrap();
    assert!(artifacts.loader.contains("demo.wasm"));
}

#[test]
fn output_defaults_to_the_input_stem() {
    assert_eq!(crate::module_name("src/demo.brook"), "demo");
    assert_eq!(crate::module_name("demo"), "demo");
}
