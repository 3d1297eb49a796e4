use indoc::indoc;
use pretty_assertions::assert_eq;

fn generate(source: &str) -> String {
    let (tokens, lex_errors) = brook_frontend::lex(source);
    assert!(lex_errors.is_empty(), "{lex_errors:?}");

    let (mut module, parse_errors) = brook_frontend::parse(tokens);
    assert!(parse_errors.is_empty(), "{parse_errors:?}");

    let resolve_errors = brook_middle::resolve(&mut module);
    assert!(resolve_errors.is_empty(), "{resolve_errors:?}");

    crate::generate(&module).unwrap()
}

/// The assembler is the authority on whether the emitted text is well
/// formed.
fn generate_valid(source: &str) -> String {
    let wat_text = generate(source);
    wat::parse_str(&wat_text).unwrap_or_else(|err| panic!("invalid wat: {err}\n{wat_text}"));
    wat_text
}

#[test]
fn exported_function() {
    assert_eq!(
        generate_valid("export add = (a: int, b: int) -> int { a + b }"),
        indoc! {r#"
            (module
              (func $add (param $a i32) (param $b i32) (result i32)
                local.get $a
                local.get $b
                i32.add
              )
              (export "add" (func $add))
            )
        "#},
    );
}

#[test]
fn constant_global() {
    assert_eq!(
        generate_valid("export x = 1;"),
        indoc! {r#"
            (module
              (global $x i32 (i32.const 1))
              (export "x" (global $x))
            )
        "#},
    );
}

#[test]
fn literal_globals_by_type() {
    let wat_text = generate_valid("x = 1.5;\ny = true;\nz = false;");
    assert!(wat_text.contains("(global $x f64 (f64.const 1.5))"));
    assert!(wat_text.contains("(global $y i32 (i32.const 1))"));
    assert!(wat_text.contains("(global $z i32 (i32.const 0))"));
}

#[test]
fn computed_global_runs_in_the_start_routine() {
    assert_eq!(
        generate_valid("x = 1 + 2;"),
        indoc! {"
            (module
              (global $x (mut i32) (i32.const 0))
              (func $.init
                i32.const 1
                i32.const 2
                i32.add
                global.set $x
              )
              (start $.init)
            )
        "},
    );
}

#[test]
fn top_level_invocation_is_discarded() {
    let wat_text = generate_valid("f = () -> int { 1 }\nf();");
    assert!(wat_text.contains("call $f"));
    assert!(wat_text.contains("drop"));
    assert!(wat_text.contains("(start $.init)"));
}

#[test]
fn body_locals_are_declared_up_front() {
    assert_eq!(
        generate_valid("f = () -> int { x = 2; x * x }"),
        indoc! {"
            (module
              (func $f (result i32)
                (local $x i32)
                i32.const 2
                local.set $x
                local.get $x
                local.get $x
                i32.mul
              )
            )
        "},
    );
}

#[test]
fn non_final_body_invocation_is_dropped() {
    let wat_text = generate_valid("g = () -> int { 1 }\nf = () -> int { g(); 2 }");
    assert!(wat_text.contains("call $g\n    drop"));
}

#[test]
fn integer_negation_subtracts_from_zero() {
    let wat_text = generate_valid("x = -1;");
    assert!(wat_text.contains("i32.const 0\n    i32.const 1\n    i32.sub"));
}

#[test]
fn float_negation_uses_the_neg_instruction() {
    let wat_text = generate_valid("x = -1.5;");
    assert!(wat_text.contains("f64.const 1.5\n    f64.neg"));
}

#[test]
fn logical_not_tests_for_zero() {
    let wat_text = generate_valid("f = (b: bool) -> bool { !b }");
    assert!(wat_text.contains("local.get $b\n    i32.eqz"));
}

#[test]
fn integer_comparisons_are_signed() {
    let wat_text = generate_valid("f = (a: int, b: int) -> bool { a < b }");
    assert!(wat_text.contains("i32.lt_s"));

    let wat_text = generate_valid("f = (a: float, b: float) -> bool { a >= b }");
    assert!(wat_text.contains("f64.ge"));
}

#[test]
fn globals_are_reachable_from_bodies_and_the_start_routine() {
    generate_valid(indoc! {"
        pi = 3.14;
        export origin = 0;
        scale = pi * 2.0;
        export area = (r: float) -> float { r * r * scale }
        check = (x: int) -> bool { !(x < 0) }
        check(origin);
    "});
}
