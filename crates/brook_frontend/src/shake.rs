//! Tree shaking: drops expressions that can have no observable effect.

use crate::ast::*;

/// Removes dead top-level expressions and dead body statements.
///
/// A pure expression (binary, unary, literal, accessor) at module scope
/// has no observable effect and is always dead. Inside a body, pure
/// statements are dead except the last one, which is the function's
/// value. Idempotent.
pub fn shake(mut module: Module) -> Module {
    module
        .items
        .retain(|item| !matches!(item, Item::Expr(expr) if is_dead(expr)));

    for item in &mut module.items {
        if let Item::Decl(Decl::Func(func)) | Item::Export(Decl::Func(func)) = item {
            shake_body(&mut func.body);
        }
    }

    module
}

fn shake_body(body: &mut Vec<Stmt>) {
    let len = body.len();
    let mut index = 0;

    body.retain(|stmt| {
        let last = index + 1 == len;
        index += 1;
        last || !matches!(stmt, Stmt::Expr(expr) if is_dead(expr))
    });
}

fn is_dead(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Binary { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Bool(_)
            | ExprKind::Accessor(_)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::ast::{Item, Module, Stmt};

    fn parse(source: &str) -> Module {
        let (tokens, lex_errors) = crate::lex(source);
        assert!(lex_errors.is_empty());
        let (module, parse_errors) = crate::parse(tokens);
        assert!(parse_errors.is_empty(), "{parse_errors:?}");
        module
    }

    #[test]
    fn dead_top_level_expression_is_removed() {
        let module = parse("2 + 2 - 1 / 5 * 6");
        assert_eq!(module.items, vec![]);
    }

    #[test]
    fn declarations_survive() {
        let module = parse("x = 1;\n3 + 4;\nexport y = 2;");
        assert_eq!(module.items.len(), 2);
    }

    #[test]
    fn top_level_invocation_survives() {
        let module = parse("f = () -> int { 1 }\nf();");
        assert!(matches!(module.items[1], Item::Expr(_)));
    }

    #[test]
    fn body_keeps_only_the_final_value() {
        let module = parse("f = () -> int { 1; 2; 3 }");
        let Item::Decl(crate::ast::Decl::Func(func)) = &module.items[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(func.body.len(), 1);
        assert!(matches!(func.body[0], Stmt::Expr(_)));
    }

    #[test]
    fn body_invocations_and_declarations_survive() {
        let module = parse("g = () -> int { 1 }\nf = () -> int { g(); x = 2; x }");
        let Item::Decl(crate::ast::Decl::Func(func)) = &module.items[1] else {
            panic!("expected a function declaration");
        };
        assert_eq!(func.body.len(), 3);
    }

    #[test]
    fn idempotent() {
        let module = parse("f = () -> int { 1; 2 }\n4 - 2;\nx = 1;");
        let shaken_again = super::shake(module.clone());
        assert_eq!(module, shaken_again);
    }
}
