//! Host-side loader emission.

use brook_frontend::ast::{Item, Module};

/// Emits a JavaScript module that instantiates the compiled binary next to
/// it and re-exports the module's surface by name.
pub fn loader(module: &Module, module_name: &str) -> String {
    let exports: Vec<&str> = module
        .items
        .iter()
        .filter_map(|item| match item {
            Item::Export(decl) => Some(decl.ident()),
            _ => None,
        })
        .collect();

    let mut out = format!(
        "\
const url = new URL(\"{module_name}.wasm\", import.meta.url);
const {{ instance }} = await WebAssembly.instantiateStreaming(fetch(url));
"
    );

    if !exports.is_empty() {
        out.push_str(&format!(
            "\nexport const {{ {} }} = instance.exports;\n",
            exports.join(", ")
        ));
    }

    out.push_str("\nexport default instance.exports;\n");
    out
}

#[cfg(test)]
mod tests {
    fn loader(source: &str) -> String {
        let (tokens, _) = brook_frontend::lex(source);
        let (module, errors) = brook_frontend::parse(tokens);
        assert!(errors.is_empty(), "{errors:?}");

        super::loader(&module, "demo")
    }

    #[test]
    fn references_the_binary_by_module_name() {
        assert!(loader("x = 1;").contains("\"demo.wasm\""));
    }

    #[test]
    fn reexports_each_exported_symbol() {
        let loader = loader("export x = 1;\ny = 2;\nexport f = () -> int { 1 }");
        assert!(loader.contains("export const { x, f } = instance.exports;"));
        assert!(loader.contains("export default instance.exports;"));
    }

    #[test]
    fn no_named_reexports_without_exports() {
        assert!(!loader("x = 1;").contains("export const"));
    }
}
