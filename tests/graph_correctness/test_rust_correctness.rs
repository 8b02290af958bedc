use cartograph_core::types::{EdgeKind, Language, SymbolKind};
use cartograph_parsers::treesitter::parse_file;

#[test]
fn pub_struct_with_a_pub_impl_method_and_a_call_and_a_use() {
    let source = b"use std::fmt;\n\npub struct Widget;\n\nimpl Widget {\n    pub fn render(&self) {\n        fmt::format(\"x\".to_string());\n    }\n}\n";
    let result = parse_file("widget.rs", source, Language::Rust).unwrap();

    let widget = result.symbols.iter().find(|s| s.name == "Widget").unwrap();
    assert_eq!(widget.kind, SymbolKind::Type);
    assert!(widget.exported);

    let render = result.symbols.iter().find(|s| s.name == "render").unwrap();
    assert_eq!(render.kind, SymbolKind::Method);
    assert!(render.exported);

    assert_eq!(result.raw_imports.len(), 1);
    assert_eq!(result.raw_imports[0].specifier, "std::fmt");

    let calls: Vec<_> = result
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Calls)
        .collect();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].target_id, "fmt::format");
    assert_eq!(calls[0].source_id, "widget.rs:render");
}

#[test]
fn private_function_without_pub_is_not_exported() {
    let source = b"fn helper() {}\n";
    let result = parse_file("lib.rs", source, Language::Rust).unwrap();
    assert_eq!(result.symbols.len(), 1);
    assert!(!result.symbols[0].exported);
}

#[test]
fn trait_item_is_kind_interface() {
    let source = b"pub trait Shape {\n    fn area(&self) -> f64;\n}\n";
    let result = parse_file("shape.rs", source, Language::Rust).unwrap();
    let shape = result.symbols.iter().find(|s| s.name == "Shape").unwrap();
    assert_eq!(shape.kind, SymbolKind::Interface);
    assert!(shape.exported);
}

#[test]
fn calls_outside_any_function_are_not_attributed_to_a_symbol() {
    let source = b"const X: i32 = compute();\n";
    let result = parse_file("consts.rs", source, Language::Rust).unwrap();
    assert!(result
        .edges
        .iter()
        .all(|e| e.kind != EdgeKind::Calls));
}
