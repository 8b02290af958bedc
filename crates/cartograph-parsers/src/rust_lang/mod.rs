use tree_sitter::{Node, Tree};

use cartograph_core::types::{Edge, EdgeKind, SymbolKind, SymbolNode};

use crate::result::{ExtractionResult, RawImport};
use crate::treesitter::node_text;

/// Walks a parsed Rust syntax tree and extracts top-level functions,
/// structs/enums/type aliases, traits, methods inside impl blocks, `use`
/// declarations, and call-site references.
///
/// Exported-ness follows the presence of any `pub` visibility modifier
/// (`pub`, `pub(crate)`, `pub(super)`, ...) on the declaration.
pub fn extract(path: &str, tree: &Tree, source: &[u8]) -> ExtractionResult {
    let mut result = ExtractionResult::default();
    let root = tree.root_node();
    walk(root, path, source, &mut result, None);
    result
}

fn span(node: Node) -> (u32, u32) {
    (
        node.start_position().row as u32 + 1,
        node.end_position().row as u32 + 1,
    )
}

fn is_public(node: Node) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|c| c.kind() == "visibility_modifier")
}

fn push_symbol(
    result: &mut ExtractionResult,
    path: &str,
    name: String,
    kind: SymbolKind,
    exported: bool,
    node: Node,
) -> String {
    let (start_line, end_line) = span(node);
    let symbol = SymbolNode {
        name,
        kind,
        exported,
        file_path: path.to_string(),
        start_line,
        end_line,
    };
    let symbol_id = symbol.id();
    result.edges.push(Edge {
        source_id: path.to_string(),
        target_id: symbol_id.clone(),
        kind: EdgeKind::Defines,
    });
    result.symbols.push(symbol);
    symbol_id
}

fn walk(
    node: Node,
    path: &str,
    source: &[u8],
    result: &mut ExtractionResult,
    enclosing: Option<&str>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "use_declaration" => extract_use(child, path, source, result),
            "function_item" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    let name = node_text(name_node, source).to_string();
                    let symbol_id = push_symbol(
                        result,
                        path,
                        name,
                        SymbolKind::Function,
                        is_public(child),
                        child,
                    );
                    walk(child, path, source, result, Some(&symbol_id));
                    continue;
                }
            }
            "struct_item" | "enum_item" | "type_item" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    let name = node_text(name_node, source).to_string();
                    push_symbol(result, path, name, SymbolKind::Type, is_public(child), child);
                }
            }
            "trait_item" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    let name = node_text(name_node, source).to_string();
                    push_symbol(
                        result,
                        path,
                        name,
                        SymbolKind::Interface,
                        is_public(child),
                        child,
                    );
                }
            }
            "impl_item" => {
                extract_impl_methods(child, path, source, result);
                continue;
            }
            "call_expression" => {
                extract_call(child, source, result, enclosing);
            }
            _ => {}
        }
        walk(child, path, source, result, enclosing);
    }
}

fn extract_impl_methods(node: Node, path: &str, source: &[u8], result: &mut ExtractionResult) {
    let Some(body) = node.child_by_field_name("body") else {
        return;
    };
    let mut cursor = body.walk();
    for item in body.children(&mut cursor) {
        if item.kind() != "function_item" {
            continue;
        }
        let Some(name_node) = item.child_by_field_name("name") else {
            continue;
        };
        let name = node_text(name_node, source).to_string();
        let symbol_id = push_symbol(
            result,
            path,
            name,
            SymbolKind::Method,
            is_public(item),
            item,
        );
        walk(item, path, source, result, Some(&symbol_id));
    }
}

fn extract_use(node: Node, path: &str, source: &[u8], result: &mut ExtractionResult) {
    let Some(arg) = node.child_by_field_name("argument") else {
        return;
    };
    let specifier = node_text(arg, source).to_string();
    result.raw_imports.push(RawImport {
        source_file: path.to_string(),
        specifier,
    });
}

fn extract_call(node: Node, source: &[u8], result: &mut ExtractionResult, enclosing: Option<&str>) {
    let Some(enclosing) = enclosing else {
        return;
    };
    let Some(func_node) = node.child_by_field_name("function") else {
        return;
    };
    let callee = match func_node.kind() {
        "identifier" | "scoped_identifier" => Some(node_text(func_node, source).to_string()),
        _ => None,
    };

    if let Some(target) = callee {
        result.edges.push(Edge {
            source_id: enclosing.to_string(),
            target_id: target,
            kind: EdgeKind::Calls,
        });
    }
}
