use tree_sitter::{Node, Tree};

use cartograph_core::types::{Edge, EdgeKind, SymbolKind, SymbolNode};

use crate::result::{ExtractionResult, RawImport};
use crate::treesitter::{node_text, strip_quotes};

/// Walks a parsed TS/TSX syntax tree and extracts function/class/interface/
/// type-alias/enum declarations plus arrow-function variable declarators,
/// import specifiers, and call-site references.
///
/// A declaration is exported iff its parent node is an `export_statement`.
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

fn is_exported(node: Node) -> bool {
    node.parent()
        .is_some_and(|p| p.kind() == "export_statement")
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
            "import_statement" => {
                extract_import(child, path, source, result);
            }
            "function_declaration" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    let name = node_text(name_node, source).to_string();
                    let symbol_id = push_symbol(
                        result,
                        path,
                        name,
                        SymbolKind::Function,
                        is_exported(child),
                        child,
                    );
                    walk(child, path, source, result, Some(&symbol_id));
                    continue;
                }
            }
            "class_declaration" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    let name = node_text(name_node, source).to_string();
                    let symbol_id = push_symbol(
                        result,
                        path,
                        name,
                        SymbolKind::Class,
                        is_exported(child),
                        child,
                    );
                    walk(child, path, source, result, Some(&symbol_id));
                    continue;
                }
            }
            "interface_declaration" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    let name = node_text(name_node, source).to_string();
                    push_symbol(
                        result,
                        path,
                        name,
                        SymbolKind::Interface,
                        is_exported(child),
                        child,
                    );
                }
            }
            "type_alias_declaration" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    let name = node_text(name_node, source).to_string();
                    push_symbol(
                        result,
                        path,
                        name,
                        SymbolKind::Type,
                        is_exported(child),
                        child,
                    );
                }
            }
            "enum_declaration" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    let name = node_text(name_node, source).to_string();
                    push_symbol(
                        result,
                        path,
                        name,
                        SymbolKind::Enum,
                        is_exported(child),
                        child,
                    );
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                extract_variable_declarators(child, path, source, result);
            }
            "call_expression" => {
                extract_call(child, source, result, enclosing);
            }
            _ => {}
        }
        walk(child, path, source, result, enclosing);
    }
}

fn extract_variable_declarators(
    node: Node,
    path: &str,
    source: &[u8],
    result: &mut ExtractionResult,
) {
    let exported = is_exported(node);
    let mut cursor = node.walk();
    for declarator in node.children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let Some(name_node) = declarator.child_by_field_name("name") else {
            continue;
        };
        let Some(value_node) = declarator.child_by_field_name("value") else {
            continue;
        };
        if value_node.kind() != "arrow_function" {
            continue;
        }
        let name = node_text(name_node, source).to_string();
        push_symbol(result, path, name, SymbolKind::Function, exported, declarator);
    }
}

fn extract_import(node: Node, path: &str, source: &[u8], result: &mut ExtractionResult) {
    let Some(source_node) = node.child_by_field_name("source") else {
        return;
    };
    let specifier = strip_quotes(node_text(source_node, source));
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
        "identifier" | "member_expression" => Some(node_text(func_node, source).to_string()),
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
