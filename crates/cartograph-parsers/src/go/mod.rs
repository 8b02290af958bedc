use tree_sitter::{Node, Tree};

use cartograph_core::types::{Edge, EdgeKind, SymbolKind, SymbolNode};

use crate::result::{ExtractionResult, RawImport};
use crate::treesitter::{node_text, strip_quotes};

/// Walks a parsed Go syntax tree and extracts top-level function/method/type
/// declarations, import specs, and call-site references.
///
/// Exported-ness follows Go's own rule: the first code-point of the name is
/// uppercase.
pub fn extract(path: &str, tree: &Tree, source: &[u8]) -> ExtractionResult {
    let mut result = ExtractionResult::default();
    let root = tree.root_node();
    walk(root, path, source, &mut result, None);
    result
}

fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

fn span(node: Node) -> (u32, u32) {
    (
        node.start_position().row as u32 + 1,
        node.end_position().row as u32 + 1,
    )
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
            "import_declaration" => extract_imports(child, path, source, result),
            "function_declaration" => {
                if let Some(symbol_id) = extract_function(child, path, source, result) {
                    walk(child, path, source, result, Some(&symbol_id));
                    continue;
                }
            }
            "method_declaration" => {
                if let Some(symbol_id) = extract_method(child, path, source, result) {
                    walk(child, path, source, result, Some(&symbol_id));
                    continue;
                }
            }
            "type_declaration" => extract_type_decl(child, path, source, result),
            "call_expression" => {
                extract_call(child, source, result, enclosing);
            }
            _ => {}
        }
        walk(child, path, source, result, enclosing);
    }
}

fn extract_imports(node: Node, path: &str, source: &[u8], result: &mut ExtractionResult) {
    collect_import_specs(node, path, source, result);
}

fn collect_import_specs(node: Node, path: &str, source: &[u8], result: &mut ExtractionResult) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "import_spec" {
            if let Some(path_node) = child.child_by_field_name("path") {
                let specifier = strip_quotes(node_text(path_node, source));
                result.raw_imports.push(RawImport {
                    source_file: path.to_string(),
                    specifier,
                });
            }
        } else {
            collect_import_specs(child, path, source, result);
        }
    }
}

fn extract_function(
    node: Node,
    path: &str,
    source: &[u8],
    result: &mut ExtractionResult,
) -> Option<String> {
    let name_node = node.child_by_field_name("name")?;
    let name = node_text(name_node, source).to_string();
    let (start_line, end_line) = span(node);

    let symbol = SymbolNode {
        name: name.clone(),
        kind: SymbolKind::Function,
        exported: is_exported(&name),
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
    Some(symbol_id)
}

fn extract_method(
    node: Node,
    path: &str,
    source: &[u8],
    result: &mut ExtractionResult,
) -> Option<String> {
    let name_node = node.child_by_field_name("name")?;
    let name = node_text(name_node, source).to_string();
    let (start_line, end_line) = span(node);

    let symbol = SymbolNode {
        name: name.clone(),
        kind: SymbolKind::Method,
        exported: is_exported(&name),
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
    Some(symbol_id)
}

fn extract_type_decl(node: Node, path: &str, source: &[u8], result: &mut ExtractionResult) {
    let mut cursor = node.walk();
    for spec in node.children(&mut cursor) {
        if spec.kind() != "type_spec" {
            continue;
        }
        let Some(name_node) = spec.child_by_field_name("name") else {
            continue;
        };
        let name = node_text(name_node, source).to_string();
        let (start_line, end_line) = span(spec);
        let kind = match spec.child_by_field_name("type") {
            Some(type_node) if type_node.kind() == "interface_type" => SymbolKind::Interface,
            _ => SymbolKind::Type,
        };

        let symbol = SymbolNode {
            name: name.clone(),
            kind,
            exported: is_exported(&name),
            file_path: path.to_string(),
            start_line,
            end_line,
        };
        result.edges.push(Edge {
            source_id: path.to_string(),
            target_id: symbol.id(),
            kind: EdgeKind::Defines,
        });
        result.symbols.push(symbol);
    }
}

fn extract_call(
    node: Node,
    source: &[u8],
    result: &mut ExtractionResult,
    enclosing: Option<&str>,
) {
    let Some(enclosing) = enclosing else {
        return;
    };
    let Some(func_node) = node.child_by_field_name("function") else {
        return;
    };
    let callee = match func_node.kind() {
        "identifier" => Some(node_text(func_node, source).to_string()),
        "selector_expression" => {
            let operand = func_node
                .child_by_field_name("operand")
                .map(|n| node_text(n, source));
            let field = func_node
                .child_by_field_name("field")
                .map(|n| node_text(n, source));
            match (operand, field) {
                (Some(o), Some(f)) => Some(format!("{o}.{f}")),
                _ => None,
            }
        }
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
