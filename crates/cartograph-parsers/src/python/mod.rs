use tree_sitter::{Node, Tree};

use cartograph_core::types::{Edge, EdgeKind, SymbolKind, SymbolNode};

use crate::result::{ExtractionResult, RawImport};
use crate::treesitter::node_text;

/// Walks a parsed Python syntax tree and extracts top-level functions and
/// classes, `import`/`from ... import` specifiers, and call-site references.
///
/// Only top-level definitions are emitted: a function/class whose parent is
/// the module node, or whose parent is a `decorated_definition` directly
/// under the module node.
pub fn extract(path: &str, tree: &Tree, source: &[u8]) -> ExtractionResult {
    let mut result = ExtractionResult::default();
    let root = tree.root_node();
    walk_module(root, path, source, &mut result);
    result
}

fn span(node: Node) -> (u32, u32) {
    (
        node.start_position().row as u32 + 1,
        node.end_position().row as u32 + 1,
    )
}

fn is_exported(name: &str) -> bool {
    !name.starts_with('_')
}

fn walk_module(root: Node, path: &str, source: &[u8], result: &mut ExtractionResult) {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "function_definition" | "class_definition" => {
                if let Some(symbol_id) = extract_definition(child, path, source, result) {
                    walk_calls(child, source, result, &symbol_id);
                }
            }
            "decorated_definition" => {
                if let Some(def) = child
                    .children(&mut child.walk())
                    .find(|n| n.kind() == "function_definition" || n.kind() == "class_definition")
                {
                    if let Some(symbol_id) = extract_definition(def, path, source, result) {
                        walk_calls(def, source, result, &symbol_id);
                    }
                }
            }
            "import_statement" => extract_import(child, path, source, result),
            "import_from_statement" => extract_import_from(child, path, source, result),
            _ => {}
        }
    }
}

fn extract_definition(
    node: Node,
    path: &str,
    source: &[u8],
    result: &mut ExtractionResult,
) -> Option<String> {
    let name_node = node.child_by_field_name("name")?;
    let name = node_text(name_node, source).to_string();
    let (start_line, end_line) = span(node);
    let kind = if node.kind() == "class_definition" {
        SymbolKind::Class
    } else {
        SymbolKind::Function
    };

    let symbol = SymbolNode {
        name: name.clone(),
        kind,
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

fn extract_import(node: Node, path: &str, source: &[u8], result: &mut ExtractionResult) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "dotted_name" {
            let specifier = node_text(child, source).to_string();
            result.raw_imports.push(RawImport {
                source_file: path.to_string(),
                specifier,
            });
        }
    }
}

fn extract_import_from(node: Node, path: &str, source: &[u8], result: &mut ExtractionResult) {
    let Some(module_node) = node.child_by_field_name("module_name") else {
        return;
    };
    let specifier = node_text(module_node, source).to_string();
    result.raw_imports.push(RawImport {
        source_file: path.to_string(),
        specifier,
    });
}

fn walk_calls(node: Node, source: &[u8], result: &mut ExtractionResult, enclosing: &str) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "call" {
            extract_call(child, source, result, enclosing);
        }
        walk_calls(child, source, result, enclosing);
    }
}

fn extract_call(node: Node, source: &[u8], result: &mut ExtractionResult, enclosing: &str) {
    let Some(func_node) = node.child_by_field_name("function") else {
        return;
    };
    let callee = match func_node.kind() {
        "identifier" => Some(node_text(func_node, source).to_string()),
        "attribute" => Some(node_text(func_node, source).to_string()),
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
