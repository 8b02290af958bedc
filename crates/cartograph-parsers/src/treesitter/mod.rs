use tree_sitter::Parser;

use cartograph_core::types::{FileNode, Language};

use crate::go;
use crate::python;
use crate::result::ParseResult;
use crate::rust_lang;
use crate::typescript;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("parse: unsupported language {0}")]
    Unsupported(String),
    #[error("parse: tree-sitter produced no syntax tree for {0}")]
    GrammarFailure(String),
}

fn ts_language(language: Language) -> tree_sitter::Language {
    match language {
        Language::Go => tree_sitter_go::LANGUAGE.into(),
        Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        Language::Python => tree_sitter_python::LANGUAGE.into(),
        Language::Rust => tree_sitter_rust::LANGUAGE.into(),
    }
}

/// Parses a single file's bytes with the grammar for `language` and
/// delegates extraction to the matching language module. A fresh
/// [`Parser`] is created for every call so no grammar handle is ever
/// shared across threads.
pub fn parse_file(path: &str, source: &[u8], language: Language) -> Result<ParseResult, ParseError> {
    let loc = line_count(source);

    if source.is_empty() {
        return Ok(ParseResult {
            file: FileNode {
                path: path.to_string(),
                language,
                loc: 0,
            },
            symbols: Vec::new(),
            edges: Vec::new(),
            raw_imports: Vec::new(),
        });
    }

    let mut parser = Parser::new();
    parser
        .set_language(&ts_language(language))
        .map_err(|_| ParseError::Unsupported(language.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::GrammarFailure(path.to_string()))?;

    let extraction = match language {
        Language::Go => go::extract(path, &tree, source),
        Language::TypeScript => typescript::extract(path, &tree, source),
        Language::Python => python::extract(path, &tree, source),
        Language::Rust => rust_lang::extract(path, &tree, source),
    };

    Ok(ParseResult {
        file: FileNode {
            path: path.to_string(),
            language,
            loc,
        },
        symbols: extraction.symbols,
        edges: extraction.edges,
        raw_imports: extraction.raw_imports,
    })
}

fn line_count(source: &[u8]) -> u32 {
    if source.is_empty() {
        0
    } else {
        source.iter().filter(|&&b| b == b'\n').count() as u32 + 1
    }
}

pub(crate) fn node_text<'a>(node: tree_sitter::Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

pub(crate) fn strip_quotes(raw: &str) -> String {
    raw.trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string()
}
