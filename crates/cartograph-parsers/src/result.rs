use cartograph_core::types::{Edge, FileNode, SymbolNode};

/// An import specifier exactly as it appears in source, not yet resolved
/// to a concrete file path.
#[derive(Debug, Clone, PartialEq)]
pub struct RawImport {
    pub source_file: String,
    pub specifier: String,
}

/// Everything one language extractor produces for a single file: its
/// symbols, every already-well-formed edge (DEFINES/CALLS/INHERITS/
/// IMPLEMENTS), and the raw IMPORTS specifiers that still need resolving.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub symbols: Vec<SymbolNode>,
    pub edges: Vec<Edge>,
    pub raw_imports: Vec<RawImport>,
}

/// Output of the parser facade for a single file.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub file: FileNode,
    pub symbols: Vec<SymbolNode>,
    pub edges: Vec<Edge>,
    pub raw_imports: Vec<RawImport>,
}
